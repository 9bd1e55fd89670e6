//! URL slug derivation for shop names.

/// Derive a URL slug: lowercase ASCII letters and digits, with runs of
/// anything else collapsed into single hyphens. Portuguese diacritics
/// fold to their base letter so "Barbearia São João" stays readable.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => Some(c),
            'á' | 'à' | 'â' | 'ã' => Some('a'),
            'é' | 'ê' => Some('e'),
            'í' => Some('i'),
            'ó' | 'ô' | 'õ' => Some('o'),
            'ú' | 'ü' => Some('u'),
            'ç' => Some('c'),
            _ => None,
        };
        match mapped {
            Some(c) => slug.push(c),
            None => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "shop".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("Barbearia Central"), "barbearia-central");
        assert_eq!(slugify("Corte & Cia"), "corte-cia");
    }

    #[test]
    fn test_portuguese_diacritics_fold() {
        assert_eq!(slugify("Barbearia São João"), "barbearia-sao-joao");
        assert_eq!(slugify("Navalha de Ouro"), "navalha-de-ouro");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(slugify("  A --- B  "), "a-b");
        assert_eq!(slugify("Shop!!!"), "shop");
    }

    #[test]
    fn test_unsluggable_name_gets_placeholder() {
        assert_eq!(slugify("!!!"), "shop");
        assert_eq!(slugify(""), "shop");
    }
}
