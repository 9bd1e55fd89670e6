use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::{JwtConfig, jwt::generate_dev_secret};

/// Timezone used when TIMEZONE is unset or unparseable.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Database, uploads and logs |
/// | HTTP_PORT | 8650 | HTTP API port |
/// | TIMEZONE | America/Sao_Paulo | Business timezone for slot math |
/// | JWT_SECRET | (generated in dev) | Token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Dashboard token lifetime |
/// | PAYMENT_API_URL | https://api.mercadopago.com | Checkout API base |
/// | PAYMENT_ACCESS_TOKEN | (empty) | Checkout API credential |
/// | CHECKOUT_BACK_URL | http://localhost:5173/billing/return | Post-payment redirect |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/navalha HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding database, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone; appointment instants are wall-clock times here
    pub timezone: Tz,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Billing ===
    /// Payment provider API base URL
    pub payment_api_url: String,
    /// Payment provider access token; checkout is refused when empty
    pub payment_access_token: String,
    /// URL the provider redirects to after payment
    pub checkout_back_url: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8650),
            timezone: load_timezone(),
            jwt: load_jwt_config(&environment),
            environment,

            payment_api_url: std::env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "https://api.mercadopago.com".into()),
            payment_access_token: std::env::var("PAYMENT_ACCESS_TOKEN").unwrap_or_default(),
            checkout_back_url: std::env::var("CHECKOUT_BACK_URL")
                .unwrap_or_else(|_| "http://localhost:5173/billing/return".into()),
        }
    }

    /// Override work dir and port, typically for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("navalha.db")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn load_timezone() -> Tz {
    match std::env::var("TIMEZONE") {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timezone = %name,
                "Unknown TIMEZONE, falling back to {}",
                DEFAULT_TIMEZONE
            );
            DEFAULT_TIMEZONE
        }),
        Err(_) => DEFAULT_TIMEZONE,
    }
}

/// Load JWT settings. A missing or short secret is fatal in production;
/// elsewhere a throwaway secret is generated, so issued tokens die with
/// the process.
fn load_jwt_config(environment: &str) -> JwtConfig {
    let secret = match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            if environment == "production" {
                panic!("JWT_SECRET must be at least 32 characters long in production");
            }
            tracing::warn!("JWT_SECRET too short, generating a temporary secret");
            generate_dev_secret()
        }
        Err(_) => {
            if environment == "production" {
                panic!("JWT_SECRET environment variable must be set in production");
            }
            tracing::warn!(
                "JWT_SECRET not set, generating a temporary secret; tokens will not survive restarts"
            );
            generate_dev_secret()
        }
    };

    let expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(24 * 60);

    JwtConfig::new(secret, expiration_minutes)
}
