use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::BillingService;

/// Server state shared across handlers
///
/// Holds cheap-to-clone handles to every service:
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | SQLite pools (read pool + serialized write pool) |
/// | jwt_service | Token issuing and validation |
/// | billing | Payment provider client |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub billing: BillingService,
}

impl ServerState {
    /// Initialize state: work directory layout, database (with
    /// migrations), then the services.
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created or the database
    /// fails to open, since the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let billing = BillingService::new(config);

        Self {
            config: config.clone(),
            db,
            jwt_service,
            billing,
        }
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.config.uploads_dir()
    }
}
