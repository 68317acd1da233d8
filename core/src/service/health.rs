use log::error;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;

use crate::service::CatalogService;

const OK: &str = "ok";
const FAIL: &str = "fail";

/// Body of `GET /health`; the service is only as healthy as its database.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: &'static str,
    pub db: &'static str,
}

impl HealthReport {
    fn from_db(db_ok: bool) -> Self {
        let state = if db_ok { OK } else { FAIL };
        Self {
            status: state,
            db: state,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.db == OK
    }
}

impl CatalogService {
    pub async fn run_health_checks(&self) -> HealthReport {
        let db = self.persist_ctx().db.as_ref();
        let ping = Statement::from_string(db.get_database_backend(), "SELECT 1");
        let db_ok = match db.query_one(ping).await {
            Ok(_) => true,
            Err(e) => {
                error!("DB health check failed: {e}");
                false
            }
        };
        HealthReport::from_db(db_ok)
    }
}
