use std::sync::Arc;

use crate::db::Database;
use crate::services::{AdminGuard, UploadStore};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: Arc<UploadStore>,
    pub guard: Arc<AdminGuard>,
}

impl AppState {
    pub fn new(db: Database, uploads: UploadStore, guard: AdminGuard) -> Self {
        Self {
            db,
            uploads: Arc::new(uploads),
            guard: Arc::new(guard),
        }
    }
}
