use std::sync::Arc;

use crate::{config::Config, db::DbPool, utils::files::FileStore, utils::mail::Mailer};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub files: FileStore,
    pub mailer: Mailer,
}
