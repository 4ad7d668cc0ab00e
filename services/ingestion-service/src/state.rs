use std::sync::Arc;

use crate::store::PingStore;

#[derive(Clone)]
pub struct AppState {
    pub pings: Arc<dyn PingStore>,
    pub relational: Option<Arc<tokio_postgres::Client>>,
}
