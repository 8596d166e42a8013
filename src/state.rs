use crate::db::{DbPool, OrmConn, orm_from_pool};

/// Handles shared by every request. `orm` wraps the same pool, so SeaORM queries and hand-written
/// sqlx statements draw from one set of connections.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}

impl AppState {
    pub fn from_pool(pool: DbPool) -> Self {
        let orm = orm_from_pool(&pool);
        Self { pool, orm }
    }
}
