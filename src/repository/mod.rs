//! Repository layer for database operations

pub mod visits;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub visits: visits::VisitsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>, table: String) -> Self {
        Self {
            visits: visits::VisitsRepository::new(pool.clone(), table),
            pool,
        }
    }
}

/// Split driver failures into "store unreachable" and "statement failed"
pub(crate) fn map_db_err(e: sqlx::Error) -> AppError {
    if matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    ) {
        AppError::Connection(e.to_string())
    } else {
        AppError::Database(e)
    }
}
