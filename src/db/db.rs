use sqlx::{Pool, Postgres};

/// Handle to the document store. Owns the connection pool; every
/// collection is reached through an extension trait on this type.
#[derive(Debug, Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}
