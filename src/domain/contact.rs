use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A row of the `contacts` table.
#[derive(Debug, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
}
