//! Diesel row models for feed persistence.

use super::schema::{activities, comments};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Comment row, used for both reads and inserts. `seq` is assigned by the
/// database and never selected.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author.
    pub user_id: uuid::Uuid,
    /// Body text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Activity row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Kind of the referenced record.
    pub entity_type: String,
    /// Identifier of the referenced record.
    pub entity_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Action verb.
    pub action: String,
    /// Free-form details.
    pub details: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
