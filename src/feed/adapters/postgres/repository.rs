//! `PostgreSQL` repositories for comments and activity entries.

use super::{
    models::{ActivityRow, CommentRow},
    schema::{activities, comments},
};
use crate::feed::{
    domain::{
        Activity, ActivityId, Comment, CommentId, EntityKind, PersistedActivityData,
        PersistedCommentData,
    },
    ports::{ActivityRepository, CommentRepository, FeedRepositoryError, FeedRepositoryResult},
};
use crate::persistence::{PgPool, run_blocking};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> FeedRepositoryResult<()> {
        let comment_id = comment.id();
        let row = CommentRow {
            id: comment_id.into_inner(),
            task_id: comment.task_id().into_inner(),
            user_id: comment.user_id().into_inner(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        };
        run_blocking(&self.pool, FeedRepositoryError::persistence, move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FeedRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => FeedRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> FeedRepositoryResult<Vec<Comment>> {
        run_blocking(&self.pool, FeedRepositoryError::persistence, move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .order(comments::seq.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(FeedRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_comment).collect())
        })
        .await
    }
}

/// `PostgreSQL`-backed activity repository.
#[derive(Debug, Clone)]
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn store(&self, activity: &Activity) -> FeedRepositoryResult<()> {
        let activity_id = activity.id();
        let row = ActivityRow {
            id: activity_id.into_inner(),
            entity_type: activity.entity_kind().as_str().to_owned(),
            entity_id: activity.entity_id(),
            user_id: activity.user_id().into_inner(),
            action: activity.action().to_owned(),
            details: activity.details().map(str::to_owned),
            created_at: activity.created_at(),
        };
        run_blocking(&self.pool, FeedRepositoryError::persistence, move |connection| {
            diesel::insert_into(activities::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FeedRepositoryError::DuplicateActivity(activity_id)
                    }
                    _ => FeedRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> FeedRepositoryResult<Vec<Activity>> {
        run_blocking(&self.pool, FeedRepositoryError::persistence, |connection| {
            let rows = activities::table
                .order(activities::seq.asc())
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(FeedRepositoryError::persistence)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        content: row.content,
        created_at: row.created_at,
    })
}

fn row_to_activity(row: ActivityRow) -> FeedRepositoryResult<Activity> {
    let entity_kind =
        EntityKind::try_from(row.entity_type.as_str()).map_err(FeedRepositoryError::persistence)?;
    Ok(Activity::from_persisted(PersistedActivityData {
        id: ActivityId::from_uuid(row.id),
        entity_kind,
        entity_id: row.entity_id,
        user_id: UserId::from_uuid(row.user_id),
        action: row.action,
        details: row.details,
        created_at: row.created_at,
    }))
}
