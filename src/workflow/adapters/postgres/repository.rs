//! `PostgreSQL` repository implementation for workflow definitions.

use super::{
    models::{NewWorkflowRow, WorkflowRow},
    schema::workflows,
};
use crate::persistence::{PgPool, run_blocking};
use crate::workflow::{
    domain::{PersistedWorkflowData, StageList, Workflow, WorkflowId},
    ports::{WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed workflow repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowRepository {
    pool: PgPool,
}

impl PostgresWorkflowRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn store(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()> {
        let workflow_id = workflow.id();
        let new_row = to_new_row(workflow)?;
        run_blocking(&self.pool, WorkflowRepositoryError::persistence, move |connection| {
            diesel::insert_into(workflows::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkflowRepositoryError::DuplicateWorkflow(workflow_id)
                    }
                    _ => WorkflowRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkflowId) -> WorkflowRepositoryResult<Option<Workflow>> {
        run_blocking(&self.pool, WorkflowRepositoryError::persistence, move |connection| {
            let row = workflows::table
                .filter(workflows::id.eq(id.into_inner()))
                .select(WorkflowRow::as_select())
                .first::<WorkflowRow>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            row.map(row_to_workflow).transpose()
        })
        .await
    }

    async fn list_all(&self) -> WorkflowRepositoryResult<Vec<Workflow>> {
        run_blocking(&self.pool, WorkflowRepositoryError::persistence, |connection| {
            let rows = workflows::table
                .order((workflows::created_at.asc(), workflows::id.asc()))
                .select(WorkflowRow::as_select())
                .load::<WorkflowRow>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;
            rows.into_iter().map(row_to_workflow).collect()
        })
        .await
    }

    async fn delete(&self, id: WorkflowId) -> WorkflowRepositoryResult<()> {
        run_blocking(&self.pool, WorkflowRepositoryError::persistence, move |connection| {
            let deleted = diesel::delete(workflows::table.filter(workflows::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        WorkflowRepositoryError::InUse(id)
                    }
                    _ => WorkflowRepositoryError::persistence(err),
                })?;
            if deleted == 0 {
                return Err(WorkflowRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(workflow: &Workflow) -> WorkflowRepositoryResult<NewWorkflowRow> {
    let steps =
        serde_json::to_value(workflow.steps()).map_err(WorkflowRepositoryError::persistence)?;
    Ok(NewWorkflowRow {
        id: workflow.id().into_inner(),
        name: workflow.name().to_owned(),
        description: workflow.description().map(str::to_owned),
        steps,
        created_at: workflow.created_at(),
        updated_at: workflow.updated_at(),
    })
}

fn row_to_workflow(row: WorkflowRow) -> WorkflowRepositoryResult<Workflow> {
    let steps = serde_json::from_value::<StageList>(row.steps)
        .map_err(WorkflowRepositoryError::persistence)?;
    Ok(Workflow::from_persisted(PersistedWorkflowData {
        id: WorkflowId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        steps,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
