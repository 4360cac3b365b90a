//! `PostgreSQL` repository implementation for projects.

use super::{
    models::{ProjectRecord, ProjectRow},
    schema::projects,
};
use crate::persistence::{PgPool, run_blocking};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectStatus, WorkspaceId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::workflow::domain::WorkflowId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let record = to_record(project);
        run_blocking(&self.pool, ProjectRepositoryError::persistence, move |connection| {
            diesel::insert_into(projects::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let record = to_record(project);
        run_blocking(&self.pool, ProjectRepositoryError::persistence, move |connection| {
            let updated =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set(&record)
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        run_blocking(&self.pool, ProjectRepositoryError::persistence, move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        run_blocking(&self.pool, ProjectRepositoryError::persistence, |connection| {
            let rows = projects::table
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn uses_workflow(&self, workflow_id: WorkflowId) -> ProjectRepositoryResult<bool> {
        run_blocking(&self.pool, ProjectRepositoryError::persistence, move |connection| {
            diesel::select(diesel::dsl::exists(
                projects::table.filter(projects::workflow_id.eq(workflow_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

fn to_record(project: &Project) -> ProjectRecord {
    ProjectRecord {
        id: project.id().into_inner(),
        workspace_id: project.workspace_id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        workflow_id: project.workflow_id().map(WorkflowId::into_inner),
        status: project.status().as_str().to_owned(),
        due_date: project.due_date(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let status =
        ProjectStatus::try_from(row.status.as_str()).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        name: row.name,
        description: row.description,
        workflow_id: row.workflow_id.map(WorkflowId::from_uuid),
        status,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
