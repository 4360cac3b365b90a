//! `PostgreSQL` repository implementation for users.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::persistence::{PgPool, run_blocking};
use crate::user::{
    domain::{PersistedUserData, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let row = NewUserRow {
            id: user_id.into_inner(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            role: user.role().to_owned(),
            avatar_url: user.avatar_url().map(str::to_owned),
        };
        run_blocking(&self.pool, UserRepositoryError::persistence, move |connection| {
            let email = row.email.clone();
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
                        if info.constraint_name() == Some(EMAIL_CONSTRAINT) =>
                    {
                        UserRepositoryError::DuplicateEmail(email)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        run_blocking(&self.pool, UserRepositoryError::persistence, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, UserRepositoryError::persistence, |connection| {
            let rows = users::table
                .order(users::seq.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_user).collect())
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> User {
    User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        role: row.role,
        avatar_url: row.avatar_url,
    })
}
