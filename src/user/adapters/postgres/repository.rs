//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::store::PgPool;
use crate::user::{
    domain::{PersistedUserData, User, UserId, UserRole},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

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

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
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
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        user_id: user.id().into_inner(),
        first_name: user.first_name().to_owned(),
        last_name: user.last_name().to_owned(),
        email: user.email().to_owned(),
        user_role: user.role().as_str().to_owned(),
        date_created: user.date_created(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        user_id,
        first_name,
        last_name,
        email,
        user_role: persisted_role,
        date_created,
    } = row;

    let user_role =
        UserRole::try_from(persisted_role.as_str()).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        user_id: UserId::from_uuid(user_id),
        first_name,
        last_name,
        email,
        date_created,
        user_role,
    }))
}
