//! `PostgreSQL` integration tests for user persistence.

use taskboard::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{UserId, UserRole},
    ports::{UserRepository, UserRepositoryError},
};

use rstest::rstest;

use super::helpers::{BoxError, TestDatabase, new_user, test_database};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_user_round_trip(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresUserRepository::new(pool);
    let user = new_user(UserRole::Lead);

    repo.store(&user).await?;
    let found = repo.find_by_id(user.id()).await?.ok_or("user missing")?;

    assert_eq!(found.id(), user.id());
    assert_eq!(found.role(), UserRole::Lead);
    assert_eq!(found.email(), user.email());
    assert!(repo.find_by_id(UserId::new()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_duplicate_user_is_rejected(
    #[future] test_database: Result<TestDatabase, BoxError>,
) -> Result<(), BoxError> {
    let database = test_database.await?;
    let pool = database.pool.clone();
    let repo = PostgresUserRepository::new(pool);
    let user = new_user(UserRole::Member);
    repo.store(&user).await?;

    let result = repo.store(&user).await;

    assert!(matches!(result, Err(UserRepositoryError::DuplicateUser(id)) if id == user.id()));
    Ok(())
}
