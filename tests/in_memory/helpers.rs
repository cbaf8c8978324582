//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::api::TaskboardHandlers;
use taskboard::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use taskboard::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{NewUser, User, UserId, UserRole},
    ports::UserRepository,
    services::UserRegistrationService,
};

/// Lifecycle service over in-memory repositories.
pub type MemoryService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Request handlers over in-memory repositories.
pub type MemoryHandlers =
    TaskboardHandlers<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Repositories shared by a single test.
pub struct Stores {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Stores {
    /// Builds a lifecycle service over these repositories.
    pub fn service(&self) -> MemoryService {
        TaskLifecycleService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.users),
            Arc::new(DefaultClock),
        )
    }

    /// Builds request handlers over these repositories.
    pub fn handlers(&self) -> MemoryHandlers {
        TaskboardHandlers::new(
            self.service(),
            UserRegistrationService::new(Arc::clone(&self.users), Arc::new(DefaultClock)),
        )
    }

    /// Stores a user with `role` and returns its identifier.
    pub async fn seed_user(&self, role: UserRole) -> UserId {
        let user = User::register(
            NewUser {
                first_name: "Test".to_owned(),
                last_name: role.as_str().to_owned(),
                email: format!("{}@example.com", role.as_str().to_ascii_lowercase()),
                role,
            },
            &DefaultClock,
        );
        self.users
            .store(&user)
            .await
            .expect("seeding a user should succeed");
        user.id()
    }
}

/// Provides fresh repositories for each test.
#[fixture]
pub fn stores() -> Stores {
    Stores {
        tasks: Arc::new(InMemoryTaskRepository::new()),
        users: Arc::new(InMemoryUserRepository::new()),
    }
}
