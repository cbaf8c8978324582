//! Embedded `PostgreSQL` cluster shared by the integration tests.
//!
//! One cluster is started per test binary. Each test gets its own database
//! cloned from a template that already carries the taskboard schema.


use self::bootstrap::{bootstrap_env, env_overrides, sync_password, sync_port};
use crate::test_helpers::EnvVarGuard;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Status};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use taskboard::store::{PgPool, SCHEMA_SQL};
use tokio::runtime::Runtime;

/// Boxed error type used by the `PostgreSQL` tests.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Database the schema is applied to once and cloned for every test.
const TEMPLATE_DB: &str = "taskboard_test_template";

static SHARED_CLUSTER: OnceLock<ManagedCluster> = OnceLock::new();
static TEMPLATE_LOCK: Mutex<()> = Mutex::new(());

/// Shared `PostgreSQL` cluster handle.
pub type PostgresCluster = &'static ManagedCluster;

/// Embedded cluster started in-process, or through `pg_worker` under root.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    // Keeps the in-process server and the runtime that drives it alive.
    in_process: Option<(Runtime, PostgreSQL)>,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let guard = EnvVarGuard::set_many(&bootstrap_env()?);
        let mut bootstrap = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(guard);
        sync_password(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap,
            env_vars,
            in_process: None,
        };
        match cluster.bootstrap.privileges {
            ExecutionPrivileges::Root => cluster.start_via_worker()?,
            ExecutionPrivileges::Unprivileged => cluster.start_in_process()?,
        }
        sync_port(&mut cluster.bootstrap.settings)?;
        Ok(cluster)
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| Box::new(err) as BoxError)?;
        let guard = EnvVarGuard::set_many(&env_overrides(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.bootstrap.settings.clone());
        runtime.block_on(async {
            postgres
                .setup()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
            if !matches!(postgres.status(), Status::Started) {
                postgres
                    .start()
                    .await
                    .map_err(|err| Box::new(err) as BoxError)?;
            }
            Ok::<(), BoxError>(())
        })?;
        drop(guard);
        self.bootstrap.settings = postgres.settings().clone();
        self.in_process = Some((runtime, postgres));
        Ok(())
    }

    fn start_via_worker(&self) -> Result<(), BoxError> {
        self.worker(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
        self.worker(WorkerOperation::Start, self.bootstrap.start_timeout)
    }

    fn worker(&self, operation: WorkerOperation, timeout: Duration) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no pg_worker binary configured for a root test run",
            )) as BoxError
        })?;
        let request = WorkerRequest::new(WorkerRequestArgs {
            worker: worker.as_path(),
            settings: &self.bootstrap.settings,
            env_vars: &self.env_vars,
            operation,
            timeout,
        });
        run_worker(&request).map_err(|err| Box::new(err) as BoxError)
    }

    /// Connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates a fresh database holding the taskboard schema.
    ///
    /// This is a blocking operation that should be called from
    /// `spawn_blocking` or a synchronous context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be prepared or cloned.
    pub fn temporary_database(&'static self) -> Result<TemporaryDatabase, BoxError> {
        self.ensure_template()?;
        let name = format!("taskboard_{}", uuid::Uuid::new_v4().simple());
        self.admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(&name),
            quote_identifier(TEMPLATE_DB),
        ))?;
        Ok(TemporaryDatabase {
            cluster: self,
            url: self.database_url(&name),
            name,
        })
    }

    fn ensure_template(&self) -> Result<(), BoxError> {
        let _lock = TEMPLATE_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if self.database_exists(TEMPLATE_DB)? {
            return Ok(());
        }
        self.admin_sql(&format!("CREATE DATABASE {}", quote_identifier(TEMPLATE_DB)))?;
        let migrated = PgConnection::establish(&self.database_url(TEMPLATE_DB))
            .map_err(|err| Box::new(err) as BoxError)
            .and_then(|mut conn| {
                conn.batch_execute(SCHEMA_SQL)
                    .map_err(|err| Box::new(err) as BoxError)
            });
        if let Err(err) = migrated {
            self.admin_sql(&format!("DROP DATABASE {}", quote_identifier(TEMPLATE_DB)))?;
            return Err(err);
        }
        Ok(())
    }

    fn admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<ExistsRow>(&mut conn)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

/// Per-test database, dropped together with its open connections.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Builds a small connection pool against this database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect.
    pub fn pool(&self) -> Result<PgPool, BoxError> {
        Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(self.url.clone()))
            .map_err(|err| Box::new(err) as BoxError)
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        drop(self.cluster.admin_sql(&sql));
    }
}

/// Starts the shared cluster on first use.
///
/// # Panics
///
/// Panics with a `SKIP-TEST-CLUSTER` marker when the embedded server cannot
/// be started, so the failure is visible rather than silently passing.
pub fn shared_cluster() -> PostgresCluster {
    SHARED_CLUSTER.get_or_init(|| match ManagedCluster::start() {
        Ok(cluster) => cluster,
        Err(err) => panic!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {err}"),
    })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
