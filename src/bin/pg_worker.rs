//! Runs one embedded `PostgreSQL` lifecycle step on behalf of a root test
//! harness.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload-path>
//! ```
//!
//! The payload is the JSON `WorkerPayload` written by
//! `pg-embed-setup-unpriv`. When started as root the worker switches to the
//! `nobody` account before touching the cluster, because `PostgreSQL` refuses
//! to initialise or run a data directory as the superuser.

#[cfg(unix)]
use camino::{Utf8Path, Utf8PathBuf};
#[cfg(unix)]
use nix::unistd::{Uid, User, initgroups, setgid, setuid};
#[cfg(unix)]
use pg_embedded_setup_unpriv::ambient_dir_and_path;
#[cfg(unix)]
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
#[cfg(unix)]
use postgresql_embedded::{PostgreSQL, Status};
#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
const UNPRIVILEGED_USER: &str = "nobody";

#[cfg(unix)]
#[derive(Debug, Error)]
enum WorkerError {
    #[error("usage: pg_worker <setup|start|stop> <payload-path> ({0})")]
    Usage(String),
    #[error("failed to read payload {path}: {source}")]
    PayloadRead { path: Utf8PathBuf, source: BoxError },
    #[error("failed to parse payload: {0}")]
    PayloadParse(#[source] serde_json::Error),
    #[error("invalid cluster settings: {0}")]
    Settings(String),
    #[error("failed to switch to the unprivileged account: {0}")]
    PrivilegeDrop(String),
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("cluster {operation} failed: {message}")]
    Cluster {
        operation: &'static str,
        message: String,
    },
}

#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
enum Step {
    Setup,
    Start,
    Stop,
}

#[cfg(unix)]
impl Step {
    fn parse(raw: &str) -> Result<Self, WorkerError> {
        match raw {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(WorkerError::Usage(format!("unknown step '{other}'"))),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    let (step, payload_path) = parse_args(std::env::args().skip(1))?;
    let payload = read_payload(&payload_path)?;
    drop_privileges()?;
    run_step(step, payload)?;
    Ok(())
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix platforms".into())
}

#[cfg(unix)]
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Step, Utf8PathBuf), WorkerError> {
    let step = args
        .next()
        .ok_or_else(|| WorkerError::Usage("missing step".to_owned()))
        .and_then(|raw| Step::parse(&raw))?;
    let payload_path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| WorkerError::Usage("missing payload path".to_owned()))?;
    if let Some(extra) = args.next() {
        return Err(WorkerError::Usage(format!("unexpected argument '{extra}'")));
    }
    Ok((step, payload_path))
}

#[cfg(unix)]
fn read_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
    let read = || -> Result<Vec<u8>, BoxError> {
        let (dir, relative) = ambient_dir_and_path(path)?;
        let mut file = dir.open(relative.as_std_path())?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    };
    let bytes = read().map_err(|source| WorkerError::PayloadRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(WorkerError::PayloadParse)
}

#[cfg(unix)]
fn drop_privileges() -> Result<(), WorkerError> {
    if !Uid::effective().is_root() {
        return Ok(());
    }
    let failed = |err: nix::Error| WorkerError::PrivilegeDrop(err.to_string());
    let user = User::from_name(UNPRIVILEGED_USER)
        .map_err(failed)?
        .ok_or_else(|| WorkerError::PrivilegeDrop("account does not exist".to_owned()))?;
    let name = CString::new(user.name.clone())
        .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
    initgroups(&name, user.gid).map_err(failed)?;
    setgid(user.gid).map_err(failed)?;
    setuid(user.uid).map_err(failed)?;

    // SAFETY: no other threads exist yet; the runtime is built afterwards.
    unsafe {
        std::env::set_var("HOME", &user.dir);
        std::env::set_var("USER", &user.name);
        std::env::set_var("LOGNAME", &user.name);
    }
    Ok(())
}

#[cfg(unix)]
fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
    for (key, value) in environment {
        // SAFETY: still single-threaded; the runtime has not been built.
        unsafe {
            match value {
                Some(secret) => std::env::set_var(key, secret.expose()),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[cfg(unix)]
fn run_step(step: Step, payload: WorkerPayload) -> Result<(), WorkerError> {
    apply_environment(&payload.environment);
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| WorkerError::Settings(err.to_string()))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::Runtime)?;

    let mut postgres = PostgreSQL::new(settings);
    runtime.block_on(async {
        match step {
            Step::Setup => {
                postgres.setup().await.map_err(cluster_failed(step))?;
                ensure_started(&mut postgres).await
            }
            Step::Start => ensure_started(&mut postgres).await,
            Step::Stop => postgres.stop().await.map_err(cluster_failed(step)),
        }
    })?;

    if matches!(step, Step::Setup | Step::Start) {
        // The server must outlive this process; dropping the handle stops it.
        std::mem::forget(postgres);
    }
    Ok(())
}

#[cfg(unix)]
async fn ensure_started(postgres: &mut PostgreSQL) -> Result<(), WorkerError> {
    if matches!(postgres.status(), Status::Started) {
        return Ok(());
    }
    postgres.start().await.map_err(cluster_failed(Step::Start))
}

#[cfg(unix)]
fn cluster_failed<E: std::fmt::Display>(step: Step) -> impl FnOnce(E) -> WorkerError {
    move |err| WorkerError::Cluster {
        operation: step.name(),
        message: err.to_string(),
    }
}
