//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;
use taskboard::user::{
    domain::{NewUser, User, UserRole},
    ports::UserRepository,
};

#[given(r#"the transition policy is "{policy}""#)]
fn transition_policy(world: &mut TaskLifecycleWorld, policy: String) -> Result<(), eyre::Report> {
    world.policy = policy
        .parse()
        .map_err(|err| eyre::eyre!("invalid policy in scenario: {err}"))?;
    Ok(())
}

#[given(r#"a "{role}" user named "{name}""#)]
fn user_named(world: &mut TaskLifecycleWorld, role: String, name: String) -> Result<(), eyre::Report> {
    let parsed_role = UserRole::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    let user = User::register(
        NewUser {
            first_name: name.clone(),
            last_name: "Tester".to_owned(),
            email: format!("{name}@example.com"),
            role: parsed_role,
        },
        &DefaultClock,
    );
    run_async(world.users.store(&user)).wrap_err("store scenario user")?;
    world.named_users.insert(name, user.id());
    Ok(())
}

#[given(r#"a draft task "{title}" created by "{creator}""#)]
fn draft_task(world: &mut TaskLifecycleWorld, title: String, creator: String) -> Result<(), eyre::Report> {
    let creator_id = world.user(&creator)?;
    let task = run_async(
        world
            .service()
            .create_task(CreateTaskRequest::new(creator_id, title)),
    )
    .wrap_err("create draft task for scenario")?;
    world.task_id = Some(task.id());
    Ok(())
}
