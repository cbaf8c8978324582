//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{manager}" assigns the task to "{assignee}""#)]
fn assign_task(
    world: &mut TaskLifecycleWorld,
    manager: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?;
    let acting = world.user(&manager)?;
    let target = world.user(&assignee)?;
    world.last_result = Some(run_async(
        world.service().assign_task(task_id, acting, target),
    ));
    Ok(())
}

#[when(r#""{actor}" starts the task"#)]
fn start_task(world: &mut TaskLifecycleWorld, actor: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?;
    let acting = world.user(&actor)?;
    world.last_result = Some(run_async(world.service().start_task(task_id, acting)));
    Ok(())
}

#[when(r#""{actor}" completes the task"#)]
fn complete_task(world: &mut TaskLifecycleWorld, actor: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?;
    let acting = world.user(&actor)?;
    world.last_result = Some(run_async(world.service().complete_task(task_id, acting)));
    Ok(())
}

#[when(r#""{actor}" closes the task"#)]
fn close_task(world: &mut TaskLifecycleWorld, actor: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?;
    let acting = world.user(&actor)?;
    world.last_result = Some(run_async(world.service().close_task(task_id, acting)));
    Ok(())
}
