//! When steps for bounty lifecycle BDD scenarios.

use super::world::{BountyWorld, member, run_async};
use bountyboard::bounty::services::SubmitProofRequest;
use rstest_bdd_macros::when;

#[when(r#""{contributor}" pledges {amount:u64} points"#)]
fn pledge(world: &mut BountyWorld, contributor: String, amount: u64) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let result = run_async(world.lifecycle.pledge(&member(&contributor)?, task_id, amount));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{doer}" claims the task"#)]
fn claim(world: &mut BountyWorld, doer: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let result = run_async(world.lifecycle.claim(&member(&doer)?, task_id));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{doer}" submits proof without a link or image"#)]
fn submit_empty_proof(world: &mut BountyWorld, doer: String) -> Result<(), eyre::Report> {
    let request = SubmitProofRequest::new(world.task_id()?);
    let result = run_async(world.lifecycle.submit_proof(&member(&doer)?, request));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#""{poster}" validates the task"#)]
fn validate(world: &mut BountyWorld, poster: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let result = run_async(world.lifecycle.validate(&member(&poster)?, task_id));
    world.last_result = Some(result);
    Ok(())
}
