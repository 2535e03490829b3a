use crate::commands::IdentityArgs;
use crate::core::error::BootstrapResult;

/// Run the plan command: print the replacements a run would apply
pub fn run_plan(identity: IdentityArgs, json: bool) -> BootstrapResult<()> {
  let bootstrapper = identity.bootstrapper()?;
  let (resolved, plan) = bootstrapper.plan(&identity.params())?;

  if json {
    println!("{}", plan.to_json()?);
    return Ok(());
  }

  println!("📦 Profile: {}", bootstrapper.profile().name);
  println!(
    "   Plugin: {} ({}), package {}, project {}\n",
    resolved.plugin_name, resolved.plugin_id, resolved.package_name, resolved.project_name
  );
  print!("{}", plan.to_human_readable());

  Ok(())
}
