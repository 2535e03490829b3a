use crate::core::config::{DEFAULT_PROFILE, TemplateProfile};
use crate::core::error::BootstrapResult;
use crate::core::plan::DerivedNames;

/// Run the profiles command: list the built-in template profiles
pub fn run_profiles(json: bool) -> BootstrapResult<()> {
  let profiles = TemplateProfile::builtin();

  if json {
    println!("{}", serde_json::to_string_pretty(&profiles)?);
    return Ok(());
  }

  println!("📋 Built-in template profiles:\n");
  for profile in &profiles {
    let marker = if profile.name == DEFAULT_PROFILE { " (default)" } else { "" };
    let names = DerivedNames::of_template(&profile.constants);
    println!("  {}{}", profile.name, marker);
    println!("     package:  {}", profile.constants.package);
    println!("     plugin:   {} ({})", profile.constants.plugin_id, names.plugin_class);
    println!("     project:  {}", profile.constants.project_name);
    println!("     DSL name: {}", names.lower_camel);
  }

  Ok(())
}
