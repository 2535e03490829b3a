//! CLI commands for template-bootstrap
//!
//! - **new**: copy the template and apply the full rename pipeline
//! - **plan**: show the replacement plan for a new identity
//! - **profiles**: list the built-in template profiles

pub mod new;
pub mod plan;
pub mod profiles;

pub use new::run_new;
pub use plan::run_plan;
pub use profiles::run_profiles;

use crate::core::config::TemplateProfile;
use crate::core::error::BootstrapResult;
use crate::core::params::UserParameters;
use crate::core::pipeline::Bootstrapper;
use clap::Args;
use std::path::PathBuf;

/// Identity of the new project plus the template to start from
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
  /// Gradle plugin id to register, e.g. dev.example.myplugin
  #[arg(long)]
  pub plugin_id: String,
  /// Kotlin package used for plugin sources, e.g. dev.example.myplugin
  #[arg(long)]
  pub package_name: String,
  /// Root project name (defaults to last segment of plugin id)
  #[arg(long)]
  pub project_name: Option<String>,
  /// CamelCase base name for plugin classes/DSL (defaults to the template's)
  #[arg(long)]
  pub plugin_name: Option<String>,
  /// Template directory to copy (default: current directory)
  #[arg(long)]
  pub template: Option<PathBuf>,
  /// Built-in template profile to use
  #[arg(long, conflicts_with = "profile_file")]
  pub profile: Option<String>,
  /// Profile TOML file describing the template
  #[arg(long)]
  pub profile_file: Option<PathBuf>,
}

impl IdentityArgs {
  pub fn params(&self) -> UserParameters {
    UserParameters {
      plugin_id: self.plugin_id.clone(),
      package_name: self.package_name.clone(),
      project_name: self.project_name.clone(),
      plugin_name: self.plugin_name.clone(),
    }
  }

  /// Resolve the template root and profile into a ready bootstrapper
  pub fn bootstrapper(&self) -> BootstrapResult<Bootstrapper> {
    let template_root = match &self.template {
      Some(path) => path.clone(),
      None => std::env::current_dir()?,
    };
    let profile = TemplateProfile::resolve(&template_root, self.profile.as_deref(), self.profile_file.as_deref())?;
    Ok(Bootstrapper::new(template_root, profile).with_profile_file(self.profile_file.clone()))
  }
}
