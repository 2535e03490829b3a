//! Replacement planning: old placeholder → new identifier
//!
//! The plan is computed once per run, without touching the disk, from the
//! template constants and the resolved user parameters. Order matters:
//! substitution is plain substring replacement, so a pattern that is a
//! substring of a later pattern would eat part of it first. The plan puts
//! the most qualified patterns first and refuses to build if its own
//! ordering shadows a pattern.
//!
//! ```text
//! TemplateConstants + ResolvedParameters
//!   ↓
//! ReplacementPlan (ordered pairs, PlanId)
//!   ↓
//! tree::substitute (applied to every text file)
//! ```

use crate::core::config::TemplateConstants;
use crate::core::error::{BootstrapError, BootstrapResult};
use crate::core::params::ResolvedParameters;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// Names derived from a CamelCase plugin base name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNames {
  pub base: String,
  /// DSL extension name, e.g. `kmpCustom`
  pub lower_camel: String,
  pub plugin_class: String,
  pub extension_class: String,
  pub task_class: String,
  pub generate_task_name: String,
  pub doctor_task_name: String,
  pub registration_id: String,
  pub generated_message: String,
}

impl DerivedNames {
  /// Derive every name from a validated base name
  pub fn from_base(base: &str) -> Self {
    let lower_camel = lower_camel(base);
    Self {
      base: base.to_string(),
      plugin_class: format!("{}Plugin", base),
      extension_class: format!("{}Extension", base),
      task_class: format!("Generate{}Task", base),
      generate_task_name: format!("generate{}Sources", base),
      doctor_task_name: format!("{}Doctor", lower_camel),
      registration_id: format!("{}Plugin", lower_camel),
      generated_message: format!("Hello from {} plugin!", base),
      lower_camel,
    }
  }

  /// Names the template ships with; its greeting is not derivable
  pub fn of_template(constants: &TemplateConstants) -> Self {
    Self {
      generated_message: constants.generated_message.clone(),
      ..Self::from_base(&constants.plugin_base_name)
    }
  }
}

/// Lower-case the first character, keep the rest
pub fn lower_camel(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    None => String::new(),
    Some(first) if name.chars().count() == 1 => first.to_lowercase().collect(),
    Some(first) => first.to_lowercase().chain(chars).collect(),
  }
}

/// Why a pair is in the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementKind {
  PluginId,
  BundleId,
  Package,
  ProjectName,
  DevTeam,
  ArtifactId,
  PluginClass,
  ExtensionClass,
  TaskClass,
  GenerateTaskName,
  DoctorTaskName,
  RegistrationId,
  GeneratedMessage,
  DslName,
}

impl fmt::Display for ReplacementKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      ReplacementKind::PluginId => "plugin id",
      ReplacementKind::BundleId => "bundle id",
      ReplacementKind::Package => "package",
      ReplacementKind::ProjectName => "project name",
      ReplacementKind::DevTeam => "development team",
      ReplacementKind::ArtifactId => "artifact id",
      ReplacementKind::PluginClass => "plugin class",
      ReplacementKind::ExtensionClass => "extension class",
      ReplacementKind::TaskClass => "task class",
      ReplacementKind::GenerateTaskName => "generate task",
      ReplacementKind::DoctorTaskName => "doctor task",
      ReplacementKind::RegistrationId => "registration id",
      ReplacementKind::GeneratedMessage => "generated message",
      ReplacementKind::DslName => "DSL name",
    };
    write!(f, "{}", label)
  }
}

/// One literal substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
  pub kind: ReplacementKind,
  pub old: String,
  pub new: String,
}

/// Ordered, immutable set of substitutions for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementPlan {
  pub id: PlanId,
  replacements: Vec<Replacement>,
}

impl ReplacementPlan {
  /// Build a plan from explicit pairs, dropping those that change nothing
  pub fn from_pairs(pairs: Vec<Replacement>) -> Self {
    let replacements: Vec<Replacement> = pairs.into_iter().filter(|r| r.old != r.new && !r.old.is_empty()).collect();
    let json = serde_json::to_vec(&replacements).unwrap_or_default();
    Self {
      id: PlanId::from_contents(&json),
      replacements,
    }
  }

  /// Derive the full plan for a template and a new identity
  pub fn build(constants: &TemplateConstants, params: &ResolvedParameters) -> BootstrapResult<Self> {
    let old = DerivedNames::of_template(constants);
    let new = DerivedNames::from_base(&params.plugin_name);
    let bundle_id = format!("{}.{}", params.package_name, constants.bundle_suffix);

    let pair = |kind, old: &str, new: &str| Replacement {
      kind,
      old: old.to_string(),
      new: new.to_string(),
    };

    let pairs = vec![
      // Plugin id declarations first: the template's id often equals its package
      pair(
        ReplacementKind::PluginId,
        &format!("id = \"{}\"", constants.plugin_id),
        &format!("id = \"{}\"", params.plugin_id),
      ),
      pair(
        ReplacementKind::PluginId,
        &format!("id(\"{}\")", constants.plugin_id),
        &format!("id(\"{}\")", params.plugin_id),
      ),
      pair(ReplacementKind::BundleId, &constants.bundle_id(), &bundle_id),
      pair(ReplacementKind::Package, &constants.package, &params.package_name),
      pair(ReplacementKind::ProjectName, &constants.project_name, &params.project_name),
      // Whole assignment only; the bare team token may occur inside other ids
      pair(
        ReplacementKind::DevTeam,
        &format!("DEVELOPMENT_TEAM = {};", constants.dev_team),
        "DEVELOPMENT_TEAM = \"\";",
      ),
      pair(ReplacementKind::ArtifactId, &constants.artifact_id, &params.project_name),
      pair(ReplacementKind::PluginClass, &old.plugin_class, &new.plugin_class),
      pair(ReplacementKind::ExtensionClass, &old.extension_class, &new.extension_class),
      pair(ReplacementKind::TaskClass, &old.task_class, &new.task_class),
      pair(
        ReplacementKind::GenerateTaskName,
        &old.generate_task_name,
        &new.generate_task_name,
      ),
      pair(ReplacementKind::DoctorTaskName, &old.doctor_task_name, &new.doctor_task_name),
      pair(ReplacementKind::RegistrationId, &old.registration_id, &new.registration_id),
      pair(
        ReplacementKind::GeneratedMessage,
        &old.generated_message,
        &new.generated_message,
      ),
      // Prefix of the doctor task and registration id, so it goes last
      pair(ReplacementKind::DslName, &old.lower_camel, &new.lower_camel),
    ];

    let plan = Self::from_pairs(pairs);
    if let Some((earlier, later)) = plan.shadowed().first() {
      return Err(BootstrapError::with_help(
        format!(
          "Replacement for {} ('{}') would rewrite part of {} ('{}') before it is matched",
          earlier.kind, earlier.old, later.kind, later.old
        ),
        "The template constants overlap; adjust the profile so no placeholder contains an earlier one.",
      ));
    }
    Ok(plan)
  }

  /// Pairs whose pattern contains an earlier pattern
  ///
  /// The later pattern can no longer match once the earlier one has been
  /// substituted, so any result here is an ordering bug.
  pub fn shadowed(&self) -> Vec<(&Replacement, &Replacement)> {
    let mut found = Vec::new();
    for (i, earlier) in self.replacements.iter().enumerate() {
      for later in &self.replacements[i + 1..] {
        if later.old.contains(&earlier.old) {
          found.push((earlier, later));
        }
      }
    }
    found
  }

  /// Apply every pair in order
  pub fn apply(&self, content: &str) -> String {
    let mut result = content.to_string();
    for replacement in &self.replacements {
      if result.contains(&replacement.old) {
        result = result.replace(&replacement.old, &replacement.new);
      }
    }
    result
  }

  /// Replacements in application order
  pub fn replacements(&self) -> &[Replacement] {
    &self.replacements
  }

  /// Serialize to JSON
  pub fn to_json(&self) -> BootstrapResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("📋 Replacement plan ({})\n", self.id));
    output.push_str(&format!("\n   Replacements ({}):\n", self.replacements.len()));

    for (i, r) in self.replacements().iter().enumerate() {
      output.push_str(&format!("   {}. [{}] {} → {}\n", i + 1, r.kind, r.old, r.new));
    }

    output
  }
}
