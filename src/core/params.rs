//! User-supplied identity for the new project

use crate::core::config::TemplateConstants;
use crate::core::error::{BootstrapResult, PreconditionError};
use crate::utils;
use serde::Serialize;

/// Raw identity as entered on the command line
#[derive(Debug, Clone, Default)]
pub struct UserParameters {
  pub plugin_id: String,
  pub package_name: String,
  pub project_name: Option<String>,
  pub plugin_name: Option<String>,
}

/// Identity after defaults are filled in and every field is validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameters {
  pub plugin_id: String,
  pub package_name: String,
  pub project_name: String,
  pub plugin_name: String,
}

impl UserParameters {
  /// Apply defaults from the template and validate
  ///
  /// The project name defaults to the last segment of the plugin id and the
  /// plugin name to the template's own base name.
  pub fn resolve(&self, constants: &TemplateConstants) -> BootstrapResult<ResolvedParameters> {
    validate_dotted("plugin-id", &self.plugin_id)?;
    validate_dotted("package-name", &self.package_name)?;

    let project_name = match &self.project_name {
      Some(name) if !name.is_empty() => name.clone(),
      _ => utils::last_segment(&self.plugin_id).to_string(),
    };

    let plugin_name = self
      .plugin_name
      .clone()
      .unwrap_or_else(|| constants.plugin_base_name.clone());
    validate_base_name(&plugin_name)?;

    Ok(ResolvedParameters {
      plugin_id: self.plugin_id.clone(),
      package_name: self.package_name.clone(),
      project_name,
      plugin_name,
    })
  }
}

fn validate_dotted(field: &str, value: &str) -> BootstrapResult<()> {
  if utils::is_dotted_identifier(value) {
    Ok(())
  } else {
    Err(
      PreconditionError::InvalidDottedName {
        field: field.to_string(),
        value: value.to_string(),
      }
      .into(),
    )
  }
}

/// Validate a plugin base name
///
/// Must be non-empty, start with an alphabetic character and contain only
/// alphanumeric characters or `_`.
pub fn validate_base_name(name: &str) -> Result<(), PreconditionError> {
  let invalid = |reason: &str| PreconditionError::InvalidBaseName {
    name: name.to_string(),
    reason: reason.to_string(),
  };

  let Some(first) = name.chars().next() else {
    return Err(invalid("must not be empty"));
  };
  if !first.is_alphabetic() {
    return Err(invalid("must start with a letter"));
  }
  if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
    return Err(invalid("must contain only alphanumeric/underscore characters"));
  }
  Ok(())
}
