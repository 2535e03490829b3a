//! Template profiles: the placeholder identity and layout of a template
//!
//! A profile is an immutable value handed to the bootstrapper. Built-in
//! profiles cover the shipped templates; a template may also carry its own
//! profile file, searched in order: bootstrap.toml, .bootstrap.toml,
//! .config/bootstrap.toml.

use crate::core::error::{BootstrapError, BootstrapResult, ConfigError};
use crate::core::params::validate_base_name;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the profile used when nothing else is selected
pub const DEFAULT_PROFILE: &str = "kmp-gradle-builder";

/// Profile file locations inside a template root, in search order
pub const PROFILE_FILE_NAMES: [&str; 3] = ["bootstrap.toml", ".bootstrap.toml", ".config/bootstrap.toml"];

/// A named template variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateProfile {
  pub name: String,
  pub constants: TemplateConstants,
  #[serde(default)]
  pub layout: TemplateLayout,
}

/// Placeholder identifiers baked into a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConstants {
  /// Dotted Kotlin package of the template sources
  pub package: String,
  /// Gradle plugin id registered by the template
  pub plugin_id: String,
  /// Root project name (settings.gradle.kts, README, pom metadata)
  pub project_name: String,
  /// Maven artifact id; usually a prefix of the project name
  pub artifact_id: String,
  /// Appended to the package to form the sample app bundle id
  #[serde(default = "default_bundle_suffix")]
  pub bundle_suffix: String,
  /// Apple developer team written into the Xcode project
  pub dev_team: String,
  /// CamelCase base name all class, task and DSL names derive from
  pub plugin_base_name: String,
  /// Default greeting emitted by the generator task
  pub generated_message: String,
}

fn default_bundle_suffix() -> String {
  "sampleapp".to_string()
}

impl TemplateConstants {
  /// Fully qualified bundle id of the sample app
  pub fn bundle_id(&self) -> String {
    format!("{}.{}", self.package, self.bundle_suffix)
  }
}

/// Where things live inside a template and which files count as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
  /// Entry names never copied out of the template
  pub copy_excludes: Vec<String>,
  /// Directory names removed from the copy at any depth
  pub clean_dirs: Vec<String>,
  /// Source roots holding a directory per package segment
  pub relocate_roots: Vec<PathBuf>,
  /// Root searched for files named after the plugin classes
  pub plugin_source_root: PathBuf,
  /// Extension of plugin source files, without the dot
  pub source_extension: String,
  /// Extensions (with leading dot) of files rewritten as text
  pub text_extensions: Vec<String>,
  /// Exact file names rewritten as text regardless of extension
  pub text_file_names: Vec<String>,
}

impl Default for TemplateLayout {
  fn default() -> Self {
    Self {
      copy_excludes: strings(&[".git", "__pycache__"]),
      clean_dirs: strings(&[".gradle", "build", "DerivedData", "Frameworks", ".idea", ".kotlin", ".konan"]),
      relocate_roots: [
        "plugin/src/main/kotlin",
        "plugin/src/test/kotlin",
        "sample-app/composeApp/src/androidMain/kotlin",
        "sample-app/composeApp/src/commonMain/kotlin",
        "sample-app/composeApp/src/commonTest/kotlin",
        "sample-app/composeApp/src/jvmMain/kotlin",
        "sample-app/composeApp/src/jvmTest/kotlin",
        "sample-app/composeApp/src/iosMain/kotlin",
      ]
      .iter()
      .map(PathBuf::from)
      .collect(),
      plugin_source_root: PathBuf::from("plugin/src/main/kotlin"),
      source_extension: "kt".to_string(),
      text_extensions: strings(&[
        ".kt",
        ".kts",
        ".gradle",
        ".md",
        ".txt",
        ".swift",
        ".plist",
        ".pbxproj",
        ".xcconfig",
        ".gitignore",
        ".properties",
        ".json",
        ".xml",
      ]),
      text_file_names: strings(&["gradlew", "gradlew.bat", "README", "README.md", "LICENSE", ".gitignore"]),
    }
  }
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

impl TemplateProfile {
  /// All profiles shipped with the binary
  pub fn builtin() -> Vec<TemplateProfile> {
    vec![
      TemplateProfile {
        name: DEFAULT_PROFILE.to_string(),
        constants: TemplateConstants {
          package: "dev.goquick.kmpgradlebuilder".to_string(),
          plugin_id: "dev.goquick.kmpgradlebuilder".to_string(),
          project_name: "kmp-gradle-builder-template".to_string(),
          artifact_id: "kmp-gradle-builder".to_string(),
          bundle_suffix: default_bundle_suffix(),
          dev_team: "8MU5M984Q6".to_string(),
          plugin_base_name: "KmpCustom".to_string(),
          generated_message: "Hello from KMP Custom plugin!".to_string(),
        },
        layout: TemplateLayout::default(),
      },
      TemplateProfile {
        name: "kmp-profiles".to_string(),
        constants: TemplateConstants {
          package: "dev.goquick.kmpprofiles".to_string(),
          plugin_id: "dev.goquick.kmpprofiles".to_string(),
          project_name: "kmp-profiles-template".to_string(),
          artifact_id: "kmp-profiles".to_string(),
          bundle_suffix: default_bundle_suffix(),
          dev_team: "8MU5M984Q6".to_string(),
          plugin_base_name: "KmpProfiles".to_string(),
          generated_message: "Hello from KMP Profiles plugin!".to_string(),
        },
        layout: TemplateLayout::default(),
      },
    ]
  }

  /// Look up a built-in profile by name
  pub fn named(name: &str) -> BootstrapResult<TemplateProfile> {
    Self::builtin()
      .into_iter()
      .find(|p| p.name == name)
      .ok_or_else(|| BootstrapError::Config(ConfigError::UnknownProfile { name: name.to_string() }))
  }

  /// Find a profile file inside a template root
  pub fn find_profile_path(template_root: &Path) -> Option<PathBuf> {
    PROFILE_FILE_NAMES
      .iter()
      .map(|name| template_root.join(name))
      .find(|p| p.is_file())
  }

  /// Load and validate a profile from a TOML file
  pub fn load(path: &Path) -> BootstrapResult<TemplateProfile> {
    let invalid = |reason: String| {
      BootstrapError::Config(ConfigError::InvalidProfileFile {
        path: path.to_path_buf(),
        reason,
      })
    };

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let profile: TemplateProfile = toml_edit::de::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    profile.validate()?;
    Ok(profile)
  }

  /// Resolve the profile for a run
  ///
  /// An explicit file wins, then an explicit name, then a profile file in
  /// the template root, then the default built-in profile.
  pub fn resolve(
    template_root: &Path,
    profile_name: Option<&str>,
    profile_file: Option<&Path>,
  ) -> BootstrapResult<TemplateProfile> {
    if let Some(path) = profile_file {
      return Self::load(path);
    }
    if let Some(name) = profile_name {
      return Self::named(name);
    }
    if let Some(path) = Self::find_profile_path(template_root) {
      tracing::debug!(path = %path.display(), "using template profile file");
      return Self::load(&path);
    }
    Self::named(DEFAULT_PROFILE)
  }

  /// Validate profile fields
  pub fn validate(&self) -> BootstrapResult<()> {
    let field = |field: &str, reason: &str| {
      BootstrapError::Config(ConfigError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
      })
    };

    if self.name.trim().is_empty() {
      return Err(field("name", "must not be empty"));
    }
    if !utils::is_dotted_identifier(&self.constants.package) {
      return Err(field("constants.package", "must be a dotted identifier"));
    }
    if !utils::is_dotted_identifier(&self.constants.plugin_id) {
      return Err(field("constants.plugin_id", "must be a dotted identifier"));
    }
    if self.constants.project_name.is_empty() {
      return Err(field("constants.project_name", "must not be empty"));
    }
    if let Err(e) = validate_base_name(&self.constants.plugin_base_name) {
      return Err(field("constants.plugin_base_name", &e.to_string()));
    }
    if self.layout.relocate_roots.iter().any(|r| r.as_os_str().is_empty()) {
      return Err(field("layout.relocate_roots", "entries must not be empty"));
    }
    if self.layout.source_extension.is_empty() || self.layout.source_extension.starts_with('.') {
      return Err(field("layout.source_extension", "must be a bare extension such as `kt`"));
    }
    Ok(())
  }
}
