//! The bootstrap pipeline
//!
//! ```text
//! validate → copy → clean → relocate → substitute → rename
//! ```
//!
//! Steps run strictly in order against the destination on disk. Validation
//! and the destination checks happen before anything is written; after that
//! a failure leaves a half-built destination that the caller deletes before
//! retrying. There is no resume.

use crate::core::config::{PROFILE_FILE_NAMES, TemplateProfile};
use crate::core::error::BootstrapResult;
use crate::core::params::{ResolvedParameters, UserParameters};
use crate::core::plan::{DerivedNames, PlanId, ReplacementPlan};
use crate::tree::relocate::{self, Relocation};
use crate::tree::rename::{self, RenamedFile};
use crate::tree::substitute::{self, SubstitutionReport};
use crate::tree::{clean, copy};
use crate::ui::progress::FileProgress;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
  pub destination: PathBuf,
  pub profile: String,
  pub plan_id: PlanId,
  pub parameters: ResolvedParameters,
  pub dirs_cleaned: usize,
  pub relocations: Vec<Relocation>,
  pub renamed: Vec<RenamedFile>,
  pub substitution: SubstitutionReport,
}

/// Runs the pipeline for one template profile
pub struct Bootstrapper {
  template_root: PathBuf,
  profile: TemplateProfile,
  profile_file: Option<PathBuf>,
  show_progress: bool,
}

impl Bootstrapper {
  pub fn new(template_root: impl Into<PathBuf>, profile: TemplateProfile) -> Self {
    Self {
      template_root: template_root.into(),
      profile,
      profile_file: None,
      show_progress: false,
    }
  }

  /// Draw a progress bar while rewriting files
  pub fn with_progress(mut self, show: bool) -> Self {
    self.show_progress = show;
    self
  }

  /// Profile file the profile was loaded from, left out of the copy when it
  /// lives inside the template
  pub fn with_profile_file(mut self, path: Option<PathBuf>) -> Self {
    self.profile_file = path;
    self
  }

  pub fn profile(&self) -> &TemplateProfile {
    &self.profile
  }

  /// Resolve parameters and derive the replacement plan without touching the disk
  pub fn plan(&self, params: &UserParameters) -> BootstrapResult<(ResolvedParameters, ReplacementPlan)> {
    let resolved = params.resolve(&self.profile.constants)?;
    let plan = ReplacementPlan::build(&self.profile.constants, &resolved)?;
    Ok((resolved, plan))
  }

  /// Run every step into `destination`
  pub fn run(&self, params: &UserParameters, destination: &Path) -> BootstrapResult<BootstrapReport> {
    let (resolved, plan) = self.plan(params)?;
    let layout = &self.profile.layout;
    let constants = &self.profile.constants;

    tracing::info!(
      profile = %self.profile.name,
      plan = %plan.id,
      destination = %destination.display(),
      "bootstrapping"
    );

    copy::copy_template(
      &self.template_root,
      destination,
      &layout.copy_excludes,
      &self.profile_files(),
    )?;
    let dirs_cleaned = clean::clean_metadata(destination, &layout.clean_dirs)?;
    let relocations = relocate::relocate_packages(
      destination,
      &layout.relocate_roots,
      &constants.package,
      &resolved.package_name,
    )?;

    let substitution = self.substitute(destination, &plan)?;

    let old = DerivedNames::of_template(constants);
    let new = DerivedNames::from_base(&resolved.plugin_name);
    let source_root = destination.join(&layout.plugin_source_root);
    let mut renamed = rename::rename_sources(
      &source_root,
      &old.plugin_class,
      &new.plugin_class,
      &layout.source_extension,
    )?;
    renamed.extend(rename::rename_sources(
      &source_root,
      &old.task_class,
      &new.task_class,
      &layout.source_extension,
    )?);

    Ok(BootstrapReport {
      destination: destination.to_path_buf(),
      profile: self.profile.name.clone(),
      plan_id: plan.id.clone(),
      parameters: resolved,
      dirs_cleaned,
      relocations,
      renamed,
      substitution,
    })
  }

  /// Template-relative paths of profile files; they describe the template,
  /// not the new project
  fn profile_files(&self) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = PROFILE_FILE_NAMES.iter().map(PathBuf::from).collect();
    if let Some(path) = &self.profile_file
      && let (Ok(path), Ok(root)) = (fs::canonicalize(path), fs::canonicalize(&self.template_root))
      && let Ok(relative) = path.strip_prefix(&root)
    {
      files.push(relative.to_path_buf());
    }
    files
  }

  fn substitute(&self, destination: &Path, plan: &ReplacementPlan) -> BootstrapResult<SubstitutionReport> {
    if !self.show_progress {
      return substitute::substitute_tree(destination, &self.profile.layout, plan);
    }

    let files = substitute::collect_text_files(destination, &self.profile.layout)?;
    let mut progress = FileProgress::new(files.len(), "Rewriting files");
    let mut report = SubstitutionReport::default();
    for path in &files {
      report.record(substitute::rewrite_file(path, plan)?);
      if let Some(bar) = progress.as_mut() {
        bar.inc();
      }
    }
    Ok(report)
  }
}
