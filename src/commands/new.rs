use std::path::{Path, PathBuf};

use crate::commands::IdentityArgs;
use crate::core::error::{BootstrapResult, ResultExt};
use crate::core::pipeline::BootstrapReport;
use crate::utils;

/// Run the new command: copy the template and rename everything
pub fn run_new(identity: IdentityArgs, output_dir: PathBuf, dry_run: bool, json: bool) -> BootstrapResult<()> {
  let bootstrapper = identity.bootstrapper()?.with_progress(!json && !dry_run);
  let params = identity.params();

  if dry_run {
    let (resolved, plan) = bootstrapper.plan(&params)?;
    if json {
      println!("{}", plan.to_json()?);
    } else {
      println!("🧪 Dry run: nothing will be written");
      println!("   Profile: {}", bootstrapper.profile().name);
      println!("   Project: {} ({})", resolved.project_name, resolved.plugin_id);
      println!("   Output:  {}\n", output_dir.display());
      print!("{}", plan.to_human_readable());
    }
    return Ok(());
  }

  if !json {
    println!("📦 Using template profile: {}", bootstrapper.profile().name);
  }

  let report = bootstrapper
    .run(&params, &output_dir)
    .with_context(|| format!("Bootstrap into {} did not complete", output_dir.display()))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_summary(&report);
  }

  Ok(())
}

fn print_summary(report: &BootstrapReport) {
  let dest = report.destination.as_path();

  println!("\n✅ Template copied to {}", dest.display());
  println!("   Plan: {}", report.plan_id);
  println!("   🧹 Removed {} build/cache directories", report.dirs_cleaned);
  for relocation in &report.relocations {
    println!(
      "   📁 {}: {} → {}",
      relocation.root.display(),
      relocation.from.display(),
      relocation.to.display()
    );
  }
  for renamed in &report.renamed {
    println!(
      "   📄 {} → {}",
      utils::display_relative(&renamed.from, dest),
      file_name(&renamed.to)
    );
  }
  println!(
    "   ✏️  Rewrote {} of {} text files",
    report.substitution.files_rewritten, report.substitution.files_scanned
  );

  println!("\n🚀 Next steps:");
  println!("   cd {}", dest.display());
  println!("   ./gradlew :plugin:build");
}

fn file_name(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| path.display().to_string())
}
