//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A miniature copy of the KMP plugin template
pub struct TestTemplate {
  root: TempDir,
  pub path: PathBuf,
}

impl TestTemplate {
  /// Create a template laid out like the kmp-gradle-builder profile
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("template");
    std::fs::create_dir_all(&path)?;

    let template = Self { root, path };

    template.write(
      "settings.gradle.kts",
      r#"rootProject.name = "kmp-gradle-builder-template"
include(":plugin")
"#,
    )?;

    template.write(
      "plugin/build.gradle.kts",
      r#"group = "dev.goquick.kmpgradlebuilder"

gradlePlugin {
    plugins {
        create("kmpCustomPlugin") {
            id = "dev.goquick.kmpgradlebuilder"
            implementationClass = "dev.goquick.kmpgradlebuilder.KmpCustomPlugin"
        }
    }
}

mavenPublishing {
    coordinates("dev.goquick.kmpgradlebuilder", "kmp-gradle-builder", version.toString())
    pom {
        url.set("https://github.com/goquick/kmp-gradle-builder-template")
    }
}
"#,
    )?;

    template.write(
      "plugin/src/main/kotlin/dev/goquick/kmpgradlebuilder/KmpCustomPlugin.kt",
      r#"package dev.goquick.kmpgradlebuilder

abstract class KmpCustomExtension

class KmpCustomPlugin : Plugin<Project> {
    override fun apply(project: Project) {
        val extension = project.extensions.create("kmpCustom", KmpCustomExtension::class.java).apply {
            packageName.convention("dev.goquick.kmpgradlebuilder.generated")
            message.convention("Hello from KMP Custom plugin!")
        }
        project.tasks.register("generateKmpCustomSources", GenerateKmpCustomTask::class.java)
        project.tasks.register("kmpCustomDoctor")
    }
}
"#,
    )?;

    template.write(
      "plugin/src/main/kotlin/dev/goquick/kmpgradlebuilder/GenerateKmpCustomTask.kt",
      "package dev.goquick.kmpgradlebuilder\n\nabstract class GenerateKmpCustomTask : DefaultTask()\n",
    )?;

    template.write(
      "plugin/src/test/kotlin/dev/goquick/kmpgradlebuilder/KmpCustomPluginTest.kt",
      "package dev.goquick.kmpgradlebuilder\n\nclass KmpCustomPluginTest\n",
    )?;

    template.write(
      "sample-app/composeApp/build.gradle.kts",
      r#"plugins {
    id("dev.goquick.kmpgradlebuilder")
}

kmpCustom {
    packageName.set("dev.goquick.kmpgradlebuilder.sampleapp.generated")
}

android {
    namespace = "dev.goquick.kmpgradlebuilder.sampleapp"
}
"#,
    )?;

    template.write(
      "sample-app/composeApp/src/commonMain/kotlin/dev/goquick/kmpgradlebuilder/sampleapp/App.kt",
      "package dev.goquick.kmpgradlebuilder.sampleapp\n\nfun App() {}\n",
    )?;

    template.write(
      "sample-app/iosApp/iosApp.xcodeproj/project.pbxproj",
      r#"PRODUCT_BUNDLE_IDENTIFIER = dev.goquick.kmpgradlebuilder.sampleapp;
DEVELOPMENT_TEAM = 8MU5M984Q6;
"#,
    )?;

    template.write("README.md", "# kmp-gradle-builder-template\n\nApply `dev.goquick.kmpgradlebuilder`.\n")?;
    template.write(".gitignore", "build/\n.gradle/\n")?;
    template.write("tools/setup_template.py", "OLD_PACKAGE = \"dev.goquick.kmpgradlebuilder\"\n")?;

    // Noise the copy must drop
    template.write(".git/HEAD", "ref: refs/heads/main\n")?;
    template.write("tools/__pycache__/setup_template.cpython-312.pyc", "dev.goquick.kmpgradlebuilder")?;
    template.write("plugin/build/libs/plugin.jar", "binary")?;
    template.write(".gradle/8.10/checksums.bin", "binary")?;
    template.write_bytes("gradle/wrapper/gradle-wrapper.properties.bak", &[0xFF, 0xFE, 0x00])?;
    template.write_bytes("gradle/wrapper/invalid.json", &[0xFF, 0xFE, b'd', b'e', b'v'])?;

    Ok(template)
  }

  /// Scratch directory next to (not inside) the template
  pub fn scratch(&self) -> &Path {
    self.root.path()
  }

  /// Write a file relative to the template root
  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    self.write_bytes(rel, content.as_bytes())
  }

  /// Write raw bytes relative to the template root
  pub fn write_bytes(&self, rel: &str, content: &[u8]) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
  }
}

/// Read a file under `root`
pub fn read(root: &Path, rel: &str) -> Result<String> {
  std::fs::read_to_string(root.join(rel)).with_context(|| format!("Failed to read {}", rel))
}

/// Every text file under `root` that still mentions `needle`
pub fn files_containing(root: &Path, needle: &str) -> Vec<PathBuf> {
  WalkDir::new(root)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter(|e| {
      std::fs::read_to_string(e.path())
        .map(|content| content.contains(needle))
        .unwrap_or(false)
    })
    .map(|e| e.into_path())
    .collect()
}

/// Run the template-bootstrap binary and capture its output
pub fn run_bootstrap(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_template-bootstrap");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run template-bootstrap")
}

/// Run the binary and fail unless it exits successfully
pub fn run_bootstrap_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_bootstrap(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "template-bootstrap failed: {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
