//! Tests for the `new` command

use crate::helpers::*;
use anyhow::Result;
use std::path::Path;

fn new_args<'a>(out: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
  let mut args = vec![
    "new",
    "--plugin-id",
    "dev.example.helloplugin",
    "--package-name",
    "com.acme.widget",
    "--output-dir",
    out,
  ];
  args.extend_from_slice(extra);
  args
}

#[test]
fn test_new_renames_everything() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("hello");
  let out_str = out.to_string_lossy().to_string();

  run_bootstrap_ok(&template.path, &new_args(&out_str, &["--plugin-name", "Hello"]))?;

  // Package directories relocated under every source root
  let main_pkg = out.join("plugin/src/main/kotlin/com/acme/widget");
  assert!(main_pkg.join("HelloPlugin.kt").is_file());
  assert!(main_pkg.join("GenerateHelloTask.kt").is_file());
  assert!(!out.join("plugin/src/main/kotlin/dev").exists());
  assert!(
    out
      .join("plugin/src/test/kotlin/com/acme/widget/KmpCustomPluginTest.kt")
      .is_file()
  );
  assert!(
    out
      .join("sample-app/composeApp/src/commonMain/kotlin/com/acme/widget/sampleapp/App.kt")
      .is_file()
  );

  // Contents rewritten
  let plugin = read(&main_pkg, "HelloPlugin.kt")?;
  assert!(plugin.starts_with("package com.acme.widget\n"));
  assert!(plugin.contains("abstract class HelloExtension"));
  assert!(plugin.contains("class HelloPlugin : Plugin<Project>"));
  assert!(plugin.contains("create(\"hello\", HelloExtension::class.java)"));
  assert!(plugin.contains("convention(\"com.acme.widget.generated\")"));
  assert!(plugin.contains("Hello from Hello plugin!"));
  assert!(plugin.contains("register(\"generateHelloSources\", GenerateHelloTask::class.java)"));
  assert!(plugin.contains("register(\"helloDoctor\")"));

  let build = read(&out, "plugin/build.gradle.kts")?;
  assert!(build.contains("create(\"helloPlugin\")"));
  assert!(build.contains("id = \"dev.example.helloplugin\""));
  assert!(build.contains("implementationClass = \"com.acme.widget.HelloPlugin\""));
  assert!(build.contains("coordinates(\"com.acme.widget\", \"helloplugin\", version.toString())"));
  assert!(build.contains("url.set(\"https://github.com/goquick/helloplugin\")"));

  let sample = read(&out, "sample-app/composeApp/build.gradle.kts")?;
  assert!(sample.contains("id(\"dev.example.helloplugin\")"));
  assert!(sample.contains("hello {"));
  assert!(sample.contains("namespace = \"com.acme.widget.sampleapp\""));

  let pbx = read(&out, "sample-app/iosApp/iosApp.xcodeproj/project.pbxproj")?;
  assert!(pbx.contains("PRODUCT_BUNDLE_IDENTIFIER = com.acme.widget.sampleapp;"));
  assert!(pbx.contains("DEVELOPMENT_TEAM = \"\";"));

  assert_eq!(
    read(&out, "settings.gradle.kts")?,
    "rootProject.name = \"helloplugin\"\ninclude(\":plugin\")\n"
  );
  assert_eq!(read(&out, "README.md")?, "# helloplugin\n\nApply `com.acme.widget`.\n");
  assert_eq!(read(&out, ".gitignore")?, "build/\n.gradle/\n");

  // Metadata and caches dropped
  assert!(!out.join(".git").exists());
  assert!(!out.join(".gradle").exists());
  assert!(!out.join("plugin/build").exists());
  assert!(!out.join("tools/__pycache__").exists());

  // Undecodable "text" file copied verbatim
  assert_eq!(
    std::fs::read(out.join("gradle/wrapper/invalid.json"))?,
    vec![0xFF, 0xFE, b'd', b'e', b'v']
  );

  // Only files outside the text allow-list keep the old identity
  for needle in ["kmpgradlebuilder", "KmpCustom", "kmpCustom", "8MU5M984Q6", "kmp-gradle-builder"] {
    let leftovers = files_containing(&out, needle);
    assert!(
      leftovers.iter().all(|p| p.ends_with("tools/setup_template.py")),
      "'{}' left in {:?}",
      needle,
      leftovers
    );
  }

  // Template untouched
  assert!(
    template
      .path
      .join("plugin/src/main/kotlin/dev/goquick/kmpgradlebuilder/KmpCustomPlugin.kt")
      .is_file()
  );

  Ok(())
}

#[test]
fn test_new_uses_defaults() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("defaults");
  let out_str = out.to_string_lossy().to_string();

  run_bootstrap_ok(&template.path, &new_args(&out_str, &[]))?;

  let main_pkg = out.join("plugin/src/main/kotlin/com/acme/widget");
  assert!(main_pkg.join("KmpCustomPlugin.kt").is_file());
  assert!(read(&out, "settings.gradle.kts")?.contains("rootProject.name = \"helloplugin\""));
  // Greeting still follows the base name
  assert!(read(&main_pkg, "KmpCustomPlugin.kt")?.contains("Hello from KmpCustom plugin!"));

  Ok(())
}

#[test]
fn test_second_run_fails_without_mutation() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("twice");
  let out_str = out.to_string_lossy().to_string();

  run_bootstrap_ok(&template.path, &new_args(&out_str, &[]))?;
  let settings_before = read(&out, "settings.gradle.kts")?;
  std::fs::write(out.join("marker.txt"), "mine")?;

  let output = run_bootstrap(&template.path, &new_args(&out_str, &["--plugin-name", "Other"]))?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
  assert_eq!(read(&out, "marker.txt")?, "mine");
  assert_eq!(read(&out, "settings.gradle.kts")?, settings_before);
  assert!(
    out
      .join("plugin/src/main/kotlin/com/acme/widget/KmpCustomPlugin.kt")
      .is_file()
  );

  Ok(())
}

#[test]
fn test_invalid_plugin_name_rejected() -> Result<()> {
  let template = TestTemplate::new()?;

  for name in ["1Bad", "Bad-Name", ""] {
    let out = template.scratch().join("rejected");
    let out_str = out.to_string_lossy().to_string();

    let output = run_bootstrap(&template.path, &new_args(&out_str, &["--plugin-name", name]))?;

    assert_eq!(output.status.code(), Some(1), "name {:?} should be rejected", name);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid plugin name"));
    assert!(!out.exists());
  }

  Ok(())
}

#[test]
fn test_invalid_package_rejected() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("bad-package");

  let output = run_bootstrap(
    &template.path,
    &[
      "new",
      "--plugin-id",
      "dev.example.x",
      "--package-name",
      "com..acme",
      "--output-dir",
      &out.to_string_lossy(),
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!out.exists());

  Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("dry");
  let out_str = out.to_string_lossy().to_string();

  let output = run_bootstrap_ok(&template.path, &new_args(&out_str, &["--dry-run", "--plugin-name", "Foo"]))?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Dry run"));
  assert!(stdout.contains("KmpCustomPlugin → FooPlugin"));
  assert!(!out.exists());

  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let template = TestTemplate::new()?;
  let out = template.scratch().join("json");
  let out_str = out.to_string_lossy().to_string();

  let output = run_bootstrap_ok(&template.path, &new_args(&out_str, &["--json", "--plugin-name", "Foo"]))?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["profile"], "kmp-gradle-builder");
  assert_eq!(report["parameters"]["plugin_name"], "Foo");
  assert_eq!(report["dirs_cleaned"], 2);
  assert_eq!(report["relocations"].as_array().map(Vec::len), Some(3));
  assert_eq!(report["renamed"].as_array().map(Vec::len), Some(2));
  assert_eq!(report["substitution"]["files_undecodable"], 1);
  assert_eq!(report["plan_id"].as_str().map(str::len), Some(64));

  Ok(())
}

fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
  let path = root.join(rel);
  std::fs::create_dir_all(path.parent().expect("relative path has a parent"))?;
  std::fs::write(path, content)?;
  Ok(())
}

#[test]
fn test_kmp_profiles_relocation() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let template = temp.path().join("profiles-template");
  write(
    &template,
    "plugin/src/main/kotlin/dev/goquick/kmpprofiles/Foo.kt",
    "package dev.goquick.kmpprofiles\n\nclass KmpProfilesPlugin\n",
  )?;
  write(&template, "plugin/src/main/kotlin/dev/goquick/kmpprofiles/KmpProfilesPlugin.kt", "class KmpProfilesPlugin\n")?;
  let out = temp.path().join("widget");

  run_bootstrap_ok(
    temp.path(),
    &[
      "new",
      "--profile",
      "kmp-profiles",
      "--template",
      &template.to_string_lossy(),
      "--plugin-id",
      "com.acme.widget",
      "--package-name",
      "com.acme.widget",
      "--plugin-name",
      "Widget",
      "--output-dir",
      &out.to_string_lossy(),
    ],
  )?;

  let root = out.join("plugin/src/main/kotlin");
  assert_eq!(
    read(&root, "com/acme/widget/Foo.kt")?,
    "package com.acme.widget\n\nclass WidgetPlugin\n"
  );
  assert!(root.join("com/acme/widget/WidgetPlugin.kt").is_file());
  assert!(!root.join("dev").exists());
  assert!(root.is_dir());

  Ok(())
}

#[test]
fn test_template_profile_file() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  let template = temp.path().join("java-template");
  write(
    &template,
    "bootstrap.toml",
    r#"name = "java-lib"

[constants]
package = "org.sample.lib"
plugin_id = "org.sample.lib"
project_name = "sample-lib"
artifact_id = "sample-artifact"
dev_team = "TEAM000000"
plugin_base_name = "Sample"
generated_message = "Hello!"

[layout]
relocate_roots = ["src/main/java"]
plugin_source_root = "src/main/java"
source_extension = "java"
text_extensions = [".java"]
"#,
  )?;
  write(
    &template,
    "src/main/java/org/sample/lib/SamplePlugin.java",
    "package org.sample.lib;\n\npublic class SamplePlugin {}\n",
  )?;
  let out = temp.path().join("acme");

  let output = run_bootstrap_ok(
    &template,
    &[
      "new",
      "--plugin-id",
      "com.acme.lib",
      "--package-name",
      "com.acme.lib",
      "--plugin-name",
      "Acme",
      "--output-dir",
      &out.to_string_lossy(),
    ],
  )?;

  assert!(String::from_utf8_lossy(&output.stdout).contains("java-lib"));
  assert_eq!(
    read(&out, "src/main/java/com/acme/lib/AcmePlugin.java")?,
    "package com.acme.lib;\n\npublic class AcmePlugin {}\n"
  );
  assert!(!out.join("src/main/java/org").exists());
  // The profile describes the template, not the new project
  assert!(!out.join("bootstrap.toml").exists());
  assert!(files_containing(&out, "org.sample.lib").is_empty());

  Ok(())
}
