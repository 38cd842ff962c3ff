//! End-to-end tests driving the `vendr` binary in a temporary workspace.
//!
//! None of these touch the network: they only use commands whose side
//! effects are local (adding modules, aliases to not-yet-vendored files,
//! removals).

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context that sets up an empty workspace
struct TestContext {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    fn vendr_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_vendr");
        let mut cmd = Command::new(bin_path);
        cmd.env("VENDR_ROOT", &self.root);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.vendr_cmd()
            .args(args)
            .output()
            .expect("failed to run vendr")
    }

    fn manifest(&self) -> PathBuf {
        self.root.join("vendr.toml")
    }

    fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).expect("failed to read file")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["--version"]));
}

#[test]
fn test_list_empty_workspace() {
    let ctx = TestContext::new();
    let output = ctx.run(&["list"]);
    assert_success(&output);
    assert!(stdout(&output).contains("No modules tracked."));
    assert!(!ctx.manifest().exists());
}

#[test]
fn test_add_writes_manifest() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&[
        "add",
        "https://deno.land/x/oak@v12.6.0",
        "https://deno.land/std@0.200.0",
    ]));

    let manifest = ctx.read("vendr.toml");
    assert!(manifest.contains("[[modules]]"));
    // Sorted by path regardless of argument order.
    let std_pos = manifest.find("deno.land/std").unwrap();
    let oak_pos = manifest.find("deno.land/x/oak").unwrap();
    assert!(std_pos < oak_pos);

    let output = ctx.run(&["list"]);
    assert_success(&output);
    assert!(stdout(&output).contains("https://deno.land/x/oak"));
    assert!(stdout(&output).contains("v12.6.0"));
}

#[test]
fn test_add_duplicate_module_fails() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["add", "https://deno.land/x/oak@v12.6.0"]));

    let before = ctx.read("vendr.toml");
    let output = ctx.run(&["add", "https://deno.land/x/oak@v13.0.0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(ctx.read("vendr.toml"), before);
}

#[test]
fn test_add_rejects_unversioned_reference() {
    let ctx = TestContext::new();
    let output = ctx.run(&["add", "https://deno.land/x/oak"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Missing version"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--dry-run", "add", "https://deno.land/x/oak@v12.6.0"]);
    assert_success(&output);
    assert!(stdout(&output).contains("would add https://deno.land/x/oak@v12.6.0"));
    assert!(!ctx.manifest().exists());
}

#[test]
fn test_alias_to_unvendored_file() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["add", "https://deno.land/x/oak@v12.6.0"]));
    assert_success(&ctx.run(&[
        "alias",
        "deps/oak.ts",
        "https://deno.land/x/oak/mod.ts",
    ]));

    assert_eq!(
        ctx.read("deps/oak.ts"),
        "export * from \"../vendor/https/deno.land/x/oak/mod.ts\";\n"
    );
    assert!(ctx.read("vendr.toml").contains("deps/oak.ts"));

    let output = ctx.run(&["alias", "deps/oak.ts", "https://deno.land/x/oak/mod.ts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Alias 'deps/oak.ts' already exists"));

    assert_success(&ctx.run(&["unalias", "deps/oak.ts"]));
    assert!(!ctx.root.join("deps/oak.ts").exists());
    assert!(!ctx.read("vendr.toml").contains("deps/oak.ts"));
}

#[test]
fn test_alias_without_module_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["alias", "deps/oak.ts", "https://deno.land/x/oak/mod.ts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No module found"));
    assert!(!ctx.root.join("deps/oak.ts").exists());
}

#[test]
fn test_remove_module_keeps_dangling_alias() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["add", "https://deno.land/x/oak@v12.6.0"]));
    assert_success(&ctx.run(&[
        "alias",
        "oak.ts",
        "https://deno.land/x/oak/mod.ts",
    ]));
    assert_success(&ctx.run(&["remove", "https://deno.land/x/oak"]));

    let manifest = ctx.read("vendr.toml");
    assert!(!manifest.contains("[[modules]]"));
    assert!(manifest.contains("oak.ts"));

    let output = ctx.run(&["list"]);
    assert_success(&output);
    assert!(stdout(&output).contains("(no module)"));
}

#[test]
fn test_apply_batch_from_json() {
    let ctx = TestContext::new();
    let batch = ctx.root.join("batch.json");
    std::fs::write(
        &batch,
        r#"[
            {"type": "add_module", "module": {"protocol": "https", "path": "esm.sh/preact", "version": "10.19.0"}},
            {"type": "add_alias", "alias": "lib/preact.js", "target": "https://esm.sh/preact/hooks.js"}
        ]"#,
    )
    .unwrap();

    assert_success(&ctx.run(&["apply", path_str(&batch)]));

    let output = ctx.run(&["list", "--json"]);
    assert_success(&output);
    let json: String = stdout(&output);
    assert!(json.contains("\"esm.sh/preact\""));
    assert!(json.contains("\"lib/preact.js\": \"https://esm.sh/preact/hooks.js\""));
    assert!(ctx.root.join("lib/preact.js").exists());
}

#[test]
fn test_remove_rejects_traversal() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["add", "https://example.com@v1"]));

    let output = ctx.run(&["remove", "https://example.com/../../.."]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid path"));
    assert!(ctx.read("vendr.toml").contains("example.com"));
}

#[test]
fn test_alias_outside_workspace_fails() {
    let ctx = TestContext::new();
    assert_success(&ctx.run(&["add", "https://deno.land/x/oak@v12.6.0"]));
    let before = ctx.read("vendr.toml");

    let name = format!(
        "{}-escape.ts",
        ctx.root.file_name().and_then(|n| n.to_str()).unwrap()
    );
    let alias = format!("../{name}");
    let output = ctx.run(&["alias", &alias, "https://deno.land/x/oak/mod.ts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to synchronize workspace"));
    assert!(!ctx.root.parent().unwrap().join(&name).exists());
    assert_eq!(ctx.read("vendr.toml"), before);
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}
