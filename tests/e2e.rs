use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct TestEnv {
    dir: PathBuf,
}

impl TestEnv {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("edgebar-e2e-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("failed to create test dir");
        Self { dir }
    }

    fn write(&self, file: &str, content: &str) -> PathBuf {
        let path = self.dir.join(file);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn edgebar(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edgebar"))
        .args(args)
        .output()
        .expect("failed to run edgebar")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("test paths are utf-8")
}

#[test]
fn test_check_config_prints_effective_settings() {
    let env = TestEnv::new("check");
    let config = env.write("config.toml", "show_threshold = 60.0\ndebounce_ms = 250\n");

    let output = edgebar(&["check-config", "--config", path_arg(&config)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("show_threshold = 60"));
    assert!(stdout.contains("hide_threshold = 3"));
    assert!(stdout.contains("debounce_ms = 250"));
}

#[test]
fn test_check_config_missing_file_uses_defaults() {
    let env = TestEnv::new("missing");
    let config = env.dir.join("nope.toml");

    let output = edgebar(&["check-config", "--config", path_arg(&config)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("poll_interval_ms = 100"));
}

#[test]
fn test_check_config_rejects_inverted_thresholds() {
    let env = TestEnv::new("inverted");
    let config = env.write("config.toml", "hide_threshold = 50.0\nshow_threshold = 10.0\n");

    let output = edgebar(&["check-config", "--config", path_arg(&config)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn test_check_config_rejects_bad_log_level() {
    let env = TestEnv::new("log-level");
    let config = env.write("config.toml", "log_level = \"edgebar=loud\"\n");

    let output = edgebar(&["check-config", "--config", path_arg(&config)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("log_level"));
}

#[test]
fn test_unknown_trigger_event_is_a_usage_error() {
    let output = edgebar(&["trigger", "cursor_sideways"]);
    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_trigger_invokes_bar_with_event_name() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new("trigger");
    let log = env.dir.join("calls.log");
    let bar = env.write(
        "fake-bar",
        &format!("#!/bin/sh\necho \"$@\" >> '{}'\n", log.display()),
    );
    std::fs::set_permissions(&bar, std::fs::Permissions::from_mode(0o755))
        .expect("failed to mark fake bar executable");
    let config = env.write(
        "config.toml",
        &format!("bar_executable = '{}'\n", bar.display()),
    );

    let output = edgebar(&[
        "trigger",
        "display_external_primary",
        "--config",
        path_arg(&config),
    ]);
    assert!(output.status.success());
    let calls = std::fs::read_to_string(&log).expect("fake bar was not called");
    assert_eq!(calls.trim(), "--trigger display_external_primary");
}

#[cfg(unix)]
#[test]
fn test_trigger_reports_failing_bar() {
    let env = TestEnv::new("failing");
    let config = env.write("config.toml", "bar_executable = '/bin/false'\n");

    let output = edgebar(&["trigger", "cursor_at_top", "--config", path_arg(&config)]);
    assert!(!output.status.success());
}
