//! Startup validation — the binary must refuse to run without credentials.

use std::process::{Command, Stdio};

use codeask_config::{ENV_API_KEY, ENV_DEPLOYMENT, ENV_ENDPOINT};

/// Run the binary in a clean temp dir (no stray `.env`) with the given
/// credential variables removed.
fn run_without(vars: &[&str]) -> std::process::Output {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codeask"));
    cmd.current_dir(tmp.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env(ENV_ENDPOINT, "https://example.openai.azure.com")
        .env(ENV_API_KEY, "test-key")
        .env(ENV_DEPLOYMENT, "gpt-4o");
    for var in vars {
        cmd.env_remove(var);
    }
    cmd.output().unwrap()
}

#[test]
fn test_all_vars_missing_exits_nonzero_naming_them() {
    let output = run_without(&[ENV_ENDPOINT, ENV_API_KEY, ENV_DEPLOYMENT]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(ENV_ENDPOINT));
    assert!(stderr.contains(ENV_API_KEY));
    assert!(stderr.contains(ENV_DEPLOYMENT));
}

#[test]
fn test_single_missing_var_is_fatal() {
    for var in [ENV_ENDPOINT, ENV_API_KEY, ENV_DEPLOYMENT] {
        let output = run_without(&[var]);
        assert!(
            !output.status.success(),
            "binary must exit non-zero when {var} is unset"
        );
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(var), "diagnostic must name {var}");
    }
}

#[test]
fn test_with_credentials_and_closed_stdin_exits_zero() {
    // Closed stdin is an immediate EOF: the loop terminates normally
    // without a search or completion call.
    let output = run_without(&[]);
    assert!(output.status.success());
}
