// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `vaultgate` binary against file-backed stores.
//!
//! Each test gets its own temp data directory and config file, and runs the
//! compiled binary with `--config` so no user or system config leaks in.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

struct Device {
    dir: TempDir,
    config: PathBuf,
}

impl Device {
    fn new() -> Self {
        Self::with_extra_config("")
    }

    fn with_extra_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let assets = dir.path().join("assets");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::create_dir_all(assets.join("fonts")).unwrap();
        std::fs::write(assets.join("logo.png"), b"\x89PNG\r\n").unwrap();
        std::fs::write(assets.join("fonts/Inter.ttf"), [0u8, 1, 0, 0, 0, 16]).unwrap();

        let config = dir.path().join("vaultgate.toml");
        std::fs::write(
            &config,
            format!(
                r#"
[bootstrap]
timeout_secs = 5
{extra}

[assets]
root = "{assets}"
images = ["logo.png"]

[assets.fonts]
Inter = "fonts/Inter.ttf"

[device]
data_dir = "{data}"
"#,
                assets = assets.display(),
                data = data.display(),
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn data(&self, file: &str) -> PathBuf {
        self.dir.path().join("data").join(file)
    }

    fn write(&self, file: &str, content: &str) {
        std::fs::write(self.data(file), content).unwrap();
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_vaultgate"));
        command.arg("--config").arg(&self.config).args(args);
        command
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut command = self.command(args);
        scrub_env(&mut command, std::env::vars_os().map(|(key, _)| key));
        command.output().unwrap()
    }

    fn run_json(&self, args: &[&str]) -> (bool, Value) {
        let output = self.run(args);
        let json = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout was not JSON ({e}): {}",
                String::from_utf8_lossy(&output.stdout)
            )
        });
        (output.status.success(), json)
    }
}

/// Drop `RUST_LOG` and every `VAULTGATE_*` override, which would otherwise
/// shadow the temp config.
fn scrub_env(command: &mut Command, inherited: impl Iterator<Item = OsString>) {
    command.env_remove("RUST_LOG");
    for key in inherited {
        if key.to_string_lossy().starts_with("VAULTGATE_") {
            command.env_remove(key);
        }
    }
}

fn exists(path: &Path) -> bool {
    path.exists()
}

#[test]
fn fresh_device_lands_on_welcome() {
    let device = Device::new();

    let (ok, json) = device.run_json(&["launch", "--json"]);

    assert!(ok);
    assert_eq!(json["ready"], true);
    assert_eq!(json["initial_screen"], "Welcome");
    assert_eq!(json["settings"]["biometric_unlock"], false);
}

#[test]
fn returning_user_lands_on_authentication() {
    let device = Device::new();
    device.write("vault.json", "{}");
    device.write("biometrics.enrolled", "");
    device.write("credential", "unlock-secret");
    device.write("preferences.json", r#"{"concealTokens": true}"#);

    let (ok, json) = device.run_json(&["launch", "--json"]);

    assert!(ok);
    assert_eq!(json["initial_screen"], "Authentication");
    assert_eq!(json["settings"]["biometric_unlock"], true);
    assert_eq!(json["settings"]["conceal_tokens"], true);
    assert!(exists(&device.data("credential")));
}

#[test]
fn stale_credential_is_removed_on_launch() {
    let device = Device::new();
    device.write("credential", "stale");

    let (ok, json) = device.run_json(&["launch", "--json"]);

    assert!(ok);
    assert_eq!(json["settings"]["biometric_unlock"], false);
    assert!(!exists(&device.data("credential")));
}

#[test]
fn launch_with_reset_wipes_state() {
    let device = Device::new();
    device.write("vault.json", "{}");
    device.write("credential", "unlock-secret");
    device.write("preferences.json", r#"{"concealTokens": "1"}"#);
    device.write("biometrics.enrolled", "");

    let (ok, json) = device.run_json(&["launch", "--reset", "--json"]);

    assert!(ok);
    assert_eq!(json["initial_screen"], "Welcome");
    assert_eq!(json["reset"]["vault_deleted"]["status"], "done");
    assert_eq!(json["settings"]["conceal_tokens"], false);
    assert!(!exists(&device.data("vault.json")));
    assert!(!exists(&device.data("credential")));
    assert!(!exists(&device.data("preferences.json")));
}

#[test]
fn unlock_switches_to_post_vault_screens() {
    let device = Device::new();
    device.write("vault.json", "{}");

    let (ok, json) = device.run_json(&["launch", "--unlock", "--json"]);

    assert!(ok);
    assert_eq!(json["initial_screen"], "Authentication");
    assert_eq!(json["phase"], "PostVault");
    assert_eq!(json["current_screen"], "Home");
    assert_eq!(json["reachable"].as_array().unwrap().len(), 4);
}

#[test]
fn missing_font_fails_with_exit_code() {
    let device = Device::new();
    std::fs::remove_file(device.dir.path().join("assets/fonts/Inter.ttf")).unwrap();

    let (ok, json) = device.run_json(&["launch", "--json"]);

    assert!(!ok);
    assert_eq!(json["ready"], false);
    assert!(json["initial_screen"].is_null());
    assert_eq!(json["failures"][0]["task"], "fonts");
    assert_eq!(json["failures"][0]["kind"], "asset_load");
}

#[test]
fn config_reset_directive_is_honored() {
    let device = Device::with_extra_config("reset = true");
    device.write("vault.json", "{}");

    let (ok, json) = device.run_json(&["launch", "--json"]);

    assert!(ok);
    assert_eq!(json["initial_screen"], "Welcome");
    assert!(!exists(&device.data("vault.json")));
}

#[test]
fn status_is_read_only() {
    let device = Device::new();
    device.write("credential", "stale");

    let (ok, json) = device.run_json(&["status", "--json"]);

    assert!(ok);
    assert_eq!(json["credential_stored"], true);
    assert_eq!(json["biometrics_enrolled"], false);
    assert!(exists(&device.data("credential")));
    assert!(!String::from_utf8_lossy(&device.run(&["status", "--json"]).stdout).contains("stale"));
}

#[test]
fn reset_command_reports_each_step() {
    let device = Device::new();
    device.write("vault.json", "{}");

    let (ok, json) = device.run_json(&["reset", "--json"]);

    assert!(ok);
    for step in ["vault_deleted", "credential_removed", "storage_cleared"] {
        assert_eq!(json[step]["status"], "done", "step {step}");
    }
    assert!(!exists(&device.data("vault.json")));
}

#[test]
fn shell_overrides_do_not_leak_into_runs() {
    let device = Device::new();
    device.write("vault.json", "{}");
    let elsewhere = tempfile::tempdir().unwrap();

    let leaked = device
        .command(&["status", "--json"])
        .env("VAULTGATE_DEVICE_DATA_DIR", elsewhere.path())
        .output()
        .unwrap();
    let leaked: Value = serde_json::from_slice(&leaked.stdout).unwrap();
    assert_eq!(leaked["vault_present"], false);

    let mut command = device.command(&["status", "--json"]);
    command.env("VAULTGATE_DEVICE_DATA_DIR", elsewhere.path());
    scrub_env(
        &mut command,
        [OsString::from("VAULTGATE_DEVICE_DATA_DIR")].into_iter(),
    );
    let scrubbed: Value = serde_json::from_slice(&command.output().unwrap().stdout).unwrap();
    assert_eq!(scrubbed["vault_present"], true);
}

#[test]
fn invalid_config_exits_nonzero() {
    let device = Device::with_extra_config("failure_policy = \"sometimes\"");

    let output = device.run(&["status"]);

    assert!(!output.status.success());
}
