// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

struct EnvGuard(Vec<(&'static str, Option<String>)>);

impl EnvGuard {
    fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
        let saved = vars.iter().map(|(k, _)| (*k, std::env::var(k).ok())).collect();
        for (key, value) in vars {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        EnvGuard(saved)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.0 {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn history_dir_prefers_explicit_override() {
    let _guard = EnvGuard::set(&[
        ("FARM_HISTORY_DIR", Some("/tmp/history")),
        ("XDG_STATE_HOME", Some("/tmp/xdg")),
    ]);
    assert_eq!(history_dir().unwrap(), PathBuf::from("/tmp/history"));
}

#[test]
#[serial]
fn history_dir_falls_back_to_xdg_state() {
    let _guard = EnvGuard::set(&[("FARM_HISTORY_DIR", None), ("XDG_STATE_HOME", Some("/tmp/xdg"))]);
    assert_eq!(history_dir().unwrap(), PathBuf::from("/tmp/xdg/farm/job_history"));
}

#[test]
#[serial]
fn empty_override_is_ignored() {
    let _guard = EnvGuard::set(&[("FARM_HISTORY_DIR", Some("")), ("XDG_STATE_HOME", Some("/tmp/xdg"))]);
    assert_eq!(history_dir().unwrap(), PathBuf::from("/tmp/xdg/farm/job_history"));
}

#[test]
#[serial]
fn submitter_name_defaults() {
    let _guard = EnvGuard::set(&[("FARM_SUBMITTER_NAME", None)]);
    assert_eq!(submitter_name(), DEFAULT_SUBMITTER);
}

#[test]
#[serial]
fn submitter_name_reads_override() {
    let _guard = EnvGuard::set(&[("FARM_SUBMITTER_NAME", Some("Batch"))]);
    assert_eq!(submitter_name(), "Batch");
}
