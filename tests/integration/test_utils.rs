//! Shared test utilities for integration tests
//!
//! Process environment is global, so every test that touches it goes through the
//! same mutex and restores what it changed.

use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after a test
struct EnvState(HashMap<String, Option<String>>);

impl EnvState {
    fn capture(names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .map(|name| (name.to_string(), std::env::var(name).ok()))
                .collect(),
        )
    }

    fn restore(self) {
        for (name, value) in self.0 {
            match value {
                Some(orig) => std::env::set_var(&name, orig),
                None => std::env::remove_var(&name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`.
///
/// The global config file then lives at `<test_dir>/siteconf/config.toml` on Linux.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture(&["HOME", "XDG_CONFIG_HOME"]);

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    env_state.restore();
    result
}

/// Run `f` with the given variables set, restoring their previous values afterwards.
///
/// HOME and XDG_CONFIG_HOME are pointed into `test_dir` as well so a developer's
/// own global config cannot leak in.
pub fn with_env_vars<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let mut names: Vec<&str> = vars.iter().map(|(name, _)| *name).collect();
    names.extend(["HOME", "XDG_CONFIG_HOME"]);
    let env_state = EnvState::capture(&names);

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();
    result
}
