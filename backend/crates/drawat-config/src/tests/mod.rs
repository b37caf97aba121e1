
use std::env;

use tempfile::TempDir;

pub(crate) const TABLE_URL: &str = "https://drawat-table.example.workers.dev";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and point DRAWAT_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("DRAWAT_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Config dir plus the one setting validation cannot default
pub(crate) fn setup_valid_env() -> (TempDir, Vec<EnvGuard>) {
    let (temp, dir_guard) = setup_config_dir();
    let guards = vec![
        dir_guard,
        EnvGuard::set("DRAWAT_STORE_TABLE_URL", TABLE_URL),
        EnvGuard::remove("DRAWAT_ENVIRONMENT"),
        EnvGuard::remove("DRAWAT_STORE_API_KEY"),
        EnvGuard::remove("DRAWAT_STORE_MODE"),
    ];
    (temp, guards)
}
