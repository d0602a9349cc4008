use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Mutex;

use super::provider::Environment;

/// Deterministic [`Environment`] for tests. Every query fails unless set.
#[derive(Debug, Default)]
pub(crate) struct FakeEnv {
    pub cwd: Mutex<Option<PathBuf>>,
    pub home: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub exe: Option<PathBuf>,
    pub vars: HashMap<String, OsString>,
}

impl FakeEnv {
    pub fn set_cwd(&self, cwd: Option<PathBuf>) {
        *self.cwd.lock().unwrap() = cwd;
    }
}

impl Environment for FakeEnv {
    fn current_dir(&self) -> Option<PathBuf> {
        self.cwd.lock().unwrap().clone()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config.clone()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        self.exe.clone()
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}
