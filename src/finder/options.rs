//! Option constructors for [`Finder`].
//!
//! Every constructor returns a [`FinderOption`], a reusable closure that
//! appends to one of the Finder's lists when applied.

use std::fmt;
use std::sync::Arc;

use super::provider::{ConstDir, DirProvider, EnvDir, EnvDirKind, Environment, SystemEnv};
use super::Finder;

/// A reusable configuration step applied to a [`Finder`].
#[derive(Clone)]
pub struct FinderOption(Arc<dyn Fn(&mut Finder) + Send + Sync>);

impl FinderOption {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Finder) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn apply_to(&self, finder: &mut Finder) {
        (self.0)(finder)
    }
}

impl fmt::Debug for FinderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FinderOption")
    }
}

/// `.toml`
pub fn toml() -> FinderOption {
    FinderOption::new(|f| f.add_exts([".toml"]))
}

/// `.ini`
pub fn ini() -> FinderOption {
    FinderOption::new(|f| f.add_exts([".ini"]))
}

/// `.json`
pub fn json() -> FinderOption {
    FinderOption::new(|f| f.add_exts([".json"]))
}

/// `.yaml`, `.yml`
pub fn yaml() -> FinderOption {
    FinderOption::new(|f| f.add_exts([".yaml", ".yml"]))
}

/// Arbitrary extensions. A missing leading `.` is added.
pub fn ext(exts: &[&str]) -> FinderOption {
    let exts: Vec<String> = exts
        .iter()
        .map(|e| {
            if e.starts_with('.') {
                (*e).to_string()
            } else {
                format!(".{e}")
            }
        })
        .collect();
    FinderOption::new(move |f| f.add_exts(exts.iter().cloned()))
}

/// A single base name, without extension.
pub fn name(name: &str) -> FinderOption {
    names(&[name])
}

/// Base names, without extension. Tried in order.
pub fn names(names: &[&str]) -> FinderOption {
    let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
    FinderOption::new(move |f| f.add_names(names.iter().cloned()))
}

/// A fixed directory joined from `segments`, labelled `const`.
pub fn dir(segments: &[&str]) -> FinderOption {
    provider(ConstDir::new(segments))
}

/// The working directory at search time, labelled `cwd`.
pub fn current_dir(sub: &[&str]) -> FinderOption {
    provider(EnvDir::new(EnvDirKind::CurrentDir, sub))
}

/// The user's home directory, labelled `home`.
pub fn home_dir(sub: &[&str]) -> FinderOption {
    provider(EnvDir::new(EnvDirKind::Home, sub))
}

/// The platform's user configuration directory, labelled `userconfig`.
pub fn user_config_dir(sub: &[&str]) -> FinderOption {
    provider(EnvDir::new(EnvDirKind::UserConfig, sub))
}

/// The directory containing the running executable, labelled `exe`.
pub fn executable_dir(sub: &[&str]) -> FinderOption {
    provider(EnvDir::new(EnvDirKind::Executable, sub))
}

/// Like the directory options above, but resolved against `env`.
pub fn env_dir(kind: EnvDirKind, env: Arc<dyn Environment>, sub: &[&str]) -> FinderOption {
    provider(EnvDir::with_env(kind, env, sub))
}

/// Any [`DirProvider`].
pub fn provider(p: impl DirProvider + 'static) -> FinderOption {
    let p: Arc<dyn DirProvider> = Arc::new(p);
    FinderOption::new(move |f| f.add_dirs([p.clone()]))
}

/// Fully specified file paths, checked before any directory.
pub fn exact_path(paths: &[&str]) -> FinderOption {
    let paths: Vec<String> = paths.iter().map(|p| (*p).to_string()).collect();
    FinderOption::new(move |f| f.add_exacts(paths.iter()))
}

/// An exact path taken from the environment variable `var` when the option
/// is applied. Unset or empty variables add nothing.
pub fn exact_path_env(var: &str) -> FinderOption {
    exact_path_env_in(Arc::new(SystemEnv), var)
}

/// Like [`exact_path_env`], but reads the variable from `env`.
pub fn exact_path_env_in(env: Arc<dyn Environment>, var: &str) -> FinderOption {
    let var = var.to_string();
    FinderOption::new(move |f| {
        if let Some(path) = env.var_os(&var) {
            f.add_exact(path);
        }
    })
}
