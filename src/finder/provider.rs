//! Directory providers: lazily evaluated search directories.
//!
//! A provider is asked for its directory every time a search runs, so it
//! reflects the process state at that moment rather than when the
//! [`Finder`](super::Finder) was built.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// The result of asking a [`DirProvider`] for its directory.
///
/// `path` is `None` when the directory is unavailable (for example the home
/// directory could not be determined). That is a skip signal, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLookup {
    pub path: Option<PathBuf>,
    pub desc: Cow<'static, str>,
}

impl DirLookup {
    /// A resolved directory. An empty path is treated as unavailable.
    pub fn available(path: impl Into<PathBuf>, desc: impl Into<Cow<'static, str>>) -> Self {
        let path = path.into();
        Self {
            path: (!path.as_os_str().is_empty()).then_some(path),
            desc: desc.into(),
        }
    }

    pub fn unavailable(desc: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: None,
            desc: desc.into(),
        }
    }
}

/// Produces a search directory together with a label describing its origin.
pub trait DirProvider: Send + Sync + fmt::Debug {
    fn lookup(&self) -> DirLookup;
}

/// Process environment queries used by [`EnvDir`].
///
/// Each query returns `None` on failure. [`SystemEnv`] asks the operating
/// system; tests substitute their own implementation.
pub trait Environment: Send + Sync + fmt::Debug {
    fn current_dir(&self) -> Option<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn config_dir(&self) -> Option<PathBuf>;
    fn current_exe(&self) -> Option<PathBuf>;
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn current_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// A fixed directory, labelled `const`.
#[derive(Debug, Clone)]
pub struct ConstDir {
    path: PathBuf,
}

impl ConstDir {
    /// Joins `segments` into one path. With no non-empty segments the
    /// provider reports itself unavailable.
    pub fn new<S: AsRef<Path>>(segments: &[S]) -> Self {
        Self {
            path: join_segments(PathBuf::new(), segments),
        }
    }
}

impl DirProvider for ConstDir {
    fn lookup(&self) -> DirLookup {
        DirLookup::available(self.path.clone(), "const")
    }
}

/// Which environment location an [`EnvDir`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvDirKind {
    CurrentDir,
    Home,
    UserConfig,
    /// The directory containing the running executable.
    Executable,
}

impl EnvDirKind {
    pub fn desc(self) -> &'static str {
        match self {
            EnvDirKind::CurrentDir => "cwd",
            EnvDirKind::Home => "home",
            EnvDirKind::UserConfig => "userconfig",
            EnvDirKind::Executable => "exe",
        }
    }

    fn resolve(self, env: &dyn Environment) -> Option<PathBuf> {
        match self {
            EnvDirKind::CurrentDir => env.current_dir(),
            EnvDirKind::Home => env.home_dir(),
            EnvDirKind::UserConfig => env.config_dir(),
            EnvDirKind::Executable => env
                .current_exe()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }
}

/// A directory taken from the process environment at lookup time, with
/// optional sub-path segments appended.
#[derive(Debug, Clone)]
pub struct EnvDir {
    kind: EnvDirKind,
    sub: Vec<PathBuf>,
    env: Arc<dyn Environment>,
}

impl EnvDir {
    pub fn new<S: AsRef<Path>>(kind: EnvDirKind, sub: &[S]) -> Self {
        Self::with_env(kind, Arc::new(SystemEnv), sub)
    }

    pub fn with_env<S: AsRef<Path>>(
        kind: EnvDirKind,
        env: Arc<dyn Environment>,
        sub: &[S],
    ) -> Self {
        Self {
            kind,
            sub: sub.iter().map(|s| s.as_ref().to_path_buf()).collect(),
            env,
        }
    }
}

impl DirProvider for EnvDir {
    fn lookup(&self) -> DirLookup {
        match self.kind.resolve(self.env.as_ref()) {
            Some(base) => DirLookup::available(join_segments(base, &self.sub), self.kind.desc()),
            None => DirLookup::unavailable(self.kind.desc()),
        }
    }
}

/// A caller-defined provider backed by a closure.
pub struct FnDir {
    desc: Cow<'static, str>,
    f: Box<dyn Fn() -> Option<PathBuf> + Send + Sync>,
}

impl FnDir {
    pub fn new<F>(desc: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn() -> Option<PathBuf> + Send + Sync + 'static,
    {
        Self {
            desc: desc.into(),
            f: Box::new(f),
        }
    }
}

impl fmt::Debug for FnDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDir").field("desc", &self.desc).finish_non_exhaustive()
    }
}

impl DirProvider for FnDir {
    fn lookup(&self) -> DirLookup {
        match (self.f)() {
            Some(path) => DirLookup::available(path, self.desc.clone()),
            None => DirLookup::unavailable(self.desc.clone()),
        }
    }
}

/// Appends each non-empty segment to `base`, keeping every segment after
/// the first under the path built so far.
fn join_segments<S: AsRef<Path>>(mut base: PathBuf, segments: &[S]) -> PathBuf {
    for seg in segments {
        let seg = seg.as_ref();
        if !seg.as_os_str().is_empty() {
            base = join_under(&base, seg);
        }
    }
    base
}

/// Joins `seg` onto `base`. Unlike [`Path::join`], a rooted `seg` does not
/// replace a non-empty `base`: its root and prefix are dropped.
pub(crate) fn join_under(base: &Path, seg: impl AsRef<Path>) -> PathBuf {
    let seg = seg.as_ref();
    if base.as_os_str().is_empty() {
        return seg.to_path_buf();
    }

    let mut joined = base.to_path_buf();
    for comp in seg.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => joined.push(comp),
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::test_support::FakeEnv;

    const NO_SUB: &[&str] = &[];

    #[test]
    fn test_available_with_empty_path_is_unavailable() {
        let lookup = DirLookup::available("", "custom");
        assert_eq!(lookup, DirLookup::unavailable("custom"));
    }

    #[test]
    fn test_const_dir_joins_segments() {
        let lookup = ConstDir::new(&["etc", "myapp"]).lookup();
        assert_eq!(lookup.path, Some(Path::new("etc").join("myapp")));
        assert_eq!(lookup.desc, "const");
    }

    #[test]
    fn test_const_dir_without_segments_is_unavailable() {
        let lookup = ConstDir::new(NO_SUB).lookup();
        assert_eq!(lookup.path, None);
        assert_eq!(lookup.desc, "const");

        let lookup = ConstDir::new(&["", ""]).lookup();
        assert_eq!(lookup.path, None);
    }

    #[test]
    fn test_env_dir_joins_sub_path() {
        let env = Arc::new(FakeEnv {
            config: Some(PathBuf::from("/home/u/.config")),
            ..FakeEnv::default()
        });
        let lookup = EnvDir::with_env(EnvDirKind::UserConfig, env, &["myapp", "", "conf.d"]).lookup();
        assert_eq!(lookup.path, Some(PathBuf::from("/home/u/.config/myapp/conf.d")));
        assert_eq!(lookup.desc, "userconfig");
    }

    #[test]
    fn test_env_dir_failure_is_unavailable_with_label() {
        let env: Arc<dyn Environment> = Arc::new(FakeEnv::default());
        for kind in [
            EnvDirKind::CurrentDir,
            EnvDirKind::Home,
            EnvDirKind::UserConfig,
            EnvDirKind::Executable,
        ] {
            let lookup = EnvDir::with_env(kind, env.clone(), &["sub"]).lookup();
            assert_eq!(lookup, DirLookup::unavailable(kind.desc()));
        }
    }

    #[test]
    fn test_env_dir_keeps_rooted_sub_path_under_base() {
        let env = Arc::new(FakeEnv {
            home: Some(PathBuf::from("/home/u")),
            ..FakeEnv::default()
        });
        let lookup = EnvDir::with_env(EnvDirKind::Home, env, &["/etc", "myapp"]).lookup();
        assert_eq!(lookup.path, Some(PathBuf::from("/home/u/etc/myapp")));
    }

    #[test]
    fn test_const_dir_keeps_leading_root() {
        let lookup = ConstDir::new(&["/etc", "/myapp"]).lookup();
        assert_eq!(lookup.path, Some(PathBuf::from("/etc/myapp")));
    }

    #[test]
    fn test_join_under() {
        assert_eq!(join_under(Path::new("/d"), "/etc/passwd.toml"), PathBuf::from("/d/etc/passwd.toml"));
        assert_eq!(join_under(Path::new("/d"), "./a/../b.toml"), PathBuf::from("/d/a/../b.toml"));
        assert_eq!(join_under(Path::new(""), "/etc/app.toml"), PathBuf::from("/etc/app.toml"));
    }

    #[test]
    fn test_executable_dir_uses_parent_directory() {
        let env = Arc::new(FakeEnv {
            exe: Some(PathBuf::from("/opt/myapp/bin/myapp")),
            ..FakeEnv::default()
        });
        let lookup = EnvDir::with_env(EnvDirKind::Executable, env, NO_SUB).lookup();
        assert_eq!(lookup.path, Some(PathBuf::from("/opt/myapp/bin")));
        assert_eq!(lookup.desc, "exe");
    }

    #[test]
    fn test_env_dir_queries_at_lookup_time() {
        let env = Arc::new(FakeEnv::default());
        let provider = EnvDir::with_env(EnvDirKind::CurrentDir, env.clone(), NO_SUB);
        assert_eq!(provider.lookup().path, None);

        env.set_cwd(Some(PathBuf::from("/work")));
        assert_eq!(provider.lookup().path, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_fn_dir_uses_closure_and_label() {
        let provider = FnDir::new("custom", || Some(PathBuf::from("/srv")));
        let lookup = provider.lookup();
        assert_eq!(lookup.path, Some(PathBuf::from("/srv")));
        assert_eq!(lookup.desc, "custom");

        let provider = FnDir::new("custom", || None);
        assert_eq!(provider.lookup(), DirLookup::unavailable("custom"));
    }
}
