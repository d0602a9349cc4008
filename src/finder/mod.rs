//! Configuration file discovery.
//!
//! A [`Finder`] holds four ordered lists: exact file paths, base names,
//! extensions and directory providers. [`Finder::find`] probes them in
//! priority order and returns the first existing file.

pub mod options;
pub mod provider;

#[cfg(test)]
mod test_support;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Error;
use options::FinderOption;
use provider::{join_under, DirLookup, DirProvider};

/// Label reported for matches from the exact-path list.
pub const EXACT_DESC: &str = "exact";

/// A configuration file that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub path: PathBuf,
    /// The extension that matched, including its leading `.`.
    pub ext: String,
    /// Label of the directory provider, or [`EXACT_DESC`].
    pub dir_desc: String,
}

/// Searches for a configuration file.
///
/// Exact paths are checked first, in order. Then, for each directory
/// provider, every base name is tried with every extension (names outer,
/// extensions inner). The first existing non-directory entry wins.
///
/// ## Example
///
/// ```no_run
/// use findcfg::{options, Finder};
///
/// let finder = Finder::new([
///     options::yaml(),
///     options::name("config"),
///     options::executable_dir(&[]),
///     options::user_config_dir(&["myapp"]),
/// ]);
///
/// match finder.find() {
///     Some(found) => println!("using {}", found.path.display()),
///     None => eprintln!("no config found, expected at {}", finder.fallback_path().display()),
/// }
/// ```
///
/// Empty lists are legal. A Finder without extensions, names or providers
/// can only match through its exact paths.
#[derive(Debug, Clone, Default)]
pub struct Finder {
    exts: Vec<String>,
    names: Vec<String>,
    dirs: Vec<Arc<dyn DirProvider>>,
    exacts: Vec<PathBuf>,
}

impl Finder {
    /// Creates a Finder by applying `opts` in order.
    pub fn new(opts: impl IntoIterator<Item = FinderOption>) -> Self {
        let mut finder = Self::default();
        for opt in opts {
            finder.apply(&opt);
        }
        finder
    }

    /// Creates an empty Finder to be configured with [`with`](Self::with).
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, opt: FinderOption) -> Self {
        self.apply(&opt);
        self
    }

    pub fn apply(&mut self, opt: &FinderOption) {
        opt.apply_to(self);
    }

    /// Appends extensions. Each needs its leading `.`, like `".yaml"`.
    pub fn add_exts<I, S>(&mut self, exts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exts.extend(exts.into_iter().map(Into::into));
    }

    /// Appends base names, without extension.
    pub fn add_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }

    pub fn add_dirs(&mut self, dirs: impl IntoIterator<Item = Arc<dyn DirProvider>>) {
        self.dirs.extend(dirs);
    }

    pub fn add_dir(&mut self, dir: impl DirProvider + 'static) {
        self.dirs.push(Arc::new(dir));
    }

    /// Appends a file path checked before any directory. Empty paths are
    /// ignored.
    pub fn add_exact(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return;
        }
        self.exacts.push(path);
    }

    pub fn add_exacts<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        for path in paths {
            self.add_exact(path);
        }
    }

    pub fn exts(&self) -> &[String] {
        &self.exts
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn dirs(&self) -> &[Arc<dyn DirProvider>] {
        &self.dirs
    }

    pub fn exacts(&self) -> &[PathBuf] {
        &self.exacts
    }

    /// Returns the first existing file, or `None` when nothing matched.
    pub fn find(&self) -> Option<Found> {
        let found = self.probes().find(|candidate| {
            let hit = is_file(&candidate.path);
            tracing::trace!(
                path = %candidate.path.display(),
                desc = %candidate.dir_desc,
                hit,
                "probing config path"
            );
            hit
        });

        match &found {
            Some(f) => tracing::debug!(path = %f.path.display(), desc = %f.dir_desc, "found config file"),
            None => tracing::debug!("no config file found"),
        }
        found
    }

    /// Like [`find`](Self::find), but absence is an error naming the
    /// [`fallback_path`](Self::fallback_path).
    pub fn find_required(&self) -> Result<Found, Error> {
        self.find().ok_or_else(|| {
            let expected = self.fallback_path();
            if expected.as_os_str().is_empty() {
                Error::NoCandidates
            } else {
                Error::NotFound { expected }
            }
        })
    }

    /// Every path [`find`](Self::find) would probe, in order, without
    /// touching the filesystem. Directory providers are still invoked.
    pub fn candidates(&self) -> Vec<Found> {
        self.probes().collect()
    }

    /// A best-guess path for "config not found, expected at ..." messages.
    ///
    /// This is the first exact path if there is one, otherwise the first
    /// provider's directory joined with the first name and extension. It is
    /// empty when any of those lists is empty.
    ///
    /// The first provider is used even if it is unavailable, in which case
    /// the result is just `name.ext` with no directory.
    pub fn fallback_path(&self) -> PathBuf {
        if let Some(first) = self.exacts.first() {
            return first.clone();
        }

        let (Some(provider), Some(name), Some(ext)) =
            (self.dirs.first(), self.names.first(), self.exts.first())
        else {
            return PathBuf::new();
        };

        let dir = provider.lookup().path.unwrap_or_default();
        join_under(&dir, format!("{name}{ext}"))
    }

    /// Lazily yields candidates in priority order. Providers are looked up
    /// only when the iteration reaches them.
    fn probes(&self) -> impl Iterator<Item = Found> + '_ {
        let exact = self.exacts.iter().map(|path| Found {
            path: path.clone(),
            ext: ext_of(path),
            dir_desc: EXACT_DESC.to_string(),
        });

        let combined = self.dirs.iter().flat_map(move |provider| {
            let DirLookup { path, desc } = provider.lookup();
            if path.is_none() {
                tracing::debug!(desc = %desc, "search directory unavailable, skipping");
            }
            path.into_iter()
                .flat_map(move |dir| self.combinations(dir, desc.clone()))
        });

        exact.chain(combined)
    }

    fn combinations(
        &self,
        dir: PathBuf,
        desc: Cow<'static, str>,
    ) -> impl Iterator<Item = Found> + '_ {
        self.names.iter().flat_map(move |name| {
            let dir = dir.clone();
            let desc = desc.clone();
            self.exts.iter().map(move |ext| Found {
                path: join_under(&dir, format!("{name}{ext}")),
                ext: ext.clone(),
                dir_desc: desc.to_string(),
            })
        })
    }
}

/// Whether `path` exists and is not a directory. Symlinks are followed, so a
/// dangling link does not count.
fn is_file(path: &Path) -> bool {
    matches!(std::fs::metadata(path), Ok(meta) if !meta.is_dir())
}

/// The suffix of the final path segment starting at its last `.`, or an
/// empty string.
fn ext_of(path: &Path) -> String {
    let s = path.as_os_str().to_string_lossy();
    let file = s.rsplit(std::path::is_separator).next().unwrap_or("");
    file.rfind('.')
        .map(|i| file[i..].to_string())
        .unwrap_or_default()
}
