//! Locate a configuration file by probing candidate directories, base names
//! and extensions in priority order.

mod error;
pub mod finder;

pub use error::Error;
pub use finder::options::{self, FinderOption};
pub use finder::provider::{self, DirLookup, DirProvider, EnvDirKind, Environment, SystemEnv};
pub use finder::{Finder, Found, EXACT_DESC};
