//! Where to look for rule files.

use educe::Educe;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directories searched for `.tree` files.
///
/// The user directory, if any, is searched before the supplied one.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The user's own rules directory.
    pub user_rules: Option<PathBuf>,

    /// The rules directory supplied with the program.
    #[educe(Default(expression = "PathBuf::from(\"Rules\")"))]
    pub rules_dir: PathBuf,
}

impl Config {
    /// Sets up a new configuration with the default directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user's rules directory.
    pub fn set_user_rules<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.user_rules = Some(dir.into());
        self
    }

    /// Sets the supplied rules directory.
    pub fn set_rules_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.rules_dir = dir.into();
        self
    }

    /// The directories to search, in order.
    pub fn rule_dirs(&self) -> impl Iterator<Item = &Path> {
        self.user_rules
            .as_deref()
            .into_iter()
            .chain(Some(self.rules_dir.as_path()))
    }
}
