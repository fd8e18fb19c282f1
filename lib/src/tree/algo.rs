//! Installing rule trees by name.

use super::RuleTree;
use crate::{
    config::Config,
    error::{Error, TreeError},
    grid::GridSize,
    rules::DEFAULT_RULE,
};
use log::{debug, trace, warn};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Rule names must be shorter than this.
const MAX_RULE_LEN: usize = 2000;

/// Longer paths are skipped.
const MAX_PATH_LEN: usize = 4096;

/// Where a tree comes from.
enum Source {
    Default,
    File(PathBuf),
}

/// Keeps the current rule tree, replacing it only when a new one is
/// completely loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRules {
    name: String,
    tree: RuleTree,
}

impl TreeRules {
    /// An engine running the built-in `B3/S23` tree.
    pub fn new() -> Result<Self, TreeError> {
        Ok(TreeRules {
            name: String::from(DEFAULT_RULE),
            tree: RuleTree::default_life()?,
        })
    }

    /// Loads and installs the tree named `input`.
    ///
    /// `B3/S23`, `B3S23` and `23/3` name the built-in tree. Any other
    /// name is looked up as `<name>.tree` in the directories of
    /// `config`. Once the tree is loaded, a bounded-grid suffix is
    /// passed to `grid`. On error the previous tree stays installed.
    pub fn set_rule<G: GridSize + ?Sized>(
        &mut self,
        input: &str,
        grid: &mut G,
        config: &Config,
    ) -> Result<(), Error> {
        let (name, suffix) = match input.find(':') {
            Some(pos) => (&input[..pos], Some(&input[pos..])),
            None => (input, None),
        };

        let source = if is_default(name) {
            Source::Default
        } else {
            if name.len() >= MAX_RULE_LEN {
                return Err(TreeError::NameTooLong.into());
            }
            let path = config
                .rule_dirs()
                .find_map(|dir| tree_file(dir, name))
                .ok_or_else(|| TreeError::FileNotFound(name.to_owned()))?;
            Source::File(path)
        };

        let tree = match source {
            Source::Default => RuleTree::default_life()?,
            Source::File(path) => {
                let file = File::open(&path).map_err(|e| TreeError::Io(e.to_string()))?;
                RuleTree::from_reader(BufReader::new(file))?
            }
        };

        let bounds = match suffix {
            Some(suffix) => grid.set_grid_size(suffix).map_err(Error::GridSize)?,
            None => {
                grid.set_unbounded();
                None
            }
        };

        let mut canonical = name.to_owned();
        if let Some(bounds) = bounds {
            canonical.push_str(&bounds);
        }
        debug!(
            "Installed rule tree {} with {} states",
            canonical,
            tree.num_states()
        );
        self.name = canonical;
        self.tree = tree;
        Ok(())
    }

    /// The name of the current rule, with its bounded-grid suffix.
    pub fn get_rule(&self) -> &str {
        &self.name
    }

    /// The default rule name.
    pub fn default_rule(&self) -> &'static str {
        DEFAULT_RULE
    }

    /// Number of states of the current tree.
    pub fn num_cell_states(&self) -> usize {
        self.tree.num_states()
    }

    /// The current tree.
    pub fn tree(&self) -> &RuleTree {
        &self.tree
    }
}

/// Whether `name` is one of the names of the built-in tree.
fn is_default(name: &str) -> bool {
    name.eq_ignore_ascii_case("B3/S23") || name.eq_ignore_ascii_case("B3S23") || name == "23/3"
}

/// The `.tree` file for `name` in `dir`, if it exists.
fn tree_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let file_name = name.replace(&['/', '\\'][..], "_") + ".tree";
    let path = dir.join(file_name);
    if path.as_os_str().len() > MAX_PATH_LEN {
        warn!("Path too long: {}", path.display());
        return None;
    }
    trace!("Looking for {}", path.display());
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}
