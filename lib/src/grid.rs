//! Bounded grids.
//!
//! A rule string may end with a bounded-grid suffix such as `:T100,200`.
//! Interpreting it is up to the universe the rule runs in.

/// A universe which can be bounded by a rule suffix.
pub trait GridSize {
    /// Bounds the grid as described by `suffix`, which starts with `:`.
    ///
    /// Returns the suffix to append to the canonical rule string,
    /// or `None` if the grid turns out to be unbounded.
    fn set_grid_size(&mut self, suffix: &str) -> Result<Option<String>, String>;

    /// Makes the grid unbounded.
    fn set_unbounded(&mut self);
}

/// A grid which keeps whatever suffix it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerbatimGrid {
    suffix: Option<String>,
}

impl VerbatimGrid {
    /// An unbounded grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current suffix, `None` if unbounded.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl GridSize for VerbatimGrid {
    fn set_grid_size(&mut self, suffix: &str) -> Result<Option<String>, String> {
        if suffix.trim_start_matches(':').trim().is_empty() {
            return Err(String::from("Missing grid size after colon."));
        }
        self.suffix = Some(suffix.to_owned());
        Ok(self.suffix.clone())
    }

    fn set_unbounded(&mut self) {
        self.suffix = None;
    }
}
