//! Rule trees.
//!
//! A rule tree is a trie over the states of the neighbors of a cell,
//! with the next state of the cell at its leaves. It is read from a
//! plain-text `.tree` file:
//!
//! ```text
//! num_states=2
//! num_neighbors=8
//! num_nodes=32
//! 1 0 0
//! 2 0 0
//! ...
//! ```
//!
//! Each node line starts with the level of the node, followed by one
//! value for each state. The values of a level-1 node are states;
//! those of a higher node are earlier nodes one level below.

mod algo;

pub use algo::TreeRules;

use crate::{error::TreeError, states::State};
use std::{
    fmt::{self, Debug, Formatter},
    io::BufRead,
};

/// The built-in tree of `B3/S23`.
pub const DEFAULT_TREE: &[&str] = &[
    "num_states=2",
    "num_neighbors=8",
    "num_nodes=32",
    "1 0 0",
    "2 0 0",
    "1 0 1",
    "2 0 2",
    "3 1 3",
    "1 1 1",
    "2 2 5",
    "3 3 6",
    "4 4 7",
    "2 5 0",
    "3 6 9",
    "4 7 10",
    "5 8 11",
    "3 9 1",
    "4 10 13",
    "5 11 14",
    "6 12 15",
    "3 1 1",
    "4 13 17",
    "5 14 18",
    "6 15 19",
    "7 16 20",
    "4 17 17",
    "5 18 22",
    "6 19 23",
    "7 20 24",
    "8 21 25",
    "5 22 22",
    "6 23 27",
    "7 24 28",
    "8 25 29",
    "9 26 30",
];

/// Largest number of nodes a tree may declare.
const MAX_NODES: usize = 100_000_000;

/// Position of a node above level 1: among the branches of the tree
/// above level 2, among its twigs at level 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

/// Position of a level-1 node among the leaves of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeafIndex(usize);

/// A loaded rule tree.
#[derive(Clone, PartialEq, Eq)]
pub struct RuleTree {
    num_states: usize,
    num_neighbors: usize,
    num_nodes: usize,
    /// The values of the nodes above level 2.
    branches: Vec<NodeIndex>,
    /// The values of the level-2 nodes.
    twigs: Vec<LeafIndex>,
    /// The values of the level-1 nodes.
    leaves: Vec<State>,
    base: NodeIndex,
}

impl Debug for RuleTree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("RuleTree")
            .field("num_states", &self.num_states)
            .field("num_neighbors", &self.num_neighbors)
            .field("num_nodes", &self.num_nodes)
            .field("base", &self.base)
            .finish()
    }
}

/// The header fields, as far as they have been read.
#[derive(Clone, Copy, Debug, Default)]
struct Header {
    num_states: Option<i64>,
    num_neighbors: Option<i64>,
    num_nodes: Option<i64>,
}

impl Header {
    /// Reads a `key=value` line. Returns `false` if it is not a header.
    fn read(&mut self, line: &str) -> bool {
        let (key, value) = match line.find('=') {
            Some(pos) => (line[..pos].trim(), line[pos + 1..].trim()),
            None => return false,
        };
        let value = match value.parse::<i64>() {
            Ok(value) => value,
            Err(_) => return false,
        };
        let field = match key {
            "num_states" => &mut self.num_states,
            "num_neighbors" => &mut self.num_neighbors,
            "num_nodes" => &mut self.num_nodes,
            _ => return false,
        };
        *field = Some(value);
        true
    }

    /// Checks the header and returns `(num_states, num_neighbors, num_nodes)`.
    fn values(&self) -> Result<(usize, usize, usize), TreeError> {
        match (self.num_states, self.num_neighbors, self.num_nodes) {
            (Some(states), Some(neighbors), Some(nodes))
                if (2..=256).contains(&states)
                    && (neighbors == 4 || neighbors == 8)
                    && (neighbors..=MAX_NODES as i64).contains(&nodes) =>
            {
                Ok((states as usize, neighbors as usize, nodes as usize))
            }
            _ => Err(TreeError::BadBasicValues),
        }
    }
}

/// Builds a tree line by line, without touching any installed tree.
#[derive(Debug, Default)]
struct Loader {
    header: Header,
    line: usize,
    branches: Vec<NodeIndex>,
    twigs: Vec<LeafIndex>,
    leaves: Vec<State>,
    /// Offset and level of every node so far.
    nodes: Vec<(usize, usize)>,
}

impl Loader {
    fn read_line(&mut self, text: &str) -> Result<(), TreeError> {
        self.line += 1;
        let line = self.line;
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }
        if self.header.read(text) {
            if !self.nodes.is_empty() {
                return Err(TreeError::HeaderAfterNodes { line });
            }
            return Ok(());
        }

        let (num_states, num_neighbors, _) = self.header.values()?;

        let mut chars = text.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as usize)
            .filter(|&d| (1..=num_neighbors + 1).contains(&d))
            .ok_or(TreeError::BadLevel { line })?;
        let rest = chars.as_str();
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return Err(TreeError::BadLevel { line });
        }

        let mut values = Vec::with_capacity(num_states);
        for word in rest.split_whitespace() {
            if !word.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TreeError::BadValue { line });
            }
            values.push(word.parse::<usize>().unwrap_or(usize::MAX));
        }
        if values.len() != num_states {
            return Err(TreeError::BadValueCount {
                line,
                expected: num_states,
                found: values.len(),
            });
        }

        if level == 1 {
            self.leaves
                .try_reserve(num_states)
                .map_err(|_| TreeError::OutOfMemory)?;
            self.nodes.push((self.leaves.len(), level));
            for value in values {
                if value >= num_states {
                    return Err(TreeError::BadState { line });
                }
                self.leaves.push(State(value as u8));
            }
        } else {
            let mut children = Vec::with_capacity(num_states);
            for value in values {
                match self.nodes.get(value) {
                    Some(&(child, child_level)) if child_level == level - 1 => children.push(child),
                    _ => return Err(TreeError::BadNode { line }),
                }
            }
            let offset = if level == 2 {
                self.twigs
                    .try_reserve(num_states)
                    .map_err(|_| TreeError::OutOfMemory)?;
                let offset = self.twigs.len();
                self.twigs.extend(children.into_iter().map(LeafIndex));
                offset
            } else {
                self.branches
                    .try_reserve(num_states)
                    .map_err(|_| TreeError::OutOfMemory)?;
                let offset = self.branches.len();
                self.branches.extend(children.into_iter().map(NodeIndex));
                offset
            };
            self.nodes.push((offset, level));
        }
        Ok(())
    }

    fn finish(self) -> Result<RuleTree, TreeError> {
        let (num_states, num_neighbors, num_nodes) = self.header.values()?;
        let found = self.branches.len() + self.twigs.len() + self.leaves.len();
        let expected = num_nodes * num_states;
        if found != expected {
            return Err(TreeError::BadTotalCount { expected, found });
        }
        let (base, last_level) = self.nodes.last().copied().unwrap_or((0, 0));
        if last_level != num_neighbors + 1 {
            return Err(TreeError::WrongLastLevel {
                expected: num_neighbors + 1,
                found: last_level,
            });
        }
        let mut branches = self.branches;
        let mut twigs = self.twigs;
        let mut leaves = self.leaves;
        branches.shrink_to_fit();
        twigs.shrink_to_fit();
        leaves.shrink_to_fit();
        Ok(RuleTree {
            num_states,
            num_neighbors,
            num_nodes,
            branches,
            twigs,
            leaves,
            base: NodeIndex(base),
        })
    }
}

impl RuleTree {
    /// Reads a tree from lines of text.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loader = Loader::default();
        for line in lines {
            loader.read_line(line.as_ref())?;
        }
        loader.finish()
    }

    /// Reads a tree from a `.tree` file or any other reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TreeError> {
        let mut loader = Loader::default();
        for line in reader.lines() {
            let line = line.map_err(|e| TreeError::Io(e.to_string()))?;
            loader.read_line(&line)?;
        }
        loader.finish()
    }

    /// The built-in tree of `B3/S23`.
    pub fn default_life() -> Result<Self, TreeError> {
        Self::from_lines(DEFAULT_TREE)
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Number of neighbors, 4 or 8.
    pub fn num_neighbors(&self) -> usize {
        self.num_neighbors
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The root node.
    pub fn base(&self) -> NodeIndex {
        self.base
    }

    /// The child of a node above level 2 for the given state.
    #[inline]
    fn branch(&self, node: NodeIndex, state: State) -> NodeIndex {
        self.branches[node.0 + state.index()]
    }

    /// The level-1 child of a level-2 node for the given state.
    #[inline]
    fn twig(&self, node: NodeIndex, state: State) -> LeafIndex {
        self.twigs[node.0 + state.index()]
    }

    /// The value of a level-1 node for the given state.
    #[inline]
    fn leaf(&self, node: LeafIndex, state: State) -> State {
        self.leaves[node.0 + state.index()]
    }

    /// The next state of a cell.
    ///
    /// `cells` is the 3×3 block around the cell, row by row:
    /// `[nw, n, ne, w, c, e, sw, s, se]`. With 4 neighbors the
    /// corners are ignored. Every state must be below
    /// [`num_states`](Self::num_states).
    pub fn slowcalc(&self, cells: [State; 9]) -> State {
        let [nw, n, ne, w, c, e, sw, s, se] = cells;
        let moore = [nw, ne, sw, se, n, w, e];
        let keys = if self.num_neighbors == 4 {
            &moore[4..]
        } else {
            &moore[..]
        };
        let node = keys
            .iter()
            .fold(self.base, |node, &key| self.branch(node, key));
        self.leaf(self.twig(node, s), c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{ALIVE, DEAD};

    /// Von Neumann parity: the next state is the sum of `n`, `w`, `e`, `s`
    /// and `c`, modulo 2.
    fn parity_tree() -> Vec<String> {
        let mut lines = vec![
            String::from("# parity"),
            String::from("num_states=2"),
            String::from("num_neighbors=4"),
            String::from("num_nodes=9"),
        ];
        // Below the root, node 2k is "even so far" and node 2k+1 is "odd so far".
        lines.push(String::from("1 0 1"));
        lines.push(String::from("1 1 0"));
        for level in 2..=4 {
            let base = 2 * (level - 2);
            lines.push(format!("{} {} {}", level, base, base + 1));
            lines.push(format!("{} {} {}", level, base + 1, base));
        }
        lines.push(String::from("5 6 7"));
        lines
    }

    #[test]
    fn default_tree_loads() {
        let tree = RuleTree::default_life().unwrap();
        assert_eq!(tree.num_states(), 2);
        assert_eq!(tree.num_neighbors(), 8);
        assert_eq!(tree.num_nodes(), 32);
    }

    #[test]
    fn parity() {
        let tree = RuleTree::from_lines(parity_tree()).unwrap();
        assert_eq!(tree.num_neighbors(), 4);
        for i in 0..512usize {
            let cells = [0, 1, 2, 3, 4, 5, 6, 7, 8].map(|b| State::from(i >> b & 1 == 1));
            let expected = (i & 0b010_111_010).count_ones() % 2 == 1;
            assert_eq!(tree.slowcalc(cells), State::from(expected), "{:09b}", i);
        }
    }

    #[test]
    fn level_two_children_are_leaves() {
        let tree = RuleTree::from_lines(parity_tree()).unwrap();
        assert_eq!(tree.leaves.len(), 4);
        assert_eq!(tree.twigs, [LeafIndex(0), LeafIndex(2), LeafIndex(2), LeafIndex(0)]);
        assert_eq!(tree.branches.len(), 10);
        assert_eq!(tree.base, NodeIndex(8));
        assert_eq!(tree.branches[8..], [NodeIndex(4), NodeIndex(6)]);
    }

    #[test]
    fn reads_from_readers() {
        let text = parity_tree().join("\n");
        let tree = RuleTree::from_reader(text.as_bytes()).unwrap();
        assert_eq!(tree, RuleTree::from_lines(parity_tree()).unwrap());
        let cells = [DEAD, ALIVE, DEAD, DEAD, DEAD, DEAD, DEAD, DEAD, DEAD];
        assert_eq!(tree.slowcalc(cells), ALIVE);
    }

    #[test]
    fn header_values() {
        let with_header = |states: &str, neighbors: &str, nodes: &str| {
            let mut lines = vec![
                format!("num_states={}", states),
                format!("num_neighbors={}", neighbors),
                format!("num_nodes={}", nodes),
            ];
            lines.push(String::from("1 0 1"));
            RuleTree::from_lines(lines).unwrap_err()
        };
        assert_eq!(with_header("1", "8", "32"), TreeError::BadBasicValues);
        assert_eq!(with_header("257", "8", "32"), TreeError::BadBasicValues);
        assert_eq!(with_header("2", "6", "32"), TreeError::BadBasicValues);
        assert_eq!(with_header("2", "8", "7"), TreeError::BadBasicValues);
        assert_eq!(with_header("2", "8", "-1"), TreeError::BadBasicValues);
        assert_eq!(
            RuleTree::from_lines(&["1 0 1"]),
            Err(TreeError::BadBasicValues)
        );
    }

    #[test]
    fn bad_lines() {
        let load = |extra: &[&str]| {
            let mut lines = parity_tree();
            lines.truncate(4);
            lines.extend(extra.iter().map(|s| s.to_string()));
            RuleTree::from_lines(lines).unwrap_err()
        };
        assert_eq!(load(&["0 0 1"]), TreeError::BadLevel { line: 5 });
        assert_eq!(load(&["6 0 1"]), TreeError::BadLevel { line: 5 });
        assert_eq!(load(&["10 1"]), TreeError::BadLevel { line: 5 });
        assert_eq!(load(&["1 0 x"]), TreeError::BadValue { line: 5 });
        assert_eq!(load(&["1 0 -1"]), TreeError::BadValue { line: 5 });
        assert_eq!(load(&["1 0 2"]), TreeError::BadState { line: 5 });
        assert_eq!(
            load(&["1 0 1 1"]),
            TreeError::BadValueCount {
                line: 5,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(load(&["1 0 1", "2 0 1"]), TreeError::BadNode { line: 6 });
        assert_eq!(load(&["1 0 1", "3 0 0"]), TreeError::BadNode { line: 6 });
        assert_eq!(load(&["1 0 1", "2 0 0", "2 1 1"]), TreeError::BadNode { line: 7 });
        assert_eq!(
            load(&["1 0 1", "num_nodes=9"]),
            TreeError::HeaderAfterNodes { line: 6 }
        );
    }

    #[test]
    fn bad_totals() {
        let mut lines = parity_tree();
        lines.pop();
        assert_eq!(
            RuleTree::from_lines(&lines),
            Err(TreeError::BadTotalCount {
                expected: 18,
                found: 16
            })
        );

        let mut lines = parity_tree();
        lines.truncate(lines.len() - 2);
        lines[3] = String::from("num_nodes=7");
        assert_eq!(
            RuleTree::from_lines(&lines),
            Err(TreeError::WrongLastLevel {
                expected: 5,
                found: 4
            })
        );
    }
}
