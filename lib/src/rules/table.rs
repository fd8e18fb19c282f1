//! Transition tables.
//!
//! A [`Table3x3`] gives the next state of a cell from its 3×3
//! neighborhood. It is compiled into a [`Table4x4`], which gives the
//! next states of the four center cells of a 4×4 block at once.

use std::{
    fmt::{self, Debug, Formatter},
    ops::Index,
};

/// Number of 3×3 neighborhoods.
pub const ALL_3X3: usize = 1 << 9;

/// Number of 4×4 blocks.
pub const ALL_4X4: usize = 1 << 16;

/// The center bit of a 9-bit neighborhood.
pub const CENTER: usize = 0x10;

/// Rotates a 9-bit neighborhood by 90° clockwise.
pub fn rotate90(x: usize) -> usize {
    (x & 0x4) << 6
        | (x & 0x20) << 2
        | (x & 0x100) >> 2
        | (x & 0x2) << 4
        | (x & 0x10)
        | (x & 0x80) >> 4
        | (x & 0x1) << 2
        | (x & 0x8) >> 2
        | (x & 0x40) >> 6
}

/// Reflects a 9-bit neighborhood, swapping the top and bottom rows.
pub fn flip(x: usize) -> usize {
    (x & 0x07) << 6 | (x & 0x1c0) >> 6 | (x & 0x38)
}

/// The next state of a cell for each of its 512 possible 3×3 neighborhoods.
///
/// Bit 4 (`0x10`) of the index is the cell itself; the other eight
/// bits are its neighbors. Bits 2 to 0 are the top row, left to right,
/// then bits 5 to 3 and bits 8 to 6.
#[derive(Clone, PartialEq, Eq)]
pub struct Table3x3([bool; ALL_3X3]);

impl Default for Table3x3 {
    fn default() -> Self {
        Table3x3([false; ALL_3X3])
    }
}

impl Debug for Table3x3 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("Table3x3(")?;
        for &alive in self.0.iter() {
            f.write_str(if alive { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

impl Index<usize> for Table3x3 {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &bool {
        &self.0[index]
    }
}

impl Table3x3 {
    /// An empty table, where every cell dies.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table of a Wolfram rule.
    ///
    /// A living cell always survives; a dead cell is born iff bit
    /// `i & 7` of `code` is set, where `i` is the neighborhood.
    pub fn wolfram(code: u8) -> Self {
        let mut table = Self::new();
        for (i, entry) in table.0.iter_mut().enumerate() {
            *entry = code & 1 << (i & 7) != 0 || i & CENTER != 0;
        }
        table
    }

    /// Sets every neighborhood where exactly `count` of the neighbors
    /// in `mask` are alive, with the cell itself dead for birth
    /// and alive for survival.
    pub(crate) fn set_totalistic(&mut self, count: u8, survival: bool, mask: usize) {
        let offset = if survival { CENTER } else { 0 };
        for i in (0..ALL_3X3).filter(|i| i & CENTER == 0) {
            if (i & mask).count_ones() == count as u32 {
                self.0[i | offset] = true;
            }
        }
    }

    /// Writes `alive` into the neighborhood `x` and all its rotations
    /// and reflections.
    pub(crate) fn set_symmetrical(&mut self, x: usize, alive: bool) {
        let mut y = x;
        for _ in 0..4 {
            self.0[y] = alive;
            y = rotate90(y);
        }
        y = flip(y);
        for _ in 0..4 {
            self.0[y] = alive;
            y = rotate90(y);
        }
    }

    /// Compiles the table into a lookup table for 4×4 blocks.
    ///
    /// Bits 15 to 0 of the block index are the cells of the block,
    /// row by row, starting from the top left. Each entry holds the
    /// next states of the four center cells:
    /// bit 5 for the top left one, bit 4 for the top right one,
    /// bit 1 for the bottom left one, and bit 0 for the bottom right one.
    pub fn to_4x4(&self) -> Box<Table4x4> {
        let mut map = Box::new(Table4x4([0; ALL_4X4]));
        for (i, entry) in map.0.iter_mut().enumerate() {
            let nw = self[(i & 0xe000) >> 13 | (i & 0x0e00) >> 6 | (i & 0x00e0) << 1];
            let ne = self[(i & 0x7000) >> 12 | (i & 0x0700) >> 5 | (i & 0x0070) << 2];
            let sw = self[(i & 0x0e00) >> 9 | (i & 0x00e0) >> 2 | (i & 0x000e) << 5];
            let se = self[(i & 0x0700) >> 8 | (i & 0x0070) >> 1 | (i & 0x0007) << 6];
            *entry = (nw as u8) << 5 | (ne as u8) << 4 | (sw as u8) << 1 | se as u8;
        }
        map
    }
}

/// The next states of the four center cells for each of the 65536
/// possible 4×4 blocks.
///
/// See [`Table3x3::to_4x4`] for the layout.
#[derive(Clone, PartialEq, Eq)]
pub struct Table4x4([u8; ALL_4X4]);

impl Debug for Table4x4 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Table4x4").finish()
    }
}

impl Index<usize> for Table4x4 {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl Table4x4 {
    /// The entry for a 4×4 block.
    #[inline]
    pub fn lookup(&self, block: u16) -> u8 {
        self.0[block as usize]
    }

    /// The whole table as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
