/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! This crate defines the lattice model of a DNA origami design.
//!
//! A design is a set of helices laid on a square lattice. Each helix is discretized into base
//! positions and every position of its scaffold and staple strands holds a pair of pointers to the
//! previous and next position of the strand. Strands are never stored: they are re-derived by
//! following these pointers (see [`Design::trace_all`]) after every modification.
//!
//! All modifications of the design are performed on a `Design` value, either through the linking
//! primitives of this module or through the operations of [`design_operations`].
use std::collections::BTreeMap;
use std::fmt;

#[macro_use]
extern crate serde_derive;
extern crate serde;

pub mod cadnano;
pub mod colors;
pub mod design_operations;
mod strands;
pub use strands::*;

#[cfg(test)]
mod tests;

/// A base position on a helix. The strand on which the position lies is given separately by a
/// [`StrandKind`].
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Nucl {
    pub helix: usize,
    pub base: usize,
}

impl Nucl {
    pub fn new(helix: usize, base: usize) -> Self {
        Self { helix, base }
    }

    /// The position with the next base number on the same helix.
    pub fn right(&self) -> Self {
        Self {
            base: self.base + 1,
            ..*self
        }
    }

    pub fn left(&self) -> Option<Self> {
        Some(Self {
            base: self.base.checked_sub(1)?,
            ..*self
        })
    }
}

impl fmt::Display for Nucl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.helix, self.base)
    }
}

/// The two strands of a helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrandKind {
    Scaffold,
    Staple,
}

impl fmt::Display for StrandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scaffold => write!(f, "scaf"),
            Self::Staple => write!(f, "stap"),
        }
    }
}

/// One of the two pointers of a base position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Prev,
    Next,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }
}

/// The parity `(row + col) mod 2` of a helix.
///
/// On even helices, staple strands go towards decreasing base numbers and the scaffold towards
/// increasing base numbers. It is the opposite on odd helices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn from_coordinates(row: isize, col: isize) -> Self {
        if (row + col).rem_euclid(2) == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    /// True if the strand of kind `kind` goes towards increasing base numbers on helices of this
    /// parity.
    pub fn goes_right(self, kind: StrandKind) -> bool {
        matches!(
            (self, kind),
            (Self::Even, StrandKind::Scaffold) | (Self::Odd, StrandKind::Staple)
        )
    }
}

/// The two pointers stored at a base position. `None` means that the strand has no neighbour in
/// that direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linkage {
    pub prev: Option<Nucl>,
    pub next: Option<Nucl>,
}

impl Linkage {
    pub const NULL: Linkage = Linkage {
        prev: None,
        next: None,
    };

    pub fn is_null(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }

    pub fn get(&self, side: Side) -> Option<Nucl> {
        match side {
            Side::Prev => self.prev,
            Side::Next => self.next,
        }
    }

    pub fn set(&mut self, side: Side, target: Option<Nucl>) {
        match side {
            Side::Prev => self.prev = target,
            Side::Next => self.next = target,
        }
    }
}

/// A snapshot of one base position of one strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasePosition {
    pub prev: Option<Nucl>,
    pub next: Option<Nucl>,
    /// Number of deletions at this position, `-1` removes the base.
    pub skip: isize,
    /// Number of bases inserted at this position.
    pub loop_: isize,
    /// Color tag, only set on staple strands.
    pub color: Option<u32>,
}

impl BasePosition {
    /// The number of bases represented by this position.
    pub fn length(&self) -> usize {
        (1 + self.skip + self.loop_).max(0) as usize
    }
}

/// One row of the lattice.
#[derive(Clone, Debug)]
pub struct Helix {
    pub id: usize,
    pub row: isize,
    pub col: isize,
    scaf: Vec<Linkage>,
    stap: Vec<Linkage>,
    skip: Vec<isize>,
    loops: Vec<isize>,
    /// Colors attached to the staple strands, keyed by the base number of their 5' end.
    stap_colors: BTreeMap<usize, u32>,
}

impl Helix {
    fn new(id: usize, row: isize, col: isize, num_bases: usize) -> Self {
        Self {
            id,
            row,
            col,
            scaf: vec![Linkage::NULL; num_bases],
            stap: vec![Linkage::NULL; num_bases],
            skip: vec![0; num_bases],
            loops: vec![0; num_bases],
            stap_colors: BTreeMap::new(),
        }
    }

    pub fn parity(&self) -> Parity {
        Parity::from_coordinates(self.row, self.col)
    }

    pub fn strand(&self, kind: StrandKind) -> &[Linkage] {
        match kind {
            StrandKind::Scaffold => &self.scaf,
            StrandKind::Staple => &self.stap,
        }
    }

    fn strand_mut(&mut self, kind: StrandKind) -> &mut [Linkage] {
        match kind {
            StrandKind::Scaffold => &mut self.scaf,
            StrandKind::Staple => &mut self.stap,
        }
    }

    pub fn skip(&self, base: usize) -> Option<isize> {
        self.skip.get(base).cloned()
    }

    pub fn loop_len(&self, base: usize) -> Option<isize> {
        self.loops.get(base).cloned()
    }

    pub fn skips(&self) -> &[isize] {
        &self.skip
    }

    pub fn loops(&self) -> &[isize] {
        &self.loops
    }

    pub fn stap_colors(&self) -> impl Iterator<Item = (&usize, &u32)> {
        self.stap_colors.iter()
    }
}

#[derive(Debug)]
pub enum DesignError {
    OutOfRange {
        helix: usize,
        base: usize,
        num_bases: usize,
    },
    UnknownHelix(usize),
    /// A strand that goes back to a position it already visited.
    MalformedStrand { helix: usize, base: usize },
    AsymmetricLink { from: Nucl, to: Nucl },
    SelfLink(Nucl),
    SameHelix(usize),
    DuplicateHelix(usize),
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                helix,
                base,
                num_bases,
            } => write!(
                f,
                "Base {} of helix {} is out of range, helices have {} bases",
                base, helix, num_bases
            ),
            Self::UnknownHelix(h) => write!(f, "Helix {} does not exist", h),
            Self::MalformedStrand { helix, base } => write!(
                f,
                "Strand going through helix {} base {} does not terminate",
                helix, base
            ),
            Self::AsymmetricLink { from, to } => write!(
                f,
                "Position {} points to {} which does not point back",
                from, to
            ),
            Self::SelfLink(nucl) => write!(f, "Cannot link position {} to itself", nucl),
            Self::SameHelix(h) => write!(f, "Expected two different helices, got {} twice", h),
            Self::DuplicateHelix(h) => write!(f, "Helix {} is already in the design", h),
        }
    }
}

impl std::error::Error for DesignError {}

/// A lattice design.
///
/// All helices have the same number of bases. Helices are kept in insertion order, which is the
/// order in which strands are traced.
#[derive(Clone, Debug, Default)]
pub struct Design {
    helices: Vec<Helix>,
    /// Maps helix identifiers to their index in `helices`.
    idx: BTreeMap<usize, usize>,
    num_bases: usize,
}

impl Design {
    pub fn new(num_bases: usize) -> Self {
        Self {
            helices: Vec::new(),
            idx: BTreeMap::new(),
            num_bases,
        }
    }

    /// Add an empty helix at lattice position (`row`, `col`).
    pub fn add_helix(&mut self, id: usize, row: isize, col: isize) -> Result<(), DesignError> {
        if self.idx.contains_key(&id) {
            return Err(DesignError::DuplicateHelix(id));
        }
        self.idx.insert(id, self.helices.len());
        self.helices.push(Helix::new(id, row, col, self.num_bases));
        Ok(())
    }

    pub fn num_bases(&self) -> usize {
        self.num_bases
    }

    pub fn nb_helices(&self) -> usize {
        self.helices.len()
    }

    /// The helix identifiers, in storage order.
    pub fn helix_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.helices.iter().map(|h| h.id)
    }

    pub fn helices(&self) -> impl Iterator<Item = &Helix> {
        self.helices.iter()
    }

    pub fn helix(&self, id: usize) -> Result<&Helix, DesignError> {
        self.idx
            .get(&id)
            .map(|i| &self.helices[*i])
            .ok_or(DesignError::UnknownHelix(id))
    }

    fn helix_mut(&mut self, id: usize) -> Result<&mut Helix, DesignError> {
        let i = *self.idx.get(&id).ok_or(DesignError::UnknownHelix(id))?;
        Ok(&mut self.helices[i])
    }

    pub fn parity_of(&self, helix: usize) -> Result<Parity, DesignError> {
        Ok(self.helix(helix)?.parity())
    }

    /// The parity of every helix.
    pub fn polarity(&self) -> BTreeMap<usize, Parity> {
        self.helices.iter().map(|h| (h.id, h.parity())).collect()
    }

    /// Return an error if `nucl` is not a position of the design.
    pub fn check(&self, nucl: Nucl) -> Result<(), DesignError> {
        self.helix(nucl.helix)?;
        if nucl.base < self.num_bases {
            Ok(())
        } else {
            Err(self.out_of_range(nucl))
        }
    }

    fn out_of_range(&self, nucl: Nucl) -> DesignError {
        DesignError::OutOfRange {
            helix: nucl.helix,
            base: nucl.base,
            num_bases: self.num_bases,
        }
    }

    pub fn linkage(&self, kind: StrandKind, nucl: Nucl) -> Result<Linkage, DesignError> {
        self.helix(nucl.helix)?
            .strand(kind)
            .get(nucl.base)
            .cloned()
            .ok_or_else(|| self.out_of_range(nucl))
    }

    fn linkage_mut(&mut self, kind: StrandKind, nucl: Nucl) -> Result<&mut Linkage, DesignError> {
        let error = self.out_of_range(nucl);
        self.helix_mut(nucl.helix)?
            .strand_mut(kind)
            .get_mut(nucl.base)
            .ok_or(error)
    }

    /// The state of one position. An unknown `helix` gives `UnknownHelix` rather than
    /// `OutOfRange`, which is reserved for base numbers outside `[0, num_bases)`.
    pub fn get_position(
        &self,
        helix: usize,
        base: usize,
        kind: StrandKind,
    ) -> Result<BasePosition, DesignError> {
        let nucl = Nucl::new(helix, base);
        let linkage = self.linkage(kind, nucl)?;
        let h = self.helix(helix)?;
        let color = match kind {
            StrandKind::Staple => h.stap_colors.get(&base).cloned(),
            StrandKind::Scaffold => None,
        };
        Ok(BasePosition {
            prev: linkage.prev,
            next: linkage.next,
            skip: h.skip[base],
            loop_: h.loops[base],
            color,
        })
    }

    pub fn is_linked(&self, kind: StrandKind, nucl: Nucl) -> Result<bool, DesignError> {
        Ok(!self.linkage(kind, nucl)?.is_null())
    }

    /// Set one pointer of `pos`.
    ///
    /// The value is stored as is, the pointer of `target` is not modified. Use [`Design::link`]
    /// and [`Design::unlink`] to keep the design consistent.
    pub fn set_link(
        &mut self,
        kind: StrandKind,
        pos: Nucl,
        side: Side,
        target: Option<Nucl>,
    ) -> Result<(), DesignError> {
        if let Some(target) = target {
            self.check(target)?;
        }
        self.linkage_mut(kind, pos)?.set(side, target);
        Ok(())
    }

    /// Make `to` the 3' neighbour of `from`.
    ///
    /// Former neighbours of `from` on its 3' side and of `to` on its 5' side are disconnected.
    pub fn link(&mut self, kind: StrandKind, from: Nucl, to: Nucl) -> Result<(), DesignError> {
        if from == to {
            return Err(DesignError::SelfLink(from));
        }
        self.check(from)?;
        self.check(to)?;
        self.unlink(kind, from, Side::Next)?;
        self.unlink(kind, to, Side::Prev)?;
        self.linkage_mut(kind, from)?.next = Some(to);
        self.linkage_mut(kind, to)?.prev = Some(from);
        log::trace!("{} link {} -> {}", kind, from, to);
        Ok(())
    }

    /// Clear the pointer of `pos` on side `side` as well as the reciprocal pointer of the
    /// position it designated. Return the former neighbour.
    pub fn unlink(
        &mut self,
        kind: StrandKind,
        pos: Nucl,
        side: Side,
    ) -> Result<Option<Nucl>, DesignError> {
        let linkage = self.linkage_mut(kind, pos)?;
        let partner = linkage.get(side);
        linkage.set(side, None);
        if let Some(partner) = partner {
            // The partner may not exist if the design was loaded from a corrupted file
            if let Ok(partner_linkage) = self.linkage_mut(kind, partner) {
                if partner_linkage.get(side.opposite()) == Some(pos) {
                    partner_linkage.set(side.opposite(), None);
                }
            }
        }
        Ok(partner)
    }

    /// Disconnect `pos` from both its neighbours.
    pub fn detach(&mut self, kind: StrandKind, pos: Nucl) -> Result<(), DesignError> {
        self.unlink(kind, pos, Side::Prev)?;
        self.unlink(kind, pos, Side::Next)?;
        Ok(())
    }

    /// Clear every pointer of the strands of kind `kind`.
    pub fn clear_strands(&mut self, kind: StrandKind) {
        for h in self.helices.iter_mut() {
            for linkage in h.strand_mut(kind).iter_mut() {
                *linkage = Linkage::NULL;
            }
        }
    }

    pub fn set_skip(&mut self, nucl: Nucl, skip: isize) -> Result<(), DesignError> {
        self.check(nucl)?;
        self.helix_mut(nucl.helix)?.skip[nucl.base] = skip;
        Ok(())
    }

    pub fn set_loop(&mut self, nucl: Nucl, loop_len: isize) -> Result<(), DesignError> {
        self.check(nucl)?;
        self.helix_mut(nucl.helix)?.loops[nucl.base] = loop_len;
        Ok(())
    }

    pub fn staple_color(&self, nucl: Nucl) -> Result<Option<u32>, DesignError> {
        self.check(nucl)?;
        Ok(self.helix(nucl.helix)?.stap_colors.get(&nucl.base).cloned())
    }

    pub fn set_staple_color(&mut self, nucl: Nucl, color: u32) -> Result<(), DesignError> {
        self.check(nucl)?;
        self.helix_mut(nucl.helix)?
            .stap_colors
            .insert(nucl.base, color);
        Ok(())
    }

    pub fn clear_staple_colors(&mut self) {
        for h in self.helices.iter_mut() {
            h.stap_colors.clear();
        }
    }

    /// Return an error describing the first pointer whose target does not point back.
    pub fn check_symmetry(&self, kind: StrandKind) -> Result<(), DesignError> {
        for h in self.helices.iter() {
            for (base, linkage) in h.strand(kind).iter().enumerate() {
                let from = Nucl::new(h.id, base);
                if let Some(to) = linkage.next {
                    if self.linkage(kind, to)?.prev != Some(from) {
                        return Err(DesignError::AsymmetricLink { from, to });
                    }
                }
                if let Some(to) = linkage.prev {
                    if self.linkage(kind, to)?.next != Some(from) {
                        return Err(DesignError::AsymmetricLink { from, to });
                    }
                }
            }
        }
        Ok(())
    }
}
