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

//! Strand tracing.
//!
//! Strands are not stored in the design. They are obtained by starting from every position that
//! has no 5' neighbour but a 3' neighbour and following the `next` pointers until a position
//! without 3' neighbour is reached.

use super::{Design, DesignError, Nucl, StrandKind};
use ahash::AHashSet;

/// The ordered list of positions of a strand, from its 5' end to its 3' end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrandPath {
    kind: StrandKind,
    positions: Vec<Nucl>,
}

impl StrandPath {
    pub fn kind(&self) -> StrandKind {
        self.kind
    }

    pub fn positions(&self) -> &[Nucl] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nucl> {
        self.positions.iter()
    }

    /// The 5' end of the strand.
    pub fn start(&self) -> Nucl {
        self.positions[0]
    }

    /// The 3' end of the strand.
    pub fn end(&self) -> Nucl {
        self.positions[self.positions.len() - 1]
    }

    /// The number of positions of the strand. Skips and loops are not taken into account.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Design {
    /// Return the 5' ends of all the strands of kind `kind`, helix by helix in storage order.
    pub fn strand_starts(&self, kind: StrandKind) -> Vec<Nucl> {
        let mut ret = Vec::new();
        for h in self.helices() {
            for (base, linkage) in h.strand(kind).iter().enumerate() {
                if linkage.prev.is_none() && linkage.next.is_some() {
                    ret.push(Nucl::new(h.id, base));
                }
            }
        }
        ret
    }

    /// Follow the `next` pointers from `start` until a position with no 3' neighbour.
    pub fn trace_from(&self, kind: StrandKind, start: Nucl) -> Result<StrandPath, DesignError> {
        let mut visited = AHashSet::new();
        let mut positions = Vec::new();
        let mut current = start;
        loop {
            let linkage = self.linkage(kind, current)?;
            if !visited.insert(current) {
                return Err(DesignError::MalformedStrand {
                    helix: current.helix,
                    base: current.base,
                });
            }
            positions.push(current);
            match linkage.next {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(StrandPath { kind, positions })
    }

    /// Decompose the strands of kind `kind` into paths.
    ///
    /// Circular strands have no 5' end and are not part of the result.
    pub fn trace_all(&self, kind: StrandKind) -> Result<Vec<StrandPath>, DesignError> {
        let mut ret = Vec::new();
        let mut nb_visited = 0;
        for start in self.strand_starts(kind) {
            let path = self.trace_from(kind, start)?;
            nb_visited += path.len();
            ret.push(path);
        }
        let nb_linked = self
            .helices()
            .map(|h| h.strand(kind).iter().filter(|l| !l.is_null()).count())
            .sum::<usize>();
        if nb_linked > nb_visited {
            log::warn!(
                "{} {} positions are linked but belong to no traced strand, the design may contain circular strands",
                nb_linked - nb_visited,
                kind
            );
        }
        log::debug!("traced {} {} strands", ret.len(), kind);
        Ok(ret)
    }
}
