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
//! This modules defines the topology operations that can be performed on a design.
//!
//! The functions that apply these operations take a mutable reference to the design that they are
//! modifying. Every target position is checked before the design is modified, so an operation that
//! returns an error leaves the design untouched.
//!
//! Most operations are applied periodically, at the bases described by a [`Repeat`].

use super::{Design, DesignError, Nucl, Parity, Side, StrandKind};
use ahash::AHashSet;

/// The bases `start`, `start + step`, ..., `start + (num - 1) * step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repeat {
    pub start: usize,
    pub step: usize,
    pub num: usize,
}

impl Repeat {
    pub fn new(start: usize, step: usize, num: usize) -> Self {
        Self { start, step, num }
    }

    /// A single base.
    pub fn once(base: usize) -> Self {
        Self {
            start: base,
            step: 1,
            num: 1,
        }
    }

    pub fn bases(&self) -> impl Iterator<Item = usize> {
        let Repeat { start, step, num } = *self;
        (0..num).map(move |i| start.saturating_add(i.saturating_mul(step)))
    }
}

/// The side on which a staple makes a crossover. `___|` is right and `|___` is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XoverSide {
    Left,
    Right,
}

/// Check that all the bases of `repeat` exist on `helix`.
fn checked_bases(design: &Design, helix: usize, repeat: &Repeat) -> Result<Vec<usize>, DesignError> {
    let bases: Vec<usize> = repeat.bases().collect();
    for base in bases.iter() {
        design.check(Nucl::new(helix, *base))?;
    }
    Ok(bases)
}

/// Check that all the bases of `repeat` and their right neighbours exist on `helix`.
fn checked_pairs(design: &Design, helix: usize, repeat: &Repeat) -> Result<Vec<usize>, DesignError> {
    let bases = checked_bases(design, helix, repeat)?;
    for base in bases.iter() {
        design.check(Nucl::new(helix, *base).right())?;
    }
    Ok(bases)
}

/// Remove the staple crossovers leaving `helix` at the bases of `repeat`.
///
/// Only links to another helix are severed. A base whose link in the severed direction is missing
/// or stays on `helix` is left untouched.
pub fn remove_crossover(
    design: &mut Design,
    helix: usize,
    repeat: Repeat,
    side: XoverSide,
) -> Result<(), DesignError> {
    let parity = design.parity_of(helix)?;
    let bases = checked_bases(design, helix, &repeat)?;
    let severed = match (parity, side) {
        (Parity::Even, XoverSide::Left) | (Parity::Odd, XoverSide::Right) => Side::Next,
        _ => Side::Prev,
    };
    for base in bases {
        let nucl = Nucl::new(helix, base);
        match design.linkage(StrandKind::Staple, nucl)?.get(severed) {
            Some(partner) if partner.helix != helix => {
                design.unlink(StrandKind::Staple, nucl, severed)?;
                log::debug!("removed crossover {} / {}", nucl, partner);
            }
            Some(partner) => log::warn!(
                "Link {} / {} is not a crossover, it is not removed",
                nucl,
                partner
            ),
            None => log::warn!("No staple crossover to remove at {}", nucl),
        }
    }
    Ok(())
}

fn break_strand(
    design: &mut Design,
    kind: StrandKind,
    helix: usize,
    repeat: Repeat,
) -> Result<(), DesignError> {
    let parity = design.parity_of(helix)?;
    let bases = checked_pairs(design, helix, &repeat)?;
    let (left_side, right_side) = if parity.goes_right(kind) {
        (Side::Next, Side::Prev)
    } else {
        (Side::Prev, Side::Next)
    };
    for base in bases {
        let nucl = Nucl::new(helix, base);
        design.unlink(kind, nucl, left_side)?;
        design.unlink(kind, nucl.right(), right_side)?;
        log::debug!("{} break between {} and {}", kind, nucl, nucl.right());
    }
    Ok(())
}

/// Split the staple strands between each base of `repeat` and its right neighbour.
pub fn insert_break(design: &mut Design, helix: usize, repeat: Repeat) -> Result<(), DesignError> {
    break_strand(design, StrandKind::Staple, helix, repeat)
}

/// Split the scaffold strand between each base of `repeat` and its right neighbour.
pub fn insert_scaff_break(
    design: &mut Design,
    helix: usize,
    repeat: Repeat,
) -> Result<(), DesignError> {
    break_strand(design, StrandKind::Scaffold, helix, repeat)
}

/// Link each base of `repeat` to its right neighbour on the staple strand. This is the inverse
/// of [`insert_break`].
pub fn join_staple(design: &mut Design, helix: usize, repeat: Repeat) -> Result<(), DesignError> {
    let parity = design.parity_of(helix)?;
    let bases = checked_pairs(design, helix, &repeat)?;
    for base in bases {
        let left = Nucl::new(helix, base);
        if parity.goes_right(StrandKind::Staple) {
            design.link(StrandKind::Staple, left, left.right())?;
        } else {
            design.link(StrandKind::Staple, left.right(), left)?;
        }
    }
    Ok(())
}

/// Remove the staples starting at the bases of `repeat`.
///
/// Staples are walked from the given base towards the increasing base numbers of `helix` (i.e.
/// following the `next` pointers on odd helices and the `prev` pointers on even helices) and
/// every visited position is cleared, up to and including the first position that has no
/// neighbour in the walking direction.
pub fn remove_staples(design: &mut Design, helix: usize, repeat: Repeat) -> Result<(), DesignError> {
    let onward = match design.parity_of(helix)? {
        Parity::Odd => Side::Next,
        Parity::Even => Side::Prev,
    };
    let bases = checked_bases(design, helix, &repeat)?;
    for base in bases {
        let mut visited = AHashSet::new();
        let mut current = Some(Nucl::new(helix, base));
        while let Some(nucl) = current.filter(|n| visited.insert(*n)) {
            current = design.linkage(StrandKind::Staple, nucl)?.get(onward);
            design.detach(StrandKind::Staple, nucl)?;
        }
        log::debug!(
            "removed {} staple positions from {}",
            visited.len(),
            Nucl::new(helix, base)
        );
    }
    Ok(())
}

/// Remove all the staples of the design.
pub fn remove_all_staples(design: &mut Design) {
    design.clear_strands(StrandKind::Staple);
    log::debug!("removed all staples");
}

/// Set a deletion at the bases of `repeat`, on every helix on which the scaffold goes through
/// the middle of the design.
///
/// On a square lattice this compensates for the undertwist of the helices.
pub fn insert_deletions(design: &mut Design, repeat: Repeat) -> Result<(), DesignError> {
    let middle = design.num_bases() / 2;
    let helices: Vec<usize> = design
        .helices()
        .filter(|h| {
            h.strand(StrandKind::Scaffold)
                .get(middle)
                .map(|l| !l.is_null())
                .unwrap_or(false)
        })
        .map(|h| h.id)
        .collect();
    let mut targets = Vec::new();
    for h in helices {
        for base in checked_bases(design, h, &repeat)? {
            targets.push(Nucl::new(h, base));
        }
    }
    for nucl in targets {
        design.set_skip(nucl, -1)?;
    }
    Ok(())
}

/// Create a scaffold crossover between `base` and `base + 1` of `up_helix` and `bot_helix`.
pub fn insert_scaff_crossover(
    design: &mut Design,
    up_helix: usize,
    bot_helix: usize,
    base: usize,
) -> Result<(), DesignError> {
    if up_helix == bot_helix {
        return Err(DesignError::SameHelix(up_helix));
    }
    let parity = design.parity_of(up_helix)?;
    checked_pairs(design, up_helix, &Repeat::once(base))?;
    checked_pairs(design, bot_helix, &Repeat::once(base))?;
    let up = Nucl::new(up_helix, base);
    let bot = Nucl::new(bot_helix, base);
    match parity {
        Parity::Odd => {
            design.link(StrandKind::Scaffold, bot, up)?;
            design.link(StrandKind::Scaffold, up.right(), bot.right())?;
        }
        Parity::Even => {
            design.link(StrandKind::Scaffold, up, bot)?;
            design.link(StrandKind::Scaffold, bot.right(), up.right())?;
        }
    }
    log::debug!("scaffold crossover {} / {}", up, bot);
    Ok(())
}

/// Link the staple positions `start` and `stop` of `helix`, whatever their previous neighbours.
///
/// On odd helices `stop` becomes the 5' neighbour of `start`, on even helices its 3' neighbour.
/// Links between different helices are made with [`Design::link`].
pub fn force_path(
    design: &mut Design,
    helix: usize,
    start: usize,
    stop: usize,
) -> Result<(), DesignError> {
    let start = Nucl::new(helix, start);
    let stop = Nucl::new(helix, stop);
    match design.parity_of(helix)? {
        Parity::Odd => design.link(StrandKind::Staple, stop, start),
        Parity::Even => design.link(StrandKind::Staple, start, stop),
    }
}
