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
//! Staple annotations: discovery of the staples, length statistics and colors.
//!
//! Colors are attached to the 5' end of the staples, they are purely informative and are
//! recomputed from scratch by each coloring function.

use super::{Design, DesignError, Nucl, StrandKind};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, IntoEnumIterator};

/// The colors used to tag staples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Palette {
    #[strum(serialize = "red")]
    Red,
    #[strum(serialize = "red orange")]
    RedOrange,
    #[strum(serialize = "light orange")]
    LightOrange,
    #[strum(serialize = "olive")]
    Olive,
    #[strum(serialize = "light green")]
    LightGreen,
    #[strum(serialize = "dark green")]
    DarkGreen,
    #[strum(serialize = "cyan")]
    Cyan,
    #[strum(serialize = "blue")]
    Blue,
    #[strum(serialize = "purple")]
    Purple,
    #[strum(serialize = "magenta")]
    Magenta,
    #[strum(serialize = "dark gray")]
    DarkGray,
    #[strum(serialize = "light gray")]
    LightGray,
}

impl Palette {
    pub fn code(self) -> u32 {
        match self {
            Self::Red => 13369344,
            Self::RedOrange => 16204552,
            Self::LightOrange => 16225054,
            Self::Olive => 11184640,
            Self::LightGreen => 5749504,
            Self::DarkGreen => 29184,
            Self::Cyan => 243362,
            Self::Blue => 1507550,
            Self::Purple => 7536862,
            Self::Magenta => 12060012,
            Self::DarkGray => 3355443,
            Self::LightGray => 8947848,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::iter().find(|c| c.code() == code)
    }
}

/// The name of a color code, if it belongs to the palette.
pub fn color_name(code: u32) -> Option<String> {
    Palette::from_code(code).map(|c| c.to_string())
}

/// The color given to all staples by [`reset_color`].
pub const DEFAULT_STAPLE_COLOR: u32 = 8947848;

const COLOR_CYCLE: [Palette; 12] = [
    Palette::Red,
    Palette::Cyan,
    Palette::Blue,
    Palette::RedOrange,
    Palette::LightGray,
    Palette::Magenta,
    Palette::DarkGreen,
    Palette::LightGreen,
    Palette::Purple,
    Palette::DarkGray,
    Palette::Olive,
    Palette::LightOrange,
];

/// Boundaries of the staple length buckets used by [`color_based_on_length`].
pub const LENGTH_BINS: [usize; 7] = [0, 32, 40, 41, 47, 49, 1000];

/// The `i`-th color of the palette cycle.
pub fn color_cycle(i: usize) -> u32 {
    COLOR_CYCLE[i % COLOR_CYCLE.len()].code()
}

/// The index of the bucket of `length`, i.e. the number of boundaries of [`LENGTH_BINS`] that are
/// smaller or equal to `length`.
pub fn length_bucket(length: usize) -> usize {
    LENGTH_BINS.iter().filter(|b| **b <= length).count()
}

/// The 5' ends of all the staples.
pub fn find_staples(design: &Design) -> Vec<Nucl> {
    design.strand_starts(StrandKind::Staple)
}

/// The number of positions of a staple, identified by its 5' end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StapleLength {
    pub start: Nucl,
    pub length: usize,
}

pub fn staple_lengths(design: &Design) -> Result<Vec<StapleLength>, DesignError> {
    find_staples(design)
        .into_iter()
        .map(|start| {
            let path = design.trace_from(StrandKind::Staple, start)?;
            Ok(StapleLength {
                start,
                length: path.len(),
            })
        })
        .collect()
}

/// Map each staple length to the number of staples having this length.
pub fn length_histogram(design: &Design) -> Result<BTreeMap<usize, usize>, DesignError> {
    let mut ret = BTreeMap::new();
    for staple in staple_lengths(design)? {
        *ret.entry(staple.length).or_insert(0) += 1;
    }
    Ok(ret)
}

/// Remove all staple colors and give the default color to every staple.
pub fn reset_color(design: &mut Design) -> Result<(), DesignError> {
    design.clear_staple_colors();
    for start in find_staples(design) {
        design.set_staple_color(start, DEFAULT_STAPLE_COLOR)?;
    }
    Ok(())
}

/// Give the same color to all the staples starting on the same helix.
pub fn color_based_on_helix(design: &mut Design) -> Result<(), DesignError> {
    reset_color(design)?;
    for start in find_staples(design) {
        design.set_staple_color(start, color_cycle(start.helix))?;
    }
    Ok(())
}

/// Color the staples according to the bucket of their length.
pub fn color_based_on_length(design: &mut Design) -> Result<(), DesignError> {
    reset_color(design)?;
    for staple in staple_lengths(design)? {
        design.set_staple_color(staple.start, color_cycle(length_bucket(staple.length)))?;
    }
    Ok(())
}
