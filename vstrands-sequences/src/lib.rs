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
//! Assignment of nucleotide sequences to the strands of a design.
//!
//! The scaffold strands of the design receive their sequence first: the longest one gets the
//! scaffold sequence provided by the user and the others take pre-computed segments from a
//! [`SegmentLibrary`]. Staples are then obtained by complementing the scaffold bases they are
//! paired to.
use std::fmt;

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod assign;
mod library;
mod nucleotides;
mod parameters;
mod report;

pub use assign::*;
pub use library::{SegmentCursor, SegmentLibrary};
pub use nucleotides::*;
pub use parameters::SequenceParameters;
pub use report::SHORT_SCAFFOLD_LENGTH;

use vstrands_design::DesignError;


#[derive(Debug)]
pub enum SequenceError {
    Design(DesignError),
    /// A sequence is shorter than the strand it is assigned to.
    InsufficientSequence { required: usize, available: usize },
    /// The library has no unused segment of this length left.
    LibraryExhausted { length: usize },
    InvalidNucleotide { character: char },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Design(e) => write!(f, "{}", e),
            Self::InsufficientSequence {
                required,
                available,
            } => write!(
                f,
                "Sequence only has {} bases, whereas {} bases are required",
                available, required
            ),
            Self::LibraryExhausted { length } => {
                write!(f, "No sequence of length {} left in the library", length)
            }
            Self::InvalidNucleotide { character } => {
                write!(f, "Invalid nucleotide {:?}", character)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "Json error: {}", e),
        }
    }
}

impl std::error::Error for SequenceError {}

impl From<DesignError> for SequenceError {
    fn from(e: DesignError) -> Self {
        Self::Design(e)
    }
}

impl From<std::io::Error> for SequenceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SequenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
