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
//! Parameters of the sequence assignment.

use super::{NucleotidePolicy, SequenceError};
use std::path::Path;
use vstrands_design::Nucl;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceParameters {
    /// If false, scaffold crossovers never leave unpaired bases.
    pub square_lattice: bool,
    /// Number of unpaired scaffold bases at a crossover placed on a lattice point.
    pub on_lattice_loop_length: usize,
    /// Number of unpaired scaffold bases at a crossover placed off the lattice points.
    pub off_lattice_loop_length: usize,
    /// Scaffold positions after which no crossover loop is inserted.
    pub no_loop_exceptions: Vec<Nucl>,
    /// The scaffold sequence is rotated to the left by this number of bases before being used.
    pub scaffold_offset: usize,
    pub nucleotide_policy: NucleotidePolicy,
}

impl SequenceParameters {
    pub const DEFAULT: SequenceParameters = SequenceParameters {
        square_lattice: true,
        on_lattice_loop_length: 2,
        off_lattice_loop_length: 0,
        no_loop_exceptions: Vec::new(),
        scaffold_offset: 30,
        nucleotide_policy: NucleotidePolicy::Drop,
    };

    pub fn from_json_str(json: &str) -> Result<Self, SequenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SequenceError> {
        let json_str = std::fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    /// The number of unpaired scaffold bases inserted after `nucl`, assuming that the scaffold
    /// goes to another helix after `nucl`.
    ///
    /// The crossover is on a lattice point when `(base - helix mod 2) mod 8 == 7`. Only the parity
    /// of the helix identifier shifts the period, not the identifier itself.
    pub fn crossover_loop_length(&self, nucl: Nucl) -> usize {
        if !self.square_lattice || self.no_loop_exceptions.contains(&nucl) {
            0
        } else if (nucl.base as isize - (nucl.helix % 2) as isize).rem_euclid(8) == 7 {
            self.on_lattice_loop_length
        } else {
            self.off_lattice_loop_length
        }
    }
}

impl std::default::Default for SequenceParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
