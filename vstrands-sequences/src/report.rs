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
//! Text output of a sequence assignment.

use super::{ScaffoldRecord, SequenceAssignment};
use std::fmt::Write;

/// Scaffold strands shorter than this are listed in the report.
pub const SHORT_SCAFFOLD_LENGTH: usize = 100;

impl SequenceAssignment {
    /// The scaffold strands of less than [`SHORT_SCAFFOLD_LENGTH`] bases.
    pub fn short_scaffolds(&self) -> impl Iterator<Item = &ScaffoldRecord> {
        self.scaffolds
            .iter()
            .filter(|s| s.length < SHORT_SCAFFOLD_LENGTH)
    }

    pub fn nb_staple_bases(&self) -> usize {
        self.staples.iter().map(|s| s.length).sum()
    }

    /// The number of bases of the scaffold strands other than the main one.
    pub fn nb_short_scaffold_bases(&self) -> usize {
        self.scaffolds
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.primary)
            .map(|(_, s)| s.length)
            .sum()
    }

    /// One line per staple, then one line per short scaffold strand and the base counts.
    pub fn report(&self) -> String {
        let mut ret = String::new();
        for s in self.staples.iter() {
            writeln!(
                &mut ret,
                "{}\tstap strand\t{}\t{}mer\t{}\tstart\t{}\tend",
                s.sequence,
                s.color_name(),
                s.length,
                s.start,
                s.end
            )
            .unwrap_or_default();
        }
        for s in self.short_scaffolds() {
            writeln!(
                &mut ret,
                "{}\tshort scaf strand\t{}mer\t{}\tstart\t{}\tend",
                s.sequence, s.length, s.start, s.end
            )
            .unwrap_or_default();
        }
        writeln!(&mut ret, "number of stap bases is {}", self.nb_staple_bases())
            .unwrap_or_default();
        writeln!(
            &mut ret,
            "number of short scaf bases is {}",
            self.nb_short_scaffold_bases()
        )
        .unwrap_or_default();
        ret
    }

    /// The scaffold bases of each helix, one helix per line.
    pub fn helix_rows(&self) -> String {
        let mut ret = String::new();
        for h in self.helices().iter() {
            if let Some(row) = self.helix_row(*h) {
                writeln!(&mut ret, "{:02} {}", h, row).unwrap_or_default();
            }
        }
        ret
    }
}
