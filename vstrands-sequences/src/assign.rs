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

use super::{complement, prepare_scaffold, SegmentLibrary, SequenceError, SequenceParameters};
use std::collections::BTreeMap;
use vstrands_design::colors::color_name;
use vstrands_design::{Design, DesignError, Nucl, StrandKind, StrandPath};

/// The sequence assigned to a scaffold strand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaffoldRecord {
    /// Number of bases of `sequence`.
    pub length: usize,
    pub start: Nucl,
    pub end: Nucl,
    /// The bases paired to a position of the strand. Unpaired crossover loops are not included.
    pub sequence: String,
    /// Number of bases consumed on the sequence source, crossover loops included.
    pub required_length: usize,
    /// Number of unpaired bases at crossovers.
    pub loop_bases: usize,
}

/// The sequence assigned to a staple strand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StapleRecord {
    pub length: usize,
    pub start: Nucl,
    pub end: Nucl,
    pub sequence: String,
    /// The color attached to the 5' end of the staple.
    pub color: Option<u32>,
}

impl StapleRecord {
    /// Extend the 3' end of the staple with `linker` followed by `handle`.
    pub fn append_handle(&mut self, linker: &str, handle: &str) {
        self.sequence.push_str(linker);
        self.sequence.push_str(handle);
        self.length = self.sequence.chars().count();
    }

    /// The name of the color of the staple, its numerical code if it is not part of the palette
    /// or `"none"` for staples that have no color.
    pub fn color_name(&self) -> String {
        match self.color {
            Some(code) => color_name(code).unwrap_or_else(|| code.to_string()),
            None => String::from("none"),
        }
    }
}

/// The result of [`assign_sequences`].
#[derive(Clone, Debug)]
pub struct SequenceAssignment {
    /// In the order in which the scaffold strands are traced.
    pub scaffolds: Vec<ScaffoldRecord>,
    /// Sorted by color name.
    pub staples: Vec<StapleRecord>,
    pub(crate) primary: Option<usize>,
    scaffold_bases: BTreeMap<Nucl, String>,
    helices: Vec<usize>,
    num_bases: usize,
}

impl SequenceAssignment {
    /// The scaffold strand that received the main scaffold sequence.
    pub fn primary_scaffold(&self) -> Option<&ScaffoldRecord> {
        self.primary.and_then(|i| self.scaffolds.get(i))
    }

    /// The scaffold bases assigned to a position. Deleted bases are assigned an empty string.
    pub fn scaffold_base(&self, nucl: Nucl) -> Option<&str> {
        self.scaffold_bases.get(&nucl).map(|s| s.as_str())
    }

    /// The scaffold bases of all the positions of `helix`, `.` standing for positions without
    /// scaffold.
    pub fn helix_row(&self, helix: usize) -> Option<String> {
        if !self.helices.contains(&helix) {
            return None;
        }
        let mut ret = String::new();
        for base in 0..self.num_bases {
            ret.push_str(self.scaffold_base(Nucl::new(helix, base)).unwrap_or("."));
        }
        Some(ret)
    }

    /// The helix identifiers of the design, in storage order.
    pub fn helices(&self) -> &[usize] {
        &self.helices
    }

    /// Append `linker` and `handle` to every staple for which `filter` returns true. Return the
    /// number of modified staples.
    pub fn append_handles<F>(&mut self, filter: F, linker: &str, handle: &str) -> usize
    where
        F: Fn(&StapleRecord) -> bool,
    {
        let mut nb_modified = 0;
        for staple in self.staples.iter_mut().filter(|s| filter(s)) {
            staple.append_handle(linker, handle);
            nb_modified += 1;
        }
        nb_modified
    }
}

/// Base counts of a scaffold path.
struct ScaffoldLayout {
    required: usize,
    loop_bases: usize,
}

/// The number of bases represented by a position, and the number of crossover loop bases that
/// follow it.
fn position_lengths(
    design: &Design,
    nucl: Nucl,
    parameters: &SequenceParameters,
) -> Result<(usize, usize), DesignError> {
    let position = design.get_position(nucl.helix, nucl.base, StrandKind::Scaffold)?;
    let loop_bases = match position.next {
        Some(next) if next.helix != nucl.helix => parameters.crossover_loop_length(nucl),
        _ => 0,
    };
    Ok((position.length(), loop_bases))
}

fn layout(
    design: &Design,
    path: &StrandPath,
    parameters: &SequenceParameters,
) -> Result<ScaffoldLayout, DesignError> {
    let mut required = 0;
    let mut loop_bases = 0;
    for nucl in path.iter() {
        let (length, loop_length) = position_lengths(design, *nucl, parameters)?;
        required += length + loop_length;
        loop_bases += loop_length;
    }
    Ok(ScaffoldLayout {
        required,
        loop_bases,
    })
}

/// Distribute `sequence` on the positions of `path`. Return the concatenation of the bases given
/// to the positions.
fn distribute(
    design: &Design,
    path: &StrandPath,
    sequence: &str,
    required: usize,
    parameters: &SequenceParameters,
    scaffold_bases: &mut BTreeMap<Nucl, String>,
) -> Result<String, SequenceError> {
    let sequence: Vec<char> = sequence.chars().collect();
    if sequence.len() < required {
        return Err(SequenceError::InsufficientSequence {
            required,
            available: sequence.len(),
        });
    }
    let mut ret = String::new();
    let mut pointer = 0;
    for nucl in path.iter() {
        let (length, loop_length) = position_lengths(design, *nucl, parameters)?;
        let bases: String = sequence[pointer..pointer + length].iter().collect();
        ret.push_str(&bases);
        scaffold_bases.insert(*nucl, bases);
        pointer += length + loop_length;
    }
    Ok(ret)
}

/// The index of the first path among those with the most positions.
fn primary_index(paths: &[StrandPath]) -> Option<usize> {
    let mut ret: Option<usize> = None;
    for (i, p) in paths.iter().enumerate() {
        if ret.map(|r| p.len() > paths[r].len()).unwrap_or(true) {
            ret = Some(i);
        }
    }
    ret
}

/// Assign a sequence to every strand of the design.
///
/// The longest scaffold strand receives `scaffold`, after preparation by [`prepare_scaffold`].
/// The other scaffold strands receive segments of `library` whose length is the number of bases
/// that they require. Staples are the reverse complement of the scaffold bases that they are
/// paired to.
pub fn assign_sequences(
    design: &Design,
    scaffold: &str,
    library: &SegmentLibrary,
    parameters: &SequenceParameters,
) -> Result<SequenceAssignment, SequenceError> {
    let scaffold_paths = design.trace_all(StrandKind::Scaffold)?;
    let primary = primary_index(&scaffold_paths);
    let mut cursor = library.cursor();
    let mut scaffold_bases = BTreeMap::new();
    let mut scaffolds = Vec::with_capacity(scaffold_paths.len());

    for (i, path) in scaffold_paths.iter().enumerate() {
        let ScaffoldLayout {
            required,
            loop_bases,
        } = layout(design, path, parameters)?;
        let sequence = if Some(i) == primary {
            let prepared = prepare_scaffold(
                scaffold,
                parameters.scaffold_offset,
                parameters.nucleotide_policy,
            )?;
            log::info!(
                "The main scaffold requires {} bases, {} are available",
                required,
                prepared.chars().count()
            );
            distribute(
                design,
                path,
                &prepared,
                required,
                parameters,
                &mut scaffold_bases,
            )?
        } else {
            let segment = cursor.take(required)?;
            log::debug!(
                "Scaffold strand starting at {} takes a library segment of length {}",
                path.start(),
                required
            );
            distribute(
                design,
                path,
                segment,
                required,
                parameters,
                &mut scaffold_bases,
            )?
        };
        scaffolds.push(ScaffoldRecord {
            length: sequence.chars().count(),
            start: path.start(),
            end: path.end(),
            sequence,
            required_length: required,
            loop_bases,
        });
    }

    let mut staples = Vec::new();
    for path in design.trace_all(StrandKind::Staple)? {
        let mut sequence = String::new();
        for nucl in path.iter() {
            if let Some(bases) = scaffold_bases.get(nucl) {
                sequence.push_str(&complement(bases, parameters.nucleotide_policy)?);
            }
        }
        staples.push(StapleRecord {
            length: sequence.chars().count(),
            start: path.start(),
            end: path.end(),
            sequence,
            color: design.staple_color(path.start())?,
        });
    }
    staples.sort_by_key(|s| s.color_name());
    log::info!(
        "Assigned sequences to {} scaffold strands and {} staples",
        scaffolds.len(),
        staples.len()
    );

    Ok(SequenceAssignment {
        scaffolds,
        staples,
        primary,
        scaffold_bases,
        helices: design.helix_ids().collect(),
        num_bases: design.num_bases(),
    })
}
