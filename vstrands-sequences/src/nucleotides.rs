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
//! Nucleotide sequences manipulation.

use super::SequenceError;
use std::path::Path;

/// What to do with the characters of a sequence that are not nucleotides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NucleotidePolicy {
    /// Silently remove them.
    Drop,
    /// Fail with [`SequenceError::InvalidNucleotide`].
    Reject,
}

impl Default for NucleotidePolicy {
    fn default() -> Self {
        Self::Drop
    }
}

fn complement_base(c: char) -> Option<char> {
    match c.to_ascii_uppercase() {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

/// The reverse complement of `sequence`, in upper case.
pub fn complement(sequence: &str, policy: NucleotidePolicy) -> Result<String, SequenceError> {
    let mut ret = String::with_capacity(sequence.len());
    for c in sequence.chars().rev() {
        match (complement_base(c), policy) {
            (Some(comp), _) => ret.push(comp),
            (None, NucleotidePolicy::Drop) => (),
            (None, NucleotidePolicy::Reject) => {
                return Err(SequenceError::InvalidNucleotide { character: c })
            }
        }
    }
    Ok(ret)
}

/// Normalize a raw scaffold sequence and rotate it to the left by `offset` bases.
pub fn prepare_scaffold(
    raw: &str,
    offset: usize,
    policy: NucleotidePolicy,
) -> Result<String, SequenceError> {
    let normalized = complement(&complement(raw, policy)?, policy)?;
    // Sequences shorter than the offset are left as is. The sequence only contains ascii
    // characters at this point.
    let split = if offset < normalized.len() { offset } else { 0 };
    Ok(format!("{}{}", &normalized[split..], &normalized[..split]))
}

/// Read a scaffold sequence from a text file. White spaces are removed.
pub fn read_scaffold<P: AsRef<Path>>(path: P) -> Result<String, SequenceError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.chars().filter(|c| !c.is_whitespace()).collect())
}
