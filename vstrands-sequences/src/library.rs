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
//! Pre-computed sequences for the scaffold strands that are not the main scaffold.

use super::SequenceError;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::path::Path;

/// Candidate sequences, grouped by length.
///
/// The library itself is never modified by an assignment. Segments are handed out in order by a
/// [`SegmentCursor`], so two strands never receive the same segment during one assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentLibrary {
    segments: BTreeMap<usize, Vec<String>>,
}

impl SegmentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment at the end of the candidates of its length.
    pub fn insert(&mut self, sequence: String) {
        self.segments
            .entry(sequence.chars().count())
            .or_default()
            .push(sequence);
    }

    /// The candidates registered for `length`.
    pub fn candidates(&self, length: usize) -> &[String] {
        self.segments
            .get(&length)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.keys().cloned()
    }

    /// Read a library from a json object of the form `{"<length>": ["SEQ", ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, SequenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SequenceError> {
        let json_str = std::fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    pub fn cursor(&self) -> SegmentCursor<'_> {
        SegmentCursor {
            library: self,
            used: AHashMap::new(),
        }
    }
}

impl From<BTreeMap<usize, Vec<String>>> for SegmentLibrary {
    fn from(segments: BTreeMap<usize, Vec<String>>) -> Self {
        Self { segments }
    }
}

/// Hands out the segments of a library, each one at most once.
pub struct SegmentCursor<'a> {
    library: &'a SegmentLibrary,
    /// Number of segments already taken, for each length.
    used: AHashMap<usize, usize>,
}

impl<'a> SegmentCursor<'a> {
    /// The first unused segment of length `length`.
    pub fn take(&mut self, length: usize) -> Result<&'a str, SequenceError> {
        let used = self.used.entry(length).or_insert(0);
        let segment = self
            .library
            .candidates(length)
            .get(*used)
            .ok_or(SequenceError::LibraryExhausted { length })?;
        *used += 1;
        Ok(segment.as_str())
    }

    pub fn remaining(&self, length: usize) -> usize {
        let used = self.used.get(&length).cloned().unwrap_or(0);
        self.library.candidates(length).len().saturating_sub(used)
    }
}
