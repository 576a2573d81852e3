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
//! Reading and writing designs in the cadnano 2 json format.
//!
//! In this format, each helix is a "virtual strand" whose scaffold and staple arrays hold, for
//! every base, the 4-tuple `[prev_helix, prev_base, next_helix, next_base]`. The pair `[-1, -1]`
//! means "no neighbour". Fields that are not used by this crate are kept untouched so that a
//! design can be loaded, edited and saved without loss.

use super::{Design, DesignError, Nucl, Side, StrandKind};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The pointer pair meaning "no neighbour".
const NULL_BP: [isize; 2] = [-1, -1];

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CadnanoDesign {
    pub vstrands: Vec<VStrand>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A helix, in cadnano's vocabulary.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VStrand {
    pub num: isize,
    pub row: isize,
    pub col: isize,
    pub scaf: Vec<[isize; 4]>,
    pub stap: Vec<[isize; 4]>,
    #[serde(rename = "loop")]
    pub loop_: Vec<isize>,
    pub skip: Vec<isize>,
    /// Pairs `[base, color]`, the base being the 5' end of a staple.
    #[serde(default)]
    pub stap_colors: Vec<[i64; 2]>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug)]
pub enum CadnanoError {
    Json(serde_json::Error),
    Io(std::io::Error),
    EmptyDesign,
    InconsistentLength {
        helix: isize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    InvalidPointer { helix: isize, base: usize },
    InvalidColor { helix: isize, entry: [i64; 2] },
    Design(DesignError),
}

impl fmt::Display for CadnanoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "Json error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::EmptyDesign => write!(f, "The design has no helix"),
            Self::InconsistentLength {
                helix,
                field,
                expected,
                actual,
            } => write!(
                f,
                "Field {} of helix {} has {} entries, expected {}",
                field, helix, actual, expected
            ),
            Self::InvalidPointer { helix, base } => {
                write!(f, "Invalid pointer at helix {} base {}", helix, base)
            }
            Self::InvalidColor { helix, entry } => {
                write!(f, "Invalid staple color {:?} on helix {}", entry, helix)
            }
            Self::Design(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CadnanoError {}

impl From<serde_json::Error> for CadnanoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for CadnanoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DesignError> for CadnanoError {
    fn from(e: DesignError) -> Self {
        Self::Design(e)
    }
}

impl CadnanoDesign {
    pub fn from_json_str(json: &str) -> Result<Self, CadnanoError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CadnanoError> {
        let json_str = std::fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    pub fn to_json_string(&self) -> Result<String, CadnanoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), CadnanoError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Replace the helices of `self` by those of `design`. Unknown fields of the helices that
    /// are still present are preserved.
    pub fn update_from(&mut self, design: &Design) {
        let mut old_fields: HashMap<isize, Map<String, Value>> = self
            .vstrands
            .drain(..)
            .map(|v| (v.num, v.other))
            .collect();
        self.vstrands = design
            .to_cadnano()
            .vstrands
            .into_iter()
            .map(|mut v| {
                v.other = old_fields.remove(&v.num).unwrap_or_default();
                v
            })
            .collect();
    }
}

fn decode(helix: isize, base: usize, pair: [isize; 2]) -> Result<Option<Nucl>, CadnanoError> {
    match pair {
        NULL_BP => Ok(None),
        [h, b] if h >= 0 && b >= 0 => Ok(Some(Nucl::new(h as usize, b as usize))),
        _ => Err(CadnanoError::InvalidPointer { helix, base }),
    }
}

fn encode(nucl: Option<Nucl>) -> [isize; 2] {
    nucl.map(|n| [n.helix as isize, n.base as isize])
        .unwrap_or(NULL_BP)
}

fn check_length(
    v: &VStrand,
    field: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), CadnanoError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CadnanoError::InconsistentLength {
            helix: v.num,
            field,
            expected,
            actual,
        })
    }
}

impl Design {
    /// Create a design from a cadnano file
    pub fn from_cadnano(nano: &CadnanoDesign) -> Result<Self, CadnanoError> {
        let num_bases = nano
            .vstrands
            .first()
            .ok_or(CadnanoError::EmptyDesign)?
            .scaf
            .len();
        let mut design = Design::new(num_bases);
        for v in nano.vstrands.iter() {
            if v.num < 0 {
                return Err(CadnanoError::InvalidPointer {
                    helix: v.num,
                    base: 0,
                });
            }
            check_length(v, "scaf", v.scaf.len(), num_bases)?;
            check_length(v, "stap", v.stap.len(), num_bases)?;
            check_length(v, "loop", v.loop_.len(), num_bases)?;
            check_length(v, "skip", v.skip.len(), num_bases)?;
            design.add_helix(v.num as usize, v.row, v.col)?;
        }

        for v in nano.vstrands.iter() {
            let helix = v.num as usize;
            for (kind, pointers) in [(StrandKind::Scaffold, &v.scaf), (StrandKind::Staple, &v.stap)] {
                for (base, p) in pointers.iter().enumerate() {
                    let nucl = Nucl::new(helix, base);
                    let prev = decode(v.num, base, [p[0], p[1]])?;
                    let next = decode(v.num, base, [p[2], p[3]])?;
                    design.set_link(kind, nucl, Side::Prev, prev)?;
                    design.set_link(kind, nucl, Side::Next, next)?;
                }
            }
            for base in 0..num_bases {
                let nucl = Nucl::new(helix, base);
                design.set_skip(nucl, v.skip[base])?;
                design.set_loop(nucl, v.loop_[base])?;
            }
            for entry in v.stap_colors.iter() {
                let [base, color] = *entry;
                if base < 0 || color < 0 || color > u32::MAX as i64 {
                    return Err(CadnanoError::InvalidColor {
                        helix: v.num,
                        entry: *entry,
                    });
                }
                design.set_staple_color(Nucl::new(helix, base as usize), color as u32)?;
            }
        }

        for kind in [StrandKind::Scaffold, StrandKind::Staple] {
            if let Err(e) = design.check_symmetry(kind) {
                log::warn!("Loaded design has inconsistent {} pointers: {}", kind, e);
            }
        }
        log::info!(
            "Loaded cadnano design with {} helices of {} bases",
            design.nb_helices(),
            num_bases
        );
        Ok(design)
    }

    /// Convert the design into a fresh cadnano design.
    pub fn to_cadnano(&self) -> CadnanoDesign {
        let vstrands = self
            .helices()
            .map(|h| {
                let convert = |kind: StrandKind| -> Vec<[isize; 4]> {
                    h.strand(kind)
                        .iter()
                        .map(|l| {
                            let [a, b] = encode(l.prev);
                            let [c, d] = encode(l.next);
                            [a, b, c, d]
                        })
                        .collect()
                };
                VStrand {
                    num: h.id as isize,
                    row: h.row,
                    col: h.col,
                    scaf: convert(StrandKind::Scaffold),
                    stap: convert(StrandKind::Staple),
                    loop_: h.loops().to_vec(),
                    skip: h.skips().to_vec(),
                    stap_colors: h
                        .stap_colors()
                        .map(|(base, color)| [*base as i64, *color as i64])
                        .collect(),
                    other: Map::new(),
                }
            })
            .collect();
        CadnanoDesign {
            vstrands,
            other: Map::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CadnanoError> {
        Self::from_cadnano(&CadnanoDesign::from_json_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CadnanoError> {
        Self::from_cadnano(&CadnanoDesign::from_file(path)?)
    }

    /// Write the design in a new cadnano file. Use [`CadnanoDesign::update_from`] to keep the
    /// unknown fields of an existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CadnanoError> {
        self.to_cadnano().write(path)
    }
}
