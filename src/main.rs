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
//! Command line tool assigning sequences to the strands of a cadnano design.
//!
//! Usage: `vstrands <design.json> <scaffold.txt> <library.json> [parameters.json]`
//!
//! The scaffold bases of each helix are printed first, followed by the staple sequences. Set the
//! `RUST_LOG` environment variable to control the verbosity of the logs.

use std::env;
use std::fmt;
use std::path::PathBuf;

use vstrands_design::cadnano::CadnanoError;
use vstrands_design::Design;
use vstrands_sequences::{
    assign_sequences, read_scaffold, SegmentLibrary, SequenceError, SequenceParameters,
};

const USAGE: &str = "usage: vstrands <design.json> <scaffold.txt> <library.json> [parameters.json]";

#[derive(Debug)]
enum CliError {
    Usage,
    Cadnano(CadnanoError),
    Sequence(SequenceError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "{}", USAGE),
            Self::Cadnano(e) => write!(f, "Could not read design: {}", e),
            Self::Sequence(e) => write!(f, "Could not assign sequences: {}", e),
        }
    }
}

impl From<CadnanoError> for CliError {
    fn from(e: CadnanoError) -> Self {
        Self::Cadnano(e)
    }
}

impl From<SequenceError> for CliError {
    fn from(e: SequenceError) -> Self {
        Self::Sequence(e)
    }
}

struct Arguments {
    design: PathBuf,
    scaffold: PathBuf,
    library: PathBuf,
    parameters: Option<PathBuf>,
}

impl Arguments {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        match args {
            [_, design, scaffold, library, rest @ ..] if rest.len() <= 1 => Ok(Self {
                design: PathBuf::from(design),
                scaffold: PathBuf::from(scaffold),
                library: PathBuf::from(library),
                parameters: rest.first().map(PathBuf::from),
            }),
            _ => Err(CliError::Usage),
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let args = Arguments::parse(args)?;
    let parameters = match args.parameters.as_ref() {
        Some(path) => SequenceParameters::from_file(path)?,
        None => SequenceParameters::default(),
    };
    log::debug!("parameters {:?}", parameters);
    let design = Design::load(&args.design)?;
    let scaffold = read_scaffold(&args.scaffold)?;
    let library = SegmentLibrary::from_file(&args.library)?;
    let assignment = assign_sequences(&design, &scaffold, &library, &parameters)?;
    print!("{}", assignment.helix_rows());
    println!();
    print!("{}", assignment.report());
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
