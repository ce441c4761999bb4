//! Minimal PDB coordinate reader.
//!
//! Only `ATOM`/`HETATM` records are read, using the fixed PDB columns for the
//! atom name (13-16) and the orthogonal coordinates (31-54). Every model in the
//! file contributes its atoms in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use nalgebra::Vector3;
use tracing::debug;
use crate::error::{Result, SamplerError};
use crate::systems::Chain;

/// One coordinate record from a PDB file.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub name: String,
    pub position: Vector3<f64>,
}

fn columns(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64> {
    let field = columns(line, start, end);
    field.parse::<f64>().map_err(|_| SamplerError::PdbParse {
        line: line_num,
        message: format!(
            "invalid coordinate in columns {}-{} (value: '{}')",
            start + 1,
            end,
            field
        ),
    })
}

/// Read every `ATOM`/`HETATM` record from `reader`.
pub fn read_pdb_atoms<R: BufRead>(reader: R) -> Result<Vec<PdbAtom>> {
    let mut atoms = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;
        let record = columns(&line, 0, 6);
        if record != "ATOM" && record != "HETATM" {
            continue;
        }
        if line.len() < 54 {
            return Err(SamplerError::PdbParse {
                line: line_num,
                message: "coordinate record is shorter than 54 columns".into(),
            });
        }
        let name = columns(&line, 12, 16).to_string();
        let position = Vector3::new(
            parse_coordinate(&line, line_num, 30, 38)?,
            parse_coordinate(&line, line_num, 38, 46)?,
            parse_coordinate(&line, line_num, 46, 54)?,
        );
        atoms.push(PdbAtom { name, position });
    }
    Ok(atoms)
}

pub fn read_pdb_file<P: AsRef<Path>>(path: P) -> Result<Vec<PdbAtom>> {
    let file = File::open(path.as_ref())?;
    let atoms = read_pdb_atoms(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), atoms = atoms.len(), "Read PDB coordinates.");
    Ok(atoms)
}

/// Keep only atoms called `name`, in their original order.
pub fn filter_by_name(atoms: &[PdbAtom], name: &str) -> Vec<PdbAtom> {
    atoms.iter().filter(|atom| atom.name == name).cloned().collect()
}

/// Chain of the atoms called `name`, one particle per matching record.
pub fn chain_from_atoms(atoms: &[PdbAtom], name: &str) -> Result<Chain> {
    let (labels, positions): (Vec<String>, Vec<Vector3<f64>>) = filter_by_name(atoms, name)
        .into_iter()
        .map(|atom| (atom.name, atom.position))
        .unzip();
    Chain::new(labels, positions)
}
