//! IO module - configuration and coordinate file handling.

mod config;
pub mod pdb;
pub mod xyz;

pub use config::{parse_config, read_config, RunConfig};
pub use pdb::{chain_from_atoms, filter_by_name, read_pdb_atoms, read_pdb_file, PdbAtom};
pub use xyz::{write_xyz, write_xyz_file};
