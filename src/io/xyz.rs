//! XYZ coordinate writer: a count line, a title line, then `label x y z`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use crate::error::Result;
use crate::systems::Chain;

pub fn write_xyz<W: Write>(chain: &Chain, title: &str, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", chain.len())?;
    writeln!(writer, "{}", title)?;
    for (label, p) in chain.labels().iter().zip(chain.positions()) {
        writeln!(writer, "{} {} {} {}", label, p.x, p.y, p.z)?;
    }
    Ok(())
}

pub fn write_xyz_file<P: AsRef<Path>>(chain: &Chain, title: &str, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_xyz(chain, title, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.as_ref().display(), particles = chain.len(), "Wrote XYZ file.");
    Ok(())
}
