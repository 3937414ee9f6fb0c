//! Binary dump format of the solver.
//!
//! ```text
//! u32  u32    f32  f32  f32    f32  f32  f32    ...  f32  f32  f32
//! jmax imax   x[0] y[0] u[0]   x[1] y[1] u[1]   ...  x[K] y[K] u[K]
//! ```
//!
//! with `K = jmax * imax - 1` and point `k = j * imax + i`, i.e. `i` varies
//! fastest. All values are little endian.

#[cfg(test)]
#[path = "./binary_test.rs"]
mod binary_test;

use crate::consts::{HEADER_BYTES, RECORD_BYTES, RECORD_VALUES};
use crate::errors::*;
use crate::mesh::{FieldDump, RectilinearGrid};
use ndarray::{Array, Array2, ArrayView2};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Number of bytes a dump of `jmax x imax` points occupies, `None` if that
/// does not fit into `u64`.
pub fn dump_len(jmax: u32, imax: u32) -> Option<u64> {
    u64::from(jmax)
        .checked_mul(u64::from(imax))?
        .checked_mul(RECORD_BYTES)?
        .checked_add(HEADER_BYTES)
}

fn read_u32(b: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&b[..4]);
    u32::from_le_bytes(word)
}

fn read_f32(b: &[u8]) -> f32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&b[..4]);
    f32::from_le_bytes(word)
}

/// Extracts every third value starting at `offset` and reshapes it to
/// `(jmax, imax)`.
fn component(records: ArrayView2<f32>, offset: usize, shape: (usize, usize)) -> Result<Array2<f32>> {
    Array::from_shape_vec(shape, records.slice(s![.., offset]).to_vec())
        .chain_err(|| format!("Cannot reshape record component {} to {:?}.", offset, shape))
}

/// Parses a complete dump held in memory.
///
/// Fails with `MalformedDump` unless the buffer is exactly
/// `8 + 12 * jmax * imax` bytes long.
pub fn parse_dump(bytes: &[u8]) -> Result<FieldDump> {
    let actual = bytes.len() as u64;

    if actual < HEADER_BYTES {
        bail!(ErrorKind::MalformedDump(HEADER_BYTES, actual));
    }

    let jmax = read_u32(&bytes[0..4]);
    let imax = read_u32(&bytes[4..8]);

    let expected = match dump_len(jmax, imax) {
        Some(n) => n,
        None => bail!(ErrorKind::MalformedDump(u64::max_value(), actual)),
    };

    if actual != expected {
        bail!(ErrorKind::MalformedDump(expected, actual));
    }

    let shape = (jmax as usize, imax as usize);
    let n = shape.0 * shape.1;

    let values: Vec<f32> = bytes[HEADER_BYTES as usize..]
        .chunks_exact(4)
        .map(read_f32)
        .collect();

    let records = Array::from_shape_vec((n, RECORD_VALUES), values)
        .chain_err(|| "Cannot arrange dump values into (x, y, u) records.")?;

    let x = component(records.view(), 0, shape)?;
    let y = component(records.view(), 1, shape)?;
    let u = component(records.view(), 2, shape)?;

    debug!("Parsed dump with jmax = {}, imax = {}", jmax, imax);

    FieldDump::new(RectilinearGrid::new(x, y)?, u)
}

/// Reads the whole file at `path` and parses it. The file is closed before
/// parsing starts.
pub fn read_dump(path: &Path) -> Result<FieldDump> {
    let bytes = {
        let mut f = File::open(path)
            .chain_err(|| format!("Unable to open file '{}'.", path.display()))?;

        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)
            .chain_err(|| format!("Unable to read file '{}'.", path.display()))?;
        bytes
    };

    info!("Read {} bytes from '{}'", bytes.len(), path.display());

    parse_dump(&bytes)
}

/// Serializes `dump` into the binary layout.
pub fn encode_dump(dump: &FieldDump) -> Result<Vec<u8>> {
    let gs = dump.size();

    let jmax = u32::try_from(gs.rows)
        .chain_err(|| format!("Row count {} does not fit the dump header.", gs.rows))?;
    let imax = u32::try_from(gs.columns)
        .chain_err(|| format!("Column count {} does not fit the dump header.", gs.columns))?;

    let len = dump_len(jmax, imax).ok_or("Dump size exceeds the addressable range.")?;
    let mut bytes = Vec::with_capacity(len as usize);

    bytes.extend_from_slice(&jmax.to_le_bytes());
    bytes.extend_from_slice(&imax.to_le_bytes());

    let points = dump
        .grid
        .x()
        .iter()
        .zip(dump.grid.y().iter())
        .zip(dump.u.iter());

    for ((x, y), u) in points {
        bytes.extend_from_slice(&x.to_le_bytes());
        bytes.extend_from_slice(&y.to_le_bytes());
        bytes.extend_from_slice(&u.to_le_bytes());
    }

    Ok(bytes)
}

/// Writes `dump` to `path`, replacing an existing file.
pub fn write_dump(path: &Path, dump: &FieldDump) -> Result<()> {
    let bytes = encode_dump(dump)?;

    let f = File::create(path)
        .chain_err(|| format!("Unable to create file '{}'.", path.display()))?;
    let mut w = BufWriter::new(f);

    w.write_all(&bytes)
        .and_then(|_| w.flush())
        .chain_err(|| format!("Unable to write dump to '{}'.", path.display()))?;

    info!("Wrote {} bytes to '{}'", bytes.len(), path.display());

    Ok(())
}
