use crate::bits::{self, ChunkWriter};
use crate::DiaError;
use anyhow::{anyhow, Result};
use dia_types::DiaType;
use std::io::{Read, Write};

/// Writes `s` as UTF-16LE code units in a chunk sequence.
pub fn write_utf16<W: Write>(w: &mut W, s: &str, chunk_len: usize) -> Result<usize> {
    let mut cw = ChunkWriter::new(w, chunk_len);
    for unit in s.encode_utf16() {
        cw.write(&unit.to_le_bytes())?;
    }
    cw.finish()
}

/// Reads a chunk sequence of UTF-16LE code units. `kind` only labels errors.
pub fn read_utf16<R: Read>(r: &mut R, kind: DiaType) -> Result<String> {
    let bytes = bits::read_chunked(r)?;
    if bytes.len() % 2 != 0 {
        return Err(anyhow!(DiaError::MalformedPayload(
            kind,
            format!("odd UTF-16 byte length {}", bytes.len())
        )));
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect::<Vec<_>>();
    String::from_utf16(&units).map_err(|e| anyhow!(DiaError::MalformedPayload(kind, e.to_string())))
}
