use crate::DiaError;
use anyhow::{anyhow, Result};
use std::io::{self, ErrorKind, Read, Write};

fn map_eof(e: io::Error, what: &'static str) -> anyhow::Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        anyhow!(DiaError::Truncated(what))
    } else {
        anyhow!(e)
    }
}

pub fn read_byte(r: &mut impl Read, what: &'static str) -> Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf).map_err(|e| map_eof(e, what))?;
    Ok(buf[0])
}

/// Like [`read_byte`], but a stream that is already exhausted yields `None`.
pub fn read_byte_opt(r: &mut impl Read) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(anyhow!(e)),
        }
    }
}

pub fn read_array<const LEN: usize>(r: &mut impl Read, what: &'static str) -> Result<[u8; LEN]> {
    let mut buf = [0u8; LEN];
    r.read_exact(&mut buf).map_err(|e| map_eof(e, what))?;
    Ok(buf)
}

/// Reads exactly `len` bytes. The buffer grows with the data actually present,
/// so a corrupt huge `len` fails as truncation rather than as an allocation.
pub fn read_vec(r: &mut impl Read, len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = vec![];
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(anyhow!(DiaError::Truncated(what)));
    }
    Ok(buf)
}

/// Counts bytes consumed, so that callers can report the length of each value.
pub struct CountingReader<R> {
    inner: R,
    r_len: usize,
}
impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, r_len: 0 }
    }
    pub fn r_len(&self) -> usize {
        self.r_len
    }
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.r_len += n;
        Ok(n)
    }
}

/// Counts bytes produced.
pub struct CountingWriter<W> {
    inner: W,
    w_len: usize,
}
impl<W> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, w_len: 0 }
    }
    pub fn w_len(&self) -> usize {
        self.w_len
    }
    pub fn into_inner(self) -> W {
        self.inner
    }
}
impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.w_len += n;
        Ok(n)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
