use crate::bits::BitChunkedInt;
use crate::io_utils;
use anyhow::Result;
use std::io::{Read, Write};

/// Writes content of unknown total length as a chunk sequence.
///
/// Content is buffered up to `chunk_len` bytes at a time; each full buffer becomes one segment.
/// [`ChunkWriter::finish`] flushes the remainder and writes the zero-length terminator.
pub struct ChunkWriter<'w, W: Write> {
    w: &'w mut W,
    buf: Vec<u8>,
    chunk_len: usize,
    w_len: usize,
}

impl<'w, W: Write> ChunkWriter<'w, W> {
    pub fn new(w: &'w mut W, chunk_len: usize) -> Self {
        let chunk_len = chunk_len.max(1);
        Self {
            w,
            buf: Vec::with_capacity(chunk_len),
            chunk_len,
            w_len: 0,
        }
    }

    pub fn write(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let room = self.chunk_len - self.buf.len();
            let (head, tail) = data.split_at(room.min(data.len()));
            self.buf.extend_from_slice(head);
            data = tail;
            if self.buf.len() == self.chunk_len {
                self.flush_segment()?;
            }
        }
        Ok(())
    }

    fn flush_segment(&mut self) -> Result<()> {
        self.w_len += BitChunkedInt::from_usize(self.buf.len()).write_to(&mut self.w)?;
        self.w.write_all(&self.buf)?;
        self.w_len += self.buf.len();
        self.buf.clear();
        Ok(())
    }

    /// Returns the count of bytes written, terminator included.
    pub fn finish(mut self) -> Result<usize> {
        if !self.buf.is_empty() {
            self.flush_segment()?;
        }
        self.w_len += BitChunkedInt::default().write_to(&mut self.w)?;
        Ok(self.w_len)
    }
}

pub fn write_chunked<W: Write>(w: &mut W, data: &[u8], chunk_len: usize) -> Result<usize> {
    let mut cw = ChunkWriter::new(w, chunk_len);
    cw.write(data)?;
    cw.finish()
}

/// Reads segments up to the zero-length one, and concatenates them.
pub fn read_chunked<R: Read>(r: &mut R) -> Result<Vec<u8>> {
    let mut content = vec![];
    loop {
        let seg_len = BitChunkedInt::read_from(r)?.to_usize()?;
        if seg_len == 0 {
            return Ok(content);
        }
        let seg = io_utils::read_vec(r, seg_len, "a chunk-sequence segment")?;
        content.extend_from_slice(&seg);
    }
}
