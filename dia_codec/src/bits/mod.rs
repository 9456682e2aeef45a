//! The two length encodings the payload codecs are built from.
//!
//! - [`BitChunkedInt`] is a self-terminating unsigned integer: 7 payload bits per byte,
//!   with the high bit set on every byte but the last.
//! - A chunk sequence carries raw content of unbounded length as length-prefixed segments,
//!   closed by a zero-length segment.
//!
//! ```text
//! bit-chunked 0      = [0x00]
//! bit-chunked 1      = [0x01]
//! bit-chunked 127    = [0xFF, 0x00]          // 7 significant bits: terminator appended
//! bit-chunked 128    = [0x80, 0x01]
//!
//! chunk sequence     = { segment_len: BitChunkedInt, segment: [u8; segment_len] }*
//!                      segment_len: BitChunkedInt = 0
//! ```

mod bit_chunked;
mod chunk_seq;

pub use bit_chunked::*;
pub use chunk_seq::*;
