use crate::bits::BitChunkedInt;
use crate::config::CodecConfig;
use crate::metadata::TypeMetadata;
use crate::payload::ScalarPayload;
use crate::{io_utils, text};
use anyhow::Result;
use dia_types::DiaType;
use std::io::{Read, Write};

/* Blob: BitChunkedInt length, then the raw bytes. */
impl ScalarPayload for Vec<u8> {
    fn is_default(&self) -> bool {
        self.is_empty()
    }
    fn default_payload() -> Self {
        vec![]
    }
    fn write_payload<W: Write>(&self, w: &mut W, _: DiaType, _: &CodecConfig) -> Result<usize> {
        let w_len = BitChunkedInt::from_usize(self.len()).write_to(w)?;
        w.write_all(self)?;
        Ok(w_len + self.len())
    }
    fn read_payload<R: Read>(r: &mut R, _: &TypeMetadata) -> Result<Self> {
        let len = BitChunkedInt::read_from(r)?.to_usize()?;
        io_utils::read_vec(r, len, "blob content")
    }
}

/* String and Symbol: UTF-16LE chunk sequence. */
impl ScalarPayload for String {
    fn is_default(&self) -> bool {
        self.is_empty()
    }
    fn default_payload() -> Self {
        String::new()
    }
    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        _: DiaType,
        config: &CodecConfig,
    ) -> Result<usize> {
        text::write_utf16(w, self, config.chunk_len)
    }
    fn read_payload<R: Read>(r: &mut R, meta: &TypeMetadata) -> Result<Self> {
        text::read_utf16(r, meta.dia_type())
    }
}
