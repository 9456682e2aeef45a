//! Kind-specific payloads of scalar values.
//!
//! Every kind shares one preamble: header, then the attribute-set if Annotated.
//! What follows depends on the header alone:
//!
//! | Null | Custom | payload on the wire                  | decoded as              |
//! |------|--------|--------------------------------------|-------------------------|
//! | set  | any    | none                                 | the kind's null         |
//! | clear| clear  | none                                 | the kind's default      |
//! | clear| set    | per [`ScalarPayload::write_payload`] | the payload             |
//!
//! Containers and References need the session's tracker, and are coded in [`crate::session`].

mod bytes;
mod numeric;
mod temporal;

use crate::config::CodecConfig;
use crate::metadata::{CustomMetadata, TypeMetadata};
use anyhow::Result;
use dia_types::DiaType;
use std::io::{Read, Write};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PayloadState {
    Null,
    Default,
    Present,
}

impl From<&TypeMetadata> for PayloadState {
    fn from(meta: &TypeMetadata) -> Self {
        if meta.is_null() {
            PayloadState::Null
        } else if !meta.is_custom_flag_set() {
            PayloadState::Default
        } else {
            PayloadState::Present
        }
    }
}

pub trait ScalarPayload: Sized {
    /// Whether the header alone, with Custom clear, stands for this payload.
    fn is_default(&self) -> bool;

    fn default_payload() -> Self;

    /// CustomMetadata bytes chained onto the header when the payload is present.
    fn custom_metadata(&self) -> Vec<CustomMetadata> {
        vec![]
    }

    /// `dia_type` only labels errors.
    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        dia_type: DiaType,
        config: &CodecConfig,
    ) -> Result<usize>;

    fn read_payload<R: Read>(r: &mut R, meta: &TypeMetadata) -> Result<Self>;
}
