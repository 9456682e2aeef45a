//! One serialize or deserialize call, with the address bookkeeping and the
//! per-kind dispatch it needs.

mod codec_table;
mod reader;
mod writer;

use codec_table::*;
pub use reader::*;
pub use writer::*;
