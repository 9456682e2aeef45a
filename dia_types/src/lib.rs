mod annotated;
mod attribute;
mod dia_type;
pub mod store;
mod value;

pub use annotated::*;
pub use attribute::*;
pub use dia_type::*;
pub use value::*;
