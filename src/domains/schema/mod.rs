//! Schema domain module.
//!
//! Converts explicit tool signature descriptors into JSON-Schema-shaped
//! input/output descriptors.
//!
//! ## Architecture
//!
//! - `types.rs` - Type tags, parameters, and signatures
//! - `mapper.rs` - Type descriptor to JSON-Schema fragment mapping
//! - `signature.rs` - Input/output schema generation from signatures

mod mapper;
mod signature;
mod types;

pub use mapper::schema_for;
pub use signature::{input_schema, output_schema};
pub use types::{Param, Signature, TypeTag};
