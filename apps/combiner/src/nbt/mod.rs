//! Structured data encoding.
//!
//! A [`Tag`] tree is built by the caller and rendered by [`encode`]. Leaves
//! carry their own formatting class, so encoding is a single exhaustive match.

pub mod encoder;
pub mod json;
pub mod quote;
pub mod tag;

pub use encoder::{encode, encode_into, encoded_len};
pub use json::from_json;
pub use quote::quote;
pub use tag::{Compound, DecimalKind, IntWidth, Quoting, Tag};
