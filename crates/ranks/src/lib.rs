//! Tiktoken-style BPE rank tables.
//!
//! The text format is one record per line, `<base64 token> <decimal rank>`,
//! for example:
//!
//! ```text
//! IQ== 0
//! Ig== 1
//! IyM= 2
//! ```
//!
//! [`parse()`] turns such text into a [`RankTable`]. The same format is used
//! whether the bytes came from the on-disk cache, the network or an embedded
//! resource.

pub mod error;
mod parse;
mod table;

pub use crate::parse::parse;
pub use crate::table::{Rank, RankTable};
