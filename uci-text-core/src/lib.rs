//! Generic parsing and writing primitives for UCI-style configuration text.
//!
//! The grammar is line oriented: a `package <name>` header opens a package,
//! `config <type> '<name>'` opens a section, and `option`/`list` statements
//! attach single- or multi-valued fields to the current section. Sections
//! have no terminator; they end at the next `config` header or end of input.
//!
//! This crate knows nothing about any particular device domain. Callers that
//! need domain metadata (for example, keys that must stay multi-valued even
//! with one value) feed it in through [`ParseOptions`].

pub mod parser;
pub mod section;
pub mod writer;

pub use parser::{parse, ParseError, ParseOptions};
pub use section::{FieldValue, UciField, UciPackage, UciSection};
pub use writer::{render, CleanupPolicy};
