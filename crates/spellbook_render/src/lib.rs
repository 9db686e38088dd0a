//! # Spellbook Render
//!
//! Printable output for spell records: a lightweight markup per spell and
//! its LaTeX conversion, plus full documents for a record set.
//!
//! ## Example
//!
//! ```rust
//! use spellbook_core::{Record, Value};
//! use spellbook_render::{PartSelection, spell_to_latex};
//!
//! let record = Record::from([
//!     ("nome".to_string(), Value::from("Luz")),
//!     ("name".to_string(), Value::from("Light")),
//!     ("nivel".to_string(), Value::Int(0)),
//! ]);
//!
//! let latex = spell_to_latex(&record, &PartSelection::default());
//! assert!(latex.starts_with("\\noindent"));
//! ```

#![warn(missing_docs)]

mod document;
mod latex;
mod markup;

pub use document::*;
pub use latex::*;
pub use markup::*;
