//! # Spellbook Core
//!
//! Core data structures and types for the spellbook toolkit.
//!
//! The toolkit curates a collection of tabletop RPG spells stored as one
//! document per spell. This crate holds the types every other crate shares:
//!
//! ## Key Concepts
//!
//! - **Record / RecordSet**: a spell as a flat field → value mapping, and an
//!   ordered, immutable collection of them
//! - **Schema**: declarative column specs (type, nullability, uniqueness,
//!   default, checks)
//! - **Check**: a closed set of value predicates (range, isin, list subset,
//!   regex full match, lowercase)
//! - **FilterSpec / QueryExpression**: inputs of the filter and query engines
//! - **ValidationReport**: structured result of a validation run
//!
//! ## Example
//!
//! ```rust
//! use spellbook_core::{Check, ColumnBuilder, SchemaBuilder, ValueType};
//!
//! let schema = SchemaBuilder::new("spells", "nome")
//!     .column(ColumnBuilder::new("nome", ValueType::String).unique(true).build())
//!     .column(
//!         ColumnBuilder::new("nivel", ValueType::Integer)
//!             .check(Check::Range { min: Some(0.0), max: Some(9.0) })
//!             .build(),
//!     )
//!     .build();
//!
//! assert!(schema.check_definition().is_ok());
//! ```

pub mod builder;
pub mod error;
pub mod filter;
pub mod record;
pub mod report;
pub mod schema;
pub mod spells;
pub mod value;

pub use builder::*;
pub use error::*;
pub use filter::*;
pub use record::*;
pub use report::*;
pub use schema::*;
pub use value::*;
