//! # Spellbook Query
//!
//! Reduces record sets in two ways:
//!
//! - **Filters** ([`filter()`]): a [`FilterSpec`](spellbook_core::FilterSpec)
//!   mapping columns to accepted values, applied conjunctively
//! - **Queries** ([`QueryEngine::query`]): a free-form SQL predicate evaluated
//!   by DataFusion over an in-memory table
//!
//! Both return a new record set and keep the relative order of the records
//! they select.

mod codec;
mod error;
mod filter;
mod query;

pub use codec::*;
pub use error::*;
pub use filter::*;
pub use query::*;
