//! Domain service for the expense tracker.
//!
//! The engine owns a [`DatabaseConnection`] and exposes the CRUD operations
//! for categories and expenses. All invariants live here: category names are
//! unique, an expense always references an existing category, and deleting a
//! category takes its expenses with it.

pub use error::EngineError;
pub use ops::{CategoryPatch, Engine, EngineBuilder, ExpensePatch};

pub mod categories;
pub mod expenses;
mod error;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
