//! Shared-config library - reactive configuration shared across a frontend.
//!
//! A [`SharedConfigStore`] holds the backend URL, the results time span and
//! the origins toggle. Collaborators receive a clone of the store, read and
//! write its fields, and subscribe to changes.

pub mod cell;
pub mod cli;
pub mod colors;
pub mod console;
pub mod error;
pub mod field;
pub mod observer;
pub mod query;
pub mod state;
pub mod store;

pub use cell::{ReactiveCell, Subscription};
pub use error::ConfigError;
pub use field::{Field, FieldValue};
pub use state::{ConfigState, Preset};
pub use store::SharedConfigStore;
