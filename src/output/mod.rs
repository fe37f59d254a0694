//! Display surface renderers: table and JSON.
//!
//! Renderers are pure projections of the published record; they hold no
//! state and render nothing meaningful until a record exists.

pub mod json;
pub mod table;

use crate::models::User;

pub use json::JsonRenderer;
pub use table::TableRenderer;

/// Trait for rendering the published user to an output format.
pub trait UserRenderer {
    /// Render the record, or the "nothing published" form for `None`.
    fn render(&self, user: Option<&User>) -> String;
}
