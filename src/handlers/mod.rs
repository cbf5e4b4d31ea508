//! Event Handling Module
//!
//! Turns raw terminal events into [`App`](crate::app::App) state changes.
//!
//! - **`keys`**: keyboard routing for the catalog, preview, forms and popups

pub mod keys;
