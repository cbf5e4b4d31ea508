//! User Interface Module
//!
//! Rendering for the terminal front end. Everything here reads from [`App`]
//! and never mutates it; state changes happen in the key handlers.
//!
//! [`App`]: crate::app::App

pub mod catalog;
pub mod colors;
pub mod components;
pub mod form;
pub mod help;
pub mod preview;
