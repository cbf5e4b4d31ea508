//! promptbox - Prompt Catalog Core
//!
//! The UI-agnostic half of promptbox. Everything that decides what the
//! catalog contains and what is visible lives here; the terminal UI and the
//! CLI in the binary only drive these types.
//!
//! - **`models`**: prompt records, the in-memory store and identifier sources
//! - **`filter`**: the multi-predicate filter over the collection
//! - **`coordinator`**: filter criteria, preview and edit state
//! - **`clipboard`**: fire-and-forget clipboard writes
//! - **`config`**, **`logging`**, **`error`**: ambient plumbing

pub mod clipboard;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;

pub use coordinator::ViewCoordinator;
pub use error::{PromptBoxError, Result};
pub use filter::{Category, FilterCriteria, ModelFilter};
pub use models::{Prompt, PromptDraft, PromptId, PromptModel, PromptStore};
