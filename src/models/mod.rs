pub mod ids;
pub mod prompt;
pub mod seed;
pub mod store;

pub use ids::{IdScheme, IdSource, TimestampIds, UuidIds};
pub use prompt::{Prompt, PromptDraft, PromptId, PromptModel, estimate_tokens, parse_tags};
pub use store::PromptStore;
