//! Go-to-definition: token extraction, answer memoization, and the resolver.

mod answer_cache;
mod provider;
mod symbol_text;

pub use answer_cache::{AnswerCache, AnswerKey, Claim, ResolveTicket};
pub use provider::{DefinitionProvider, Resolution};
pub use symbol_text::{word_at, word_at_position};
