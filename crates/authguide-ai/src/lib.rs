//! Intent classification backends.
//!
//! One interface, two implementations: [`RemoteClassifier`] calls the
//! LLM-backed proxy service, [`RuleClassifier`] is the deterministic local
//! fallback. The resolution engine never branches on which backend it holds.

mod classifier;
mod error;
mod remote;
mod rules;

pub use classifier::{ClassifyContext, IntentClassifier};
pub use error::AiError;
pub use remote::RemoteClassifier;
pub use rules::RuleClassifier;
