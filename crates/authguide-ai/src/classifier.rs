use async_trait::async_trait;
use authguide_core::IntentResult;

use crate::AiError;

/// Current selection context passed along with every query.
#[derive(Debug, Clone, Default)]
pub struct ClassifyContext {
    pub team_name: String,
    pub system_name: String,
}

/// A backend that maps one free-text query to an [`IntentResult`].
///
/// Implementations must return a verdict whose `kind` is one of the four
/// valid values; anything they cannot interpret comes back as `UNKNOWN`
/// rather than an error. Errors are reserved for transport/availability
/// failures, which the caller absorbs by falling back to the rule backend.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, query: &str, ctx: &ClassifyContext)
    -> Result<IntentResult, AiError>;
}
