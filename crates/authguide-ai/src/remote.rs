//! HTTP client for the intent-analysis proxy.

use std::time::Duration;

use async_trait::async_trait;
use authguide_core::{IntentKind, IntentResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AiError, ClassifyContext, IntentClassifier};

const ENDPOINT: &str = "/api/analyze-intent";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Classifier backed by the `POST /api/analyze-intent` proxy service.
///
/// No retries: any failure here is absorbed by the caller's rule fallback,
/// so a single bounded attempt is all that is useful.
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    query: &'a str,
    #[serde(rename = "currentTeam")]
    current_team: &'a str,
    #[serde(rename = "currentSystem")]
    current_system: &'a str,
}

/// Response shape, every field optional so a partially-valid body still
/// yields a usable verdict.
#[derive(Deserialize, Default)]
struct WireResponse {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    candidates: Vec<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    confidence: f32,
}

impl RemoteClassifier {
    /// `base_url` like `http://localhost:3001` (no trailing slash).
    pub fn new(base_url: String) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IntentClassifier for RemoteClassifier {
    async fn classify(
        &self,
        query: &str,
        ctx: &ClassifyContext,
    ) -> Result<IntentResult, AiError> {
        let url = format!("{}{ENDPOINT}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&WireRequest {
                query,
                current_team: &ctx.team_name,
                current_system: &ctx.system_name,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let wire: WireResponse = resp.json().await?;
        let result = sanitize(wire, query);
        info!(kind = result.kind.as_str(), keyword = %result.keyword, "classified query");
        Ok(result)
    }
}

/// Clamp a wire response into a valid verdict.
///
/// Unrecognised type strings become `UNKNOWN`. A search intent with an
/// empty keyword falls back to the raw query, since the downstream matcher
/// has nothing else to work with.
fn sanitize(wire: WireResponse, query: &str) -> IntentResult {
    let kind = IntentKind::from_wire(wire.kind.trim());
    let keyword = wire.keyword.trim();
    let keyword = match kind {
        IntentKind::RoleToMenu | IntentKind::MenuToRole if keyword.is_empty() => {
            query.trim().to_string()
        }
        _ => keyword.to_string(),
    };
    IntentResult {
        kind,
        keyword,
        candidates: wire
            .candidates
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
        message: wire.message,
        confidence: wire.confidence,
    }
}
