//! Intent resolution: deterministic override rules layered ahead of the
//! classifier, then keyword-set extraction.
//!
//! The cascade order is a correctness contract, tested as such:
//!
//! 1. "show more" continuation (checked by the session before anything else)
//! 2. access-request guide phrasings
//! 3. `role_list` override — short "권한 …" queries force `ROLE_LIST`
//! 4. `all_menus` override — "전체/모든/접근 가능한 메뉴" forces `ROLE_TO_MENU`
//!    in all-menus mode
//! 5. classifier verdict, falling back to the local rule classifier on any
//!    transport failure

use std::collections::HashSet;

use authguide_ai::{ClassifyContext, IntentClassifier, RuleClassifier};
use authguide_core::{IntentKind, IntentResult, normalize, text};
use regex::Regex;
use tracing::warn;

const MSG_ROLE_LIST: &str = "권한 목록을 조회할게요.";
const MSG_ALL_MENUS: &str = "접근 가능한 메뉴를 정리해드릴게요.";
const MSG_DEFAULT: &str = "검색 결과를 찾았습니다.";

/// Fixed onboarding-guide step labels. A query that literally echoes one of
/// these is answered with the guide, not classified.
pub const GUIDE_STEPS: [&str; 4] = [
    "소속 팀과 대상 시스템 선택",
    "필요한 권한 확인",
    "권한명 복사",
    "IT 헬프데스크에 신청 접수",
];

/// Domain filler words dropped from the keyword set.
const STOPWORDS: &[&str] = &[
    "메뉴", "권한", "역할", "접근", "필요", "필요해", "어떻게", "무엇", "전체", "모든",
    "팀", "시스템", "보여줘", "알려줘", "있어", "있나요", "주세요", "해줘", "뭐야",
    "menu", "menus", "permission", "permissions", "role", "roles", "access", "need",
    "how", "what", "all", "team", "system", "show", "list", "the",
];

struct OverrideRules {
    show_more: Regex,
    guide: Regex,
    role_list: Regex,
    all_menus: Regex,
}

impl OverrideRules {
    fn new() -> Self {
        Self {
            show_more: Regex::new(
                r"(?i)^(더(\s*(보여|알려)\s*줘?요?)?|더\s*보기|더보기|다음|계속(해\s*줘?요?)?|나머지(\s*보여\s*줘?요?)?|이어서|show\s*more|more|next)[\s.!?~]*$",
            )
            .unwrap(),
            guide: Regex::new(r"(?i)권한\s*신청|신청\s*방법|어떻게\s*신청|how\s+(do\s+i|to)\s+(request|apply)")
                .unwrap(),
            role_list: Regex::new(r"^권한$|^권한만|권한\s*(목록|리스트)|권한\s*뭐\s*있").unwrap(),
            all_menus: Regex::new(
                r"(?i)(전체|모든)\s*메뉴|메뉴\s*(전체|전부)|접근\s*가능한?\s*메뉴|볼\s*수\s*있는\s*메뉴|all\s*menus?",
            )
            .unwrap(),
        }
    }
}

/// Final, reconciled result of one query's resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub intent: IntentKind,
    /// "show everything" mode — every role is included and its full menu
    /// list is paginated.
    pub all_menus: bool,
    pub keywords: Vec<String>,
    pub message: String,
    pub confidence: f32,
}

/// Applies the override cascade and keyword extraction around whatever
/// classifier backend it is handed.
pub struct IntentResolver {
    rules: OverrideRules,
    fallback: RuleClassifier,
}

impl IntentResolver {
    pub fn new() -> Self {
        Self {
            rules: OverrideRules::new(),
            fallback: RuleClassifier::new(),
        }
    }

    /// Continuation phrasing ("더 보여줘", "다음", "계속", ...).
    pub fn is_show_more(&self, input: &str) -> bool {
        self.rules.show_more.is_match(input.trim())
    }

    /// "How do I request access" phrasing, or a literal guide step label.
    pub fn is_guide(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if self.rules.guide.is_match(trimmed) {
            return true;
        }
        let norm = normalize(trimmed);
        GUIDE_STEPS.iter().any(|step| normalize(step) == norm)
    }

    /// The canned multi-step onboarding guide.
    pub fn guide_text(&self) -> String {
        let mut out = String::from("권한 신청은 아래 순서로 진행하세요.\n");
        for (i, step) in GUIDE_STEPS.iter().enumerate() {
            out.push_str(&format!("{}. {step}\n", i + 1));
        }
        out.push_str("권한명은 역할 카드에서 그대로 복사해 신청서에 붙여넣으면 됩니다.");
        out
    }

    /// Run the cascade for one query.
    ///
    /// The classifier is consulted even when an override will win, because
    /// its keyword/candidates still feed the keyword set; its errors are
    /// absorbed by the rule fallback and never escape.
    pub async fn resolve(
        &self,
        query: &str,
        ctx: &ClassifyContext,
        classifier: &dyn IntentClassifier,
    ) -> Resolution {
        let trimmed = query.trim();

        let verdict = match classifier.classify(trimmed, ctx).await {
            Ok(v) => v,
            Err(err) => {
                warn!(%err, "classifier unavailable, falling back to rules");
                self.fallback.analyze(trimmed)
            }
        };

        let (intent, all_menus, message) = if self.rules.role_list.is_match(trimmed) {
            (IntentKind::RoleList, false, MSG_ROLE_LIST.to_string())
        } else if self.rules.all_menus.is_match(trimmed) {
            (IntentKind::RoleToMenu, true, MSG_ALL_MENUS.to_string())
        } else {
            let message = if verdict.message.trim().is_empty() {
                MSG_DEFAULT.to_string()
            } else {
                verdict.message.clone()
            };
            (verdict.kind, false, message)
        };

        Resolution {
            intent,
            all_menus,
            keywords: extract_keywords(&verdict, trimmed),
            message,
            confidence: verdict.confidence,
        }
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the deduplicated keyword set.
///
/// The classifier's single keyword is often too narrow for multi-word role
/// and menu names, so the raw query's tokens are merged in; substring
/// matching downstream makes the wider set cheap in precision.
fn extract_keywords(verdict: &IntentResult, raw: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    candidates.push(verdict.keyword.clone());
    candidates.extend(verdict.candidates.iter().cloned());
    candidates.extend(text::tokenize(raw));

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in candidates {
        let token = token.trim();
        if token.chars().count() < 2 {
            continue;
        }
        let lower = token.to_lowercase();
        if STOPWORDS.contains(&lower.as_str()) {
            continue;
        }
        let norm = normalize(token);
        if seen.insert(lower.clone()) {
            out.push(lower.clone());
        }
        if norm != lower && seen.insert(norm.clone()) {
            out.push(norm);
        }
    }
    out
}
