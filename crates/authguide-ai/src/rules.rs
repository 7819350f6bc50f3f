//! Deterministic rule-based fallback classifier.
//!
//! Mirrors the priority table the remote classifier is prompted with, so a
//! classifier outage degrades precision but never changes the shape of the
//! answer: role-list phrasings win, then menu phrasings, and everything
//! else is treated as a menu→role lookup.

use async_trait::async_trait;
use authguide_core::{IntentKind, IntentResult};
use regex::Regex;

use crate::{AiError, ClassifyContext, IntentClassifier};

const MSG_EMPTY: &str = "질문을 입력해 주세요.";
const MSG_ROLE_LIST: &str = "권한 목록을 조회할게요.";
const MSG_ROLE_TO_MENU: &str = "접근 가능한 메뉴를 정리해드릴게요.";
const MSG_MENU_TO_ROLE: &str = "해당 메뉴에 필요한 권한을 찾아볼게요.";

/// Local, always-available classifier.
pub struct RuleClassifier {
    role_list: Regex,
    menu_query: Regex,
    strip_role_to_menu: Regex,
    strip_menu_to_role: Regex,
}

impl RuleClassifier {
    pub fn new() -> Self {
        Self {
            role_list: Regex::new(r"^권한$|권한\s*(만|목록|리스트|전체)|권한\s*뭐|어떤\s*권한")
                .unwrap(),
            menu_query: Regex::new(r"메뉴|볼\s*수|가진").unwrap(),
            strip_role_to_menu: Regex::new(r"권한|메뉴|볼\s*수|있어|가진|보여줘|\?|\s").unwrap(),
            strip_menu_to_role: Regex::new(r"권한|메뉴|필요해|보려면|알려줘|\?|\s").unwrap(),
        }
    }

    /// Synchronous core so the engine can also consult the rules directly.
    pub fn analyze(&self, query: &str) -> IntentResult {
        let query = query.trim();
        if query.is_empty() {
            return IntentResult::unknown(MSG_EMPTY);
        }

        if self.role_list.is_match(query) {
            return IntentResult {
                kind: IntentKind::RoleList,
                keyword: String::new(),
                candidates: Vec::new(),
                message: MSG_ROLE_LIST.to_string(),
                confidence: 0.8,
            };
        }

        if self.menu_query.is_match(query) {
            return IntentResult {
                kind: IntentKind::RoleToMenu,
                keyword: self.strip_role_to_menu.replace_all(query, "").to_string(),
                candidates: Vec::new(),
                message: MSG_ROLE_TO_MENU.to_string(),
                confidence: 0.4,
            };
        }

        IntentResult {
            kind: IntentKind::MenuToRole,
            keyword: self.strip_menu_to_role.replace_all(query, "").to_string(),
            candidates: Vec::new(),
            message: MSG_MENU_TO_ROLE.to_string(),
            confidence: 0.4,
        }
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentClassifier for RuleClassifier {
    async fn classify(
        &self,
        query: &str,
        _ctx: &ClassifyContext,
    ) -> Result<IntentResult, AiError> {
        Ok(self.analyze(query))
    }
}
