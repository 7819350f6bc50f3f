//! Hierarchical role label parsing.
//!
//! Role names arrive as `>`-delimited paths whose first segment often
//! carries a parenthesised or bracketed sub-label:
//!
//! - `영업(견적관리) > 조회` → primary `영업`, sub `견적관리`, trailing `조회`
//! - `재무 [세무]` → primary `재무`, sub `세무`
//! - `ROLE_ADMIN` → primary only
//!
//! The derived `group_key` is what the aggregation engine groups duplicate
//! raw rows by; `group_label` is the human-facing form of the same pair.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{OTHER_LABEL, clean_value, normalize};

/// `PRIMARY (SUB)` or `PRIMARY [SUB]` on the first path segment.
static SUB_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*[(\[]\s*([^)\]]*?)\s*[)\]]\s*$").unwrap());

/// Parsed levels of one role label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthLevels {
    /// Primary label (first segment, sub-label stripped).
    pub l1: String,
    /// Parenthesised/bracketed sub-label; empty when absent.
    pub l2: String,
    /// Trailing segments beyond the first, joined; sentinel when absent.
    pub l3: String,
    /// Normalised composite grouping key.
    pub group_key: String,
    /// Display form: `l1(l2)` when a real sub-label exists, else `l1`.
    pub group_label: String,
}

impl AuthLevels {
    /// Parse a raw role label.
    ///
    /// A label that cleanses to the sentinel short-circuits to an
    /// all-sentinel result so degenerate rows still group deterministically.
    pub fn parse(auth_name: &str) -> Self {
        let cleaned = clean_value(Some(auth_name));
        if cleaned == OTHER_LABEL {
            return Self::sentinel();
        }

        let mut segments = cleaned.split('>').map(str::trim);
        let head = segments.next().unwrap_or_default();

        let (l1, l2) = match SUB_LABEL.captures(head) {
            Some(caps) => {
                let sub = clean_value(Some(&caps[2]));
                let sub = if sub == OTHER_LABEL { String::new() } else { sub };
                (clean_value(Some(&caps[1])), sub)
            }
            None => (clean_value(Some(head)), String::new()),
        };

        let trailing: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
        let l3 = if trailing.is_empty() {
            OTHER_LABEL.to_string()
        } else {
            clean_value(Some(&trailing.join(" > ")))
        };

        let group_label = if l2.is_empty() {
            l1.clone()
        } else {
            format!("{l1}({l2})")
        };
        let group_key = normalize(&format!("{l1}||{l2}"));

        Self {
            l1,
            l2,
            l3,
            group_key,
            group_label,
        }
    }

    fn sentinel() -> Self {
        Self {
            l1: OTHER_LABEL.to_string(),
            l2: OTHER_LABEL.to_string(),
            l3: OTHER_LABEL.to_string(),
            group_key: OTHER_LABEL.to_string(),
            group_label: OTHER_LABEL.to_string(),
        }
    }

    /// True when the whole label degenerated to the sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.group_key == OTHER_LABEL
    }
}
