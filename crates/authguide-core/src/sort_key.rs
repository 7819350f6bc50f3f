//! Composite sort key for menu paths.
//!
//! Whenever "all accessible menus" are presented, they must come out in a
//! fixed, reproducible order:
//!
//! 1. Korean-labelled menus before non-Korean ones
//! 2. well-formed paths before paths whose first level is a gap
//! 3. longer unbroken prefix of real labels first (an early gap is likely a
//!    data error)
//! 4. more filled levels overall first
//! 5. path text as the final tie-break

use std::cmp::Reverse;

use crate::text::{has_korean, is_empty_segment, normalize};
use crate::types::Menu;

/// Derived ordering key for one menu. Field order is the sort priority.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MenuSortKey {
    non_korean: bool,
    leading_gap: bool,
    prefix_filled: Reverse<usize>,
    total_filled: Reverse<usize>,
    path: String,
}

/// Compute the composite sort key for a menu.
pub fn menu_sort_key(menu: &Menu) -> MenuSortKey {
    let combined = format!("{} {}", menu.path, menu.menu_id);
    let levels: Vec<&str> = menu.path.split('>').collect();

    let leading_gap = levels.first().is_none_or(|l| is_empty_segment(l));
    let prefix_filled = levels
        .iter()
        .take_while(|l| !is_empty_segment(l))
        .count();
    let total_filled = levels.iter().filter(|l| !is_empty_segment(l)).count();

    MenuSortKey {
        non_korean: !has_korean(&combined),
        leading_gap,
        prefix_filled: Reverse(prefix_filled),
        total_filled: Reverse(total_filled),
        path: menu.path.clone(),
    }
}

/// Drop repeated menu ids, keeping the first-seen entry per id.
///
/// Rows with no usable id are keyed by path instead, so degenerate rows do
/// not all collapse into one.
pub fn dedup_menus(menus: Vec<Menu>) -> Vec<Menu> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(menus.len());
    for menu in menus {
        let key = if is_empty_segment(&menu.menu_id) {
            format!(">{}", normalize(&menu.path))
        } else {
            normalize(&menu.menu_id)
        };
        if seen.insert(key) {
            out.push(menu);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(path: &str, id: &str) -> Menu {
        Menu {
            path: path.to_string(),
            menu_id: id.to_string(),
        }
    }

    /// Assert the given menus sort into exactly this order.
    fn assert_order(menus: &[Menu]) {
        let mut shuffled: Vec<Menu> = menus.iter().rev().cloned().collect();
        shuffled.sort_by_cached_key(menu_sort_key);
        let got: Vec<&str> = shuffled.iter().map(|m| m.path.as_str()).collect();
        let want: Vec<&str> = menus.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn korean_sorts_before_non_korean() {
        assert_order(&[menu("영업 > 견적", "m1"), menu("Sales > Quote", "m2")]);
    }

    #[test]
    fn korean_menu_id_counts_as_korean() {
        // Path is ASCII but the id carries Hangul.
        let k = menu_sort_key(&menu("ADMIN", "관리.001"));
        let e = menu_sort_key(&menu("ADMIN", "adm.001"));
        assert!(k < e);
    }

    #[test]
    fn leading_gap_sorts_last_among_korean() {
        assert_order(&[
            menu("재무 > 세무 > 결재", "m1"),
            menu("null > 세무 > 결재", "m2"),
        ]);
    }

    #[test]
    fn unbroken_prefix_beats_early_gap() {
        assert_order(&[
            menu("재무 > 세무 > 결재", "m1"),
            menu("재무 > null > 결재", "m2"),
        ]);
    }

    #[test]
    fn total_filled_breaks_prefix_ties() {
        assert_order(&[
            menu("재무 > 세무 > null > 결재", "m1"),
            menu("재무 > 세무 > null > null", "m2"),
        ]);
    }

    #[test]
    fn path_text_is_final_tiebreak() {
        assert_order(&[menu("영업 > 견적", "m1"), menu("영업 > 정산", "m2")]);
    }

    #[test]
    fn dedup_keeps_first_seen_per_id() {
        let out = dedup_menus(vec![
            menu("영업 > 견적", "M1"),
            menu("영업 > 견적 ", "m1"),
            menu("영업 > 정산", "m2"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].path, "영업 > 견적");
        assert_eq!(out[1].menu_id, "m2");
    }

    #[test]
    fn dedup_keeps_distinct_idless_rows() {
        let out = dedup_menus(vec![
            menu("영업 > 견적", ""),
            menu("영업 > 정산", ""),
            menu("영업 > 견적", "null"),
        ]);
        assert_eq!(out.len(), 2);
    }
}
