//! Keyword matching and per-role result aggregation.

use std::collections::HashMap;

use authguide_core::{
    AuthLevels, IntentKind, Menu, OTHER_LABEL, RoleKey, RoleRecord, clean_value, normalize,
};

use crate::aggregate::{self, IAS_SALES_SYSTEM, unify_roles};
use crate::paging::order_menus;
use crate::resolve::Resolution;

/// One role group in a search answer.
#[derive(Debug, Clone)]
pub struct RoleMatch {
    pub key: RoleKey,
    pub group_key: String,
    pub name: String,
    pub desc: String,
    pub codes: Vec<String>,
    /// Verbatim role identifier text for copy-to-clipboard.
    pub copy_text: String,
    /// Menus whose path matched a keyword (keyword-search mode only).
    pub matched_menus: Vec<Menu>,
    /// The role's full menu list, populated in all-menus mode or on a
    /// role-level match. The session may replace this with the first page.
    pub all_menus: Vec<Menu>,
    /// Full menu count before any truncation.
    pub total_menus: usize,
}

/// A search answer plus whether the system filter had to be dropped.
#[derive(Debug)]
pub struct SearchOutcome {
    pub entries: Vec<RoleMatch>,
    /// True when nothing matched inside the selected system and the whole
    /// team bundle was searched instead.
    pub broadened: bool,
}

/// Run the resolved intent against the team bundle.
///
/// `ROLE_LIST` is a pure role-catalog listing and never touches menus. The
/// keyword intents include a role when all-menus mode is on, a keyword hits
/// a role-level field, or a keyword hits one of its menu paths.
pub fn search(
    records: &[RoleRecord],
    resolution: &Resolution,
    sys_code: Option<&str>,
) -> SearchOutcome {
    if resolution.intent == IntentKind::RoleList {
        return SearchOutcome {
            entries: role_catalog(records, sys_code),
            broadened: false,
        };
    }

    let entries = keyword_search(records, resolution, sys_code);
    if entries.is_empty() && sys_code.is_some() {
        let entries = keyword_search(records, resolution, None);
        let broadened = !entries.is_empty();
        return SearchOutcome { entries, broadened };
    }
    SearchOutcome {
        entries,
        broadened: false,
    }
}

fn role_catalog(records: &[RoleRecord], sys_code: Option<&str>) -> Vec<RoleMatch> {
    unify_roles(records, sys_code)
        .into_iter()
        .map(|role| RoleMatch {
            key: RoleKey::new(
                sys_code.unwrap_or_default(),
                &role.group_label,
                role.codes.first().map(String::as_str).unwrap_or_default(),
            ),
            group_key: role.group_key.clone(),
            name: role.display_name.clone(),
            desc: role.display_desc.clone(),
            copy_text: role.copy_text(),
            codes: role.codes,
            matched_menus: Vec::new(),
            all_menus: Vec::new(),
            total_menus: 0,
        })
        .collect()
}

#[derive(Default)]
struct MatchAccum {
    group_key: String,
    group_label: String,
    descs: Vec<String>,
    names: Vec<String>,
    codes: Vec<String>,
    ias_sales: bool,
    role_level: bool,
    matched: Vec<Menu>,
    menus: Vec<Menu>,
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

fn keyword_search(
    records: &[RoleRecord],
    resolution: &Resolution,
    sys_code: Option<&str>,
) -> Vec<RoleMatch> {
    let sys_filter = sys_code.map(normalize);
    let mut groups: HashMap<RoleKey, MatchAccum> = HashMap::new();
    let mut order: Vec<RoleKey> = Vec::new();

    for rec in records {
        if let Some(filter) = &sys_filter
            && normalize(&rec.sys_code) != *filter
        {
            continue;
        }

        let levels = AuthLevels::parse(&rec.auth_name);
        let role_fields = [
            normalize(&rec.team_name),
            normalize(&rec.team_code),
            normalize(&rec.sys_name),
            normalize(&rec.sys_code),
            normalize(&rec.auth_name),
            normalize(&rec.auth_desc),
        ];
        let role_hit = resolution.all_menus
            || resolution
                .keywords
                .iter()
                .any(|k| role_fields.iter().any(|f| f.contains(k)));

        let menu_hits: Vec<Menu> = if resolution.all_menus {
            Vec::new()
        } else {
            rec.menus
                .iter()
                .filter(|m| {
                    let path = normalize(&m.path);
                    let id = normalize(&m.menu_id);
                    resolution
                        .keywords
                        .iter()
                        .any(|k| path.contains(k) || id.contains(k))
                })
                .cloned()
                .collect()
        };

        if !role_hit && menu_hits.is_empty() {
            continue;
        }

        let key = RoleKey::new(&rec.sys_code, &levels.group_label, &rec.auth_code);
        let accum = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            MatchAccum {
                group_key: levels.group_key.clone(),
                group_label: levels.group_label.clone(),
                ..Default::default()
            }
        });
        let desc = clean_value(Some(&rec.auth_desc));
        if desc != OTHER_LABEL {
            push_unique(&mut accum.descs, desc);
        }
        push_unique(&mut accum.names, rec.auth_name.clone());
        push_unique(&mut accum.codes, clean_value(Some(&rec.auth_code)));
        if rec.sys_name == IAS_SALES_SYSTEM {
            accum.ias_sales = true;
        }
        accum.role_level |= role_hit;
        accum.matched.extend(menu_hits);
        accum.menus.extend(rec.menus.iter().cloned());
    }

    let mut entries: Vec<RoleMatch> = order
        .into_iter()
        .map(|key| {
            let accum = groups.remove(&key).unwrap_or_default();
            let (name, desc) = aggregate::display_fields(
                accum.ias_sales,
                &accum.group_label,
                &accum.descs,
                &accum.names,
            );
            let all = order_menus(accum.menus);
            let total_menus = all.len();
            RoleMatch {
                key,
                group_key: accum.group_key,
                name,
                desc,
                copy_text: accum.names.join(", "),
                codes: accum.codes,
                matched_menus: order_menus(accum.matched),
                all_menus: if accum.role_level { all } else { Vec::new() },
                total_menus,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        let a_sentinel = a.group_key == OTHER_LABEL;
        let b_sentinel = b.group_key == OTHER_LABEL;
        a_sentinel
            .cmp(&b_sentinel)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        sys_code: &str,
        sys_name: &str,
        auth_code: &str,
        auth_name: &str,
        auth_desc: &str,
        menus: &[(&str, &str)],
    ) -> RoleRecord {
        RoleRecord {
            team_code: "T1".into(),
            team_name: "영업팀".into(),
            sys_code: sys_code.into(),
            sys_name: sys_name.into(),
            auth_code: auth_code.into(),
            auth_name: auth_name.into(),
            auth_desc: auth_desc.into(),
            menus: menus
                .iter()
                .map(|(path, id)| Menu {
                    path: (*path).into(),
                    menu_id: (*id).into(),
                })
                .collect(),
        }
    }

    fn bundle() -> Vec<RoleRecord> {
        vec![
            record(
                "SYS1",
                "판매시스템",
                "R01",
                "영업(견적관리)",
                "견적 업무",
                &[("영업 > 견적 > 등록", "m1"), ("영업 > 견적 > 조회", "m2")],
            ),
            record(
                "SYS1",
                "판매시스템",
                "R02",
                "재무(정산)",
                "정산 업무",
                &[("재무 > 정산 > 전자결재", "m3")],
            ),
            record(
                "SYS2",
                "구매시스템",
                "R03",
                "구매(발주)",
                "발주 처리",
                &[("구매 > 발주 > 등록", "m4")],
            ),
        ]
    }

    fn resolution(intent: IntentKind, all_menus: bool, keywords: &[&str]) -> Resolution {
        Resolution {
            intent,
            all_menus,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            message: "ok".into(),
            confidence: 0.9,
        }
    }

    #[test]
    fn menu_path_match_collects_matched_menus() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::RoleToMenu, false, &["견적"]),
            Some("SYS1"),
        );
        assert!(!out.broadened);
        assert_eq!(out.entries.len(), 1);
        let entry = &out.entries[0];
        assert_eq!(entry.codes, vec!["R01"]);
        let ids: Vec<&str> = entry.matched_menus.iter().map(|m| m.menu_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn role_field_match_populates_all_menus() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::MenuToRole, false, &["정산업무"]),
            Some("SYS1"),
        );
        assert_eq!(out.entries.len(), 1);
        let entry = &out.entries[0];
        assert_eq!(entry.name, "재무(정산)");
        assert_eq!(entry.all_menus.len(), 1);
        assert_eq!(entry.total_menus, 1);
    }

    #[test]
    fn menu_only_match_leaves_all_menus_empty() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::MenuToRole, false, &["전자결재"]),
            Some("SYS1"),
        );
        let entry = &out.entries[0];
        assert_eq!(entry.matched_menus[0].menu_id, "m3");
        assert!(entry.all_menus.is_empty());
        assert_eq!(entry.total_menus, 1);
    }

    #[test]
    fn all_menus_mode_includes_every_role_in_scope() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::RoleToMenu, true, &[]),
            Some("SYS1"),
        );
        assert_eq!(out.entries.len(), 2);
        assert!(out.entries.iter().all(|e| !e.all_menus.is_empty()));
    }

    #[test]
    fn duplicate_rows_merge_by_role_key() {
        let mut records = bundle();
        records.push(record(
            "SYS1",
            "판매시스템",
            "R01",
            "영업(견적관리)",
            "견적 업무 (중복행)",
            &[("영업 > 견적 > 등록", "M1"), ("영업 > 견적 > 출력", "m9")],
        ));
        let out = search(
            &records,
            &resolution(IntentKind::RoleToMenu, false, &["견적"]),
            Some("SYS1"),
        );
        assert_eq!(out.entries.len(), 1);
        let entry = &out.entries[0];
        // m1/M1 dedup by id across the repeated rows.
        assert_eq!(entry.matched_menus.len(), 3);
        assert_eq!(entry.total_menus, 3);
    }

    #[test]
    fn zero_matches_in_system_broadens_to_team() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::MenuToRole, false, &["발주"]),
            Some("SYS1"),
        );
        assert!(out.broadened);
        assert_eq!(out.entries.len(), 1);
        assert_eq!(out.entries[0].codes, vec!["R03"]);
    }

    #[test]
    fn no_match_anywhere_is_empty_not_broadened() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::MenuToRole, false, &["zzz999"]),
            Some("SYS1"),
        );
        assert!(out.entries.is_empty());
        assert!(!out.broadened);
    }

    #[test]
    fn role_list_returns_catalog_with_empty_menus() {
        let out = search(
            &bundle(),
            &resolution(IntentKind::RoleList, false, &["무시되는", "키워드"]),
            Some("SYS1"),
        );
        assert_eq!(out.entries.len(), 2);
        assert!(out.entries.iter().all(|e| e.matched_menus.is_empty()));
        assert!(out.entries.iter().all(|e| e.all_menus.is_empty()));
        assert_eq!(out.entries[0].name, "영업(견적관리)");
    }

    #[test]
    fn ias_sales_results_swap_display_fields() {
        let records = vec![record(
            "SYS9",
            IAS_SALES_SYSTEM,
            "ZC_01",
            "ZC_SALES_ROLE",
            "영업 견적 담당자",
            &[("영업 > 견적", "m1")],
        )];
        let out = search(
            &records,
            &resolution(IntentKind::MenuToRole, false, &["견적"]),
            Some("SYS9"),
        );
        let entry = &out.entries[0];
        assert_eq!(entry.name, "영업 견적 담당자");
        assert_eq!(entry.copy_text, "ZC_SALES_ROLE");
    }
}
