//! Terminal rendering for role cards and chat replies.
//!
//! Presentation only — everything here reads the structures the engine
//! emits and prints them; no matching or aggregation logic.

use authguide_core::{Menu, System, Team};
use authguide_engine::{ChatMessage, Session};

/// Result rows shown per chat reply before truncating.
const MAX_RESULT_ROWS: usize = 15;
/// Menus printed per group in the role browser before truncating.
const MAX_GROUP_ITEMS: usize = 10;

pub fn print_teams(teams: &[Team]) {
    for team in teams {
        println!("{:<12} {}", team.team_code, team.team_name);
    }
}

pub fn print_systems(systems: &[System]) {
    for system in systems {
        println!("{:<12} {}", system.sys_code, system.sys_name);
    }
}

/// Vertical card per unified role, menus grouped by top path level.
pub fn print_role_browser(session: &Session, filter: Option<&str>) {
    let entries = session.browse_roles(filter);
    if entries.is_empty() {
        println!("표시할 권한이 없습니다.");
        return;
    }

    for entry in &entries {
        println!("=== {} ===", entry.name);
        if !entry.desc.is_empty() {
            println!("{}", entry.desc);
        }
        if !entry.codes.is_empty() {
            println!("코드: {}", entry.codes.join(", "));
        }
        println!("복사용 권한명: {}", entry.copy_text);

        for (group, menus) in group_by_top(&entry.all_menus) {
            println!("  [{group}]");
            let show = menus.len().min(MAX_GROUP_ITEMS);
            for menu in &menus[..show] {
                println!("    - {} ({})", last_menu_name(&menu.path), menu.menu_id);
            }
            if menus.len() > MAX_GROUP_ITEMS {
                println!("    ... 외 {}건", menus.len() - MAX_GROUP_ITEMS);
            }
        }
        println!();
    }
}

/// Render one assistant reply with its structured results.
pub fn print_reply(reply: &ChatMessage) {
    println!("{}", reply.content);

    let show = reply.results.len().min(MAX_RESULT_ROWS);
    for entry in &reply.results[..show] {
        if entry.codes.is_empty() {
            println!("  • {}", entry.name);
        } else {
            println!("  • {} ({})", entry.name, entry.codes.join(", "));
        }

        let menus = if entry.matched_menus.is_empty() {
            &entry.all_menus
        } else {
            &entry.matched_menus
        };
        for menu in menus {
            println!("      - {}", last_menu_name(&menu.path));
        }
        if entry.total_menus > menus.len() && !menus.is_empty() {
            println!("      (전체 {}건 중 {}건 표시)", entry.total_menus, menus.len());
        }
    }
    if reply.results.len() > MAX_RESULT_ROWS {
        println!("  ... 외 {}건 더 있음", reply.results.len() - MAX_RESULT_ROWS);
    }
    println!();
}

/// Last breadcrumb level, falling back to the whole path.
fn last_menu_name(path: &str) -> &str {
    path.split('>')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or(path)
}

/// Group menus by their top path level, preserving first-seen group order.
fn group_by_top(menus: &[Menu]) -> Vec<(String, Vec<&Menu>)> {
    let mut groups: Vec<(String, Vec<&Menu>)> = Vec::new();
    for menu in menus {
        let top = menu
            .path
            .split('>')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("기타")
            .to_string();
        match groups.iter_mut().find(|(g, _)| *g == top) {
            Some((_, list)) => list.push(menu),
            None => groups.push((top, vec![menu])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(path: &str) -> Menu {
        Menu {
            path: path.into(),
            menu_id: "m".into(),
        }
    }

    #[test]
    fn last_menu_name_takes_deepest_level() {
        assert_eq!(last_menu_name("재무 > 정산 > 전자결재"), "전자결재");
        assert_eq!(last_menu_name("재무"), "재무");
        assert_eq!(last_menu_name("재무 > 정산 > "), "정산");
    }

    #[test]
    fn group_by_top_preserves_order() {
        let menus = vec![
            menu("영업 > 견적"),
            menu("재무 > 정산"),
            menu("영업 > 계약"),
        ];
        let groups = group_by_top(&menus);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "영업");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "재무");
    }

    #[test]
    fn group_by_top_buckets_empty_levels_as_other() {
        let menus = [menu(" > 정산")];
        let groups = group_by_top(&menus);
        assert_eq!(groups[0].0, "기타");
    }
}
