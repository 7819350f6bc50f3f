//! Menu ordering and per-role pagination across "show more" turns.
//!
//! The cache is the only cross-turn mutable state in the pipeline. It is
//! owned by the session, created empty, fully replaced on every new search,
//! advanced on continuation turns, and discarded with the session.

use authguide_core::{Menu, RoleKey, dedup_menus, menu_sort_key};

/// Menus shown per role per turn.
pub const PAGE_SIZE: usize = 20;

/// Dedup by menu id, then apply the composite sort key.
pub fn order_menus(menus: Vec<Menu>) -> Vec<Menu> {
    let mut menus = dedup_menus(menus);
    menus.sort_by_cached_key(menu_sort_key);
    menus
}

/// One role's slice for the current turn.
#[derive(Debug, Clone)]
pub struct PageSlice {
    pub key: RoleKey,
    pub display_name: String,
    pub menus: Vec<Menu>,
    /// Menus shown so far, including this slice.
    pub shown: usize,
    pub total: usize,
}

struct PagingEntry {
    key: RoleKey,
    display_name: String,
    menus: Vec<Menu>,
    offset: usize,
}

/// Per-session cursor over each matched role's sorted menu list.
#[derive(Default)]
pub struct PagingCache {
    entries: Vec<PagingEntry>,
}

impl PagingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole cache with fresh cursors at offset zero.
    ///
    /// `menus` must already be in presentation order (see [`order_menus`]).
    pub fn prime(&mut self, roles: impl IntoIterator<Item = (RoleKey, String, Vec<Menu>)>) {
        self.entries = roles
            .into_iter()
            .map(|(key, display_name, menus)| PagingEntry {
                key,
                display_name,
                menus,
                offset: 0,
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True while any cached role still has unshown menus.
    pub fn has_remaining(&self) -> bool {
        self.entries.iter().any(|e| e.offset < e.menus.len())
    }

    /// Advance every cursor by one page.
    ///
    /// Roles already exhausted contribute nothing; an empty result means
    /// there was nothing more to show anywhere.
    pub fn next_page(&mut self) -> Vec<PageSlice> {
        let mut slices = Vec::new();
        for entry in &mut self.entries {
            if entry.offset >= entry.menus.len() {
                continue;
            }
            let end = (entry.offset + PAGE_SIZE).min(entry.menus.len());
            let menus = entry.menus[entry.offset..end].to_vec();
            entry.offset = end;
            slices.push(PageSlice {
                key: entry.key.clone(),
                display_name: entry.display_name.clone(),
                menus,
                shown: end,
                total: entry.menus.len(),
            });
        }
        slices
    }

    /// Cursor position for one role, if cached.
    pub fn offset_of(&self, key: &RoleKey) -> Option<usize> {
        self.entries.iter().find(|e| &e.key == key).map(|e| e.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menus(n: usize) -> Vec<Menu> {
        (0..n)
            .map(|i| Menu {
                path: format!("영업 > 견적 > 항목{i:03}"),
                menu_id: format!("m{i:03}"),
            })
            .collect()
    }

    fn key(code: &str) -> RoleKey {
        RoleKey::new("S1", "영업(견적)", code)
    }

    #[test]
    fn order_menus_dedups_then_sorts() {
        let out = order_menus(vec![
            Menu {
                path: "Sales > Quote".into(),
                menu_id: "e1".into(),
            },
            Menu {
                path: "영업 > 견적".into(),
                menu_id: "k1".into(),
            },
            Menu {
                path: "영업 > 견적 (복사)".into(),
                menu_id: "K1".into(),
            },
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].menu_id, "k1", "Korean first, first-seen kept");
        assert_eq!(out[1].menu_id, "e1");
    }

    #[test]
    fn forty_five_menus_page_as_20_20_5_then_nothing() {
        let mut cache = PagingCache::new();
        cache.prime([(key("R01"), "영업(견적)".to_string(), menus(45))]);

        let p1 = cache.next_page();
        assert_eq!(p1[0].menus.len(), 20);
        assert_eq!(p1[0].shown, 20);
        assert_eq!(p1[0].total, 45);

        let p2 = cache.next_page();
        assert_eq!(p2[0].menus.len(), 20);
        assert_eq!(p2[0].shown, 40);

        let p3 = cache.next_page();
        assert_eq!(p3[0].menus.len(), 5);
        assert_eq!(p3[0].shown, 45);
        assert!(!cache.has_remaining());

        assert!(cache.next_page().is_empty());
    }

    #[test]
    fn exhausted_roles_drop_out_of_later_turns() {
        let mut cache = PagingCache::new();
        cache.prime([
            (key("R01"), "A".to_string(), menus(25)),
            (key("R02"), "B".to_string(), menus(5)),
        ]);

        let p1 = cache.next_page();
        assert_eq!(p1.len(), 2);

        let p2 = cache.next_page();
        assert_eq!(p2.len(), 1, "5-menu role is exhausted");
        assert_eq!(p2[0].display_name, "A");
        assert_eq!(p2[0].menus.len(), 5);
    }

    #[test]
    fn prime_replaces_rather_than_merges() {
        let mut cache = PagingCache::new();
        cache.prime([(key("R01"), "A".to_string(), menus(45))]);
        cache.next_page();

        cache.prime([(key("R02"), "B".to_string(), menus(3))]);
        assert_eq!(cache.offset_of(&key("R01")), None);

        let p = cache.next_page();
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].display_name, "B");
        assert_eq!(p[0].menus.len(), 3);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = PagingCache::new();
        cache.prime([(key("R01"), "A".to_string(), menus(5))]);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.next_page().is_empty());
    }
}
