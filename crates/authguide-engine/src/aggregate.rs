//! Role aggregation: collapse raw bundle rows into unified role groups.
//!
//! Raw rows repeat the same logical role across near-duplicate lines with
//! slightly different descriptions, codes, or trailing path segments. Rows
//! sharing a normalised (primary, sub) label pair merge into one group.

use std::collections::HashMap;

use authguide_core::{AuthLevels, OTHER_LABEL, RoleRecord, clean_value, normalize};

/// The one system whose display fields are swapped (name shows the
/// description, description shows the raw role identifier). A narrow,
/// deliberate special case — do not generalise.
pub const IAS_SALES_SYSTEM: &str = "IAS_Sales";

/// One logical role after merging raw rows.
#[derive(Debug, Clone)]
pub struct UnifiedRole {
    /// Normalised grouping key derived from the (primary, sub) label pair.
    pub group_key: String,
    /// Human-facing group label, `l1(l2)` or `l1`.
    pub group_label: String,
    pub display_name: String,
    pub display_desc: String,
    /// Merged auth codes; the sentinel stays in, since a missing code is
    /// itself meaningful.
    pub codes: Vec<String>,
    /// Raw `auth_name` values, verbatim. Copy-to-clipboard always uses
    /// these regardless of any display swap.
    pub original_names: Vec<String>,
    /// Trailing path segments beyond the primary/sub level.
    pub third_level_tags: Vec<String>,
}

impl UnifiedRole {
    /// The literal role identifier text an access request needs.
    pub fn copy_text(&self) -> String {
        self.original_names.join(", ")
    }
}

#[derive(Default)]
struct GroupAccum {
    group_label: String,
    descs: Vec<String>,
    codes: Vec<String>,
    names: Vec<String>,
    tags: Vec<String>,
    ias_sales: bool,
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

/// Compute the displayed (name, desc) pair for a role group.
///
/// Shared with the search path so keyword matches render identically to the
/// role browser.
pub(crate) fn display_fields(
    ias_sales: bool,
    group_label: &str,
    descs: &[String],
    names: &[String],
) -> (String, String) {
    if ias_sales {
        let name = if descs.is_empty() {
            names.join(", ")
        } else {
            descs.join(", ")
        };
        (name, names.join(", "))
    } else {
        (group_label.to_string(), descs.join(", "))
    }
}

/// Collapse raw records into one [`UnifiedRole`] per distinct group key.
///
/// `sys_code` scopes the aggregation to one system; `None` takes the whole
/// team bundle. Output is sorted ascending by display name, with the
/// sentinel group last.
pub fn unify_roles(records: &[RoleRecord], sys_code: Option<&str>) -> Vec<UnifiedRole> {
    let sys_filter = sys_code.map(normalize);
    let mut groups: HashMap<String, GroupAccum> = HashMap::new();

    for rec in records {
        if let Some(filter) = &sys_filter
            && normalize(&rec.sys_code) != *filter
        {
            continue;
        }

        let levels = AuthLevels::parse(&rec.auth_name);
        let accum = groups.entry(levels.group_key.clone()).or_default();
        if accum.group_label.is_empty() {
            accum.group_label = levels.group_label.clone();
        }

        let desc = clean_value(Some(&rec.auth_desc));
        if desc != OTHER_LABEL {
            push_unique(&mut accum.descs, desc);
        }
        push_unique(&mut accum.codes, clean_value(Some(&rec.auth_code)));
        push_unique(&mut accum.names, rec.auth_name.clone());
        if levels.l3 != OTHER_LABEL {
            push_unique(&mut accum.tags, levels.l3);
        }
        if rec.sys_name == IAS_SALES_SYSTEM {
            accum.ias_sales = true;
        }
    }

    let mut roles: Vec<UnifiedRole> = groups
        .into_iter()
        .map(|(group_key, accum)| {
            let (display_name, display_desc) = display_fields(
                accum.ias_sales,
                &accum.group_label,
                &accum.descs,
                &accum.names,
            );
            UnifiedRole {
                group_key,
                group_label: accum.group_label,
                display_name,
                display_desc,
                codes: accum.codes,
                original_names: accum.names,
                third_level_tags: accum.tags,
            }
        })
        .collect();

    roles.sort_by(|a, b| {
        let a_sentinel = a.group_key == OTHER_LABEL;
        let b_sentinel = b.group_key == OTHER_LABEL;
        a_sentinel
            .cmp(&b_sentinel)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    roles
}
