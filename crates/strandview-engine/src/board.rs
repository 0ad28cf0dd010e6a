use std::collections::HashMap;

use strandview_types::{Group, Strand};

use crate::collate::collate;
use crate::color::color_for;
use crate::extract::group_label;

/// Canonical column orders for fields with a fixed lifecycle. Only values
/// actually present are emitted; discovered extras follow lexicographically.
const STATUS_ORDER: &[&str] = &["draft", "published", "archived"];
const DIFFICULTY_ORDER: &[&str] = &["beginner", "intermediate", "advanced"];

const GREEN: &str = "hsl(142, 65%, 45%)";
const AMBER: &str = "hsl(38, 92%, 50%)";
const RED: &str = "hsl(0, 72%, 51%)";

/// Partition strands into named, colored, orderable groups by a
/// categorical field.
///
/// Every record lands in exactly one group, and the groups together hold
/// exactly the input records. Group contents are recomputed on every call;
/// the collapsed-id list is the only persisted state.
pub fn partition(strands: &[Strand], group_by: &str, collapsed: &[String]) -> Vec<Group> {
    let mut discovered: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<Strand>> = HashMap::new();

    for strand in strands {
        let key = group_label(strand, group_by);
        if !members.contains_key(&key) {
            discovered.push(key.clone());
        }
        members.entry(key).or_default().push(strand.clone());
    }

    ordered_keys(group_by, discovered)
        .into_iter()
        .map(|key| {
            let strands = members.remove(&key).unwrap_or_default();
            Group {
                id: key.clone(),
                label: display_label(&key),
                color: Some(group_color(group_by, &key)),
                is_collapsed: collapsed.contains(&key),
                strands,
            }
        })
        .collect()
}

fn canonical_order(field: &str) -> Option<&'static [&'static str]> {
    match field {
        "status" | "publishing" => Some(STATUS_ORDER),
        "difficulty" => Some(DIFFICULTY_ORDER),
        _ => None,
    }
}

/// Canonical values first, in their fixed order, restricted to the ones
/// present; everything else appended in collation order.
fn ordered_keys(field: &str, discovered: Vec<String>) -> Vec<String> {
    match canonical_order(field) {
        Some(order) => {
            let mut ordered: Vec<String> = order
                .iter()
                .filter(|canonical| discovered.iter().any(|key| key == *canonical))
                .map(|canonical| canonical.to_string())
                .collect();
            let mut extras: Vec<String> = discovered
                .into_iter()
                .filter(|key| !order.contains(&key.as_str()))
                .collect();
            extras.sort_by(|a, b| collate(a, b));
            ordered.extend(extras);
            ordered
        }
        None => {
            let mut ordered = discovered;
            ordered.sort_by(|a, b| collate(a, b));
            ordered
        }
    }
}

/// Semantic palette for canonical lifecycle values; hashed hue otherwise.
fn group_color(field: &str, key: &str) -> String {
    let semantic = match field {
        "status" | "publishing" => match key {
            "published" => Some(GREEN),
            "draft" => Some(AMBER),
            "archived" => Some(RED),
            _ => None,
        },
        "difficulty" => match key {
            "beginner" => Some(GREEN),
            "intermediate" => Some(AMBER),
            "advanced" => Some(RED),
            _ => None,
        },
        _ => None,
    };
    semantic.map(str::to_string).unwrap_or_else(|| color_for(key))
}

/// Human-facing label for a group key: first letter of each word upper-cased.
fn display_label(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
