//! Key-by-key merging over the format-agnostic merge-state.
//!
//! Responsibilities:
//! - Deep-merge an overlay mapping over a base mapping.
//! - Enumerate leaf key paths, which are the keys the environment tier may override.
//! - Read and replace a value addressed by a key path.
//!
//! Invariants:
//! - Mappings merge recursively; every other value (including sequences) is
//!   replaced wholesale by the overlay.
//! - Keys present only in the overlay are added to the base.
//! - An empty mapping is not a leaf and contributes no key paths.

use serde_json::Value;

/// Merge `overlay` over `base`, key by key.
pub(crate) fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Collect the path of every non-mapping value under `root`.
pub(crate) fn leaf_paths(root: &Value) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut current = Vec::new();
    collect_leaves(root, &mut current, &mut paths);
    paths
}

fn collect_leaves(value: &Value, current: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                current.push(key.clone());
                collect_leaves(child, current, out);
                current.pop();
            }
        }
        _ if !current.is_empty() => out.push(current.clone()),
        _ => {}
    }
}

/// Mutable access to the value at `path`, if every segment exists.
pub(crate) fn get_path_mut<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    path.iter()
        .try_fold(root, |node, segment| node.as_object_mut()?.get_mut(segment))
}
