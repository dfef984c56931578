//! Recursive key renaming.

use serde_json::Value;

/// Rename every occurrence of `old_key` to `new_key`, at any depth.
///
/// Walks mappings and sequences recursively, including mappings nested
/// inside sequences. Within each mapping the rename is a single
/// remove-then-insert, so no intermediate state is observable; the renamed
/// key's position within the mapping may change. If `new_key` already
/// exists alongside `old_key`, the renamed value overwrites it.
///
/// No-op when `old_key` does not occur anywhere in the structure.
pub fn replace_key(value: &mut Value, old_key: &str, new_key: &str) {
    match value {
        Value::Object(map) => {
            if let Some(moved) = map.remove(old_key) {
                map.insert(new_key.to_string(), moved);
            }
            for nested in map.values_mut() {
                replace_key(nested, old_key, new_key);
            }
        }
        Value::Array(items) => {
            for item in items {
                replace_key(item, old_key, new_key);
            }
        }
        _ => {}
    }
}
