//! Recursive merge of same-shaped mappings.
//!
//! Merging combines records from multiple sources rather than deduplicating
//! them: nested mappings merge recursively, sequences concatenate in input
//! order, and scalars accumulate into a sequence of all input values. When
//! the inputs do not share a structure the merge declines and hands the
//! inputs back untouched — a structured outcome, not an error.

use serde_json::{Map, Value};

/// Outcome of a merge attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// All inputs shared a structure and were combined into one mapping.
    Merged(Value),
    /// Structures differed (or an input was not a mapping); the inputs are
    /// returned in their original order, unmodified.
    Unmerged(Vec<Value>),
}

impl MergeOutcome {
    /// Collapse the outcome into a single value; an unmerged list becomes
    /// a JSON array.
    pub fn into_value(self) -> Value {
        match self {
            MergeOutcome::Merged(value) => value,
            MergeOutcome::Unmerged(values) => Value::Array(values),
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged(_))
    }
}

/// Merge an ordered sequence of mappings into one mapping.
///
/// An empty input merges to an empty mapping; a single input is returned
/// unchanged. With two or more inputs, all must be mappings with the same
/// structure (see [`same_structure`]) or the merge declines.
pub fn merge(inputs: Vec<Value>) -> MergeOutcome {
    if inputs.is_empty() {
        return MergeOutcome::Merged(Value::Object(Map::new()));
    }
    if inputs.len() == 1 {
        let mut inputs = inputs;
        return MergeOutcome::Merged(inputs.remove(0));
    }

    let maps: Option<Vec<&Map<String, Value>>> =
        inputs.iter().map(|value| value.as_object()).collect();

    match maps {
        Some(maps) if maps[1..].iter().all(|m| same_structure(maps[0], m)) => {
            MergeOutcome::Merged(Value::Object(merge_maps(&maps)))
        }
        _ => MergeOutcome::Unmerged(inputs),
    }
}

/// Structural equivalence test.
///
/// Two mappings are same-structure when they have the same key set and,
/// for every key whose value is a mapping on either side, both values are
/// mappings that are recursively same-structure. Scalar and sequence
/// values are only compared by key presence.
pub fn same_structure(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, a_value)| match b.get(key) {
        Some(b_value) => match (a_value.as_object(), b_value.as_object()) {
            (Some(a_nested), Some(b_nested)) => same_structure(a_nested, b_nested),
            (None, None) => true,
            _ => false,
        },
        None => false,
    })
}

/// Merge mappings known to share a structure, key by key over all inputs.
fn merge_maps(maps: &[&Map<String, Value>]) -> Map<String, Value> {
    let mut merged = Map::new();
    for key in maps[0].keys() {
        let values: Vec<&Value> = maps.iter().filter_map(|m| m.get(key)).collect();
        merged.insert(key.clone(), merge_values(&values));
    }
    merged
}

/// Combine the values stored under one key across all inputs.
///
/// Decided n-way rather than pairwise so that three scalar inputs yield
/// `[a, b, c]` and not `[[a, b], c]`.
fn merge_values(values: &[&Value]) -> Value {
    let nested: Option<Vec<&Map<String, Value>>> =
        values.iter().map(|v| v.as_object()).collect();
    if let Some(nested) = nested {
        return Value::Object(merge_maps(&nested));
    }

    let sequences: Option<Vec<&Vec<Value>>> = values.iter().map(|v| v.as_array()).collect();
    if let Some(sequences) = sequences {
        let mut combined = Vec::new();
        for seq in sequences {
            combined.extend(seq.iter().cloned());
        }
        return Value::Array(combined);
    }

    // Scalars (or mixed kinds) accumulate in input order.
    Value::Array(values.iter().map(|v| (*v).clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_merges_to_empty_mapping() {
        assert_eq!(merge(vec![]), MergeOutcome::Merged(json!({})));
    }

    #[test]
    fn test_single_input_unchanged() {
        let input = json!({"a": 1, "b": {"c": [1, 2]}});
        assert_eq!(merge(vec![input.clone()]), MergeOutcome::Merged(input));
    }

    #[test]
    fn test_scalars_accumulate() {
        let outcome = merge(vec![json!({"a": 1}), json!({"a": 2})]);
        assert_eq!(outcome, MergeOutcome::Merged(json!({"a": [1, 2]})));
    }

    #[test]
    fn test_scalars_accumulate_n_way() {
        let outcome = merge(vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})]);
        // n-way, not pairwise: never [[1, 2], 3]
        assert_eq!(outcome, MergeOutcome::Merged(json!({"a": [1, 2, 3]})));
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let outcome = merge(vec![json!({"a": {"b": 1}}), json!({"a": {"b": 2}})]);
        assert_eq!(outcome, MergeOutcome::Merged(json!({"a": {"b": [1, 2]}})));
    }

    #[test]
    fn test_sequences_concatenate_in_input_order() {
        let outcome = merge(vec![json!({"tags": [1, 2]}), json!({"tags": [3]})]);
        assert_eq!(outcome, MergeOutcome::Merged(json!({"tags": [1, 2, 3]})));
    }

    #[test]
    fn test_differing_keys_decline() {
        let a = json!({"a": 1});
        let b = json!({"b": 2});
        assert_eq!(
            merge(vec![a.clone(), b.clone()]),
            MergeOutcome::Unmerged(vec![a, b])
        );
    }

    #[test]
    fn test_nested_structure_mismatch_declines() {
        // Same top-level keys, but "a" is a mapping on one side only.
        let a = json!({"a": {"b": 1}});
        let b = json!({"a": 2});
        assert_eq!(
            merge(vec![a.clone(), b.clone()]),
            MergeOutcome::Unmerged(vec![a, b])
        );
    }

    #[test]
    fn test_non_mapping_input_declines() {
        let a = json!({"a": 1});
        let b = json!([1, 2]);
        assert_eq!(
            merge(vec![a.clone(), b.clone()]),
            MergeOutcome::Unmerged(vec![a, b])
        );
    }

    #[test]
    fn test_same_structure_ignores_scalar_kinds() {
        let a = json!({"a": 1, "b": [1]});
        let b = json!({"a": "text", "b": "not-a-list"});
        assert!(same_structure(
            a.as_object().unwrap(),
            b.as_object().unwrap()
        ));
    }

    #[test]
    fn test_mixed_scalar_and_sequence_accumulate() {
        // Presence-only structural check lets kinds differ; they accumulate.
        let outcome = merge(vec![json!({"a": 1}), json!({"a": [2, 3]})]);
        assert_eq!(outcome, MergeOutcome::Merged(json!({"a": [1, [2, 3]]})));
    }

    #[test]
    fn test_merge_combines_records_without_dedup() {
        let outcome = merge(vec![json!({"a": 1}), json!({"a": 1})]);
        assert_eq!(outcome, MergeOutcome::Merged(json!({"a": [1, 1]})));
    }

    #[test]
    fn test_into_value() {
        assert_eq!(MergeOutcome::Merged(json!({"a": 1})).into_value(), json!({"a": 1}));
        assert_eq!(
            MergeOutcome::Unmerged(vec![json!(1), json!(2)]).into_value(),
            json!([1, 2])
        );
    }
}
