//! Payload lookups and distribution comparisons shared by the structural scorers.

use serde_json::Value;

/// Follows a dotted path (`analysis.mapper.nodes`) through nested objects.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, key| current.get(key))
}

pub fn resolve_array<'a>(root: &'a Value, path: &str) -> Option<&'a [Value]> {
    resolve(root, path)?.as_array().map(Vec::as_slice)
}

pub fn resolve_number(root: &Value, path: &str) -> Option<f64> {
    resolve(root, path).and_then(value_to_number)
}

/// Numbers and numeric strings; anything else is not a feature.
pub fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// Clamps negatives to zero and scales to unit sum. A zero-sum input maps to
/// all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let sum = positive_sum(values);
    if sum <= f64::EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v.max(0.0) / sum).collect()
}

pub fn positive_sum(values: &[f64]) -> f64 {
    values.iter().map(|v| v.max(0.0)).sum()
}

/// `1 - L1/2` over normalized distributions, padding the shorter with zeros.
pub fn distribution_overlap(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);
    let len = norm_a.len().max(norm_b.len());
    if len == 0 {
        return 0.0;
    }

    let l1: f64 = (0..len)
        .map(|idx| {
            let va = norm_a.get(idx).copied().unwrap_or(0.0);
            let vb = norm_b.get(idx).copied().unwrap_or(0.0);
            (va - vb).abs()
        })
        .sum();

    (1.0 - 0.5 * l1).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_walks_nested_objects() {
        let payload = json!({"results": {"final_rmsd_angstrom": "0.5"}});
        assert_eq!(resolve_number(&payload, "results.final_rmsd_angstrom"), Some(0.5));
        assert_eq!(resolve_number(&payload, "results.missing"), None);
        assert_eq!(resolve_number(&json!(3), "results"), None);
    }

    #[test]
    fn test_padded_numeric_strings_are_not_features() {
        assert_eq!(value_to_number(&json!("0.5")), Some(0.5));
        assert_eq!(value_to_number(&json!(" 0.5")), None);
        assert_eq!(value_to_number(&json!("0.5\n")), None);
    }

    #[test]
    fn test_normalize_handles_zero_sum() {
        assert_eq!(normalize(&[0.0, -1.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(&[1.0, 3.0]), vec![0.25, 0.75]);
    }

    #[test]
    fn test_overlap_bounds() {
        assert!((distribution_overlap(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(distribution_overlap(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(distribution_overlap(&[], &[]), 0.0);
    }
}
