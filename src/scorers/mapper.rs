use crate::domain::model::Span;
use crate::domain::ports::SimilarityModel;
use crate::scorers::features::{distribution_overlap, positive_sum, resolve_array, value_to_number};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

const MAPPER_PATHS: &[&str] = &[
    "analysis.mapper.nodes",
    "mapper.nodes",
    "analysis.mapper_signature",
];

/// Node keys read, in order, from object entries of a Mapper profile.
const NODE_KEYS: &[&str] = &["size", "weight", "density"];

#[derive(Debug, Clone, Copy, Default)]
pub struct MapperModel;

pub fn mapper_overlap(a: &Value, b: &Value) -> f64 {
    let profile_a = extract_profile(a);
    let profile_b = extract_profile(b);

    if profile_a.is_empty() || profile_b.is_empty() {
        return 0.0;
    }

    let distribution = distribution_overlap(&profile_a, &profile_b);

    let sum_a = positive_sum(&profile_a);
    let sum_b = positive_sum(&profile_b);
    let magnitude_penalty = if sum_a + sum_b > 0.0 {
        ((sum_a - sum_b).abs() / (sum_a + sum_b)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    (distribution * (1.0 - magnitude_penalty)).clamp(0.0, 1.0)
}

fn extract_profile(span: &Value) -> Vec<f64> {
    MAPPER_PATHS
        .iter()
        .filter_map(|path| resolve_array(span, path))
        .map(profile_values)
        .find(|profile| !profile.is_empty())
        .unwrap_or_default()
}

fn profile_values(nodes: &[Value]) -> Vec<f64> {
    let mut profile = Vec::new();
    for node in nodes {
        match node {
            Value::Number(_) | Value::String(_) => profile.extend(value_to_number(node)),
            Value::Object(fields) => profile.extend(
                NODE_KEYS
                    .iter()
                    .filter_map(|key| fields.get(*key).and_then(value_to_number)),
            ),
            _ => {}
        }
    }
    profile
}

#[async_trait]
impl SimilarityModel for MapperModel {
    fn name(&self) -> &str {
        "mapper"
    }

    async fn compute_similarity(&self, span_a: &Span, span_b: &Span) -> Result<f64> {
        Ok(mapper_overlap(&span_a.to_value()?, &span_b.to_value()?))
    }
}
