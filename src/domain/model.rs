use crate::utils::error::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;

/// One side of a comparison, kept as the raw JSON text it arrived as.
///
/// Nothing parses the contents unless a structural scorer asks for them via
/// [`Span::to_value`], so nesting depth and number range never matter to the
/// placeholder. An absent span behaves as `{}`; a present `null` stays `null`.
#[derive(Debug, Clone, Default)]
pub struct Span(Option<Box<RawValue>>);

impl Span {
    /// Validates `json` as a single JSON value without building it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self(Some(RawValue::from_string(json.to_owned())?)))
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self(Some(serde_json::value::to_raw_value(value)?)))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_json(&self) -> &str {
        self.0.as_deref().map_or("{}", RawValue::get)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::from_str(self.as_json())?)
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.0 {
            Some(raw) => raw.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Span {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Box::<RawValue>::deserialize(deserializer).map(|raw| Self(Some(raw)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarityRequest {
    pub span_a: Span,
    pub span_b: Span,
}

impl SimilarityRequest {
    pub fn new(span_a: Span, span_b: Span) -> Self {
        Self { span_a, span_b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub similarity: f64,
}

/// Per-scorer breakdown produced by the composite model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    pub graphlet: Option<f64>,
    pub mapper_overlap: Option<f64>,
    pub stgnn: Option<f64>,
}

impl SimilarityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean of the scores that were computed.
    pub fn composite(&self) -> Option<f64> {
        let present: Vec<f64> = [self.graphlet, self.mapper_overlap, self.stgnn]
            .into_iter()
            .flatten()
            .collect();

        if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f64>() / present.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_composite_of_nothing_is_none() {
        assert_eq!(SimilarityScores::new().composite(), None);
    }

    #[test]
    fn test_composite_averages_present_scores() {
        let scores = SimilarityScores {
            graphlet: Some(1.0),
            mapper_overlap: None,
            stgnn: Some(0.5),
        };
        assert!((scores.composite().unwrap() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_absent_span_reads_as_empty_object() {
        let span = Span::default();
        assert!(span.is_absent());
        assert_eq!(span.as_json(), "{}");
        assert_eq!(span.to_value().unwrap(), json!({}));
    }

    #[test]
    fn test_span_keeps_raw_text() {
        let span = Span::from_json(r#"{"x": 1e400, "s": "\ud800"}"#).unwrap();
        assert_eq!(span.as_json(), r#"{"x": 1e400, "s": "\ud800"}"#);
        // Only a structural read needs the contents to fit a `Value`.
        assert!(span.to_value().is_err());
    }

    #[test]
    fn test_null_span_is_not_absent() {
        let span = Span::from_json("null").unwrap();
        assert!(!span.is_absent());
        assert_eq!(span.to_value().unwrap(), Value::Null);
    }
}
