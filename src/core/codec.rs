use crate::domain::model::{SimilarityRequest, SimilarityResponse, Span};
use crate::utils::error::{Result, SimilarityError};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::collections::HashMap;
use std::io;

/// Compact JSON with a space after every `:` and `,`, the layout scorer
/// scripts emit by default (`{"similarity": 0.42}`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_spaced_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Parses a request document. Missing spans become empty objects; present
/// spans are kept as raw JSON, whatever their type, depth or number range.
pub fn parse_request(raw: &[u8]) -> Result<SimilarityRequest> {
    let mut fields: HashMap<String, Span> = serde_json::from_slice(raw)?;

    Ok(SimilarityRequest {
        span_a: fields.remove("span_a").unwrap_or_default(),
        span_b: fields.remove("span_b").unwrap_or_default(),
    })
}

pub fn encode_request(request: &SimilarityRequest) -> Result<Vec<u8>> {
    to_spaced_vec(request)
}

/// Encodes the response without a trailing newline.
pub fn encode_response(response: &SimilarityResponse) -> Result<Vec<u8>> {
    to_spaced_vec(response)
}

/// Reads the `similarity` field of a scorer's reply.
pub fn parse_response(raw: &[u8]) -> Result<f64> {
    let document: Value = serde_json::from_slice(raw)?;
    document
        .get("similarity")
        .and_then(Value::as_f64)
        .ok_or_else(|| SimilarityError::MalformedRequest {
            message: "response missing numeric 'similarity'".to_string(),
        })
}
