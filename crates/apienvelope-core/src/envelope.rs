use std::collections::HashMap;
use std::io::Write;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::data::DataPayload;
use crate::de::null_as_default;
use crate::error::{EnvelopeError, Result};
use crate::error_payload::ErrorPayload;

/// Top-level JSON API envelope.
///
/// Wire format:
/// ```text
/// {
///   "apiVersion": "...", "context": "...", "id": "...", "method": "...",
///   "params": { "key": "value" },
///   "data":  { "kind": ..., "deleted": false, "items": [ ... ] },
///   "error": { "code": ..., "message": ..., "errors": [ ... ] }
/// }
/// ```
///
/// Empty metadata fields are left out. `data` is always written because it
/// carries `deleted`; `error` is written only when something in it is set.
/// Whether an envelope should carry data, an error or both is up to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Envelope {
    /// Version of the API being served or received.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    /// Value supplied by the requester and echoed back for correlation.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    /// Server-assigned request identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Operation performed, for example `people.get`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,

    /// Parameters submitted with the request.
    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub params: HashMap<String, String>,

    #[serde(deserialize_with = "null_as_default")]
    pub data: DataPayload,

    #[serde(
        skip_serializing_if = "ErrorPayload::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub error: ErrorPayload,
}

impl Envelope {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new envelope from this one's API version, method and params.
    ///
    /// Context, id, data and error are left empty so one template can stamp
    /// out many responses.
    pub fn copy_metadata(&self) -> Self {
        Self {
            api_version: self.api_version.clone(),
            method: self.method.clone(),
            params: self.params.clone(),
            ..Self::default()
        }
    }

    /// Set a request parameter, returning the previous value if any.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.params.insert(key.into(), value.into())
    }

    /// Encode to compact JSON.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(EnvelopeError::Encoding)
    }

    /// Encode to indented JSON.
    pub fn to_vec_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(EnvelopeError::Encoding)
    }

    /// Encode to compact JSON as `Bytes`.
    pub fn to_bytes(&self) -> Result<Bytes> {
        self.to_vec().map(Bytes::from)
    }

    /// Encode directly into a writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self).map_err(EnvelopeError::Encoding)
    }

    /// Decode an envelope from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|err| EnvelopeError::decoding("envelope", err))
    }

    /// Decode an envelope from JSON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};

    use super::*;
    use crate::error_payload::ErrorDetail;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Car {
        color: String,
        #[serde(rename = "type")]
        kind: String,
    }

    fn car(color: &str, kind: &str) -> Car {
        Car {
            color: color.into(),
            kind: kind.into(),
        }
    }

    #[test]
    fn cars_scenario_round_trip() {
        let mut env = Envelope::new();
        env.api_version = "0.1".into();
        env.method = "cars.get".into();
        env.data.add_item(&car("red", "SUV")).unwrap();
        env.error = ErrorPayload::with_code(404, "Car Not Found");
        env.error.push(ErrorDetail::new("Car Not Found"));

        let bytes = env.to_vec().unwrap();
        let decoded = Envelope::from_slice(&bytes).unwrap();

        assert_eq!(decoded.api_version, "0.1");
        assert_eq!(decoded.method, "cars.get");
        assert_eq!(decoded.data.item_count(), 1);
        assert_eq!(decoded.data.current_item::<Car>().unwrap(), car("red", "SUV"));
        assert_eq!(decoded.error.code, 404);
        assert_eq!(decoded.error.errors[0].message, "Car Not Found");
        assert_eq!(decoded, env);
    }

    #[test]
    fn round_trip_preserves_metadata_and_items() {
        let mut env = Envelope::new();
        env.api_version = "2.0".into();
        env.context = "bart".into();
        env.id = "req-17".into();
        env.method = "people.list".into();
        env.set_param("q", "smith");
        env.set_param("limit", "2");
        env.data.kind = "people".into();
        env.data.lang = "en".into();
        env.data.updated = "2010-02-04T19:29:54.001Z".into();
        env.data.etag = "W/\"C0QBRXcycSp7ImA9WxRVFUk.\"".into();
        env.data.deleted = true;
        env.data.total_items = 40;
        env.data.add_fields(["name", "age"]);
        env.data.add_item(&json!({"name": "Ann", "age": 31})).unwrap();
        env.data.add_item(&json!({"name": "Bob", "age": 42})).unwrap();

        let mut decoded = Envelope::from_slice(&env.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.api_version, env.api_version);
        assert_eq!(decoded.context, env.context);
        assert_eq!(decoded.id, env.id);
        assert_eq!(decoded.params, env.params);
        assert!(decoded.data.deleted);
        assert_eq!(decoded.data.total_items, 40);
        assert_eq!(decoded.data.fields(), vec!["name", "age"]);
        assert_eq!(decoded.data.current_item_count(), 2);
        assert_eq!(
            decoded.data.current_item::<Value>().unwrap(),
            json!({"name": "Ann", "age": 31})
        );
        assert_eq!(
            decoded.data.next_item::<Value>().unwrap(),
            json!({"name": "Bob", "age": 42})
        );
        assert!(decoded.data.next_item::<Value>().unwrap_err().is_end_of_items());
    }

    #[test]
    fn empty_envelope_encodes_minimal_shape() {
        let env = Envelope::new();
        let value: Value = serde_json::from_slice(&env.to_vec().unwrap()).unwrap();
        assert_eq!(value, json!({"data": {"deleted": false}}));
    }

    #[test]
    fn error_section_written_when_set() {
        let mut env = Envelope::new();
        env.error.code = 500;
        let value: Value = serde_json::from_slice(&env.to_vec().unwrap()).unwrap();
        assert_eq!(value["error"], json!({"code": 500}));
    }

    #[test]
    fn copy_metadata_drops_payloads() {
        let mut template = Envelope::new();
        template.api_version = "1.0".into();
        template.method = "cars.list".into();
        template.context = "abc".into();
        template.id = "1".into();
        template.set_param("region", "eu");
        template.data.add_item(&car("red", "SUV")).unwrap();
        template.error.code = 400;

        let copy = template.copy_metadata();

        assert_eq!(copy.api_version, "1.0");
        assert_eq!(copy.method, "cars.list");
        assert_eq!(copy.params.get("region").map(String::as_str), Some("eu"));
        assert!(copy.context.is_empty());
        assert!(copy.id.is_empty());
        assert!(copy.data.is_empty());
        assert!(copy.error.is_empty());
        assert_eq!(template.data.item_count(), 1);
    }

    #[test]
    fn malformed_input_is_decoding_error() {
        let err = Envelope::from_slice(b"{\"apiVersion\": 3}").unwrap_err();
        assert!(matches!(err, EnvelopeError::Decoding { what: "envelope", .. }));

        let err = Envelope::from_str("not json").unwrap_err();
        assert!(matches!(err, EnvelopeError::Decoding { .. }));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let env = Envelope::from_str(r#"{"apiVersion":"1","extra":{"a":1}}"#).unwrap();
        assert_eq!(env.api_version, "1");
    }

    #[test]
    fn to_writer_matches_to_vec() {
        let mut env = Envelope::new();
        env.api_version = "0.1".into();
        env.data.add_item(&"x").unwrap();

        let mut sink = Vec::new();
        env.to_writer(&mut sink).unwrap();
        assert_eq!(sink, env.to_vec().unwrap());
    }

    #[test]
    fn null_sections_decode_as_empty() {
        let env = Envelope::from_str(r#"{"error":null,"params":null,"data":{"items":null}}"#).unwrap();
        assert!(env.params.is_empty());
        assert!(env.error.is_empty());
        assert_eq!(env.data.item_count(), 0);

        let env = Envelope::from_str(r#"{"data":null,"error":{"code":7,"errors":null}}"#).unwrap();
        assert!(env.data.is_empty());
        assert_eq!(env.error.code, 7);
        assert!(env.error.errors.is_empty());
    }

    #[test]
    fn null_error_beside_items_keeps_items() {
        let mut env = Envelope::from_str(r#"{"data":{"items":[1]},"error":null}"#).unwrap();
        assert_eq!(env.data.current_item::<u32>().unwrap(), 1);
        assert!(env.data.next_item::<u32>().unwrap_err().is_end_of_items());
    }

    #[test]
    fn encoding_writes_live_item_count() {
        let env = Envelope::from_str(r#"{"data":{"currentItemCount":5,"items":[1,2]}}"#).unwrap();
        assert_eq!(env.data.current_item_count(), 5);

        let value: Value = serde_json::from_slice(&env.to_vec().unwrap()).unwrap();
        assert_eq!(value["data"]["currentItemCount"], 2);
        assert_eq!(env.data.current_item_count(), 5);
    }

    #[test]
    fn negative_pagination_values_decode() {
        let env = Envelope::from_str(r#"{"data":{"startIndex":-1,"totalItems":-5}}"#).unwrap();
        assert_eq!(env.data.start_index, -1);
        assert_eq!(env.data.total_items, -5);

        let value: Value = serde_json::from_slice(&env.to_vec().unwrap()).unwrap();
        assert_eq!(value["data"]["startIndex"], -1);
    }
}
