//! Decoded endpoint responses.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Raw JSON object as returned by the API.
pub type JsonMap = serde_json::Map<String, Value>;

const TRAILING_CONTENT_PATH: &str = "<end>";

/// JSON object returned by an endpoint.
///
/// An empty response body decodes to an empty document. Pagination helpers read the
/// top-level `next` cursor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseDocument(JsonMap);
impl ResponseDocument {
	/// Decodes a success body.
	///
	/// Only a body that is empty (or whitespace) maps to an empty document; anything else must
	/// be a JSON object.
	pub fn from_body(status: u16, body: &[u8]) -> Result<Self> {
		if body.iter().all(u8::is_ascii_whitespace) {
			return Ok(Self::default());
		}

		let mut deserializer = serde_json::Deserializer::from_slice(body);
		let map = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
			Error::MalformedResponse { status, path: err.path().to_string(), source: err.into_inner() }
		})?;

		deserializer.end().map_err(|source| Error::MalformedResponse {
			status,
			path: TRAILING_CONTENT_PATH.into(),
			source,
		})?;

		Ok(Self(map))
	}

	/// Relative path of the next page, if any.
	pub fn next_cursor(&self) -> Option<&str> {
		next_cursor(&self.0)
	}

	/// The `data` array, if present.
	pub fn data(&self) -> Option<&Vec<Value>> {
		self.0.get("data").and_then(Value::as_array)
	}

	/// Decodes the document into a caller-defined model.
	pub fn decode<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let value = Value::Object(self.0.clone());

		serde_path_to_error::deserialize(value).map_err(|source| Error::Decode { source })
	}

	/// Consumes the wrapper, returning the raw map.
	pub fn into_inner(self) -> JsonMap {
		self.0
	}
}
impl Deref for ResponseDocument {
	type Target = JsonMap;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl From<JsonMap> for ResponseDocument {
	fn from(value: JsonMap) -> Self {
		Self(value)
	}
}

/// Returns the non-empty string `next` cursor of any JSON object.
pub fn next_cursor(resource: &JsonMap) -> Option<&str> {
	resource.get("next").and_then(Value::as_str).filter(|next| !next.is_empty())
}
