//! Request descriptors: HTTP verb, endpoint path, query parameters, and JSON payload.

// self
use crate::_prelude::*;

/// HTTP verbs used by the Apple Music API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single query parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
	/// Serialized as `key=value`.
	Single(String),
	/// Serialized as one `key=value` pair per element (`key=a&key=b`).
	Repeated(Vec<String>),
}
impl QueryValue {
	/// Builds a single value from comma-joined items (`ids=1,2,3`).
	pub fn comma_joined<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let mut buf = String::new();

		for (idx, item) in items.into_iter().enumerate() {
			if idx > 0 {
				buf.push(',');
			}

			buf.push_str(&item.to_string());
		}

		Self::Single(buf)
	}

	/// Builds a repeated value, coercing every item to its string form.
	pub fn repeated<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Display,
	{
		Self::Repeated(items.into_iter().map(|item| item.to_string()).collect())
	}

	/// Returns `true` when the value would serialize to nothing meaningful.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Single(value) => value.is_empty(),
			Self::Repeated(values) => values.is_empty(),
		}
	}
}
impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}
impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_owned())
	}
}
impl From<u32> for QueryValue {
	fn from(value: u32) -> Self {
		Self::Single(value.to_string())
	}
}

/// Ordered query parameters; insertion order is preserved on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, QueryValue)>);
impl QueryParams {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key`, replacing any previous value for the same key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((key, value)),
		}
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Sets `key` only when `value` is present and non-empty.
	pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<QueryValue>) {
		if let Some(value) = value.filter(|value| !value.is_empty()) {
			self.insert(key, value);
		}
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Returns `true` if no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Flattens the parameters into wire pairs, expanding repeated values.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().flat_map(|(key, value)| {
			let values: Vec<&str> = match value {
				QueryValue::Single(single) => vec![single.as_str()],
				QueryValue::Repeated(many) => many.iter().map(String::as_str).collect(),
			};

			values.into_iter().map(move |value| (key.as_str(), value))
		})
	}
}

/// Fully described API call, built fresh for every request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Endpoint path appended after the base path (e.g. `/catalog/us/songs`).
	pub endpoint: String,
	/// Base-path override; `None` means `/<api_version>`, `Some("")` means none at all.
	pub base_path: Option<String>,
	/// Query parameters.
	pub query: QueryParams,
	/// JSON payload; serialized as `{}` when absent.
	pub payload: Option<Value>,
}
impl ApiRequest {
	/// Creates a request without query parameters or payload.
	pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
		Self {
			method,
			endpoint: endpoint.into(),
			base_path: None,
			query: QueryParams::new(),
			payload: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(endpoint: impl Into<String>) -> Self {
		Self::new(Method::Get, endpoint)
	}

	/// Overrides the base path inserted between the base URL and the endpoint.
	pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
		self.base_path = Some(base_path.into());

		self
	}

	/// Replaces the query parameters.
	pub fn with_query(mut self, query: QueryParams) -> Self {
		self.query = query;

		self
	}

	/// Attaches a JSON payload.
	pub fn with_payload(mut self, payload: Value) -> Self {
		self.payload = Some(payload);

		self
	}

	/// Serializes the payload, defaulting to an empty JSON object.
	pub fn body(&self) -> Result<Vec<u8>, serde_json::Error> {
		match &self.payload {
			Some(payload) => serde_json::to_vec(payload),
			None => Ok(b"{}".to_vec()),
		}
	}
}
