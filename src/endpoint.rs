//! Data-driven endpoint table.
//!
//! Every documented endpoint is a constant [`Endpoint`]: an HTTP verb, a path template with
//! `{placeholder}` segments, and the optional parameters it accepts. Convenience methods on the
//! client only supply arguments; path rendering, optional-parameter filtering, and validation
//! happen once in [`Endpoint::build_request`].

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	request::{ApiRequest, Method, QueryParams, QueryValue},
};

/// Storefront used when a catalog request does not name one.
pub const DEFAULT_STOREFRONT: &str = "us";

/// Optional query parameters an endpoint may accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionalParam {
	/// `include`: related resources to include, comma-joined.
	Include,
	/// `limit`: page size.
	Limit,
	/// `offset`: page offset.
	Offset,
	/// `types`: resource types to search, comma-joined.
	Types,
}
impl OptionalParam {
	/// Returns the query key.
	pub const fn as_str(self) -> &'static str {
		match self {
			OptionalParam::Include => "include",
			OptionalParam::Limit => "limit",
			OptionalParam::Offset => "offset",
			OptionalParam::Types => "types",
		}
	}
}

/// Optional knobs shared by every endpoint method.
///
/// Unset fields never reach the query string. A zero `limit`/`offset` counts as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Storefront for catalog endpoints; defaults to [`DEFAULT_STOREFRONT`].
	pub storefront: Option<String>,
	/// Relationships to include in the response.
	pub include: Vec<String>,
	/// Page size.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
	/// Resource types for search.
	pub types: Vec<String>,
}
impl RequestOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Targets a specific storefront (e.g. `gb`).
	pub fn storefront(mut self, storefront: impl Into<String>) -> Self {
		self.storefront = Some(storefront.into());

		self
	}

	/// Adds one relationship to `include`.
	pub fn include(mut self, relationship: impl Into<String>) -> Self {
		self.include.push(relationship.into());

		self
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Sets the page offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Adds one resource type to `types`.
	pub fn r#type(mut self, kind: impl Into<String>) -> Self {
		self.types.push(kind.into());

		self
	}

	fn value_of(&self, param: OptionalParam) -> Option<QueryValue> {
		match param {
			OptionalParam::Include =>
				(!self.include.is_empty()).then(|| QueryValue::comma_joined(&self.include)),
			OptionalParam::Limit => self.limit.filter(|limit| *limit > 0).map(QueryValue::from),
			OptionalParam::Offset => self.offset.filter(|offset| *offset > 0).map(QueryValue::from),
			OptionalParam::Types =>
				(!self.types.is_empty()).then(|| QueryValue::comma_joined(&self.types)),
		}
	}
}

/// One documented API endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
	/// Stable label used in spans, metrics, and errors.
	pub name: &'static str,
	/// HTTP verb.
	pub method: Method,
	/// Path template relative to the versioned base path.
	pub path: &'static str,
	/// Optional parameters forwarded when set.
	pub accepts: &'static [OptionalParam],
}
impl Endpoint {
	/// Returns `true` if the endpoint accepts `param`.
	pub fn accepts(&self, param: OptionalParam) -> bool {
		self.accepts.contains(&param)
	}

	/// Returns `true` if the path is scoped by a storefront.
	pub fn is_catalog(&self) -> bool {
		self.path.contains("{storefront}")
	}

	/// Renders the path template, substituting `{name}` placeholders from `args`.
	pub fn render_path(&self, args: &[(&'static str, &str)]) -> Result<String, ConfigError> {
		let mut rendered = String::with_capacity(self.path.len());
		let mut rest = self.path;

		while let Some(start) = rest.find('{') {
			rendered.push_str(&rest[..start]);

			let tail = &rest[start + 1..];
			let end = tail.find('}').ok_or_else(|| ConfigError::MissingPathParameter {
				endpoint: self.name,
				name: tail.to_owned(),
			})?;
			let name = &tail[..end];
			let &(key, value) = args.iter().find(|(key, _)| *key == name).ok_or_else(|| {
				ConfigError::MissingPathParameter { endpoint: self.name, name: name.to_owned() }
			})?;

			validate_segment(key, value)?;
			rendered.push_str(value);

			rest = &tail[end + 1..];
		}

		rendered.push_str(rest);

		Ok(rendered)
	}

	/// Builds the request descriptor for this endpoint.
	///
	/// `required` carries the endpoint's mandatory query parameters; `options` contributes only
	/// the parameters the endpoint accepts, and setting any other one is an error.
	pub fn build_request(
		&self,
		path_args: &[(&'static str, &str)],
		required: QueryParams,
		options: &RequestOptions,
		payload: Option<Value>,
	) -> Result<ApiRequest, ConfigError> {
		let storefront = options.storefront.as_deref().unwrap_or(DEFAULT_STOREFRONT);
		let mut args = path_args.to_vec();

		if self.is_catalog() {
			args.push(("storefront", storefront));
		} else if options.storefront.is_some() {
			return Err(ConfigError::UnsupportedParameter {
				endpoint: self.name,
				param: "storefront",
			});
		}

		let endpoint = self.render_path(&args)?;
		let mut query = required;

		for param in [
			OptionalParam::Limit,
			OptionalParam::Offset,
			OptionalParam::Types,
			OptionalParam::Include,
		] {
			let value = options.value_of(param);

			if value.is_none() {
				continue;
			}
			if !self.accepts(param) {
				return Err(ConfigError::UnsupportedParameter {
					endpoint: self.name,
					param: param.as_str(),
				});
			}

			query.insert_opt(param.as_str(), value);
		}

		let mut request = ApiRequest::new(self.method, endpoint).with_query(query);

		request.payload = payload;

		Ok(request)
	}
}

fn validate_segment(name: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.is_empty()
		|| value.chars().any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
	{
		return Err(ConfigError::InvalidPathParameter { name, value: value.to_owned() });
	}

	Ok(())
}

/// `GET /catalog/{storefront}/search`
pub const SEARCH: Endpoint = Endpoint {
	name: "search",
	method: Method::Get,
	path: "/catalog/{storefront}/search",
	accepts: &[OptionalParam::Limit, OptionalParam::Offset, OptionalParam::Types],
};
/// `GET /catalog/{storefront}/songs/{id}`
pub const CATALOG_SONG: Endpoint = Endpoint {
	name: "catalog_song",
	method: Method::Get,
	path: "/catalog/{storefront}/songs/{id}",
	accepts: &[OptionalParam::Include],
};
/// `GET /catalog/{storefront}/songs?ids=…` and `?filter[isrc]=…`
pub const CATALOG_SONGS: Endpoint = Endpoint {
	name: "catalog_songs",
	method: Method::Get,
	path: "/catalog/{storefront}/songs",
	accepts: &[OptionalParam::Include],
};
/// `GET /catalog/{storefront}/playlists/{id}`
pub const CATALOG_PLAYLIST: Endpoint = Endpoint {
	name: "catalog_playlist",
	method: Method::Get,
	path: "/catalog/{storefront}/playlists/{id}",
	accepts: &[OptionalParam::Include],
};
/// `GET /catalog/{storefront}/playlists?ids=…`
pub const CATALOG_PLAYLISTS: Endpoint = Endpoint {
	name: "catalog_playlists",
	method: Method::Get,
	path: "/catalog/{storefront}/playlists",
	accepts: &[OptionalParam::Include],
};
/// `GET /catalog/{storefront}/genres/{id}`
pub const CATALOG_GENRE: Endpoint = Endpoint {
	name: "catalog_genre",
	method: Method::Get,
	path: "/catalog/{storefront}/genres/{id}",
	accepts: &[OptionalParam::Include],
};
/// `GET /catalog/{storefront}/genres?ids=…`
pub const CATALOG_GENRES: Endpoint = Endpoint {
	name: "catalog_genres",
	method: Method::Get,
	path: "/catalog/{storefront}/genres",
	accepts: &[OptionalParam::Include],
};
/// `POST /me/library/playlists`
pub const LIBRARY_PLAYLIST_CREATE: Endpoint = Endpoint {
	name: "library_playlist_create",
	method: Method::Post,
	path: "/me/library/playlists",
	accepts: &[OptionalParam::Include],
};
/// `PATCH /me/library/playlists/{id}`
pub const LIBRARY_PLAYLIST_UPDATE: Endpoint = Endpoint {
	name: "library_playlist_update",
	method: Method::Patch,
	path: "/me/library/playlists/{id}",
	accepts: &[],
};
/// `DELETE /me/library/playlists/{id}`
pub const LIBRARY_PLAYLIST_DELETE: Endpoint = Endpoint {
	name: "library_playlist_delete",
	method: Method::Delete,
	path: "/me/library/playlists/{id}",
	accepts: &[],
};
/// `POST /me/library/playlists/{id}/tracks`
pub const LIBRARY_PLAYLIST_ADD_TRACKS: Endpoint = Endpoint {
	name: "library_playlist_add_tracks",
	method: Method::Post,
	path: "/me/library/playlists/{id}/tracks",
	accepts: &[],
};
/// `PUT /me/library/playlists/{id}/tracks`
pub const LIBRARY_PLAYLIST_REPLACE_TRACKS: Endpoint = Endpoint {
	name: "library_playlist_replace_tracks",
	method: Method::Put,
	path: "/me/library/playlists/{id}/tracks",
	accepts: &[],
};
/// `DELETE /me/library/playlists/{id}?ids[library-songs]=…&mode=all`
pub const LIBRARY_PLAYLIST_REMOVE_TRACKS: Endpoint = Endpoint {
	name: "library_playlist_remove_tracks",
	method: Method::Delete,
	path: "/me/library/playlists/{id}",
	accepts: &[],
};
/// `GET /me/library/playlists/{id}`
pub const LIBRARY_PLAYLIST: Endpoint = Endpoint {
	name: "library_playlist",
	method: Method::Get,
	path: "/me/library/playlists/{id}",
	accepts: &[OptionalParam::Include],
};
/// `GET /me/library/playlists`
pub const LIBRARY_PLAYLISTS: Endpoint = Endpoint {
	name: "library_playlists",
	method: Method::Get,
	path: "/me/library/playlists",
	accepts: &[OptionalParam::Limit, OptionalParam::Include],
};
/// `GET /me/history/heavy-rotation`
pub const HEAVY_ROTATION: Endpoint = Endpoint {
	name: "heavy_rotation",
	method: Method::Get,
	path: "/me/history/heavy-rotation",
	accepts: &[OptionalParam::Limit, OptionalParam::Offset],
};
/// `GET /me/recent/played`
pub const RECENTLY_PLAYED: Endpoint = Endpoint {
	name: "recently_played",
	method: Method::Get,
	path: "/me/recent/played",
	accepts: &[OptionalParam::Limit, OptionalParam::Offset],
};
/// `GET /me/library/recently-added`
pub const RECENTLY_ADDED: Endpoint = Endpoint {
	name: "recently_added",
	method: Method::Get,
	path: "/me/library/recently-added",
	accepts: &[OptionalParam::Limit, OptionalParam::Offset],
};
/// `GET /me/library/songs`
pub const LIBRARY_SONGS: Endpoint = Endpoint {
	name: "library_songs",
	method: Method::Get,
	path: "/me/library/songs",
	accepts: &[OptionalParam::Limit, OptionalParam::Include],
};

/// Every endpoint in the table.
pub const ALL: &[Endpoint] = &[
	SEARCH,
	CATALOG_SONG,
	CATALOG_SONGS,
	CATALOG_PLAYLIST,
	CATALOG_PLAYLISTS,
	CATALOG_GENRE,
	CATALOG_GENRES,
	LIBRARY_PLAYLIST_CREATE,
	LIBRARY_PLAYLIST_UPDATE,
	LIBRARY_PLAYLIST_DELETE,
	LIBRARY_PLAYLIST_ADD_TRACKS,
	LIBRARY_PLAYLIST_REPLACE_TRACKS,
	LIBRARY_PLAYLIST_REMOVE_TRACKS,
	LIBRARY_PLAYLIST,
	LIBRARY_PLAYLISTS,
	HEAVY_ROTATION,
	RECENTLY_PLAYED,
	RECENTLY_ADDED,
	LIBRARY_SONGS,
];
