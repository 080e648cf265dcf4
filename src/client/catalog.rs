//! Catalog endpoints: search plus songs, playlists, and genres scoped by storefront.

// self
use crate::{
	_prelude::*,
	client::AppleMusicClient,
	endpoint::{self, RequestOptions},
	http::HttpTransport,
	request::{QueryParams, QueryValue},
	response::ResponseDocument,
};

/// Resource type searched when the caller names none.
pub const DEFAULT_SEARCH_TYPES: &str = "songs";

impl<C> AppleMusicClient<C>
where
	C: HttpTransport,
{
	/// Searches the catalog for `term`.
	///
	/// Returns `Ok(None)` without sending a request when `term` is empty. `types` defaults to
	/// [`DEFAULT_SEARCH_TYPES`]; `limit`, `offset`, and `storefront` come from `options`.
	pub fn search(&self, term: &str, options: &RequestOptions) -> Result<Option<ResponseDocument>> {
		if term.is_empty() {
			return Ok(None);
		}

		let required =
			QueryParams::new().with("term", term).with("types", DEFAULT_SEARCH_TYPES);

		self.call(&endpoint::SEARCH, &[], required, options, None).map(Some)
	}

	/// Fetches a single catalog song.
	pub fn get_song(&self, id: &str, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::CATALOG_SONG, &[("id", id)], QueryParams::new(), options, None)
	}

	/// Fetches several catalog songs by id (`ids=1,2,3`).
	pub fn get_songs<I>(&self, ids: I, options: &RequestOptions) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let required = QueryParams::new().with("ids", QueryValue::comma_joined(ids));

		self.call(&endpoint::CATALOG_SONGS, &[], required, options, None)
	}

	/// Fetches catalog songs by ISRC (`filter[isrc]=…`).
	pub fn get_songs_by_isrc<I>(&self, isrcs: I, options: &RequestOptions) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let required = QueryParams::new().with("filter[isrc]", QueryValue::comma_joined(isrcs));

		self.call(&endpoint::CATALOG_SONGS, &[], required, options, None)
	}

	/// Fetches a single catalog playlist.
	pub fn get_playlist(&self, id: &str, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::CATALOG_PLAYLIST, &[("id", id)], QueryParams::new(), options, None)
	}

	/// Fetches several catalog playlists by id.
	pub fn get_playlists<I>(&self, ids: I, options: &RequestOptions) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let required = QueryParams::new().with("ids", QueryValue::comma_joined(ids));

		self.call(&endpoint::CATALOG_PLAYLISTS, &[], required, options, None)
	}

	/// Fetches a single catalog genre.
	pub fn get_genre(&self, id: &str, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::CATALOG_GENRE, &[("id", id)], QueryParams::new(), options, None)
	}

	/// Fetches several catalog genres by id.
	pub fn get_genres<I>(&self, ids: I, options: &RequestOptions) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let required = QueryParams::new().with("ids", QueryValue::comma_joined(ids));

		self.call(&endpoint::CATALOG_GENRES, &[], required, options, None)
	}
}
