//! Library endpoints scoped to the music user: playlists, history, and songs.
//!
//! These endpoints require a music user token (see
//! [`AppleMusicClient::set_access_token`]); the API rejects them with `401`/`403` otherwise.

// self
use crate::{
	_prelude::*,
	client::AppleMusicClient,
	endpoint::{self, RequestOptions},
	http::HttpTransport,
	request::{QueryParams, QueryValue},
	response::ResponseDocument,
};

/// Kind of track referenced in a library playlist request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackKind {
	/// Catalog song.
	Songs,
	/// Catalog music video.
	MusicVideos,
	/// Library song.
	LibrarySongs,
	/// Library music video.
	LibraryMusicVideos,
}

/// Track reference sent in playlist payloads (`{ "id": …, "type": … }`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTrack {
	/// Catalog or library identifier, always in string form.
	pub id: String,
	/// Track kind.
	#[serde(rename = "type")]
	pub kind: TrackKind,
}
impl LibraryTrack {
	/// Creates a reference, coercing the identifier to its string form.
	pub fn new(id: impl Display, kind: TrackKind) -> Self {
		Self { id: id.to_string(), kind }
	}

	/// Shorthand for a catalog song reference.
	pub fn song(id: impl Display) -> Self {
		Self::new(id, TrackKind::Songs)
	}
}

/// Library playlist creation request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewLibraryPlaylist {
	/// Playlist name.
	pub name: String,
	/// Optional description.
	pub description: Option<String>,
	/// Initial tracks.
	pub tracks: Vec<LibraryTrack>,
}
impl NewLibraryPlaylist {
	/// Starts a request for a playlist called `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), ..Default::default() }
	}

	/// Sets the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Appends one track.
	pub fn track(mut self, track: LibraryTrack) -> Self {
		self.tracks.push(track);

		self
	}

	/// Builds the JSON payload: `attributes`, plus `relationships.tracks.data` when tracks exist.
	pub fn to_payload(&self) -> Value {
		let mut attributes = JsonMap::new();

		attributes.insert("name".into(), Value::from(self.name.as_str()));

		if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
			attributes.insert("description".into(), Value::from(description));
		}

		let mut payload = JsonMap::new();

		payload.insert("attributes".into(), Value::Object(attributes));

		if !self.tracks.is_empty() {
			let mut relationships = JsonMap::new();

			relationships.insert("tracks".into(), serde_json::json!({ "data": self.tracks }));
			payload.insert("relationships".into(), Value::Object(relationships));
		}

		Value::Object(payload)
	}
}

/// Builds `{ "data": [ { "id": "<id>", "type": "songs" }, … ] }` from raw identifiers.
pub fn song_track_data<I>(track_ids: I) -> Value
where
	I: IntoIterator,
	I::Item: Display,
{
	let data: Vec<LibraryTrack> = track_ids.into_iter().map(LibraryTrack::song).collect();

	serde_json::json!({ "data": data })
}

impl<C> AppleMusicClient<C>
where
	C: HttpTransport,
{
	/// Creates a library playlist.
	pub fn user_playlist_create(
		&self,
		playlist: &NewLibraryPlaylist,
		options: &RequestOptions,
	) -> Result<ResponseDocument> {
		self.call(
			&endpoint::LIBRARY_PLAYLIST_CREATE,
			&[],
			QueryParams::new(),
			options,
			Some(playlist.to_payload()),
		)
	}

	/// Updates a library playlist's name and/or description; unset values are left untouched.
	pub fn user_playlist_update(
		&self,
		id: &str,
		name: Option<&str>,
		description: Option<&str>,
	) -> Result<ResponseDocument> {
		let mut attributes = JsonMap::new();

		if let Some(name) = name.filter(|name| !name.is_empty()) {
			attributes.insert("name".into(), Value::from(name));
		}
		if let Some(description) = description.filter(|description| !description.is_empty()) {
			attributes.insert("description".into(), Value::from(description));
		}

		let payload = serde_json::json!({ "attributes": attributes });

		self.call(
			&endpoint::LIBRARY_PLAYLIST_UPDATE,
			&[("id", id)],
			QueryParams::new(),
			&RequestOptions::new(),
			Some(payload),
		)
	}

	/// Deletes a library playlist.
	pub fn user_playlist_delete(&self, id: &str) -> Result<ResponseDocument> {
		self.call(
			&endpoint::LIBRARY_PLAYLIST_DELETE,
			&[("id", id)],
			QueryParams::new(),
			&RequestOptions::new(),
			None,
		)
	}

	/// Appends catalog songs to a library playlist.
	pub fn user_playlist_add_tracks<I>(&self, id: &str, track_ids: I) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		self.call(
			&endpoint::LIBRARY_PLAYLIST_ADD_TRACKS,
			&[("id", id)],
			QueryParams::new(),
			&RequestOptions::new(),
			Some(song_track_data(track_ids)),
		)
	}

	/// Replaces the track list of a library playlist with catalog songs.
	pub fn user_playlist_replace_tracks<I>(&self, id: &str, track_ids: I) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		self.call(
			&endpoint::LIBRARY_PLAYLIST_REPLACE_TRACKS,
			&[("id", id)],
			QueryParams::new(),
			&RequestOptions::new(),
			Some(song_track_data(track_ids)),
		)
	}

	/// Removes every occurrence of the given library songs from a playlist.
	pub fn user_playlist_remove_tracks<I>(&self, id: &str, track_ids: I) -> Result<ResponseDocument>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let required = QueryParams::new()
			.with("ids[library-songs]", QueryValue::repeated(track_ids))
			.with("mode", "all");

		self.call(
			&endpoint::LIBRARY_PLAYLIST_REMOVE_TRACKS,
			&[("id", id)],
			required,
			&RequestOptions::new(),
			None,
		)
	}

	/// Fetches a single library playlist.
	pub fn user_playlist(&self, id: &str, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::LIBRARY_PLAYLIST, &[("id", id)], QueryParams::new(), options, None)
	}

	/// Fetches every library playlist (one page).
	pub fn user_playlists(&self, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::LIBRARY_PLAYLISTS, &[], QueryParams::new(), options, None)
	}

	/// Fetches the heavy-rotation history.
	pub fn user_heavy_rotation(&self, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::HEAVY_ROTATION, &[], QueryParams::new(), options, None)
	}

	/// Fetches recently played resources.
	pub fn user_recent_played(&self, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::RECENTLY_PLAYED, &[], QueryParams::new(), options, None)
	}

	/// Fetches recently added library resources.
	pub fn user_recent_added(&self, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::RECENTLY_ADDED, &[], QueryParams::new(), options, None)
	}

	/// Fetches library songs (one page).
	pub fn user_songs(&self, options: &RequestOptions) -> Result<ResponseDocument> {
		self.call(&endpoint::LIBRARY_SONGS, &[], QueryParams::new(), options, None)
	}
}
