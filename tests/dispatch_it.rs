mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
// self
use apple_music_api::{endpoint::RequestOptions, error::Error};

#[test]
fn catalog_lookup_sends_developer_token_and_joined_ids() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());
	let bearer = format!("Bearer {}", client.developer_token().expose());
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/v1/catalog/us/songs")
			.query_param("ids", "1,2,3")
			.header("authorization", bearer.as_str())
			.header("content-type", "application/json")
			.body("{}");
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"data\":[{\"id\":\"1\",\"type\":\"songs\"}]}");
	});
	let document = client
		.get_songs(["1", "2", "3"], &RequestOptions::new())
		.expect("Catalog lookup should succeed against the mock server.");

	mock.assert();

	assert_eq!(document.data().map(Vec::len), Some(1));
}

#[test]
fn music_user_token_is_attached_once_set() {
	let server = MockServer::start();
	let mut client = common::reqwest_client(&server.base_url());

	client.set_access_token("music-user-token-1");

	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/v1/me/library/playlists")
			.header("music-user-token", "music-user-token-1");
		then.status(200).body("{\"data\":[]}");
	});

	client.user_playlists(&RequestOptions::new()).expect("Library listing should succeed.");

	mock.assert();
}

#[test]
fn add_tracks_posts_song_references() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());
	let mock = server.mock(|when, then| {
		when.method(POST).path("/v1/me/library/playlists/p.1/tracks").json_body(json!({
			"data": [
				{ "id": "10", "type": "songs" },
				{ "id": "20", "type": "songs" }
			]
		}));
		then.status(204);
	});
	let document = client
		.user_playlist_add_tracks("p.1", [10, 20])
		.expect("Adding tracks should succeed.");

	mock.assert();

	assert!(document.is_empty());
}

#[test]
fn remove_tracks_repeats_library_song_ids() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());
	let mock = server.mock(|when, then| {
		when.method(DELETE)
			.path("/v1/me/library/playlists/p.1")
			.query_param("ids[library-songs]", "i.1")
			.query_param("ids[library-songs]", "i.2")
			.query_param("mode", "all");
		then.status(204);
	});

	client.user_playlist_remove_tracks("p.1", ["i.1", "i.2"]).expect("Removal should succeed.");

	mock.assert();
}

#[test]
fn non_success_status_surfaces_status_and_body() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());
	let mock = server.mock(|when, then| {
		when.method(GET).path("/v1/catalog/us/songs/missing");
		then.status(404).body("{\"errors\":[{\"status\":\"404\"}]}");
	});
	let err = client
		.get_song("missing", &RequestOptions::new())
		.expect_err("A 404 should be reported as an error.");

	mock.assert();

	assert_eq!(err.status(), Some(404));
	assert!(
		matches!(err, Error::Http { status: 404, ref body } if body.contains("errors")),
		"Unexpected error: {err:?}."
	);
}

#[test]
fn server_errors_are_http_errors_too() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());

	server.mock(|when, then| {
		when.method(GET).path("/v1/me/recent/played");
		then.status(503).body("maintenance");
	});

	let err = client
		.user_recent_played(&RequestOptions::new())
		.expect_err("A 503 should be reported as an error.");

	assert!(matches!(err, Error::Http { status: 503, .. }), "Unexpected error: {err:?}.");
}

#[test]
fn empty_success_body_yields_an_empty_document() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());

	server.mock(|when, then| {
		when.method(DELETE).path("/v1/me/library/playlists/p.9");
		then.status(204);
	});

	let document = client.user_playlist_delete("p.9").expect("Deletion should succeed.");

	assert!(document.is_empty());
	assert!(document.next_cursor().is_none());
}

#[test]
fn malformed_success_body_is_a_decode_error() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());

	server.mock(|when, then| {
		when.method(GET).path("/v1/catalog/us/genres/14");
		then.status(200).body("<html>not json</html>");
	});

	let err = client
		.get_genre("14", &RequestOptions::new())
		.expect_err("A non-JSON body should be rejected.");

	assert!(matches!(err, Error::MalformedResponse { status: 200, .. }), "Unexpected error: {err:?}.");
}

#[test]
fn trailing_garbage_after_a_json_body_is_a_decode_error() {
	let server = MockServer::start();
	let client = common::reqwest_client(&server.base_url());

	server.mock(|when, then| {
		when.method(GET).path("/v1/catalog/us/genres");
		then.status(200).body("{\"data\":[]} <html>");
	});

	let err = client
		.get_genres([14], &RequestOptions::new())
		.expect_err("A body with content after the JSON object should be rejected.");

	assert!(
		matches!(err, Error::MalformedResponse { status: 200, ref path, .. } if path == "<end>"),
		"Unexpected error: {err:?}."
	);
}

#[test]
fn slow_responses_time_out() {
	let server = MockServer::start();
	let client = common::reqwest_client_with(&server.base_url(), |builder| {
		builder.timeout(Duration::milliseconds(200))
	});

	server.mock(|when, then| {
		when.method(GET).path("/v1/me/library/songs");
		then.status(200).body("{}").delay(StdDuration::from_secs(3));
	});

	let err = client
		.user_songs(&RequestOptions::new())
		.expect_err("The request should exceed the configured timeout.");

	assert!(err.is_timeout(), "Unexpected error: {err:?}.");
	assert!(matches!(err, Error::Timeout { timeout } if timeout == Duration::milliseconds(200)));
}

#[test]
fn custom_api_version_replaces_the_default_prefix() {
	let server = MockServer::start();
	let client =
		common::reqwest_client_with(&server.base_url(), |builder| builder.api_version("v2"));
	let mock = server.mock(|when, then| {
		when.method(GET).path("/v2/catalog/gb/playlists/pl.1").query_param("include", "tracks");
		then.status(200).body("{\"data\":[]}");
	});

	client
		.get_playlist("pl.1", &RequestOptions::new().storefront("gb").include("tracks"))
		.expect("Playlist lookup should succeed.");

	mock.assert();
}
