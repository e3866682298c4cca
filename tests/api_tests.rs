//! Tests for the catalog client against mock servers.

use serde_json::json;
use songlist::{
    AddSongForm, CatalogApi, CatalogError, ClientConfig, FormStatus, MemorySession,
    PlaylistsPage, Session, SongDetailPage, SongListPage, SongMedia, ThumbnailFile, ViewState,
};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api_for(server: &MockServer) -> CatalogApi {
    CatalogApi::new(ClientConfig::new(&server.uri()).unwrap()).unwrap()
}

fn logged_in() -> MemorySession {
    MemorySession::with_session(Session::new("token", Some(r#"{"name":"ana"}"#.into())))
}

fn sample_song(id: &str, title: &str, artist: &str) -> serde_json::Value {
    json!({
        "uuid": id,
        "title": title,
        "artist": artist,
        "description": "desc",
        "source": "https://youtu.be/dQw4w9WgXcQ",
        "thumbnail": format!("{}.png", id),
        "likes": 10,
        "comments": [],
        "playlist_name": "Favorites"
    })
}

// =============================================================================
// Playlists
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_wrapped_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    { "uuid": "p1", "playlist_name": "Favorites", "song_count": 3 },
                    { "uuid": "p2", "playlist_name": "Chill", "song_count": 0 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let playlists = api_for(&server).await.list_playlists().await.unwrap();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].name, "Favorites");
        assert_eq!(playlists[1].song_count, 0);
    }

    #[tokio::test]
    async fn test_bare_array_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "uuid": "p1", "playlist_name": "Favorites", "song_count": 3 }
            ])))
            .mount(&server)
            .await;

        let playlists = api_for(&server).await.list_playlists().await.unwrap();
        assert_eq!(playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_success_false_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Maintenance"
            })))
            .mount(&server)
            .await;

        let err = api_for(&server).await.list_playlists().await.unwrap_err();
        assert_eq!(err.to_string(), "Maintenance");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).await.list_playlists().await.unwrap_err();
        assert!(matches!(err, CatalogError::Api(_)));
        assert_eq!(err.to_string(), "Failed to fetch playlists");
    }

    #[tokio::test]
    async fn test_page_failure_then_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "Try later" })),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "uuid": "p1", "playlist_name": "Favorites", "song_count": 3 }]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let session = logged_in();
        let mut page = PlaylistsPage::new();

        page.load(&session, &api).await.unwrap();
        assert_eq!(page.state().error(), Some("Try later"));

        page.retry(&session, &api).await.unwrap();
        assert_eq!(page.state().data().map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn test_page_without_session_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut page = PlaylistsPage::new();
        let err = page
            .load(&MemorySession::new(), &api_for(&server).await)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::SessionMissing));
        assert_eq!(page.state(), &ViewState::Idle);
    }
}

// =============================================================================
// Song list
// =============================================================================

mod song_list {
    use super::*;

    #[tokio::test]
    async fn test_bare_array_with_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                sample_song("s1", "Bohemian Rhapsody", "Queen"),
                sample_song("s2", "Hotel California", "Eagles"),
                sample_song("s3", "Killer Queen", "Queen")
            ])))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let mut page = SongListPage::new("p1");
        page.load(&logged_in(), &api).await.unwrap();

        let list = page.state().data().unwrap();
        assert_eq!(list.playlist_name(), "Favorites");
        assert_eq!(list.visible().len(), 3);

        page.set_query("QUEEN");
        let titles: Vec<String> = page
            .state()
            .data()
            .unwrap()
            .visible()
            .iter()
            .map(|s| s.title.clone())
            .collect();
        assert_eq!(titles, vec!["Bohemian Rhapsody", "Killer Queen"]);
    }

    #[tokio::test]
    async fn test_wrapped_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [sample_song("s1", "Imagine", "John Lennon")]
            })))
            .mount(&server)
            .await;

        let songs = api_for(&server).await.list_songs("p2").await.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].artist, "John Lennon");
    }

    #[tokio::test]
    async fn test_unrecognized_shape_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/p3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let songs = api_for(&server).await.list_songs("p3").await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_reserved_characters_stay_in_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/a%2Fb%3Fc%23d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                sample_song("s1", "Imagine", "John Lennon")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let songs = api_for(&server).await.list_songs("a/b?c#d").await.unwrap();
        assert_eq!(songs.len(), 1);
    }

    #[tokio::test]
    async fn test_parent_segment_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let err = api.list_songs("..").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
        assert!(api.get_song(".").await.is_err());
    }

    #[tokio::test]
    async fn test_null_fields_keep_the_song() {
        let server = MockServer::start().await;
        let mut first = sample_song("s1", "Imagine", "John Lennon");
        first["description"] = json!(null);
        let mut second = sample_song("s2", "Yesterday", "The Beatles");
        second["likes"] = json!(null);
        second["thumbnail"] = json!(null);
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/p4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([first, second])))
            .mount(&server)
            .await;

        let songs = api_for(&server).await.list_songs("p4").await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].description, "");
        assert_eq!(songs[1].likes, 0);
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song-list/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Playlist not found" })),
            )
            .mount(&server)
            .await;

        let mut page = SongListPage::new("missing");
        page.load(&logged_in(), &api_for(&server).await)
            .await
            .unwrap();
        assert_eq!(page.state().error(), Some("Playlist not found"));
    }
}

// =============================================================================
// Song detail
// =============================================================================

mod song_detail {
    use super::*;

    #[tokio::test]
    async fn test_detail_with_comments_and_player() {
        let server = MockServer::start().await;
        let mut song = sample_song("s1", "Never Gonna Give You Up", "Rick Astley");
        song["comments"] = json!([
            { "comment_text": "Classic", "creator": "ana", "createdAt": "2024-01-01T00:00:00Z" }
        ]);
        Mock::given(method("GET"))
            .and(path("/playlists/song/s1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": song })),
            )
            .mount(&server)
            .await;

        let mut page = SongDetailPage::new("s1");
        page.load(&logged_in(), &api_for(&server).await)
            .await
            .unwrap();

        let detail = page.state().data().unwrap();
        assert_eq!(detail.song.comment_count(), 1);
        assert_eq!(detail.song.comments[0].creator, "ana");
        assert!(matches!(detail.media, SongMedia::Embed { ref video_id, .. } if video_id == "dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_thumbnail_fallback() {
        let server = MockServer::start().await;
        let mut song = sample_song("s2", "Live Set", "DJ");
        song["source"] = json!("https://example.com/x");
        Mock::given(method("GET"))
            .and(path("/playlists/song/s2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": song })),
            )
            .mount(&server)
            .await;

        let mut page = SongDetailPage::new("s2");
        page.load(&logged_in(), &api_for(&server).await)
            .await
            .unwrap();

        let expected = format!("{}/thumbnail/s2.png", server.uri());
        assert_eq!(
            page.state().data().unwrap().media,
            SongMedia::Thumbnail { url: expected }
        );
    }

    #[tokio::test]
    async fn test_success_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song/s3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let err = api_for(&server).await.get_song("s3").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch song details");
    }

    #[tokio::test]
    async fn test_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/song/s4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })),
            )
            .mount(&server)
            .await;

        let err = api_for(&server).await.get_song("s4").await.unwrap_err();
        assert_eq!(err.to_string(), "Song not found");
    }
}

// =============================================================================
// Add song
// =============================================================================

mod add_song {
    use super::*;

    fn filled_form() -> AddSongForm {
        let mut form = AddSongForm::open(&logged_in()).unwrap();
        form.fields.title = "New Song".into();
        form.fields.artist = "New Artist".into();
        form.fields.description = "Fresh".into();
        form.fields.source = "https://youtu.be/dQw4w9WgXcQ".into();
        form.select_thumbnail(ThumbnailFile::new("cover.png", "image/png", vec![1u8; 1024]))
            .unwrap();
        form
    }

    #[tokio::test]
    async fn test_submit_success_clears_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/song"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("name=\"title\""))
            .and(body_string_contains("New Artist"))
            .and(body_string_contains("filename=\"cover.png\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "message": "Created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut form = filled_form();
        let status = form.submit(&api_for(&server).await).await.clone();

        assert_eq!(status, FormStatus::Succeeded("Song added successfully!".into()));
        assert_eq!(form.fields.title, "");
        assert_eq!(form.fields.artist, "");
        assert_eq!(form.fields.description, "");
        assert_eq!(form.fields.source, "");
        assert!(form.fields.thumbnail.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/song"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Duplicate"
            })))
            .mount(&server)
            .await;

        let mut form = filled_form();
        form.submit(&api_for(&server).await).await;

        assert_eq!(form.status().error(), Some("Duplicate"));
        assert_eq!(form.fields.title, "New Song");
        assert!(form.fields.thumbnail.is_some());
    }

    #[tokio::test]
    async fn test_server_error_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/song"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut form = filled_form();
        form.submit(&api_for(&server).await).await;
        assert_eq!(form.status().error(), Some("Failed to add song"));
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/song"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(0)
            .mount(&server)
            .await;

        let mut form = filled_form();
        form.fields.artist.clear();
        form.submit(&api_for(&server).await).await;
        assert_eq!(form.status().error(), Some("All fields are required"));
    }

    #[tokio::test]
    async fn test_transport_error_is_reported() {
        // Discard port; nothing answers.
        let api = CatalogApi::new(ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();

        let mut form = filled_form();
        form.submit(&api).await;
        assert!(matches!(form.status(), FormStatus::Failed(msg) if !msg.is_empty()));
    }

    #[test]
    fn test_form_requires_session() {
        let err = AddSongForm::open(&MemorySession::new()).unwrap_err();
        assert!(matches!(err, CatalogError::SessionMissing));
    }
}

// =============================================================================
// Thumbnails
// =============================================================================

mod thumbnails {
    use super::*;

    #[tokio::test]
    async fn test_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thumbnail/cover.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .mount(&server)
            .await;

        let bytes = api_for(&server).await.get_thumbnail("cover.png").await.unwrap();
        assert_eq!(&bytes[..], &[0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thumbnail/nope.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(api_for(&server).await.get_thumbnail("nope.png").await.is_err());
    }
}
