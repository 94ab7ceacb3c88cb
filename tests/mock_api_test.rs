#![cfg(feature = "mock")]

use lastfm_ws::{AlbumApi, Envelope, LastFmError, MockLastFmApi, Params, TrackApi};

fn envelope(payload: &str) -> Envelope {
    Envelope::from_body(&format!("<lfm status=\"ok\">{payload}</lfm>")).unwrap()
}

#[tokio::test]
async fn test_album_get_info_with_mock() {
    let mut mock_api = MockLastFmApi::new();

    mock_api
        .expect_get()
        .withf(|method, params, secure| {
            method == "album.getInfo" && params.contains("mbid") && !*secure
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(envelope(
                "<album><name>Believe</name><artist>Cher</artist><playcount>212991</playcount></album>",
            ))
        });

    let album = AlbumApi::new(&mock_api)
        .get_info(Params::new().with("mbid", "61bf0388-b8a9-48f4-81d1-7eb02706dfb0"))
        .await
        .unwrap();

    assert_eq!(album.name.as_deref(), Some("Believe"));
    assert_eq!(album.artist_name(), Some("Cher"));
    assert_eq!(album.playcount, Some(212991));
}

#[tokio::test]
async fn test_album_get_tags_checks_session_first() {
    let mut mock_api = MockLastFmApi::new();

    mock_api
        .expect_requires_authentication()
        .times(1)
        .returning(|| Err(LastFmError::AuthRequired));
    mock_api.expect_get().never();

    let result = AlbumApi::new(&mock_api)
        .get_tags(Params::new().with("artist", "Cher").with("album", "Believe"))
        .await;

    assert!(matches!(result, Err(LastFmError::AuthRequired)));
}

#[tokio::test]
async fn test_track_love_posts_after_session_check() {
    let mut mock_api = MockLastFmApi::new();

    mock_api
        .expect_requires_authentication()
        .times(1)
        .returning(|| Ok(()));
    mock_api
        .expect_post()
        .withf(|method, params| method == "track.love" && params.contains("track"))
        .times(1)
        .returning(|_, _| Ok(envelope("")));

    TrackApi::new(&mock_api)
        .love(Params::new().with("artist", "Cher").with("track", "Believe"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_track_get_similar_propagates_api_error() {
    let mut mock_api = MockLastFmApi::new();

    mock_api.expect_get().times(1).returning(|_, _, _| {
        Err(LastFmError::Api {
            code: 6,
            message: "Track not found".to_string(),
        })
    });

    let err = TrackApi::new(&mock_api)
        .get_similar(Params::new().with("artist", "Cher").with("track", "Nope"))
        .await
        .unwrap_err();

    assert_eq!(err.api_message(), Some("Track not found"));
}
