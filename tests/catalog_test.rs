mod common;

use common::*;
use lastfm_ws::{LastFmError, Params};

#[tokio::test]
async fn test_playlist_add_track_sends_playlist_id() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(""));
    let client = authenticated_client(&fake);

    client
        .playlist()
        .add_track(
            Params::new()
                .with("playlist_id", 5_417_325u64)
                .with("artist", "Cher")
                .with("track", "Believe"),
        )
        .await
        .unwrap();

    let request = fake.last_request();
    assert_eq!(request.method, "POST");
    let params = request.params();
    assert_eq!(params["method"], "playlist.addTrack");
    assert_eq!(params["playlistID"], "5417325");
    assert!(!params.contains_key("playlistId"));
    assert_eq!(params["sk"], SESSION_KEY);
    assert!(params.contains_key("api_sig"));
}

#[tokio::test]
async fn test_playlist_create_returns_new_playlist() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<playlists user="RJ">
            <playlist>
                <id>5636127</id>
                <title>Eminem is awesome</title>
                <description>This is a description</description>
                <size>0</size>
                <duration>0</duration>
                <streamable>0</streamable>
                <url>http://www.last.fm/user/RJ/library/playlists/3ioi7_eminem_is_awesome</url>
            </playlist>
        </playlists>"#,
    ));
    let client = authenticated_client(&fake);

    let playlist = client
        .playlist()
        .create(
            Params::new()
                .with("title", "Eminem is awesome")
                .with("description", "This is a description"),
        )
        .await
        .unwrap();

    assert_eq!(playlist.id, Some(5636127));
    assert_eq!(playlist.title.as_deref(), Some("Eminem is awesome"));
    assert_eq!(fake.last_request().params()["method"], "playlist.create");
}

#[tokio::test]
async fn test_playlist_create_without_payload_is_a_parse_error() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok("<playlists/>"));
    let client = authenticated_client(&fake);

    let result = client.playlist().create(Params::new()).await;
    assert!(matches!(result, Err(LastFmError::Parse(_))));
}

#[tokio::test]
async fn test_playlist_fetch_sends_playlist_url() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<playlist version="1" xmlns="http://xspf.org/ns/0/">
            <title>Best of Cher</title>
            <creator>http://www.last.fm/user/RJ</creator>
            <trackList>
                <track><title>Believe</title><creator>Cher</creator></track>
            </trackList>
        </playlist>"#,
    ));
    let client = client(&fake);

    let playlist = client
        .playlist()
        .fetch(Params::new().with("playlist_url", "lastfm://playlist/album/2026126"))
        .await
        .unwrap();

    assert_eq!(playlist.tracks.len(), 1);
    let request = fake.last_request();
    assert_eq!(request.method, "GET");
    let params = request.params();
    assert_eq!(params["method"], "playlist.fetch");
    assert_eq!(params["playlistURL"], "lastfm://playlist/album/2026126");
}

#[tokio::test]
async fn test_radio_get_playlist_keeps_speed_multiplier() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<playlist version="1" xmlns="http://xspf.org/ns/0/">
            <title>+Cher+Similar+Artists</title>
            <creator>Last.fm</creator>
            <trackList>
                <track>
                    <location>http://play.last.fm/user/a.mp3</location>
                    <title>Strong Enough</title>
                    <creator>Cher</creator>
                    <duration>222000</duration>
                </track>
            </trackList>
        </playlist>"#,
    ));
    let client = authenticated_client(&fake);

    let playlist = client
        .radio()
        .get_playlist(
            Params::new()
                .with("discovery", true)
                .with("speed_multiplier", "2.0")
                .with("bitrate", 128u32),
        )
        .await
        .unwrap();

    assert_eq!(playlist.tracks[0].duration, Some(222000));
    let request = fake.last_request();
    assert_eq!(request.method, "GET");
    let params = request.params();
    assert_eq!(params["method"], "radio.getPlaylist");
    assert_eq!(params["speed_multiplier"], "2.0");
    assert!(!params.contains_key("speedMultiplier"));
    assert_eq!(params["sk"], SESSION_KEY);
    assert!(params.contains_key("api_sig"));
}

#[tokio::test]
async fn test_radio_needs_a_session() {
    let fake = FakeHttpClient::new();
    let client = client(&fake);

    assert!(matches!(
        client.radio().get_playlist(Params::new()).await,
        Err(LastFmError::AuthRequired)
    ));
    assert!(matches!(
        client
            .radio()
            .tune(Params::new().with("station", "lastfm://artist/cher/similarartists"))
            .await,
        Err(LastFmError::AuthRequired)
    ));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_radio_tune_and_search() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<station>
            <type>artist</type>
            <name>Cher Similar Artists</name>
            <url>lastfm://artist/cher/similarartists</url>
            <supportsdiscovery>1</supportsdiscovery>
        </station>"#,
    ));
    fake.respond(&ok(
        r#"<results for="cher">
            <stations>
                <station><type>artist</type><name>Cher Similar Artists</name></station>
                <station><type>tag</type><name>Cher Tag Radio</name></station>
            </stations>
        </results>"#,
    ));
    let client = authenticated_client(&fake);

    let station = client
        .radio()
        .tune(Params::new().with("station", "lastfm://artist/cher/similarartists"))
        .await
        .unwrap();
    assert_eq!(station.station_type.as_deref(), Some("artist"));
    assert_eq!(fake.last_request().method, "POST");

    let stations = client
        .radio()
        .search(Params::new().with("name", "cher"))
        .await
        .unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[1].name.as_deref(), Some("Cher Tag Radio"));
    assert_eq!(fake.last_request().params()["method"], "radio.search");
}

#[test_log::test(tokio::test)]
async fn test_fingerprint_metadata_sends_fingerprintid() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<tracks fingerprint="1234">
            <track rank="1.0">
                <name>Merciless</name>
                <mbid/>
                <url>http://www.last.fm/music/The+Watchmen/_/Merciless</url>
                <artist><name>The Watchmen</name></artist>
            </track>
            <track rank="0.4"><name>Believe</name><artist><name>Cher</name></artist></track>
        </tracks>"#,
    ));
    let client = client(&fake);

    let tracks = client
        .track()
        .get_fingerprint_metadata(Params::new().with("fingerprint_id", 1234u64))
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artist_name(), Some("The Watchmen"));
    let params = fake.last_request().params();
    assert_eq!(params["method"], "track.getFingerprintMetadata");
    assert_eq!(params["fingerprintid"], "1234");
    assert!(!params.contains_key("fingerprintId"));
}

#[tokio::test]
async fn test_track_correction_and_top_fans() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<corrections>
            <correction index="0">
                <track>
                    <name>Mr. Brownstone</name>
                    <url>www.last.fm/music/Guns+N%27+Roses/_/Mr.+Brownstone</url>
                    <artist><name>Guns N' Roses</name></artist>
                </track>
            </correction>
        </corrections>"#,
    ));
    fake.respond(&ok(
        r#"<topfans artist="Cher" track="Believe">
            <user><name>hyperfan</name><weight>31000</weight></user>
            <user><name>listener</name><weight>2000</weight></user>
        </topfans>"#,
    ));
    let client = client(&fake);

    let corrected = client
        .track()
        .get_correction(
            Params::new()
                .with("artist", "guns and roses")
                .with("track", "Mrbrownstone"),
        )
        .await
        .unwrap();
    assert_eq!(corrected[0].name.as_deref(), Some("Mr. Brownstone"));
    assert_eq!(corrected[0].artist_name(), Some("Guns N' Roses"));

    let fans = client
        .track()
        .get_top_fans(Params::new().with("artist", "Cher").with("track", "Believe"))
        .await
        .unwrap();
    assert_eq!(fans.len(), 2);
    assert_eq!(fans[0].weight, Some(31000));
    assert_eq!(fake.last_request().params()["method"], "track.getTopFans");
}

#[tokio::test]
async fn test_venue_search_and_events() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<results for="arena">
            <venuematches>
                <venue><id>8777860</id><name>Barrowland Ballroom</name></venue>
            </venuematches>
        </results>"#,
    ));
    fake.respond(&ok(
        r#"<events venue="8777860">
            <event><id>1073657</id><title>Weezer</title></event>
            <event><id>1073658</id><title>Pixies</title></event>
        </events>"#,
    ));
    let client = client(&fake);

    let venues = client
        .venue()
        .search(Params::new().with("venue", "arena").with("country", "UK"))
        .await
        .unwrap();
    assert_eq!(venues[0].id, Some(8777860));
    assert_eq!(fake.last_request().params()["method"], "venue.search");

    let events = client
        .venue()
        .get_past_events(Params::new().with("venue", 8777860u64))
        .await
        .unwrap();
    assert_eq!(events.len(), 2);
    let params = fake.last_request().params();
    assert_eq!(params["method"], "venue.getPastEvents");
    assert_eq!(params["venue"], "8777860");
}

#[tokio::test]
async fn test_event_attendees() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<attendees event="328799" total="2">
            <user><name>rj</name><realname>Richard Jones</realname></user>
            <user><name>jaz</name></user>
        </attendees>"#,
    ));
    let client = client(&fake);

    let attendees = client
        .event()
        .get_attendees(Params::new().with("event", 328799u64))
        .await
        .unwrap();

    assert_eq!(attendees.len(), 2);
    assert_eq!(attendees[0].real_name.as_deref(), Some("Richard Jones"));
    assert_eq!(fake.last_request().params()["method"], "event.getAttendees");
}

#[tokio::test]
async fn test_user_info_and_recent_tracks() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<user>
            <name>RJ</name>
            <playcount>61816</playcount>
            <registered unixtime="1037793040">2002-11-20 11:50</registered>
        </user>"#,
    ));
    fake.respond(&ok(
        r#"<recenttracks user="RJ" page="1" perPage="10" totalPages="3019">
            <track nowplaying="true"><artist>Cher</artist><name>Believe</name></track>
            <track>
                <artist>Massive Attack</artist>
                <name>Teardrop</name>
                <date uts="1213031819">9 Jun 2008, 17:16</date>
            </track>
        </recenttracks>"#,
    ));
    let client = client(&fake);

    let user = client
        .user()
        .get_info(Params::new().with("user", "RJ"))
        .await
        .unwrap();
    assert_eq!(user.playcount, Some(61816));
    assert_eq!(user.registered.map(|d| d.timestamp()), Some(1037793040));

    let tracks = client
        .user()
        .get_recent_tracks(Params::new().with("user", "RJ").with("limit", 10u32))
        .await
        .unwrap();
    assert!(tracks[0].now_playing);
    assert_eq!(tracks[1].played_at.map(|d| d.timestamp()), Some(1213031819));
    let params = fake.last_request().params();
    assert_eq!(params["method"], "user.getRecentTracks");
    assert!(!params.contains_key("api_sig"));
}

#[tokio::test]
async fn test_user_recommendations_are_signed() {
    let fake = FakeHttpClient::new();
    let anonymous = client(&fake);
    assert!(matches!(
        anonymous.user().get_recommended_artists(Params::new()).await,
        Err(LastFmError::AuthRequired)
    ));
    assert!(fake.requests().is_empty());

    fake.respond(&ok(
        r#"<recommendations user="RJ">
            <artist><name>Madonna</name></artist>
        </recommendations>"#,
    ));
    let client = authenticated_client(&fake);
    let artists = client
        .user()
        .get_recommended_artists(Params::new())
        .await
        .unwrap();

    assert_eq!(artists[0].name.as_deref(), Some("Madonna"));
    let params = fake.last_request().params();
    assert_eq!(params["method"], "user.getRecommendedArtists");
    assert_eq!(params["sk"], SESSION_KEY);
    assert!(params.contains_key("api_sig"));
}

#[tokio::test]
async fn test_user_neighbours_method_name() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<neighbours user="RJ">
            <user><name>jaz</name><match>0.0473</match></user>
        </neighbours>"#,
    ));
    let client = client(&fake);

    let neighbours = client
        .user()
        .get_neighbours(Params::new().with("user", "RJ"))
        .await
        .unwrap();

    assert_eq!(neighbours[0].match_score, Some(0.0473));
    assert_eq!(fake.last_request().params()["method"], "user.getNeighbours");
}

#[tokio::test]
async fn test_tag_top_lists() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<topartists tag="disco">
            <artist rank="1"><name>ABBA</name></artist>
            <artist rank="2"><name>Donna Summer</name></artist>
        </topartists>"#,
    ));
    fake.respond(&ok(
        r#"<topalbums tag="disco">
            <album rank="1"><name>Arrival</name><artist><name>ABBA</name></artist></album>
        </topalbums>"#,
    ));
    fake.respond(&ok(
        r#"<toptracks tag="disco">
            <track rank="1"><name>Dancing Queen</name><artist><name>ABBA</name></artist></track>
        </toptracks>"#,
    ));
    let client = client(&fake);
    let disco = || Params::new().with("tag", "disco");

    let artists = client.tag().get_top_artists(disco()).await.unwrap();
    assert_eq!(artists.len(), 2);
    assert_eq!(fake.last_request().params()["method"], "tag.getTopArtists");

    let albums = client.tag().get_top_albums(disco()).await.unwrap();
    assert_eq!(albums[0].name.as_deref(), Some("Arrival"));

    let tracks = client.tag().get_top_tracks(disco()).await.unwrap();
    assert_eq!(tracks[0].to_string(), "ABBA - Dancing Queen");
    assert_eq!(fake.last_request().params()["tag"], "disco");
}

#[tokio::test]
async fn test_weekly_chart_list_feeds_chart_bounds() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<weeklychartlist tag="disco">
            <chart from="1108296002" to="1108900802"/>
        </weeklychartlist>"#,
    ));
    fake.respond(&ok(
        r#"<weeklyartistchart tag="disco">
            <artist><name>ABBA</name><weight>100</weight></artist>
        </weeklyartistchart>"#,
    ));
    let client = client(&fake);

    let ranges = client
        .tag()
        .get_weekly_chart_list(Params::new().with("tag", "disco"))
        .await
        .unwrap();
    let week = ranges[0];

    let chart = client
        .tag()
        .get_weekly_artist_chart(
            Params::new()
                .with("tag", "disco")
                .with_opt("from", week.from)
                .with_opt("to", week.to),
        )
        .await
        .unwrap();

    assert_eq!(chart[0].name.as_deref(), Some("ABBA"));
    let params = fake.last_request().params();
    assert_eq!(params["from"], "1108296002");
    assert_eq!(params["to"], "1108900802");
}

#[tokio::test]
async fn test_geo_metros_and_charts() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<metros>
            <metro><name>Sydney</name><country>Australia</country></metro>
            <metro><name>Melbourne</name><country>Australia</country></metro>
        </metros>"#,
    ));
    fake.respond(&ok(
        r#"<topartists metro="Sydney">
            <artist rank="1"><name>Kings of Leon</name></artist>
        </topartists>"#,
    ));
    let client = client(&fake);

    let metros = client
        .geo()
        .get_metros(Params::new().with("country", "Australia"))
        .await
        .unwrap();
    assert_eq!(metros.len(), 2);
    assert_eq!(metros[0].name.as_deref(), Some("Sydney"));

    let artists = client
        .geo()
        .get_metro_hype_artist_chart(
            Params::new()
                .with("country", "Australia")
                .with("metro", "Sydney"),
        )
        .await
        .unwrap();
    assert_eq!(artists[0].name.as_deref(), Some("Kings of Leon"));
    assert_eq!(
        fake.last_request().params()["method"],
        "geo.getMetroHypeArtistChart"
    );
}

#[tokio::test]
async fn test_chart_and_group_reads() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<tags page="1" perPage="50">
            <tag><name>rock</name><reach>390011</reach><taggings>2830513</taggings></tag>
        </tags>"#,
    ));
    fake.respond(&ok(
        r#"<members for="mnml">
            <user><name>RJ</name></user>
        </members>"#,
    ));
    let client = client(&fake);

    let tags = client.chart().get_top_tags(Params::new()).await.unwrap();
    assert_eq!(tags[0].reach, Some(390011));
    assert_eq!(fake.last_request().params()["method"], "chart.getTopTags");

    let members = client
        .group()
        .get_members(Params::new().with("group", "mnml"))
        .await
        .unwrap();
    assert_eq!(members[0].name.as_deref(), Some("RJ"));
    assert_eq!(fake.last_request().params()["method"], "group.getMembers");
}

#[tokio::test]
async fn test_tasteometer_compare() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<comparison>
            <result>
                <score>0.51</score>
                <artists matches="3"><artist><name>Cher</name></artist></artists>
            </result>
        </comparison>"#,
    ));
    let client = client(&fake);

    let comparison = client
        .tasteometer()
        .compare(
            Params::new()
                .with("type1", "user")
                .with("value1", "rj")
                .with("type2", "artists")
                .with("value2", "Cher,Madonna"),
        )
        .await
        .unwrap();

    assert_eq!(comparison.score, Some(0.51));
    assert_eq!(comparison.matches, Some(3));
    let params = fake.last_request().params();
    assert_eq!(params["type1"], "user");
    assert_eq!(params["value2"], "Cher,Madonna");
}

#[tokio::test]
async fn test_artist_images_and_past_events() {
    let fake = FakeHttpClient::new();
    fake.respond(&ok(
        r#"<images artist="Cher" page="1" totalPages="10" total="100">
            <image>
                <title>Cher</title>
                <sizes><size name="original">http://x/original.jpg</size></sizes>
            </image>
        </images>"#,
    ));
    fake.respond(&ok(r#"<events artist="Cher"><event><id>1</id></event></events>"#));
    let client = client(&fake);

    let images = client
        .artist()
        .get_images(Params::new().with("artist", "Cher").with("order", "popularity"))
        .await
        .unwrap();
    assert_eq!(images[0].sizes["original"], "http://x/original.jpg");

    let events = client
        .artist()
        .get_past_events(Params::new().with("artist", "Cher"))
        .await
        .unwrap();
    assert_eq!(events[0].id, Some(1));
    assert_eq!(fake.last_request().params()["method"], "artist.getPastEvents");
}
