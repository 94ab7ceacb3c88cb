use crate::album::Album;
use crate::api::{fetch_records, LastFmApi};
use crate::artist::Artist;
use crate::chart::{chart_ranges, ChartRange};
use crate::params::Params;
use crate::track::Track;
use crate::user::User;
use crate::Result;

/// `group.*` methods. Every call is keyed by `group`, the group's name.
pub struct GroupApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> GroupApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    pub async fn get_members(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "group.getMembers", params, "members/user").await
    }

    pub async fn get_weekly_album_chart(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(
            self.api,
            "group.getWeeklyAlbumChart",
            params,
            "weeklyalbumchart/album",
        )
        .await
    }

    pub async fn get_weekly_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(
            self.api,
            "group.getWeeklyArtistChart",
            params,
            "weeklyartistchart/artist",
        )
        .await
    }

    pub async fn get_weekly_chart_list(&self, params: Params) -> Result<Vec<ChartRange>> {
        let envelope = self.api.get("group.getWeeklyChartList", params, false).await?;
        Ok(chart_ranges(&envelope))
    }

    pub async fn get_weekly_track_chart(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(
            self.api,
            "group.getWeeklyTrackChart",
            params,
            "weeklytrackchart/track",
        )
        .await
    }
}
