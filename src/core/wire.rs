use super::error::{FetchError, MissingArt};
use serde::Deserialize;
use std::time::Duration;

// Response shapes of the music service. The proxy flattens `is_playing` and
// `progress_ms` into the item and adds `playing`; the direct API keeps them at
// the top level. Both deserialize into the same structs.

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CurrentlyPlayingPayload {
    pub playing: Option<bool>,
    pub is_playing: Option<bool>,
    pub progress_ms: Option<u64>,
    pub item: Option<TrackItem>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackItem {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
    pub duration_ms: Option<u64>,
    pub progress_ms: Option<u64>,
    pub is_playing: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TracksResponse {
    #[serde(default)]
    pub tracks: Vec<Option<TrackItem>>,
}

/// Normalized now-playing snapshot as the clock consumes it.
#[derive(Clone, Debug, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub art_url: Option<String>,
    pub progress: Duration,
    pub duration: Duration,
    pub is_playing: bool,
}

/// Second image when there are at least two (the mid-size one), else the first.
pub fn best_image(album: Option<&Album>) -> Option<&str> {
    let images = &album?.images;
    let idx = if images.len() > 1 { 1 } else { 0 };
    images.get(idx).map(|i| i.url.as_str())
}

impl CurrentlyPlayingPayload {
    pub fn into_now_playing(self) -> Option<NowPlaying> {
        let item = self.item?;
        let progress_ms = self.progress_ms.or(item.progress_ms).unwrap_or(0);
        let duration_ms = item.duration_ms.filter(|d| *d > 0).unwrap_or(1);
        let is_playing = self
            .is_playing
            .or(item.is_playing)
            .or(self.playing)
            .unwrap_or(false);
        let artist = item
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Some(NowPlaying {
            art_url: best_image(item.album.as_ref()).map(str::to_owned),
            title: item.name,
            artist,
            progress: Duration::from_millis(progress_ms),
            duration: Duration::from_millis(duration_ms),
            is_playing,
        })
    }
}

/// 204 and any status >= 400 mean nothing is playing; so does an empty body or
/// a payload without an item.
#[inline]
pub fn is_nothing_playing_status(status: u16) -> bool {
    status == 204 || status >= 400
}

pub fn parse_now_playing(status: u16, body: &str) -> Result<Option<NowPlaying>, FetchError> {
    if is_nothing_playing_status(status) || body.trim().is_empty() {
        return Ok(None);
    }
    let payload: CurrentlyPlayingPayload = serde_json::from_str(body)?;
    Ok(payload.into_now_playing())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoriteArt {
    pub id: String,
    pub url: String,
}

pub fn track_art(track: &TrackItem) -> Result<FavoriteArt, MissingArt> {
    let id = track.id.clone().unwrap_or_default();
    match best_image(track.album.as_ref()) {
        Some(url) if !id.is_empty() => Ok(FavoriteArt {
            id,
            url: url.to_owned(),
        }),
        _ => Err(MissingArt { id }),
    }
}

/// Art for every track in a batch lookup that has one. Null entries and
/// tracks without images are dropped.
pub fn favorite_art(resp: &TracksResponse) -> Vec<FavoriteArt> {
    resp.tracks
        .iter()
        .flatten()
        .filter_map(|t| track_art(t).ok())
        .collect()
}

/// Pairs each tagged item with the art URL for its id. Ids are compared as
/// plain strings after trimming, the same way they were sent.
pub fn match_art<'a, T>(
    items: &'a [(String, T)],
    arts: &'a [FavoriteArt],
) -> Vec<(&'a T, &'a str)> {
    items
        .iter()
        .filter_map(|(id, item)| {
            let id = id.trim();
            arts.iter()
                .find(|art| art.id == id)
                .map(|art| (item, art.url.as_str()))
        })
        .collect()
}

/// Comma-joined id list for the batch lookup, skipping blanks.
pub fn join_track_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let joined = ids
        .into_iter()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    (!joined.is_empty()).then_some(joined)
}
