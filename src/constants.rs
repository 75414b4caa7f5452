// DOM hooks and endpoints used by the web frontend.

// Cards
pub const CARD_SELECTOR: &str = ".card";
pub const SHINE_CLASS: &str = "shine";

// Now-playing display slots
pub const TRACK_NAME_SELECTOR: &str = ".track-name";
pub const TRACK_ARTIST_SELECTOR: &str = ".track-artist";
pub const TRACK_ART_SELECTOR: &str = ".track-art";
pub const PROGRESS_FILL_SELECTOR: &str = ".progress-fill";
pub const TIME_CURRENT_SELECTOR: &str = ".time-current";
pub const TIME_TOTAL_SELECTOR: &str = ".time-total";

// Favorites
pub const FAV_ITEM_SELECTOR: &str = ".fav-item";
pub const FAV_ART_SELECTOR: &str = ".fav-art";
pub const TRACK_ID_ATTR: &str = "data-track-id";

// JSON config island, optional
pub const CONFIG_ELEMENT_ID: &str = "now-playing-config";

// Music service endpoints for direct mode
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const NOW_PLAYING_URL: &str = "https://api.spotify.com/v1/me/player/currently-playing";
pub const TRACKS_URL: &str = "https://api.spotify.com/v1/tracks";
