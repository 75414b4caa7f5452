use super::error::FetchError;
use super::wire::NowPlaying;
use instant::Instant;
use std::time::Duration;

pub const NOTHING_PLAYING_TITLE: &str = "Nothing playing";
pub const NOTHING_PLAYING_SUBTITLE: &str = "Open Spotify to play";
pub const CONNECTION_ERROR_TITLE: &str = "Connection error";
pub const CONNECTION_ERROR_SUBTITLE: &str = "Retrying...";

/// `m:ss`, whole seconds, fractional part truncated.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub progress_at_fetch: Duration,
    pub track_duration: Duration,
    pub fetched_at: Instant,
    pub is_playing: bool,
}

impl Snapshot {
    /// Progress extrapolated to `now`, clamped to the track duration.
    pub fn displayed_progress(&self, now: Instant) -> Duration {
        let elapsed = if self.is_playing {
            now.saturating_duration_since(self.fetched_at)
        } else {
            Duration::ZERO
        };
        (self.progress_at_fetch + elapsed).min(self.track_duration)
    }

    pub fn frame_at(&self, now: Instant) -> ProgressFrame {
        ProgressFrame::new(self.displayed_progress(now), self.track_duration)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressFrame {
    pub percent: f64,
    pub current_label: String,
}

impl ProgressFrame {
    pub fn new(progress: Duration, duration: Duration) -> Self {
        let total = duration.as_secs_f64();
        let percent = if total > 0.0 {
            (progress.as_secs_f64() / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent,
            current_label: format_time(progress),
        }
    }

    pub fn zero() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn width_css(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtUpdate {
    Keep,
    Clear,
    Set(String),
}

/// Everything a poll result changes on screen. `None` fields are left as
/// they are.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackView {
    pub title: String,
    pub artist: String,
    pub art: ArtUpdate,
    pub progress: Option<ProgressFrame>,
    pub total_label: Option<String>,
}

impl PlaybackView {
    pub fn nothing_playing() -> Self {
        Self {
            title: NOTHING_PLAYING_TITLE.to_string(),
            artist: NOTHING_PLAYING_SUBTITLE.to_string(),
            art: ArtUpdate::Clear,
            progress: Some(ProgressFrame::zero()),
            total_label: Some(format_time(Duration::ZERO)),
        }
    }

    pub fn connection_error() -> Self {
        Self {
            title: CONNECTION_ERROR_TITLE.to_string(),
            artist: CONNECTION_ERROR_SUBTITLE.to_string(),
            art: ArtUpdate::Keep,
            progress: None,
            total_label: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Tracking,
    Stalled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
    /// Make sure the extrapolation loop runs (no-op when it already does).
    Ensure,
    Cancel,
    /// Leave the loop alone; it stops on its own once nothing is playing.
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PollEffect {
    pub view: PlaybackView,
    pub command: LoopCommand,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    Render(ProgressFrame),
    /// The track reached its end; render this frame and stop.
    Finished(ProgressFrame),
    Stop,
}

/// Reconciles polled snapshots with locally extrapolated progress.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    state: ClockState,
    snapshot: Option<Snapshot>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            snapshot: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Tracking
            && self.snapshot.as_ref().is_some_and(|s| s.is_playing)
    }

    pub fn apply_poll(
        &mut self,
        outcome: Result<Option<NowPlaying>, FetchError>,
        now: Instant,
    ) -> PollEffect {
        match outcome {
            Ok(Some(np)) => self.track(np, now),
            Ok(None) => {
                self.state = ClockState::Idle;
                self.snapshot = None;
                PollEffect {
                    view: PlaybackView::nothing_playing(),
                    command: LoopCommand::None,
                }
            }
            Err(_) => {
                self.state = ClockState::Stalled;
                PollEffect {
                    view: PlaybackView::connection_error(),
                    command: LoopCommand::Cancel,
                }
            }
        }
    }

    fn track(&mut self, np: NowPlaying, now: Instant) -> PollEffect {
        let snapshot = Snapshot {
            progress_at_fetch: np.progress,
            track_duration: np.duration,
            fetched_at: now,
            is_playing: np.is_playing,
        };
        let frame = snapshot.frame_at(now);
        let command = if snapshot.is_playing {
            LoopCommand::Ensure
        } else {
            LoopCommand::None
        };
        self.state = ClockState::Tracking;
        self.snapshot = Some(snapshot);
        PollEffect {
            view: PlaybackView {
                title: np.title,
                artist: np.artist,
                art: np.art_url.map_or(ArtUpdate::Keep, ArtUpdate::Set),
                progress: Some(frame),
                total_label: Some(format_time(np.duration)),
            },
            command,
        }
    }

    /// One extrapolation frame.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.state != ClockState::Tracking {
            return Tick::Stop;
        }
        let Some(snapshot) = self.snapshot.as_mut() else {
            return Tick::Stop;
        };
        if !snapshot.is_playing {
            return Tick::Stop;
        }
        let shown = snapshot.displayed_progress(now);
        let frame = ProgressFrame::new(shown, snapshot.track_duration);
        if shown >= snapshot.track_duration {
            snapshot.is_playing = false;
            snapshot.progress_at_fetch = snapshot.track_duration;
            Tick::Finished(frame)
        } else {
            Tick::Render(frame)
        }
    }
}
