pub mod config;
pub mod error;
pub mod playback;
pub mod scheduler;
pub mod tilt;
pub mod token;
pub mod wire;

pub use config::{AppConfig, SourceConfig};
pub use error::FetchError;
pub use playback::{ArtUpdate, LoopCommand, PlaybackClock, PlaybackView, ProgressFrame, Tick};
pub use scheduler::{FrameControl, FrameOwner, FrameScheduler, LoopHandle};
pub use tilt::{TiltState, TiltStep};
pub use token::{TokenCache, TokenResponse};
