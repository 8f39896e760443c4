//! Player module for KidTube
//!
//! This module owns everything that touches the embedded player: the
//! capability interface to the platform player, the playback session that
//! keeps intents safe across the player's asynchronous readiness, and the
//! status text the control surface displays.

mod session;
mod status;

pub use session::{PlaybackSession, PositionInfo};
pub use status::status_text;

/// Playback state as reported by the embedded player
///
/// Mirrors the raw state codes of the platform's state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No playback has happened yet
    Unstarted,

    /// The current video finished
    Ended,

    /// Currently playing
    Playing,

    /// Playback paused
    Paused,

    /// Buffering media
    Buffering,

    /// A video is cued and ready to play
    Cued,
}

impl PlaybackState {
    /// Map a raw player state code to a playback state
    ///
    /// Unknown codes map to `Unstarted`; the notification contract only
    /// carries the six known codes, so anything else is treated as the
    /// blank initial state rather than an error.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => PlaybackState::Ended,
            1 => PlaybackState::Playing,
            2 => PlaybackState::Paused,
            3 => PlaybackState::Buffering,
            5 => PlaybackState::Cued,
            _ => PlaybackState::Unstarted,
        }
    }
}

/// Capability interface to the embedded player
///
/// The platform player is an external, best-effort service: calls are
/// fire-and-forget and queries return whatever the player currently knows
/// (including NaN durations before metadata arrives). The playback session is
/// the only component that holds this handle; nothing here returns errors
/// because failures on this boundary are modeled as state, not exceptions.
pub trait PlayerHandle {
    /// Cue a video by id without starting playback
    fn cue_video_by_id(&mut self, video_id: &str);

    /// Load a video by id and begin playback when allowed
    fn load_video_by_id(&mut self, video_id: &str);

    /// Start or resume playback
    fn play_video(&mut self);

    /// Pause playback
    fn pause_video(&mut self);

    /// Mute audio
    fn mute(&mut self);

    /// Unmute audio
    fn un_mute(&mut self);

    /// Seek to a position in seconds
    ///
    /// `allow_seek_ahead` permits seeking into unbuffered regions.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    /// Current playback position in seconds
    fn get_current_time(&self) -> f64;

    /// Total duration in seconds; may be NaN or 0 before metadata is known
    fn get_duration(&self) -> f64;

    /// Raw state code of the player
    fn get_player_state(&self) -> i32;
}
