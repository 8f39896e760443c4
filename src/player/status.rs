//! Status badge text
//!
//! Maps the session's last-known state to the short status label shown next
//! to the video title. With no active video the badge always reads "Idle",
//! whatever the player last reported.

use crate::player::PlaybackState;

/// The status badge text for the current selection and playback state
pub fn status_text(active_video: bool, state: PlaybackState) -> &'static str {
    if !active_video {
        return "Idle";
    }

    match state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Buffering => "Loading...",
        PlaybackState::Ended => "Finished",
        PlaybackState::Cued | PlaybackState::Unstarted => "Ready",
    }
}
