//! Playback session
//!
//! The session abstracts over two facts about the embedded player: it may not
//! exist yet (the platform script is still loading) and it may exist but not
//! be ready. All intents go through the session, which queues the one intent
//! worth remembering (the video to load) and drops the transient ones until
//! the player is usable. The session is the exclusive owner of the player
//! handle; no other component calls player primitives directly.

use crate::player::{PlaybackState, PlayerHandle};
use log::{debug, info};

/// Position snapshot from a poll tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInfo {
    /// Current position in seconds
    pub position: f64,

    /// Total duration in seconds (always finite and > 0)
    pub duration: f64,
}

impl PositionInfo {
    /// Position as a percentage of the duration, for the progress bar
    pub fn percent(&self) -> f64 {
        (self.position / self.duration * 100.0).clamp(0.0, 100.0)
    }
}

/// Owns the embedded-player handle and tracks its readiness and state
pub struct PlaybackSession {
    player: Option<Box<dyn PlayerHandle>>,
    ready: bool,
    pending_video_id: Option<String>,
    active_video_id: Option<String>,
    state: PlaybackState,
}

impl PlaybackSession {
    /// Create a session with no player attached
    pub fn new() -> Self {
        Self {
            player: None,
            ready: false,
            pending_video_id: None,
            active_video_id: None,
            state: PlaybackState::Unstarted,
        }
    }

    /// Attach the platform-constructed player handle
    ///
    /// The handle is attached as soon as the platform constructs it, which is
    /// before it signals readiness; intents keep queuing until
    /// `on_player_ready` arrives. If the platform script never loads, this is
    /// simply never called and every request degrades to queue or no-op.
    pub fn attach_player(&mut self, player: Box<dyn PlayerHandle>) {
        debug!("Player handle attached");
        self.player = Some(player);
    }

    /// Whether the player has signaled readiness
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Last-known playback state
    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    /// The id of the video this session currently presents, if any
    pub fn active_video_id(&self) -> Option<&str> {
        self.active_video_id.as_deref()
    }

    /// The queued video id awaiting readiness, if any
    pub fn pending_video_id(&self) -> Option<&str> {
        self.pending_video_id.as_deref()
    }

    /// Request that a video be loaded
    ///
    /// Ready: cues the video immediately (skipped when it is already the
    /// active one) and the state moves to `Cued`. Not ready: the id is stored
    /// as the pending video, overwriting any previous pending id; the most
    /// recent request wins, there is no queue of historical requests.
    pub fn request_load(&mut self, video_id: &str) {
        let same_video = self.active_video_id.as_deref() == Some(video_id);
        self.active_video_id = Some(video_id.to_string());

        if self.ready {
            if let Some(player) = self.player.as_mut() {
                if !same_video {
                    info!("Cueing video {}", video_id);
                    player.cue_video_by_id(video_id);
                    self.state = PlaybackState::Cued;
                }
                return;
            }
        }

        debug!("Player not ready, queuing video {}", video_id);
        self.pending_video_id = Some(video_id.to_string());
    }

    /// Drop the active video
    ///
    /// Used when the filtered listing becomes empty and nothing is selected;
    /// the state returns to `Unstarted` and the pending slot is cleared so a
    /// stale id cannot be flushed on readiness.
    pub fn clear_active_video(&mut self) {
        self.active_video_id = None;
        self.pending_video_id = None;
        self.state = PlaybackState::Unstarted;
    }

    /// Handle the one-shot readiness notification from the player
    ///
    /// Flushes the pending video, if any. Arrives once, unordered relative to
    /// user actions; anything selected in the meantime is sitting in the
    /// pending slot or in `active_video_id`.
    pub fn on_player_ready(&mut self) {
        self.ready = true;
        info!("Player ready");

        let initial = self
            .active_video_id
            .clone()
            .or_else(|| self.pending_video_id.clone());
        self.pending_video_id = None;

        if let (Some(video_id), Some(player)) = (initial, self.player.as_mut()) {
            info!("Cueing initial video {}", video_id);
            player.cue_video_by_id(&video_id);
            self.state = PlaybackState::Cued;
        }
    }

    /// Handle an asynchronous state-change notification from the player
    ///
    /// When the current video ends, the session re-cues the same video
    /// instead of leaving it ended: the player returns to a ready-to-play
    /// state without autoplaying into anything. The re-cue is issued before
    /// this method returns, so a following notification can never race a
    /// stale ended state.
    pub fn on_player_state_changed(&mut self, raw_state: i32) {
        let new_state = PlaybackState::from_raw(raw_state);
        debug!("Player state change: {:?}", new_state);

        if new_state == PlaybackState::Ended {
            if let Some(video_id) = self.active_video_id.clone() {
                if let Some(player) = self.player.as_mut() {
                    info!("Video {} ended, re-cueing", video_id);
                    player.cue_video_by_id(&video_id);
                    self.state = PlaybackState::Cued;
                    return;
                }
            }
        }

        self.state = new_state;
    }

    /// Start or resume playback; dropped when the player is not ready
    pub fn request_play(&mut self) {
        if let Some(player) = self.ready_player() {
            player.play_video();
        }
    }

    /// Pause playback; dropped when the player is not ready
    pub fn request_pause(&mut self) {
        if let Some(player) = self.ready_player() {
            player.pause_video();
        }
    }

    /// Mute audio; dropped when the player is not ready
    pub fn request_mute(&mut self) {
        if let Some(player) = self.ready_player() {
            player.mute();
        }
    }

    /// Unmute audio; dropped when the player is not ready
    pub fn request_unmute(&mut self) {
        if let Some(player) = self.ready_player() {
            player.un_mute();
        }
    }

    /// Seek to a position in seconds; dropped when the player is not ready
    pub fn request_seek(&mut self, seconds: f64) {
        if let Some(player) = self.ready_player() {
            player.seek_to(seconds, true);
        }
    }

    /// Toggle between playing and paused based on the last-known state
    ///
    /// Supports the single-button control layout on top of the same intent
    /// surface as the discrete buttons.
    pub fn request_play_pause_toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.request_pause(),
            _ => self.request_play(),
        }
    }

    /// Poll the current position and duration
    ///
    /// The player only exposes pull-based time queries, so an external timer
    /// collaborator calls this nominally once per second. Returns `None` when
    /// the duration is unknown (NaN or not positive); the caller skips
    /// updating the time displays for that tick.
    pub fn poll_position(&self) -> Option<PositionInfo> {
        let player = self.player.as_ref()?;
        if !self.ready {
            return None;
        }

        let duration = player.get_duration();
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        Some(PositionInfo {
            position: player.get_current_time(),
            duration,
        })
    }

    fn ready_player(&mut self) -> Option<&mut Box<dyn PlayerHandle>> {
        if self.ready {
            self.player.as_mut()
        } else {
            debug!("Player not ready, dropping transient intent");
            None
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Recording fake for the embedded player
    struct FakePlayer {
        calls: Rc<RefCell<Vec<String>>>,
        current_time: f64,
        duration: f64,
        raw_state: i32,
    }

    impl FakePlayer {
        fn new(calls: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                calls,
                current_time: 0.0,
                duration: f64::NAN,
                raw_state: -1,
            }
        }
    }

    impl PlayerHandle for FakePlayer {
        fn cue_video_by_id(&mut self, video_id: &str) {
            self.calls.borrow_mut().push(format!("cue:{}", video_id));
        }

        fn load_video_by_id(&mut self, video_id: &str) {
            self.calls.borrow_mut().push(format!("load:{}", video_id));
        }

        fn play_video(&mut self) {
            self.calls.borrow_mut().push("play".to_string());
        }

        fn pause_video(&mut self) {
            self.calls.borrow_mut().push("pause".to_string());
        }

        fn mute(&mut self) {
            self.calls.borrow_mut().push("mute".to_string());
        }

        fn un_mute(&mut self) {
            self.calls.borrow_mut().push("unmute".to_string());
        }

        fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
            self.calls.borrow_mut().push(format!("seek:{}", seconds));
        }

        fn get_current_time(&self) -> f64 {
            self.current_time
        }

        fn get_duration(&self) -> f64 {
            self.duration
        }

        fn get_player_state(&self) -> i32 {
            self.raw_state
        }
    }

    fn session_with_fake() -> (PlaybackSession, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut session = PlaybackSession::new();
        session.attach_player(Box::new(FakePlayer::new(Rc::clone(&calls))));
        (session, calls)
    }

    #[test]
    fn test_pending_id_last_writer_wins() {
        let (mut session, calls) = session_with_fake();

        session.request_load("a");
        session.request_load("b");
        assert!(calls.borrow().is_empty());
        assert_eq!(session.pending_video_id(), Some("b"));

        session.on_player_ready();

        // Exactly one cue, for the most recent request
        assert_eq!(calls.borrow().as_slice(), ["cue:b"]);
        assert_eq!(session.pending_video_id(), None);
        assert_eq!(session.playback_state(), PlaybackState::Cued);
    }

    #[test]
    fn test_ready_without_pending_stays_unstarted() {
        let (mut session, calls) = session_with_fake();

        session.on_player_ready();

        assert!(calls.borrow().is_empty());
        assert_eq!(session.playback_state(), PlaybackState::Unstarted);
    }

    #[test]
    fn test_load_when_ready_cues_immediately() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();

        session.request_load("a");
        assert_eq!(calls.borrow().as_slice(), ["cue:a"]);
        assert_eq!(session.playback_state(), PlaybackState::Cued);
    }

    #[test]
    fn test_reloading_active_video_is_skipped() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();

        session.request_load("a");
        session.request_load("a");
        assert_eq!(calls.borrow().as_slice(), ["cue:a"]);
    }

    #[test]
    fn test_ended_recues_active_video() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();
        session.request_load("a");
        calls.borrow_mut().clear();

        session.on_player_state_changed(0); // ended

        // Exactly one re-cue of the still-active video, never left at Ended
        assert_eq!(calls.borrow().as_slice(), ["cue:a"]);
        assert_eq!(session.playback_state(), PlaybackState::Cued);
        assert_eq!(session.active_video_id(), Some("a"));
    }

    #[test]
    fn test_ended_without_active_video_stays_ended() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();

        session.on_player_state_changed(0);

        assert!(calls.borrow().is_empty());
        assert_eq!(session.playback_state(), PlaybackState::Ended);
    }

    #[test]
    fn test_state_change_mapping() {
        let (mut session, _calls) = session_with_fake();
        session.on_player_ready();

        session.on_player_state_changed(1);
        assert_eq!(session.playback_state(), PlaybackState::Playing);

        session.on_player_state_changed(2);
        assert_eq!(session.playback_state(), PlaybackState::Paused);

        session.on_player_state_changed(3);
        assert_eq!(session.playback_state(), PlaybackState::Buffering);
    }

    #[test]
    fn test_transient_intents_dropped_before_ready() {
        let (mut session, calls) = session_with_fake();

        session.request_play();
        session.request_pause();
        session.request_mute();
        session.request_unmute();
        session.request_seek(42.0);

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_transient_intents_forwarded_when_ready() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();

        session.request_play();
        session.request_mute();
        session.request_seek(12.5);

        assert_eq!(calls.borrow().as_slice(), ["play", "mute", "seek:12.5"]);
    }

    #[test]
    fn test_play_pause_toggle_follows_state() {
        let (mut session, calls) = session_with_fake();
        session.on_player_ready();

        session.request_play_pause_toggle();
        session.on_player_state_changed(1);
        session.request_play_pause_toggle();

        assert_eq!(calls.borrow().as_slice(), ["play", "pause"]);
    }

    #[test]
    fn test_clear_active_video_resets_state() {
        let (mut session, calls) = session_with_fake();
        session.request_load("a");

        session.clear_active_video();

        assert_eq!(session.active_video_id(), None);
        assert_eq!(session.pending_video_id(), None);
        assert_eq!(session.playback_state(), PlaybackState::Unstarted);

        // Readiness after clearing must not flush the stale id
        session.on_player_ready();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_intents_without_player_never_panic() {
        let mut session = PlaybackSession::new();

        session.request_load("a");
        session.request_play();
        session.request_seek(3.0);
        session.on_player_state_changed(1);
        assert!(session.poll_position().is_none());
        assert_eq!(session.pending_video_id(), Some("a"));
    }

    #[test]
    fn test_poll_position_skips_unknown_duration() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut session = PlaybackSession::new();

        let mut player = FakePlayer::new(Rc::clone(&calls));
        player.duration = f64::NAN;
        session.attach_player(Box::new(player));
        session.on_player_ready();

        assert!(session.poll_position().is_none());
    }

    #[test]
    fn test_poll_position_with_valid_duration() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut session = PlaybackSession::new();

        let mut player = FakePlayer::new(Rc::clone(&calls));
        player.duration = 120.0;
        player.current_time = 30.0;
        session.attach_player(Box::new(player));
        session.on_player_ready();

        let info = session.poll_position().unwrap();
        assert_eq!(info.position, 30.0);
        assert_eq!(info.duration, 120.0);
        assert_eq!(info.percent(), 25.0);
    }
}
