//! Application context
//!
//! `App` is the single context object constructed at startup and handed to
//! whatever renders the front end. It owns every component (selection,
//! playback session, overlay visibility, fullscreen coordination) so there
//! are no ambient singletons; all the heterogeneous input sources (user
//! actions, player notifications, platform fullscreen changes, timers) enter
//! through one `handle_event` dispatch, which is what keeps the cross-cutting
//! ordering rules in one place.
//!
//! Renderers observe mutations through `subscribe`; the returned
//! `Subscription` removes its callback when dropped, so listener teardown is
//! guaranteed on every exit path. The one-second position poll and the
//! overlay inactivity check are driven by the host delivering
//! `UiEvent::PollTick`; dropping the `App` drops the session and with it the
//! player handle, so nothing outlives a remount.

use crate::catalog::{Catalog, SelectionModel};
use crate::fullscreen::{FullscreenBackend, FullscreenCoordinator, FullscreenMode};
use crate::overlay::OverlayController;
use crate::player::{status_text, PlaybackSession, PlaybackState, PlayerHandle, PositionInfo};
use crate::utils::config::Config;
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Inputs from every event source, coalesced into one enum
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A category pill was clicked
    CategorySelected(String),

    /// A video card was clicked
    VideoSelected(String),

    /// Discrete control buttons
    PlayPressed,
    PausePressed,
    MutePressed,
    UnmutePressed,

    /// Single-button play/pause layout
    PlayPauseToggled,

    /// The progress slider was moved to a position in seconds
    SeekRequested(f64),

    /// The fullscreen button was pressed
    FullscreenTogglePressed,

    /// The dedicated exit-fullscreen control was pressed
    ExitFullscreenPressed,

    /// Escape key
    EscapePressed,

    /// Tap on the video surface, not targeting the overlay
    SurfaceTapped,

    /// Pointer movement over the player container
    PointerMoved,

    /// Pointer-down on an overlay control
    ControlPressed,

    /// Pointer-up after an overlay control interaction
    ControlReleased,

    /// One-shot readiness notification from the embedded player
    PlayerReady,

    /// Raw state-change notification from the embedded player
    PlayerStateChanged(i32),

    /// Platform fullscreen-change notification (no payload, state re-queried)
    PlatformFullscreenChanged,

    /// Recurring timer tick (position poll + overlay inactivity check)
    PollTick,
}

/// Change notifications for dependent renderers
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Active category or active video changed
    SelectionChanged,

    /// The session's playback state changed
    PlaybackChanged(PlaybackState),

    /// Overlay visibility flipped
    OverlayVisibilityChanged(bool),

    /// Fullscreen mode changed
    FullscreenChanged(FullscreenMode),

    /// A valid position snapshot arrived from the poll
    PositionChanged(PositionInfo),
}

type SubscriberMap = HashMap<usize, Box<dyn Fn(&AppEvent)>>;

/// Subscription handle; dropping it unregisters the callback
pub struct Subscription {
    id: usize,
    subscribers: Weak<RefCell<SubscriberMap>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().remove(&self.id);
        }
    }
}

/// The application context
pub struct App {
    selection: SelectionModel,
    session: PlaybackSession,
    overlay: OverlayController,
    fullscreen: FullscreenCoordinator,
    catalog_failed: bool,
    subscribers: Rc<RefCell<SubscriberMap>>,
    next_subscriber_id: usize,
}

impl App {
    /// Build the context from the loaded (or failed) catalog
    ///
    /// A catalog failure is not fatal: the app comes up with an empty
    /// selection and error text in the title/status areas.
    pub fn new(
        config: &Config,
        catalog: crate::utils::error::Result<Catalog>,
        fullscreen_backend: Box<dyn FullscreenBackend>,
    ) -> Self {
        let (catalog, catalog_failed) = match catalog {
            Ok(catalog) => (catalog, false),
            Err(e) => {
                warn!("Unable to fetch videos: {}", e);
                (Catalog::default(), true)
            }
        };

        let mut session = PlaybackSession::new();
        let selection = SelectionModel::new(catalog);
        if let Some(id) = selection.active_video_id() {
            // Queued until the player signals readiness
            session.request_load(id);
        }

        Self {
            selection,
            session,
            overlay: OverlayController::new(Duration::from_secs(
                config.controls.overlay_hide_delay_secs,
            )),
            fullscreen: FullscreenCoordinator::new(fullscreen_backend),
            catalog_failed,
            subscribers: Rc::new(RefCell::new(HashMap::new())),
            next_subscriber_id: 0,
        }
    }

    /// Attach the platform-constructed player handle to the session
    pub fn attach_player(&mut self, player: Box<dyn PlayerHandle>) {
        self.session.attach_player(player);
    }

    /// Subscribe to change notifications
    ///
    /// The callback fires synchronously during `handle_event`. Keep the
    /// returned handle alive for as long as the renderer exists; dropping it
    /// removes the callback.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: Fn(&AppEvent) + 'static,
    {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.borrow_mut().insert(id, Box::new(callback));

        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Dispatch a single input event
    pub fn handle_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::CategorySelected(category) => {
                let video_changed = self.selection.select_category(&category);
                if video_changed {
                    match self.selection.active_video_id() {
                        Some(id) => {
                            let id = id.to_string();
                            self.session.request_load(&id);
                        }
                        None => self.session.clear_active_video(),
                    }
                }
                self.emit(AppEvent::SelectionChanged);
                if video_changed {
                    self.emit(AppEvent::PlaybackChanged(self.session.playback_state()));
                }
            }

            UiEvent::VideoSelected(id) => {
                if self.selection.select_video(&id) {
                    self.session.request_load(&id);
                    self.emit(AppEvent::SelectionChanged);
                    self.emit(AppEvent::PlaybackChanged(self.session.playback_state()));
                }
            }

            UiEvent::PlayPressed => self.session.request_play(),
            UiEvent::PausePressed => self.session.request_pause(),
            UiEvent::MutePressed => self.session.request_mute(),
            UiEvent::UnmutePressed => self.session.request_unmute(),
            UiEvent::PlayPauseToggled => self.session.request_play_pause_toggle(),
            UiEvent::SeekRequested(seconds) => self.session.request_seek(seconds),

            UiEvent::FullscreenTogglePressed => {
                if self.fullscreen.toggle() {
                    self.apply_fullscreen_change(now);
                }
            }

            UiEvent::ExitFullscreenPressed => {
                if self.fullscreen.on_exit_control() {
                    self.apply_fullscreen_change(now);
                }
            }

            UiEvent::EscapePressed => {
                if self.fullscreen.on_escape_key() {
                    self.apply_fullscreen_change(now);
                }
            }

            UiEvent::PlatformFullscreenChanged => {
                if self.fullscreen.on_platform_change() {
                    self.apply_fullscreen_change(now);
                }
            }

            UiEvent::SurfaceTapped => {
                self.overlay_input(|overlay| overlay.on_surface_tap(now));
            }
            UiEvent::PointerMoved => {
                self.overlay_input(|overlay| overlay.on_pointer_move(now));
            }
            UiEvent::ControlPressed => {
                self.overlay_input(|overlay| overlay.on_control_press(now));
            }
            UiEvent::ControlReleased => {
                self.overlay_input(|overlay| overlay.on_control_release(now));
            }

            UiEvent::PlayerReady => {
                self.session.on_player_ready();
                self.emit(AppEvent::PlaybackChanged(self.session.playback_state()));
            }

            UiEvent::PlayerStateChanged(raw) => {
                self.session.on_player_state_changed(raw);
                self.emit(AppEvent::PlaybackChanged(self.session.playback_state()));
            }

            UiEvent::PollTick => {
                self.overlay_input(|overlay| overlay.on_tick(now));
                if let Some(info) = self.session.poll_position() {
                    self.emit(AppEvent::PositionChanged(info));
                }
            }
        }
    }

    /// The selection model (categories, listings, active video)
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The playback session
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Current fullscreen mode
    pub fn fullscreen_mode(&self) -> FullscreenMode {
        self.fullscreen.mode()
    }

    /// Whether the control overlay should be rendered
    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    /// Text for the title area
    pub fn video_title(&self) -> String {
        if self.catalog_failed {
            return "Oops! Unable to load videos right now.".to_string();
        }

        match self.selection.active_video() {
            Some(video) => video.title.clone(),
            None if self.selection.filtered_videos().is_empty()
                && !self.selection.catalog().is_empty() =>
            {
                "No videos found in this category.".to_string()
            }
            None => "Select a video to begin".to_string(),
        }
    }

    /// Current position and duration, when the player can report a valid one
    pub fn playback_position(&self) -> Option<PositionInfo> {
        self.session.poll_position()
    }

    /// Text for the status badge
    pub fn status_text(&self) -> &'static str {
        if self.catalog_failed {
            return "Error";
        }
        status_text(
            self.selection.active_video_id().is_some(),
            self.session.playback_state(),
        )
    }

    /// Fullscreen exit ordering: mode is already applied by the coordinator,
    /// then the overlay reacts (force-hidden on exit), then observers hear
    /// about both in that order.
    fn apply_fullscreen_change(&mut self, now: Instant) {
        let was_visible = self.overlay.is_visible();
        self.overlay
            .on_fullscreen_changed(self.fullscreen.is_active(), now);

        self.emit(AppEvent::FullscreenChanged(self.fullscreen.mode()));
        if self.overlay.is_visible() != was_visible {
            self.emit(AppEvent::OverlayVisibilityChanged(self.overlay.is_visible()));
        }
    }

    fn overlay_input<F: FnOnce(&mut OverlayController)>(&mut self, input: F) {
        let was_visible = self.overlay.is_visible();
        input(&mut self.overlay);
        if self.overlay.is_visible() != was_visible {
            self.emit(AppEvent::OverlayVisibilityChanged(self.overlay.is_visible()));
        }
    }

    fn emit(&self, event: AppEvent) {
        for callback in self.subscribers.borrow().values() {
            callback(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    struct NoopBackend;

    impl FullscreenBackend for NoopBackend {
        fn request_native(&mut self) -> bool {
            false
        }
        fn exit_native(&mut self) {}
        fn native_element_active(&self) -> bool {
            false
        }
        fn set_pseudo(&mut self, _active: bool) {}
    }

    fn test_app() -> App {
        App::new(
            &Config::default(),
            Ok(sample_catalog()),
            Box::new(NoopBackend),
        )
    }

    #[test]
    fn test_catalog_failure_surfaces_as_state() {
        let app = App::new(
            &Config::default(),
            Err(crate::utils::error::KidTubeError::Catalog(
                "boom".to_string(),
            )),
            Box::new(NoopBackend),
        );

        assert_eq!(app.video_title(), "Oops! Unable to load videos right now.");
        assert_eq!(app.status_text(), "Error");
        assert!(app.selection().filtered_videos().is_empty());
    }

    #[test]
    fn test_initial_selection_queues_first_video() {
        let app = test_app();
        assert_eq!(app.session().pending_video_id(), Some("a"));
        assert_eq!(app.video_title(), "T1");
    }

    #[test]
    fn test_empty_category_title_and_status() {
        let mut app = test_app();
        app.handle_event(
            UiEvent::CategorySelected("Documentaries".to_string()),
            Instant::now(),
        );

        assert_eq!(app.video_title(), "No videos found in this category.");
        assert_eq!(app.status_text(), "Idle");
    }

    #[test]
    fn test_subscription_receives_and_teardown_stops() {
        let mut app = test_app();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        let subscription = app.subscribe(move |event| {
            seen_clone.borrow_mut().push(event.clone());
        });

        app.handle_event(
            UiEvent::CategorySelected("Stories".to_string()),
            Instant::now(),
        );
        assert!(seen.borrow().contains(&AppEvent::SelectionChanged));

        // Dropping the subscription unregisters the callback
        drop(subscription);
        let before = seen.borrow().len();
        app.handle_event(UiEvent::VideoSelected("c".to_string()), Instant::now());
        assert_eq!(seen.borrow().len(), before);
    }
}
