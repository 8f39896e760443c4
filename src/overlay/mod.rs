//! Overlay visibility controller
//!
//! The custom control surface is flush-rendered and always visible outside
//! fullscreen. Inside fullscreen (native or pseudo) it auto-hides after a few
//! seconds of inactivity so it does not obscure the video. The inputs are
//! heterogeneous (taps, pointer movement, control press/release, timer
//! expiry, fullscreen exits) and they all collapse into one visibility flag
//! with one authoritative hide deadline; there are never two competing timers.
//!
//! Every input method takes the current instant, which keeps the timing logic
//! deterministic under test.

use log::debug;
use std::time::{Duration, Instant};

/// Visibility state of the overlay while fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// Overlay is hidden
    Hidden,

    /// Overlay is shown, possibly with a pending hide deadline
    Visible,
}

/// Show/auto-hide state machine for the fullscreen control surface
#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
    hide_delay: Duration,
    hide_deadline: Option<Instant>,
    control_held: bool,
    fullscreen_active: bool,
}

impl OverlayController {
    /// Create a controller with the given inactivity delay
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            state: OverlayState::Hidden,
            hide_delay,
            hide_deadline: None,
            control_held: false,
            fullscreen_active: false,
        }
    }

    /// Whether the overlay should currently be rendered
    ///
    /// Outside fullscreen the auto-hide question does not apply: the controls
    /// are rendered flush with the player and this always reports `true`.
    pub fn is_visible(&self) -> bool {
        !self.fullscreen_active || self.state == OverlayState::Visible
    }

    /// The fullscreen-mode visibility state
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// React to the fullscreen mode changing
    ///
    /// Leaving fullscreen force-hides regardless of any pending deadline.
    /// Entering fullscreen shows the overlay (the user just interacted with a
    /// control to get here) and arms the hide timer.
    pub fn on_fullscreen_changed(&mut self, active: bool, now: Instant) {
        self.fullscreen_active = active;
        self.control_held = false;

        if active {
            self.show_and_arm(now);
        } else {
            debug!("Fullscreen exited, overlay force-hidden");
            self.state = OverlayState::Hidden;
            self.hide_deadline = None;
        }
    }

    /// A tap on the video surface itself (not on a control)
    ///
    /// Toggles: shows a hidden overlay and arms the timer, or dismisses a
    /// visible one immediately.
    pub fn on_surface_tap(&mut self, now: Instant) {
        if !self.fullscreen_active {
            return;
        }

        match self.state {
            OverlayState::Visible => {
                debug!("Surface tap dismissed overlay");
                self.state = OverlayState::Hidden;
                self.hide_deadline = None;
            }
            OverlayState::Hidden => self.show_and_arm(now),
        }
    }

    /// Pointer movement over the player container
    pub fn on_pointer_move(&mut self, now: Instant) {
        if !self.fullscreen_active {
            return;
        }
        self.show_and_arm(now);
    }

    /// Pointer-down on one of the overlay controls
    ///
    /// Cancels the pending hide so the overlay cannot disappear while a
    /// control is mid-interaction (e.g. dragging the progress slider).
    pub fn on_control_press(&mut self, _now: Instant) {
        if !self.fullscreen_active {
            return;
        }
        self.state = OverlayState::Visible;
        self.hide_deadline = None;
        self.control_held = true;
    }

    /// Pointer-up after a control interaction; restarts the hide timer
    pub fn on_control_release(&mut self, now: Instant) {
        if !self.fullscreen_active {
            return;
        }
        self.control_held = false;
        self.show_and_arm(now);
    }

    /// Timer tick
    ///
    /// Hides the overlay once the deadline passes with no qualifying event
    /// since it was armed. Does nothing outside fullscreen or while a control
    /// is held.
    pub fn on_tick(&mut self, now: Instant) {
        if !self.fullscreen_active || self.control_held {
            return;
        }

        if let Some(deadline) = self.hide_deadline {
            if now >= deadline {
                debug!("Overlay hide deadline reached");
                self.state = OverlayState::Hidden;
                self.hide_deadline = None;
            }
        }
    }

    fn show_and_arm(&mut self, now: Instant) {
        self.state = OverlayState::Visible;
        self.hide_deadline = Some(now + self.hide_delay);
    }
}
