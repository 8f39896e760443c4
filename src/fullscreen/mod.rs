//! Fullscreen coordinator
//!
//! Negotiates native fullscreen against a CSS-driven pseudo-fullscreen
//! fallback. The platform capability sits behind the `FullscreenBackend`
//! trait: native entry/exit requests, the post-notification re-query, and the
//! pseudo markers (a container class plus a document-level flag) that produce
//! the full-viewport presentation without any platform API.
//!
//! Native entry and exit are not synchronous on real platforms; the change
//! notification arrives later and carries no payload, so the coordinator
//! re-queries the backend and reconciles.

use log::{debug, info};

/// Which fullscreen presentation is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenMode {
    /// Normal flush layout
    Inactive,

    /// Platform-native fullscreen on the player container
    Native,

    /// CSS-only full-viewport presentation
    Pseudo,
}

/// Platform fullscreen capability
///
/// `request_native` returns `false` when the capability is unavailable (the
/// coordinator then falls back to pseudo-fullscreen); that is not an error
/// condition.
pub trait FullscreenBackend {
    /// Request native fullscreen on the player container
    fn request_native(&mut self) -> bool;

    /// Request native fullscreen exit
    fn exit_native(&mut self);

    /// Whether the platform currently reports a native-fullscreen element
    fn native_element_active(&self) -> bool;

    /// Apply or clear the pseudo-fullscreen markers
    fn set_pseudo(&mut self, active: bool);
}

/// Drives fullscreen transitions and keeps them consistent with the platform
pub struct FullscreenCoordinator {
    mode: FullscreenMode,
    backend: Box<dyn FullscreenBackend>,
}

impl FullscreenCoordinator {
    /// Create a coordinator over the given platform backend
    pub fn new(backend: Box<dyn FullscreenBackend>) -> Self {
        Self {
            mode: FullscreenMode::Inactive,
            backend,
        }
    }

    /// The current fullscreen mode
    pub fn mode(&self) -> FullscreenMode {
        self.mode
    }

    /// Whether any fullscreen presentation is active
    pub fn is_active(&self) -> bool {
        self.mode != FullscreenMode::Inactive
    }

    /// Handle an explicit toggle request
    ///
    /// From `Inactive`, native fullscreen is attempted first and pseudo is the
    /// fallback when the capability is unavailable. From either active mode
    /// the result is always `Inactive`.
    ///
    /// # Returns
    ///
    /// `true` when the mode changed.
    pub fn toggle(&mut self) -> bool {
        match self.mode {
            FullscreenMode::Inactive => {
                if self.backend.request_native() {
                    info!("Entering native fullscreen");
                    self.mode = FullscreenMode::Native;
                } else {
                    info!("Native fullscreen unavailable, entering pseudo-fullscreen");
                    self.backend.set_pseudo(true);
                    self.mode = FullscreenMode::Pseudo;
                }
                true
            }
            FullscreenMode::Native => {
                info!("Exiting native fullscreen");
                self.backend.exit_native();
                self.mode = FullscreenMode::Inactive;
                true
            }
            FullscreenMode::Pseudo => {
                info!("Exiting pseudo-fullscreen");
                self.backend.set_pseudo(false);
                self.mode = FullscreenMode::Inactive;
                true
            }
        }
    }

    /// Handle the platform's fullscreen-change notification
    ///
    /// The notification carries no payload; the backend is re-queried. A
    /// missing native element while we believe we are native means the
    /// platform exited (system escape, OS chrome) and the mode drops to
    /// `Inactive`.
    ///
    /// # Returns
    ///
    /// `true` when the mode changed.
    pub fn on_platform_change(&mut self) -> bool {
        let element_active = self.backend.native_element_active();

        if self.mode == FullscreenMode::Native && !element_active {
            info!("Platform reports native fullscreen gone");
            self.mode = FullscreenMode::Inactive;
            return true;
        }

        debug!("Fullscreen change notification reconciled, no transition");
        false
    }

    /// Handle an escape-key press
    ///
    /// Only pseudo-fullscreen reacts here; native fullscreen's escape
    /// handling is platform-provided and arrives via the change notification.
    ///
    /// # Returns
    ///
    /// `true` when the mode changed.
    pub fn on_escape_key(&mut self) -> bool {
        if self.mode == FullscreenMode::Pseudo {
            info!("Escape pressed, exiting pseudo-fullscreen");
            self.backend.set_pseudo(false);
            self.mode = FullscreenMode::Inactive;
            return true;
        }
        false
    }

    /// Handle the dedicated on-screen exit control
    ///
    /// Touch devices have no escape key; this affordance clears the pseudo
    /// markers unconditionally.
    ///
    /// # Returns
    ///
    /// `true` when the mode changed.
    pub fn on_exit_control(&mut self) -> bool {
        self.backend.set_pseudo(false);
        if self.mode == FullscreenMode::Pseudo {
            info!("Exit control pressed, leaving pseudo-fullscreen");
            self.mode = FullscreenMode::Inactive;
            return true;
        }
        false
    }
}
