//! KidTube, a curated video-browsing front end for children
//!
//! The crate fetches a static catalog of video entries, filters it by
//! category, and drives an embedded third-party player through a simplified
//! custom control surface with a pseudo-fullscreen fallback. The embedded
//! player and the platform fullscreen capability are external collaborators
//! behind the [`player::PlayerHandle`] and [`fullscreen::FullscreenBackend`]
//! traits; everything else is process-local state owned by [`app::App`].

pub mod app;
pub mod catalog;
pub mod fullscreen;
pub mod overlay;
pub mod player;
pub mod utils;

pub use app::{App, AppEvent, Subscription, UiEvent};
pub use catalog::{Catalog, CatalogProvider, SelectionModel, VideoRecord, CATEGORY_ALL};
pub use fullscreen::{FullscreenBackend, FullscreenCoordinator, FullscreenMode};
pub use overlay::{OverlayController, OverlayState};
pub use player::{PlaybackSession, PlaybackState, PlayerHandle};
pub use utils::{Config, KidTubeError, Result};
