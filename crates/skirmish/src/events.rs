//! # Presenter Interface
//!
//! The core owns no rendering state. Everything the player should see or hear
//! is a fire-and-forget notification to a [`Presenter`], which keeps its own
//! mapping from [`VisualId`] to scene objects.

use skirmish_core::{ArenaId, PlayerId};
use skirmish_shared::math::{Euler, Vec3};

/// Something the presenter draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualId {
    /// A remote participant's avatar.
    Player(PlayerId),
    /// A projectile in flight.
    Bullet(ArenaId),
}

/// Sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKind {
    /// A shot was fired.
    Shoot,
    /// A projectile terminated.
    Explosion,
    /// The local player was hit.
    Hit,
    /// The local player jumped.
    Jump,
}

/// Full-screen UI state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Name entry and play button; input released.
    Menu,
    /// In game; input captured.
    Playing,
    /// Killed.
    Died {
        /// Killer display name
        killer: String,
    },
    /// Connection lost.
    Disconnected,
    /// Client and peer disagree on the protocol.
    VersionMismatch {
        /// Client version
        expected: String,
        /// Peer version
        found: String,
    },
}

/// Rendering, audio and UI collaborator.
pub trait Presenter {
    /// Places a visual.
    fn render_object_at(&mut self, visual: VisualId, position: Vec3, rotation: Euler);

    /// Plays a sound, optionally positioned.
    fn play_sound(&mut self, kind: SoundKind, at: Option<Vec3>);

    /// Creates the visual for a new entity.
    fn spawn_entity_visual(&mut self, visual: VisualId);

    /// Destroys an entity's visual.
    fn remove_entity_visual(&mut self, visual: VisualId);

    /// Switches the full-screen UI.
    fn show_overlay(&mut self, overlay: Overlay);
}

/// Presenter that ignores everything (headless hosts, benchmarks).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_object_at(&mut self, _visual: VisualId, _position: Vec3, _rotation: Euler) {}
    fn play_sound(&mut self, _kind: SoundKind, _at: Option<Vec3>) {}
    fn spawn_entity_visual(&mut self, _visual: VisualId) {}
    fn remove_entity_visual(&mut self, _visual: VisualId) {}
    fn show_overlay(&mut self, _overlay: Overlay) {}
}

/// One recorded presenter notification.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    /// `render_object_at`
    Render(VisualId, Vec3, Euler),
    /// `play_sound`
    Sound(SoundKind, Option<Vec3>),
    /// `spawn_entity_visual`
    Spawn(VisualId),
    /// `remove_entity_visual`
    Remove(VisualId),
    /// `show_overlay`
    Overlay(Overlay),
}

/// Presenter that records every notification, for replays and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    /// Notifications in arrival order.
    pub calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds played, in order.
    #[must_use]
    pub fn sounds(&self) -> Vec<SoundKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Sound(kind, _) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Overlays shown, in order.
    #[must_use]
    pub fn overlays(&self) -> Vec<Overlay> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Overlay(overlay) => Some(overlay.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_object_at(&mut self, visual: VisualId, position: Vec3, rotation: Euler) {
        self.calls.push(PresenterCall::Render(visual, position, rotation));
    }

    fn play_sound(&mut self, kind: SoundKind, at: Option<Vec3>) {
        self.calls.push(PresenterCall::Sound(kind, at));
    }

    fn spawn_entity_visual(&mut self, visual: VisualId) {
        self.calls.push(PresenterCall::Spawn(visual));
    }

    fn remove_entity_visual(&mut self, visual: VisualId) {
        self.calls.push(PresenterCall::Remove(visual));
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        self.calls.push(PresenterCall::Overlay(overlay));
    }
}
