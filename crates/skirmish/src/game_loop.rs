//! # Simulation Loop
//!
//! One render-driven tick, in order:
//!
//! ```text
//! 1. PHYSICS      integrate the local player (input only while captured)
//! 2. PROJECTILES  move bullets, terminate, damage the local player
//!                 └─ lethal hit: pay the killer, close the channel,
//!                    clear the remaining impacts, stop
//! 3. TRIGGERS     zones under the feet -> economy handlers / door teleport
//! 4. SYNC         throttled player.move
//! 5. PRESENT      remote avatars (eased) and bullets
//! ```
//!
//! Inbound frames are applied between ticks by [`Simulation::handle_message`],
//! each one fully before the next. Ticks only run while the session is
//! `Playing`.

use skirmish_core::{MovementTuning, PlayerId, PlayerRegistry, SeededRandom};
use skirmish_economy::{settle_death, EconomySystem, StatChange};
use skirmish_networking::dispatch::{self, InboundEvent};
use skirmish_networking::protocol::decode;
use skirmish_networking::{ChatLog, ClientSession, MovementThrottle, SessionState, Transport, TweenSet};
use skirmish_shared::constants::MAX_CHAT_MESSAGE_LEN;
use skirmish_shared::math::{Euler, Vec3};
use skirmish_shared::protocol::{ClientMessage, ShootPayload};

use crate::collision::{footprint, World};
use crate::config::SimulationConfig;
use crate::events::{Overlay, Presenter, SoundKind, VisualId};
use crate::physics::{self, KinematicState, MovementInput};
use crate::projectiles::{Bullet, ProjectileSet, Termination};
use crate::triggers;

/// Mutable state threaded through every tick stage.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Participants, local included
    pub registry: PlayerRegistry,
    /// Local velocity
    pub kinematics: KinematicState,
    /// Local movement upgrades
    pub tuning: MovementTuning,
    /// Held keys
    pub input: MovementInput,
    /// Pointer captured (in game, menu hidden)
    pub captured: bool,
    /// Bullets in flight
    pub projectiles: ProjectileSet,
    /// Trigger and damage rolls
    pub rng: SeededRandom,
    /// Time of the last local shot
    pub last_shot_ms: Option<u64>,
    /// Recent chat
    pub chat: ChatLog,
    /// Remote avatar glides
    pub tweens: TweenSet,
}

impl SimulationState {
    /// Fresh state for a new session in `world`.
    #[must_use]
    pub fn new(config: &SimulationConfig, world: &World) -> Self {
        Self {
            registry: PlayerRegistry::new(),
            kinematics: KinematicState::default(),
            tuning: MovementTuning {
                speed: config.physics.speed,
                jump_impulse: config.physics.jump_impulse,
            },
            input: MovementInput::default(),
            captured: false,
            projectiles: ProjectileSet::new(),
            rng: SeededRandom::new(config.world.session_seed.unwrap_or(world.next_seed())),
            last_shot_ms: None,
            chat: ChatLog::new(config.network.chat_capacity, config.network.chat_expiry_ms),
            tweens: TweenSet::new(config.network.tween_ms),
        }
    }
}

/// The client simulation core.
pub struct Simulation<T: Transport> {
    config: SimulationConfig,
    world: World,
    economy: EconomySystem,
    throttle: MovementThrottle,
    session: ClientSession<T>,
    state: SimulationState,
}

impl<T: Transport> Simulation<T> {
    /// Creates a session that will join as `name`.
    pub fn new(config: SimulationConfig, world: World, transport: T, name: impl Into<String>) -> Self {
        let state = SimulationState::new(&config, &world);
        Self {
            economy: EconomySystem::new(config.economy.clone()),
            throttle: MovementThrottle::new(
                config.network.move_interval_ms,
                config.network.move_precision,
            ),
            session: ClientSession::new(transport, name),
            world,
            state,
            config,
        }
    }

    /// Tuning in use.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Static geometry.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Tick state.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Connection lifecycle.
    #[must_use]
    pub const fn session(&self) -> &ClientSession<T> {
        &self.session
    }

    /// Participants.
    #[must_use]
    pub const fn registry(&self) -> &PlayerRegistry {
        &self.state.registry
    }

    /// Economy handlers and their cooldowns.
    #[must_use]
    pub const fn economy(&self) -> &EconomySystem {
        &self.economy
    }

    /// Camera pose: the local player's eye position and rotation.
    #[must_use]
    pub fn local_pose(&self) -> Option<(Vec3, Euler)> {
        self.state
            .registry
            .local()
            .map(|player| (player.position, player.rotation))
    }

    fn is_playing(&self) -> bool {
        *self.session.state() == SessionState::Playing
    }

    // =========================================================================
    // Channel lifecycle
    // =========================================================================

    /// The host's socket connected.
    pub fn on_channel_opened(&mut self) {
        self.session.on_channel_opened();
    }

    /// The host's socket closed.
    pub fn on_channel_closed(&mut self, presenter: &mut impl Presenter) {
        let before = self.session.state().clone();
        self.session.on_channel_closed();
        self.state.captured = false;
        self.state.input = MovementInput::default();
        self.sync_overlay(&before, presenter);
    }

    /// Applies one inbound text frame.
    ///
    /// Malformed frames, unknown types and updates for unknown participants
    /// are discarded.
    pub fn handle_message(&mut self, frame: &str, now_ms: u64, presenter: &mut impl Presenter) {
        let message = match decode(frame) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("Discarded inbound frame: {}", e);
                return;
            }
        };
        let kind = message.kind();
        let Some(event) = dispatch::apply(&mut self.state.registry, message) else {
            tracing::debug!("Ignored {}", kind);
            return;
        };

        let before = self.session.state().clone();
        match event {
            InboundEvent::ServerInfo { version } => self.session.on_server_info(&version),
            InboundEvent::LocalJoined { .. } => {
                self.state.kinematics.reset();
                self.throttle.reset();
                self.session.on_local_joined();
            }
            InboundEvent::PlayerJoined { id, position, fresh } => {
                let rotation = self
                    .state
                    .registry
                    .get(id)
                    .map_or(Euler::IDENTITY, |player| player.rotation);
                self.state.tweens.remove(id);
                if fresh {
                    presenter.spawn_entity_visual(VisualId::Player(id));
                }
                presenter.render_object_at(VisualId::Player(id), position, rotation);
            }
            InboundEvent::PlayerLeft { id } => {
                self.state.tweens.remove(id);
                presenter.remove_entity_visual(VisualId::Player(id));
            }
            InboundEvent::StatUpdated { id, field } => {
                tracing::debug!("Player #{} updated {:?}", id, field);
            }
            InboundEvent::PlayerMoved {
                id,
                previous,
                position,
                ..
            } => {
                self.state.tweens.retarget(id, previous, position, now_ms);
            }
            InboundEvent::ShotFired(shot) => {
                let bullet = Bullet::from(shot);
                let id = self.state.projectiles.spawn(bullet);
                presenter.spawn_entity_visual(VisualId::Bullet(id));
                presenter.play_sound(SoundKind::Shoot, Some(bullet.position));
            }
            InboundEvent::Chat { author, message } => {
                self.state.chat.push(author, message, now_ms);
            }
        }
        self.sync_overlay(&before, presenter);
    }

    fn sync_overlay(&self, before: &SessionState, presenter: &mut impl Presenter) {
        let state = self.session.state();
        if state == before {
            return;
        }
        let overlay = match state {
            SessionState::Playing => Overlay::Menu,
            SessionState::VersionMismatch { expected, found } => Overlay::VersionMismatch {
                expected: expected.clone(),
                found: found.clone(),
            },
            SessionState::Dead { killer_name, .. } => Overlay::Died {
                killer: killer_name.clone(),
            },
            SessionState::Disconnected => Overlay::Disconnected,
            SessionState::Connecting | SessionState::Ready => return,
        };
        presenter.show_overlay(overlay);
    }

    // =========================================================================
    // Local controls
    // =========================================================================

    /// Hides the menu and starts taking input.
    pub fn capture_input(&mut self, presenter: &mut impl Presenter) -> bool {
        if !self.is_playing() || self.state.captured {
            return false;
        }
        self.state.captured = true;
        presenter.show_overlay(Overlay::Playing);
        true
    }

    /// Shows the menu and stops taking input.
    pub fn release_input(&mut self, presenter: &mut impl Presenter) {
        if !self.state.captured {
            return;
        }
        self.state.captured = false;
        self.state.input = MovementInput::default();
        if self.is_playing() {
            presenter.show_overlay(Overlay::Menu);
        }
    }

    /// Replaces the held keys.
    pub fn set_input(&mut self, input: MovementInput) {
        self.state.input = input;
    }

    fn controllable(&self) -> bool {
        self.state.captured && self.is_playing()
    }

    /// Jumps if standing.
    pub fn jump(&mut self, presenter: &mut impl Presenter) -> bool {
        if !self.controllable() || !self.state.kinematics.jump(&self.state.tuning) {
            return false;
        }
        let at = self.local_pose().map(|(position, _)| position);
        presenter.play_sound(SoundKind::Jump, at);
        true
    }

    /// Turns the view by a mouse delta.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if !self.controllable() {
            return;
        }
        let sensitivity = self.config.physics.sensitivity;
        if let Some(local) = self.state.registry.local_mut() {
            physics::look(&mut local.rotation, dx, dy, sensitivity);
        }
    }

    /// Fires from the camera if the shot cooldown has elapsed.
    pub fn shoot(&mut self, now_ms: u64, presenter: &mut impl Presenter) -> bool {
        if !self.controllable() {
            return false;
        }
        let cooldown = self.config.projectiles.shot_cooldown_ms;
        if let Some(last) = self.state.last_shot_ms {
            if now_ms.saturating_sub(last) < cooldown {
                return false;
            }
        }
        let Some(local) = self.state.registry.local() else {
            return false;
        };
        let bullet = Bullet {
            owner: local.id,
            created_at_ms: now_ms,
            position: local.position,
            rotation: local.rotation,
        };
        self.state.last_shot_ms = Some(now_ms);

        let id = self.state.projectiles.spawn(bullet);
        presenter.spawn_entity_visual(VisualId::Bullet(id));
        presenter.play_sound(SoundKind::Shoot, Some(bullet.position));
        self.session.send(&ClientMessage::Shoot(ShootPayload {
            created_at: now_ms,
            position: bullet.position,
            rotation: bullet.rotation,
        }));
        true
    }

    /// Changes the display name.
    pub fn set_name(&mut self, name: &str) {
        if let Some(local) = self.state.registry.local_mut() {
            name.clone_into(&mut local.name);
        }
        self.session.rename(name);
    }

    /// Sends a chat line and shows it locally.
    ///
    /// Lines are trimmed and cut to the chat length limit; empty lines are
    /// not sent.
    pub fn send_chat(&mut self, message: &str, now_ms: u64) -> bool {
        let line: String = message.trim().chars().take(MAX_CHAT_MESSAGE_LEN).collect();
        if line.is_empty() || !self.session.is_open() {
            return false;
        }
        let author = self
            .state
            .registry
            .local()
            .map_or_else(|| self.session.name().to_owned(), |local| local.name.clone());
        self.session.send(&ClientMessage::Chat {
            message: line.clone(),
        });
        self.state.chat.push(author, line, now_ms);
        true
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advances the simulation by `dt` seconds ending at `now_ms`.
    pub fn tick(&mut self, now_ms: u64, dt: f32, presenter: &mut impl Presenter) {
        if !self.is_playing() {
            return;
        }

        self.step_physics(dt);
        if self.step_projectiles(now_ms, dt, presenter) {
            return;
        }
        self.step_triggers(now_ms);
        self.sync_movement(now_ms);
        self.present(now_ms, presenter);
        self.state.tweens.prune(now_ms);
        self.state.chat.prune(now_ms);
    }

    fn step_physics(&mut self, dt: f32) {
        let input = if self.state.captured {
            self.state.input
        } else {
            MovementInput::default()
        };
        let Some(local) = self.state.registry.local_mut() else {
            return;
        };
        let world = &self.world;
        self.state.kinematics.integrate(
            local,
            &input,
            &self.state.tuning,
            &self.config.physics,
            dt,
            |eye, length| world.ground_probe(eye, length),
        );
    }

    /// Returns true if the local player died.
    fn step_projectiles(&mut self, now_ms: u64, dt: f32, presenter: &mut impl Presenter) -> bool {
        let impacts = self.state.projectiles.step(
            now_ms,
            dt,
            self.config.projectiles.speed,
            self.config.projectiles.timeout_ms,
            &self.world,
            &self.state.registry,
        );

        let mut died = false;
        for impact in impacts {
            if let Termination::PlayerHit(victim) = impact.termination {
                if !died && self.state.registry.is_local(victim) {
                    died = self.damage_local(impact.bullet.owner, presenter);
                }
            }
            presenter.play_sound(SoundKind::Explosion, Some(impact.bullet.position));
            presenter.remove_entity_visual(VisualId::Bullet(impact.id));
        }
        died
    }

    /// Applies a hit from `shooter`. Returns true if it was lethal.
    fn damage_local(&mut self, shooter: PlayerId, presenter: &mut impl Presenter) -> bool {
        let attack = self
            .state
            .registry
            .get(shooter)
            .map_or(self.config.projectiles.default_attack, |player| player.attack);
        let damage = self.state.rng.range_u32(attack / 2, attack);

        let Some(local) = self.state.registry.local_mut() else {
            return false;
        };
        presenter.play_sound(SoundKind::Hit, Some(local.position));
        local.health = local.health.saturating_sub(damage);
        let health = local.health;
        tracing::debug!("Hit by #{} for {} (health={})", shooter, damage, health);

        self.session.send(&ClientMessage::Health { health });
        if health == 0 {
            self.die(shooter, presenter);
            return true;
        }
        false
    }

    fn die(&mut self, killer: PlayerId, presenter: &mut impl Presenter) {
        let killer_name = self
            .state
            .registry
            .get(killer)
            .map_or_else(|| format!("#{killer}"), |player| player.name.clone());

        if let Some(payout) = settle_death(&mut self.state.registry, killer) {
            self.session.send(&payout);
        }

        let before = self.session.state().clone();
        self.session.enter_dead(killer, killer_name);
        self.state.captured = false;
        self.state.input = MovementInput::default();
        self.sync_overlay(&before, presenter);
    }

    fn step_triggers(&mut self, now_ms: u64) {
        let player_height = self.config.physics.player_height;
        let Some(local) = self.state.registry.local_mut() else {
            return;
        };
        let triggered = triggers::evaluate(self.world.zones(), footprint(local.position, player_height));
        if triggered.is_empty() {
            return;
        }

        let mut changes: Vec<StatChange> = Vec::new();
        if triggered.bank {
            changes.extend(self.economy.on_bank(local, &mut self.state.rng, now_ms));
        }
        if triggered.hospital {
            changes.extend(self.economy.on_hospital(local, &mut self.state.rng, now_ms));
        }
        if let Some(item) = triggered.shop {
            changes.extend(self.economy.on_shop(item, local, &mut self.state.tuning, now_ms));
        }
        let teleport = triggered.door.map(|destination| {
            local.position = destination;
            (local.position, local.rotation)
        });

        for message in changes.into_iter().filter_map(StatChange::outbound) {
            self.session.send(&message);
        }
        if let Some((position, rotation)) = teleport {
            tracing::debug!("Door to {:?}", position);
            let pose = self.throttle.force(now_ms, position, rotation);
            self.session.send(&ClientMessage::Move(pose));
        }
    }

    fn sync_movement(&mut self, now_ms: u64) {
        let Some(local) = self.state.registry.local() else {
            return;
        };
        if let Some(pose) = self.throttle.poll(now_ms, local.position, local.rotation) {
            self.session.send(&ClientMessage::Move(pose));
        }
    }

    fn present(&self, now_ms: u64, presenter: &mut impl Presenter) {
        for remote in self.state.registry.remotes() {
            let drawn = self
                .state
                .tweens
                .sample(remote.id, now_ms)
                .unwrap_or(remote.position);
            presenter.render_object_at(VisualId::Player(remote.id), drawn, remote.rotation);
        }
        for (id, bullet) in self.state.projectiles.iter() {
            presenter.render_object_at(VisualId::Bullet(id), bullet.position, bullet.rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingPresenter;
    use crossbeam_channel::Receiver;
    use skirmish_economy::{Zone, ZoneKind};
    use skirmish_networking::ChannelTransport;
    use skirmish_shared::constants::PROTOCOL_VERSION;
    use skirmish_shared::math::Aabb;
    use skirmish_shared::protocol::{PlayerSnapshot, RemoteShot, ServerMessage};

    fn frame(message: &ServerMessage) -> String {
        serde_json::to_string(message).unwrap()
    }

    fn snapshot(id: PlayerId, name: &str, position: Vec3) -> PlayerSnapshot {
        PlayerSnapshot {
            id,
            name: name.to_owned(),
            position,
            rotation: Euler::IDENTITY,
            health: 100,
            strength: 100,
            attack: 10,
            money: 0,
        }
    }

    fn types(host: &Receiver<String>) -> Vec<String> {
        host.try_iter()
            .map(|text| {
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                value["type"].as_str().unwrap().to_owned()
            })
            .collect()
    }

    fn playing(
        world: World,
        local: PlayerSnapshot,
    ) -> (Simulation<ChannelTransport>, Receiver<String>, RecordingPresenter) {
        let (transport, host) = ChannelTransport::unbounded();
        let mut sim = Simulation::new(SimulationConfig::default(), world, transport, "me");
        let mut presenter = RecordingPresenter::new();
        sim.on_channel_opened();
        sim.handle_message(
            &frame(&ServerMessage::Info {
                version: PROTOCOL_VERSION.to_owned(),
            }),
            0,
            &mut presenter,
        );
        sim.handle_message(&frame(&ServerMessage::Init(local)), 0, &mut presenter);
        assert_eq!(*sim.session().state(), SessionState::Playing);
        assert!(sim.capture_input(&mut presenter));
        (sim, host, presenter)
    }

    #[test]
    fn test_handshake_then_init_shows_menu() {
        let (_sim, host, presenter) = playing(World::new(), snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(types(&host), vec!["player.connect"]);
        assert_eq!(presenter.overlays(), vec![Overlay::Menu, Overlay::Playing]);
    }

    #[test]
    fn test_tick_is_inert_before_playing() {
        let (transport, host) = ChannelTransport::unbounded();
        let mut sim = Simulation::new(SimulationConfig::default(), World::new(), transport, "me");
        let mut presenter = RecordingPresenter::new();
        sim.tick(1000, 0.016, &mut presenter);
        assert!(presenter.calls.is_empty());
        assert!(host.try_recv().is_err());
    }

    #[test]
    fn test_shot_cooldown() {
        let (mut sim, host, mut presenter) =
            playing(World::new(), snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0)));
        types(&host);

        assert!(sim.shoot(1000, &mut presenter));
        assert!(!sim.shoot(1499, &mut presenter));
        assert!(sim.shoot(1500, &mut presenter));
        assert_eq!(types(&host), vec!["player.shoot", "player.shoot"]);
        assert_eq!(sim.state().projectiles.len(), 2);
    }

    #[test]
    fn test_remote_shot_spawns_bullet() {
        let (mut sim, _host, mut presenter) =
            playing(World::new(), snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0)));
        sim.handle_message(
            &frame(&ServerMessage::New(snapshot(2, "them", Vec3::new(50.0, 2.0, 50.0)))),
            0,
            &mut presenter,
        );
        presenter.clear();

        let shot = RemoteShot {
            player_id: 2,
            created_at: 0,
            position: Vec3::new(50.0, 2.0, 50.0),
            rotation: Euler::IDENTITY,
        };
        sim.handle_message(&frame(&ServerMessage::Shoot(shot)), 10, &mut presenter);
        assert_eq!(sim.state().projectiles.len(), 1);
        assert_eq!(presenter.sounds(), vec![SoundKind::Shoot]);
    }

    #[test]
    fn test_lethal_hit_pays_killer_and_closes() {
        let mut local = snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0));
        local.health = 1;
        local.money = 30;
        let (mut sim, host, mut presenter) = playing(World::new(), local);

        let mut killer = snapshot(7, "killer", Vec3::new(0.0, 2.0, 0.2));
        killer.attack = 20;
        sim.handle_message(&frame(&ServerMessage::New(killer)), 0, &mut presenter);
        sim.handle_message(
            &frame(&ServerMessage::Shoot(RemoteShot {
                player_id: 7,
                created_at: 0,
                position: Vec3::new(0.0, 2.0, 0.2),
                rotation: Euler::IDENTITY,
            })),
            0,
            &mut presenter,
        );
        types(&host);

        sim.tick(10, 0.01, &mut presenter);

        assert_eq!(types(&host), vec!["player.health", "player.money.give"]);
        assert!(!sim.session().is_open());
        assert_eq!(
            *sim.session().state(),
            SessionState::Dead {
                killer_id: 7,
                killer_name: "killer".to_owned(),
            }
        );
        assert_eq!(sim.registry().get(7).map(|p| p.money), Some(30));
        assert_eq!(
            presenter.overlays().last(),
            Some(&Overlay::Died {
                killer: "killer".to_owned()
            })
        );
    }

    #[test]
    fn test_door_sends_move_immediately() {
        let mut world = World::new();
        world.add_zone(Zone::new(
            Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
            ZoneKind::Door {
                destination: Vec3::new(100.0, 2.0, 100.0),
            },
        ));
        let (mut sim, host, mut presenter) =
            playing(world, snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0)));
        types(&host);

        sim.tick(10, 0.01, &mut presenter);

        assert_eq!(types(&host), vec!["player.move"]);
        let (position, _) = sim.local_pose().unwrap();
        assert_eq!(position, Vec3::new(100.0, 2.0, 100.0));
    }

    #[test]
    fn test_chat_trimmed_and_logged() {
        let (mut sim, host, _presenter) =
            playing(World::new(), snapshot(1, "me", Vec3::new(0.0, 2.0, 0.0)));
        types(&host);

        assert!(!sim.send_chat("   ", 0));
        assert!(sim.send_chat("  hello there, this line is too long  ", 0));
        let sent: Vec<String> = host.try_iter().collect();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("\"hello there, this line i\""));
        assert_eq!(sim.state().chat.len(), 1);
    }
}
