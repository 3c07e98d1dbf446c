// Player entity and the character capability

use crate::engine::assets::SequenceLoader;
use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};
use std::time::{Duration, Instant};

use super::animation::{AnimationKind, AnimationSlot, AnimationTable};
use super::animation_loader::{CharacterAnimationLoader, LoadEvent};
use super::profile::CharacterProfile;

/// Unique identifier for a player
pub type PlayerId = usize;

/// Anything on the stage that owns an animation table
pub trait Character {
    /// Static configuration this character was built from
    fn profile(&self) -> &'static CharacterProfile;

    fn animation_table(&self) -> &AnimationTable;

    fn animation_table_mut(&mut self) -> &mut AnimationTable;

    fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Look up an animation by kind
    fn animation(&self, kind: AnimationKind) -> Option<&AnimationSlot> {
        self.animation_table().get(kind.slot())
    }
}

/// Spawn parameters for a player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl PlayerInfo {
    /// Standard-sized player at the given position
    pub fn new(id: PlayerId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            width: 120.0,
            height: 200.0,
            color: if id == 0 { "blue" } else { "red" }.to_string(),
        }
    }
}

/// Bookkeeping for outstanding sequence loads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub requested: usize,
    pub loaded: usize,
    pub failed: usize,
    /// Completions that changed nothing: the slot was already loaded or is
    /// not in the table
    pub ignored: usize,
}

impl LoadStats {
    /// Requests that have neither loaded nor failed yet
    pub fn pending(&self) -> usize {
        self.requested.saturating_sub(self.loaded + self.failed)
    }
}

/// A player on the stage, owning its animation table
///
/// Sequence loads complete in the background; their results queue up on a
/// channel and are applied to the table by [`Player::poll_loads`].
#[derive(Debug)]
pub struct Player {
    pub info: PlayerInfo,
    /// Direction the player is facing (1 = right, -1 = left)
    pub facing_direction: f32,

    profile: &'static CharacterProfile,
    animations: AnimationTable,
    completions_tx: Sender<LoadEvent>,
    completions_rx: Receiver<LoadEvent>,
    stats: LoadStats,
}

impl Player {
    /// Create a player with an empty animation table
    pub fn new(info: PlayerInfo, profile: &'static CharacterProfile) -> Self {
        let (completions_tx, completions_rx) = crossbeam_channel::unbounded();
        let facing_direction = if info.id == 0 { 1.0 } else { -1.0 };

        Self {
            info,
            facing_direction,
            profile,
            animations: AnimationTable::new(),
            completions_tx,
            completions_rx,
            stats: LoadStats::default(),
        }
    }

    /// Create a player and start loading all of its animations
    pub fn spawn<L: SequenceLoader + ?Sized>(
        info: PlayerInfo,
        profile: &'static CharacterProfile,
        loader: &L,
    ) -> Self {
        let mut player = Self::new(info, profile);
        player.load_animations(loader);
        player
    }

    /// Populate the animation table and request every sequence not yet in it
    fn load_animations<L: SequenceLoader + ?Sized>(&mut self, loader: &L) {
        let requested = CharacterAnimationLoader::new(self.profile).init(
            &mut self.animations,
            loader,
            &self.completions_tx,
        );
        self.stats.requested += requested;

        info!(
            "Player {} ({}): requested {} animations",
            self.info.id, self.profile.name, requested
        );
    }

    /// Apply every completion that has arrived so far, without blocking
    ///
    /// Returns the number of completions handled.
    pub fn poll_loads(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.completions_rx.try_recv() {
            self.handle_load_event(event);
            handled += 1;
        }
        handled
    }

    /// Block until no request is outstanding or `timeout` elapses
    ///
    /// Returns true if every slot ended up loaded.
    pub fn wait_for_loads(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll_loads();

        while self.stats.pending() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.completions_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_load_event(event),
                Err(_) => break,
            }
        }

        self.animations.all_loaded()
    }

    fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Loaded {
                context,
                frame_count,
            } => {
                if context.apply(&mut self.animations, frame_count) {
                    self.stats.loaded += 1;
                    info!(
                        "{} slot {} loaded with {} frames",
                        self.profile.name, context.slot, frame_count
                    );
                } else {
                    self.stats.ignored += 1;
                }
            }
            LoadEvent::Failed {
                context,
                url,
                error,
            } => {
                // The slot stays unloaded; nothing retries it.
                self.stats.failed += 1;
                warn!(
                    "{} slot {} failed to load {}: {}",
                    self.profile.name, context.slot, url, error
                );
            }
        }
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl Character for Player {
    fn profile(&self) -> &'static CharacterProfile {
        self.profile
    }

    fn animation_table(&self) -> &AnimationTable {
        &self.animations
    }

    fn animation_table_mut(&mut self) -> &mut AnimationTable {
        &mut self.animations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::animation_loader::ManualLoader;
    use crate::game::characters::profile::KYO;

    #[test]
    fn test_player_info_defaults() {
        let p1 = PlayerInfo::new(0, 200.0, 0.0);
        let p2 = PlayerInfo::new(1, 900.0, 0.0);

        assert_eq!(p1.width, 120.0);
        assert_eq!(p1.height, 200.0);
        assert_eq!(p1.color, "blue");
        assert_eq!(p2.color, "red");
    }

    #[test]
    fn test_facing_direction() {
        assert_eq!(Player::new(PlayerInfo::new(0, 0.0, 0.0), &KYO).facing_direction, 1.0);
        assert_eq!(Player::new(PlayerInfo::new(1, 0.0, 0.0), &KYO).facing_direction, -1.0);
    }

    #[test]
    fn test_new_player_has_no_animations() {
        let player = Player::new(PlayerInfo::new(0, 0.0, 0.0), &KYO);
        assert!(player.animation_table().is_empty());
        assert_eq!(player.stats(), LoadStats::default());
        assert_eq!(player.name(), "kyo");
    }

    #[test]
    fn test_poll_applies_and_counts() {
        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        assert_eq!(player.stats().pending(), 7);
        assert_eq!(player.poll_loads(), 0);

        loader.complete(&KYO.sequence_url(4), 7);
        loader.finish(&KYO.sequence_url(5), Err(anyhow::anyhow!("404")));
        assert_eq!(player.poll_loads(), 2);

        let stats = player.stats();
        assert_eq!(stats.loaded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.pending(), 5);
        assert!(player.animation(AnimationKind::Attack).unwrap().loaded);
        assert!(!player.animation(AnimationKind::Attacked).unwrap().loaded);
    }

    #[test]
    fn test_wait_for_loads_times_out() {
        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        for slot in 0..6 {
            loader.complete(&KYO.sequence_url(slot), 2);
        }

        let started = Instant::now();
        assert!(!player.wait_for_loads(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(player.animation_table().loaded_count(), 6);
    }

    #[test]
    fn test_wait_for_loads_returns_when_settled() {
        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        for slot in 0..7 {
            loader.complete(&KYO.sequence_url(slot), 3);
        }

        assert!(player.wait_for_loads(Duration::from_secs(60)));
        assert_eq!(player.stats().pending(), 0);
    }

    #[test]
    fn test_second_load_keeps_loaded_slots() {
        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        loader.complete(&KYO.sequence_url(3), 8);
        player.poll_loads();

        player.load_animations(&loader);
        player.poll_loads();

        let jump = player.animation(AnimationKind::Jump).unwrap();
        assert_eq!(jump.frame_count, 8);
        assert_eq!(jump.frame_rate, 4);
        assert!(jump.loaded);
        assert_eq!(player.stats().requested, 7);
        assert_eq!(loader.urls().len(), 7);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        use crate::game::characters::animation::SlotLoadContext;

        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        loader.complete(&KYO.sequence_url(3), 8);
        player.poll_loads();
        let before = player.animation_table().clone();

        player
            .completions_tx
            .send(LoadEvent::Loaded {
                context: KYO.load_context(3),
                frame_count: 99,
            })
            .unwrap();
        player
            .completions_tx
            .send(LoadEvent::Loaded {
                context: SlotLoadContext {
                    slot: 42,
                    frame_rate_on_load: None,
                },
                frame_count: 1,
            })
            .unwrap();
        assert_eq!(player.poll_loads(), 2);

        let stats = player.stats();
        assert_eq!(stats.ignored, 2);
        assert_eq!(stats.loaded, 1);
        assert_eq!(player.animation_table(), &before);
    }

    #[test]
    fn test_table_mut_access() {
        let loader = ManualLoader::default();
        let mut player = Player::spawn(PlayerInfo::new(0, 0.0, 0.0), &KYO, &loader);
        player.animation_table_mut().get_mut(0).unwrap().scale = 3;
        assert_eq!(player.animation(AnimationKind::Idle).unwrap().scale, 3);
    }
}
