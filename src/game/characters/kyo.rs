// Kyo, the roster's first playable character

use crate::engine::assets::SequenceLoader;

use super::animation::AnimationTable;
use super::character::{Character, Player, PlayerInfo};
use super::profile::{CharacterProfile, KYO};

/// Kyo: a [`Player`] whose animations come from the [`KYO`] profile
#[derive(Debug)]
pub struct Kyo {
    player: Player,
}

impl Kyo {
    /// Spawn Kyo and start loading his seven sequences
    pub fn new<L: SequenceLoader + ?Sized>(info: PlayerInfo, loader: &L) -> Self {
        Self {
            player: Player::spawn(info, &KYO, loader),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}

impl Character for Kyo {
    fn profile(&self) -> &'static CharacterProfile {
        &KYO
    }

    fn animation_table(&self) -> &AnimationTable {
        self.player.animation_table()
    }

    fn animation_table_mut(&mut self) -> &mut AnimationTable {
        self.player.animation_table_mut()
    }
}
