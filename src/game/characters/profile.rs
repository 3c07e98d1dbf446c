// Per-character animation configuration

use super::animation::{AnimationSlot, SlotIndex, SlotLoadContext};

/// URL prefix under which every character's sprite directory lives
pub const SPRITE_BASE_URL: &str = "/static/images/player";

/// Immutable description of how a character's animations are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterProfile {
    /// Directory name under [`SPRITE_BASE_URL`]
    pub name: &'static str,
    /// Vertical draw offset per slot; its length is the slot count
    pub vertical_offsets: &'static [i32],
    /// Ticks per frame advance for every slot before overrides
    pub frame_rate: u32,
    /// Frame rates that replace the default once a slot has loaded
    pub frame_rate_overrides: &'static [(SlotIndex, u32)],
    /// Draw scale for all slots
    pub scale: u32,
}

/// Kyo's seven animations; the jump sequence runs slightly faster once loaded
pub const KYO: CharacterProfile = CharacterProfile {
    name: "kyo",
    vertical_offsets: &[0, -22, -22, -140, 0, 0, 0],
    frame_rate: 5,
    frame_rate_overrides: &[(3, 4)],
    scale: 2,
};

impl CharacterProfile {
    pub fn slot_count(&self) -> usize {
        self.vertical_offsets.len()
    }

    /// Directory URL holding this character's sequences
    pub fn sequence_dir(&self) -> String {
        format!("{}/{}", SPRITE_BASE_URL, self.name)
    }

    /// URL of the sequence stored in `slot`
    pub fn sequence_url(&self, slot: SlotIndex) -> String {
        format!("{}/{}.gif", self.sequence_dir(), slot)
    }

    /// Initial, not yet loaded, state of `slot`
    pub fn initial_slot(&self, slot: SlotIndex) -> Option<AnimationSlot> {
        let offset = *self.vertical_offsets.get(slot)?;
        Some(AnimationSlot::unloaded(self.frame_rate, offset, self.scale))
    }

    /// Context handed to the completion handler of `slot`
    pub fn load_context(&self, slot: SlotIndex) -> SlotLoadContext {
        let frame_rate_on_load = self
            .frame_rate_overrides
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|&(_, rate)| rate);

        SlotLoadContext {
            slot,
            frame_rate_on_load,
        }
    }
}
