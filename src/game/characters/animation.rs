// Character animation table

use glam::Vec2;
use log::{debug, warn};
use std::collections::HashMap;

/// Index of an animation slot within a character's table
pub type SlotIndex = usize;

/// The named animations every character provides, in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Idle,
    Forward,
    Backward,
    Jump,
    Attack,
    Attacked,
    Dead,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 7] = [
        Self::Idle,
        Self::Forward,
        Self::Backward,
        Self::Jump,
        Self::Attack,
        Self::Attacked,
        Self::Dead,
    ];

    /// Slot index this animation is stored under
    pub fn slot(&self) -> SlotIndex {
        *self as SlotIndex
    }

    /// Look up the animation stored in a slot
    pub fn from_slot(slot: SlotIndex) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Jump => "jump",
            Self::Attack => "attack",
            Self::Attacked => "attacked",
            Self::Dead => "dead",
        }
    }
}

/// Playback metadata for one animation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSlot {
    /// Number of decoded frames (0 until loaded)
    pub frame_count: usize,
    /// Render ticks per frame advance
    pub frame_rate: u32,
    /// Vertical draw offset in pixels
    pub vertical_offset: i32,
    /// Whether the sequence has finished loading
    pub loaded: bool,
    /// Draw scale multiplier
    pub scale: u32,
}

impl AnimationSlot {
    /// Create a slot whose sequence has not loaded yet
    pub fn unloaded(frame_rate: u32, vertical_offset: i32, scale: u32) -> Self {
        Self {
            frame_count: 0,
            frame_rate,
            vertical_offset,
            loaded: false,
            scale,
        }
    }

    /// Frame to show at a given render tick, or `None` if nothing is drawable yet
    pub fn frame_at(&self, tick: u64) -> Option<usize> {
        if !self.loaded || self.frame_count == 0 {
            return None;
        }
        let rate = u64::from(self.frame_rate.max(1));
        Some(((tick / rate) % self.frame_count as u64) as usize)
    }

    /// Screen rectangle for a frame of `frame_size` pixels drawn at `position`
    pub fn draw_rect(&self, position: Vec2, frame_size: Vec2) -> SpriteRect {
        SpriteRect {
            min: position + Vec2::new(0.0, self.vertical_offset as f32),
            size: frame_size * self.scale as f32,
        }
    }
}

/// Axis-aligned rectangle a sprite frame is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl SpriteRect {
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// All animations of one character, keyed by slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationTable {
    slots: HashMap<SlotIndex, AnimationSlot>,
}

impl AnimationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the slot at `index`
    pub fn set(&mut self, index: SlotIndex, slot: AnimationSlot) {
        self.slots.insert(index, slot);
    }

    pub fn get(&self, index: SlotIndex) -> Option<&AnimationSlot> {
        self.slots.get(&index)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut AnimationSlot> {
        self.slots.get_mut(&index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &AnimationSlot)> {
        let mut indices: Vec<SlotIndex> = self.slots.keys().copied().collect();
        indices.sort_unstable();
        indices.into_iter().map(move |i| (i, &self.slots[&i]))
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.values().filter(|s| s.loaded).count()
    }

    /// True once every slot in the table has loaded
    pub fn all_loaded(&self) -> bool {
        self.slots.values().all(|s| s.loaded)
    }
}

/// Everything a completion needs to find and patch its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLoadContext {
    /// Slot the load belongs to
    pub slot: SlotIndex,
    /// Frame rate to switch to once the sequence is loaded
    pub frame_rate_on_load: Option<u32>,
}

impl SlotLoadContext {
    /// Record a finished load in `table`
    ///
    /// Looks the slot up again by index. Returns false if the slot is
    /// missing or already loaded, in which case nothing changes.
    pub fn apply(&self, table: &mut AnimationTable, frame_count: usize) -> bool {
        let Some(slot) = table.get_mut(self.slot) else {
            warn!("Load finished for unknown slot {}", self.slot);
            return false;
        };

        if slot.loaded {
            debug!("Slot {} already loaded, ignoring repeat completion", self.slot);
            return false;
        }

        slot.frame_count = frame_count;
        slot.loaded = true;
        if let Some(rate) = self.frame_rate_on_load {
            slot.frame_rate = rate;
        }

        true
    }
}
