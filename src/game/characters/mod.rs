// Character system
//
// This module contains everything related to playable characters:
// - Per-character animation profiles
// - The animation table each player owns
// - Background loading of animation sequences
// - The player entity and concrete characters

pub mod animation;
pub mod animation_loader;
pub mod character;
pub mod kyo;
pub mod profile;

// Re-export commonly used types
pub use animation::AnimationKind;
pub use character::{Character, PlayerInfo};
pub use kyo::Kyo;
pub use profile::KYO;
