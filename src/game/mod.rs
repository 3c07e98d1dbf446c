// Game modules: roster and characters

pub mod characters;
