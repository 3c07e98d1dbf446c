// Asset management system
//
// Resolves sprite URLs against an asset root and decodes animated GIF
// sequences off the main thread.

mod config;
mod loader;
mod sequence;

pub use config::AssetConfig;
pub use loader::AssetLoader;
pub use sequence::{GifLoader, LoadCallback, SequenceLoader};

#[cfg(test)]
pub(crate) use sequence::encode_test_gif;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset url: {0}")]
    InvalidUrl(String),

    #[error("Failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
