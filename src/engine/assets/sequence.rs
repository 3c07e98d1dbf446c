// Animated GIF sequence loading

use super::{AssetError, AssetLoader};
use anyhow::Result;
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use log::{debug, warn};
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

/// Completion handler for a sequence request, invoked at most once with the
/// decoded frame count or the reason the load failed
pub type LoadCallback = Box<dyn FnOnce(Result<usize>) + Send + 'static>;

/// Something that can fetch and decode an image sequence in the background
pub trait SequenceLoader {
    /// Start loading `url`. Returns immediately; `on_load` fires later,
    /// possibly on another thread, and never more than once.
    fn request(&self, url: &str, on_load: LoadCallback);
}

/// Loads GIF sequences from disk, one background thread per request
#[derive(Debug, Clone)]
pub struct GifLoader {
    assets: Arc<AssetLoader>,
}

impl GifLoader {
    pub fn new(assets: AssetLoader) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }

    /// Get the underlying asset loader
    pub fn assets(&self) -> &AssetLoader {
        &self.assets
    }

    /// Load and decode a sequence on the calling thread
    pub fn load_frame_count(&self, url: &str) -> Result<usize> {
        load_frame_count(&self.assets, url)
    }

    /// Count the frames of an in-memory GIF
    pub fn decode_frame_count(url: &str, bytes: &[u8]) -> Result<usize> {
        let decode_error = |e: image::ImageError| AssetError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(decode_error)?;

        let mut frames = 0;
        for frame in decoder.into_frames() {
            frame.map_err(decode_error)?;
            frames += 1;
        }

        Ok(frames)
    }
}

fn load_frame_count(assets: &AssetLoader, url: &str) -> Result<usize> {
    let bytes = assets.load_bytes(url)?;
    GifLoader::decode_frame_count(url, &bytes)
}

impl SequenceLoader for GifLoader {
    fn request(&self, url: &str, on_load: LoadCallback) {
        let assets = Arc::clone(&self.assets);
        let url = url.to_string();

        debug!("Requesting sequence {}", url);

        let spawned = thread::Builder::new()
            .name(format!("gif-load:{}", url))
            .spawn(move || on_load(load_frame_count(&assets, &url)));

        if let Err(e) = spawned {
            // The callback went down with the closure; the request never completes.
            warn!("Could not start loader thread: {}", e);
        }
    }
}

/// Encode a small GIF with `frame_count` distinct frames
#[cfg(test)]
pub(crate) fn encode_test_gif(frame_count: usize) -> Vec<u8> {
    use image::codecs::gif::GifEncoder;
    use image::{Frame, Rgba, RgbaImage};

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        let frames = (0..frame_count).map(|i| {
            let shade = (i * 25 % 256) as u8;
            Frame::new(RgbaImage::from_pixel(4, 4, Rgba([shade, 255 - shade, 0, 255])))
        });
        encoder.encode_frames(frames).unwrap();
    }
    bytes
}
