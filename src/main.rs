use anyhow::Result;
use log::{info, warn};

mod engine;
mod game;

use engine::assets::{AssetConfig, AssetLoader, GifLoader};
use game::characters::{AnimationKind, Character, Kyo, PlayerInfo, KYO};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = AssetConfig::from_env();
    let loader = GifLoader::new(AssetLoader::new(&config.asset_root));
    info!(
        "Loading roster from {}",
        loader.assets().base_path().display()
    );
    let available = loader.assets().list_assets(&KYO.sequence_dir())?;
    info!(
        "Found {} of {} {} sequences",
        available.len(),
        KYO.slot_count(),
        KYO.name
    );

    let mut kyo = Kyo::new(PlayerInfo::new(0, 200.0, 0.0), &loader);
    let complete = kyo.player_mut().wait_for_loads(config.load_timeout);

    for kind in AnimationKind::ALL {
        let Some(slot) = kyo.animation(kind) else {
            continue;
        };
        info!(
            "{:>8}: loaded={} frames={} rate={} offset_y={} scale={}",
            kind.name(),
            slot.loaded,
            slot.frame_count,
            slot.frame_rate,
            slot.vertical_offset,
            slot.scale
        );
    }

    let stats = kyo.player().stats();
    if !complete {
        warn!(
            "{} animations incomplete: {} failed, {} still pending",
            kyo.name(),
            stats.failed,
            stats.pending()
        );
    }

    Ok(())
}
