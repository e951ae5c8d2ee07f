use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod animation;
mod cli;
mod constants;
mod deck;
mod host;
mod input;
mod manager;
mod overlay;
mod screen;
mod slides;
mod state;
mod texture_loader;

#[cfg(test)]
mod testing;

use crate::cli::Cli;
use crate::deck::Deck;
use crate::host::HostConfig;
use crate::manager::NavigationManager;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    // --- Load Deck ---
    let deck = match (&cli.deck, &cli.dir) {
        (Some(path), _) => Deck::from_file(path)?,
        (None, Some(dir)) => Deck::from_image_dir(dir)?,
        (None, None) => Deck::sample(),
    };
    deck.validate().context("Deck is not presentable")?;

    let mut manager = NavigationManager::new();
    for screen in deck.build()? {
        manager.add(screen);
    }
    info!("Loaded deck with {} slides", manager.count());

    // CLI beats deck, deck beats defaults
    let defaults = HostConfig::default();
    let config = HostConfig {
        width: cli.width.or(deck.window.width).unwrap_or(defaults.width),
        height: cli.height.or(deck.window.height).unwrap_or(defaults.height),
        title: cli.title.clone().or_else(|| deck.window.title.clone()).unwrap_or(defaults.title),
        fullscreen: cli.fullscreen,
        start_index: cli.start_index(),
    };

    host::run(&config, manager)
}
