use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "presenter", version, about = "Keyboard-driven full-screen slide player")]
#[command(long_about = "Keyboard-driven full-screen slide player.\n\n\
    Keys: Right/Space/Enter next, Left/Backspace previous, 1-9 and 0 jump,\n\
    F toggles fullscreen, Esc quits.\n\n\
    Examples:\n  \
    presenter                     Show the built-in sample deck\n  \
    presenter talk.yaml           Present a deck file\n  \
    presenter --dir ./photos      One slide per image in a directory")]
pub struct Cli {
    /// YAML deck file to present
    #[arg(conflicts_with = "dir")]
    pub deck: Option<PathBuf>,

    /// Present every image in a directory, sorted by file name
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<i32>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Start in fullscreen
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Slide to start on (1-indexed)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub start: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// 0-based index of the first slide.
    pub fn start_index(&self) -> usize {
        self.start.map(|n| n as usize - 1).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["presenter"]).unwrap();
        assert!(cli.deck.is_none());
        assert!(cli.dir.is_none());
        assert!(!cli.fullscreen);
        assert_eq!(cli.start_index(), 0);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn parses_window_overrides() {
        let cli = Cli::try_parse_from([
            "presenter", "talk.yaml", "--width", "1920", "--height", "1080", "--title", "Demo", "-f", "--start", "3", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.deck, Some(PathBuf::from("talk.yaml")));
        assert_eq!((cli.width, cli.height), (Some(1920), Some(1080)));
        assert_eq!(cli.title.as_deref(), Some("Demo"));
        assert!(cli.fullscreen);
        assert_eq!(cli.start_index(), 2);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn deck_and_dir_conflict() {
        assert!(Cli::try_parse_from(["presenter", "talk.yaml", "--dir", "photos"]).is_err());
    }

    #[test]
    fn start_is_one_based() {
        assert!(Cli::try_parse_from(["presenter", "--start", "0"]).is_err());
    }
}
