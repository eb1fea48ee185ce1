use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod error;
mod state;
mod ui;

use state::config::Config;

/// Open an image and page through the other images in its folder
#[derive(Parser, Debug)]
#[command(name = "siv", version, about)]
struct Args {
    /// Images to open, one preview window each (shows a file dialog if empty)
    files: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins; otherwise only our own logs, plus warnings from the GUI stack
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("siv={},warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load_or_default(args.config.as_deref());
    tracing::info!("🎨 Sequential Image Viewer starting");

    iced::daemon(app::Viewer::title, app::Viewer::update, app::Viewer::view)
        .theme(app::Viewer::theme)
        .subscription(app::Viewer::subscription)
        .run_with(move || app::Viewer::new(config, args.files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_files_and_config() {
        let args = Args::parse_from(["siv", "a.png", "b.jpg", "--config", "/tmp/c.json", "-v"]);
        assert_eq!(args.files, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_default_to_dialog() {
        let args = Args::parse_from(["siv"]);
        assert!(args.files.is_empty());
        assert!(args.config.is_none());
    }
}
