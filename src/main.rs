use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use monthlify::{
    cli,
    config::{self, Limits, USER_ID_VAR},
    error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Defaults to `sync` when omitted
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add this month's liked songs to the monthly playlist
    Sync(SyncOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Spotify user id that owns newly created playlists
    #[clap(long, env = USER_ID_VAR)]
    pub owner_id: String,

    /// Run as if today were this date (YYYY-MM-DD)
    #[clap(long)]
    pub date: Option<String>,

    /// Number of most recent liked tracks to inspect (max 50)
    #[clap(long)]
    pub liked_limit: Option<u32>,

    /// Number of own playlists searched for the monthly one (max 50)
    #[clap(long)]
    pub playlist_limit: Option<u32>,

    /// Number of existing playlist tracks checked for duplicates (max 100)
    #[clap(long)]
    pub playlist_tracks_limit: Option<u32>,

    /// Report what would change without creating or adding anything
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env() {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => Command::Sync(SyncOptions::parse_from([env!("CARGO_PKG_NAME")])),
    };

    match command {
        Command::Sync(opt) => {
            let limits = Limits::with_overrides(
                opt.liked_limit,
                opt.playlist_limit,
                opt.playlist_tracks_limit,
            );
            cli::sync(opt.owner_id, opt.date, limits, opt.dry_run).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
