use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodlist::{
    cli, config, error, logging,
    types::{EnergyLevel, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, Mood},
    warning,
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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log filter (overrides RUST_LOG / MOODLIST_LOG)
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a playlist for a mood
    Generate(GenerateOptions),

    /// Search the Spotify catalog for tracks
    Search(SearchOptions),

    /// Show a single track
    Track(TrackOptions),

    /// Show configuration and check Spotify credentials
    Status,

    /// Run the HTTP API
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Mood the playlist should carry
    #[clap(long, value_enum)]
    mood: Mood,

    /// Seed genre; can be repeated, at most five are used
    #[clap(long = "genre", action = ArgAction::Append, num_args = 1)]
    genres: Vec<String>,

    /// Energy level, overrides the mood's own energy
    #[clap(long, value_enum)]
    energy: Option<EnergyLevel>,

    /// Target length in minutes
    #[clap(
        long,
        value_parser = clap::value_parser!(u32).range(MIN_DURATION_MINUTES as i64..=MAX_DURATION_MINUTES as i64)
    )]
    duration: Option<u32>,

    /// Print the playlist as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search text, e.g. "artist:Daft Punk"
    query: String,

    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    #[clap(long, default_value_t = 0)]
    offset: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify track id
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, defaults to SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let directive = cli.log_level.clone().unwrap_or_else(config::log_level);
    if let Err(e) = logging::init_tracing(&directive) {
        warning!("Logging disabled: {}", e);
    }

    match cli.command {
        Command::Generate(opt) => {
            cli::generate(opt.mood, opt.genres, opt.energy, opt.duration, opt.json).await
        }
        Command::Search(opt) => cli::search(opt.query, opt.limit, opt.offset).await,
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Status => cli::status().await,
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
