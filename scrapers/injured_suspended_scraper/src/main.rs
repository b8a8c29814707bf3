use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::{io, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use injured_suspended_scraper::{
    config::ScraperConfig,
    fetcher::{FileHtmlFetcher, HtmlFetcher},
    roster, Championship, InjuredSuspendedClient, OutageType, Player, Position,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read saved pages (`<country>_<league>.html`) from this directory instead of the web
    #[arg(long, global = true)]
    html_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the injured and suspended players of a championship
    Players {
        /// ligue-1, ligue-2, premier-league, liga or serie-a
        #[arg(short, long)]
        championship: Championship,
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Look up a single player
    Find {
        #[arg(short, long)]
        championship: Championship,
        #[arg(short, long)]
        name: String,
        /// Position code, e.g. MI
        #[arg(short, long)]
        position: Option<Position>,
        #[arg(short, long, default_value = "")]
        team: String,
        /// Outage types to ignore, e.g. injury_green
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<OutageType>,
    },
    /// Flag the players of a roster JSON file who are injured or suspended
    Check {
        #[arg(short, long)]
        championship: Championship,
        #[arg(short, long)]
        roster: PathBuf,
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<OutageType>,
    },
}

fn write_csv(players: &[Player]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    wtr.write_record(["full_name_with_position", "position", "team", "outage_type", "description", "length"])?;
    for player in players {
        wtr.write_record([
            player.full_name_with_position.as_str(),
            player.position().ok().and_then(Position::code).unwrap_or_default(),
            player.team.as_deref().unwrap_or_default(),
            player.outage_type.value(),
            player.description.as_str(),
            player.length.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn run<F: HtmlFetcher>(client: InjuredSuspendedClient<F>, command: Commands) -> Result<()> {
    match command {
        Commands::Players { championship, format } => {
            let players = client.get_players(championship)?;
            info!("{} unavailable players in {}", players.len(), championship);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(players.as_slice())?),
                Format::Csv => write_csv(&players)?,
            }
        }
        Commands::Find {
            championship,
            name,
            position,
            team,
            exclude,
        } => {
            let position = position.unwrap_or_default();
            match client.find_player(championship, &name, position, &team, &exclude)? {
                Some(player) => println!("{}", serde_json::to_string_pretty(&player)?),
                None => println!("{} not found", name),
            }
        }
        Commands::Check {
            championship,
            roster: roster_path,
            exclude,
        } => {
            let entries = roster::load_roster(&roster_path)?;
            let unavailable = roster::check_roster(&client, championship, &entries, &exclude)?;
            info!("{} of {} roster players unavailable", unavailable.len(), entries.len());
            println!("{}", serde_json::to_string_pretty(&unavailable)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScraperConfig::from_env();

    match cli.html_dir {
        Some(dir) => run(InjuredSuspendedClient::new(&config, FileHtmlFetcher::new(dir)), cli.command),
        None => run(InjuredSuspendedClient::build(&config)?, cli.command),
    }
}
