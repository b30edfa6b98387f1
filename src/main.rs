mod display;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use display::output::{
    display_error, display_info, display_league_entries, display_listing, display_match,
    display_match_history, display_success, display_summoner,
};
use indicatif::{ProgressBar, ProgressStyle};
use league_ingest::api::endpoints::{Division, MatchIdsFilter, Queue, Region, Tier};
use league_ingest::api::{RiotApiClient, SummonerQuery};
use league_ingest::config::Config;
use league_ingest::logging;
use league_ingest::model::{Flatten, SummonerProfile};
use league_ingest::store::Database;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "league_ingest")]
#[command(about = "Fetch League of Legends data and store it as relational records", long_about = None)]
struct Cli {
    /// Platform to query (default: RIOT_REGION or EUW)
    #[arg(short, long, global = true)]
    region: Option<Region>,

    /// Merge fetched records into the SQLite database
    #[arg(long, global = true)]
    store: bool,

    /// SQLite database file (default: RIOT_DB_PATH or ~/.league_ingest/league.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
struct SummonerArgs {
    /// Summoner name
    #[arg(short, long)]
    name: Option<String>,

    #[arg(long)]
    puuid: Option<String>,

    /// Encrypted summoner id
    #[arg(long)]
    id: Option<String>,

    /// Encrypted account id
    #[arg(long)]
    account: Option<String>,
}

impl SummonerArgs {
    fn query(&self) -> SummonerQuery {
        SummonerQuery {
            summoner_id: self.id.clone(),
            account_id: self.account.clone(),
            puuid: self.puuid.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Apex {
    Challenger,
    Grandmaster,
    Master,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a summoner profile
    Summoner(SummonerArgs),

    /// Ranked standings of a summoner
    Entries(SummonerArgs),

    /// Apex ladder, a whole league by id, or one page of a tier/division
    Ladder {
        #[arg(value_enum, required_unless_present_any = ["league_id", "tier"])]
        apex: Option<Apex>,

        /// solo, flex (draft and blind have no ladder)
        #[arg(short, long, default_value = "solo")]
        queue: Queue,

        #[arg(long, conflicts_with_all = ["apex", "tier"])]
        league_id: Option<String>,

        /// IRON..DIAMOND, paged by division
        #[arg(long, requires = "division", conflicts_with = "apex")]
        tier: Option<Tier>,

        #[arg(long)]
        division: Option<Division>,

        #[arg(long, default_value = "1")]
        page: u32,

        /// Number of players to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// One match, optionally with its timeline
    Match {
        match_id: String,

        #[arg(long)]
        timeline: bool,
    },

    /// Recent matches of a summoner
    History {
        #[command(flatten)]
        summoner: SummonerArgs,

        /// Number of matches (max: 100)
        #[arg(short, long, default_value = "20")]
        count: u32,

        /// Skip the N most recent matches
        #[arg(long, default_value = "0")]
        offset: u32,

        /// solo, flex, draft, blind
        #[arg(short, long)]
        queue: Option<Queue>,

        #[arg(long)]
        timeline: bool,
    },

    /// Create the database tables
    InitDb {
        /// Drop existing tables first
        #[arg(long)]
        overwrite: bool,
    },

    /// Drop every database table
    DropDb,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db.clone().unwrap_or_else(Config::db_path_from_env);

    match cli.command {
        Command::InitDb { overwrite } => {
            let mut db = open_database(&db_path)?;
            db.create_schema(overwrite)
                .context("Failed to create the schema")?;
            display_success(&format!("Schema ready in {}", db_path.display()));
            return Ok(());
        }
        Command::DropDb => {
            let mut db = open_database(&db_path)?;
            db.drop_schema().context("Failed to drop the schema")?;
            display_success(&format!("Dropped every table in {}", db_path.display()));
            return Ok(());
        }
        _ => {}
    }

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(region) = cli.region {
        config.region = region;
    }
    config.db_path = db_path;

    let region = config.region;
    let client = RiotApiClient::new(config.clone());
    let mut sink = if cli.store {
        let mut db = open_database(&config.db_path)?;
        db.create_schema(false)?;
        Some(db)
    } else {
        None
    };

    match cli.command {
        Command::Summoner(args) => {
            let profile = client.get_summoner(region, &args.query())?;
            display_summoner(&profile);
            persist(&mut sink, &profile)?;
        }
        Command::Entries(args) => {
            let profile = client.get_summoner(region, &args.query())?;
            let entries = client.get_league_entries(region, &profile.summoner_id)?;
            display_summoner(&profile);
            display_league_entries(&entries);
            persist(&mut sink, &profile)?;
            persist(&mut sink, &entries)?;
        }
        Command::Ladder {
            apex,
            queue,
            league_id,
            tier,
            division,
            page,
            top,
        } => {
            if let (Some(tier), Some(division)) = (tier, division) {
                let entries =
                    client.get_league_entries_by_tier(region, queue, tier, division, page)?;
                display_info(&format!(
                    "{} {} {} page {}",
                    tier.as_str(),
                    division.as_str(),
                    queue.ladder_code().unwrap_or("-"),
                    page
                ));
                display_league_entries(&entries[..entries.len().min(top)]);
                persist(&mut sink, &entries)?;
            } else {
                let listing = match (league_id, apex) {
                    (Some(id), _) => client.get_league_by_id(region, &id)?,
                    (None, Some(Apex::Challenger)) => client.get_challenger_league(region, queue)?,
                    (None, Some(Apex::Grandmaster)) => {
                        client.get_grandmaster_league(region, queue)?
                    }
                    (None, Some(Apex::Master)) => client.get_master_league(region, queue)?,
                    (None, None) => anyhow::bail!("choose a ladder, --league-id or --tier"),
                };
                display_listing(&listing, top);
                persist(&mut sink, &listing)?;
            }
        }
        Command::Match { match_id, timeline } => {
            let game = client
                .get_match(region, &match_id, timeline)
                .with_context(|| format!("Failed to fetch match {}", match_id))?;
            display_match(&game);
            persist(&mut sink, &game)?;
        }
        Command::History {
            summoner,
            count,
            offset,
            queue,
            timeline,
        } => {
            let profile = client.get_summoner(region, &summoner.query())?;
            history(&client, &mut sink, region, &profile, count, offset, queue, timeline)?;
        }
        Command::InitDb { .. } | Command::DropDb => {}
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn history(
    client: &RiotApiClient,
    sink: &mut Option<Database>,
    region: Region,
    profile: &SummonerProfile,
    count: u32,
    offset: u32,
    queue: Option<Queue>,
    timeline: bool,
) -> Result<()> {
    let filter = MatchIdsFilter {
        count: Some(count),
        start: Some(offset),
        queue,
        ..Default::default()
    };
    let match_ids = client.get_match_ids(region, &profile.puuid, &filter)?;
    if match_ids.is_empty() {
        display_info("No matches found for this summoner");
        return Ok(());
    }
    display_success(&format!("Found {} matches", match_ids.len()));

    let pb = ProgressBar::new(match_ids.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Fetching match details");

    let mut games = Vec::with_capacity(match_ids.len());
    for match_id in match_ids {
        let game = client
            .get_match(region, &match_id, timeline)
            .with_context(|| format!("Failed to fetch match {}", match_id))?;
        persist(sink, &game)?;
        games.push((match_id, game));
        pb.inc(1);
    }
    pb.finish_with_message("✓ Match data fetched");

    display_match_history(&games, &profile.puuid);
    Ok(())
}

fn open_database(path: &Path) -> Result<Database> {
    Database::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn persist<G: Flatten + ?Sized>(sink: &mut Option<Database>, graph: &G) -> Result<()> {
    if let Some(db) = sink {
        let rows = db.merge(graph).context("Failed to store records")?;
        display_success(&format!("Stored {} records", rows));
    }
    Ok(())
}
