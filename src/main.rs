use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gitweave_graph::{
    ConnectionLine, ConnectionMapper, ConnectionStatistics, Event, GraphConfig, Position,
    RelationshipAnalyzer,
};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gitweave")]
#[command(
    about = "Infer relationships between history events and lay them out as connection lines",
    long_about = None
)]
struct Cli {
    /// TOML file with [analyzer] and [mapper] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print inferred relationships
    Analyze {
        /// JSON array of events ("-" for stdin)
        #[arg(default_value = "-")]
        events: PathBuf,
    },
    /// Print per-merge analysis
    Merges {
        /// JSON array of events ("-" for stdin)
        #[arg(default_value = "-")]
        events: PathBuf,
    },
    /// List events descending from one event
    Descendants {
        /// JSON array of events ("-" for stdin)
        #[arg(default_value = "-")]
        events: PathBuf,
        /// Event to start from
        #[arg(long)]
        id: String,
        /// Search depth (capped by max_parent_depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Show event statistics
    Stats {
        /// JSON array of events ("-" for stdin)
        #[arg(default_value = "-")]
        events: PathBuf,
    },
    /// Map relationships onto positions and print connection lines
    Connect {
        /// JSON array of events ("-" for stdin)
        #[arg(default_value = "-")]
        events: PathBuf,
        /// JSON array of positions from the layout engine
        #[arg(short, long)]
        positions: PathBuf,
    },
}

#[derive(Serialize)]
struct ConnectOutput {
    connections: Vec<ConnectionLine>,
    statistics: ConnectionStatistics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            GraphConfig::from_toml_str(&content)?
        }
        None => GraphConfig::default(),
    };
    let analyzer = RelationshipAnalyzer::new(config.analyzer.clone());

    match cli.command {
        Commands::Analyze { events } => {
            let events = read_events(&events)?;
            let relationships = analyzer.analyze_relationships(&events);
            info!("{} relationships from {} events", relationships.len(), events.len());
            print_json(&relationships)?;
        }
        Commands::Merges { events } => {
            let events = read_events(&events)?;
            let merges = analyzer.analyze_merge_commits(&events);
            print_json(&merges)?;
        }
        Commands::Descendants { events, id, depth } => {
            let events = read_events(&events)?;
            let depth = depth.unwrap_or(config.analyzer.max_parent_depth);
            for event in analyzer.find_descendants(&events, &id, depth) {
                println!("{}\t{}\t{}", event.id, event.branch, event.title);
            }
        }
        Commands::Stats { events } => {
            let events = read_events(&events)?;
            let stats = analyzer.analysis_statistics(&events);
            println!("Total events:   {}", stats.total_events);
            println!("Merge events:   {}", stats.merge_events);
            println!("  simple:       {}", stats.simple_merges);
            println!("  octopus:      {}", stats.octopus_merges);
            println!("Orphan events:  {}", stats.orphan_events);
        }
        Commands::Connect { events, positions } => {
            let events = read_events(&events)?;
            let positions = read_positions(&positions)?;

            let relationships = analyzer.analyze_relationships(&events);
            let mapper = ConnectionMapper::new(config.mapper);
            let connections = mapper.map_relationships_to_connections(&relationships, &positions);
            let statistics = mapper.connection_statistics(&connections);
            info!(
                "{} connections ({} curved) from {} relationships",
                statistics.total,
                statistics.curved,
                relationships.len()
            );

            print_json(&ConnectOutput { connections, statistics })?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = read_input(path)?;
    serde_json::from_str(&content).context("Invalid events JSON")
}

fn read_positions(path: &Path) -> Result<HashMap<String, Position>> {
    let content = read_input(path)?;
    let positions: Vec<Position> =
        serde_json::from_str(&content).context("Invalid positions JSON")?;
    Ok(positions.into_iter().map(|p| (p.event_id.clone(), p)).collect())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
