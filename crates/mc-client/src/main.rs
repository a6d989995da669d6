//! # mc-client
//!
//! One quorum query per invocation:
//!
//! ```text
//! mc-client latest
//! mc-client balance <address-hex>
//! mc-client resolve <tag-hex>
//! mc-client hash <block>
//! mc-client block <block>
//! mc-client trailers <start> <count>
//! mc-client peers
//! ```
//!
//! `--expand` and `--benchmark` refresh the peer registry first; `--save`
//! writes the refreshed peers back to the settings file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mc_client::{install_logging, Settings, TcpRuntime};
use mc_telemetry::{log_query_event, TelemetryConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mc-client")]
#[command(version, about = "Quorum-based Mochimo network client")]
struct Args {
    /// Settings file (created by --save)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Extra seed peer, `ip` or `ip:port` (repeatable)
    #[arg(long = "seed")]
    seeds: Vec<String>,

    /// Crawl peer lists before querying
    #[arg(long)]
    expand: bool,

    /// Measure peer latency before querying
    #[arg(long)]
    benchmark: bool,

    /// Write discovered peers back to the settings file
    #[arg(long)]
    save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest block number
    Latest,
    /// Balance of a 40-byte address (hex)
    Balance { address: String },
    /// Address registered under a 20-byte tag (hex)
    Resolve { tag: String },
    /// Hash of a block (0 for the latest)
    Hash { block: u64 },
    /// Download and verify a block (0 for the latest)
    Block { block: u64 },
    /// Block trailers for a range
    Trailers { start: u32, count: u32 },
    /// Expand, benchmark and list peers
    Peers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    install_logging(&TelemetryConfig::from_env()).context("invalid logging configuration")?;

    let mut settings = Settings::load(&args.settings);
    for seed in &args.seeds {
        if !settings.seed_peers.contains(seed) {
            settings.seed_peers.push(seed.clone());
        }
    }
    if settings.seed_peers.is_empty()
        && settings.peers.is_empty()
        && settings.known_hosts.is_empty()
    {
        bail!(
            "no peers configured; pass --seed <ip> or add seed_peers to {}",
            args.settings.display()
        );
    }

    let runtime = TcpRuntime::connect(settings);
    let refresh = matches!(args.command, Command::Peers);
    if args.expand || refresh {
        let found = runtime.expand().await.context("peer expansion failed")?;
        info!(found, "expansion complete");
    }
    if args.benchmark || refresh {
        let measured = runtime.benchmark().await.context("benchmark failed")?;
        info!(measured, "benchmark complete");
    }

    run(&runtime, args.command).await?;

    if args.save {
        runtime
            .settings()
            .save(&args.settings)
            .with_context(|| format!("saving {}", args.settings.display()))?;
        info!(path = %args.settings.display(), "settings saved");
    }
    Ok(())
}

async fn run(runtime: &TcpRuntime, command: Command) -> Result<()> {
    let queries = runtime.queries();
    match command {
        Command::Latest => {
            let number = queries.latest_block_number().await?;
            log_query_event!(debug, "cli", "query resolved", "latest", block = number);
            println!("{number}");
        }
        Command::Balance { address } => {
            let amount = queries.balance_hex(&address).await?;
            log_query_event!(debug, "cli", "query resolved", "balance", amount);
            println!("{amount}");
        }
        Command::Resolve { tag } => {
            let address = queries.resolve_tag_hex(&tag).await?;
            println!("{} {}", address.to_hex(), address.amount());
        }
        Command::Hash { block } => {
            println!("{}", hex::encode(queries.block_hash(block).await?));
        }
        Command::Block { block } => {
            let decoded = queries.block(block).await?;
            println!(
                "block {} hash {} transactions {} pseudo {}",
                decoded.number(),
                hex::encode(decoded.trailer.bhash),
                decoded.body.len(),
                decoded.header.is_pseudo()
            );
        }
        Command::Trailers { start, count } => {
            for trailer in queries.trailers(start, count).await? {
                println!(
                    "{} {} difficulty {} tcount {}",
                    trailer.bnum,
                    hex::encode(trailer.bhash),
                    trailer.difficulty,
                    trailer.tcount
                );
            }
        }
        Command::Peers => {
            for peer in runtime.registry().snapshot() {
                println!("{peer}");
            }
        }
    }
    Ok(())
}
