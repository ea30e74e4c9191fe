//! Command line interface for the LP portfolio aggregator.
use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lp_portfolio_data::config::{ConfigStore, Registry};
use lp_portfolio_data::service::{
    AddressTarget, ChainTarget, PortfolioRun, ReportRequest, build_report,
};
use lp_portfolio_domain::token::TokenTotals;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lp-portfolio")]
#[command(about = "Aggregates LP token positions across chains and wallets", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to LP_PORTFOLIO_CONFIG or
    /// lp-portfolio.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage named subgraph endpoints
    Chains {
        #[command(subcommand)]
        command: RegistryCommand,
    },
    /// Manage named wallet addresses
    Addresses {
        #[command(subcommand)]
        command: RegistryCommand,
    },
    /// Query every (chain, address) pair and print position totals
    Report {
        /// Chain names to include (default: all configured)
        #[arg(long = "chain")]
        chains: Vec<String>,

        /// Address names to include (default: all configured)
        #[arg(long = "address")]
        addresses: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RegistryCommand {
    /// List configured entries
    List,
    /// Add or replace an entry
    Add { name: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| env::var("LP_PORTFOLIO_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("lp-portfolio.json"));
    let mut store = ConfigStore::load(&config_path)?;
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    match cli.command {
        Commands::Chains { command } => match command {
            RegistryCommand::List => print_registry("Chains", store.subgraphs()),
            RegistryCommand::Add { name, value } => {
                store.subgraphs_mut().put(&name, &value);
                store.save()?;
                println!("✅ Saved chain {name}");
            }
        },
        Commands::Addresses { command } => match command {
            RegistryCommand::List => print_registry("Addresses", store.addresses()),
            RegistryCommand::Add { name, value } => {
                store.addresses_mut().put(&name, &value);
                store.save()?;
                println!("✅ Saved address {name}");
            }
        },
        Commands::Report { chains, addresses } => {
            let request = resolve_request(&store, &chains, &addresses)?;
            println!(
                "📡 Querying {} chain(s) × {} address(es)...",
                request.chains.len(),
                request.addresses.len(),
            );
            let run = build_report(reqwest::Client::new(), &request).await?;
            print_run(&run);
        }
    }

    Ok(())
}

/// Resolves requested names against the config, defaulting to everything
/// configured. Unknown names are hard errors rather than silent no-ops.
fn resolve_request(
    store: &ConfigStore,
    chains: &[String],
    addresses: &[String],
) -> Result<ReportRequest> {
    let chains = if chains.is_empty() {
        store
            .subgraphs()
            .list()
            .map(|(name, endpoint)| ChainTarget {
                name: name.clone(),
                endpoint: endpoint.clone(),
            })
            .collect::<Vec<_>>()
    } else {
        chains
            .iter()
            .map(|name| {
                store
                    .subgraphs()
                    .get(name)
                    .map(|endpoint| ChainTarget {
                        name: name.clone(),
                        endpoint: endpoint.to_string(),
                    })
                    .ok_or_else(|| anyhow!("unknown chain {name:?}; add it with `chains add`"))
            })
            .collect::<Result<Vec<_>>>()?
    };
    if chains.is_empty() {
        bail!("no chains configured; add one with `chains add <name> <url>`");
    }

    let addresses = if addresses.is_empty() {
        store
            .addresses()
            .list()
            .map(|(name, address)| AddressTarget {
                name: name.clone(),
                address: address.clone(),
            })
            .collect::<Vec<_>>()
    } else {
        addresses
            .iter()
            .map(|name| {
                store
                    .addresses()
                    .get(name)
                    .map(|address| AddressTarget {
                        name: name.clone(),
                        address: address.to_string(),
                    })
                    .ok_or_else(|| anyhow!("unknown address {name:?}; add it with `addresses add`"))
            })
            .collect::<Result<Vec<_>>>()?
    };
    if addresses.is_empty() {
        bail!("no addresses configured; add one with `addresses add <name> <address>`");
    }

    Ok(ReportRequest { chains, addresses })
}

fn print_registry(title: &str, registry: &Registry) {
    if registry.is_empty() {
        println!("{title}: nothing configured yet");
        return;
    }
    let mut table = Table::new();
    table.add_row(row!["Name", "Value"]);
    for (name, value) in registry.list() {
        table.add_row(row![name, value]);
    }
    println!("{title}:");
    table.printstd();
}

fn print_run(run: &PortfolioRun) {
    for positions in &run.positions {
        println!("\n📍 {} — {}", positions.chain, positions.address);
        if positions.shares.is_empty() {
            println!("   no active liquidity positions");
            continue;
        }
        let mut table = Table::new();
        table.add_row(row!["Pair", "Token0", "Amount0", "Token1", "Amount1"]);
        for share in &positions.shares {
            table.add_row(row![
                share.pool_id,
                share.token0.symbol,
                display_amount(share.token0.amount),
                share.token1.symbol,
                display_amount(share.token1.amount),
            ]);
        }
        table.printstd();

        let scope = (positions.chain.clone(), positions.address.clone());
        if let Some(totals) = run.report.per_address_totals.get(&scope) {
            print_totals(&format!("Totals for {}", positions.address), totals);
        }
    }

    for (chain, totals) in &run.report.per_chain_totals {
        print_totals(&format!("Chain totals — {chain}"), totals);
    }
    print_totals("Grand totals across all chains and addresses", &run.report.grand_totals);
}

fn print_totals(title: &str, totals: &TokenTotals) {
    println!("\n📊 {title}");
    if totals.is_empty() {
        println!("   (no positions)");
        return;
    }
    let mut table = Table::new();
    table.add_row(row!["Token", "Amount"]);
    for (symbol, amount) in totals.iter() {
        table.add_row(row![symbol, display_amount(*amount)]);
    }
    table.printstd();
}

/// Exact decimal rendered without trailing zeros; no rounding happens here.
fn display_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
