use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use std::path::PathBuf;

use gad_swap::address::clean_address;
use gad_swap::discovery::{fetch_token_metadata, known_balances};
use gad_swap::swap::{
    approval_needed, plan_exact_input, SwapParams, DEFAULT_DEADLINE_SECS, DEFAULT_SLIPPAGE_BPS,
};
use gad_swap::token::TokenRegistry;
use gad_swap::units::{format_units, to_smallest_unit};
use gad_swap::{ChainReader, Config, QuoteEngine, QuoteError, RpcReader};

const DISPLAY_DECIMALS: usize = 6;

#[derive(Parser)]
#[command(name = "gad-swap", about = "PancakeSwap v2 quotes and token tools for the GAD wallet")]
struct Cli {
    /// File holding user-added tokens
    #[arg(long, env = "GAD_TOKENS_FILE", default_value = "tokens.json")]
    tokens_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote an exact-input swap, e.g. `quote BNB GAD 0.5`
    Quote {
        token_in: String,
        token_out: String,
        amount: String,
        #[arg(long)]
        json: bool,
    },
    /// Build router calldata for a swap without sending it
    Plan {
        token_in: String,
        token_out: String,
        amount: String,
        #[arg(long)]
        to: String,
        /// Wallet spending the input, defaults to the recipient
        #[arg(long)]
        from: Option<String>,
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE_BPS)]
        slippage_bps: u32,
        #[arg(long, default_value_t = DEFAULT_DEADLINE_SECS)]
        deadline_secs: u64,
    },
    /// List known tokens
    Tokens,
    /// Show balances of every known token
    Balances { owner: String },
    /// Read an ERC-20 from chain and add it to the token list
    AddToken { address: String },
    /// Remove a user-added token by symbol
    RemoveToken { symbol: String },
}

#[tokio::main]
async fn main() {
    // initializations
    dotenv::dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        match e.downcast_ref::<QuoteError>() {
            Some(quote_error) => {
                error!("{quote_error}");
                eprintln!("{}", quote_error.user_message());
            }
            None => eprintln!("{e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let mut registry = TokenRegistry::new(&config);
    let loaded = registry.load_custom(&cli.tokens_file)?;
    info!("Loaded {loaded} custom tokens from {}", cli.tokens_file.display());

    // construct the provider
    let url: Url = config.rpc_url.parse().context("invalid BSC_RPC_URL")?;
    let provider = ProviderBuilder::new().on_http(url);
    let engine = QuoteEngine::new(RpcReader::new(provider), &config);

    match cli.command {
        Command::Quote {
            token_in,
            token_out,
            amount,
            json,
        } => {
            let token_in = registry.lookup(&token_in)?.clone();
            let token_out = registry.lookup(&token_out)?.clone();
            let amount_in = to_smallest_unit(&amount, token_in.decimals)?;
            if amount_in.is_zero() {
                return Err(QuoteError::invalid("amount must be positive").into());
            }
            let quote = engine
                .quote_exact_input(token_in.address, token_out.address, amount_in)
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else if !quote.has_route() {
                println!("No route available for {} -> {}", token_in.symbol, token_out.symbol);
            } else {
                let route: Vec<String> = quote
                    .path
                    .iter()
                    .map(|a| symbol_of(&registry, *a))
                    .collect();
                println!(
                    "{} {} -> {} {} via {}",
                    amount.trim(),
                    token_in.symbol,
                    format_units(quote.amount_out, token_out.decimals, DISPLAY_DECIMALS)?,
                    token_out.symbol,
                    route.join(" > ")
                );
            }
        }
        Command::Plan {
            token_in,
            token_out,
            amount,
            to,
            from,
            slippage_bps,
            deadline_secs,
        } => {
            let token_in = registry.lookup(&token_in)?.clone();
            let token_out = registry.lookup(&token_out)?.clone();
            let recipient = clean_address(&to)?;
            let owner = match from {
                Some(from) => clean_address(&from)?,
                None => recipient,
            };
            let mut params = SwapParams::new(
                token_in.address,
                token_out.address,
                to_smallest_unit(&amount, token_in.decimals)?,
                recipient,
            );
            params.slippage_bps = slippage_bps;
            params.deadline_secs = deadline_secs;

            let plan = plan_exact_input(&engine, config.router, &params).await?;
            let needs_approval = approval_needed(
                engine.reader(),
                config.native_sentinel,
                token_in.address,
                owner,
                config.router,
                params.amount_in,
            )
            .await?;
            if needs_approval {
                println!("Router approval for {} required first", token_in.symbol);
            }
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Tokens => {
            // listed tokens are the built-in ones, marked with '*'
            for token in registry.tokens() {
                let marker = if token.listed { '*' } else { ' ' };
                println!(
                    "{marker} {:<8} {:#x} decimals={} {}",
                    token.symbol, token.address, token.decimals, token.name
                );
            }
        }
        Command::Balances { owner } => {
            let owner = clean_address(&owner)?;
            let block = engine.reader().block_number().await?;
            info!("Reading balances at block {block}");
            for balance in known_balances(engine.reader(), &registry, owner).await? {
                println!(
                    "{:<8} {}",
                    balance.token.symbol,
                    balance.formatted(DISPLAY_DECIMALS)?
                );
            }
        }
        Command::AddToken { address } => {
            let address = clean_address(&address)?;
            let token = fetch_token_metadata(engine.reader(), address).await?;
            let summary = format!("{} ({}) decimals={}", token.symbol, token.name, token.decimals);
            registry.upsert(token)?;
            registry.save_custom(&cli.tokens_file)?;
            println!("Added {summary}");
        }
        Command::RemoveToken { symbol } => match registry.remove_by_symbol(&symbol) {
            Some(token) => {
                registry.save_custom(&cli.tokens_file)?;
                println!("Removed {}", token.symbol);
            }
            None => println!("{symbol} is not a custom token"),
        },
    }
    Ok(())
}

fn symbol_of(registry: &TokenRegistry, address: Address) -> String {
    registry
        .find_by_address(address)
        .map(|t| t.symbol.clone())
        .unwrap_or_else(|| format!("{address:#x}"))
}
