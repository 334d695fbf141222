//! Command-line interface definitions.
//!
//! Subcommands cover reference data (games, assets), market templates and
//! hashing, trading, resolution, wallet approvals and configuration.

use std::path::PathBuf;

use alloy_primitives::Address;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;
use crate::domain::id::MarketId;
use crate::domain::market::TradeSide;
use crate::domain::money::parse_usdc;
use crate::domain::sports::{League, RangePreset};

/// Prediction market client: create, trade and resolve on-chain markets
#[derive(Parser, Debug)]
#[command(name = "horizon")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse upcoming games and their resolution status
    #[command(subcommand)]
    Games(GamesCommand),

    /// Browse crypto assets and price targets
    #[command(subcommand)]
    Assets(AssetsCommand),

    /// Generate market parameters from a game or asset
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Compute the duplicate-detection hash of market parameters
    Hash(HashArgs),

    /// Inspect, quote, create and list markets
    #[command(subcommand)]
    Market(MarketCommand),

    /// Buy outcome tokens or provide liquidity
    #[command(subcommand)]
    Trade(TradeCommand),

    /// Report, dispute and arbitrate outcomes
    #[command(subcommand)]
    Resolve(ResolveCommand),

    /// USDC balance and approvals
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Skip interactive confirmation.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ConfirmArg {
    /// Do not ask for confirmation before sending transactions
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum GamesCommand {
    /// List upcoming games for a league
    List(GamesListArgs),
    /// Show live status and resolution readiness of a game
    Status(GameStatusArgs),
}

#[derive(Args, Debug)]
pub struct GamesListArgs {
    /// League (NBA, NFL, MLS, NHL)
    #[arg(long)]
    pub league: League,

    /// Date range preset (today, tomorrow, weekend, next7d, next14d)
    #[arg(long)]
    pub range: Option<RangePreset>,

    /// Bypass the cache
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args, Debug)]
pub struct GameStatusArgs {
    /// League (NBA, NFL, MLS, NHL)
    #[arg(long)]
    pub league: League,

    /// Home team name
    #[arg(long)]
    pub home: String,

    /// Away team name
    #[arg(long)]
    pub away: String,

    /// Scheduled start (RFC 3339) when the game is no longer upcoming
    #[arg(long)]
    pub starts_at: Option<DateTime<Utc>>,
}

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    /// Top assets by market cap
    Top(AssetsTopArgs),
    /// Search assets by name, symbol or id
    Search(AssetsSearchArgs),
    /// Suggest round price targets around a price
    Targets(AssetsTargetsArgs),
}

#[derive(Args, Debug)]
pub struct AssetsTopArgs {
    /// Number of assets to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct AssetsSearchArgs {
    /// Search term
    pub query: String,
}

#[derive(Args, Debug)]
pub struct AssetsTargetsArgs {
    /// Current price in USD
    pub price: f64,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Game-winner market for an upcoming game
    Sports(SportsTemplateArgs),
    /// Price-target market for a crypto asset
    Crypto(CryptoTemplateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SportsTemplateArgs {
    /// League (NBA, NFL, MLS, NHL)
    #[arg(long)]
    pub league: League,

    /// Game id as listed by `games list`
    #[arg(long)]
    pub game_id: String,
}

#[derive(Args, Debug, Clone)]
pub struct CryptoTemplateArgs {
    /// Asset id or symbol (e.g. bitcoin, btc)
    #[arg(long)]
    pub asset: String,

    /// Target price in USD
    #[arg(long)]
    pub target: Decimal,

    /// Resolution date (YYYY-MM-DD, end of day UTC)
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Args, Debug, Clone)]
pub struct HashArgs {
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub title: String,

    /// Resolution time as a unix timestamp
    #[arg(long)]
    pub resolve_at: i64,

    /// Primary source URL
    #[arg(long)]
    pub source: String,

    #[arg(long)]
    pub rules: String,
}

#[derive(Subcommand, Debug)]
pub enum MarketCommand {
    /// Show an event, its reserves and your position
    Show(MarketShowArgs),
    /// Estimate a trade without sending it
    Quote(MarketQuoteArgs),
    /// Create a market from a template or explicit parameters
    Create(Box<MarketCreateArgs>),
    /// List markets created from this machine
    List(MarketListArgs),
}

#[derive(Args, Debug)]
pub struct MarketShowArgs {
    /// Market id (0x-prefixed 32-byte hash)
    pub id: MarketId,
}

#[derive(Args, Debug)]
pub struct MarketQuoteArgs {
    #[arg(long, value_enum)]
    pub side: SideArg,

    /// USDC amount in dollars
    #[arg(long, value_parser = parse_usdc)]
    pub amount: Decimal,
}

#[derive(Args, Debug)]
pub struct MarketCreateArgs {
    /// Build from a game (requires --game-id)
    #[arg(long, requires = "game_id", conflicts_with = "asset")]
    pub league: Option<League>,

    #[arg(long, requires = "league")]
    pub game_id: Option<String>,

    /// Build from a crypto asset (requires --target and --date)
    #[arg(long, requires_all = ["target", "date"])]
    pub asset: Option<String>,

    #[arg(long)]
    pub target: Option<Decimal>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Explicit fields, overriding any template
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Unix timestamp
    #[arg(long)]
    pub resolve_at: Option<i64>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub rules: Option<String>,

    /// Initial liquidity in USDC
    #[arg(long, value_parser = parse_usdc)]
    pub liquidity: Option<Decimal>,

    /// Approve the event factory first when the allowance is too low
    #[arg(long)]
    pub approve: bool,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Args, Debug)]
pub struct MarketListArgs {
    /// Query the factory for this wallet's events instead of the local registry
    #[arg(long)]
    pub onchain: bool,
}

#[derive(Subcommand, Debug)]
pub enum TradeCommand {
    /// Buy YES or NO tokens
    Buy(TradeBuyArgs),
    /// Add liquidity to a market
    Liquidity(TradeLiquidityArgs),
}

#[derive(Args, Debug)]
pub struct TradeBuyArgs {
    pub id: MarketId,

    #[arg(long, value_enum)]
    pub side: SideArg,

    /// USDC amount in dollars
    #[arg(long, value_parser = parse_usdc)]
    pub amount: Decimal,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Args, Debug)]
pub struct TradeLiquidityArgs {
    pub id: MarketId,

    /// USDC amount in dollars
    #[arg(long, value_parser = parse_usdc)]
    pub amount: Decimal,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Subcommand, Debug)]
pub enum ResolveCommand {
    /// Resolution state, report and dispute of a market
    Status(ResolveStatusArgs),
    /// Report an outcome with evidence
    Report(ResolveReportArgs),
    /// Dispute the current report
    Dispute(ResolveDisputeArgs),
    /// Settle a disputed market (arbiter only)
    Arbiter(ResolveArbiterArgs),
    /// Mark a market invalid (arbiter only)
    Invalidate(ResolveInvalidateArgs),
}

#[derive(Args, Debug)]
pub struct ResolveStatusArgs {
    pub id: MarketId,

    /// Also fetch and print the evidence document
    #[arg(long)]
    pub evidence: bool,
}

#[derive(Args, Debug)]
pub struct ResolveReportArgs {
    pub id: MarketId,

    #[arg(long, value_enum)]
    pub outcome: SideArg,

    /// Where the outcome can be verified
    #[arg(long)]
    pub source: String,

    /// Raw value observed at the source (e.g. a final score)
    #[arg(long, default_value = "")]
    pub value: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Args, Debug)]
pub struct ResolveDisputeArgs {
    pub id: MarketId,

    /// URL supporting the dispute
    #[arg(long)]
    pub reason_url: String,

    /// Counter-evidence summary
    #[arg(long)]
    pub evidence: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Args, Debug)]
pub struct ResolveArbiterArgs {
    pub id: MarketId,

    #[arg(long, value_enum)]
    pub outcome: SideArg,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Args, Debug)]
pub struct ResolveInvalidateArgs {
    pub id: MarketId,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// USDC balance and allowances
    Balance,
    /// Approve a spender (defaults to the event factory)
    Approve(WalletApproveArgs),
}

#[derive(Args, Debug)]
pub struct WalletApproveArgs {
    /// Spender address
    #[arg(long)]
    pub spender: Option<Address>,

    /// USDC amount in dollars (unlimited when omitted)
    #[arg(long, value_parser = parse_usdc)]
    pub amount: Option<Decimal>,

    #[command(flatten)]
    pub confirm: ConfirmArg,
}

/// YES or NO.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SideArg {
    Yes,
    No,
}

impl From<SideArg> for TradeSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Yes => Self::Yes,
            SideArg::No => Self::No,
        }
    }
}

impl From<SideArg> for bool {
    fn from(side: SideArg) -> Self {
        side == SideArg::Yes
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented config template
    Init(ConfigInitArgs),
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["horizon", "config", "show", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Config(ConfigCommand::Show)));
    }

    #[test]
    fn config_defaults_to_horizon_home() {
        let cli = Cli::try_parse_from(["horizon", "config", "validate"]).unwrap();
        assert!(cli.config.ends_with(".horizon/config.toml"));
    }

    #[test]
    fn games_list_parses_league_and_range() {
        let cli =
            Cli::try_parse_from(["horizon", "games", "list", "--league", "nba", "--range", "weekend"])
                .unwrap();
        let Commands::Games(GamesCommand::List(args)) = cli.command else {
            panic!("expected games list");
        };
        assert_eq!(args.league, League::Nba);
        assert_eq!(args.range, Some(RangePreset::Weekend));
        assert!(!args.refresh);
    }

    #[test]
    fn unknown_league_is_rejected() {
        assert!(Cli::try_parse_from(["horizon", "games", "list", "--league", "cricket"]).is_err());
    }

    #[test]
    fn trade_buy_parses_side_and_amount() {
        let cli = Cli::try_parse_from([
            "horizon", "trade", "buy", ID, "--side", "no", "--amount", "12.5", "-y",
        ])
        .unwrap();
        let Commands::Trade(TradeCommand::Buy(args)) = cli.command else {
            panic!("expected trade buy");
        };
        assert_eq!(TradeSide::from(args.side), TradeSide::No);
        assert_eq!(args.amount.to_string(), "12.5");
        assert!(args.confirm.yes);
    }

    #[test]
    fn malformed_market_id_is_rejected() {
        assert!(Cli::try_parse_from(["horizon", "market", "show", "0x1234"]).is_err());
    }

    #[test]
    fn template_crypto_parses_date() {
        let cli = Cli::try_parse_from([
            "horizon", "template", "crypto", "--asset", "btc", "--target", "100000", "--date",
            "2025-12-31",
        ])
        .unwrap();
        let Commands::Template(TemplateCommand::Crypto(args)) = cli.command else {
            panic!("expected template crypto");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn market_create_rejects_mixed_templates() {
        let result = Cli::try_parse_from([
            "horizon", "market", "create", "--league", "NBA", "--game-id", "nba_1", "--asset",
            "btc", "--target", "1", "--date", "2025-01-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn market_create_asset_needs_target_and_date() {
        assert!(Cli::try_parse_from(["horizon", "market", "create", "--asset", "btc"]).is_err());
    }

    #[test]
    fn resolve_report_outcome_maps_to_bool() {
        let cli = Cli::try_parse_from([
            "horizon", "resolve", "report", ID, "--outcome", "yes", "--source",
            "https://espn.com",
        ])
        .unwrap();
        let Commands::Resolve(ResolveCommand::Report(args)) = cli.command else {
            panic!("expected resolve report");
        };
        assert!(bool::from(args.outcome));
        assert!(!args.confirm.yes);
    }

    #[test]
    fn hash_requires_every_field() {
        assert!(Cli::try_parse_from(["horizon", "hash", "--category", "Sports"]).is_err());
    }
}
