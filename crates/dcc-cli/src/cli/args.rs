use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dcc",
    version,
    about = "Decode EU Digital COVID Certificate QR payloads (HC1) without verifying signatures"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a token and print the certificate as JSON
    Decode(DecodeArgs),
    /// Show envelope and claim details of a token
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory with reference table overrides (valuesets/, devices/, country-2-codes.json)
    #[arg(long, global = true, env = "DCC_REFERENCE_DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Language requested for coded value descriptions
    #[arg(long, global = true, default_value = dcc_decoder::DEFAULT_LANGUAGE)]
    pub lang: String,

    /// Limit overrides as JSON, e.g. '{"max_decode_bytes": 131072}', or @path to a JSON file
    #[arg(long, global = true)]
    pub limits: Option<String>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Token (HC1:...) or '-' to read from stdin
    #[arg(default_value = "-")]
    pub token: String,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Token (HC1:...) or '-' to read from stdin
    #[arg(default_value = "-")]
    pub token: String,
}
