use anyhow::Context as _;
use clap::{Parser, Subcommand};
use creator_metadata::instruction::MetadataInstruction;
use creator_metadata_sdk::{validate_data, MetadataClient};
use solana_program::pubkey::Pubkey;
use std::{collections::HashSet, path::PathBuf, process::ExitCode};

mod payload;

use payload::{load_payload, parse_pubkey};

#[derive(Parser, Debug)]
#[command(
    name = "creator-metadata",
    version,
    about = "Creator Metadata CLI",
    long_about = "Offline helpers for the Creator Metadata program: derive metadata PDAs, validate payloads, encode instructions.\nJSON is always printed to stdout; logs/status to stderr."
)]
struct Cli {
    /// Metadata program id (base58); defaults to the built-in program id
    #[arg(env = "CREATOR_METADATA_PROGRAM_ID", global = true, long)]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the metadata PDA for a mint
    #[command(alias = "address", about = "Derive the metadata PDA for a mint")]
    Pda {
        /// Mint address
        #[arg(long)]
        mint: String,
    },

    /// Validate a JSON payload against a signer set
    #[command(alias = "check", about = "Validate a JSON metadata payload")]
    Validate {
        /// Path to the JSON payload
        #[arg(long)]
        payload: PathBuf,
        /// Repeatable signer address; verified creators must be listed here
        #[arg(long = "signer")]
        signers: Vec<String>,
    },

    /// Encode a CreateMetadataAccount instruction as hex
    #[command(about = "Encode CreateMetadataAccount instruction data as hex")]
    Encode {
        /// Path to the JSON payload
        #[arg(long)]
        payload: PathBuf,
        /// If set, the metadata can never be changed
        #[arg(long, default_value_t = false)]
        immutable: bool,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn program_id(arg: Option<&str>) -> anyhow::Result<Pubkey> {
    match arg {
        Some(s) => parse_pubkey(s).context("--program-id or CREATOR_METADATA_PROGRAM_ID"),
        None => Ok(creator_metadata::id()),
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let client = MetadataClient::new(program_id(cli.program_id.as_deref())?);

    match cli.command {
        Commands::Pda { mint } => {
            let mint = parse_pubkey(&mint)?;
            let (metadata, bump) = client.metadata_pda_and_bump(&mint);
            let out = serde_json::json!({
                "program_id": client.program_id.to_string(),
                "mint": mint.to_string(),
                "metadata": metadata.to_string(),
                "bump": bump,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(true)
        }
        Commands::Validate { payload, signers } => {
            let data = load_payload(&payload)?;
            let signers = signers
                .iter()
                .map(|s| parse_pubkey(s))
                .collect::<anyhow::Result<HashSet<_>>>()?;
            tracing::info!(
                creators = data.creators.as_ref().map(Vec::len),
                signers = signers.len(),
                "validating {}",
                payload.display()
            );
            let out = match validate_data(&data, &signers) {
                Ok(()) => serde_json::json!({ "ok": true }),
                Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(out["ok"].as_bool().unwrap_or(false))
        }
        Commands::Encode { payload, immutable } => {
            let data = load_payload(&payload)?;
            let ix = MetadataInstruction::CreateMetadataAccount {
                data,
                is_mutable: !immutable,
            };
            let out = serde_json::json!({
                "program_id": client.program_id.to_string(),
                "data": hex::encode(ix.pack()),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
