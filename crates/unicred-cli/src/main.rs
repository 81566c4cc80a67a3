//! unicred CLI - Pre-flight validation, hashing and journal-backed registry operations.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{canonicalize, credentials, decide, hash, issue, list, register, validate, verify};

#[derive(Parser)]
#[command(name = "unicred")]
#[command(about = "University registration and credential registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a registration submission without touching any registry
    Validate {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Show canonical JSON for input
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Print the content hash of input JSON
    Hash {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Check stored raw JSON against a claimed content hash
    Verify {
        /// Claimed content hash (64 hex characters)
        hash: String,
        /// File holding the stored raw JSON (or stdin if not provided)
        input: Option<String>,
    },
    /// Submit a registration to a journal-backed registry
    Register {
        /// Path to journal file
        journal: String,
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// List registrations, newest first
    List {
        /// Path to journal file
        journal: String,
        /// Only registrations with this status (PENDING, APPROVED, REJECTED)
        #[arg(long)]
        status: Option<String>,
        /// Only registrations in this state or union territory
        #[arg(long)]
        state: Option<String>,
        /// Only registrations of this type (CENTRAL, STATE, PRIVATE, DEEMED)
        #[arg(long = "type")]
        kind: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve a pending registration
    Approve {
        /// Path to journal file
        journal: String,
        /// Registration id
        id: String,
    },
    /// Reject a pending registration
    Reject {
        /// Path to journal file
        journal: String,
        /// Registration id
        id: String,
        /// Reason shown to the applicant
        #[arg(long)]
        reason: String,
    },
    /// Issue a credential from a wallet
    Issue {
        /// Path to journal file
        journal: String,
        /// Issuing wallet address
        #[arg(long)]
        wallet: String,
        /// Credential JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// List issued credentials and re-verify their hashes
    Credentials {
        /// Path to journal file
        journal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if any credential fails verification
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { input } => validate::run(input),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Hash { input } => hash::run(input),
        Commands::Verify { hash, input } => verify::run(hash, input),
        Commands::Register { journal, input } => register::run(journal, input),
        Commands::List {
            journal,
            status,
            state,
            kind,
            json,
        } => list::run(journal, status, state, kind, json),
        Commands::Approve { journal, id } => decide::approve(journal, id),
        Commands::Reject {
            journal,
            id,
            reason,
        } => decide::reject(journal, id, reason),
        Commands::Issue {
            journal,
            wallet,
            input,
        } => issue::run(journal, wallet, input),
        Commands::Credentials {
            journal,
            json,
            strict,
        } => credentials::run(journal, json, strict),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
