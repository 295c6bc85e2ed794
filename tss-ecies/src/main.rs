//! Command-line front end for the ECIES facade.
//!
//! - `keygen` prints a fresh key pair as JSON,
//! - `encrypt` seals a message to a public key and prints base64,
//! - `decrypt` opens a base64 message with a private key and prints the plaintext.
//!
//! Messages and ciphertexts are read from standard input when not given as arguments.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tss_ecies::text;

#[derive(Parser)]
#[command(name = "tss-ecies", version)]
#[command(about = "ECIES over secp256k1 with hex keys and base64 ciphertexts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair and print it as JSON
    Keygen,

    /// Encrypt a message to a public key
    Encrypt {
        /// Recipient public key (hex, compressed or uncompressed SEC1)
        #[arg(long)]
        public_key: String,

        /// Message to encrypt; read from stdin if omitted
        #[arg(long)]
        message: Option<String>,
    },

    /// Decrypt a base64 ciphertext with a private key
    Decrypt {
        /// Recipient private key (hex)
        #[arg(long)]
        private_key: String,

        /// Base64 ciphertext; read from stdin if omitted
        #[arg(long)]
        ciphertext: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Keygen => text::generate_key_pair()?,
        Commands::Encrypt { public_key, message } => {
            let message = match message {
                Some(message) => message,
                None => read_stdin()?,
            };
            text::encrypt(&message, &public_key)?
        },
        Commands::Decrypt { private_key, ciphertext } => {
            let ciphertext = match ciphertext {
                Some(ciphertext) => ciphertext,
                None => read_stdin()?,
            };
            text::decrypt(ciphertext.trim_end(), &private_key)?
        },
    };

    println!("{output}");
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("failed to read standard input")?;
    debug!(len = input.len(), "read input from stdin");
    Ok(input)
}
