use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "toolauth", version, about = "Toolauth bearer token CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Key management (generate)
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Token operations (issue/verify/inspect)
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate an RSA keypair, or load it if the files already exist
    Generate {
        /// Path for the PKCS8/PEM private key
        #[arg(long, env = "TOOLAUTH_PRIVATE_KEY")]
        private_key: PathBuf,

        /// Path for the SPKI/PEM public key
        #[arg(long, env = "TOOLAUTH_PUBLIC_KEY")]
        public_key: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a signed bearer token
    Issue {
        #[arg(long, env = "TOOLAUTH_PRIVATE_KEY")]
        private_key: PathBuf,

        #[arg(long, env = "TOOLAUTH_PUBLIC_KEY")]
        public_key: PathBuf,

        /// Token subject (default: dev-user)
        #[arg(long)]
        subject: Option<String>,

        /// Token issuer URI
        #[arg(long)]
        issuer: Option<String>,

        /// Token audience
        #[arg(long)]
        audience: Option<String>,

        /// Comma-separated scopes (default: read,write)
        #[arg(long)]
        scopes: Option<String>,

        /// Time-to-live, e.g. 30s, 5m, 2h, 1d (default: 1h)
        #[arg(long)]
        expires: Option<String>,
    },

    /// Verify a token and print its claims
    Verify {
        token: String,

        /// Path to the SPKI/PEM public key; the private key is not needed
        #[arg(long, env = "TOOLAUTH_PUBLIC_KEY")]
        public_key: PathBuf,
    },

    /// Print a token's claims without verifying it
    Inspect { token: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate {
                private_key,
                public_key,
            } => commands::keys::generate(&private_key, &public_key)?,
        },

        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                private_key,
                public_key,
                subject,
                issuer,
                audience,
                scopes,
                expires,
            } => commands::token::issue(
                &private_key,
                &public_key,
                subject,
                issuer,
                audience,
                scopes,
                expires,
            )?,
            TokenCommand::Verify { token, public_key } => {
                commands::token::verify(&token, &public_key)?
            }
            TokenCommand::Inspect { token } => commands::token::inspect(&token)?,
        },
    }

    Ok(())
}
