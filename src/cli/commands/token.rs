use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::issue_token;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "Session user (login id or email) to embed in the token")]
    pub user: String,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    if !crate::is_development!() {
        tracing::warn!("Minting a token outside development for {}", args.user);
    }
    let token = issue_token(&args.user, security).context("failed to mint token (is JWT_SECRET set?)")?;

    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": {
                    "user": args.user,
                    "token": token,
                    "expires_in_hours": security.jwt_expiry_hours
                }
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
