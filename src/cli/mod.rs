pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crm-view-api")]
#[command(about = "CRM View API - list, filter and form metadata service for CRM doctypes")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Mint a development JWT for a user")]
    Token(commands::token::TokenArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve(args) => commands::serve::handle(args).await,
        Commands::Token(args) => commands::token::handle(args, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from(["crm-view-api", "serve", "--port", "8080", "--fixtures", "crm.json"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.fixtures.unwrap().to_str(), Some("crm.json"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn token_requires_user() {
        assert!(Cli::try_parse_from(["crm-view-api", "token"]).is_err());
        let cli = Cli::try_parse_from(["crm-view-api", "--json", "token", "--user", "ada@example.com"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
    }
}
