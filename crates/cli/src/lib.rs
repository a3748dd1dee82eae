pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    about = "Frontdesk operator CLI",
    long_about = "Deploy voice assistants, browse carrier inventory and pricing, and inspect \
                  runtime configuration.",
    after_help = "Examples:\n  frontdesk deploy --business business.toml --area-code 512\n  \
                  frontdesk numbers search --country US --type local\n  frontdesk doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the full deployment pipeline for a business described in a TOML file")]
    Deploy {
        #[arg(long, help = "Path to the business description TOML file")]
        business: PathBuf,
        #[arg(long, default_value = "US", help = "Carrier country for the number search")]
        country: String,
        #[arg(long = "type", default_value = "local", help = "Requested number type")]
        number_type: String,
        #[arg(long, help = "Preferred area code")]
        area_code: Option<String>,
        #[arg(long, help = "Digit pattern the number should contain")]
        contains: Option<String>,
        #[arg(long, default_value_t = 5, help = "Maximum search candidates to consider")]
        limit: u32,
        #[arg(
            long,
            help = "Exact quoted price, for non-interactive runs; prompted for otherwise"
        )]
        confirm_price: Option<String>,
        #[arg(
            long,
            help = "Literal confirmation token, for non-interactive runs; prompted for otherwise"
        )]
        confirm_token: Option<String>,
    },
    #[command(about = "Read-only carrier inventory and pricing lookups")]
    Numbers {
        #[command(subcommand)]
        command: NumbersCommand,
    },
    #[command(about = "Fetch the read-only analysis view for a deployed assistant")]
    Analyze {
        #[arg(help = "Assistant id returned by a previous deployment")]
        assistant_id: String,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and check both provider APIs for reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum NumbersCommand {
    #[command(about = "Search purchasable numbers in the carrier's inventory")]
    Search {
        #[arg(long, default_value = "US")]
        country: String,
        #[arg(long = "type", default_value = "local")]
        number_type: String,
        #[arg(long)]
        area_code: Option<String>,
        #[arg(long)]
        contains: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    #[command(about = "List the carrier's number pricing for a country")]
    Pricing {
        #[arg(long, default_value = "US")]
        country: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Deploy {
            business,
            country,
            number_type,
            area_code,
            contains,
            limit,
            confirm_price,
            confirm_token,
        } => commands::deploy::run(commands::deploy::DeployArgs {
            business,
            country,
            number_type,
            area_code,
            contains,
            limit,
            confirm_price,
            confirm_token,
        }),
        Command::Numbers { command } => match command {
            NumbersCommand::Search { country, number_type, area_code, contains, limit } => {
                commands::numbers::search(country, number_type, area_code, contains, limit)
            }
            NumbersCommand::Pricing { country } => commands::numbers::pricing(country),
        },
        Command::Analyze { assistant_id } => commands::analyze::run(&assistant_id),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
