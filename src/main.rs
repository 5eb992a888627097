//! Repair Quote CLI

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use repair_quote::{
    catalog::{ItemId, SchoolId},
    config::ClientConfig,
    logging,
    money::round_for_display,
    render::write_cart,
    services::HttpQuotationApi,
    session::{QuotationServices, QuotationSession, RepairDetails},
};

#[derive(Debug, Parser)]
#[command(name = "repair-quote", about = "Repair quotation builder", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List schools
    Schools,

    /// List the repair items priced for a school
    Items(ItemsArgs),

    /// Build and submit a quotation
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
struct ItemsArgs {
    /// School id
    #[arg(long)]
    school: u64,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// School id
    #[arg(long)]
    school: u64,

    /// Item and quantity as `ID=QUANTITY`; repeat for more items
    #[arg(long = "item", value_parser = parse_item, required = true)]
    items: Vec<(u64, String)>,

    /// Person carrying out the repair
    #[arg(long)]
    person: String,

    /// Repair location
    #[arg(long)]
    location: String,

    /// Repair time, e.g. `2024-01-01T09:30`
    #[arg(long)]
    time: String,

    /// Directory to save the generated image and Excel file to
    #[arg(long)]
    download: Option<PathBuf>,
}

fn parse_item(value: &str) -> Result<(u64, String), String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QUANTITY, got `{value}`"))?;

    let id = id
        .trim()
        .parse()
        .map_err(|error| format!("invalid item id `{id}`: {error}"))?;

    Ok((id, quantity.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.config) {
        eprintln!("failed to initialise logging: {error}");

        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let api = HttpQuotationApi::new(cli.config.api_url);
    let mut session = QuotationSession::new(QuotationServices::from_api(api));

    match cli.command {
        Commands::Schools => list_schools(&session).await,
        Commands::Items(args) => list_items(&mut session, args.school).await,
        Commands::Quote(args) => quote(&mut session, args).await,
    }
}

async fn list_schools(session: &QuotationSession) -> Result<(), String> {
    let schools = session
        .schools()
        .await
        .map_err(|error| format!("failed to list schools: {error}"))?;

    for school in schools {
        println!("{}\t{}", school.id, school.name);
    }

    Ok(())
}

async fn list_items(session: &mut QuotationSession, school: u64) -> Result<(), String> {
    let catalog = session
        .select_school(SchoolId(school))
        .await
        .map_err(|error| format!("failed to load items: {error}"))?;

    if catalog.is_empty() {
        println!("no repair items for school {school}");
    }

    for item in catalog.items() {
        println!(
            "{}\t{} ({} / {})",
            item.id(),
            item.name(),
            item.price().round_dp(2),
            item.unit()
        );
    }

    Ok(())
}

async fn quote(session: &mut QuotationSession, args: QuoteArgs) -> Result<(), String> {
    session
        .select_school(SchoolId(args.school))
        .await
        .map_err(|error| format!("failed to load items: {error}"))?;

    for (id, quantity) in &args.items {
        session
            .add_item(Some(ItemId(*id)), quantity)
            .map_err(|error| format!("item {id}: {error}"))?;
    }

    write_cart(io::stdout().lock(), session.cart())
        .map_err(|error| format!("failed to print quotation: {error}"))?;

    let cart = session.cart();
    let total = round_for_display(cart.compute_total(), cart.currency());

    let details = RepairDetails {
        repair_person: args.person,
        repair_location: args.location,
        repair_time: args.time,
    };

    let quotation = session
        .submit(&details)
        .await
        .map_err(|error| format!("failed to submit quotation: {error}"))?;

    println!(
        "quotation {} submitted (total {total})",
        quotation.quotation_number
    );

    if let Some(dir) = args.download {
        let paths = session
            .download_artifacts(&quotation, &dir)
            .await
            .map_err(|error| format!("failed to download quotation files: {error}"))?;

        for path in paths {
            println!("saved {}", path.display());
        }
    }

    Ok(())
}
