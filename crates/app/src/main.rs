//! Storefront Application CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use storefront_app::{
    cache::{DEFAULT_TTL, MemoryPageCache},
    database::{self, Db},
    domain::categories::{
        CategoriesService, PgCategoriesRepository, StoreCategoriesService, data::NewCategory,
        records::CategoryUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    Category(CategoryCommand),
}

#[derive(Debug, Args)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    Create(CreateCategoryArgs),
}

#[derive(Debug, Args)]
struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// Optional category UUID; generated when omitted
    #[arg(long)]
    category_uuid: Option<Uuid>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if cli.database_url.trim().is_empty() {
        return Err("DATABASE_URL must be set or passed with --database-url".to_string());
    }

    match cli.command {
        Commands::Migrate => migrate(&cli.database_url).await,
        Commands::Category(CategoryCommand {
            command: CategorySubcommand::Create(args),
        }) => create_category(&cli.database_url, args).await,
    }
}

async fn migrate(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn create_category(database_url: &str, args: CreateCategoryArgs) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = StoreCategoriesService::new(
        Arc::new(PgCategoriesRepository::new(Db::new(pool))),
        Arc::new(MemoryPageCache::new(DEFAULT_TTL)),
    );

    let category = service
        .create_category(NewCategory {
            uuid: args
                .category_uuid
                .map_or_else(CategoryUuid::new, CategoryUuid::from_uuid),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);

    Ok(())
}
