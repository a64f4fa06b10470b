//! Maintenance binary: provision an admin account.
//!
//! There is no public signup; run this once against the configured
//! database to create the account used to sign in to the UI.
//!
//! ```text
//! PAIE_DATABASE_URL=... cargo run --bin create_admin -- --email admin@example.com --password '...'
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use paie::migration::{Migrator, MigratorTrait};
use paie::models::user_role::ADMIN_ROLE;
use paie::password::hash_password;
use paie::repositories::UserRepository;
use paie::{config::ConfigLoader, db};

#[derive(Parser, Debug)]
#[command(name = "create_admin", about = "Create an admin account for the Paie API")]
struct Args {
    /// Sign-in email for the new admin
    #[arg(long)]
    email: String,

    /// Password for the new admin
    #[arg(long)]
    password: String,

    /// Override the configured database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::new();
    let mut config = loader.load().context("loading configuration")?;
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;
    Migrator::up(&db, None)
        .await
        .context("applying migrations")?;

    let password_hash = hash_password(&args.password).context("hashing password")?;

    let repo = UserRepository::new(&db);
    let created = repo
        .create_with_role(&args.email, &password_hash, ADMIN_ROLE)
        .await
        .context("creating admin account")?;

    println!("Created admin {} ({})", created.email, created.id);

    Ok(())
}
