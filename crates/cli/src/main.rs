//! findex: seed a users table and race a fixed lookup against its partial index.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use findex_core::{ColumnType, NewUser, format_row};
use findex_storage::Database;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

mod profile;

const USERS_TABLE: &str = "users";
const USERS_F_INDEX: &str = "idx_users_f_m";

/// Columns of the users table, in insert order.
const USER_COLUMNS: &[(&str, ColumnType)] = &[
    ("id", ColumnType::Integer),
    ("name", ColumnType::Text),
    ("date", ColumnType::Date),
    ("gender", ColumnType::Text),
];

#[derive(Parser)]
#[command(name = "findex")]
#[command(about = "Seed a users table and race a fixed lookup against its partial index", long_about = None)]
struct Cli {
    /// Directory holding the database file (must exist)
    #[arg(long, default_value = ".")]
    db_dir: PathBuf,

    /// Database file name (.db or .sqlite3)
    #[arg(long, default_value = "users.db")]
    db_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the users table
    #[command(alias = "1")]
    CreateTable,

    /// Insert one record
    #[command(alias = "2")]
    Insert {
        name: String,
        /// Birthdate as YYYY-MM-DD
        birthdate: String,
        /// Single-character gender code
        gender: String,
    },

    /// List all records ordered by name
    #[command(alias = "3")]
    List,

    /// Bulk-insert synthetic records
    #[command(alias = "4")]
    Seed {
        /// Generic profiles to generate
        #[arg(long, default_value_t = 1_000_000)]
        count: usize,

        /// Profiles whose name is forced to start with F
        #[arg(long, default_value_t = 100)]
        f_count: usize,

        /// Fix the generator for reproducible batches
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the F-name lookup and print elapsed time
    #[command(alias = "5")]
    Query,

    /// Create the partial index, then run the timed lookup
    #[command(alias = "6")]
    QueryIndexed,

    /// Placeholder for debugging and custom commands
    #[command(alias = "7")]
    Debug,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db_dir, &cli.db_file)?;

    match cli.command {
        Commands::CreateTable => {
            db.create_table(USERS_TABLE, USER_COLUMNS, &["name", "date", "gender"])?;
            println!("Table created");
        }
        Commands::Insert { name, birthdate, gender } => {
            db.insert(USERS_TABLE, &NewUser::new(name, birthdate, gender))?;
            println!("Insert completed");
        }
        Commands::List => {
            for row in db.read_all(USERS_TABLE, &["name", "date", "gender"], "name")? {
                println!("{}", format_row(&row));
            }
        }
        Commands::Seed { count, f_count, seed } => {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };

            tracing::info!(count, f_count, "generating synthetic profiles");
            let people: Vec<NewUser> = (0..count).map(|_| profile::profile(&mut rng)).collect();
            db.insert_many(USERS_TABLE, &people)?;

            let people_f: Vec<NewUser> =
                (0..f_count).map(|_| profile::profile_f(&mut rng)).collect();
            db.insert_many(USERS_TABLE, &people_f)?;

            println!("Generate completed");
        }
        Commands::Query => run_timed_query(&db)?,
        Commands::QueryIndexed => {
            db.create_index(USERS_TABLE, USERS_F_INDEX)?;
            println!("Index created");
            run_timed_query(&db)?;
        }
        Commands::Debug => {
            println!("Test case for debugging and custom commands");
        }
    }

    Ok(())
}

/// The fixed lookup both `query` cases share, with wall-time reporting.
fn run_timed_query(db: &Database) -> Result<()> {
    let start = Instant::now();
    let rows = db.find_f_names(USERS_TABLE)?;
    let elapsed = start.elapsed();

    for row in &rows {
        println!("{}", format_row(row));
    }
    println!("--- {} seconds ---", elapsed.as_secs_f64());
    Ok(())
}
