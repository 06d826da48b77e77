use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_tracker::{
    NewTransaction, SQLiteTransactionStore, TransactionStore, TransactionType, initialize_db,
    insert_transaction,
};

/// A utility for creating a test database for the finance tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let now = OffsetDateTime::now_utc();
    let samples = [
        (0, 4200.0, "Salary", TransactionType::Income),
        (1, 1500.0, "Rent", TransactionType::Expense),
        (3, 85.4, "Groceries", TransactionType::Expense),
        (6, 32.0, "Transport", TransactionType::Expense),
        (12, 120.0, "Freelance", TransactionType::Income),
        (35, 4200.0, "Salary", TransactionType::Income),
        (36, 1500.0, "Rent", TransactionType::Expense),
        (40, 64.99, "Utilities", TransactionType::Expense),
        (47, 91.2, "Groceries", TransactionType::Expense),
    ];

    for (days_ago, amount, category, transaction_type) in samples {
        let transaction = NewTransaction {
            amount,
            category: category.to_owned(),
            transaction_type,
        };

        insert_transaction(&transaction, now - Duration::days(days_ago), &conn)?;
    }

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    println!("Created {} transactions.", store.count()?);
    println!("Success!");

    Ok(())
}
