use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use gofinances::{
    PasswordHash, Transaction, TransactionType, ValidatedPassword, append_transaction,
    create_user, initialize_db,
};

/// A utility for creating a test database for the GoFinances server.
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

    println!("Creating test user test@example.com with the password 'test'...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(
        "Usuário de teste",
        EmailAddress::from_str("test@example.com")?,
        password_hash,
        &conn,
    )?;

    println!("Adding transactions...");

    let now = OffsetDateTime::now_utc();
    let transactions = [
        ("Desenvolvimento de site", 12000.0, TransactionType::Income, "salary", 40),
        ("Aluguel do apartamento", 1200.0, TransactionType::Expense, "purchases", 35),
        ("Hamburgueria Pizzy", 59.0, TransactionType::Expense, "food", 32),
        ("Salário", 5000.0, TransactionType::Income, "salary", 10),
        ("Gasolina", 250.0, TransactionType::Expense, "car", 8),
        ("Cinema", 64.5, TransactionType::Expense, "leisure", 5),
        ("Curso de Rust", 349.9, TransactionType::Expense, "studies", 2),
        ("Mercado", 412.37, TransactionType::Expense, "food", 1),
    ];

    for (name, amount, transaction_type, category, days_ago) in transactions {
        let transaction = Transaction::new(name, amount, transaction_type, category)
            .date(now - Duration::days(days_ago));
        append_transaction(user.id, transaction, &conn)?;
    }

    println!("Success!");

    Ok(())
}
