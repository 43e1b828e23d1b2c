use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use refbook::{RecordFields, RecordStore, bank::BankDirectory, reference::normalize};

/// A utility for creating a test database for refbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of records to create.
    #[arg(long, short, default_value_t = 50)]
    count: u32,
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
    let store = RecordStore::open(output_path)?;

    println!("Creating {} test records...", args.count);

    let today = OffsetDateTime::now_utc().date();
    let banks = BankDirectory::entries();

    for i in 0..args.count {
        let bank = BankDirectory::resolve_code(banks[i as usize % banks.len()].code)?;
        let fields = RecordFields::new(
            normalize(&(i * 37 + 100).to_string())?,
            bank,
            today - Duration::days(i64::from(i % 60)),
        );

        store.create(&fields, today)?;
    }

    println!("Success!");

    Ok(())
}
