use std::{io, process::exit};

use clap::Parser;

use refbook::{
    Config, RecordStore,
    logging::setup_logging,
    shell::Shell,
    timezone::{SystemClock, resolve_offset},
};

fn main() {
    let config = Config::parse();

    if let Err(error) = setup_logging(&config.log_path) {
        print_error(format!(
            "could not open log file {:?}: {error}",
            config.log_path
        ));
        exit(1);
    }

    let db_path = match config.db_path() {
        Ok(db_path) => db_path,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    let offset = match resolve_offset(config.timezone.as_deref()) {
        Ok(offset) => offset,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    let store = match RecordStore::open(&db_path) {
        Ok(store) => store,
        Err(error) => {
            print_error(format!("could not open database {db_path:?}: {error}"));
            exit(1);
        }
    };

    println!("Using database {}", store.db_path().display());

    let stdin = io::stdin();
    let mut shell = Shell::new(
        store,
        Box::new(SystemClock::new(offset)),
        config.recent,
        stdin.lock(),
        io::stdout(),
    );

    if let Err(error) = shell.run() {
        tracing::error!("shell stopped unexpectedly: {error}");
        print_error(format!("unexpected error: {error}"));
        exit(1);
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

/// From https://crates.io/crates/capitalize
fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
