use std::{
    fs::OpenOptions,
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use time::{format_description::BorrowedFormatItem, macros::format_description};
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use cashbook_rs::{
    Clock, Error, Filter, Kind, SqliteStore, StoreConfig, SystemClock, Transaction, TransactionId,
    TransactionStore, db::initialize, parse_amount, snapshot::DEFAULT_STORAGE_KEY,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Track income and expenses from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database the ledger is saved in.
    #[arg(long, default_value = "cashbook.db")]
    db_path: PathBuf,

    /// The key the ledger is saved under in the database.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// What the money was earned or spent on.
        description: String,
        /// The amount, e.g. 12.50.
        amount: String,
        /// Either "income" or "expense".
        #[arg(short, long, default_value = "expense")]
        kind: String,
    },
    /// Change a transaction. Fields that are left out keep their current value.
    Edit {
        /// The ID of the transaction to change.
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Delete a transaction.
    Remove {
        /// The ID of the transaction to delete.
        id: String,
    },
    /// List transactions, most recent first.
    List {
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Show total income, total expenses and the net balance.
    Summary,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    All,
    Income,
    Expense,
}

impl From<FilterArg> for Filter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Filter::All,
            FilterArg::Income => Filter::IncomeOnly,
            FilterArg::Expense => Filter::ExpenseOnly,
        }
    }
}

type Store<C = SystemClock> = TransactionStore<SqliteStore, C>;

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.log_file.as_ref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if error.is_storage_error() {
                tracing::error!("{error}");
            }
            print_error(error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut store = open_store(&args)?;

    match args.command {
        Command::Add {
            description,
            amount,
            kind,
        } => {
            let amount = parse_amount(&amount)?;
            let kind: Kind = kind.parse()?;
            let transaction = store.add(&description, amount, kind)?;
            println!("Added transaction {}", transaction.id);
        }
        Command::Edit {
            id,
            description,
            amount,
            kind,
        } => {
            let id = TransactionId::new(&id);
            let transaction = edit(&mut store, &id, description, amount, kind)?;
            println!("Updated transaction {}", transaction.id);
        }
        Command::Remove { id } => {
            let id = TransactionId::new(&id);
            store.remove(&id)?;
            println!("Removed transaction {id}");
        }
        Command::List { filter } => print_transactions(&store.list(filter.into())),
        Command::Summary => {
            let summary = store.summary();
            println!("Income:  {:>12}", summary.total_income);
            println!("Expense: {:>12}", summary.total_expense);
            println!("Balance: {:>12}", summary.net_balance);
        }
    }

    Ok(())
}

fn open_store(args: &Args) -> Result<Store, Error> {
    tracing::debug!("Opening ledger from {:?}", args.db_path);

    let connection = Connection::open(&args.db_path)?;
    initialize(&connection)?;

    let storage = SqliteStore::new(Arc::new(Mutex::new(connection)));
    let config = StoreConfig {
        storage_key: args.storage_key.clone(),
    };

    Ok(TransactionStore::with_config(storage, SystemClock, config))
}

/// Fill in any missing fields from the existing transaction, then update it.
fn edit<C: Clock>(
    store: &mut Store<C>,
    id: &TransactionId,
    description: Option<String>,
    amount: Option<String>,
    kind: Option<String>,
) -> Result<Transaction, Error> {
    let Some(current) = store.get(id).cloned() else {
        return Err(Error::UpdateMissingTransaction(id.clone()));
    };

    let description = description.unwrap_or_else(|| current.description.to_string());
    let amount = match amount {
        Some(amount) => parse_amount(&amount)?,
        None => current
            .amount
            .to_f64()
            .ok_or_else(|| Error::InvalidAmount(current.amount.to_string()))?,
    };
    let kind = match kind {
        Some(kind) => kind.parse::<Kind>()?,
        None => current.kind,
    };

    store.update(id, &description, amount, kind)
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    for transaction in transactions {
        let date = transaction
            .created_at
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| transaction.created_at.to_string());

        println!(
            "{:<14} {date} {:<7} {:>12} {}",
            transaction.id, transaction.kind, transaction.amount, transaction.description
        );
    }
}

fn setup_logging(log_file: Option<&PathBuf>) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let debug_log = log_file.map(|path| {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Could not create log file");

        tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(false)
            .with_writer(Arc::new(log_file))
            .with_filter(filter::LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
