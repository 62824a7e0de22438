mod db;
mod error;
mod finance;
mod models;
mod operations;
mod store;

use chrono::Local;
use std::io;

use crate::finance::{aggregate, format};
use crate::models::transaction::Transaction;
use crate::operations::{add, browse, chart, search, summary};
use crate::store::TransactionStore;

const DB_PATH: &str = "finance_tracker.db";

const ENTRY_PROMPT: &str =
    "Please enter transaction details in the format:\ndate(YYYY-MM-DD), description, amount, type(income/expense)";

pub enum UserCommand {
    Add,
    Update,
    Remove,
    List,
    Search,
    Summary,
    Chart,
    Browse,
    Exit,
}

fn main() {
    env_logger::init();

    println!("Welcome to the finance tracker!");
    let conn =
        db::connection::establish_connection(DB_PATH).expect("Failed to open the database");
    let mut store = TransactionStore::open(conn).expect("Failed to load transactions");

    loop {
        println!(
            "Please enter a command (add, update, remove, list, search, summary, chart, browse, exit):"
        );

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        if input.is_empty() {
            continue;
        }

        let command = match check_for_command(&input) {
            Some(command) => command,
            None => {
                println!("Unknown command: {}", input);
                continue;
            }
        };

        match command {
            UserCommand::Add => {
                println!("Add command selected. {}", ENTRY_PROMPT);
                let details = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match add::parse_entry(&details).and_then(|input| store.add(input)) {
                    Ok(transaction) => {
                        println!("Transaction added successfully (id {}).", transaction.id);
                    }
                    Err(e) => {
                        println!("Error adding transaction: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommand::Update => {
                println!("Update command selected. Provide the transaction ID to update:");
                let id = match read_user_input() {
                    Ok(id) => id,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                println!("{}", ENTRY_PROMPT);
                let details = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match add::parse_entry(&details).and_then(|input| store.update(&id, input)) {
                    Ok(_) => println!("Transaction updated successfully."),
                    Err(e) => println!("Error updating transaction: {}", e),
                }
            }
            UserCommand::Remove => {
                println!("Remove command selected. Provide the transaction ID to remove:");
                let id = match read_user_input() {
                    Ok(id) => id,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match store.delete(&id) {
                    Ok(()) => println!("Transaction removed."),
                    Err(e) => println!("Error removing transaction: {}", e),
                }
            }
            UserCommand::List => {
                println!("Current Transactions:");
                print_transactions(store.transactions());
            }
            UserCommand::Search => {
                println!(
                    "Search command selected. Provide text to search descriptions for,\noptionally followed by a type: text[, income|expense]"
                );
                let input = match read_user_input() {
                    Ok(input) => input,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                let (term, kind) = search::parse_search_query(&input);
                let matches: Vec<Transaction> =
                    search::filter_transactions(store.transactions(), &term, kind)
                        .into_iter()
                        .cloned()
                        .collect();
                if matches.is_empty() {
                    println!("No transactions found for: {}", term);
                } else {
                    println!("Transactions matching '{}':", term);
                    print_transactions(&matches);
                }
            }
            UserCommand::Summary => {
                println!("{}", summary::render_summary(store.transactions()));
            }
            UserCommand::Chart => {
                let buckets = aggregate::monthly_buckets(
                    store.transactions(),
                    Local::now().date_naive(),
                );
                if let Err(e) = chart::run_chart(&buckets) {
                    println!("Error showing chart: {}", e);
                }
            }
            UserCommand::Browse => {
                if let Err(e) = browse::run_browse(&mut store) {
                    println!("Error browsing transactions: {}", e);
                }
            }
            UserCommand::Exit => {
                println!("Exiting the application.");
                break;
            }
        }
    }
}

fn print_transactions(transactions: &[Transaction]) {
    let sorted = aggregate::sort_by_date_desc(transactions);
    if sorted.is_empty() {
        println!("No transactions recorded yet.");
        return;
    }
    for entry in format::format_transactions(&sorted) {
        let tx = &entry.transaction;
        println!(
            "{:12}  {:>12}  {:7}  {}  (id {})",
            entry.formatted_date,
            entry.formatted_amount,
            tx.kind.as_str(),
            tx.description,
            tx.id
        );
    }
}

fn read_user_input() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> Option<UserCommand> {
    match input {
        "add" => Some(UserCommand::Add),
        "update" => Some(UserCommand::Update),
        "remove" => Some(UserCommand::Remove),
        "list" => Some(UserCommand::List),
        "search" => Some(UserCommand::Search),
        "summary" => Some(UserCommand::Summary),
        "chart" => Some(UserCommand::Chart),
        "browse" => Some(UserCommand::Browse),
        "exit" => Some(UserCommand::Exit),
        _ => None,
    }
}
