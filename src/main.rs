mod app;
mod board;
mod engine;
mod input;
mod ui;

use std::env;
use std::path::Path;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use board::store::{Store, StoreError};
use board::Application;
use engine::{classify, ColumnKey};

#[derive(Parser)]
#[command(name = "jobkan", about = "A keyboard-first job application pipeline TUI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a .jobkan/ store in the current directory
    Init,
    /// Add a new application
    Add {
        /// Company name
        company: String,
        /// Role title
        role: String,
        /// Pipeline column (open, applied, shortlisted, interview, offer, rejected, closed)
        #[arg(short, long, default_value = "open")]
        status: ColumnKey,
        /// Where the application was made (e.g. LinkedIn, referral)
        #[arg(long)]
        source: Option<String>,
        /// Application date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List applications by pipeline column
    List {
        /// Only show one column
        #[arg(short, long)]
        status: Option<ColumnKey>,
        /// Substring filter over company and role
        #[arg(long)]
        search: Option<String>,
    },
    /// Move an application to a different column
    Move {
        /// Application id
        id: String,
        /// Target column
        column: ColumnKey,
    },
}

fn main() {
    // Install color_eyre for unexpected panics/errors (developer bugs).
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let cwd = match env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: cannot determine current directory: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Command::Init) => cmd_init(&cwd),
        Some(Command::Add { company, role, status, source, date }) => {
            cmd_add(&cwd, &company, &role, status, source, date)
        }
        Some(Command::List { status, search }) => cmd_list(&cwd, status, search.as_deref()),
        Some(Command::Move { id, column }) => cmd_move(&cwd, &id, column),
        None => cmd_tui(&cwd),
    };

    if let Err(e) = result {
        print_user_error(&e);
        std::process::exit(1);
    }
}

/// Print a user-friendly error message, with actionable hints for known error types.
fn print_user_error(error: &color_eyre::Report) {
    if let Some(store_err) = error.downcast_ref::<StoreError>() {
        match store_err {
            StoreError::NotFound(_) => {
                eprintln!("error: no jobkan store found in this directory.");
                eprintln!("  Run `jobkan init` to create one.");
            }
            StoreError::UnknownApplication(id) => {
                eprintln!("error: no application with id {id:?}.");
                eprintln!("  Run `jobkan list` to see ids.");
            }
            StoreError::Json(e) => {
                eprintln!("error: applications file is not valid JSON.");
                eprintln!("  {e}");
            }
            StoreError::Io(e) => {
                eprintln!("error: could not read or write the applications file.");
                eprintln!("  {e}");
            }
        }
        return;
    }

    eprintln!("error: {e:#}", e = error);
}

fn cmd_init(cwd: &Path) -> color_eyre::Result<()> {
    let store = Store::init(cwd)?;
    println!("Initialized jobkan store at {}", store.path().display());
    Ok(())
}

fn cmd_add(
    cwd: &Path,
    company: &str,
    role: &str,
    status: ColumnKey,
    source: Option<String>,
    date: Option<NaiveDate>,
) -> color_eyre::Result<()> {
    let store = Store::open(cwd)?;
    let mut app = Application::new("", company, role);
    app.status = Some(status.as_str().to_string());
    app.applied_source = source;
    app.applied_date = date;
    let app = store.add(app)?;
    println!("Added {} — {} ({}) as #{}", app.company_name, app.role_title, status, app.id);
    Ok(())
}

fn cmd_list(cwd: &Path, status: Option<ColumnKey>, search: Option<&str>) -> color_eyre::Result<()> {
    let store = Store::open(cwd)?;
    let apps = store.load()?;
    let views = classify(&apps, search);

    for view in &views {
        if status.is_some_and(|s| s != view.key) {
            continue;
        }
        if view.apps.is_empty() && status.is_none() {
            continue;
        }
        println!("{} ({})", view.key, view.apps.len());
        for app in &view.apps {
            let meta = ui::board_view::meta_line(app);
            if meta.is_empty() {
                println!("  {:>3}  {} — {}", app.id, app.company_name, app.role_title);
            } else {
                println!("  {:>3}  {} — {} ({meta})", app.id, app.company_name, app.role_title);
            }
        }
    }
    Ok(())
}

fn cmd_move(cwd: &Path, id: &str, column: ColumnKey) -> color_eyre::Result<()> {
    let store = Store::open(cwd)?;
    store.update_status(id, column.as_str())?;
    println!("Moved #{id} to {column}");
    Ok(())
}

fn cmd_tui(cwd: &Path) -> color_eyre::Result<()> {
    let store = Store::open(cwd)?;
    let mut terminal = ratatui::init();
    let result = app::run(&mut terminal, &store);
    ratatui::restore();
    result
}
