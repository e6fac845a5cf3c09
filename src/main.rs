use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::{Parser, ValueEnum};
use table_dashboard::config::DashboardConfig;
use table_dashboard::export::write_csv_download;
use table_dashboard::ingestion::{
    AirtableSource, CompositeObserver, FetchObserver, FetchOptions, FileObserver, JsonFileSource,
    StdErrObserver,
};
use table_dashboard::processing::filter;
use table_dashboard::report::{
    render_caption, render_details, render_header, render_overview, render_stats, render_table,
    render_unavailable_page, DashboardState,
};

#[derive(Parser, Debug)]
#[command(
    name = "table-dashboard",
    about = "Show, search, summarize and export every record of one Airtable table"
)]
struct Args {
    /// Case-insensitive search across all columns.
    #[arg(long, short)]
    search: Option<String>,

    /// Which part of the dashboard to print.
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Write `{table}_donnees.csv` (the searched rows) into this directory.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Read records from a JSON snapshot instead of Airtable.
    #[arg(long)]
    from_json: Option<PathBuf>,

    /// Append fetch events to this log file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    All,
    Table,
    Stats,
    Details,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut observers: Vec<Arc<dyn FetchObserver>> = vec![Arc::new(StdErrObserver)];
    if let Some(path) = &args.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let options = FetchOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    };

    let (state, table_name) = match &args.from_json {
        Some(path) => {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("table")
                .to_string();
            (DashboardState::refresh(&JsonFileSource::new(path), &options), name)
        }
        None => match DashboardConfig::from_env() {
            Ok(config) => match AirtableSource::new(&config) {
                Ok(source) => (
                    DashboardState::refresh(&source, &options),
                    config.table_name.clone(),
                ),
                Err(e) => (DashboardState::unavailable(&e), config.table_name.clone()),
            },
            Err(e) => (DashboardState::unavailable(&e), String::new()),
        },
    };

    let (table, refreshed_at) = match state {
        DashboardState::Loaded {
            table,
            refreshed_at,
        } => (table, refreshed_at),
        DashboardState::Unavailable { message } => {
            print!("{}", render_unavailable_page(&message, &Local::now()));
            return ExitCode::FAILURE;
        }
    };

    print!("{}", render_header());
    print!("{}", render_overview(&table));
    println!();

    let searched = filter(&table, args.search.as_deref());
    if matches!(args.view, View::All | View::Table) {
        println!("Données complètes");
        print!("{}", render_table(&searched));
        println!();
    }
    if matches!(args.view, View::All | View::Stats) {
        println!("Statistiques");
        print!("{}", render_stats(&table));
        println!();
    }
    if matches!(args.view, View::All | View::Details) {
        println!("Détails des colonnes");
        print!("{}", render_details(&table));
        println!();
    }

    if let Some(dir) = &args.export {
        match write_csv_download(dir, &table_name, &searched) {
            Ok(path) => println!("CSV: {}", path.display()),
            Err(e) => {
                eprintln!("export failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    print!("{}", render_caption(&refreshed_at));
    ExitCode::SUCCESS
}
