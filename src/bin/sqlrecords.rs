use sqlrecords::config::{self, Config};
use sqlrecords::core::db::Outcome;
use sqlrecords::export;
use sqlrecords::{Database, ExportFormat, RecordsError, Result};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: sqlrecords [database-url] <sql | --tables> [json|csv|maps|slices]

CSV output carries a header row unless `[export] header = false` is set in the
configuration; with a header, a query that returns no rows is an error.";

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only exported data
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match config::load_default_config().and_then(|config| run(&args, &config)) {
        Ok(output) => {
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String], config: &Config) -> Result<String> {
    // The URL may be omitted when the configuration provides one
    let (url, rest) = match args {
        [url, sql, ..] if !is_format(sql) => (url.as_str(), &args[1..]),
        [_, ..] => match config.database.url.as_deref() {
            Some(url) => (url, args),
            None => return Err(RecordsError::Config(USAGE.to_string())),
        },
        [] => return Err(RecordsError::Config(USAGE.to_string())),
    };
    if rest.len() > 2 {
        return Err(RecordsError::Config(USAGE.to_string()));
    }
    let sql = &rest[0];
    let format = match rest.get(1) {
        Some(name) => name.parse::<ExportFormat>()?,
        None => config.export.format,
    };

    info!("Starting sqlrecords against '{}'", sqlrecords::database_name(url));
    let db = Database::open(url)?;

    let output = if sql == "--tables" {
        db.table_names()?.join("\n")
    } else {
        match db.run(sql)? {
            Outcome::Rows(records) => {
                export::render(&records, format, config.export.header, &config.export.csv_options())?
            }
            Outcome::Changed(changed) => format!("{} rows affected", changed),
        }
    };

    db.close()?;
    Ok(output)
}

fn is_format(arg: &str) -> bool {
    arg.parse::<ExportFormat>().is_ok()
}
