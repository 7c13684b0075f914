//! Door opener log viewer.
//!
//! ```text
//! door-logs all
//! door-logs ip 192.168.1.20
//! door-logs date 2026-10-17
//! ```

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use door_opener::logs::{self, LogFilter};

#[derive(Parser)]
#[command(name = "door-logs")]
#[command(version)]
#[command(about = "Print the door opener server log, optionally filtered", long_about = None)]
struct Args {
    /// Log file written by the server (--log-file)
    #[arg(short, long, default_value = logs::DEFAULT_LOG_FILE, env = "DOOR_LOG_FILE")]
    file: PathBuf,

    #[command(subcommand)]
    filter: Option<Filter>,
}

#[derive(Subcommand)]
enum Filter {
    /// Every line (default)
    All,
    /// Lines mentioning a client address
    Ip {
        /// Address or address fragment
        address: String,
    },
    /// Lines from one day
    Date {
        /// Day in YYYY-MM-DD form
        day: NaiveDate,
    },
}

impl From<Filter> for LogFilter {
    fn from(f: Filter) -> Self {
        match f {
            Filter::All => Self::All,
            Filter::Ip { address } => Self::Ip(address),
            Filter::Date { day } => Self::Date(day),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = args.filter.map_or(LogFilter::All, LogFilter::from);

    let lines = logs::read_filtered(&args.file, &filter)
        .with_context(|| format!("reading {}", args.file.display()))?;

    println!("--- Door Opener Logs ---\n");
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
