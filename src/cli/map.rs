//! Map command handler
//!
//! Renders a task list the way the task map viewer would show it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::task::Task;
use crate::viewer::render_snapshot;
use chrono::{DateTime, Utc};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Map command arguments
#[derive(Args)]
pub struct MapArgs {
    /// JSON file with an array of tasks
    pub tasks: PathBuf,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Task to open in the detail panel
    #[arg(long, short = 's')]
    pub select: Option<String>,

    /// Evaluation time for overdue status (RFC 3339), defaults to now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Run the map command
pub fn run(args: MapArgs) -> Result<()> {
    let formatter = get_formatter(&args.format).ok_or_else(|| {
        let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format '{}' (available: {})",
            args.format,
            names.join(", ")
        ))
    })?;

    let config = Config::load()?;
    let tasks = load_tasks(&args.tasks)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let snapshot = render_snapshot(&config, tasks, now, args.select.as_deref())?;
    let output = formatter.format(&snapshot)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Read a task array from a JSON file
fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
