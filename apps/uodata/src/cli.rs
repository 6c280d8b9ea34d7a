//! Command-line arguments and subcommands.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uodata_files::{FileGateway, FileName};
use uodata_locator::{Installation, Outcome, Selection};

#[derive(Debug, Parser)]
#[command(
    name = "uodata",
    version,
    about = "Locate an installed Ultima Online client and inspect its data files"
)]
pub struct Args {
    /// Use this data directory instead of searching for an installation.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read configuration from this file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every probed candidate and the selected data directory.
    Locate {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the full path of a data file.
    Path { name: String },
    /// Check whether a data file exists.
    Exists(NameArgs),
    /// Open a data file and report its size.
    Open(NameArgs),
}

#[derive(Debug, clap::Args)]
pub struct NameArgs {
    /// File name, base name, or `{0}` template when only --index is given.
    pub name: String,

    /// Numeric index appended to (or substituted into) the name.
    #[arg(long, allow_hyphen_values = true)]
    pub index: Option<i32>,

    /// Type suffix, e.g. `mul` or `idx`.
    #[arg(long = "type", value_name = "TYPE")]
    pub ext: Option<String>,
}

impl NameArgs {
    pub fn file_name(&self) -> FileName<'_> {
        match (self.index, self.ext.as_deref()) {
            (None, None) => FileName::Plain(&self.name),
            (Some(index), None) => FileName::Indexed {
                template: &self.name,
                index,
            },
            (Some(index), Some(ext)) => FileName::IndexedTyped {
                name: &self.name,
                index,
                ext,
            },
            (None, Some(ext)) => FileName::Typed {
                name: &self.name,
                ext,
            },
        }
    }
}

/// Runs a subcommand, writing results to `out`. Returns whether it succeeded.
pub fn run(
    command: &Command,
    installation: &Installation,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let files = FileGateway::new(installation);

    match command {
        Command::Locate { json } => {
            if *json {
                serde_json::to_writer_pretty(&mut *out, installation)?;
                writeln!(out)?;
            } else {
                write_report(installation, out)?;
            }
            Ok(installation.is_data_present())
        }
        Command::Path { name } => match files.file_path(name) {
            Some(path) => {
                writeln!(out, "{}", path.display())?;
                Ok(true)
            }
            None => Ok(false),
        },
        Command::Exists(args) => {
            let exists = files.contains(args.file_name());
            writeln!(out, "{exists}")?;
            Ok(exists)
        }
        Command::Open(args) => {
            let name = args.file_name();
            match files.try_open(name) {
                Ok(mut file) => {
                    let size = io::copy(&mut file, &mut io::sink())?;
                    writeln!(out, "{}: {size} bytes", name.render()?)?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "unavailable: {e}")?;
                    Ok(false)
                }
            }
        }
    }
}

fn write_report(installation: &Installation, out: &mut impl Write) -> io::Result<()> {
    for report in installation.candidates() {
        let status = match &report.outcome {
            Outcome::NotInstalled => "not installed".to_string(),
            Outcome::MissingDirectory => "missing directory".to_string(),
            Outcome::Incompatible => "incompatible".to_string(),
            Outcome::Accepted => "compatible".to_string(),
            Outcome::Failed { reason } => format!("failed: {reason}"),
        };
        match &report.dir {
            Some(dir) => writeln!(
                out,
                "{:>3} [{}] {} -> {} ({status})",
                report.order,
                report.source,
                report.candidate,
                dir.display()
            )?,
            None => writeln!(
                out,
                "{:>3} [{}] {} ({status})",
                report.order, report.source, report.candidate
            )?,
        }
    }

    match (installation.root(), installation.selection()) {
        (Some(root), Selection::Override) => {
            writeln!(out, "data directory: {} (configured)", root.display())
        }
        (Some(root), Selection::Candidate { order }) => {
            writeln!(out, "data directory: {} (candidate {order})", root.display())
        }
        _ => writeln!(out, "no compatible installation found"),
    }
}
