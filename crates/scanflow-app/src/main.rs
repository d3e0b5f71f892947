// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanflow — split PDF files into smaller documents
//
// Entry point. Parses the command line, initialises logging and services, and
// drives one split on the background worker.

mod logging;
mod services;
mod worker;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use scanflow_core::helpers::format_file_size;
use scanflow_core::human_errors::{self, Notification, NotificationLevel};
use scanflow_core::partition;
use scanflow_core::types::{PdfDocumentInfo, PdfMetadata, SplitMode, SplitRequest};
use scanflow_document::PdfRepository;

use services::app_services::AppServices;
use worker::WorkerEvent;

#[derive(Parser)]
#[command(name = "scanflow")]
#[command(version)]
#[command(about = "Split PDF files by page count or by page ranges", long_about = None)]
struct Cli {
    /// Directory for config and log files
    #[arg(long, value_name = "DIR", env = "SCANFLOW_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count, size and metadata of a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Split into files of a fixed number of pages
    Fixed {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages per output file
        #[arg(short = 'n', long = "pages", value_name = "PAGES")]
        pages_per_file: Option<String>,

        /// Output directory (defaults to the last one used)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Base name for output files instead of the input file name
        #[arg(long, value_name = "NAME")]
        base: Option<String>,
    },

    /// Split into one file per page range
    Ranges {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page ranges (e.g., "1-3,5,8-10")
        #[arg(short, long, value_name = "RANGES")]
        ranges: String,

        /// Output directory (defaults to the last one used)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Base name for output files instead of the input file name
        #[arg(long, value_name = "NAME")]
        base: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut svc = match AppServices::init(cli.data_dir.as_deref()) {
        Ok(svc) => svc,
        Err(e) => {
            eprintln!("Error: cannot prepare data directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&svc.log_path());
    tracing::info!(data_dir = %svc.data_dir().display(), "Scanflow starting");

    let request = match cli.command {
        Commands::Info { input } => return show_info(&input),
        Commands::Fixed {
            input,
            pages_per_file,
            output,
            base,
        } => {
            let text = pages_per_file
                .map(|t| t.trim().to_owned())
                .unwrap_or_else(|| svc.config().default_pages_per_file.to_string());
            let max = svc.config().max_parts_input;
            let pages_per_file = match text.parse::<u32>() {
                Ok(n) if partition::validate_parts_count(&text, max) => n,
                _ => {
                    return finish(&Notification::warning(format!(
                        "Pages per file must be a whole number between 1 and {max}."
                    )));
                }
            };
            build_request(&svc, input, output, base, SplitMode::Fixed { pages_per_file })
        }
        Commands::Ranges {
            input,
            ranges,
            output,
            base,
        } => {
            let parsed = svc
                .splitter()
                .pdf_info(&input)
                .and_then(|info| partition::parse_page_ranges(&ranges, info.page_count));
            match parsed {
                Ok(ranges) => build_request(&svc, input, output, base, SplitMode::Custom { ranges }),
                Err(e) => Err(human_errors::notify(&e)),
            }
        }
    };

    match request {
        Ok(request) => run_split(&mut svc, request).await,
        Err(notification) => finish(&notification),
    }
}

fn build_request(
    svc: &AppServices,
    source: PathBuf,
    output: Option<PathBuf>,
    base: Option<String>,
    mode: SplitMode,
) -> Result<SplitRequest, Notification> {
    let output_dir = output
        .or_else(|| svc.config().last_output_dir.clone())
        .ok_or_else(|| Notification::warning("Choose an output folder with --output."))?;

    Ok(SplitRequest {
        source,
        output_dir,
        mode,
        base_filename: base.filter(|b| !b.trim().is_empty()),
    })
}

async fn run_split(svc: &mut AppServices, request: SplitRequest) -> ExitCode {
    let output_dir = request.output_dir.clone();
    let mut handle = svc.start_split(request);
    tracing::info!(job_id = %handle.job_id(), "Split queued");

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Splitting...");

    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(WorkerEvent::Progress(percent)) => pb.set_position(u64::from(percent)),
                Some(WorkerEvent::Finished(files)) => {
                    pb.finish_and_clear();
                    svc.remember_output_dir(&output_dir);
                    return finish(&Notification::split_finished(&files));
                }
                Some(WorkerEvent::Failed(notification)) => {
                    pb.abandon();
                    return finish(&notification);
                }
                None => {
                    pb.abandon();
                    return finish(&Notification::info("Split cancelled."));
                }
            },
            _ = tokio::signal::ctrl_c(), if !handle.is_cancelled() => {
                tracing::info!(job_id = %handle.job_id(), "Cancellation requested");
                pb.set_message("Cancelling...");
                handle.cancel();
            }
        }
    }
}

fn show_info(input: &Path) -> ExitCode {
    match PdfRepository::load(input) {
        Ok(repo) => {
            for line in info_lines(&repo.info(), &repo.metadata()) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => finish(&human_errors::notify(&e)),
    }
}

/// Lines printed by `scanflow info`. Metadata fields that are absent are
/// left out.
fn info_lines(info: &PdfDocumentInfo, meta: &PdfMetadata) -> Vec<String> {
    let mut lines = vec![
        format!("File:   {}", info.file_name),
        format!("Pages:  {}", info.page_count),
        format!("Size:   {}", format_file_size(info.file_size)),
        format!("PDF:    {}", meta.version),
    ];

    let fields = [
        ("Title", &meta.title),
        ("Author", &meta.author),
        ("Subject", &meta.subject),
        ("Keywords", &meta.keywords),
        ("Creator", &meta.creator),
        ("Producer", &meta.producer),
        ("Created", &meta.creation_date),
        ("Modified", &meta.mod_date),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{:<8}{value}", format!("{label}:")));
        }
    }
    lines
}

/// Print a notification and pick the exit code from its level.
fn finish(notification: &Notification) -> ExitCode {
    match notification.level {
        NotificationLevel::Info | NotificationLevel::Success => {
            println!("{notification}");
            ExitCode::SUCCESS
        }
        NotificationLevel::Warning => {
            eprintln!("{notification}");
            ExitCode::from(2)
        }
        NotificationLevel::Error => {
            eprintln!("{notification}");
            ExitCode::FAILURE
        }
    }
}
