//! Command-line front end: thin glue over `bha`'s library surface.

use crate::error::Error;
use crate::export::{exporter_for, ExportFormat};
use crate::model::{AnalysisOptions, ExportOptions, SuggesterOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bha", about = "Build Hotspot Analyzer", version, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all but warning/error logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze trace files and export a report.
    Export {
        /// Trace files or directories (searched recursively for `*.json`).
        trace_files: Vec<PathBuf>,

        /// Output format; inferred from the output path's extension if omitted.
        #[arg(long)]
        format: Option<String>,

        /// Include the ranked suggestion list in the report.
        #[arg(long)]
        include_suggestions: bool,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,

        /// Gzip-compress the output file.
        #[arg(long)]
        compress: bool,

        /// Render the HTML report in dark mode.
        #[arg(long)]
        dark_mode: bool,

        /// Report title.
        #[arg(long)]
        title: Option<String>,

        /// Cap the number of files listed (0 = unlimited).
        #[arg(long, default_value_t = 0)]
        max_files: usize,

        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,

        /// Analyzer worker threads (0 = rayon's default global pool).
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,
    },

    /// Shorthand for `export --format html --include-suggestions -o bha-report.html`.
    Report {
        /// Trace files or directories (searched recursively for `*.json`).
        trace_files: Vec<PathBuf>,

        /// Open the generated report in the default browser.
        #[arg(long)]
        open: bool,

        /// Analyzer worker threads (0 = rayon's default global pool).
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,
    },
}

/// Installs the `tracing` subscriber driven by `-v`/`-q`, falling back to
/// `RUST_LOG` when neither flag is given.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Runs the parsed CLI command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            trace_files,
            format,
            include_suggestions,
            pretty,
            compress,
            dark_mode,
            title,
            max_files,
            output,
            threads,
        } => {
            let export_options = ExportOptions {
                pretty_print: pretty,
                compress,
                include_suggestions,
                html_dark_mode: dark_mode,
                html_title: title.unwrap_or_else(|| "Build Hotspot Analysis".to_string()),
                max_files,
                ..ExportOptions::default()
            };
            let export_format = match &format {
                Some(f) => ExportFormat::from_str_loose(f)?,
                None => ExportFormat::from_extension(&output)?,
            };
            run_export(&trace_files, export_format, &export_options, &output, threads)
        }
        Commands::Report { trace_files, open, threads } => {
            let output = PathBuf::from("bha-report.html");
            let export_options = ExportOptions {
                include_suggestions: true,
                ..ExportOptions::default()
            };
            run_export(&trace_files, ExportFormat::Html, &export_options, &output, threads)?;
            if open {
                webbrowser::open(&output.display().to_string())
                    .map_err(|e| Error::io_error(e.to_string()))?;
            }
            Ok(())
        }
    }
}

fn run_export(
    trace_files: &[PathBuf],
    format: ExportFormat,
    export_options: &ExportOptions,
    output: &std::path::Path,
    threads: usize,
) -> anyhow::Result<()> {
    tracing::info!(files = trace_files.len(), "loading trace files");
    let trace = crate::trace_io::load_and_aggregate(trace_files)?;

    tracing::info!(units = trace.units.len(), threads, "running analysis");
    let analysis_options = AnalysisOptions {
        max_threads: threads,
        ..AnalysisOptions::default()
    };
    let analysis = if threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::internal_error(e.to_string()))?;
        pool.install(|| crate::analysis::run_full_analysis(&trace, &analysis_options))
    } else {
        crate::analysis::run_full_analysis(&trace, &analysis_options)
    };

    let suggestions = if export_options.include_suggestions {
        crate::suggest::generate_suggestions(&analysis, &SuggesterOptions::default())
    } else {
        Vec::new()
    };

    let exporter = exporter_for(format);
    tracing::info!(format = exporter.format_name(), output = %output.display(), "exporting report");
    exporter.export_to_file(output, &analysis, &suggestions, export_options, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_requires_an_output_path() {
        let err = Cli::try_parse_from(["bha", "export", "trace.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn report_parses_with_open_flag() {
        let cli = Cli::try_parse_from(["bha", "report", "--open", "trace.json"]).unwrap();
        match cli.command {
            Commands::Report { open, trace_files, .. } => {
                assert!(open);
                assert_eq!(trace_files, vec![PathBuf::from("trace.json")]);
            }
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn export_threads_defaults_to_cpu_count() {
        let cli = Cli::try_parse_from(["bha", "export", "-o", "out.json", "trace.json"]).unwrap();
        match cli.command {
            Commands::Export { threads, .. } => assert_eq!(threads, num_cpus::get()),
            _ => panic!("expected Export command"),
        }
    }
}
