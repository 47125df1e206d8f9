//! Command-line arguments

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghostcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find out why your applications get ghosted")]
#[command(long_about = "Ghostcheck uploads your CV to the analyzer backend, matches it against a job description\nand reports the ghosting probability, missing skills and suggested fixes.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analyzer backend URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (default: <config dir>/ghostcheck/config.toml, then ./ghostcheck.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (default: read from stdin)
        #[arg(short, long, env = "GHOSTCHECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, default_value = "")]
        name: String,
        /// Password, at least 6 characters (default: read from stdin)
        #[arg(short, long, env = "GHOSTCHECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show backend, session and locale
    Status,

    /// List uploaded CVs
    Cvs,

    /// Upload a CV (.pdf, .doc, .docx)
    Upload {
        path: PathBuf,
    },

    /// Analyze a CV against a job description
    Analyze {
        /// CV id (default: the first uploaded CV)
        #[arg(long)]
        cv: Option<String>,
        /// Job description text
        #[arg(short, long, conflicts_with = "job_file")]
        job: Option<String>,
        /// Read the job description from a file ("-" for stdin)
        #[arg(long)]
        job_file: Option<PathBuf>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },

    /// List past analyses
    History,

    /// Show a past analysis
    Show {
        analysis_id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the effective configuration instead
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ghostcheck",
            "analyze",
            "--job",
            "Rust backend",
            "--format",
            "json",
            "--api-url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(matches!(cli.command, Commands::Analyze { job: Some(_), .. }));
    }

    #[test]
    fn test_job_and_job_file_conflict() {
        let result = Cli::try_parse_from([
            "ghostcheck",
            "analyze",
            "--job",
            "x",
            "--job-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }
}
