pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "firm-site")]
#[command(about = "Related links, consultation booking and intake for the firm website")]
pub struct CliConfig {
    /// Path to the site TOML configuration (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the related-links lists for a city page
    Links {
        #[arg(long)]
        city: String,

        #[arg(long)]
        region: String,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Emit router paths (`/slug`) instead of hash links (`#slug`)
        #[arg(long)]
        path_links: bool,
    },

    /// Export every catalog page as CSV
    Catalog {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<String>,
    },

    /// Check page definitions for region slugs the catalog does not know
    Audit {
        #[arg(long)]
        pages: String,
    },

    /// Submit a consultation request from a JSON or TOML form file
    Submit {
        #[arg(long)]
        form: Option<String>,

        /// Override a single field, e.g. `--field practiceArea=paga`
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,

        /// Full function URL; overrides the configured endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Run the intake function and links API locally
    Serve {
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: String,
    },
}

#[cfg(feature = "cli")]
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}
