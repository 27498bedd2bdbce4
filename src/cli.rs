use clap::Parser;
use std::path::PathBuf;

use crate::config::AuthScheme;

#[derive(Parser, Debug, Default)]
#[command(
    name = "adoscan",
    version,
    about = "Inventory large files across every repository of an Azure DevOps organization"
)]
pub struct Cli {
    /// Azure DevOps organization name
    #[arg(long, env = "ADO_ORGANIZATION")]
    pub organization: Option<String>,

    /// Access token (Entra ID bearer token or personal access token)
    #[arg(long, env = "ADO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// How the token is sent
    #[arg(long, value_enum)]
    pub auth: Option<AuthScheme>,

    /// Minimum file size in MB [default: 100]
    #[arg(short = 't', long = "threshold-mb")]
    pub threshold_mb: Option<u64>,

    /// Excel report path [default: AzureDevOps_LargeFiles_<org>_<timestamp>.xlsx]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the console summary only, skip the Excel report
    #[arg(long)]
    pub no_excel: bool,

    /// Number of files in the console top list [default: 10]
    #[arg(long)]
    pub top: Option<usize>,

    /// Collection URL for Azure DevOps Server [default: https://dev.azure.com/<org>]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds [default: 60]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Retries for throttled or failed requests [default: 2]
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter directive for this invocation
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
