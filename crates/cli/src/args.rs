use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

/// Kubera API command-line interface.
///
/// Credentials are read from --api-key/--secret, then KUBERA_API_KEY and
/// KUBERA_SECRET, then ~/.env. Update operations need an API key with update
/// permissions, and some keys are restricted to specific IP addresses.
#[derive(Parser, Debug, Clone)]
#[command(name = "kubera", version, about = "Explore your Kubera portfolio data")]
pub struct Cli {
    /// Kubera API key.
    #[arg(long, global = true, env = "KUBERA_API_KEY")]
    pub api_key: Option<String>,

    /// Kubera API secret.
    #[arg(long, global = true, env = "KUBERA_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// API base URL (default: https://api.kubera.com, or KUBERA_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: 30, or KUBERA_TIMEOUT_SECS).
    #[arg(long, global = true, value_parser = common::parse_timeout_secs)]
    pub timeout: Option<Duration>,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all portfolios and remember their order for index lookups.
    List {
        /// Output raw JSON instead of formatted text.
        #[arg(long)]
        raw: bool,
    },

    /// Show a portfolio's net worth and per-sheet totals.
    Show {
        /// Portfolio index from `kubera list` (1, 2, ...) or full ID.
        portfolio: String,

        /// Output raw JSON instead of formatted text.
        #[arg(long)]
        raw: bool,

        /// Show as a tree of sheets and items.
        #[arg(long)]
        tree: bool,
    },

    /// Show every item of one sheet with value, cost basis and gains.
    Drill {
        /// Portfolio index or full ID.
        portfolio: String,

        #[arg(value_enum, ignore_case = true)]
        category: Category,

        /// Sheet name, matched case-insensitively (e.g. "Bank Accounts").
        sheet: String,

        /// Output raw JSON instead of formatted text.
        #[arg(long)]
        raw: bool,
    },

    /// Update an asset or debt. Requires an API key with update permissions.
    Update {
        /// Asset or debt ID.
        item_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        value: Option<f64>,

        /// New cost basis.
        #[arg(long)]
        cost: Option<f64>,

        /// Output raw JSON instead of formatted text.
        #[arg(long)]
        raw: bool,
    },

    /// Check credentials and connectivity.
    Test {
        /// Output a JSON status object.
        #[arg(long)]
        raw: bool,
    },

    /// Browse portfolios step by step.
    Interactive,
}

impl Command {
    /// Whether output (including failures) should be JSON.
    pub fn is_raw(&self) -> bool {
        match self {
            Command::List { raw }
            | Command::Show { raw, .. }
            | Command::Drill { raw, .. }
            | Command::Update { raw, .. }
            | Command::Test { raw } => *raw,
            Command::Interactive => false,
        }
    }
}

/// Top-level portfolio category.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Asset,
    Debt,
    Insurance,
}

impl Category {
    /// Detail payload key, with the plural spelling some payloads use.
    pub fn keys(self) -> (&'static str, &'static str) {
        match self {
            Category::Asset => ("asset", "assets"),
            Category::Debt => ("debt", "debts"),
            Category::Insurance => ("insurance", "insurance"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Asset => "Asset",
            Category::Debt => "Debt",
            Category::Insurance => "Insurance",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.keys().0
    }
}
