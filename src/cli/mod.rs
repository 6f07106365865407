//! CLI command definitions and handlers

use clap::{ArgGroup, Args, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::{GroupKind, IndicatorType, VictimAssetKind};

pub mod args;
pub mod completions;
pub mod context;
pub mod families;
pub mod init;
pub mod list;
pub mod metadata;
pub mod status;
pub mod write;

pub use args::{FilterArgs, OutputFormat, PaginationArgs, ResourceArg};
pub use context::CommandContext;

/// tcop - command-line client for a threat-intelligence platform API
#[derive(Parser, Debug)]
#[command(name = "tcop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TCOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Owner to scope queries and new records to
    #[arg(long, global = true, env = "TCOP_OWNER", hide_env = true)]
    pub owner: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "TCOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API access ID
    #[arg(long = "access-id", global = true, env = "TCOP_ACCESS_ID", hide_env = true)]
    pub access_id: Option<String>,

    /// API secret key
    #[arg(
        long = "secret-key",
        global = true,
        env = "TCOP_SECRET_KEY",
        hide_env = true,
        hide_env_values = true
    )]
    pub secret_key: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true, env = "TCOP_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TCOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize tcop configuration
    Init,

    /// Show credential and configuration status
    Status,

    /// Display version information
    Version,

    /// List records of one resource type
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            tcop list adversaries --indicator host:evil.example.com\n  \
            tcop list indicators --tag 'APT 1' --limit 50\n  \
            tcop list threats --group threat:42          # one threat\n  \
            tcop list victim-assets --victim 3 --asset website"
    )]
    List {
        /// Resource type to list
        #[arg(value_enum)]
        resource: ResourceArg,

        #[command(flatten)]
        filters: FilterArgs,

        /// Victim asset type (victim-assets only)
        #[arg(long, value_name = "TYPE")]
        asset: Option<VictimAssetKind>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Print the request path a list query maps to, without sending it
    Path {
        #[arg(value_enum)]
        resource: ResourceArg,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_name = "TYPE")]
        asset: Option<VictimAssetKind>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show which filters each resource type accepts
    Families,

    /// DNS resolutions recorded for a host indicator
    Resolutions {
        /// Host name
        host: String,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Places a file indicator was observed
    Occurrences {
        /// File hash (MD5, SHA1 or SHA256)
        hash: String,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Download a signature's file content
    Download {
        /// Signature ID
        id: u64,
    },

    /// Create groups
    #[command(subcommand)]
    Create(CreateCommands),

    /// Delete a group
    Delete {
        /// Group to delete, as <TYPE>:<ID>
        #[arg(value_name = "TYPE:ID", value_parser = args::parse_group_ref)]
        group: (GroupKind, u64),
    },

    /// Manage attributes on a group or indicator
    #[command(subcommand)]
    Attribute(AttributeCommands),

    /// Manage tags on a group or indicator
    #[command(subcommand)]
    Tag(LabelCommands),

    /// Manage security labels on a group or indicator
    #[command(subcommand)]
    Label(LabelCommands),

    /// Generate shell completions
    #[command(after_help = "\
Installation:
  bash:   tcop completion bash > /etc/bash_completion.d/tcop
  zsh:    tcop completion zsh > \"${fpath[1]}/_tcop\"
  fish:   tcop completion fish > ~/.config/fish/completions/tcop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Group creation subcommands
#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create an adversary
    Adversary {
        name: String,
    },

    /// Create a threat
    Threat {
        name: String,
    },

    /// Create an email group
    Email {
        name: String,

        #[arg(long)]
        subject: String,

        /// Raw message headers
        #[arg(long)]
        header: String,

        /// Message body
        #[arg(long)]
        body: String,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        score: Option<u32>,
    },

    /// Create an incident
    Incident {
        name: String,

        /// Event date (RFC 3339, YYYY-MM-DD or MM/DD/YYYY)
        #[arg(long = "event-date")]
        event_date: String,
    },

    /// Create a signature from a local file
    Signature {
        name: String,

        /// Signature file to upload
        #[arg(long)]
        file: std::path::PathBuf,

        /// Signature format, e.g. Snort, YARA, ClamAV
        #[arg(long = "file-type")]
        file_type: String,
    },
}

/// Group or indicator a metadata command applies to
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").args(["group", "indicator"]).required(true)))]
pub struct TargetArgs {
    /// Target group, as <TYPE>:<ID>
    #[arg(long, value_name = "TYPE:ID", value_parser = args::parse_group_ref)]
    pub group: Option<(GroupKind, u64)>,

    /// Target indicator, as <TYPE>:<VALUE>
    #[arg(long, value_name = "TYPE:VALUE", value_parser = args::parse_indicator_ref)]
    pub indicator: Option<(IndicatorType, String)>,
}

/// Attribute subcommands
#[derive(Subcommand, Debug)]
pub enum AttributeCommands {
    /// Add an attribute
    Add {
        #[command(flatten)]
        target: TargetArgs,

        /// Attribute type, e.g. Description
        #[arg(long = "type")]
        attribute_type: String,

        #[arg(long)]
        value: String,

        /// Show the attribute on the record's overview
        #[arg(long)]
        displayed: bool,
    },

    /// Change an attribute's value
    Set {
        #[command(flatten)]
        target: TargetArgs,

        /// Attribute ID
        id: u64,

        #[arg(long)]
        value: String,
    },

    /// Delete an attribute
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Attribute ID
        id: u64,
    },
}

/// Subcommands shared by tags and security labels
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Apply to a group or indicator
    Add {
        #[command(flatten)]
        target: TargetArgs,

        name: String,
    },

    /// Remove from a group or indicator
    Remove {
        #[command(flatten)]
        target: TargetArgs,

        name: String,
    },
}
