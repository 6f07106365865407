//! tcop CLI - command-line client for a threat-intelligence platform API

use clap::Parser;
use env_logger::Env;

use tcop::cli::args::GlobalOptions;
use tcop::cli::{self, Cli, Commands};
use tcop::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("tcop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::List {
            resource,
            filters,
            asset,
            pagination,
        } => cli::list::list(&opts, resource, &filters, asset, &pagination).await,
        Commands::Path {
            resource,
            filters,
            asset,
            pagination,
        } => cli::list::path(&opts, resource, &filters, asset, &pagination),
        Commands::Families => cli::families::run(&opts),
        Commands::Resolutions { host, pagination } => {
            cli::list::resolutions(&opts, &host, &pagination).await
        }
        Commands::Occurrences { hash, pagination } => {
            cli::list::occurrences(&opts, &hash, &pagination).await
        }
        Commands::Download { id } => cli::list::download(&opts, id).await,
        Commands::Create(command) => cli::write::create(&opts, command).await,
        Commands::Delete { group: (kind, id) } => cli::write::delete(&opts, kind, id).await,
        Commands::Attribute(command) => cli::metadata::attribute(&opts, command).await,
        Commands::Tag(command) => cli::metadata::tag(&opts, command).await,
        Commands::Label(command) => cli::metadata::label(&opts, command).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
