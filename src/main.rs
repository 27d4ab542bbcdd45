use aura_typegen::commands::{self, PathOptions};
use aura_typegen::logging;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "aura-typegen")]
#[command(about = "Generate TypeScript declarations for Aura components and helpers", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug output (overridden by TYPEGEN_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PathArgs {
    /// Directory of Apex declaration files (*.d.ts)
    #[arg(short = 'a', long = "apextypespath")]
    apex_types: Option<String>,
    /// Output directory for generated declarations
    #[arg(short, long)]
    output: Option<String>,
    /// Configuration file (default: typegen.toml)
    #[arg(long)]
    config: Option<String>,
}

impl From<PathArgs> for PathOptions {
    fn from(args: PathArgs) -> Self {
        PathOptions {
            apex_types: args.apex_types,
            output: args.output,
            config: args.config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate declarations for component and application markup
    Cmp {
        /// A single .cmp or .app file (defaults to the configured pattern)
        #[arg(short, long)]
        file: Option<String>,
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Generate declarations for helper scripts
    Helper {
        /// A single helper file (defaults to the configured pattern)
        #[arg(short, long)]
        file: Option<String>,
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Generate component and helper declarations
    All {
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Generate everything, then regenerate when sources change
    Watch {
        #[command(flatten)]
        paths: PathArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cmp { file, paths } => {
            commands::cmp::execute(file.as_deref(), &paths.into())
        }
        Commands::Helper { file, paths } => {
            commands::helper::execute(file.as_deref(), &paths.into())
        }
        Commands::All { paths } => {
            commands::all::execute(&paths.into())
        }
        Commands::Watch { paths } => {
            commands::watch::execute(&paths.into())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
