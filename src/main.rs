use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use labnote::catalog::CatalogFile;
use labnote::commands::{
    chat, constants, generate, init, new, populate, renumber, scaffold, templates, uo, workflow,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labnote")]
#[command(about = "AI-assisted lab notebook CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a labnote/ directory with template catalogs
    Init {
        /// Directory to initialize in (default: current directory)
        path: Option<PathBuf>,
    },

    /// Create a numbered experiment folder
    New {
        /// Experiment title
        title: String,

        /// Experiment type recorded in the README frontmatter
        #[arg(short = 't', long, default_value = "HW")]
        experiment_type: String,

        /// Author; defaults to the configured experimenter
        #[arg(short, long)]
        author: Option<String>,

        /// Notebook location (default: walk up from the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Generate a lab note draft via the AI backend
    Generate {
        /// What the note should cover
        query: String,

        /// Pin a workflow ID (switches to the structured note endpoint)
        #[arg(short, long)]
        workflow_id: Option<String>,

        /// Unit-operation IDs for the structured note (repeatable)
        #[arg(short, long = "uo")]
        unit_operations: Vec<String>,

        /// Write the draft to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the AI backend a free-form question
    Chat {
        /// The question
        query: String,

        /// Continue the persisted conversation
        #[arg(short = 'c', long = "continue")]
        continue_chat: bool,

        /// Notebook location for session persistence
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Clear the persisted chat conversation
    ChatReset {
        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Ask for a recommended structure and scaffold a new experiment from it
    Scaffold {
        /// What the experiment is about
        query: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Fill a placeholder section with an AI draft
    Populate {
        /// Workflow file to edit
        file: PathBuf,

        /// 1-based line number of the placeholder
        #[arg(short, long)]
        line: usize,

        /// Pick option K without prompting
        #[arg(short, long)]
        choose: Option<usize>,

        /// Override the query (default: the document title)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Manage workflow files
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },

    /// Manage unit-operation blocks
    Uo {
        #[command(subcommand)]
        command: UoCommands,
    },

    /// Restore contiguous numbering of notebook entries
    Renumber {
        #[command(subcommand)]
        command: RenumberCommands,
    },

    /// Inspect template catalogs
    Templates {
        #[command(subcommand)]
        command: TemplatesCommands,
    },

    /// Fetch workflow and unit-operation constants from the backend
    Constants,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum WorkflowCommands {
    /// Create a numbered workflow file and link it from the README
    Add {
        /// Path to the experiment README.md
        readme: PathBuf,

        /// Workflow ID from the catalog, e.g. WD070
        #[arg(short, long)]
        id: String,

        /// Free-text description appended to the title and file name
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List the workflow catalog
    List {
        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum UoCommands {
    /// Insert a unit-operation block into a workflow file
    Add {
        /// Path to the workflow file
        file: PathBuf,

        /// Unit-operation ID from a catalog, e.g. USW070
        #[arg(short, long)]
        id: String,

        /// Free-text description appended to the block heading
        #[arg(short, long)]
        description: Option<String>,

        /// Look the ID up in the hardware catalog regardless of its prefix
        #[arg(long, conflicts_with = "sw")]
        hw: bool,

        /// Look the ID up in the software catalog regardless of its prefix
        #[arg(long)]
        sw: bool,
    },

    /// List a unit-operation catalog
    List {
        /// Show the software catalog instead of the hardware one
        #[arg(long)]
        sw: bool,

        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RenumberCommands {
    /// Renumber workflow files in an experiment folder
    Files {
        /// The experiment folder
        dir: PathBuf,
    },

    /// Renumber experiment folders under the notebook root
    Folders {
        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TemplatesCommands {
    /// List catalog files with record counts
    List {
        /// Notebook location
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labnote=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{} {e:#}", "✗".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => init::execute(path),
        Commands::New {
            title,
            experiment_type,
            author,
            root,
        } => new::execute(title, experiment_type, author, root),
        Commands::Generate {
            query,
            workflow_id,
            unit_operations,
            output,
        } => generate::execute(query, workflow_id, unit_operations, output),
        Commands::Chat {
            query,
            continue_chat,
            root,
        } => chat::execute(query, continue_chat, root),
        Commands::ChatReset { root } => chat::reset(root),
        Commands::Scaffold { query, yes, root } => scaffold::execute(query, yes, root),
        Commands::Populate {
            file,
            line,
            choose,
            query,
        } => populate::execute(file, line, choose, query),
        Commands::Workflow { command } => match command {
            WorkflowCommands::Add {
                readme,
                id,
                description,
            } => workflow::add(readme, id, description),
            WorkflowCommands::List { root } => workflow::list(root),
        },
        Commands::Uo { command } => match command {
            UoCommands::Add {
                file,
                id,
                description,
                hw,
                sw,
            } => {
                let catalog = if hw {
                    Some(CatalogFile::HwUnitOperations)
                } else if sw {
                    Some(CatalogFile::SwUnitOperations)
                } else {
                    None
                };
                uo::add(file, id, description, catalog)
            }
            UoCommands::List { sw, root } => {
                let file = if sw {
                    CatalogFile::SwUnitOperations
                } else {
                    CatalogFile::HwUnitOperations
                };
                uo::list(root, file)
            }
        },
        Commands::Renumber { command } => match command {
            RenumberCommands::Files { dir } => renumber::files(dir),
            RenumberCommands::Folders { root } => renumber::folders(root),
        },
        Commands::Templates { command } => match command {
            TemplatesCommands::List { root } => templates::list(root),
        },
        Commands::Constants => constants::execute(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "labnote", &mut std::io::stdout());
            Ok(())
        }
    }
}
