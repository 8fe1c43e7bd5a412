use anyhow::Result;
use clap::{Parser, Subcommand};
use gitgraph::areas::repository::Repository;
use gitgraph::commands::porcelain::graph::{GraphFormat, GraphOptions};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitgraph",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Decode a git object store into an object graph",
    long_about = "Reads the loose objects of a git repository, decodes trees and commits, \
    and reports the resulting graph of commits, trees and blobs. \
    Corrupt objects are reported alongside the graph instead of aborting the run.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "GIT_DIR",
        help = "Repository or git directory to read (defaults to the current directory)"
    )]
    git_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "graph",
        about = "Build the object graph of the repository",
        long_about = "This command loads every loose object, decodes trees and commits, \
        and prints the graph as a JSON document or as a summary."
    )]
    Graph {
        #[arg(short, long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,
        #[arg(short, long, help = "Write the JSON document to this file")]
        output: Option<PathBuf>,
        #[arg(
            short,
            long,
            env = "GITGRAPH_JOBS",
            default_value_t = 1,
            help = "Number of workers used to load objects"
        )]
        jobs: usize,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints one decoded object. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: Option<String>,
        #[arg(short = 't', long = "type", help = "Print the type of the object SHA")]
        type_sha: Option<String>,
    },
    #[command(name = "head", about = "Show the current branch and commit")]
    Head,
    #[command(
        name = "verify",
        about = "Check every object against its content hash"
    )]
    Verify {
        #[arg(short, long, env = "GITGRAPH_JOBS", default_value_t = 1)]
        jobs: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let path = match cli.git_dir {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let repository = Repository::new(&path, Box::new(std::io::stdout()))?;

    match cli.command {
        Commands::Graph {
            format,
            output,
            jobs,
        } => {
            let opts = GraphOptions {
                format,
                output: output.as_deref(),
                jobs,
            };
            repository.graph(&opts).await?;
        }
        Commands::CatFile { sha, type_sha } => match (sha, type_sha) {
            (_, Some(sha)) => repository.cat_file(&sha, true)?,
            (Some(sha), None) => repository.cat_file(&sha, false)?,
            (None, None) => anyhow::bail!("cat-file requires -p <sha> or -t <sha>"),
        },
        Commands::Head => repository.head()?,
        Commands::Verify { jobs } => repository.verify(jobs).await?,
    }

    Ok(())
}
