use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{error::ErrorKind, ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use topo_graph::{topo_sort, write_listing, GraphBuilder};
use topo_loose::LooseObjectStore;
use topo_ref::BranchScanner;
use topo_repository::{RepoError, Repository};

/// Print every commit reachable from a local branch, children before
/// parents, with `=` boundaries wherever the listing skips an edge.
#[derive(Parser)]
#[command(name = "topo-order-commits", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Run as if started in <path>
    #[arg(short = 'C', value_name = "path")]
    change_dir: Option<PathBuf>,

    /// Set the path to the .git directory
    #[arg(long = "git-dir", value_name = "path")]
    git_dir: Option<PathBuf>,

    /// Log to stderr (-v for debug, -vv for trace); overrides RUST_LOG
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        if let Some(RepoError::NotFound(path)) = e.downcast_ref::<RepoError>() {
            tracing::debug!(start = %path.display(), "no repository found");
            eprintln!("Not inside a Git repository");
            process::exit(1);
        }
        eprintln!("fatal: {e:#}");
        process::exit(128);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let start = match &cli.change_dir {
        Some(dir) if !dir.is_dir() => {
            bail!("cannot change to '{}': not a directory", dir.display())
        }
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot read current directory")?,
    };

    let repo = match &cli.git_dir {
        Some(git_dir) => Repository::open(start.join(git_dir))?,
        None => Repository::discover(&start)?,
    };

    let branches = BranchScanner::new(repo.heads_dir())
        .scan()
        .context("cannot read branches")?;
    let store = LooseObjectStore::open(repo.objects_dir());
    let graph = GraphBuilder::new(&store).build(&branches)?;
    let order = topo_sort(&graph)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_listing(&mut out, &order)?;
    out.flush()?;
    Ok(())
}
