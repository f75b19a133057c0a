use anyhow::Result;
use clap::{Parser, Subcommand};
use minus::{Pager, page_all};
use mygit::areas::repository::Repository;
use mygit::artifacts::core::PagerWriter;
use mygit::artifacts::merge::three_way::MergePreference;
use mygit::commands::porcelain::merge::MergeOutcome;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mygit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal snapshot-based version control system",
    long_about = "This is a minimal version control system, written in Rust. \
    Every commit stores a full copy of the tracked tree, \
    branches are ordered lists of snapshots and merges work over those lists.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage changes for the next commit",
        long_about = "This command stages new, modified and deleted files. \
        Directories expand to the files below them; '.' stages every change."
    )]
    Add {
        #[arg(index = 1, help = "The paths to stage")]
        paths: Vec<String>,
        #[arg(short = 'A', long, help = "Stage every change in the working directory")]
        all: bool,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staged changes on top of the checked-out snapshot."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working directory status",
        long_about = "This command lists staged changes, unstaged changes and untracked files."
    )]
    Status,
    #[command(
        name = "diff",
        about = "Show changes between snapshots, branches and files",
        long_about = "This command compares the working directory with the checked-out snapshot. \
        Each argument may be a snapshot id, a branch name, HEAD/@ or a working file."
    )]
    Diff {
        #[arg(index = 1, help = "The old side of the comparison")]
        old: Option<String>,
        #[arg(index = 2, help = "The new side of the comparison")]
        new: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show the history of the active branch",
        long_about = "This command shows the commits of the active branch, newest first."
    )]
    Log,
    #[command(
        name = "branch",
        about = "Create, list, or delete branches",
        long_about = "This command manages the branches of the repository."
    )]
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },
    #[command(
        name = "checkout",
        about = "Switch to another branch",
        long_about = "This command discards the staged changes and mirrors the branch tip into the working directory."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge another branch into the active one",
        long_about = "This command fast-forwards the active branch when possible \
        and falls back to a three-way merge otherwise."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        name: String,
        #[arg(
            long,
            value_enum,
            env = "MYGIT_MERGE_PREFER",
            help = "Resolve conflicting regions with one side instead of conflict markers"
        )]
        prefer: Option<MergePreference>,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    #[command(about = "Create a branch at the checked-out snapshot")]
    Create {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Delete a branch that is not checked out")]
    Delete {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "List the branches, marking the active one")]
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.clone().unwrap_or(pwd);
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;
            repository.init().await?;
        }
        Commands::Add { paths, all } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.add(paths, *all).await?;
        }
        Commands::Commit { message } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.commit(message).await?;
        }
        Commands::Status => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.status().await?;
        }
        Commands::Diff { old, new } => {
            if PagerWriter::should_page() {
                let pager = Pager::new();
                let writer = PagerWriter::new(pager.clone());
                let mut repository = Repository::discover(&pwd, Box::new(writer))?;
                repository.diff(old.as_deref(), new.as_deref()).await?;
                page_all(pager)?;
            } else {
                let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
                repository.diff(old.as_deref(), new.as_deref()).await?;
            }
        }
        Commands::Log => {
            if PagerWriter::should_page() {
                let pager = Pager::new();
                let writer = PagerWriter::new(pager.clone());
                let repository = Repository::discover(&pwd, Box::new(writer))?;
                repository.log()?;
                page_all(pager)?;
            } else {
                let repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
                repository.log()?;
            }
        }
        Commands::Branch { action } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            match action {
                BranchAction::Create { name } => repository.create_branch(name)?,
                BranchAction::Delete { name } => repository.delete_branch(name)?,
                BranchAction::List => repository.list_branches()?,
            }
        }
        Commands::Checkout { name } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            repository.checkout(name).await?;
        }
        Commands::Merge { name, prefer } => {
            let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;
            if let MergeOutcome::Conflicted(_) = repository.merge(name, *prefer).await? {
                repository.writer().flush()?;
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
