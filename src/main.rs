use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vcs::artifacts::core::with_output;
use vcs::{KeepLocal, LogFormat, Repository, TakeIncoming};

const LOG_FILTER_ENV: &str = "VCS_LOG";
const SHELL_PROMPT: &str = "> ";

#[derive(Parser)]
#[command(
    name = "vcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A single-user local version control system",
    long_about = "Tracks a working directory, records commits on branches, \
    rebuilds past states and merges branches. All state lives in the .vcs \
    directory at the repository root.",
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
        env = "VCS_REPOSITORY",
        help = "Repository root (defaults to the current directory)"
    )]
    repo: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

/// One line typed into the interactive shell
#[derive(Parser)]
#[command(name = "vcs", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .vcs directory in the repository root or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        path: PathBuf,
    },
    #[command(name = "rm", about = "Unstage a file and delete it from the working tree")]
    Rm {
        #[arg(index = 1)]
        path: PathBuf,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records every staged file in a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show added, changed, deleted and untracked files")]
    Status {
        #[arg(short, long, help = "Give the output in the short format")]
        short: bool,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "Show the current branch, create a branch or delete one",
        long_about = "Without arguments this command prints the current branch. \
        With a name it creates a branch at HEAD and switches to it."
    )]
    Branch {
        #[arg(index = 1, conflicts_with = "delete", help = "The branch to create")]
        name: Option<String>,
        #[arg(short = 'd', long = "delete", help = "The branch to delete")]
        delete: Option<String>,
    },
    #[command(name = "branches", about = "List all branches")]
    Branches,
    #[command(
        name = "checkout",
        about = "Rebuild the working tree from a branch or commit",
        long_about = "Accepts a branch name, HEAD or @, a full or abbreviated commit id, \
        and the <rev>^ and <rev>~N suffixes."
    )]
    Checkout {
        #[arg(index = 1)]
        revision: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch or commit into the current branch",
        long_about = "Files that differ on both sides are resolved with --ours or --theirs, \
        or by answering a prompt for each file."
    )]
    Merge {
        #[arg(index = 1)]
        revision: String,
        #[arg(long, conflicts_with = "theirs", help = "Keep every local file")]
        ours: bool,
        #[arg(long, help = "Take every incoming file")]
        theirs: bool,
    },
    #[command(name = "reset", about = "Restore a file to its committed content")]
    Reset {
        #[arg(index = 1)]
        path: PathBuf,
    },
    #[command(name = "clean", about = "Delete every file that is not staged")]
    Clean,
    #[command(name = "shell", about = "Run commands interactively")]
    Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let repository_path = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("Unable to determine the current directory")?,
    };
    let repository = Repository::new(&repository_path).with_context(|| {
        format!("Unable to open repository at {}", repository_path.display())
    })?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match cli.command {
        Commands::Shell => run_shell(&repository, &mut input),
        command => execute(&repository, command, &mut input),
    }
}

fn run_shell(repository: &Repository, input: &mut dyn BufRead) -> Result<()> {
    loop {
        print!("{}", SHELL_PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => {}
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        match ShellLine::try_parse_from(words) {
            Ok(ShellLine {
                command: Commands::Shell,
            }) => eprintln!("error: already in a shell"),
            Ok(ShellLine { command }) => {
                if let Err(e) = execute(repository, command, input) {
                    eprintln!("error: {e:#}");
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                print!("{e}");
            }
            Err(e) => {
                let message = e.to_string();
                let summary = message.lines().next().unwrap_or_default();
                eprintln!("error: {}", summary.trim_start_matches("error: "));
            }
        }
    }

    Ok(())
}

fn execute(repository: &Repository, command: Commands, input: &mut dyn BufRead) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Init { path } => {
            let target;
            let repository = match path {
                Some(path) => {
                    target = Repository::new(&path)?;
                    &target
                }
                None => repository,
            };

            repository.init()?;
            writeln!(
                stdout,
                "Initialized empty repository in {}",
                repository.storage_path().display()
            )?;
        }
        Commands::Add { path } => {
            repository.add(&path)?;
        }
        Commands::Rm { path } => {
            let removed = repository.remove(&path)?;
            writeln!(stdout, "rm '{}'", relative(repository, &removed).display())?;
        }
        Commands::Commit { message } => {
            let oid = repository.commit(&message)?;
            writeln!(
                stdout,
                "[{} {}] {}",
                repository.branch()?,
                oid.to_short_oid(),
                message.trim().lines().next().unwrap_or_default()
            )?;
        }
        Commands::Status { short } => {
            let status = repository.status()?;

            if short {
                for (change, path) in status.changes() {
                    let code: &str = (&change).into();
                    writeln!(stdout, "{:<2} {}", code, relative(repository, path).display())?;
                }
                return Ok(());
            }

            writeln!(stdout, "On branch {}", repository.branch()?)?;
            if status.is_clean() {
                writeln!(stdout, "nothing to commit, working tree clean")?;
            }
            for (change, path) in status.changes() {
                writeln!(stdout, "\t{}{}", change, relative(repository, path).display())?;
            }
        }
        Commands::Log { oneline } => {
            let entries = repository.log()?;
            let format = if oneline {
                LogFormat::Oneline
            } else {
                LogFormat::Medium
            };

            drop(stdout);
            with_output(|writer| {
                entries
                    .iter()
                    .try_for_each(|entry| entry.write_to(&mut *writer, format))
            })?;
        }
        Commands::Branch { name, delete } => match (name, delete) {
            (_, Some(delete)) => {
                repository.remove_branch(&delete)?;
                writeln!(stdout, "Deleted branch {}", delete)?;
            }
            (Some(name), None) => {
                let name = repository.new_branch(&name)?;
                writeln!(stdout, "Switched to a new branch '{}'", name)?;
            }
            (None, None) => writeln!(stdout, "{}", repository.branch()?)?,
        },
        Commands::Branches => {
            let current = repository.branch()?;
            for branch in repository.branches()? {
                if branch == current {
                    writeln!(stdout, "* {}", branch.to_string().green())?;
                } else {
                    writeln!(stdout, "  {}", branch)?;
                }
            }
        }
        Commands::Checkout { revision } => {
            let oid = repository.checkout(&revision)?;
            writeln!(
                stdout,
                "HEAD is now at {} on branch {}",
                oid.to_short_oid(),
                repository.branch()?
            )?;
        }
        Commands::Merge {
            revision,
            ours,
            theirs,
        } => {
            drop(stdout);
            let report = if ours {
                repository.merge(&revision, KeepLocal)?
            } else if theirs {
                repository.merge(&revision, TakeIncoming)?
            } else {
                repository.merge(&revision, |path: &Path| {
                    ask_keep_local(input, &relative(repository, path))
                })?
            };

            let mut stdout = io::stdout().lock();
            for path in &report.adopted {
                writeln!(stdout, "\tadopted:     {}", relative(repository, path).display())?;
            }
            for path in &report.overwritten {
                writeln!(stdout, "\toverwritten: {}", relative(repository, path).display())?;
            }
            for path in &report.kept {
                writeln!(stdout, "\tkept:        {}", relative(repository, path).display())?;
            }
            writeln!(
                stdout,
                "Merged {} into {} as {} (base {})",
                revision,
                repository.branch()?,
                report.commit.to_short_oid(),
                report.base.to_short_oid()
            )?;
        }
        Commands::Reset { path } => {
            let resolved = repository.resolve_path(&path)?;
            if repository.reset(&resolved)? {
                writeln!(stdout, "Restored {}", relative(repository, &resolved).display())?;
            } else {
                writeln!(
                    stdout,
                    "No committed content for {}",
                    relative(repository, &resolved).display()
                )?;
            }
        }
        Commands::Clean => repository.clean()?,
        Commands::Shell => anyhow::bail!("the shell cannot be nested"),
    }

    Ok(())
}

/// Prompt for a conflicting file; anything but an explicit "n" keeps the local file
fn ask_keep_local(input: &mut dyn BufRead, path: &Path) -> bool {
    print!("Keep local version of {}? [Y/n] ", path.display());
    if io::stdout().flush().is_err() {
        return true;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => !matches!(answer.trim().to_ascii_lowercase().as_str(), "n" | "no"),
        Err(_) => true,
    }
}

fn relative<'p>(repository: &Repository, path: &'p Path) -> &'p Path {
    path.strip_prefix(repository.path()).unwrap_or(path)
}

/// Split a shell line into words, honoring single quotes, double quotes and backslash escapes
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                let escaped = chars.next().context("Dangling escape at end of line")?;
                current.push(escaped);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        anyhow::bail!("Unterminated quote in: {}", line);
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
