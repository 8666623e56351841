//! CLI entry point for treemark

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use treemark::{
    BuildConfig, Error, FsProvider, NodeId, OutputConfig, SelectionTree, TreeBuilder,
    TreeFormatter, logging, print_json, to_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Bulk selection operation applied to one entry and its subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ActionKind {
    /// Check the entry and everything below it
    CheckAll,
    /// Check the entry and its immediate children
    CheckLevel,
    /// Check directories and uncheck files below the entry
    OnlyFolders,
    /// Same as only-folders, immediate children only
    OnlyFoldersLevel,
    /// Check files and uncheck directories below the entry
    OnlyFiles,
    /// Same as only-files, immediate children only
    OnlyFilesLevel,
    /// Uncheck everything below the entry, keeping the entry itself
    UncheckChildren,
    /// Check the entry alone, leaving its children as they are
    CheckNode,
}

impl ActionKind {
    fn apply(self, tree: &mut SelectionTree, id: NodeId) {
        match self {
            ActionKind::CheckAll => tree.check_all(id, true),
            ActionKind::CheckLevel => tree.check_all(id, false),
            ActionKind::OnlyFolders => tree.check_only_folders(id, true),
            ActionKind::OnlyFoldersLevel => tree.check_only_folders(id, false),
            ActionKind::OnlyFiles => tree.check_only_files(id, true),
            ActionKind::OnlyFilesLevel => tree.check_only_files(id, false),
            ActionKind::UncheckChildren => tree.uncheck_all(id, false),
            ActionKind::CheckNode => tree.check_without_children(id),
        }
    }
}

/// An `--apply` argument: an action and the entry it targets.
#[derive(Debug, Clone)]
struct Action {
    kind: ActionKind,
    path: String,
}

/// Parse `ACTION[:REL_PATH]`; a missing path targets the root.
fn parse_action(value: &str) -> Result<Action, String> {
    let (kind, path) = value.split_once(':').unwrap_or((value, ""));
    Ok(Action {
        kind: ActionKind::from_str(kind, false)?,
        path: path.to_string(),
    })
}

#[derive(Parser, Debug)]
#[command(name = "treemark")]
#[command(about = "Select parts of a directory tree and export them as a text diagram")]
#[command(version)]
struct Args {
    /// Directories to display
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Keep entries matched by .gitignore files selected
    #[arg(long = "no-gitignore")]
    no_gitignore: bool,

    /// Deselect entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Select directories only
    #[arg(long = "only-folders", conflicts_with = "only_files")]
    only_folders: bool,

    /// Select files only
    #[arg(long = "only-files")]
    only_files: bool,

    /// Run a bulk operation on an entry (can be used multiple times, applied
    /// in order after --only-folders/--only-files). ACTION is one of
    /// check-all, check-level, only-folders, only-folders-level, only-files,
    /// only-files-level, uncheck-children, check-node. Without REL_PATH the
    /// root is the target
    #[arg(
        short = 'a',
        long = "apply",
        value_name = "ACTION[:REL_PATH]",
        value_parser = parse_action
    )]
    apply: Vec<Action>,

    /// Deselect an entry, given relative to the root (can be used multiple times)
    /// Applied after --apply
    #[arg(long = "uncheck", value_name = "REL_PATH")]
    uncheck: Vec<String>,

    /// Select an entry, given relative to the root (can be used multiple times)
    /// Applied after --uncheck
    #[arg(long = "check", value_name = "REL_PATH")]
    check: Vec<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Print "N directories, M files" after each tree
    #[arg(long = "summary", conflicts_with = "json")]
    summary: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Number of parallel workers when several paths are given
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Log more to stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Apply the selection flags to a freshly built tree.
fn apply_selection(tree: &mut SelectionTree, args: &Args) -> Result<(), Error> {
    let root = tree.root();
    if args.only_folders {
        tree.check_only_folders(root, true);
    } else if args.only_files {
        tree.check_only_files(root, true);
    }
    for action in &args.apply {
        let id = tree.resolve(&action.path)?;
        action.kind.apply(tree, id);
    }
    for path in &args.uncheck {
        let id = tree.resolve(path)?;
        tree.set_checked(id, false);
    }
    for path in &args.check {
        let id = tree.resolve(path)?;
        tree.set_checked(id, true);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut failed = false;
    let mut roots = Vec::new();
    for path in &args.paths {
        match path.canonicalize() {
            Ok(root) => roots.push(root),
            Err(e) => {
                eprintln!("treemark: {}", Error::io(path.display().to_string(), e));
                failed = true;
            }
        }
    }

    let config = BuildConfig {
        apply_gitignore: !args.no_gitignore,
        extra_patterns: args.ignore.clone(),
        parallel_workers: args.jobs,
        ..Default::default()
    };
    let builder = TreeBuilder::new(FsProvider::new()).with_config(config);

    let mut trees = Vec::new();
    for result in builder.build_many(&roots) {
        let built = result.and_then(|mut tree| {
            apply_selection(&mut tree, &args)?;
            Ok(tree)
        });
        match built {
            Ok(tree) => trees.push(tree),
            Err(e) => {
                eprintln!("treemark: {}", e);
                failed = true;
            }
        }
    }

    let result = if args.json {
        if trees.len() == 1 {
            print_json(&trees[0])
        } else {
            let nodes: Vec<_> = trees.iter().map(to_json).collect();
            serde_json::to_string_pretty(&nodes)
                .map(|json| println!("{}", json))
                .map_err(std::io::Error::other)
        }
    } else {
        let formatter = TreeFormatter::new(OutputConfig {
            use_color: should_use_color(args.color),
            summary: args.summary,
        });
        trees.iter().enumerate().try_for_each(|(i, tree)| {
            if i > 0 {
                println!();
            }
            formatter.print(tree)
        })
    };

    if let Err(e) = result {
        eprintln!("treemark: error writing output: {}", e);
        process::exit(1);
    }
    if failed {
        process::exit(1);
    }
}
