//! Compilation database loading and compile argument normalization
//!
//! Reads `compile_commands.json` and reduces every compile command to the
//! flags that influence how a translation unit is parsed: macro definitions,
//! warnings, language selection and include paths. Include paths are made
//! absolute so the stored arguments stay valid regardless of the directory
//! the indexer later runs from.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ProjectConfig;
use crate::engine::EngineError;

pub const COMPDB_FILE: &str = "compile_commands.json";

/// Flags whose value is a path, in the order joined forms are matched
const PATH_FLAGS: [&str; 6] = [
    "-include",
    "-isystem",
    "-I",
    "-iquote",
    "--sysroot=",
    "-isysroot",
];

/// Flag prefixes kept as-is
const KEPT_PREFIXES: [&str; 3] = ["-D", "-W", "-std="];

/// Normalized compile arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileArgs {
    pub all_args: Vec<String>,
    /// Files force-included with `-include`
    pub includes: BTreeSet<PathBuf>,
    /// Whether the language was set explicitly with `-x`
    pub has_x: bool,
}

/// Compile command of a single translation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    pub filename: PathBuf,
    pub args: CompileArgs,
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    directory: PathBuf,
    file: PathBuf,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    command: Option<String>,
}

impl RawEntry {
    fn into_args(self) -> (PathBuf, PathBuf, Vec<String>) {
        let args = match (self.arguments, self.command) {
            (Some(arguments), _) => arguments,
            (None, Some(command)) => command.split_whitespace().map(str::to_string).collect(),
            (None, None) => Vec::new(),
        };
        (self.directory, self.file, args)
    }
}

/// Compile commands keyed by absolute source path
#[derive(Debug, Default)]
pub struct CompilationDatabase {
    commands: BTreeMap<PathBuf, CompileCommand>,
}

impl CompilationDatabase {
    pub fn path(root: &Path) -> PathBuf {
        root.join(COMPDB_FILE)
    }

    /// Load `compile_commands.json` from the project root
    pub fn load(root: &Path, config: &ProjectConfig) -> Result<Self, EngineError> {
        let path = Self::path(root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(EngineError::MissingCompilationDatabase(path));
            }
            Err(err) => return Err(EngineError::io(path, err)),
        };

        let db = Self::parse(root, &content, config)
            .map_err(|source| EngineError::InvalidCompilationDatabase { path, source })?;
        debug!("Loaded {} compile commands", db.len());
        Ok(db)
    }

    /// Parse the JSON text of a compilation database
    pub fn parse(root: &Path, json: &str, config: &ProjectConfig) -> serde_json::Result<Self> {
        let entries: Vec<RawEntry> = serde_json::from_str(json)?;
        let mut commands = BTreeMap::new();

        for entry in entries {
            let (directory, file, args) = entry.into_args();
            let directory = make_absolute_path(root, &directory);
            let filename = make_absolute_path(&directory, &file);

            if commands.contains_key(&filename) {
                warn!("Duplicate compile command for {}, keeping the first", filename.display());
                continue;
            }

            let args = make_compile_args(&directory, &args, &config.extra_args, &config.banned_args);
            commands.insert(
                filename.clone(),
                CompileCommand {
                    filename,
                    args,
                    directory,
                },
            );
        }

        Ok(Self { commands })
    }

    pub fn get(&self, path: &Path) -> Option<&CompileCommand> {
        self.commands.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.commands.contains_key(path)
    }

    /// All compile commands, ordered by path
    pub fn commands(&self) -> impl Iterator<Item = &CompileCommand> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Reduce raw compiler arguments (followed by `extra_args`) to the flags that
/// matter for indexing. Any flag listed in `banned_args` is skipped.
pub fn make_compile_args(
    cwd: &Path,
    args: &[String],
    extra_args: &[String],
    banned_args: &[String],
) -> CompileArgs {
    let mut out = CompileArgs::default();
    let mut iter = args.iter().chain(extra_args.iter());

    while let Some(arg) = iter.next() {
        if banned_args.contains(arg) {
            continue;
        }

        if arg == "-nostdinc" {
            out.all_args.push(arg.clone());
        } else if arg == "-x" || arg == "-Xpreprocessor" {
            out.has_x |= arg == "-x";
            out.all_args.push(arg.clone());
            if let Some(value) = iter.next() {
                out.all_args.push(value.clone());
            }
        } else if KEPT_PREFIXES.iter().any(|p| arg.starts_with(p)) {
            out.all_args.push(arg.clone());
        } else if PATH_FLAGS.contains(&arg.as_str()) {
            out.all_args.push(arg.clone());
            if let Some(value) = iter.next() {
                let path = make_absolute_path(cwd, Path::new(value));
                if arg == "-include" {
                    out.includes.insert(path.clone());
                }
                out.all_args.push(path.display().to_string());
            }
        } else if let Some(flag) = PATH_FLAGS.iter().find(|f| arg.starts_with(*f)) {
            let path = make_absolute_path(cwd, Path::new(&arg[flag.len()..]));
            if *flag == "-include" {
                out.includes.insert(path.clone());
            }
            out.all_args.push(format!("{}{}", flag, path.display()));
        }
    }

    out
}

/// Resolve `path` against `cwd` and normalize it lexically (no filesystem
/// access, symlinks are not followed)
pub fn make_absolute_path(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
