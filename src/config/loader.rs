//! Benchmark override discovery.
//!
//! Looks for a `.costmap.toml` in the current directory or any ancestor (up
//! to a fixed depth) and overlays it on the default benchmark table. A
//! missing file is normal; a malformed or incoherent one logs a warning and
//! falls back to defaults rather than aborting the analysis.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::BenchmarkTable;

const CONFIG_FILE_NAME: &str = ".costmap.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML override and check it still describes a coherent table.
pub fn parse_and_validate_benchmarks(contents: &str) -> Result<BenchmarkTable, String> {
    let table = toml::from_str::<BenchmarkTable>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    table.validate().map_err(|e| e.to_string())?;
    Ok(table)
}

pub(crate) fn try_load_from_path(config_path: &Path) -> Option<BenchmarkTable> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_benchmarks(&contents) {
        Ok(table) => {
            log::debug!("Loaded benchmarks from {}", config_path.display());
            Some(table)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using default benchmarks.");
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "file not found" is the common case, not an error
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub(crate) fn directory_ancestors(
    start: PathBuf,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load the benchmark table, walking ancestor directories for an override
/// file and falling back to the built-in defaults.
pub fn load_benchmarks() -> BenchmarkTable {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {e}. Using default benchmarks.");
            return BenchmarkTable::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!("No {CONFIG_FILE_NAME} found. Using default benchmarks.");
            BenchmarkTable::default()
        })
}

/// Default benchmark table rendered as a commented TOML document, used by
/// `costmap init`.
pub fn default_config_contents() -> String {
    let table = toml::to_string_pretty(&BenchmarkTable::default())
        .expect("default benchmark table serializes");
    format!(
        "# Costmap benchmark overrides\n\
         #\n\
         # Delete any section to keep its defaults. Debt multiplier steps are\n\
         # evaluated in ascending max_ratio order; the alternatives list order\n\
         # decides NPV tie-breaks.\n\n{table}"
    )
}
