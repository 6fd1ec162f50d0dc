//! File input and output.
//!
//! The compiler itself works on in-memory text. These helpers connect it to
//! the filesystem:
//!
//! - **Reading**: [`read_lines`] and [`compile_file`] load DSL sources
//! - **Atomic writes**: [`write_generated_file`] uses temp file + rename so a
//!   generated file is never left half written
//! - **Existing handlers**: [`scan_existing_handler_names`] lists functions
//!   already present in a hand-written source file

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use apimodel_define::ApiModel;
use tracing::{debug, info};

use crate::config::CompileOptions;
use crate::document::compile_lines;
use crate::errors::{CompileError, Result};
use crate::kit::scan_handler_names;

/// Reads a text file into lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| CompileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Reads and compiles a DSL file.
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<ApiModel> {
    debug!(path = %path.display(), "Compiling file");
    let lines = read_lines(path)?;
    compile_lines(&lines, options)
}

/// Writes a generated file atomically, creating parent directories.
///
/// Existing files are overwritten, so writing the same content twice leaves
/// the same result.
///
/// ## Errors
///
/// Returns [`CompileError::Write`] if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_generated_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CompileError::Write {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| CompileError::Write {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| CompileError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(path = %path.display(), bytes = content.len(), "Wrote generated file");
    Ok(())
}

/// Names of the top-level functions already defined in a source file.
///
/// A missing file has no functions.
pub fn scan_existing_handler_names(path: &Path) -> Result<BTreeSet<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(scan_handler_names(&text.lines().collect::<Vec<_>>())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No existing handler file");
            Ok(BTreeSet::new())
        }
        Err(source) => Err(CompileError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}
