//! Handler kit files.
//!
//! A kit file holds the hand-written handler functions of one group
//! (`app/api/<group>/<group>_kit.go`). The compiler never writes it; it reads
//! it to learn which handlers already exist and which response keys each
//! handler fills in:
//!
//! ```go
//! func CreateApi(req *ReqUserCreate) (resp map[string]interface{}, err error) {
//!     resp["id"] = user.Id        // int new id
//!     resp["items"] = items       // @[]Item list of items
//!     resp[keyOwner] = owner      // object=Owner the owner
//! }
//! ```
//!
//! Files are parsed at most once per [`KitCache`], which is created for one
//! compile run and passed explicitly to whatever needs it.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use apimodel_define::ident::is_valid_identifier;
use apimodel_define::{ARRAY_MARKER, Endpoint, Group};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Dialect;
use crate::errors::{CompileError, Result};

/// Value type recorded when a response comment names none.
pub const DEFAULT_VALUE_TYPE: &str = "object";

const VALUE_TYPES: &[&str] = &["int", "num", "number", "float", "bool", "string", "str"];

/// One `resp[...] = ...` assignment inside a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitResponse {
    /// Response key.
    pub name: String,
    /// Whether the `@`/`object=` type was written with `[]`.
    pub is_array: bool,
    /// Scalar type from the comment, `object` when none was given.
    pub value_type: String,
    /// Object type name from `@Obj` or `object=Obj`, empty otherwise.
    pub type_object: String,
    pub comment: String,
}

/// A handler function with the responses it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitFunction {
    pub name: String,
    pub responses: Vec<KitResponse>,
}

/// Parsed contents of one kit file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitFile {
    functions: BTreeMap<String, KitFunction>,
    handlers: BTreeSet<String>,
}

impl KitFile {
    /// Parses kit source lines.
    ///
    /// Only `func` lines containing `Api(req` open a handler; its responses
    /// are collected until a line starting with `}`.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut kit = Self {
            handlers: scan_handler_names(lines),
            ..Self::default()
        };
        let mut current: Option<KitFunction> = None;

        for line in lines.iter().map(AsRef::as_ref) {
            if line.starts_with("func") && line.contains("Api(req") {
                if let Some(name) = func_name(line) {
                    current = Some(KitFunction {
                        name: name.to_string(),
                        responses: Vec::new(),
                    });
                }
                continue;
            }
            if line.starts_with('}') {
                if let Some(function) = current.take() {
                    kit.functions.insert(function.name.clone(), function);
                }
                continue;
            }
            if let Some(function) = current.as_mut()
                && let Some(response) = parse_response(line.trim())
            {
                function.responses.push(response);
            }
        }
        kit
    }

    /// Whether the file defines a top-level function with this name.
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains(name)
    }

    pub fn function(&self, name: &str) -> Option<&KitFunction> {
        self.functions.get(name)
    }

    /// Responses declared by a handler; empty when the handler is unknown.
    pub fn responses(&self, handler: &str) -> &[KitResponse] {
        self.function(handler)
            .map(|function| function.responses.as_slice())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Names of every top-level function (`func Name(`), methods excluded.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::kit::scan_handler_names;
///
/// let names = scan_handler_names(&[
///     "func LoginApi(req *ReqUserLogin) (resp Resp, err error) {",
///     "func (s *Service) helper() {",
///     "func init() {",
/// ]);
/// assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["LoginApi", "init"]);
/// ```
pub fn scan_handler_names<S: AsRef<str>>(lines: &[S]) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| func_name(line.as_ref()))
        .map(str::to_string)
        .collect()
}

fn func_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("func ")?.trim_start();
    let name = rest[..rest.find('(')?].trim();
    is_valid_identifier(name).then_some(name)
}

fn parse_response(line: &str) -> Option<KitResponse> {
    let rest = line.strip_prefix("resp[")?;
    let name = match rest.strip_prefix('"') {
        Some(quoted) => &quoted[..quoted.find("\"]")?],
        None => &rest[..rest.find(']')?],
    };

    let mut response = KitResponse {
        name: name.to_string(),
        is_array: false,
        value_type: DEFAULT_VALUE_TYPE.to_string(),
        type_object: String::new(),
        comment: String::new(),
    };

    let Some(idx) = line.rfind("//") else {
        return Some(response);
    };
    let comment = line[idx + 2..].trim();
    let (head, tail) = match comment.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (comment, ""),
    };

    let object = head
        .strip_prefix('@')
        .or_else(|| head.strip_prefix("object="));
    if let Some(object) = object {
        let (object, is_array) = match object.strip_prefix(ARRAY_MARKER) {
            Some(element) => (element, true),
            None => (object, false),
        };
        response.type_object = object.to_string();
        response.is_array = is_array;
        response.comment = tail.to_string();
    } else if !tail.is_empty() {
        response.value_type = head.to_string();
        response.comment = tail.to_string();
    } else if VALUE_TYPES.contains(&head) {
        response.value_type = head.to_string();
    } else {
        response.comment = head.to_string();
    }
    Some(response)
}

/// Where kit files live for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitLayout {
    pub dialect: Dialect,
    /// Go module directory holding `app/` (V4 only; V1 always uses `gopher`).
    pub module: String,
    /// Directory the layout is resolved against.
    pub root: PathBuf,
}

impl Default for KitLayout {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            module: "gopher".to_string(),
            root: PathBuf::from("."),
        }
    }
}

impl KitLayout {
    pub fn new(dialect: Dialect, module: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            dialect,
            module: module.into(),
            root: root.into(),
        }
    }

    /// Path of a group's kit file.
    pub fn kit_path(&self, group: &str) -> PathBuf {
        let module = match self.dialect {
            Dialect::V1 => "gopher",
            Dialect::V4 => self.module.as_str(),
        };
        self.root
            .join(module)
            .join("app")
            .join("api")
            .join(group)
            .join(format!("{group}_kit.go"))
    }
}

/// Source of kit file contents.
pub trait SourceReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads kit files from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Memoized kit files, keyed by path.
#[derive(Debug, Default)]
pub struct KitCache<R: SourceReader = FsReader> {
    reader: R,
    files: BTreeMap<PathBuf, KitFile>,
    reads: usize,
}

impl KitCache<FsReader> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SourceReader> KitCache<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            files: BTreeMap::new(),
            reads: 0,
        }
    }

    /// Returns the parsed kit at `path`, reading it on first use.
    ///
    /// A missing file is cached as an empty kit.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn get(&mut self, path: &Path) -> Result<&KitFile> {
        match self.files.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                debug!("Kit cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!("Kit cache miss");
                self.reads += 1;
                let kit = match self.reader.read_to_string(path) {
                    Ok(text) => KitFile::parse(&text.lines().collect::<Vec<_>>()),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        debug!("Kit file not found, treating as empty");
                        KitFile::default()
                    }
                    Err(source) => {
                        return Err(CompileError::Read {
                            path: path.display().to_string(),
                            source,
                        });
                    }
                };
                Ok(entry.insert(kit))
            }
        }
    }

    /// Number of files actually read.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Responses an endpoint's handler declares in its group kit file.
pub fn declared_responses<R: SourceReader>(
    endpoint: &Endpoint,
    cache: &mut KitCache<R>,
    layout: &KitLayout,
) -> Result<Vec<KitResponse>> {
    let kit = cache.get(&layout.kit_path(&endpoint.group))?;
    Ok(kit.responses(&endpoint.handler_name()).to_vec())
}

/// Endpoints of a group whose handler is not in the kit file yet.
///
/// These are the handlers a stub generator still has to write.
pub fn missing_handlers<'g, R: SourceReader>(
    group: &'g Group,
    cache: &mut KitCache<R>,
    layout: &KitLayout,
) -> Result<Vec<&'g Endpoint>> {
    let kit = cache.get(&layout.kit_path(&group.name))?;
    Ok(group
        .endpoints
        .iter()
        .filter(|endpoint| !kit.has_handler(&endpoint.handler_name()))
        .collect())
}
