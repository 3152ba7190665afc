//! Loading a test suite from disk.
//!
//! Loading happens in two phases. First every file is parsed on its own; a
//! file that fails to parse becomes a setup error and the rest carry on.
//! Then collections are resolved against the parsed properties, which is
//! the only point where an unknown `PROP` name can be detected.

use log::{ debug, info, warn };
use std::collections::{ HashMap, HashSet };
use std::fs;
use std::path::{ Path, PathBuf };
use std::sync::Arc;

use crate::errors::{ HarnessError, HarnessResult };
use crate::implementations::annotation::parse_property;
use crate::implementations::collection::parse_collection;
use crate::models::case::{ definition_name, CaseKind, CollectionCase, PropertyCase };
use crate::models::model::Template;
use crate::models::report::{ SetupError, SuiteFile };

pub const PROPERTY_EXTENSION: &str = "mcf";
pub const COLLECTION_EXTENSION: &str = "mcf-pc";

/// Where the suite comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteSource {
    /// Every property and collection file in a directory
    Directory(PathBuf),
    /// A single property or collection file
    File(PathBuf),
}

/// A collection whose member names have been resolved
#[derive(Debug, Clone)]
pub struct ResolvedCollection {
    pub case: CollectionCase,
    pub members: Vec<Arc<PropertyCase>>,
}

/// One definition taking part in the run
#[derive(Debug, Clone)]
pub enum Definition {
    Property(Arc<PropertyCase>),
    Collection(ResolvedCollection),
}

impl Definition {
    pub fn path(&self) -> &Path {
        match self {
            Definition::Property(p) => &p.path,
            Definition::Collection(c) => &c.case.path,
        }
    }

    pub fn kind(&self) -> CaseKind {
        match self {
            Definition::Property(_) => CaseKind::Property,
            Definition::Collection(_) => CaseKind::Collection,
        }
    }

    pub fn case_count(&self) -> usize {
        match self {
            Definition::Property(p) => p.directives.len(),
            Definition::Collection(c) => c.case.directives.len(),
        }
    }
}

/// Parsed, resolved definitions in file order, plus the files that failed
#[derive(Debug, Clone, Default)]
pub struct Suite {
    pub definitions: Vec<Definition>,
    pub setup_errors: Vec<SetupError>,
}

impl Suite {
    pub fn files(&self) -> Vec<SuiteFile> {
        self.definitions
            .iter()
            .map(|d| SuiteFile {
                path: d.path().to_path_buf(),
                kind: d.kind(),
                cases: d.case_count(),
            })
            .collect()
    }

    pub fn case_count(&self) -> usize {
        self.definitions.iter().map(Definition::case_count).sum()
    }
}

fn file_kind(path: &Path) -> Option<CaseKind> {
    let name = path.file_name()?.to_str()?;
    if name.ends_with(&format!(".{}", COLLECTION_EXTENSION)) {
        Some(CaseKind::Collection)
    } else if name.ends_with(&format!(".{}", PROPERTY_EXTENSION)) {
        Some(CaseKind::Property)
    } else {
        None
    }
}

/// Property and collection files in `dir`, sorted by path
pub fn discover(dir: &Path) -> HarnessResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| HarnessError::io(dir, e))?.path();
        if path.is_file() && file_kind(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    debug!("Discovered {} file(s) in {}", files.len(), dir.display());
    Ok(files)
}

enum Parsed {
    Property(Arc<PropertyCase>),
    Collection(CollectionCase),
}

fn read(path: &Path) -> HarnessResult<String> {
    fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))
}

fn load_property(path: &Path, template: &Arc<Template>) -> HarnessResult<PropertyCase> {
    let definition = parse_property(path, &read(path)?)?;
    Ok(PropertyCase {
        name: definition_name(path),
        path: path.to_path_buf(),
        formula: definition.formula,
        template: Arc::clone(template),
        directives: definition.directives,
    })
}

fn load_collection(path: &Path) -> HarnessResult<CollectionCase> {
    let definition = parse_collection(path, &read(path)?)?;
    Ok(CollectionCase {
        name: definition_name(path),
        path: path.to_path_buf(),
        properties: definition.properties,
        directives: definition.directives,
    })
}

/// Load and resolve a suite.
///
/// Only usage problems (a missing directory or file, an unsupported file
/// type) are returned as errors. Problems inside a file end up in
/// `Suite::setup_errors`.
pub fn load_suite(source: &SuiteSource, template: Arc<Template>) -> HarnessResult<Suite> {
    let files = match source {
        SuiteSource::Directory(dir) => discover(dir)?,
        SuiteSource::File(path) => {
            if !path.is_file() {
                return Err(HarnessError::InvalidInput(format!("{} is not a file", path.display())));
            }
            if file_kind(path).is_none() {
                return Err(
                    HarnessError::InvalidInput(
                        format!(
                            "{} is neither a .{} nor a .{} file",
                            path.display(),
                            PROPERTY_EXTENSION,
                            COLLECTION_EXTENSION
                        )
                    )
                );
            }
            vec![path.clone()]
        }
    };

    let mut suite = Suite::default();
    let mut parsed = Vec::with_capacity(files.len());
    // Properties whose file exists but did not load; already reported.
    let mut failed: HashSet<String> = HashSet::new();
    for path in &files {
        let result = match file_kind(path) {
            Some(CaseKind::Property) =>
                load_property(path, &template).map(|p| Parsed::Property(Arc::new(p))),
            Some(CaseKind::Collection) => load_collection(path).map(Parsed::Collection),
            None => continue,
        };
        match result {
            Ok(definition) => parsed.push(definition),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                if file_kind(path) == Some(CaseKind::Property) {
                    failed.insert(definition_name(path));
                }
                suite.setup_errors.push(SetupError::from_error(path, &e));
            }
        }
    }

    let mut known: HashMap<String, Arc<PropertyCase>> = HashMap::new();
    for definition in &parsed {
        if let Parsed::Property(property) = definition {
            known.insert(property.name.clone(), Arc::clone(property));
        }
    }

    // A lone collection still needs the properties it names; load them
    // from its directory without running their own directives.
    if let SuiteSource::File(_) = source {
        load_referenced(&parsed, &template, &mut known, &mut failed, &mut suite.setup_errors);
    }

    for definition in parsed {
        match definition {
            Parsed::Property(property) => suite.definitions.push(Definition::Property(property)),
            Parsed::Collection(case) =>
                match resolve(&case, &known) {
                    Ok(members) =>
                        suite.definitions.push(
                            Definition::Collection(ResolvedCollection { case, members })
                        ),
                    Err(errors) => {
                        warn!("Skipping collection {}: not every member is available", case.path.display());
                        for e in errors {
                            if let HarnessError::UnknownProperty { name, .. } = &e {
                                if failed.contains(name) {
                                    continue;
                                }
                            }
                            warn!("{}: {}", case.path.display(), e);
                            suite.setup_errors.push(SetupError::from_error(&case.path, &e));
                        }
                    }
                }
        }
    }

    info!(
        "Loaded {} definition(s) with {} case(s), {} setup error(s)",
        suite.definitions.len(),
        suite.case_count(),
        suite.setup_errors.len()
    );
    Ok(suite)
}

fn load_referenced(
    parsed: &[Parsed],
    template: &Arc<Template>,
    known: &mut HashMap<String, Arc<PropertyCase>>,
    failed: &mut HashSet<String>,
    setup_errors: &mut Vec<SetupError>
) {
    for definition in parsed {
        let Parsed::Collection(case) = definition else {
            continue;
        };
        let dir = case.path.parent().unwrap_or_else(|| Path::new("."));
        for name in &case.properties {
            if known.contains_key(name) || failed.contains(name) {
                continue;
            }
            let path = dir.join(format!("{}.{}", name, PROPERTY_EXTENSION));
            if !path.is_file() {
                // Reported as an unknown property during resolution.
                continue;
            }
            match load_property(&path, template) {
                Ok(property) => {
                    debug!("Loaded referenced property {}", path.display());
                    known.insert(name.clone(), Arc::new(property));
                }
                Err(e) => {
                    warn!("Cannot load referenced property {}: {}", path.display(), e);
                    failed.insert(name.clone());
                    setup_errors.push(SetupError::from_error(&path, &e));
                }
            }
        }
    }
}

/// Resolve every member name of a collection; all unknown names are reported
pub fn resolve(
    case: &CollectionCase,
    known: &HashMap<String, Arc<PropertyCase>>
) -> Result<Vec<Arc<PropertyCase>>, Vec<HarnessError>> {
    let mut members = Vec::with_capacity(case.properties.len());
    let mut errors = Vec::new();
    for name in &case.properties {
        match known.get(name) {
            Some(property) => members.push(Arc::clone(property)),
            None =>
                errors.push(HarnessError::UnknownProperty {
                    collection: case.name.clone(),
                    name: name.clone(),
                }),
        }
    }
    if errors.is_empty() { Ok(members) } else { Err(errors) }
}
