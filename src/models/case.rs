use serde::Serialize;
use std::path::{ Path, PathBuf };
use std::sync::Arc;

use crate::models::directive::TraceDirective;
use crate::models::model::Template;

/// A property definition: a formula plus the traces it is tested against
#[derive(Debug, Clone)]
pub struct PropertyCase {
    /// File stem, the name collections refer to
    pub name: String,
    pub path: PathBuf,
    /// Formula text, passed verbatim to the checker
    pub formula: String,
    pub template: Arc<Template>,
    pub directives: Vec<TraceDirective>,
}

/// A named group of properties tested as a conjunction
#[derive(Debug, Clone)]
pub struct CollectionCase {
    pub name: String,
    pub path: PathBuf,
    /// Referenced property names, in declaration order, without duplicates
    pub properties: Vec<String>,
    pub directives: Vec<TraceDirective>,
}

/// Which kind of definition a case came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Property,
    Collection,
}

/// Stable identity of one executed directive.
///
/// Ordering is (definition index, directive index), which is the order
/// results are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CaseId {
    pub kind: CaseKind,
    pub name: String,
    pub path: PathBuf,
    pub line: usize,
    pub definition_index: usize,
    pub directive_index: usize,
}

impl CaseId {
    pub fn sort_key(&self) -> (usize, usize) {
        (self.definition_index, self.directive_index)
    }

    pub fn location(&self) -> String {
        format!("{}:{}", self.path.display(), self.line)
    }
}

/// Name a definition file is referred to by
pub fn definition_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
