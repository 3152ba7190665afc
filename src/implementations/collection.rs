use log::{ debug, warn };
use std::path::Path;

use crate::errors::{ HarnessError, HarnessResult };
use crate::implementations::annotation::{ parse_directive, trace_directive };
use crate::models::directive::{ Directive, TraceDirective };

/// A parsed property collection (`*.mcf-pc`), before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDefinition {
    /// Referenced property names in declaration order, deduplicated
    pub properties: Vec<String>,
    pub directives: Vec<TraceDirective>,
}

/// Parse a collection definition.
///
/// Lines that are not directives are comments and are skipped. Whether the
/// referenced names exist is checked later, once every file has been parsed.
pub fn parse_collection(path: &Path, text: &str) -> HarnessResult<CollectionDefinition> {
    let mut properties: Vec<String> = Vec::new();
    let mut directives = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        match parse_directive(line) {
            None => {}
            Some(Err(reason)) => {
                return Err(HarnessError::malformed(path, line_no, reason));
            }
            Some(Ok(Directive::PropRef(name))) => {
                if properties.contains(&name) {
                    warn!("{}:{}: property `{}` listed twice, ignoring", path.display(), line_no, name);
                } else {
                    properties.push(name);
                }
            }
            Some(Ok(directive)) => {
                directives.extend(trace_directive(line_no, directive));
            }
        }
    }

    if properties.is_empty() && !directives.is_empty() {
        return Err(HarnessError::malformed(path, 1, "collection has test directives but no PROP entries"));
    }

    debug!(
        "Parsed {}: {} propert(ies), {} directive(s)",
        path.display(),
        properties.len(),
        directives.len()
    );
    Ok(CollectionDefinition { properties, directives })
}
