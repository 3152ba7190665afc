//! Directive grammar and the property (`*.mcf`) parser.
//!
//! A directive line is the marker `%!` followed by a keyword and an argument:
//!
//! ```text
//! %! PASS c.a.b
//! %! FAIL b
//! %! PASS
//! %! PROP some_property
//! ```
//!
//! `%` starts a comment in mCRL2, so annotated files stay valid formula files.

use log::{ debug, warn };
use std::path::Path;

use crate::errors::{ HarnessError, HarnessResult };
use crate::models::directive::{ Directive, ExpectedVerdict, TraceDirective };
use crate::models::trace::Trace;

pub const DIRECTIVE_MARKER: &str = "%!";

/// A parsed property file, before it is bound to a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub formula: String,
    pub directives: Vec<TraceDirective>,
}

/// Parse a single line as a directive.
///
/// Returns `None` for lines that are not directives, and `Some(Err(reason))`
/// for directive lines that do not follow the grammar.
pub fn parse_directive(line: &str) -> Option<Result<Directive, String>> {
    let rest = line.trim_start().strip_prefix(DIRECTIVE_MARKER)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        warn!("`{}` has no space after `{}`; treated as a comment", line.trim(), DIRECTIVE_MARKER);
        return None;
    }

    let rest = rest.trim();
    let (keyword, argument) = match rest.split_once(char::is_whitespace) {
        Some((keyword, argument)) => (keyword, argument.trim()),
        None => (rest, ""),
    };

    Some(match keyword {
        "PASS" => parse_trace(argument).map(Directive::PassTrace),
        "FAIL" => parse_trace(argument).map(Directive::FailTrace),
        "PROP" => parse_prop_name(argument).map(Directive::PropRef),
        "" => Err("directive marker without a keyword".to_string()),
        other => Err(format!("unknown directive `{}` (expected PASS, FAIL or PROP)", other)),
    })
}

fn parse_trace(argument: &str) -> Result<Trace, String> {
    argument.parse::<Trace>().map_err(|e| format!("invalid trace `{}`: {}", argument, e))
}

fn parse_prop_name(argument: &str) -> Result<String, String> {
    if argument.is_empty() {
        return Err("PROP directive without a property name".to_string());
    }
    if argument.chars().any(char::is_whitespace) {
        return Err(format!("property name `{}` contains whitespace", argument));
    }
    Ok(argument.to_string())
}

/// Turn a PASS/FAIL directive into the form test cases hold
pub(crate) fn trace_directive(line: usize, directive: Directive) -> Option<TraceDirective> {
    match directive {
        Directive::PassTrace(trace) => Some(TraceDirective::new(line, ExpectedVerdict::Pass, trace)),
        Directive::FailTrace(trace) => Some(TraceDirective::new(line, ExpectedVerdict::Fail, trace)),
        Directive::PropRef(_) => None,
    }
}

/// Parse a property definition into its formula and test directives.
///
/// Every line that is neither blank nor a directive belongs to the formula.
pub fn parse_property(path: &Path, text: &str) -> HarnessResult<PropertyDefinition> {
    let mut formula_lines = Vec::new();
    let mut directives = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        match parse_directive(line) {
            None => {
                if !line.trim().is_empty() {
                    formula_lines.push(line.trim_end());
                }
            }
            Some(Err(reason)) => {
                return Err(HarnessError::malformed(path, line_no, reason));
            }
            Some(Ok(Directive::PropRef(name))) => {
                return Err(
                    HarnessError::malformed(
                        path,
                        line_no,
                        format!("PROP {} is only allowed in a property collection", name)
                    )
                );
            }
            Some(Ok(directive)) => {
                directives.extend(trace_directive(line_no, directive));
            }
        }
    }

    if formula_lines.is_empty() {
        return Err(HarnessError::malformed(path, 1, "property file contains no formula"));
    }

    debug!("Parsed {}: {} directive(s)", path.display(), directives.len());
    Ok(PropertyDefinition { formula: formula_lines.join("\n"), directives })
}
