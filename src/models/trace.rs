use serde::{ Serialize, Serializer };
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between actions in the textual form of a trace
pub const ACTION_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceParseError {
    #[error("empty action name at position {position} (stray `.`?)")]
    EmptyAction { position: usize },

    #[error("action name `{action}` contains whitespace")]
    Whitespace { action: String },

    #[error("action `{action}` must be a name with an optional argument list")]
    InvalidAction { action: String },

    #[error("unbalanced parentheses in `{action}`")]
    UnbalancedParens { action: String },
}

/// A finite, ordered sequence of actions; one example execution.
///
/// The textual form is dot-delimited (`c.a.b`). An action may carry data
/// arguments (`send(1, true)`); dots and whitespace inside the parentheses
/// belong to the action. The empty string is the empty trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Trace {
    actions: Vec<String>,
}

impl Trace {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Rendering for reports, where an empty string would be invisible
    pub fn describe(&self) -> String {
        if self.is_empty() { "ε".to_string() } else { self.to_string() }
    }
}

/// Split on separators outside parentheses
fn split_top_level(s: &str) -> Result<Vec<&str>, TraceParseError> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TraceParseError::UnbalancedParens { action: s[start..].trim().to_string() })?;
            }
            ACTION_SEPARATOR if depth == 0 => {
                tokens.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TraceParseError::UnbalancedParens { action: s[start..].trim().to_string() });
    }
    tokens.push(&s[start..]);
    Ok(tokens)
}

fn check_action(action: &str) -> Result<(), TraceParseError> {
    let name = match action.find('(') {
        Some(open) if action.ends_with(')') => &action[..open],
        Some(_) => {
            return Err(TraceParseError::InvalidAction { action: action.to_string() });
        }
        None => action,
    };
    if name.trim().is_empty() {
        return Err(TraceParseError::InvalidAction { action: action.to_string() });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TraceParseError::Whitespace { action: action.to_string() });
    }
    Ok(())
}

impl FromStr for Trace {
    type Err = TraceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Trace::empty());
        }

        let mut actions = Vec::new();
        for (position, token) in split_top_level(s)?.into_iter().enumerate() {
            let action = token.trim();
            if action.is_empty() {
                return Err(TraceParseError::EmptyAction { position });
            }
            check_action(action)?;
            actions.push(action.to_string());
        }
        Ok(Trace { actions })
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for action in &self.actions {
            if !first {
                write!(f, "{}", ACTION_SEPARATOR)?;
            }
            write!(f, "{}", action)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
