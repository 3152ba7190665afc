use crate::models::model::{ Model, Template };
use crate::models::trace::Trace;

/// mCRL2 process that performs no action at all
pub const EMPTY_PROCESS: &str = "delta";

/// The `init` process for a trace: its actions in sequence, then nothing.
///
/// No loop and no trailing behavior is added, so `a.b` and `a.b.c` give
/// models with different behavior.
pub fn init_process(trace: &Trace) -> String {
    if trace.is_empty() {
        return EMPTY_PROCESS.to_string();
    }
    trace.actions().join(" . ")
}

/// Splice a trace into a template, producing a checkable model
pub fn instantiate(template: &Template, trace: &Trace) -> Model {
    let mut text = String::with_capacity(template.text.len() + 16 + trace.len() * 8);
    text.push_str(&template.text);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&format!("init {};\n", init_process(trace)));
    Model { text, trace: trace.clone() }
}
