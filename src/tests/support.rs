use async_trait::async_trait;
use std::collections::{ HashMap, HashSet };
use std::path::PathBuf;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use crate::errors::ToolFailure;
use crate::harness::suite::{ Definition, ResolvedCollection, Suite };
use crate::models::case::{ CollectionCase, PropertyCase };
use crate::models::directive::{ ExpectedVerdict, TraceDirective };
use crate::models::model::{ Model, Template };
use crate::models::verification::Verdict;
use crate::models::Trace;

pub const SCENARIO_1: &str = "[true*.c.!a*.b]false";
pub const SCENARIO_2: &str = "[!a*.b]false";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn trace(text: &str) -> Trace {
    text.parse().expect("valid trace")
}

/// Checker answering from a table keyed by (formula, trace)
#[derive(Default)]
pub struct ScriptedChecker {
    verdicts: HashMap<(String, String), Verdict>,
    broken_formulas: HashSet<String>,
    delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<(String, String)>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedChecker {
    /// The worked examples for the two scenario formulas
    pub fn scenarios() -> Self {
        Self::default()
            .with(SCENARIO_1, "c.a.b", Verdict::Holds)
            .with(SCENARIO_1, "b", Verdict::Holds)
            .with(SCENARIO_1, "a.b.c.b", Verdict::Violated)
            .with(SCENARIO_2, "c.a.b", Verdict::Holds)
            .with(SCENARIO_2, "b", Verdict::Violated)
            .with(SCENARIO_2, "a.b.c.b", Verdict::Holds)
    }

    pub fn with(mut self, formula: &str, trace: &str, verdict: Verdict) -> Self {
        self.verdicts.insert((formula.to_string(), trace.to_string()), verdict);
        self
    }

    /// Every evaluation of `formula` fails
    pub fn broken(mut self, formula: &str) -> Self {
        self.broken_formulas.insert(formula.to_string());
        self
    }

    /// Evaluations on `trace` take `delay`
    pub fn delayed(mut self, trace: &str, delay: Duration) -> Self {
        self.delays.insert(trace.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl crate::traits::model_checker::ModelChecker for ScriptedChecker {
    async fn evaluate(&self, formula: &str, model: &Model) -> Result<Verdict, ToolFailure> {
        let key = (formula.to_string(), model.trace.to_string());
        self.calls.lock().unwrap().push(key.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.delays.get(&key.1).copied().unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.broken_formulas.contains(formula) {
            return Err(ToolFailure::new("fake", format!("cannot check {}", formula)));
        }
        self.verdicts
            .get(&key)
            .copied()
            .ok_or_else(|| ToolFailure::new("fake", format!("no scripted verdict for {:?}", key)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn template() -> Arc<Template> {
    Arc::new(Template::from_text("test-template.mcrl2", "act a, b, c;\n"))
}

pub fn directives(entries: &[(ExpectedVerdict, &str)]) -> Vec<TraceDirective> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (expected, text))| TraceDirective::new(i + 2, *expected, trace(text)))
        .collect()
}

pub fn property(name: &str, formula: &str, entries: &[(ExpectedVerdict, &str)]) -> Arc<PropertyCase> {
    Arc::new(PropertyCase {
        name: name.to_string(),
        path: PathBuf::from(format!("properties/{}.mcf", name)),
        formula: formula.to_string(),
        template: template(),
        directives: directives(entries),
    })
}

pub fn collection(
    name: &str,
    members: &[Arc<PropertyCase>],
    entries: &[(ExpectedVerdict, &str)]
) -> Definition {
    Definition::Collection(ResolvedCollection {
        case: CollectionCase {
            name: name.to_string(),
            path: PathBuf::from(format!("properties/{}.mcf-pc", name)),
            properties: members.iter().map(|m| m.name.clone()).collect(),
            directives: directives(entries),
        },
        members: members.to_vec(),
    })
}

pub fn suite(definitions: Vec<Definition>) -> Suite {
    Suite { definitions, setup_errors: Vec::new() }
}

/// Property files for the three worked scenarios
pub const SCENARIO_1_FILE: &str =
    "[true*.c.!a*.b]false\n\n%! PASS c.a.b\n%! PASS b\n%! FAIL a.b.c.b\n";
pub const SCENARIO_2_FILE: &str =
    "[!a*.b]false\n%! PASS c.a.b\n%! FAIL b\n%! PASS a.b.c.b\n";
pub const SCENARIO_3_FILE: &str =
    "%! PROP scenario1\n%! PROP scenario2\n\n%! PASS c.a.b\n%! FAIL b\n%! FAIL a.b.c.b\n";
