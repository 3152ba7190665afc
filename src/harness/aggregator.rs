use chrono::Utc;
use log::{ error, info, warn };
use std::future::Future;
use std::sync::Arc;
use std::time::{ Duration, Instant };
use tokio::task::JoinSet;

use crate::errors::ToolFailure;
use crate::harness::conjunction::evaluate_conjunction;
use crate::harness::driver::VerificationDriver;
use crate::harness::suite::{ Definition, Suite };
use crate::models::case::{ CaseId, PropertyCase };
use crate::models::directive::TraceDirective;
use crate::models::report::{ RunReport, Summary };
use crate::models::verification::{ Outcome, TestResult };

/// One directive to execute
#[derive(Debug, Clone)]
pub struct Job {
    pub id: CaseId,
    pub directive: TraceDirective,
    pub target: JobTarget,
}

#[derive(Debug, Clone)]
pub enum JobTarget {
    Property(Arc<PropertyCase>),
    Collection(Arc<[Arc<PropertyCase>]>),
}

/// Expand a suite into jobs, in reporting order
pub fn plan(suite: &Suite) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(suite.case_count());
    for (definition_index, definition) in suite.definitions.iter().enumerate() {
        match definition {
            Definition::Property(property) => {
                for (directive_index, directive) in property.directives.iter().enumerate() {
                    jobs.push(Job {
                        id: CaseId {
                            kind: definition.kind(),
                            name: property.name.clone(),
                            path: property.path.clone(),
                            line: directive.line,
                            definition_index,
                            directive_index,
                        },
                        directive: directive.clone(),
                        target: JobTarget::Property(Arc::clone(property)),
                    });
                }
            }
            Definition::Collection(collection) => {
                let members: Arc<[Arc<PropertyCase>]> = collection.members.clone().into();
                for (directive_index, directive) in collection.case.directives.iter().enumerate() {
                    jobs.push(Job {
                        id: CaseId {
                            kind: definition.kind(),
                            name: collection.case.name.clone(),
                            path: collection.case.path.clone(),
                            line: directive.line,
                            definition_index,
                            directive_index,
                        },
                        directive: directive.clone(),
                        target: JobTarget::Collection(Arc::clone(&members)),
                    });
                }
            }
        }
    }
    jobs
}

/// Execute one job and compare against its expectation
pub async fn execute(driver: &VerificationDriver, job: Job) -> TestResult {
    let started = Instant::now();
    let trace = job.directive.trace;
    let (outcome, members) = match &job.target {
        JobTarget::Property(property) => {
            let outcome: Outcome = driver.verify_property(property, &trace).await.into();
            (outcome, Vec::new())
        }
        JobTarget::Collection(members) => {
            let conjunction = evaluate_conjunction(driver, members, &trace).await;
            (conjunction.outcome, conjunction.members)
        }
    };

    let result = TestResult::new(
        job.id,
        trace,
        job.directive.expected,
        outcome,
        members,
        started.elapsed()
    );
    if let Some(e) = result.to_error() {
        info!("{}", e);
    }
    result
}

/// Runs every case of a suite and folds the results into a report
pub struct Aggregator {
    driver: VerificationDriver,
}

impl Aggregator {
    pub fn new(driver: VerificationDriver) -> Self {
        Self { driver }
    }

    pub async fn run(&self, suite: &Suite) -> RunReport {
        self.run_until(suite, std::future::pending::<()>(), |_| {}).await
    }

    /// Run until every case finished or `shutdown` resolves.
    ///
    /// On shutdown the in-flight cases are aborted (which kills their child
    /// processes) and the report holds the cases that had completed.
    /// `on_result` sees results in completion order.
    pub async fn run_until<F, P>(&self, suite: &Suite, shutdown: F, mut on_result: P) -> RunReport
        where F: Future<Output = ()>, P: FnMut(&TestResult)
    {
        let started_at = Utc::now();
        let jobs = plan(suite);
        info!("Running {} case(s) with up to {} concurrent check(s)", jobs.len(), self.driver.jobs());

        let mut pending: Vec<Option<Job>> = jobs.iter().cloned().map(Some).collect();
        let mut tasks = JoinSet::new();
        for (index, job) in jobs.into_iter().enumerate() {
            let driver = self.driver.clone();
            tasks.spawn(async move { (index, execute(&driver, job).await) });
        }

        let mut results = Vec::with_capacity(pending.len());
        let mut aborted = false;
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    Some(Ok((index, result))) => {
                        pending[index] = None;
                        on_result(&result);
                        results.push(result);
                    }
                    Some(Err(e)) => error!("Case task did not complete: {}", e),
                    None => break,
                },
                _ = &mut shutdown => {
                    warn!("Run aborted, stopping {} in-flight case(s)", tasks.len());
                    tasks.abort_all();
                    aborted = true;
                    break;
                }
            }
        }
        while tasks.join_next().await.is_some() {}

        if !aborted {
            // A task that panicked left no result behind.
            for job in pending.into_iter().flatten() {
                let failure = ToolFailure::new(self.driver.checker_name(), "case evaluation panicked");
                let result = TestResult::new(
                    job.id,
                    job.directive.trace,
                    job.directive.expected,
                    Outcome::ToolFailure { failure },
                    Vec::new(),
                    Duration::ZERO
                );
                on_result(&result);
                results.push(result);
            }
        }

        results.sort_by_key(|r| r.id.sort_key());
        let summary = Summary::tally(&results, suite.setup_errors.len());
        info!(
            "Finished: {} total, {} matched, {} mismatched, {} tool failure(s)",
            summary.total,
            summary.matches,
            summary.mismatches,
            summary.tool_failures
        );

        RunReport {
            started_at,
            files: suite.files(),
            results,
            setup_errors: suite.setup_errors.clone(),
            summary,
            aborted,
        }
    }
}
