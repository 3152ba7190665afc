use log::{ debug, warn };
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::errors::ToolFailure;
use crate::implementations::instantiator::instantiate;
use crate::models::case::PropertyCase;
use crate::models::model::Model;
use crate::models::trace::Trace;
use crate::models::verification::Verdict;
use crate::traits::model_checker::ModelChecker;

/// Runs (formula, model) pairs through the checker, at most `jobs` at a time.
///
/// Cloning is cheap and clones share the same permit pool.
#[derive(Clone)]
pub struct VerificationDriver {
    checker: Arc<dyn ModelChecker>,
    permits: Arc<Semaphore>,
    jobs: usize,
}

impl VerificationDriver {
    pub fn new(checker: Arc<dyn ModelChecker>, jobs: usize) -> Self {
        let jobs = jobs.max(1);
        Self { checker, permits: Arc::new(Semaphore::new(jobs)), jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn checker_name(&self) -> &str {
        self.checker.name()
    }

    pub async fn verify(&self, formula: &str, model: &Model) -> Result<Verdict, ToolFailure> {
        let _permit = self.permits
            .acquire().await
            .map_err(|_| ToolFailure::new(self.checker.name(), "worker pool closed"))?;

        debug!("Checking trace `{}` with {}", model.trace.describe(), self.checker.name());
        let result = self.checker.evaluate(formula, model).await;
        match &result {
            Ok(verdict) => debug!("Trace `{}`: formula {}", model.trace.describe(), verdict),
            Err(failure) => warn!("Trace `{}`: {}", model.trace.describe(), failure),
        }
        result
    }

    /// Instantiate the property's template with `trace` and check its formula
    pub async fn verify_property(
        &self,
        property: &PropertyCase,
        trace: &Trace
    ) -> Result<Verdict, ToolFailure> {
        let model = instantiate(&property.template, trace);
        self.verify(&property.formula, &model).await
    }
}
