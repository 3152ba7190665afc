//! `ModelChecker` backed by the mCRL2 command line tools.
//!
//! Each evaluation runs the pipeline
//! `mcrl22lps` → `lps2pbes --formula` → `pbessolve` inside its own
//! temporary directory, so concurrent evaluations never share files.

use async_trait::async_trait;
use log::{ debug, trace };
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::ToolsConfig;
use crate::errors::ToolFailure;
use crate::models::model::Model;
use crate::models::verification::Verdict;
use crate::traits::model_checker::{ ModelChecker, ToolBackend, ToolStatus };

const MODEL_FILE: &str = "model.mcrl2";
const FORMULA_FILE: &str = "formula.mcf";
const LPS_FILE: &str = "model.lps";
const PBES_FILE: &str = "model.pbes";

#[derive(Debug, Clone)]
pub struct Mcrl2Checker {
    tools: ToolsConfig,
}

impl Mcrl2Checker {
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    /// Interpret `pbessolve` output
    pub fn parse_verdict(stdout: &str) -> Result<Verdict, ToolFailure> {
        match stdout.trim() {
            "true" => Ok(Verdict::Holds),
            "false" => Ok(Verdict::Violated),
            other =>
                Err(
                    ToolFailure::new(
                        "pbessolve",
                        format!("unexpected output, expected `true` or `false`: {:?}", other)
                    )
                ),
        }
    }

    /// Run one tool to completion in `workdir` and return its stdout
    async fn run_tool(&self, tool: &str, args: &[&str], workdir: &Path) -> Result<String, ToolFailure> {
        let program = self.tools.resolve(tool);
        debug!("Running {} {}", program.display(), args.join(" "));

        let child = Command::new(&program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ToolFailure::new(tool, format!("failed to start {}: {}", program.display(), e))
            })?;

        // On timeout the child is dropped here and killed.
        let output = match timeout(self.tools.timeout(), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ToolFailure::new(tool, format!("failed to collect output: {}", e)));
            }
            Err(_) => {
                return Err(
                    ToolFailure::new(tool, format!("timed out after {}s", self.tools.timeout_secs))
                );
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolFailure::new(tool, format!("{}: {}", output.status, stderr.trim())));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("{} stdout: {}", tool, stdout.trim_end());
        Ok(stdout)
    }
}

#[async_trait]
impl ModelChecker for Mcrl2Checker {
    async fn evaluate(&self, formula: &str, model: &Model) -> Result<Verdict, ToolFailure> {
        let workspace = tempfile::Builder::new()
            .prefix("mcftest-")
            .tempdir()
            .map_err(|e| ToolFailure::new("workspace", format!("cannot create temp dir: {}", e)))?;
        let dir = workspace.path();

        tokio::fs::write(dir.join(MODEL_FILE), &model.text).await
            .map_err(|e| ToolFailure::new("workspace", format!("cannot write model: {}", e)))?;
        tokio::fs::write(dir.join(FORMULA_FILE), formula).await
            .map_err(|e| ToolFailure::new("workspace", format!("cannot write formula: {}", e)))?;

        let formula_arg = format!("--formula={}", FORMULA_FILE);
        self.run_tool(&self.tools.mcrl22lps, &[MODEL_FILE, LPS_FILE], dir).await?;
        self.run_tool(&self.tools.lps2pbes, &[formula_arg.as_str(), LPS_FILE, PBES_FILE], dir).await?;
        let stdout = self.run_tool(&self.tools.pbessolve, &[PBES_FILE], dir).await?;

        Self::parse_verdict(&stdout)
    }

    fn name(&self) -> &str {
        "mcrl2"
    }
}

#[async_trait]
impl ToolBackend for Mcrl2Checker {
    async fn check_tools(&self) -> Vec<ToolStatus> {
        let workdir = std::env::temp_dir();
        let mut statuses = Vec::new();
        for tool in [&self.tools.mcrl22lps, &self.tools.lps2pbes, &self.tools.pbessolve] {
            let command = self.tools.resolve(tool).display().to_string();
            let status = match self.run_tool(tool, &["--version"], &workdir).await {
                Ok(stdout) =>
                    ToolStatus {
                        tool: tool.clone(),
                        command,
                        detail: stdout.lines().next().unwrap_or("").trim().to_string(),
                        available: true,
                    },
                Err(failure) =>
                    ToolStatus {
                        tool: tool.clone(),
                        command,
                        detail: failure.detail,
                        available: false,
                    },
            };
            statuses.push(status);
        }
        statuses
    }
}
