pub mod check;
pub mod list;
pub mod run;

use std::path::Path;

use crate::config::HarnessConfig;
use crate::harness::SuiteSource;

/// The single file when given, otherwise the configured properties directory
pub fn suite_source(config: &HarnessConfig, file: Option<&Path>) -> SuiteSource {
    match file {
        Some(path) => SuiteSource::File(path.to_path_buf()),
        None => SuiteSource::Directory(config.properties_dir.clone()),
    }
}
