//! Execution interface for IR consumers.
//!
//! The compiler never executes anything; adapters (robot queue executors,
//! network streamers, simulators, recorders) receive the optimized IR list
//! together with an [`ExecutionContext`] and drive their target however
//! they see fit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ir::{CompilationResult, IrOp};

/// Script metadata handed to adapters alongside the IR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub script_name: String,
    pub script_description: String,
    pub source_file_path: Option<PathBuf>,
}

impl ExecutionContext {
    /// Builds a context from a compilation result.
    pub fn from_result(result: &CompilationResult) -> Self {
        Self {
            script_name: result.name.clone(),
            script_description: result.description.clone(),
            source_file_path: result.source_file_path.clone(),
        }
    }
}

/// An IR executor.
pub trait ExecutionAdapter {
    type Output;
    type Error;

    /// Executes the IR list against the adapter's target.
    fn execute(
        &mut self,
        ir: &[IrOp],
        context: &ExecutionContext,
    ) -> Result<Self::Output, Self::Error>;
}
