//! # rmscript compiler
//!
//! Compiler front-end for rmscript, a small scripting language for short
//! robot behaviors: head orientation, body rotation, antennas, head
//! translation, tilt, waits, sound playback, picture capture, and bounded
//! repetition.
//!
//! ## Pipeline
//!
//! ```text
//! source text
//!     ↓ lexer      — tokens with significant indentation
//!     ↓ parser     — AST, per-keyword direction validation, `and` chains
//!     ↓ semantic   — defaults, qualitative strengths, limit warnings,
//!                    pose matrices, repeat expansion, statement merging
//!     ↓ optimizer  — wait merging, no-op removal
//! CompilationResult { ir, errors, warnings, … }
//! ```
//!
//! Compilation is pure: `(source, optional name) → CompilationResult`,
//! no process-wide state, no caching, fully deterministic. Diagnostics
//! accumulate across phases; `success` is true exactly when there are no
//! errors. Execution is out of scope — adapters implementing
//! [`ExecutionAdapter`] consume the IR.
//!
//! ## Usage
//!
//! ```
//! let result = rmscript::compile_script("look left\nwait 1s", None);
//! assert!(result.success);
//! assert_eq!(result.ir.len(), 2);
//! ```

pub mod adapter;
pub mod ast;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod optimizer;
pub mod parser;
pub mod semantic;

mod compiler;

pub use adapter::{ExecutionAdapter, ExecutionContext};
pub use compiler::{compile_file, compile_script, verify_script};
pub use error::{Diagnostic, Severity};
pub use ir::{
    CompilationResult, Interp, IrLoopSound, IrMovement, IrOp, IrPicture, IrPlaySound, IrWait,
    PlayMode,
};
pub use semantic::head_pose;

/// Compiler version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
