//! Compilation driver and public facade.
//!
//! Threads source text through lexing, parsing, semantic analysis, and
//! optimization, and wraps everything in a [`CompilationResult`].
//! Diagnostics from all phases accumulate; every phase always runs because
//! each one produces a usable artifact even after upstream errors. The
//! compiler is pure: no global state, no caching, nothing shared between
//! calls.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Diagnostic, Severity};
use crate::ir::CompilationResult;
use crate::{lexer, optimizer, parser, semantic};

/// Script name used when the caller supplies none.
const DEFAULT_SCRIPT_NAME: &str = "rmscript_tool";

/// Compiles rmscript source text.
///
/// `name` overrides the script name recorded in the result; pass `None`
/// for the default.
pub fn compile_script(source: &str, name: Option<&str>) -> CompilationResult {
    let script_name = name
        .filter(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_SCRIPT_NAME);

    debug!("stage 1: lexical analysis");
    let (tokens, lex_diagnostics) = lexer::tokenize(source);
    debug!(tokens = tokens.len(), "token stream produced");

    debug!("stage 2: parsing");
    let (mut program, parse_diagnostics) = parser::parse(&tokens);
    program.name = script_name.to_string();

    debug!("stage 3: semantic analysis");
    let (ir, semantic_diagnostics) = semantic::analyze(&program);
    debug!(entries = ir.len(), "IR produced");

    debug!("stage 4: optimization");
    let optimized = optimizer::optimize(&ir);
    debug!(before = ir.len(), after = optimized.len(), "optimizer done");

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for diagnostic in lex_diagnostics
        .into_iter()
        .chain(parse_diagnostics)
        .chain(semantic_diagnostics)
    {
        match diagnostic.severity {
            Severity::Error => errors.push(diagnostic),
            Severity::Warning => warnings.push(diagnostic),
        }
    }

    let success = errors.is_empty();
    if success {
        info!(name = %program.name, warnings = warnings.len(), "compilation succeeded");
    } else {
        warn!(name = %program.name, errors = errors.len(), "compilation failed");
    }

    CompilationResult {
        name: program.name,
        description: program.description.unwrap_or_default(),
        success,
        errors,
        warnings,
        source_code: source.to_string(),
        source_file_path: None,
        ir: optimized,
    }
}

/// Compiles a script file. The script name is the filename stem with
/// spaces replaced by underscores; `source_file_path` records the absolute
/// path. Read failures become a failed result, not an `Err`.
pub fn compile_file(path: impl AsRef<Path>) -> CompilationResult {
    let path = path.as_ref();
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            warn!(path = %path.display(), "failed to read script file");
            return CompilationResult {
                name: String::new(),
                description: String::new(),
                success: false,
                errors: vec![Diagnostic::error(
                    0,
                    0,
                    format!("Failed to read file {}: {}", path.display(), err),
                )],
                warnings: Vec::new(),
                source_code: String::new(),
                source_file_path: None,
                ir: Vec::new(),
            };
        }
    };

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.replace(' ', "_"))
        .unwrap_or_else(|| DEFAULT_SCRIPT_NAME.to_string());

    let mut result = compile_script(&source, Some(&name));
    result.source_file_path = Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));
    result
}

/// Verifies source without keeping the IR: `(success, messages)` where
/// messages are formatted errors followed by warnings.
pub fn verify_script(source: &str) -> (bool, Vec<String>) {
    let result = compile_script(source, None);
    let messages = result
        .errors
        .iter()
        .chain(result.warnings.iter())
        .map(ToString::to_string)
        .collect();
    (result.success, messages)
}
