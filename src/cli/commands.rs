//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use crate::frontend::context::Context;
use crate::frontend::lexer::{Lexer, TokenKind};
use crate::frontend::source::{FileId, SourceMap};
use crate::frontend::{CompilationUnit, compile_file, json};

use super::{CliError, CliResult, CompileOptions, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during compilation.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file with a size check.
///
/// ## Errors
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Read `file_path` into a fresh [`SourceMap`].
fn load(file_path: &str) -> CliResult<(SourceMap, FileId)> {
    let source = read_source(file_path)?;
    let mut sources = SourceMap::new();
    let id = sources.add(file_path, source);
    Ok((sources, id))
}

fn compile_loaded(sources: &SourceMap, id: FileId) -> CliResult<CompilationUnit> {
    compile_file(sources, id).ok_or_else(|| CliError::failure("Internal error: source file was not registered"))
}

/// Turn collected diagnostics into the command's result.
fn finish(sources: &SourceMap, unit: &CompilationUnit, options: &CompileOptions) -> CliResult<ExitCode> {
    if unit.had_error() {
        let msg = options.render(sources, unit.errors());
        return Err(CliError::failure(msg.trim_end()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one line per token: position, then a description.
pub fn lex_file(file_path: &str, options: &CompileOptions) -> CliResult<ExitCode> {
    let (sources, id) = load(file_path)?;
    let file = sources
        .file(id)
        .ok_or_else(|| CliError::failure("Internal error: source file was not registered"))?;

    let mut ctx = Context::new();
    let mut lexer = Lexer::new(file.text(), file.base());
    loop {
        let tok = lexer.next_token(&mut ctx);
        ctx.diagnostics.resync();
        let (line, col) = sources
            .location(tok.span.start)
            .map(|loc| (loc.line, loc.col))
            .unwrap_or((0, 0));
        println!("{:>4}:{:<4} {}", line, col, tok.kind.describe(&ctx.interner));
        if tok.kind == TokenKind::Eof {
            break;
        }
    }

    if ctx.had_error() {
        let msg = options.render(&sources, ctx.diagnostics.errors());
        return Err(CliError::failure(msg.trim_end()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the typed AST, even when errors were reported.
pub fn parse_file(file_path: &str, options: &CompileOptions) -> CliResult<ExitCode> {
    let (sources, id) = load(file_path)?;
    let unit = compile_loaded(&sources, id)?;
    print!("{}", unit.dump());
    finish(&sources, &unit, options)
}

/// Print the typed AST as pretty JSON.
pub fn emit_ast(file_path: &str, options: &CompileOptions) -> CliResult<ExitCode> {
    let (sources, id) = load(file_path)?;
    let unit = compile_loaded(&sources, id)?;
    let doc = json::unit_to_json(&unit);
    let text = serde_json::to_string_pretty(&doc)
        .map_err(|e| CliError::failure(format!("Error serializing AST: {}", e)))?;
    println!("{}", text);
    finish(&sources, &unit, options)
}

/// Default action: parse and check, report diagnostics, summarize on success.
pub fn check_file(file_path: &str, options: &CompileOptions) -> CliResult<ExitCode> {
    let (sources, id) = load(file_path)?;
    let unit = compile_loaded(&sources, id)?;
    finish(&sources, &unit, options)?;
    println!("Parsed {} top-level nodes.", unit.items.len());
    Ok(ExitCode::SUCCESS)
}
