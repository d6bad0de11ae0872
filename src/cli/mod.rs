//! CLI module for the CACT front end
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Usage
//!
//! - `cactc <file>` - Parse and check the file (default action)
//! - `cactc --lex <file>` - Print the token stream
//! - `cactc --parse <file>` - Print the typed AST
//! - `cactc --emit-ast <file>` - Print the typed AST as JSON
//!
//! `--fancy` switches diagnostics to miette's graphical rendering and `--max-errors N` caps how
//! many are printed.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::frontend::diagnostics::{self, CompileError};
use crate::frontend::source::SourceMap;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end for the CACT teaching language
#[derive(Parser, Debug)]
#[command(name = "cactc")]
#[command(version = VERSION)]
#[command(about = "Lexer, parser and semantic analyzer for the CACT language", long_about = None)]
pub struct Cli {
    /// File to parse and check (default action)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Print the typed AST (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Print the typed AST as JSON
    #[arg(long = "emit-ast", value_name = "FILE", conflicts_with = "file")]
    pub emit_ast_file: Option<PathBuf>,

    /// Render diagnostics with source snippets and labels
    #[arg(long)]
    pub fancy: bool,

    /// Print at most N diagnostics
    #[arg(long = "max-errors", value_name = "N")]
    pub max_errors: Option<usize>,
}

// ============================================================================
// Compile options
// ============================================================================

/// How diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticStyle {
    /// `<file>:<line>:<col>: Error: <message>` with the source line and a caret.
    #[default]
    Plain,
    /// miette's graphical report.
    Fancy,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub style: DiagnosticStyle,
    /// `None` prints every diagnostic.
    pub max_errors: Option<usize>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: DiagnosticStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Render `errors` in the configured style, honoring the error cap.
    pub fn render(&self, sources: &SourceMap, errors: &[CompileError]) -> String {
        let shown = self.max_errors.unwrap_or(errors.len()).min(errors.len());
        let mut out = String::new();
        for err in &errors[..shown] {
            match self.style {
                DiagnosticStyle::Plain => out.push_str(&diagnostics::format_error(sources, err)),
                DiagnosticStyle::Fancy => out.push_str(&diagnostics::format_error_fancy(sources, err)),
            }
        }
        let hidden = errors.len() - shown;
        if hidden > 0 {
            out.push_str(&format!("... and {} more error{}\n", hidden, if hidden == 1 { "" } else { "s" }));
        }
        out
    }
}

impl From<&Cli> for CompileOptions {
    fn from(cli: &Cli) -> Self {
        let style = if cli.fancy {
            DiagnosticStyle::Fancy
        } else {
            DiagnosticStyle::Plain
        };
        CompileOptions::new().with_style(style).with_max_errors(cli.max_errors)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = CompileOptions::from(&cli);

    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(&file.to_string_lossy(), &options);
    }
    if let Some(file) = &cli.parse_file {
        return commands::parse_file(&file.to_string_lossy(), &options);
    }
    if let Some(file) = &cli.emit_ast_file {
        return commands::emit_ast(&file.to_string_lossy(), &options);
    }

    match &cli.file {
        Some(file) => commands::check_file(&file.to_string_lossy(), &options),
        None => Err(CliError::failure("Error: no input file (try --help)")),
    }
}

// ============================================================================
// Tests
// ============================================================================
