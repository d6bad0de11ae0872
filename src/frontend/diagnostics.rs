//! Diagnostics and error reporting for CACT
//!
//! Errors are values: lexer, parser and semantic checks build a [`CompileError`] and hand it to the
//! [`Diagnostics`] sink. The sink implements panic-mode suppression: after the first report it
//! switches to [`ReportState::Recovering`] and drops further reports until the parser resynchronizes.
//!
//! Rendering lives here too, in two flavours: the compact `file:line:col: Error: message` form with
//! the offending line and a caret, and a graphical form produced by `miette`.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, SourceCode};

use crate::frontend::ast::Span;
use crate::frontend::source::SourceMap;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: impl Into<String>, span: Span, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, span, ErrorKind::Lexical)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, span, ErrorKind::Syntax)
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, span, ErrorKind::Semantic)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.hints.first().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::at(self.span.start..self.span.end.max(self.span.start), self.kind.to_string());
        Some(Box::new(std::iter::once(label)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal, stray character, unterminated comment.
    Lexical,
    /// Unexpected token.
    Syntax,
    /// Name resolution and type errors.
    Semantic,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "cact::lexical",
            ErrorKind::Syntax => "cact::syntax",
            ErrorKind::Semantic => "cact::semantic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
        }
    }
}

// ============================================================================
// Sink with panic-mode suppression
// ============================================================================

/// Reporting state of the [`Diagnostics`] sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportState {
    /// Reports are recorded.
    #[default]
    Normal,
    /// An error was just recorded; further reports are dropped until [`Diagnostics::resync`].
    Recovering,
}

/// Collects diagnostics for one compilation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<CompileError>,
    state: ReportState,
    had_error: bool,
    suppressed: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` unless the sink is recovering.
    ///
    /// Returns `true` if the error was recorded. Either way the sink ends up in
    /// [`ReportState::Recovering`] and `had_error` is set.
    pub fn report(&mut self, error: CompileError) -> bool {
        self.had_error = true;
        match self.state {
            ReportState::Normal => {
                tracing::debug!(kind = %error.kind, message = %error.message, "diagnostic");
                self.errors.push(error);
                self.state = ReportState::Recovering;
                true
            }
            ReportState::Recovering => {
                tracing::trace!(message = %error.message, "suppressed diagnostic while recovering");
                self.suppressed += 1;
                false
            }
        }
    }

    /// Leave recovery mode: the next report is recorded again.
    pub fn resync(&mut self) {
        self.state = ReportState::Normal;
    }

    pub fn state(&self) -> ReportState {
        self.state
    }

    pub fn is_recovering(&self) -> bool {
        self.state == ReportState::Recovering
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<CompileError> {
        self.errors
    }

    /// Number of reports dropped while recovering.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render an error as `<file>:<line>:<col>: Error: <message>`, followed by the source line and a caret.
///
/// Notes and hints follow on their own lines.
pub fn format_error(sources: &SourceMap, error: &CompileError) -> String {
    let mut out = String::new();
    match sources.location(error.span.start) {
        Some(loc) => {
            out.push_str(&format!("{}:{}:{}: Error: {}\n", loc.name, loc.line, loc.col, error.message));
            if let Some(line) = sources.line_text(loc.file, loc.line) {
                out.push_str(line);
                out.push('\n');
                out.push_str(&" ".repeat(loc.col.saturating_sub(1)));
                out.push_str("^\n");
            }
        }
        None => out.push_str(&format!("<unknown>: Error: {}\n", error.message)),
    }
    for note in &error.notes {
        out.push_str(&format!("  = note: {}\n", note));
    }
    for hint in &error.hints {
        out.push_str(&format!("  = hint: {}\n", hint));
    }
    out
}

/// Render an error with miette's graphical handler (unicode, no colors).
pub fn format_error_fancy(sources: &SourceMap, error: &CompileError) -> String {
    let Some(file) = sources.file_for(error.span.start).and_then(|id| sources.file(id)) else {
        return format_error(sources, error);
    };
    let located = InFile {
        error,
        base: file.base(),
        source: NamedSource::new(file.name(), file.text().to_string()),
    };
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    match handler.render_report(&mut out, &located) {
        Ok(()) => out,
        Err(_) => format_error(sources, error),
    }
}

/// A [`CompileError`] paired with the text of the file it points into.
///
/// Spans are global offsets; miette wants offsets local to the attached source.
struct InFile<'a> {
    error: &'a CompileError,
    base: usize,
    source: NamedSource<String>,
}

impl fmt::Debug for InFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.error, f)
    }
}

impl fmt::Display for InFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.error, f)
    }
}

impl std::error::Error for InFile<'_> {}

impl Diagnostic for InFile<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.error.code()
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.error.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let start = self.error.span.start.saturating_sub(self.base);
        let end = self.error.span.end.saturating_sub(self.base).max(start);
        Some(Box::new(std::iter::once(LabeledSpan::at(
            start..end,
            self.error.kind.to_string(),
        ))))
    }
}

// ============================================================================
// Error catalog
// ============================================================================

/// Constructors for the diagnostics the front end emits, so wording stays consistent.
pub mod errors {
    use super::*;

    // ---- lexical ----

    pub fn unexpected_char(c: char, span: Span) -> CompileError {
        CompileError::lexical(format!("Unexpected character '{}'", c.escape_debug()), span)
    }

    pub fn bitwise_unsupported(c: char, span: Span) -> CompileError {
        CompileError::lexical(format!("Bitwise operator '{}' is not supported", c), span)
            .with_hint(format!("Did you mean '{}{}'?", c, c))
    }

    pub fn bad_hex_literal(span: Span) -> CompileError {
        CompileError::lexical("Invalid hexadecimal literal: expected a hex digit after '0x'", span)
    }

    pub fn bad_exponent(span: Span) -> CompileError {
        CompileError::lexical("Invalid exponent in number literal: expected a digit", span)
    }

    pub fn int_with_float_suffix(span: Span) -> CompileError {
        CompileError::lexical("Integer literal cannot have a float suffix", span)
            .with_hint("Write the literal with a decimal point, e.g. '3.0f'")
    }

    pub fn bad_octal_digit(span: Span) -> CompileError {
        CompileError::lexical("Invalid digit in octal literal", span)
    }

    pub fn int_out_of_range(span: Span) -> CompileError {
        CompileError::lexical("Integer literal is too large for a 32-bit int", span)
    }

    pub fn bad_float_literal(span: Span) -> CompileError {
        CompileError::lexical("Malformed floating-point literal", span)
    }

    pub fn unterminated_comment(span: Span) -> CompileError {
        CompileError::lexical("Unterminated block comment", span).with_note("Block comments do not nest")
    }

    // ---- syntax ----

    pub fn expected(what: &str, found: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Expected {}, found {}", what, found), span)
    }

    pub fn expected_expression(found: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Expected an expression, found {}", found), span)
    }

    pub fn expected_type(found: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Expected a type specifier, found {}", found), span)
    }

    pub fn array_size_not_constant(span: Span) -> CompileError {
        CompileError::syntax("Array size must be an integer constant", span)
    }

    pub fn array_size_not_positive(span: Span) -> CompileError {
        CompileError::syntax("Array size must be positive", span)
    }

    pub fn nesting_too_deep(limit: usize, span: Span) -> CompileError {
        CompileError::syntax(format!("Nesting is too deep (limit is {} levels)", limit), span)
    }

    pub fn chained_assignment(span: Span) -> CompileError {
        CompileError::syntax("Assignment cannot be chained", span)
            .with_hint("Split 'a = b = c;' into 'b = c; a = b;'")
    }

    pub fn assignment_in_expression(span: Span) -> CompileError {
        CompileError::syntax("Assignment is only allowed as a statement", span)
    }

    // ---- semantic ----

    pub fn redefinition(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Redefinition of symbol '{}' in the same scope", name), span)
    }

    pub fn undeclared_variable(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Undeclared variable '{}'", name), span)
    }

    pub fn undeclared_function(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Undeclared function '{}'", name), span)
    }

    pub fn not_a_function(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("'{}' is not a function", name), span)
    }

    pub fn function_as_value(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Function '{}' cannot be used as a value", name), span)
            .with_hint(format!("Call it with '{}(...)'", name))
    }

    pub fn binary_mismatch(lhs: &str, rhs: &str, span: Span) -> CompileError {
        CompileError::semantic("Type mismatch in binary expression", span)
            .with_note(format!("left operand is '{}', right operand is '{}'", lhs, rhs))
    }

    pub fn arithmetic_needs_numeric(found: &str, span: Span) -> CompileError {
        CompileError::semantic("Arithmetic operator requires numeric operands", span)
            .with_note(format!("operands have type '{}'", found))
    }

    pub fn modulo_needs_int(found: &str, span: Span) -> CompileError {
        CompileError::semantic("Modulo operator requires integer operands", span)
            .with_note(format!("operands have type '{}'", found))
    }

    pub fn logical_needs_bool(found: &str, span: Span) -> CompileError {
        CompileError::semantic("Logical operator requires boolean operands", span)
            .with_note(format!("operands have type '{}'", found))
    }

    pub fn comparison_needs_numeric(found: &str, span: Span) -> CompileError {
        CompileError::semantic("Relational operator requires numeric operands", span)
            .with_note(format!("operands have type '{}'", found))
    }

    pub fn equality_needs_scalar(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Cannot compare values of type '{}'", found), span)
    }

    pub fn negate_needs_numeric(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Unary '-' requires a numeric operand, found '{}'", found), span)
    }

    pub fn not_needs_bool(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Unary '!' requires a bool operand, found '{}'", found), span)
    }

    pub fn condition_not_bool(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Condition must be of type 'bool', found '{}'", found), span)
    }

    pub fn const_assignment(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Cannot assign to const variable '{}'", name), span)
    }

    pub fn assign_mismatch(expected: &str, found: &str, span: Span) -> CompileError {
        CompileError::semantic("Type mismatch in assignment", span)
            .with_note(format!("expected '{}', found '{}'", expected, found))
    }

    pub fn not_assignable(span: Span) -> CompileError {
        CompileError::semantic("Left side of assignment must be a variable or array element", span)
    }

    pub fn array_assignment(span: Span) -> CompileError {
        CompileError::semantic("Arrays cannot be assigned as a whole", span)
    }

    pub fn void_returns_value(span: Span) -> CompileError {
        CompileError::semantic("Void function should not return a value", span)
    }

    pub fn missing_return_value(span: Span) -> CompileError {
        CompileError::semantic("Non-void function must return a value", span)
    }

    pub fn return_mismatch(expected: &str, found: &str, span: Span) -> CompileError {
        CompileError::semantic("Return type mismatch", span).with_note(format!("expected '{}', found '{}'", expected, found))
    }

    pub fn not_an_array(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Subscripted value is not an array (type '{}')", found), span)
    }

    pub fn index_not_int(found: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Array index must be of type 'int', found '{}'", found), span)
    }

    pub fn arg_count_mismatch(name: &str, expected: usize, found: usize, span: Span) -> CompileError {
        CompileError::semantic(
            format!(
                "Function '{}' expects {} argument{}, found {}",
                name,
                expected,
                if expected == 1 { "" } else { "s" },
                found
            ),
            span,
        )
    }

    pub fn arg_type_mismatch(name: &str, position: usize, expected: &str, found: &str, span: Span) -> CompileError {
        CompileError::semantic(
            format!("Argument {} of '{}' has the wrong type", position, name),
            span,
        )
        .with_note(format!("expected '{}', found '{}'", expected, found))
    }

    pub fn const_function(name: &str, span: Span) -> CompileError {
        CompileError::syntax(format!("Function '{}' cannot be declared const", name), span)
    }

    pub fn void_variable(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Variable '{}' cannot have type 'void'", name), span)
    }

    pub fn array_too_large(name: &str, ty: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Array '{}' of type '{}' is too large", name, ty), span)
    }

    pub fn const_without_initializer(name: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Const variable '{}' must be initialized", name), span)
    }

    pub fn init_mismatch(expected: &str, found: &str, span: Span) -> CompileError {
        CompileError::semantic("Type mismatch in initializer", span)
            .with_note(format!("expected '{}', found '{}'", expected, found))
    }

    pub fn init_list_for_scalar(ty: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Initializer list used for non-array type '{}'", ty), span)
    }

    pub fn too_many_initializers(ty: &str, span: Span) -> CompileError {
        CompileError::semantic(format!("Too many initializers for '{}'", ty), span)
    }
}
