//! rnasl_diagnostics: Lexical error reporting for the rnasl toolchain.
//!
//! Tokenization either succeeds or stops at the first fatal error. The
//! error carries a resolved message and a rendered source excerpt, so the
//! host program can surface it to the script author without any further
//! lookups into the source.

use rnasl_core::text::TextRange;
use thiserror::Error;

/// A fatal lexical error.
///
/// Produced by the tokenizer's single error path; ends the tokenization
/// pass for the source unit it names. Tokens returned before the error
/// remain valid.
#[derive(Debug, Clone, Error)]
#[error("{path}:{line}:{column}: {message}\n{context}")]
pub struct TokenError {
    /// Resolved, human-readable message.
    pub message: String,
    /// Path of the source unit the error occurred in.
    pub path: String,
    /// 1-based line of the erroring construct's start.
    pub line: u32,
    /// 1-based column of the erroring construct's start.
    pub column: u32,
    /// The erroring range: construct start through the scan point.
    pub range: TextRange,
    /// Rendered multi-line excerpt with the erroring range marked.
    pub context: String,
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Message templates for every error the tokenizer can raise.
pub mod messages {
    /// No sub-scanner pattern matched at the cursor.
    pub const INVALID_CHARACTER: &str = "Invalid character ('{0}')";
    /// Base-specific digit validation failed, even after the decimal
    /// fallback for leading-zero numerals.
    pub const INVALID_INTEGER_LITERAL: &str = "Invalid {0} literal";
    /// No closing quote before the end of the source.
    pub const UNTERMINATED_STRING: &str = "Unterminated {0} string";
}
