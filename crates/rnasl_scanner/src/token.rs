//! The token record produced by the tokenizer.

use std::sync::Arc;

use rnasl_core::source::SourceFile;
use rnasl_core::text::{LineAndColumn, TextPos, TextRange};

use crate::token_kind::TokenKind;

/// A classified lexeme with its source extent.
///
/// Immutable once constructed. Holds a shared reference to the source
/// unit it was cut from, never ownership, so tokens stay cheap to clone
/// and may outlive the tokenizer that produced them.
#[derive(Debug, Clone)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Literal text: string interiors with escapes preserved raw,
    /// validated digit runs for integers, the exact lexeme otherwise.
    pub text: String,
    /// The exact lexeme extent in the source (half-open char offsets).
    pub range: TextRange,
    /// The source unit this token was produced from.
    pub source: Arc<SourceFile>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        range: TextRange,
        source: Arc<SourceFile>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
            source,
        }
    }

    /// Length of the consumed lexeme in chars.
    pub fn len(&self) -> TextPos {
        self.range.len()
    }

    /// Whether this token consumed no input (only the end-of-file token).
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Line and column (0-based) of the token start.
    pub fn line_and_column(&self) -> LineAndColumn {
        self.source.line_and_column_of(self.range.pos)
    }

    /// The raw lexeme as it appears in the source, quotes included.
    pub fn lexeme(&self) -> String {
        self.source.slice(self.range)
    }
}
