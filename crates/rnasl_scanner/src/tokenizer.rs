//! The tokenizer cursor engine.
//!
//! The engine keeps a cursor into the shared source buffer and produces
//! one token per `next_token` call: skip insignificant text, dispatch on
//! the current character to exactly one sub-scanner, advance past the
//! consumed lexeme, and emit a token spanning it. The first lexical error
//! aborts the pass for this source unit.

use std::sync::Arc;

use rnasl_core::source::SourceFile;
use rnasl_core::text::{TextPos, TextRange};
use rnasl_diagnostics::{format_message, messages, TokenError};

use crate::char_codes::*;
use crate::token::Token;
use crate::token_kind::{TokenKind, OPERATORS};

/// The tokenizer converts NASL source text into tokens.
///
/// Owns exclusive cursor state over an immutable, shared source buffer.
/// Sub-scanner lookahead is bounded to the current line, except for the
/// string scanner, which searches the full remaining buffer so string
/// bodies may span lines.
pub struct Tokenizer {
    /// Source context shared with every token produced from it.
    source: Arc<SourceFile>,
    /// Current position in the text (char offset).
    point: usize,
    /// Start of the current token, kept for error reporting.
    mark: usize,
    /// Whether the cursor has reached the end of the text.
    eof: bool,
}

impl Tokenizer {
    /// Create a tokenizer over `text`, identified by `path` in diagnostics.
    ///
    /// The cursor starts on the first significant character.
    pub fn new(text: &str, path: impl Into<String>) -> Self {
        let mut tokenizer = Self {
            source: Arc::new(SourceFile::new(text, path)),
            point: 0,
            mark: 0,
            eof: text.is_empty(),
        };
        tokenizer.reset();
        tokenizer
    }

    /// The source unit this tokenizer reads from.
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// Whether the cursor has consumed all input.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Restore the cursor to the start of the text and skip leading
    /// insignificant text, ready to tokenize from scratch. Returns the
    /// tokenizer to allow chaining.
    pub fn reset(&mut self) -> &mut Self {
        self.point = 0;
        self.mark = 0;
        self.advance(0);
        self.skip_insignificant();
        self
    }

    /// Produce the next token.
    ///
    /// At end of input this returns the synthetic end-of-file token with
    /// lexeme `"$"` and an empty range, and will keep returning it on
    /// subsequent calls. Any lexical failure is fatal for this pass;
    /// tokens already returned remain valid.
    pub fn next_token(&mut self) -> Result<Token, TokenError> {
        // `advance` keeps `eof` in sync with `point`, so a live cursor
        // always has a character under it.
        let Some(ch) = self.char() else {
            let range = TextRange::empty(self.point as TextPos);
            return Ok(Token::new(
                TokenKind::EndOfFileToken,
                "$",
                range,
                Arc::clone(&self.source),
            ));
        };

        self.mark = self.point;

        let (kind, text) = if is_identifier_start(ch) {
            self.scan_identifier()
        } else if is_quote(ch) {
            self.scan_string(ch)?
        } else if is_digit(ch) {
            self.scan_integer()?
        } else if let Some(matched) = self.scan_operator() {
            matched
        } else {
            // Every lexeme in the language is covered by the scanners
            // above, so an exhausted operator table means bad input.
            return Err(self.fail(&format_message(
                messages::INVALID_CHARACTER,
                &[&ch.to_string()],
            )));
        };

        // The range is the exact lexeme extent; trailing trivia is then
        // skipped so the cursor rests on the next significant character.
        let range = TextRange::new(self.mark as TextPos, self.point as TextPos);
        self.skip_insignificant();

        Ok(Token::new(kind, text, range, Arc::clone(&self.source)))
    }

    /// Tokenize the remaining input, returning every token in order,
    /// terminated by the end-of-file token.
    pub fn all_tokens(&mut self) -> Result<Vec<Token>, TokenError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfFileToken;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Move the cursor forward by `n` chars.
    ///
    /// The only mutator of cursor state; every sub-scanner consumes input
    /// through it so the end-of-input flag can never go stale.
    fn advance(&mut self, n: usize) {
        self.point += n;
        self.eof = self.point >= self.source.len();
    }

    /// The character at the cursor, or `None` at end of input.
    #[inline]
    fn char(&self) -> Option<char> {
        self.source.char_at(self.point)
    }

    /// The character at cursor + `offset`.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.source.char_at(self.point + offset)
    }

    /// One past the last char of the line the cursor is on, exclusive of
    /// the newline. Bounds sub-scanner lookahead to a single line.
    fn line_end(&self) -> usize {
        self.source.end_of_line(self.point as TextPos) as usize
    }

    /// Whether the remainder of the current line starts with `lexeme`.
    fn line_starts_with(&self, lexeme: &str) -> bool {
        let line_end = self.line_end();
        let mut offset = 0;
        for ch in lexeme.chars() {
            if self.point + offset >= line_end || self.char_at(offset) != Some(ch) {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// Length of the run of chars matching `pred`, starting at cursor +
    /// `offset` and bounded to the current line. Does not consume.
    fn peek_run(&self, offset: usize, pred: impl Fn(char) -> bool) -> usize {
        let line_end = self.line_end();
        let mut len = 0;
        while self.point + offset + len < line_end {
            match self.char_at(offset + len) {
                Some(ch) if pred(ch) => len += 1,
                _ => break,
            }
        }
        len
    }

    /// The `len` chars starting at the cursor, as an owned string.
    fn peek_text(&self, len: usize) -> String {
        self.source.slice(TextRange::new(
            self.point as TextPos,
            (self.point + len) as TextPos,
        ))
    }

    /// Skip runs of whitespace and `#` comments (through end of line)
    /// until the cursor rests on a significant character or end of input.
    /// Skipped text is never represented as a token.
    fn skip_insignificant(&mut self) {
        loop {
            match self.char() {
                Some(ch) if is_white_space(ch) => self.advance(1),
                Some('#') => {
                    let line_end = self.line_end();
                    self.advance(line_end - self.point);
                }
                _ => break,
            }
        }
    }

    // ========================================================================
    // Sub-scanners
    // ========================================================================

    /// Identifiers are composed of letters, digits, and underscores.
    ///
    /// Keywords are extracted as identifiers first and reclassified after:
    /// keyword prefixes are valid identifier prefixes (`break_` must lex
    /// as one identifier), so maximal munch has to precede classification.
    fn scan_identifier(&mut self) -> (TokenKind, String) {
        let len = self.peek_run(0, is_identifier_part);
        let text = self.peek_text(len);
        self.advance(len);

        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier);
        (kind, text)
    }

    /// Integer literals in any of three bases, selected by prefix:
    /// `0x`/`0X` is hex, a leading zero followed by further word
    /// characters is an octal candidate, anything else is decimal.
    ///
    /// Each base is validated by cross-checking a permissive capture (the
    /// base prefix plus any word-character run) against a restrictive one
    /// (only digits legal in the base). On divergence the literal gets one
    /// decimal re-check: a leading-zero numeral containing a non-octal
    /// digit is decimal by language rule. If the captures still diverge,
    /// the literal is fatal, named after the prefix-selected base.
    fn scan_integer(&mut self) -> Result<(TokenKind, String), TokenError> {
        let (mut kind, name, permissive, mut restrictive) =
            if self.line_starts_with("0x") || self.line_starts_with("0X") {
                let word = self.peek_run(2, is_word_char);
                let digits = self.peek_run(2, is_hex_digit);
                (
                    TokenKind::HexLiteral,
                    "hex",
                    (word > 0).then(|| self.peek_text(2 + word)),
                    (digits > 0).then(|| self.peek_text(2 + digits)),
                )
            } else if self.char() == Some('0') && self.char_at(1).is_some_and(is_word_char) {
                let word = self.peek_run(1, is_word_char);
                let digits = self.peek_run(1, is_octal_digit);
                (
                    TokenKind::OctalLiteral,
                    "octal",
                    Some(self.peek_text(1 + word)),
                    (digits > 0).then(|| self.peek_text(1 + digits)),
                )
            } else {
                let word = self.peek_run(0, is_word_char);
                let digits = self.peek_run(0, is_digit);
                (
                    TokenKind::DecimalLiteral,
                    "decimal",
                    Some(self.peek_text(word)),
                    (digits > 0).then(|| self.peek_text(digits)),
                )
            };

        if permissive.is_none() || restrictive.is_none() || restrictive != permissive {
            kind = TokenKind::DecimalLiteral;
            let digits = self.peek_run(0, is_digit);
            restrictive = (digits > 0).then(|| self.peek_text(digits));
        }

        match (permissive, restrictive) {
            (Some(text), Some(check)) if text == check => {
                self.advance(text.chars().count());
                Ok((kind, text))
            }
            _ => Err(self.fail(&format_message(messages::INVALID_INTEGER_LITERAL, &[name]))),
        }
    }

    /// String literals in either quote style, searched over the full
    /// remaining buffer so bodies may span lines.
    ///
    /// Single-quoted strings keep escape sequences raw: a backslash always
    /// consumes the following character, so `\'` does not close the body.
    /// Double-quoted strings take everything up to the next `"`, with no
    /// escaping at all. The emitted text excludes the bounding quotes.
    fn scan_string(&mut self, quote: char) -> Result<(TokenKind, String), TokenError> {
        let (kind, style) = if quote == '\'' {
            (TokenKind::DataLiteral, "single-quoted")
        } else {
            (TokenKind::StringLiteral, "double-quoted")
        };

        let mut offset = 1;
        loop {
            match self.char_at(offset) {
                None => {
                    return Err(self.fail(&format_message(
                        messages::UNTERMINATED_STRING,
                        &[style],
                    )))
                }
                Some('\\') if quote == '\'' => offset += 2,
                Some(ch) if ch == quote => break,
                Some(_) => offset += 1,
            }
        }

        let text = self.source.slice(TextRange::new(
            (self.point + 1) as TextPos,
            (self.point + offset) as TextPos,
        ));
        self.advance(offset + 1);
        Ok((kind, text))
    }

    /// Walk the operator table in order and take the first entry matching
    /// a prefix of the current line. Table order guarantees the longest
    /// match wins. Returns `None` when the table is exhausted.
    fn scan_operator(&mut self) -> Option<(TokenKind, String)> {
        for &(lexeme, kind) in OPERATORS {
            if self.line_starts_with(lexeme) {
                self.advance(lexeme.len());
                return Some((kind, lexeme.to_string()));
            }
        }
        None
    }

    // ========================================================================
    // Error signaling
    // ========================================================================

    /// Build the fatal error for the construct starting at `mark`.
    ///
    /// The rendered region covers every full line from the line containing
    /// `mark` through the line containing the cursor; the highlight is the
    /// construct start through the character under the cursor. Every
    /// sub-scanner funnels failures through here.
    fn fail(&self, message: &str) -> TokenError {
        let mark = self.mark as TextPos;
        let point = self.point as TextPos;
        let len = self.source.len() as TextPos;

        let region = TextRange::new(
            self.source.beginning_of_line(mark),
            self.source.end_of_line(point.min(len)),
        );
        let highlight = TextRange::new(mark, (point + 1).min(len));
        let location = self.source.line_and_column_of(mark);

        TokenError {
            message: message.to_string(),
            path: self.source.path().to_string(),
            line: location.line + 1,
            column: location.character + 1,
            range: highlight,
            context: self.source.context(highlight, region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Tokenizer::new(source, "test.nasl")
            .all_tokens()
            .expect("tokenization failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , : ."),
            vec![
                TokenKind::OpenParenToken,
                TokenKind::CloseParenToken,
                TokenKind::OpenBraceToken,
                TokenKind::CloseBraceToken,
                TokenKind::OpenBracketToken,
                TokenKind::CloseBracketToken,
                TokenKind::SemicolonToken,
                TokenKind::CommaToken,
                TokenKind::ColonToken,
                TokenKind::DotToken,
                TokenKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut tokenizer = Tokenizer::new("local_var banner;", "test.nasl");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::LocalVarKeyword);
        assert_eq!(token.text, "local_var");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.text, "banner");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::SemicolonToken);
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EndOfFileToken);
        assert_eq!(token.text, "$");
    }

    #[test]
    fn test_rep_keyword() {
        assert_eq!(
            kinds("crap x 200"),
            vec![
                TokenKind::Identifier,
                TokenKind::RepKeyword,
                TokenKind::DecimalLiteral,
                TokenKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_scan_comments() {
        let mut tokenizer = Tokenizer::new("# leading comment\nfoo # trailing\nbar", "test.nasl");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.text, "foo");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.text, "bar");
        assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::EndOfFileToken);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut tokenizer = Tokenizer::new("", "test.nasl");
        assert!(tokenizer.is_eof());
        for _ in 0..3 {
            let token = tokenizer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::EndOfFileToken);
            assert_eq!(token.text, "$");
            assert!(token.is_empty());
            assert!(std::sync::Arc::ptr_eq(&token.source, tokenizer.source()));
        }
    }

    #[test]
    fn test_invalid_character() {
        let error = Tokenizer::new("foo ? bar", "test.nasl")
            .all_tokens()
            .expect_err("expected a lexical error");
        assert_eq!(error.message, "Invalid character ('?')");
        assert_eq!(error.line, 1);
        assert_eq!(error.column, 5);
    }

    #[test]
    fn test_error_context_is_rendered() {
        let error = Tokenizer::new("a = 1;\nfoo = 0x1G;\n", "test.nasl")
            .all_tokens()
            .expect_err("expected a lexical error");
        assert_eq!(error.message, "Invalid hex literal");
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 7);
        assert!(error.context.contains("2 | foo = 0x1G;"));
        assert!(error.context.contains("^"));
    }
}
