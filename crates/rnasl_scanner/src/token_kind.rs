//! TokenKind - every token kind the tokenizer can produce, plus the
//! keyword and operator tables.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    /// Synthetic end-of-input marker, lexeme `"$"`.
    EndOfFileToken,

    Identifier,

    // ========================================================================
    // Reserved words
    // ========================================================================
    BreakKeyword,
    ContinueKeyword,
    ElseKeyword,
    ExportKeyword,
    ForKeyword,
    ForeachKeyword,
    FunctionKeyword,
    GlobalVarKeyword,
    IfKeyword,
    ImportKeyword,
    IncludeKeyword,
    LocalVarKeyword,
    RepeatKeyword,
    ReturnKeyword,
    UntilKeyword,
    /// The repetition keyword, spelled `x` in source.
    RepKeyword,
    WhileKeyword,

    // Literal words, spelled upper-case in source
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // ========================================================================
    // Literals
    // ========================================================================
    DecimalLiteral,
    OctalLiteral,
    HexLiteral,
    /// Single-quoted string; escape sequences are kept raw.
    DataLiteral,
    /// Double-quoted string; no escapes, no embedded quotes.
    StringLiteral,

    // ========================================================================
    // Operators and punctuation
    // ========================================================================
    GreaterThanLessThanToken,
    GreaterThanExclamationLessThanToken,
    EqualsTildeToken,
    ExclamationTildeToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    LessThanLessThanEqualsToken,
    BarBarToken,
    AmpersandAmpersandToken,
    ExclamationToken,
    BarToken,
    CaretToken,
    AmpersandToken,
    GreaterThanGreaterThanGreaterThanToken,
    GreaterThanGreaterThanToken,
    LessThanLessThanToken,
    LessThanToken,
    GreaterThanToken,
    PlusPlusToken,
    MinusMinusToken,
    AsteriskAsteriskToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    TildeToken,
    DotToken,
    CommaToken,
    ColonToken,
    SemicolonToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
}

/// Reserved words, looked up case-sensitively after maximal-munch
/// identifier extraction. Built at most once per process and shared
/// read-only across every tokenizer instance and thread.
static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    FxHashMap::from_iter([
        ("break", TokenKind::BreakKeyword),
        ("continue", TokenKind::ContinueKeyword),
        ("else", TokenKind::ElseKeyword),
        ("export", TokenKind::ExportKeyword),
        ("for", TokenKind::ForKeyword),
        ("foreach", TokenKind::ForeachKeyword),
        ("function", TokenKind::FunctionKeyword),
        ("global_var", TokenKind::GlobalVarKeyword),
        ("if", TokenKind::IfKeyword),
        ("import", TokenKind::ImportKeyword),
        ("include", TokenKind::IncludeKeyword),
        ("local_var", TokenKind::LocalVarKeyword),
        ("repeat", TokenKind::RepeatKeyword),
        ("return", TokenKind::ReturnKeyword),
        ("until", TokenKind::UntilKeyword),
        ("x", TokenKind::RepKeyword),
        ("while", TokenKind::WhileKeyword),
        ("FALSE", TokenKind::FalseKeyword),
        ("NULL", TokenKind::NullKeyword),
        ("TRUE", TokenKind::TrueKeyword),
    ])
});

/// Operator and punctuation lexemes, in match order.
///
/// The order is load-bearing: a lexeme that is a textual prefix of a
/// longer lexeme must appear after that longer lexeme, or the prefix
/// would win and split the longer operator into pieces.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("><", TokenKind::GreaterThanLessThanToken),
    (">!<", TokenKind::GreaterThanExclamationLessThanToken),
    ("=~", TokenKind::EqualsTildeToken),
    ("!~", TokenKind::ExclamationTildeToken),
    ("==", TokenKind::EqualsEqualsToken),
    ("!=", TokenKind::ExclamationEqualsToken),
    ("<=", TokenKind::LessThanEqualsToken),
    (">=", TokenKind::GreaterThanEqualsToken),
    ("=", TokenKind::EqualsToken),
    ("+=", TokenKind::PlusEqualsToken),
    ("-=", TokenKind::MinusEqualsToken),
    ("*=", TokenKind::AsteriskEqualsToken),
    ("/=", TokenKind::SlashEqualsToken),
    ("%=", TokenKind::PercentEqualsToken),
    (">>=", TokenKind::GreaterThanGreaterThanEqualsToken),
    (">>>=", TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken),
    ("<<=", TokenKind::LessThanLessThanEqualsToken),
    ("||", TokenKind::BarBarToken),
    ("&&", TokenKind::AmpersandAmpersandToken),
    ("!", TokenKind::ExclamationToken),
    ("|", TokenKind::BarToken),
    ("^", TokenKind::CaretToken),
    ("&", TokenKind::AmpersandToken),
    (">>>", TokenKind::GreaterThanGreaterThanGreaterThanToken),
    (">>", TokenKind::GreaterThanGreaterThanToken),
    ("<<", TokenKind::LessThanLessThanToken),
    ("<", TokenKind::LessThanToken),
    (">", TokenKind::GreaterThanToken),
    ("++", TokenKind::PlusPlusToken),
    ("--", TokenKind::MinusMinusToken),
    ("**", TokenKind::AsteriskAsteriskToken),
    ("+", TokenKind::PlusToken),
    ("-", TokenKind::MinusToken),
    ("*", TokenKind::AsteriskToken),
    ("/", TokenKind::SlashToken),
    ("%", TokenKind::PercentToken),
    ("~", TokenKind::TildeToken),
    (".", TokenKind::DotToken),
    (",", TokenKind::CommaToken),
    (":", TokenKind::ColonToken),
    (";", TokenKind::SemicolonToken),
    ("(", TokenKind::OpenParenToken),
    (")", TokenKind::CloseParenToken),
    ("[", TokenKind::OpenBracketToken),
    ("]", TokenKind::CloseBracketToken),
    ("{", TokenKind::OpenBraceToken),
    ("}", TokenKind::CloseBraceToken),
];

impl TokenKind {
    /// Look up a keyword TokenKind from text. Case-sensitive: `TRUE` is a
    /// keyword, `true` is an ordinary identifier.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS.get(text).copied()
    }

    /// Get the source spelling for a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::BreakKeyword => Some("break"),
            TokenKind::ContinueKeyword => Some("continue"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::ExportKeyword => Some("export"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::ForeachKeyword => Some("foreach"),
            TokenKind::FunctionKeyword => Some("function"),
            TokenKind::GlobalVarKeyword => Some("global_var"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ImportKeyword => Some("import"),
            TokenKind::IncludeKeyword => Some("include"),
            TokenKind::LocalVarKeyword => Some("local_var"),
            TokenKind::RepeatKeyword => Some("repeat"),
            TokenKind::ReturnKeyword => Some("return"),
            TokenKind::UntilKeyword => Some("until"),
            TokenKind::RepKeyword => Some("x"),
            TokenKind::WhileKeyword => Some("while"),
            TokenKind::TrueKeyword => Some("TRUE"),
            TokenKind::FalseKeyword => Some("FALSE"),
            TokenKind::NullKeyword => Some("NULL"),
            _ => None,
        }
    }

    /// Get the lexeme for an operator or punctuation kind, or None.
    pub fn operator_text(self) -> Option<&'static str> {
        OPERATORS
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(lexeme, _)| lexeme)
    }

    /// Whether this kind is a reserved word.
    pub fn is_keyword(self) -> bool {
        (TokenKind::BreakKeyword..=TokenKind::NullKeyword).contains(&self)
    }

    /// Whether this kind is an integer literal of any base.
    pub fn is_integer_literal(self) -> bool {
        matches!(
            self,
            TokenKind::DecimalLiteral | TokenKind::OctalLiteral | TokenKind::HexLiteral
        )
    }

    /// Whether this kind is a string literal of either quote style.
    pub fn is_string_literal(self) -> bool {
        matches!(self, TokenKind::DataLiteral | TokenKind::StringLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for (&text, &kind) in KEYWORDS.iter() {
            assert_eq!(TokenKind::from_keyword(text), Some(kind));
            assert_eq!(kind.keyword_text(), Some(text));
            assert!(kind.is_keyword());
        }
        assert_eq!(TokenKind::from_keyword("break_"), None);
        assert_eq!(TokenKind::from_keyword("true"), None);
        assert_eq!(TokenKind::from_keyword("True"), None);
    }

    #[test]
    fn test_operator_table_order() {
        // No lexeme may precede a longer lexeme it is a prefix of, or the
        // longer one would be unreachable.
        for (i, &(earlier, _)) in OPERATORS.iter().enumerate() {
            for &(later, _) in &OPERATORS[i + 1..] {
                assert!(
                    !later.starts_with(earlier),
                    "operator table order violated: {:?} precedes {:?}",
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn test_operator_table_covers_kinds() {
        for &(lexeme, kind) in OPERATORS {
            assert_eq!(kind.operator_text(), Some(lexeme));
            assert!(!kind.is_keyword());
        }
    }
}
