//! rnasl_scanner: Tokenizer for NASL source code.
//!
//! Converts raw source text into a stream of classified tokens for the
//! parser, with:
//! - Keyword/identifier recognition (maximal munch, reclassify after)
//! - Decimal, octal, and hexadecimal integer literals, including the
//!   leading-zero decimal fallback
//! - Single- and double-quoted strings, including multi-line bodies
//! - Longest-match operator recognition over an ordered table
//!
//! The first lexical error aborts the pass; errors carry a rendered
//! source excerpt for the script author.

mod char_codes;
mod token;
mod token_kind;
mod tokenizer;

pub use rnasl_diagnostics::TokenError;
pub use token::Token;
pub use token_kind::{TokenKind, OPERATORS};
pub use tokenizer::Tokenizer;
