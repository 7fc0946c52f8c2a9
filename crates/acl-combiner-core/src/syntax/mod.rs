//! HuJSON syntax: lossless lexer and comment-attaching parser
//!
//! HuJSON is JSON with `//` and `/* */` comments and an optional trailing
//! comma after the last item of an object or array.

mod kind;
pub mod lexer;
mod parser;

pub use kind::SyntaxKind;
pub use lexer::{LexerError, Span, Token, lex_with_trivia};
pub use parser::{SyntaxError, SyntaxTree, parse};
