//! # bedrock-lexer
//!
//! The maximal-munch lexer: turns a byte buffer into a dense token stream
//! terminated by one [`bedrock_token::TokenKind::Eof`] token. Never fails;
//! malformed input surfaces as `LexError*` token kinds for the parser to
//! diagnose.
//!
//! ```rust
//! use bedrock_base::Interner;
//! use bedrock_lexer::lex;
//!
//! let mut interner = Interner::new();
//! let tokens = lex(b"mod Alpha {}", &mut interner);
//! assert_eq!(tokens.len(), 5); // mod, Alpha, {, }, EOF
//! ```

mod lexer;

pub use lexer::lex;
