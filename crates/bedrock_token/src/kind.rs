//! The closed set of token kinds.

/// Every kind of token the lexer can produce. Variants are grouped by
/// family (delimiters, operators, keywords, literals) in source order for
/// readability; the numeric discriminants carry no meaning beyond equality
/// and are not part of any wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character delimiters and punctuation.
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    At,
    Hash,
    Question,

    // Arithmetic / bitwise.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,

    // Comparison.
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,

    // Assignment family.
    Eq,
    ArrowAssignMove, // `<-`
    StreamAssign,    // `<<-`
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    TildeEq,
    ShlEq,
    ShrEq,
    ShrAEq, // `>>>=`

    // Shifts.
    Shl,    // `<<`
    Shr,    // `>>`
    ShrA,   // `>>>` (arithmetic right shift)

    // Logical.
    AndAnd,
    OrOr,

    // Inc/dec.
    PlusPlus,
    MinusMinus,

    // Member/scope/path/arrows.
    Dot,
    DotDot,     // range, and (context-disambiguated) the module path separator
    DotDotDot,  // variadic ellipsis `...`
    DotDotDotEq, // inclusive range `...=`
    GenericSep, // `::`
    Arrow,      // `->`
    FatArrow,   // `=>`

    // Keywords: modules and visibility.
    KwModule,
    KwImport,
    KwUse,
    KwPub,
    KwHid,

    // Keywords: declarations.
    KwFn,
    KwMt,
    KwDt,
    KwVar,
    KwMut,
    KwCompt,
    KwStatic,
    KwExtern,
    KwStruct,
    KwUnion,
    KwVariant,
    KwContract,
    KwDeftype,
    KwMark,
    KwRequires,
    KwHas,

    // Keywords: builtin types.
    KwI8,
    KwI16,
    KwI32,
    KwI64,
    KwU8,
    KwU16,
    KwU32,
    KwU64,
    KwUsize,
    KwChar,
    KwF32,
    KwF64,
    KwStr,
    KwBool,
    KwVoid,

    // Keywords: operators-as-words.
    KwSizeof,
    KwAlignof,
    KwTypeof,
    KwMove,
    KwAs,
    KwIs,

    // Keywords: control flow.
    KwIf,
    KwElse,
    KwWhile,
    KwFor,
    KwIn,
    KwReturn,
    KwYield,
    KwBreak,
    KwContinue,
    KwMatch,

    // Keywords: self.
    KwSelfId,
    KwSelfType,

    // Identifiers and literals.
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    NullLiteral,

    // Lexical failure markers (never diagnosed by the lexer itself; the
    // parser surfaces these as diagnostics when it encounters them).
    LexErrorEmptyToken,
    LexErrorUnterminatedLiteral,

    Eof,
}

impl TokenKind {
    /// True for tokens that may legally start an expression, used by parser
    /// error recovery to decide whether synchronization landed somewhere
    /// useful.
    pub fn can_start_expression(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | IntLiteral
                | FloatLiteral
                | StringLiteral
                | CharLiteral
                | BoolLiteral
                | NullLiteral
                | LParen
                | Minus
                | Plus
                | Bang
                | Tilde
                | Amp
                | Star
                | PlusPlus
                | MinusMinus
                | KwSizeof
                | KwAlignof
                | KwMove
                | KwSelfId
        )
    }
}
