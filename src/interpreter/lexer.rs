use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Multi-character operators are resolved by maximal munch: `<<=` lexes as a
/// single token rather than `<<` followed by `=`.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", lex_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", lex_integer)]
    Integer(i64),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", lex_bool)]
    #[token("false", lex_bool)]
    Bool(bool),
    /// String literal tokens, single or double quoted, escapes resolved.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, lex_string)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#, lex_string)]
    Str(String),

    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `write`
    #[token("write")]
    Write,
    /// `read`
    #[token("read")]
    Read,
    /// `for`
    #[token("for")]
    For,
    /// `include`
    #[token("include")]
    Include,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `function`
    #[token("function")]
    Function,
    /// `class`
    #[token("class")]
    Class,
    /// `public`
    #[token("public")]
    Public,
    /// `private`
    #[token("private")]
    Private,
    /// `protected`
    #[token("protected")]
    Protected,
    /// `in`
    #[token("in")]
    In,
    /// `from`
    #[token("from")]
    From,

    /// Identifier tokens; variable or function names such as `x` or `total`.
    /// Bytes outside the ASCII range are accepted verbatim, so UTF-8
    /// identifiers work.
    #[regex(r"[A-Za-z_\u{80}-\u{10FFFF}][A-Za-z0-9_\u{80}-\u{10FFFF}]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `^/=`
    #[token("^/=")]
    RootAssign,
    /// `^^=`
    #[token("^^=")]
    XorAssign,
    /// `&=`
    #[token("&=")]
    AmpAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `<<=`
    #[token("<<=")]
    ShlAssign,
    /// `>>=`
    #[token(">>=")]
    ShrAssign,
    /// `<<<=`
    #[token("<<<=")]
    ShlZeroAssign,
    /// `>>>=`
    #[token(">>>=")]
    ShrZeroAssign,
    /// `&&=`
    #[token("&&=")]
    AndAssign,
    /// `||=`
    #[token("||=")]
    OrAssign,
    /// `~=`
    #[token("~=")]
    TildeAssign,
    /// `??=`
    #[token("??=")]
    CoalesceAssign,

    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `??`
    #[token("??")]
    Coalesce,
    /// `?:`
    #[token("?:")]
    Elvis,
    /// `^/`
    #[token("^/")]
    Root,
    /// `^^`
    #[token("^^")]
    CaretCaret,
    /// `<<<`
    #[token("<<<")]
    ShlZero,
    /// `>>>`
    #[token(">>>")]
    ShrZero,
    /// `<<`
    #[token("<<")]
    Shl,
    /// `>>`
    #[token(">>")]
    Shr,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `~`
    #[token("~")]
    Tilde,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `?`
    #[token("?")]
    Question,

    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `@`
    #[token("@")]
    At,

    /// Newlines; skipped, but they advance the line counter.
    #[regex(r"\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Incremented as newlines are processed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
fn lex_float(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn lex_integer(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice.
fn lex_bool(lex: &mut logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// `\n` and `\t` become newline and tab, while any other escaped character
/// stands for itself (`\\`, `\'`, `\"` included).
fn lex_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut resolved = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\'
           && let Some(escaped) = chars.next()
        {
            resolved.push(match escaped {
                              'n' => '\n',
                              't' => '\t',
                              other => other,
                          });
        } else {
            resolved.push(c);
        }
    }

    resolved
}

/// Tokenizes a whole source string into `(Token, line)` pairs.
///
/// The returned line numbers are the lines on which each token started,
/// counting from 1. Lexing stops at the first unrecognized input.
///
/// # Parameters
/// - `source`: The source text to tokenize.
///
/// # Returns
/// All tokens in source order.
///
/// # Errors
/// Returns a `ParseError` describing the first unknown character,
/// unterminated string literal, or out-of-range numeric literal.
///
/// # Example
/// ```
/// use foxl::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1;").unwrap();
/// let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();
///
/// assert_eq!(kinds,
///            vec![&Token::Let,
///                 &Token::Identifier("x".to_string()),
///                 &Token::Equals,
///                 &Token::Integer(1),
///                 &Token::Semicolon]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;

            return Err(if slice.starts_with('"') || slice.starts_with('\'') {
                ParseError::UnterminatedString { line }
            } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
                ParseError::InvalidNumber { literal: slice.to_string(),
                                            line }
            } else {
                ParseError::UnknownCharacter { found: slice.to_string(),
                                               line }
            });
        }
    }

    Ok(tokens)
}
