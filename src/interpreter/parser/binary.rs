use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator; `None` for all other tokens. Assignment operators are not
/// binary operators here, they belong to reassignment statements.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Example
/// ```
/// use foxl::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Semicolon), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Root => Some(BinaryOperator::Root),
        Token::CaretCaret => Some(BinaryOperator::BitXor),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Shl => Some(BinaryOperator::Shl),
        Token::Shr => Some(BinaryOperator::Shr),
        Token::ShlZero => Some(BinaryOperator::ShlZero),
        Token::ShrZero => Some(BinaryOperator::ShrZero),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::OrOr => Some(BinaryOperator::Or),
        Token::Coalesce => Some(BinaryOperator::Coalesce),
        Token::In => Some(BinaryOperator::In),
        _ => None,
    }
}

/// Parses one left-associative precedence level.
///
/// Every level of the ladder has the same shape: parse the next-tighter
/// level, then fold in operators belonging to this level while they keep
/// appearing. The levels only differ in which operators they accept, so the
/// shared loop lives here.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      belongs: fn(BinaryOperator) -> bool,
                      next: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && belongs(op)
        {
            let line = *line;
            tokens.next();

            let right = next(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions, the loosest-binding operator level.
///
/// Grammar: `logical_or := nullish ("||" nullish)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// A binary expression tree with `BinaryOperator::Or` nodes.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, |op| matches!(op, BinaryOperator::Or), parse_nullish)
}

/// Parses nullish-coalescing expressions.
///
/// `??` binds tighter than `||` and looser than `&&`.
///
/// Grammar: `nullish := logical_and ("??" logical_and)*`
pub fn parse_nullish<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                |op| matches!(op, BinaryOperator::Coalesce),
                parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, |op| matches!(op, BinaryOperator::And), parse_equality)
}

/// Parses equality expressions.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                |op| matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual),
                parse_relational)
}

/// Parses relational and membership expressions.
///
/// Handles `<`, `<=`, `>`, `>=`, `in`, and the two-word `not in`. The
/// membership forms sit at this level so `x in xs == true` groups the
/// membership test first.
///
/// Grammar: `relational := additive (("<" | "<=" | ">" | ">=" | "in" | "not"
/// "in") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;

    loop {
        // `not in` is two tokens; commit only when both are present.
        if let Some((Token::Identifier(word), line)) = tokens.peek()
           && word == "not"
        {
            let line = *line;
            let mut lookahead = tokens.clone();
            lookahead.next();

            if let Some((Token::In, _)) = lookahead.peek() {
                tokens.next();
                tokens.next();

                let right = parse_additive(tokens)?;
                left = Expr::Binary { left:  Box::new(left),
                                      op:    BinaryOperator::NotIn,
                                      right: Box::new(right),
                                      line, };
                continue;
            }
        }

        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::LessEqual
                       | BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual
                       | BinaryOperator::In)
        {
            let line = *line;
            tokens.next();

            let right = parse_additive(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub),
                parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// Grammar: `multiplicative := bitwise (("*" | "/" | "%") bitwise)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                |op| {
                    matches!(op,
                             BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
                },
                parse_bitwise)
}

/// Parses the tightest binary level: powers, roots, shifts and bitwise
/// operators.
///
/// Grammar: `bitwise := unary (("^" | "^/" | "^^" | "<<" | ">>" | "<<<" |
/// ">>>" | "&" | "|") unary)*`
pub fn parse_bitwise<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                |op| {
                    matches!(op,
                             BinaryOperator::Pow
                             | BinaryOperator::Root
                             | BinaryOperator::BitXor
                             | BinaryOperator::Shl
                             | BinaryOperator::Shr
                             | BinaryOperator::ShlZero
                             | BinaryOperator::ShrZero
                             | BinaryOperator::BitAnd
                             | BinaryOperator::BitOr)
                },
                parse_unary)
}

/// Reports an unexpected-token error at the current position.
///
/// Shared by callers that have exhausted their alternatives.
pub(in crate::interpreter::parser) fn unexpected<'a, I, T>(tokens: &mut Peekable<I>)
                                                           -> ParseResult<T>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
