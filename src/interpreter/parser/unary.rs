use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::unexpected,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
/// - `~`  (bitwise complement)
/// - `++` / `--` (pre-increment and pre-decrement)
///
/// Prefix operators are right-associative, so `!-x` parses as `!(-x)`.
/// If no prefix operator is present, the function delegates to
/// [`parse_primary`] and then applies postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "~" | "++" | "--") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression possibly followed by
/// postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let prefix = match tokens.peek() {
        Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
        Some((Token::Bang, line)) => Some((UnaryOperator::Not, *line)),
        Some((Token::Tilde, line)) => Some((UnaryOperator::BitNot, *line)),
        Some((Token::PlusPlus, line)) => Some((UnaryOperator::PreIncrement, *line)),
        Some((Token::MinusMinus, line)) => Some((UnaryOperator::PreDecrement, *line)),
        _ => None,
    };

    if let Some((op, line)) = prefix {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Unary { op,
                                operand: Box::new(operand),
                                line });
    }

    let primary = parse_primary(tokens)?;
    parse_postfix(tokens, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - identifiers and function calls
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - the `read(...)` input form
///
/// This function does not handle unary or postfix operators. It dispatches
/// to specialized parsing functions depending on the leading token.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
///              | "[" elements "]"
///              | "read" "(" expression? ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Integer(..) | Token::Float(..) | Token::Bool(..) | Token::Str(..), _) => {
            parse_literal(tokens)
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::Read, _) => parse_read_expression(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        _ => unexpected(tokens),
    }
}

/// Parses postfix operators applied to an expression.
///
/// Two postfix constructs exist:
///
/// 1. **Array indexing**, with chaining: `a[0][1]`.
/// 2. **Postfix `++`/`--`**, valid on variables only: `i++`.
///
/// Parsing continues until no further postfix operator is found.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
///              | postfix ("++" | "--")
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if an `[` is not closed with `]` or a postfix
/// increment is applied to something other than a variable.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LBracket, index_line)) => {
                let index_line = *index_line;
                tokens.next();

                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, "']' after array index", index_line)?;

                node = Expr::Index { array: Box::new(node),
                                     index: Box::new(index),
                                     line:  index_line, };
            },

            Some((Token::PlusPlus | Token::MinusMinus, line)) => {
                let line = *line;
                if !matches!(node, Expr::Variable { .. }) {
                    return Err(ParseError::Expected { what: "a variable before postfix \
                                                            '++'/'--'"
                                                                              .to_string(),
                                                      line });
                }

                let op = if matches!(tokens.next(), Some((Token::PlusPlus, _))) {
                    UnaryOperator::PostIncrement
                } else {
                    UnaryOperator::PostDecrement
                };

                node = Expr::Unary { op,
                                     operand: Box::new(node),
                                     line };
            },

            _ => break,
        }
    }
    Ok(node)
}

/// Parses a numeric, string, or boolean literal.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (tok, line) = tokens.next().unwrap();
    let value = match tok {
        Token::Integer(n) => (*n).into(),
        Token::Float(x) => (*x).into(),
        Token::Bool(b) => (*b).into(),
        Token::Str(s) => s.as_str().into(),
        _ => unreachable!(),
    };

    Ok(Expr::Literal { value, line: *line })
}

/// Parses a parenthesized expression.
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after expression", line)?;
    Ok(expr)
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed using `parse_expression`, separated by commas. An
/// empty array `[]` is accepted.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = tokens.next().unwrap();
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket, *line)?;
    Ok(Expr::Array { elements,
                     line: *line })
}

/// Parses the `read(...)` input expression.
///
/// The prompt is optional: `read()` reads a line silently, `read("? ")`
/// prints the prompt first.
///
/// Grammar: `read := "read" "(" expression? ")"`
pub(in crate::interpreter::parser) fn parse_read_expression<'a, I>(tokens: &mut Peekable<I>)
                                                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    expect(tokens, &Token::LParen, "'(' after 'read'", line)?;

    let prompt = match tokens.peek() {
        Some((Token::RParen, _)) => None,
        _ => Some(Box::new(parse_expression(tokens)?)),
    };

    expect(tokens, &Token::RParen, "')' after 'read' prompt", line)?;

    Ok(Expr::Read { prompt, line })
}

/// Parses an identifier or a function call.
///
/// The function first consumes the identifier token. If the next token is
/// `(`, a call expression with comma-separated arguments is parsed;
/// otherwise the identifier is a variable reference.
///
/// # Returns
/// - [`Expr::Call`] if followed by parentheses,
/// - [`Expr::Variable`] otherwise.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(n), line)) => (n.clone(), *line),
        _ => unreachable!("caller checked for an identifier"),
    };

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, line)?;
            Ok(Expr::Call { name,
                            arguments,
                            line })
        },
        _ => Ok(Expr::Variable { name, line }),
    }
}
