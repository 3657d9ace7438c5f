use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` token is encountered.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `line`: Line number of the opening brace.
///
/// # Returns
/// A `Statement::Block` containing all parsed statements.
///
/// # Errors
/// Returns a `ParseError` when a statement fails to parse or the input ends
/// before the closing brace; the latter is reported at the opening line.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::Expected { what: "'}' to close block".to_string(),
                                                      line }),
        }
    }

    Ok(Statement::Block { statements, line })
}

/// Parses a control-flow body: a braced block, or a single statement.
///
/// A lone statement is wrapped into a one-element block so the evaluator
/// only ever sees `Block` bodies.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the body.
///
/// # Returns
/// A `Statement::Block`.
pub fn parse_block_or_single<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LBrace, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return parse_block(tokens, line);
    }

    let single = parse_statement(tokens)?;
    let line = single.line_number();
    Ok(Statement::Block { statements: vec![single],
                          line })
}
