use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{AccessModifier, AssignOp, ClassMember, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::unexpected,
            block::parse_block_or_single,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Statements are keyword-dispatched: `write`, `read`, `let`, `const`,
/// `if`, `while`, `for`, `include`, `class`, `function`, and `return` each
/// have their own form. A statement starting with an identifier is either a
/// reassignment, an indexed assignment, or a bare expression statement,
/// decided by lookahead. Anything else parses as a bare expression
/// statement, terminated by `;`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Write, _)) => parse_write(tokens),
        Some((Token::Read, _)) => parse_read_statement(tokens),
        Some((Token::Let, _)) => parse_var_decl(tokens, false),
        Some((Token::Const, _)) => parse_var_decl(tokens, true),
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::For, _)) => parse_for(tokens),
        Some((Token::Include, _)) => parse_include(tokens),
        Some((Token::Class, _)) => parse_class(tokens),
        Some((Token::Function, _)) => parse_function(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((_, line)) => {
            let line = *line;
            let statement = parse_assignment_or_expression(tokens)?;
            expect(tokens, &Token::Semicolon, "';' after statement", line)?;
            Ok(statement)
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Maps a token to its corresponding assignment operator.
///
/// Returns `None` for tokens that are not assignment-class operators.
#[must_use]
pub const fn token_to_assign_op(token: &Token) -> Option<AssignOp> {
    match token {
        Token::Equals => Some(AssignOp::Assign),
        Token::PlusAssign => Some(AssignOp::Add),
        Token::MinusAssign => Some(AssignOp::Sub),
        Token::StarAssign => Some(AssignOp::Mul),
        Token::SlashAssign => Some(AssignOp::Div),
        Token::PercentAssign => Some(AssignOp::Mod),
        Token::CaretAssign => Some(AssignOp::Pow),
        Token::RootAssign => Some(AssignOp::Root),
        Token::XorAssign => Some(AssignOp::BitXor),
        Token::AmpAssign => Some(AssignOp::BitAnd),
        Token::PipeAssign => Some(AssignOp::BitOr),
        Token::ShlAssign => Some(AssignOp::Shl),
        Token::ShrAssign => Some(AssignOp::Shr),
        Token::ShlZeroAssign => Some(AssignOp::ShlZero),
        Token::ShrZeroAssign => Some(AssignOp::ShrZero),
        Token::AndAssign => Some(AssignOp::And),
        Token::OrAssign => Some(AssignOp::Or),
        Token::TildeAssign => Some(AssignOp::BitNot),
        Token::CoalesceAssign => Some(AssignOp::Coalesce),
        _ => None,
    }
}

/// Parses a reassignment, an indexed assignment, or a bare expression,
/// without consuming a terminator.
///
/// The function performs a limited lookahead: if the next token is an
/// identifier and the following token is an assignment-class operator, a
/// [`Statement::Reassign`] is parsed. If the identifier is followed by a
/// bracketed index whose matching `]` is followed by an assignment-class
/// operator, a [`Statement::IndexAssign`] is parsed. Otherwise the input is
/// parsed as an expression statement (which covers calls and postfix
/// increments).
///
/// The `for` statement reuses this for its initializer and step clauses,
/// which is why no `;` is consumed here.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        match lookahead.peek() {
            Some((token, line)) if token_to_assign_op(token).is_some() => {
                let line = *line;
                let op = token_to_assign_op(token).unwrap();

                let name = if let Some((Token::Identifier(n), _)) = tokens.next() {
                    n.clone()
                } else {
                    unreachable!()
                };
                tokens.next();

                let value = parse_expression(tokens)?;
                return Ok(Statement::Reassign { name,
                                                op,
                                                value,
                                                line });
            },

            Some((Token::LBracket, _)) => {
                // Scan past the balanced index to see whether an assignment
                // operator follows; only then is this an indexed assignment.
                let mut scan = lookahead.clone();
                scan.next();
                let mut depth = 1;

                while depth > 0 {
                    match scan.next() {
                        Some((Token::LBracket, _)) => depth += 1,
                        Some((Token::RBracket, _)) => depth -= 1,
                        Some(_) => {},
                        None => break,
                    }
                }

                if let Some((token, _)) = scan.peek()
                   && let Some(op) = token_to_assign_op(token)
                {
                    let (name, line) = if let Some((Token::Identifier(n), l)) = tokens.next() {
                        (n.clone(), *l)
                    } else {
                        unreachable!()
                    };
                    tokens.next();

                    let index = parse_expression(tokens)?;
                    expect(tokens, &Token::RBracket, "']' after index", line)?;
                    tokens.next();

                    let value = parse_expression(tokens)?;
                    return Ok(Statement::IndexAssign { name,
                                                       index,
                                                       op,
                                                       value,
                                                       line });
                }
            },

            _ => {},
        }
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;
    Ok(Statement::Expression { expr, line })
}

/// Parses a `write(expression);` statement.
fn parse_write<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect(tokens, &Token::LParen, "'(' after 'write'", line)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after expression", line)?;
    expect(tokens, &Token::Semicolon, "';' after 'write' statement", line)?;

    Ok(Statement::Write { expr, line })
}

/// Parses a `read(prompt?) target?;` statement.
///
/// Both the prompt and the target variable are optional:
///
/// ```text
///     read();
///     read("Name: ");
///     read("Name: ") name;
/// ```
fn parse_read_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect(tokens, &Token::LParen, "'(' after 'read'", line)?;
    let prompt = match tokens.peek() {
        Some((Token::RParen, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, &Token::RParen, "')' after 'read'", line)?;

    let target = if let Some((Token::Identifier(name), _)) = tokens.peek() {
        let name = name.clone();
        tokens.next();
        Some(name)
    } else {
        None
    };

    expect(tokens, &Token::Semicolon, "';' after 'read' statement", line)?;

    Ok(Statement::Read { target, prompt, line })
}

/// Parses a variable declaration statement.
///
/// `let` declarations have an optional initializer; `const` declarations
/// require one (a constant that starts as null could never become anything
/// else).
///
/// Grammar:
/// ```text
///     let_decl   := "let" identifier ("=" expression)? ";"
///     const_decl := "const" identifier "=" expression ";"
/// ```
fn parse_var_decl<'a, I>(tokens: &mut Peekable<I>, constant: bool) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let name = parse_identifier(tokens)?;

    let initializer = if constant {
        expect(tokens, &Token::Equals, "'=' after constant name", line)?;
        Some(parse_expression(tokens)?)
    } else if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::Semicolon, "';' after variable declaration", line)?;

    Ok(Statement::VarDecl { name,
                            initializer,
                            constant,
                            line })
}

/// Parses an `if` statement with optional `else` branch.
///
/// `else if` chains need no special handling: the `else` body is parsed
/// with [`parse_block_or_single`], which accepts a nested `if` as a single
/// statement.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect(tokens, &Token::LParen, "'(' after 'if'", line)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after condition", line)?;

    let then_branch = Box::new(parse_block_or_single(tokens)?);

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_block_or_single(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses a `while` loop.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect(tokens, &Token::LParen, "'(' after 'while'", line)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after condition", line)?;

    let body = Box::new(parse_block_or_single(tokens)?);

    Ok(Statement::While { condition, body, line })
}

/// Parses a `for` statement, in either of its two forms.
///
/// The iteration form binds a loop variable to each element of an array:
///
/// ```text
///     for (x in xs) { ... }
/// ```
///
/// The C-style form runs an initializer, a condition, and a step clause:
///
/// ```text
///     for (let i = 0; i < n; i++) { ... }
/// ```
///
/// The initializer may be a `let` declaration or an assignment/expression;
/// the step clause is an assignment or expression without a terminator.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect(tokens, &Token::LParen, "'(' after 'for'", line)?;

    // `for (x in xs)` is recognized by the `in` immediately after the loop
    // variable.
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::In, _)) = lookahead.peek() {
            let variable = parse_identifier(tokens)?;
            tokens.next();

            let iterable = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')' after iterable", line)?;

            let body = Box::new(parse_block_or_single(tokens)?);

            return Ok(Statement::ForEach { variable,
                                           iterable,
                                           body,
                                           line });
        }
    }

    let initializer = if let Some((Token::Let, _)) = tokens.peek() {
        parse_var_decl(tokens, false)?
    } else {
        let init = parse_assignment_or_expression(tokens)?;
        expect(tokens, &Token::Semicolon, "';' after loop initializer", line)?;
        init
    };

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon, "';' after loop condition", line)?;

    let step = parse_assignment_or_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after loop step", line)?;

    let body = Box::new(parse_block_or_single(tokens)?);

    Ok(Statement::For { initializer: Box::new(initializer),
                        condition,
                        step: Box::new(step),
                        body,
                        line })
}

/// Parses an `include` statement.
///
/// Grammar:
/// ```text
///     include := "include" (target ("." identifier)* "from")? STRING ";"
/// ```
///
/// The optional dotted target is carried through to the evaluator as one
/// name.
fn parse_include<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let target = if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut name = parse_identifier(tokens)?;

        while let Some((Token::Dot, _)) = tokens.peek() {
            tokens.next();
            name.push('.');
            name.push_str(&parse_identifier(tokens)?);
        }

        expect(tokens, &Token::From, "'from' in include statement", line)?;
        Some(name)
    } else {
        None
    };

    let path = match tokens.next() {
        Some((Token::Str(path), _)) => path.clone(),
        _ => {
            return Err(ParseError::Expected { what: "file path string in include statement"
                                                                            .to_string(),
                                              line });
        },
    };

    expect(tokens, &Token::Semicolon, "';' after include statement", line)?;

    Ok(Statement::Include { path, target, line })
}

/// Parses a class declaration.
///
/// The body holds fields and methods, each with an optional access modifier
/// that defaults to private. A member followed by `(` is a method,
/// otherwise it is a `type name;` field.
fn parse_class<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LBrace, "'{' after class name", line)?;

    let mut members = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => members.push(parse_class_member(tokens)?),
            None => {
                return Err(ParseError::Expected { what: "'}' to close class body".to_string(),
                                                  line });
            },
        }
    }

    Ok(Statement::ClassDecl { name, members, line })
}

/// Parses one class member, field or method.
fn parse_class_member<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ClassMember>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let modifier = match tokens.peek() {
        Some((Token::Public, _)) => {
            tokens.next();
            AccessModifier::Public
        },
        Some((Token::Private, _)) => {
            tokens.next();
            AccessModifier::Private
        },
        Some((Token::Protected, _)) => {
            tokens.next();
            AccessModifier::Protected
        },
        _ => AccessModifier::Private,
    };

    let mut lookahead = tokens.clone();
    lookahead.next();

    if let Some((Token::LParen, _)) = lookahead.peek() {
        let (name, line) = match tokens.next() {
            Some((Token::Identifier(n), l)) => (n.clone(), *l),
            other => {
                return Err(ParseError::UnexpectedToken { token: format!("expected method name, found {other:?}"),
                                                         line:  0, });
            },
        };
        tokens.next();

        let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, line)?;
        let body = Rc::new(parse_block_or_single(tokens)?);

        return Ok(ClassMember::Method { modifier,
                                        name,
                                        params,
                                        body,
                                        line });
    }

    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let type_name = parse_identifier(tokens)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::Semicolon, "';' after field declaration", line)?;

    Ok(ClassMember::Field { modifier,
                            type_name,
                            name,
                            line })
}

/// Parses a function declaration.
///
/// Grammar:
/// ```text
///     function := "function" identifier "(" params ")" body
/// ```
///
/// The body is stored behind an `Rc` so calls share the subtree instead of
/// cloning it.
fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen, "'(' after function name", line)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, line)?;

    let body = Rc::new(parse_block_or_single(tokens)?);

    Ok(Statement::FuncDecl { name,
                             params,
                             body,
                             line })
}

/// Parses a `return` statement.
///
/// The value is optional, and the terminating `;` may be elided at the end
/// of a block or at end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let value = match tokens.peek() {
        Some((Token::Semicolon | Token::RBrace, _)) | None => None,
        _ => Some(parse_expression(tokens)?),
    };

    match tokens.peek() {
        Some((Token::Semicolon, _)) => {
            tokens.next();
        },
        Some((Token::RBrace, _)) | None => {},
        Some(_) => return unexpected(tokens),
    }

    Ok(Statement::Return { value, line })
}
