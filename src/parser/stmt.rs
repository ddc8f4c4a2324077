use crate::ast::expressions::{split_identifier, Exp};
use crate::ast::statements::{FunctionAttr, Stmt, ValDecl};
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::tokens::TokenKind;

use super::expr::{parse_expr, parse_expr_list, parse_named_id_list};
use super::lookups::BindingPower;
use super::parser::Parser;

/// Dispatches on the current token kind; anything without a dedicated
/// production is a binding statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser.get_stmt_lookup().get(&parser.peek_kind()).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    parse_bind_stmt(parser)
}

/// `val <lhs> [= <rhs>];` — the lhs is a full expression (a tuple or a
/// typed identifier, for instance) and is not checked to be an lvalue.
pub fn parse_val_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    let lhs = parse_expr(parser, BindingPower::Default)?;
    let rhs = if parser.opt_consume(TokenKind::Equal) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.consume(TokenKind::Semi)?;

    Ok(Stmt::Val {
        lhs,
        rhs,
        loc: parser.loc_from(&start.span),
    })
}

/// `mem <lhs> [@ <init>] [= <rhs>];`
pub fn parse_mem_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    let lhs = parse_expr(parser, BindingPower::Default)?;
    let init = if parser.opt_consume(TokenKind::At) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    let rhs = if parser.opt_consume(TokenKind::Equal) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.consume(TokenKind::Semi)?;

    Ok(Stmt::Mem {
        lhs,
        init,
        rhs,
        loc: parser.loc_from(&start.span),
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    let exp = parse_expr(parser, BindingPower::Default)?;
    parser.consume(TokenKind::Semi)?;

    Ok(Stmt::Return {
        exp,
        loc: parser.loc_from(&start.span),
    })
}

/// Fallback production: `lhs = rhs;`, or `exp;` with the result
/// discarded (the lhs becomes unit).
pub fn parse_bind_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let lhs = parse_expr(parser, BindingPower::Default)?;

    match parser.peek_kind() {
        TokenKind::Equal => {
            parser.advance();
            let rhs = parse_expr(parser, BindingPower::Default)?;
            parser.consume(TokenKind::Semi)?;
            let loc = lhs.loc().merge(&parser.prev().span);
            Ok(Stmt::Bind { lhs, rhs, loc })
        }
        TokenKind::Semi => {
            parser.advance();
            let loc = lhs.loc();
            Ok(Stmt::Bind {
                lhs: Exp::Unit { loc: loc.clone() },
                rhs: lhs,
                loc,
            })
        }
        _ => Err(Error::new(
            ErrorImpl::InvalidBinding {
                lhs: lhs.to_string(),
                got: parser.peek().describe(),
            },
            parser.prev().span.follow(),
        )),
    }
}

/// `if (<cond>) <stmts> [else <stmts>]` — the condition is
/// parenthesized, unlike the expression form.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    parser.consume(TokenKind::OpenParen)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.consume(TokenKind::CloseParen)?;

    let then_stmt = parse_stmt_list(parser)?;
    let else_stmt = if parser.opt_consume(TokenKind::Else) {
        Some(Box::new(parse_stmt_list(parser)?))
    } else {
        None
    };

    Ok(Stmt::If {
        cond,
        then_stmt: Box::new(then_stmt),
        else_stmt,
        loc: parser.loc_from(&start.span),
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    parser.consume(TokenKind::OpenParen)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.consume(TokenKind::CloseParen)?;

    let body = parse_stmt_list(parser)?;

    Ok(Stmt::While {
        cond,
        body: Box::new(body),
        loc: parser.loc_from(&start.span),
    })
}

/// `fun name(params) [: ret] <stmts>`. The `and` keyword introduces the
/// same production tagged as a join function.
pub fn parse_function_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance();
    let attrs = if keyword.kind == TokenKind::And {
        vec![FunctionAttr::JoinFunction]
    } else {
        vec![]
    };

    let name = parser.consume(TokenKind::Id)?;
    let id = split_identifier(&name.value);

    parser.consume(TokenKind::OpenParen)?;
    let params = parse_named_id_list(parser)?;
    parser.consume(TokenKind::CloseParen)?;

    let ret = if parser.opt_consume(TokenKind::Colon) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_stmt_list(parser)?;

    Ok(Stmt::Fun {
        id,
        params,
        body: Box::new(body),
        ret,
        attrs,
        loc: parser.loc_from(&name.span),
    })
}

/// `type Name[(params)] : alias [;]` or
/// `type Name[(params)] { val member : type; ... }`
pub fn parse_type_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    let name = parser.consume(TokenKind::Id)?;
    let id = split_identifier(&name.value);

    let params = if parser.opt_consume(TokenKind::OpenParen) {
        let params = parse_named_id_list(parser)?;
        parser.consume(TokenKind::CloseParen)?;
        params
    } else {
        vec![]
    };

    match parser.peek_kind() {
        TokenKind::Colon => {
            parser.advance();
            let alias = parse_expr(parser, BindingPower::Ascription)?;
            parser.opt_consume(TokenKind::Semi);
            Ok(Stmt::AliasType {
                id,
                params,
                alias,
                loc: parser.loc_from(&start.span),
            })
        }
        TokenKind::OpenCurly => {
            parser.advance();
            let mut decls = Vec::new();
            while parser.peek_kind() != TokenKind::CloseCurly {
                decls.push(parse_val_decl(parser)?);
            }
            parser.consume(TokenKind::CloseCurly)?;
            Ok(Stmt::Type {
                id,
                params,
                decls,
                loc: parser.loc_from(&start.span),
            })
        }
        _ => Err(Error::new(
            ErrorImpl::InvalidTypeDecl {
                got: parser.peek().describe(),
            },
            parser.prev().span.follow(),
        )),
    }
}

/// `val member : type;` inside a type body. The type binds at the
/// ascription level so it stops before the closing `;`.
fn parse_val_decl(parser: &mut Parser) -> Result<ValDecl, Error> {
    parser.consume(TokenKind::Val)?;
    let member = parser.consume(TokenKind::Id)?;
    parser.consume(TokenKind::Colon)?;
    let ty = parse_expr(parser, BindingPower::Ascription)?;
    parser.consume(TokenKind::Semi)?;

    let loc = member.span.merge(&ty.loc());
    Ok(ValDecl {
        id: split_identifier(&member.value),
        ty,
        loc,
    })
}

/// `table name = [| e1, e2, ... |];`
pub fn parse_table_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();

    let name = parser.consume(TokenKind::Id)?;
    let id = split_identifier(&name.value);

    parser.consume(TokenKind::Equal)?;
    parser.consume(TokenKind::OpenArray)?;
    let elems = parse_expr_list(parser)?;
    parser.consume(TokenKind::CloseArray)?;
    parser.consume(TokenKind::Semi)?;

    Ok(Stmt::Table {
        id,
        elems,
        loc: parser.loc_from(&start.span),
    })
}

/// A block `{ ... }`, or a single statement wrapped as a one-element
/// block (how bodies such as `if (x) return y;` work).
pub fn parse_stmt_list(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek_kind() == TokenKind::OpenCurly {
        let open = parser.advance();
        let stmts = parse_stmt_sequence(parser, TokenKind::CloseCurly)?;
        let close = parser.advance();
        return Ok(Stmt::Block {
            instance: None,
            stmts,
            loc: open.span.merge(&close.span),
        });
    }

    let stmt = parse_stmt(parser)?;
    let loc = stmt.loc();
    Ok(Stmt::Block {
        instance: None,
        stmts: vec![stmt],
        loc,
    })
}

/// Statements up to (but not including) `close`, recovering at
/// statement boundaries. Reaching the end of input raises the standard
/// expectation error for `close`.
pub fn parse_stmt_sequence(parser: &mut Parser, close: TokenKind) -> Result<Vec<Stmt>, Error> {
    let mut stmts = Vec::new();
    while parser.peek_kind() != close {
        if parser.peek_kind() == TokenKind::Eof {
            parser.expect(close)?;
        }
        match parse_stmt(parser) {
            Ok(stmt) => stmts.push(stmt),
            Err(error) => {
                parser.append_error(error);
                move_to_next_statement(parser);
                stmts.push(Stmt::Empty);
            }
        }
    }
    Ok(stmts)
}

/// Panic-mode synchronization: discard tokens until a statement
/// boundary. `;` and `}` are consumed; EOF and the strong-start
/// keywords are left in place to begin the next statement.
pub fn move_to_next_statement(parser: &mut Parser) {
    loop {
        match parser.peek_kind() {
            TokenKind::Semi => {
                parser.advance();
                return;
            }
            TokenKind::Eof => return,
            TokenKind::Fun | TokenKind::Val | TokenKind::If | TokenKind::Return => return,
            TokenKind::CloseCurly => {
                parser.advance();
                return;
            }
            _ => {
                parser.advance();
            }
        }
    }
}
