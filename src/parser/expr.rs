use crate::ast::expressions::{split_identifier, Exp};
use crate::ast::statements::NamedId;
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::tokens::{Token, TokenKind};

use super::lookups::{left_binding_power, BindingPower};
use super::parser::Parser;
use super::stmt::parse_stmt_sequence;

/// Pratt driver: nud of the first token, then led of every following
/// token whose left binding power exceeds `rbp`.
pub fn parse_expr(parser: &mut Parser, rbp: BindingPower) -> Result<Exp, Error> {
    let token = parser.advance();
    let nud = match parser.get_nud_lookup().get(&token.kind) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::NotExpecting {
                    got: token.describe(),
                },
                token.span.follow(),
            ))
        }
    };

    let mut left = nud(parser, &token)?;

    while rbp < left_binding_power(parser.peek()) {
        let token = parser.advance();
        let led = match parser.get_led_lookup().get(&token.kind) {
            Some(handler) => *handler,
            // Nothing in the binding power table reaches here; if it
            // ever does, report it instead of dropping the token.
            None => {
                return Err(Error::new(
                    ErrorImpl::Internal {
                        token: token.describe(),
                    },
                    token.span.follow(),
                ))
            }
        };
        left = led(parser, &token, left)?;
    }

    Ok(left)
}

pub fn parse_int_expr(_parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    match token.value.parse() {
        Ok(value) => Ok(Exp::Int {
            value,
            loc: token.span.clone(),
        }),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParse {
                token: token.describe(),
            },
            token.span.clone(),
        )),
    }
}

pub fn parse_real_expr(_parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    match token.value.parse() {
        Ok(value) => Ok(Exp::Real {
            value,
            loc: token.span.clone(),
        }),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParse {
                token: token.describe(),
            },
            token.span.clone(),
        )),
    }
}

pub fn parse_bool_expr(_parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    Ok(Exp::Bool {
        value: token.kind == TokenKind::True,
        loc: token.span.clone(),
    })
}

/// An identifier in expression position: a call when followed by `(`,
/// a type-ascribed identifier when followed by `:`, a plain identifier
/// otherwise.
pub fn parse_identifier_expr(parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    let id = split_identifier(&token.value);

    if parser.peek_kind() == TokenKind::OpenParen {
        parser.advance();

        let args = if parser.peek_kind() == TokenKind::CloseParen {
            vec![]
        } else {
            parse_expr_list(parser)?
        };
        let close = parser.consume(TokenKind::CloseParen)?;

        return Ok(Exp::Call {
            instance: None,
            id,
            args,
            attrs: vec![],
            loc: token.span.merge(&close.span),
        });
    }

    if parser.peek_kind() == TokenKind::Colon {
        parser.advance();
        let ty = parse_expr(parser, BindingPower::Comma)?;
        let loc = token.span.merge(&ty.loc());
        return Ok(Exp::Id {
            id,
            ty: Some(Box::new(ty)),
            loc,
        });
    }

    Ok(Exp::Id {
        id,
        ty: None,
        loc: token.span.clone(),
    })
}

/// Unary minus. Binds tighter than any binary operator, so `-a * b`
/// groups as `(-a) * b`.
pub fn parse_unary_expr(parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    if token.value != "-" {
        return Err(Error::new(
            ErrorImpl::NotExpecting {
                got: token.describe(),
            },
            token.span.follow(),
        ));
    }

    let exp = parse_expr(parser, BindingPower::Unary)?;
    let loc = token.span.merge(&exp.loc());
    Ok(Exp::UnOp {
        op: token.value.clone(),
        exp: Box::new(exp),
        loc,
    })
}

/// `()` is the unit value; anything else between parentheses is a group.
pub fn parse_grouping_expr(parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    if parser.peek_kind() == TokenKind::CloseParen {
        let close = parser.advance();
        return Ok(Exp::Unit {
            loc: token.span.merge(&close.span),
        });
    }

    let exp = parse_expr(parser, BindingPower::Default)?;
    let close = parser.consume(TokenKind::CloseParen)?;
    Ok(Exp::Group {
        exp: Box::new(exp),
        loc: token.span.merge(&close.span),
    })
}

/// `if cond then e1 else e2` — no parentheses around the condition.
pub fn parse_if_expr(parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.consume(TokenKind::Then)?;
    let then_exp = parse_expr(parser, BindingPower::Default)?;
    parser.consume(TokenKind::Else)?;
    let else_exp = parse_expr(parser, BindingPower::Default)?;

    let loc = token.span.merge(&else_exp.loc());
    Ok(Exp::If {
        cond: Box::new(cond),
        then_exp: Box::new(then_exp),
        else_exp: Box::new(else_exp),
        loc,
    })
}

/// A statement sequence in expression position: `{| ... |}`.
pub fn parse_seq_expr(parser: &mut Parser, token: &Token) -> Result<Exp, Error> {
    let stmts = parse_stmt_sequence(parser, TokenKind::CloseSeq)?;
    let close = parser.advance();
    Ok(Exp::Seq {
        instance: None,
        stmts,
        loc: token.span.merge(&close.span),
    })
}

pub fn parse_binary_expr(parser: &mut Parser, token: &Token, left: Exp) -> Result<Exp, Error> {
    // Equal left and right binding powers make these associate left
    let right = parse_expr(parser, left_binding_power(token))?;
    let loc = left.loc().merge(&right.loc());
    Ok(Exp::BinOp {
        op: token.value.clone(),
        left: Box::new(left),
        right: Box::new(right),
        loc,
    })
}

/// Comma as an infix assembles a flat tuple: sides that are already
/// tuples contribute their elements, so no tuple nests in another. The
/// result keeps the location of the first element.
pub fn parse_tuple_expr(parser: &mut Parser, _token: &Token, left: Exp) -> Result<Exp, Error> {
    let right = parse_expr(parser, BindingPower::Comma)?;

    let loc = left.loc();
    let mut elems = match left {
        Exp::Tuple { elems, .. } => elems,
        other => vec![other],
    };
    match right {
        Exp::Tuple {
            elems: mut more, ..
        } => elems.append(&mut more),
        other => elems.push(other),
    }

    Ok(Exp::Tuple { elems, loc })
}

/// Colon as an infix ascribes a type to a non-identifier value. The
/// right side binds below comma so an ascription never swallows one.
pub fn parse_typed_expr(parser: &mut Parser, _token: &Token, left: Exp) -> Result<Exp, Error> {
    let ty = parse_expr(parser, BindingPower::Comma)?;
    let loc = left.loc().merge(&ty.loc());
    Ok(Exp::Typed {
        exp: Box::new(left),
        ty: Box::new(ty),
        loc,
    })
}

/// Comma-separated expressions for call arguments and table literals.
/// Elements bind below comma so the list does not collapse to a tuple.
pub fn parse_expr_list(parser: &mut Parser) -> Result<Vec<Exp>, Error> {
    let mut elems = vec![parse_expr(parser, BindingPower::Comma)?];
    while parser.opt_consume(TokenKind::Comma) {
        elems.push(parse_expr(parser, BindingPower::Comma)?);
    }
    Ok(elems)
}

/// `name` or `name:type`.
pub fn parse_named_id(parser: &mut Parser) -> Result<NamedId, Error> {
    let token = parser.consume(TokenKind::Id)?;
    let id = split_identifier(&token.value);

    if parser.opt_consume(TokenKind::Colon) {
        let ty = parse_expr(parser, BindingPower::Comma)?;
        let loc = token.span.merge(&ty.loc());
        Ok(NamedId::Typed { id, ty, loc })
    } else {
        Ok(NamedId::Simple {
            id,
            loc: token.span.clone(),
        })
    }
}

/// A possibly empty comma-separated list of named identifiers.
pub fn parse_named_id_list(parser: &mut Parser) -> Result<Vec<NamedId>, Error> {
    if parser.peek_kind() != TokenKind::Id {
        return Ok(vec![]);
    }

    let mut params = vec![parse_named_id(parser)?];
    while parser.opt_consume(TokenKind::Comma) {
        params.push(parse_named_id(parser)?);
    }
    Ok(params)
}
