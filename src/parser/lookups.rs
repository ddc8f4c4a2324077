use std::collections::HashMap;

use crate::ast::expressions::Exp;
use crate::ast::statements::Stmt;
use crate::errors::errors::Error;
use crate::lexer::tokens::{Token, TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Left binding powers, weakest first. The discriminant order is the
/// precedence order, so comparing variants compares precedences.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Ascription,
    Comma,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NudHandler = fn(&mut Parser, &Token) -> Result<Exp, Error>;
pub type LedHandler = fn(&mut Parser, &Token, Exp) -> Result<Exp, Error>;

/// Left binding power of the token about to be consumed as an infix.
///
/// Keyed on the kind and, for operators, the lexeme. Anything not
/// listed cannot continue an expression.
pub fn left_binding_power(token: &Token) -> BindingPower {
    match token.kind {
        TokenKind::Colon => BindingPower::Ascription,
        TokenKind::Comma => BindingPower::Comma,
        TokenKind::Op => match token.value.as_str() {
            "||" | "&&" => BindingPower::Logical,
            "==" | "!=" | ">" | "<" | ">=" | "<=" => BindingPower::Relational,
            "+" | "-" => BindingPower::Additive,
            "*" | "/" | "%" => BindingPower::Multiplicative,
            _ => BindingPower::Default,
        },
        _ => BindingPower::Default,
    }
}

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Op, parse_binary_expr);
    parser.led(TokenKind::Comma, parse_tuple_expr);
    parser.led(TokenKind::Colon, parse_typed_expr);

    // Literals and symbols
    parser.nud(TokenKind::Int, parse_int_expr);
    parser.nud(TokenKind::Real, parse_real_expr);
    parser.nud(TokenKind::True, parse_bool_expr);
    parser.nud(TokenKind::False, parse_bool_expr);
    parser.nud(TokenKind::Id, parse_identifier_expr);
    parser.nud(TokenKind::Op, parse_unary_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::OpenSeq, parse_seq_expr);

    // Statements
    parser.stmt(TokenKind::Val, parse_val_stmt);
    parser.stmt(TokenKind::Mem, parse_mem_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Fun, parse_function_stmt);
    parser.stmt(TokenKind::And, parse_function_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Type, parse_type_stmt);
    parser.stmt(TokenKind::Table, parse_table_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NudLookup = HashMap<TokenKind, NudHandler>;
pub type LedLookup = HashMap<TokenKind, LedHandler>;
