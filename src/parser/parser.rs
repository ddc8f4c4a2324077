use std::collections::HashMap;
use std::fs::read_to_string;
use std::rc::Rc;

use crate::ast::expressions::Exp;
use crate::ast::statements::Stmt;
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::lexer::{Lexer, Lines};
use crate::lexer::tokens::{Token, TokenKind};
use crate::{Span, MK_TOKEN};

use super::expr;
use super::lookups::{
    create_token_lookups, BindingPower, LedHandler, LedLookup, NudHandler, NudLookup, StmtHandler,
    StmtLookup,
};
use super::stmt;

/// The token stream: a one-token-lookahead cursor over the lexer, plus
/// the error log and the nud/led/statement dispatch tables.
///
/// `peeked` always holds a token; past the end of input it stays an EOF
/// token at the last known location.
pub struct Parser {
    lexer: Lexer,
    peeked: Token,
    prev: Token,
    has_errors: bool,
    errors: Vec<Error>,
    stmt_lookup: StmtLookup,
    nud_lookup: NudLookup,
    led_lookup: LedLookup,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let placeholder = MK_TOKEN!(TokenKind::Eof, String::from("EOF"), Span::null());
        let mut parser = Parser {
            lexer,
            peeked: placeholder.clone(),
            prev: placeholder,
            has_errors: false,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
        };
        parser.peeked = parser.read_token();
        parser.prev = parser.peeked.clone();
        parser
    }

    /// Next token from the lexer. Lexing errors go to the error log and
    /// lexing continues, so the cursor always holds a real token.
    fn read_token(&mut self) -> Token {
        loop {
            match self.lexer.next_token() {
                Ok(token) => return token,
                Err(error) => self.append_error(error),
            }
        }
    }

    pub fn peek(&self) -> &Token {
        &self.peeked
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peeked.kind
    }

    pub fn prev(&self) -> &Token {
        &self.prev
    }

    /// Unconditionally consumes the current token and returns it.
    pub fn advance(&mut self) -> Token {
        let next = self.read_token();
        let consumed = std::mem::replace(&mut self.peeked, next);
        self.prev = consumed.clone();
        consumed
    }

    /// Validates that the current token has the given kind, without
    /// consuming it. Errors point just past the previous token.
    pub fn expect(&self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peeked.kind == expected_kind {
            Ok(())
        } else if self.peeked.kind == TokenKind::Eof {
            Err(Error::new(
                ErrorImpl::UnexpectedEof {
                    expected: expected_kind.name().to_string(),
                },
                self.prev.span.follow(),
            ))
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind.name().to_string(),
                    got: self.peeked.describe(),
                },
                self.prev.span.follow(),
            ))
        }
    }

    /// `expect` plus `advance`.
    pub fn consume(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect(expected_kind)?;
        Ok(self.advance())
    }

    /// Consumes the current token iff it has the given kind.
    pub fn opt_consume(&mut self, expected_kind: TokenKind) -> bool {
        if self.peeked.kind == expected_kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn append_error(&mut self, error: Error) {
        self.has_errors = true;
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Span from `start` to the last consumed token.
    pub fn loc_from(&self, start: &Span) -> Span {
        start.merge(&self.prev.span)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NudLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LedLookup {
        &self.led_lookup
    }

    pub fn led(&mut self, kind: TokenKind, led_fn: LedHandler) {
        self.led_lookup.insert(kind, led_fn);
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NudHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    fn first_error(&self) -> Option<Error> {
        self.errors.first().cloned()
    }

    pub(crate) fn finish(self) -> (Vec<Error>, Lines, Rc<String>) {
        let Parser {
            mut lexer, errors, ..
        } = self;
        let file = lexer.file();
        (errors, lexer.take_lines(), file)
    }
}

/// The result of parsing a whole buffer: the statements or the
/// collected errors, plus the source-line table for diagnostics.
#[derive(Debug)]
pub struct ParserResults {
    pub outcome: Result<Vec<Stmt>, Vec<Error>>,
    pub lines: Lines,
    pub file: Rc<String>,
}

/// Top-level statement loop: statement lists until EOF, recovering at
/// statement boundaries so one bad construct does not abort the file.
pub(crate) fn parse_all(parser: &mut Parser) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    while parser.peek_kind() != TokenKind::Eof {
        match stmt::parse_stmt_list(parser) {
            Ok(s) => stmts.push(s),
            Err(error) => {
                parser.append_error(error);
                stmt::move_to_next_statement(parser);
                stmts.push(Stmt::Empty);
            }
        }
    }
    stmts
}

/// Parses everything the lexer produces into a result record. Errors
/// surface in source order; the statements are returned only when no
/// error was recorded.
pub fn parse(lexer: Lexer) -> ParserResults {
    let mut parser = Parser::new(lexer);
    create_token_lookups(&mut parser);

    let stmts = parse_all(&mut parser);

    let (errors, lines, file) = parser.finish();
    ParserResults {
        outcome: if errors.is_empty() {
            Ok(stmts)
        } else {
            Err(errors)
        },
        lines,
        file,
    }
}

/// Parses `text` with the synthetic file name `live.vult`.
pub fn parse_string(text: &str) -> ParserResults {
    parse(Lexer::new(text.to_string(), None))
}

/// Reads and parses a file. An unreadable file yields an error outcome
/// rather than a panic; the file handle is released on every path.
pub fn parse_file(path: &str) -> ParserResults {
    match read_to_string(path) {
        Ok(source) => parse(Lexer::new(source, Some(path.to_string()))),
        Err(_) => ParserResults {
            outcome: Err(vec![Error::simple("Failed to parse the file")]),
            lines: Lines::default(),
            file: Rc::new(path.to_string()),
        },
    }
}

fn text_parser(text: &str) -> Parser {
    let mut parser = Parser::new(Lexer::new(text.to_string(), None));
    create_token_lookups(&mut parser);
    parser
}

/// Parses a single expression covering the whole text.
pub fn parse_exp(text: &str) -> Result<Exp, Error> {
    let mut parser = text_parser(text);
    let exp = expr::parse_expr(&mut parser, BindingPower::Default)?;
    if let Some(error) = parser.first_error() {
        return Err(error);
    }
    parser.consume(TokenKind::Eof)?;
    Ok(exp)
}

/// Parses a single statement covering the whole text.
pub fn parse_stmt(text: &str) -> Result<Stmt, Error> {
    let mut parser = text_parser(text);
    let stmt = stmt::parse_stmt(&mut parser)?;
    if let Some(error) = parser.first_error() {
        return Err(error);
    }
    parser.consume(TokenKind::Eof)?;
    Ok(stmt)
}

/// Parses a block or a single statement covering the whole text.
pub fn parse_stmt_list(text: &str) -> Result<Stmt, Error> {
    let mut parser = text_parser(text);
    let stmt = stmt::parse_stmt_list(&mut parser)?;
    if let Some(error) = parser.first_error() {
        return Err(error);
    }
    parser.consume(TokenKind::Eof)?;
    Ok(stmt)
}

/// Parses an expression and renders it back as source text.
pub fn parse_dump_exp(text: &str) -> Result<String, Error> {
    parse_exp(text).map(|exp| exp.to_string())
}

/// Parses a statement list and renders it back as source text.
pub fn parse_dump_stmt_list(text: &str) -> Result<String, Error> {
    parse_stmt_list(text).map(|stmt| stmt.to_string())
}
