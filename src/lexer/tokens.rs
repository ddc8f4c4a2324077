use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("fun", TokenKind::Fun);
        map.insert("and", TokenKind::And);
        map.insert("val", TokenKind::Val);
        map.insert("mem", TokenKind::Mem);
        map.insert("return", TokenKind::Return);
        map.insert("while", TokenKind::While);
        map.insert("type", TokenKind::Type);
        map.insert("table", TokenKind::Table);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,
    Id,
    Int,
    Real,

    /// A binary or unary operator lexeme: `+ - * / % == != > < >= <= || &&`
    Op,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    /// `{|`
    OpenSeq,
    /// `|}`
    CloseSeq,
    /// `[|`
    OpenArray,
    /// `|]`
    CloseArray,

    Colon,
    Comma,
    Semi,
    Equal,
    At,

    // Reserved
    True,
    False,
    If,
    Then,
    Else,
    Fun,
    And,
    Val,
    Mem,
    Return,
    While,
    Type,
    Table,
}

impl TokenKind {
    /// Stable human name used in diagnostics, e.g. `Semi` -> `';'`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Id => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Real => "real",
            TokenKind::Op => "operator",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::OpenSeq => "'{|'",
            TokenKind::CloseSeq => "'|}'",
            TokenKind::OpenArray => "'[|'",
            TokenKind::CloseArray => "'|]'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::Equal => "'='",
            TokenKind::At => "'@'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Fun => "'fun'",
            TokenKind::And => "'and'",
            TokenKind::Val => "'val'",
            TokenKind::Mem => "'mem'",
            TokenKind::Return => "'return'",
            TokenKind::While => "'while'",
            TokenKind::Type => "'type'",
            TokenKind::Table => "'table'",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// How the token appears in a diagnostic message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => String::from("the end of file"),
            _ => format!("'{}'", self.value),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
