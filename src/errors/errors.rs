use std::fmt::Display;

use thiserror::Error as ErrorDerive;

use crate::Span;

/// An error produced while lexing or parsing.
///
/// Most errors are pointed: they carry the span a consumer should
/// highlight. Simple errors are the fallback for failures that never
/// reach the parser, such as an unreadable input file.
#[derive(Debug, Clone)]
pub enum Error {
    Pointed { error: ErrorImpl, loc: Span },
    Simple { message: String },
}

impl Error {
    pub fn new(error: ErrorImpl, loc: Span) -> Self {
        Error::Pointed { error, loc }
    }

    pub fn simple(message: impl Into<String>) -> Self {
        Error::Simple {
            message: message.into(),
        }
    }

    pub fn loc(&self) -> Option<&Span> {
        match self {
            Error::Pointed { loc, .. } => Some(loc),
            Error::Simple { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::Pointed { error, .. } => error.to_string(),
            Error::Simple { message } => message.clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The diagnostic message catalogue.
///
/// `expected` fields hold the stable human name of a token kind
/// (`TokenKind::name`); `got` and `token` fields hold a quoted lexeme
/// (`Token::describe`).
#[derive(ErrorDerive, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token}")]
    NumberParse { token: String },
    #[error("Expecting a {expected} but got {got}")]
    UnexpectedToken { expected: String, got: String },
    #[error("Expecting a {expected} but the file ended")]
    UnexpectedEof { expected: String },
    #[error("Not expecting to find {got}")]
    NotExpecting { got: String },
    #[error("Expecting a = while trying to parse a binding ({lhs}) but got {got}")]
    InvalidBinding { lhs: String, got: String },
    #[error("Expecting a ':' or a '{{' while trying to parse a type declaration but got {got}")]
    InvalidTypeDecl { got: String },
    #[error("internal parser error: no left denotation for {token}")]
    Internal { token: String },
}
