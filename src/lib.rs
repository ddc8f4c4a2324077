use std::fmt::Display;
use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A 1-based line/column position inside a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, col: 1 }
    }
}

/// A source span: file name plus start and end positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub file: Rc<String>,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(file: Rc<String>, start: Position, end: Position) -> Self {
        Span { file, start, end }
    }

    /// The unknown location. Attached to nothing the parser produces,
    /// but `merge` must tolerate it on either side.
    pub fn null() -> Self {
        Span {
            file: Rc::new(String::new()),
            start: Position::start(),
            end: Position::start(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.file.is_empty()
    }

    /// Span covering both `self` and `other`: earliest start, latest end.
    pub fn merge(&self, other: &Span) -> Span {
        if self.is_null() {
            return other.clone();
        }
        if other.is_null() {
            return self.clone();
        }
        Span {
            file: Rc::clone(&self.file),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The zero-width span immediately past the end of `self`.
    pub fn follow(&self) -> Span {
        Span {
            file: Rc::clone(&self.file),
            start: self.end,
            end: self.end,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.line, self.start.col)
    }
}
