use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};
use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*(\\.[a-zA-Z_][a-zA-Z0-9_]*)*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?([eE][-+]?[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\\/\\/.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\\{\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenSeq, "{|") },
        RegexPattern { regex: Regex::new("\\|\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseSeq, "|}") },
        RegexPattern { regex: Regex::new("\\[\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenArray, "[|") },
        RegexPattern { regex: Regex::new("\\|\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseArray, "|]") },
        RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "==") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "!=") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "<=") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ">=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "<") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ">") },
        RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "||") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "&&") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equal, "=") },
        RegexPattern { regex: Regex::new("@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semi, ";") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "-") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "*") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "/") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "%") },
    ];
}

/// The source-line table accumulated for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    pub fn new(source: &str) -> Self {
        Lines {
            lines: source.lines().map(String::from).collect(),
        }
    }

    /// Returns the text of the 1-based line `number`.
    pub fn line(&self, number: u32) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.lines.get((number - 1) as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    col: u32,
    file: Rc<String>,
    lines: Lines,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("live.vult"))
        };

        Lexer {
            pos: 0,
            line: 1,
            col: 1,
            lines: Lines::new(&source),
            source,
            file: file_name,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Lines {
        std::mem::take(&mut self.lines)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span of a token whose lexeme is `text`, starting at the current
    /// position. Lexemes never contain newlines.
    pub fn token_span(&self, text: &str) -> Span {
        Span {
            file: Rc::clone(&self.file),
            start: Position {
                line: self.line,
                col: self.col,
            },
            end: Position {
                line: self.line,
                col: self.col + text.chars().count() as u32,
            },
        }
    }

    /// Advances past `text`, updating line/column counters.
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += text.len();
    }

    fn eof_token(&self) -> Token {
        let here = Position {
            line: self.line,
            col: self.col,
        };
        MK_TOKEN!(
            TokenKind::Eof,
            String::from("EOF"),
            Span {
                file: Rc::clone(&self.file),
                start: here,
                end: here,
            }
        )
    }

    /// Produces the next token, skipping whitespace and comments.
    ///
    /// Past the end of input this keeps returning an EOF token at the
    /// last known position. An unlexable character is consumed before
    /// the error is returned, so the caller can always make progress.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                return Ok(self.eof_token());
            }

            let mut matched = None;
            for pattern in PATTERNS.iter() {
                let found = pattern.regex.find(self.remainder());
                if let Some(found) = found {
                    if found.start() == 0 {
                        matched = Some((pattern.handler)(self, &pattern.regex));
                        break;
                    }
                }
            }

            match matched {
                Some(Some(token)) => return Ok(token),
                // Whitespace or comment; keep scanning
                Some(None) => continue,
                None => {
                    let bad = self.remainder().chars().next().unwrap().to_string();
                    let span = self.token_span(&bad);
                    self.advance_str(&bad);
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken {
                            token: format!("'{}'", bad),
                        },
                        span,
                    ));
                }
            }
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let kind = if matched.contains('.') || matched.contains('e') || matched.contains('E') {
        TokenKind::Real
    } else {
        TokenKind::Int
    };

    let span = lexer.token_span(&matched);
    lexer.advance_str(&matched);
    Some(MK_TOKEN!(kind, matched, span))
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    lexer.advance_str(&matched);
    None
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let kind = match RESERVED_LOOKUP.get(matched.as_str()) {
        Some(kind) => *kind,
        None => TokenKind::Id,
    };

    let span = lexer.token_span(&matched);
    lexer.advance_str(&matched);
    Some(MK_TOKEN!(kind, matched, span))
}
