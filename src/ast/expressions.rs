use std::fmt::Display;

use crate::Span;

use super::statements::{FunctionAttr, Stmt};

/// An identifier: the segments of a (possibly dotted) name.
///
/// `a.b.c` lexes as one token and becomes `["a", "b", "c"]`; no
/// resolution happens at parse time.
pub type Identifier = Vec<String>;

/// Splits a raw identifier lexeme on `'.'`.
pub fn split_identifier(lexeme: &str) -> Identifier {
    lexeme.split('.').map(String::from).collect()
}

pub fn join_identifier(id: &Identifier) -> String {
    id.join(".")
}

/// An expression. Every case except `Empty` carries its source span.
#[derive(Debug, Clone, PartialEq)]
pub enum Exp {
    /// The unit value `()`
    Unit { loc: Span },
    Int { value: i64, loc: Span },
    Real { value: f64, loc: Span },
    Bool { value: bool, loc: Span },
    /// An identifier, optionally ascribed with a type expression: `x` or `x:real`
    Id {
        id: Identifier,
        ty: Option<Box<Exp>>,
        loc: Span,
    },
    UnOp {
        op: String,
        exp: Box<Exp>,
        loc: Span,
    },
    BinOp {
        op: String,
        left: Box<Exp>,
        right: Box<Exp>,
        loc: Span,
    },
    /// A call `f(a, b)`. The instance name is kept for downstream passes
    /// but is always `None` coming out of the parser.
    Call {
        instance: Option<Identifier>,
        id: Identifier,
        args: Vec<Exp>,
        attrs: Vec<FunctionAttr>,
        loc: Span,
    },
    If {
        cond: Box<Exp>,
        then_exp: Box<Exp>,
        else_exp: Box<Exp>,
        loc: Span,
    },
    Group { exp: Box<Exp>, loc: Span },
    /// A flattened tuple of two or more elements; never directly nested.
    Tuple { elems: Vec<Exp>, loc: Span },
    /// A statement sequence embedded in expression position: `{| ... |}`
    Seq {
        instance: Option<Identifier>,
        stmts: Vec<Stmt>,
        loc: Span,
    },
    /// A type-ascribed expression `e : t` where the value is not a bare identifier
    Typed {
        exp: Box<Exp>,
        ty: Box<Exp>,
        loc: Span,
    },
    Empty,
}

impl Exp {
    pub fn loc(&self) -> Span {
        match self {
            Exp::Unit { loc }
            | Exp::Int { loc, .. }
            | Exp::Real { loc, .. }
            | Exp::Bool { loc, .. }
            | Exp::Id { loc, .. }
            | Exp::UnOp { loc, .. }
            | Exp::BinOp { loc, .. }
            | Exp::Call { loc, .. }
            | Exp::If { loc, .. }
            | Exp::Group { loc, .. }
            | Exp::Tuple { loc, .. }
            | Exp::Seq { loc, .. }
            | Exp::Typed { loc, .. } => loc.clone(),
            Exp::Empty => Span::null(),
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, elems: &[Exp]) -> std::fmt::Result {
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", elem)?;
    }
    Ok(())
}

impl Display for Exp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exp::Unit { .. } => write!(f, "()"),
            Exp::Int { value, .. } => write!(f, "{}", value),
            Exp::Real { value, .. } => write!(f, "{:?}", value),
            Exp::Bool { value, .. } => write!(f, "{}", value),
            Exp::Id { id, ty: None, .. } => write!(f, "{}", join_identifier(id)),
            Exp::Id {
                id, ty: Some(ty), ..
            } => write!(f, "{}:{}", join_identifier(id), ty),
            Exp::UnOp { op, exp, .. } => write!(f, "({}{})", op, exp),
            Exp::BinOp {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op, right),
            Exp::Call { id, args, .. } => {
                write!(f, "{}(", join_identifier(id))?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Exp::If {
                cond,
                then_exp,
                else_exp,
                ..
            } => write!(f, "if {} then {} else {}", cond, then_exp, else_exp),
            Exp::Group { exp, .. } => write!(f, "({})", exp),
            Exp::Tuple { elems, .. } => write_list(f, elems),
            Exp::Seq { stmts, .. } => {
                write!(f, "{{| ")?;
                for stmt in stmts {
                    write!(f, "{} ", stmt)?;
                }
                write!(f, "|}}")
            }
            Exp::Typed { exp, ty, .. } => write!(f, "({} : {})", exp, ty),
            Exp::Empty => Ok(()),
        }
    }
}
