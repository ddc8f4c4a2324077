use std::fmt::Display;

use crate::Span;

use super::expressions::{join_identifier, Exp, Identifier};

/// Attributes attached to a function definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionAttr {
    /// The function was introduced with the `and` keyword.
    JoinFunction,
}

/// A function parameter or type parameter, optionally type-annotated.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedId {
    Simple { id: Identifier, loc: Span },
    Typed { id: Identifier, ty: Exp, loc: Span },
}

impl NamedId {
    pub fn loc(&self) -> Span {
        match self {
            NamedId::Simple { loc, .. } | NamedId::Typed { loc, .. } => loc.clone(),
        }
    }
}

impl Display for NamedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamedId::Simple { id, .. } => write!(f, "{}", join_identifier(id)),
            NamedId::Typed { id, ty, .. } => write!(f, "{}:{}", join_identifier(id), ty),
        }
    }
}

/// A member declaration in a `type` body: `val name : type;`
#[derive(Debug, Clone, PartialEq)]
pub struct ValDecl {
    pub id: Identifier,
    pub ty: Exp,
    pub loc: Span,
}

/// A statement. Every case except `Empty` carries its source span;
/// `Empty` is produced only by error recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Val {
        lhs: Exp,
        rhs: Option<Exp>,
        loc: Span,
    },
    Mem {
        lhs: Exp,
        init: Option<Exp>,
        rhs: Option<Exp>,
        loc: Span,
    },
    Table {
        id: Identifier,
        elems: Vec<Exp>,
        loc: Span,
    },
    Return { exp: Exp, loc: Span },
    /// `lhs = rhs;`, or an expression statement when the lhs is `Unit`
    Bind { lhs: Exp, rhs: Exp, loc: Span },
    If {
        cond: Exp,
        then_stmt: Box<Stmt>,
        else_stmt: Option<Box<Stmt>>,
        loc: Span,
    },
    Fun {
        id: Identifier,
        params: Vec<NamedId>,
        body: Box<Stmt>,
        ret: Option<Exp>,
        attrs: Vec<FunctionAttr>,
        loc: Span,
    },
    While {
        cond: Exp,
        body: Box<Stmt>,
        loc: Span,
    },
    Type {
        id: Identifier,
        params: Vec<NamedId>,
        decls: Vec<ValDecl>,
        loc: Span,
    },
    AliasType {
        id: Identifier,
        params: Vec<NamedId>,
        alias: Exp,
        loc: Span,
    },
    Block {
        instance: Option<Identifier>,
        stmts: Vec<Stmt>,
        loc: Span,
    },
    Empty,
}

impl Stmt {
    pub fn loc(&self) -> Span {
        match self {
            Stmt::Val { loc, .. }
            | Stmt::Mem { loc, .. }
            | Stmt::Table { loc, .. }
            | Stmt::Return { loc, .. }
            | Stmt::Bind { loc, .. }
            | Stmt::If { loc, .. }
            | Stmt::Fun { loc, .. }
            | Stmt::While { loc, .. }
            | Stmt::Type { loc, .. }
            | Stmt::AliasType { loc, .. }
            | Stmt::Block { loc, .. } => loc.clone(),
            Stmt::Empty => Span::null(),
        }
    }
}

fn write_params(f: &mut std::fmt::Formatter<'_>, params: &[NamedId]) -> std::fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", param)?;
    }
    Ok(())
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Val { lhs, rhs: None, .. } => write!(f, "val {};", lhs),
            Stmt::Val {
                lhs, rhs: Some(rhs), ..
            } => write!(f, "val {} = {};", lhs, rhs),
            Stmt::Mem { lhs, init, rhs, .. } => {
                write!(f, "mem {}", lhs)?;
                if let Some(init) = init {
                    write!(f, " @ {}", init)?;
                }
                if let Some(rhs) = rhs {
                    write!(f, " = {}", rhs)?;
                }
                write!(f, ";")
            }
            Stmt::Table { id, elems, .. } => {
                write!(f, "table {} = [| ", join_identifier(id))?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, " |];")
            }
            Stmt::Return { exp, .. } => write!(f, "return {};", exp),
            Stmt::Bind {
                lhs: Exp::Unit { .. },
                rhs,
                ..
            } => write!(f, "{};", rhs),
            Stmt::Bind { lhs, rhs, .. } => write!(f, "{} = {};", lhs, rhs),
            Stmt::If {
                cond,
                then_stmt,
                else_stmt,
                ..
            } => {
                write!(f, "if ({}) {}", cond, then_stmt)?;
                if let Some(else_stmt) = else_stmt {
                    write!(f, " else {}", else_stmt)?;
                }
                Ok(())
            }
            Stmt::Fun {
                id,
                params,
                body,
                ret,
                attrs,
                ..
            } => {
                let keyword = if attrs.contains(&FunctionAttr::JoinFunction) {
                    "and"
                } else {
                    "fun"
                };
                write!(f, "{} {}(", keyword, join_identifier(id))?;
                write_params(f, params)?;
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " : {}", ret)?;
                }
                write!(f, " {}", body)
            }
            Stmt::While { cond, body, .. } => write!(f, "while ({}) {}", cond, body),
            Stmt::Type {
                id, params, decls, ..
            } => {
                write!(f, "type {}", join_identifier(id))?;
                if !params.is_empty() {
                    write!(f, "(")?;
                    write_params(f, params)?;
                    write!(f, ")")?;
                }
                write!(f, " {{ ")?;
                for decl in decls {
                    write!(f, "val {} : {}; ", join_identifier(&decl.id), decl.ty)?;
                }
                write!(f, "}}")
            }
            Stmt::AliasType {
                id, params, alias, ..
            } => {
                write!(f, "type {}", join_identifier(id))?;
                if !params.is_empty() {
                    write!(f, "(")?;
                    write_params(f, params)?;
                    write!(f, ")")?;
                }
                write!(f, " : {};", alias)
            }
            Stmt::Block { stmts, .. } => {
                write!(f, "{{ ")?;
                for stmt in stmts {
                    write!(f, "{} ", stmt)?;
                }
                write!(f, "}}")
            }
            Stmt::Empty => Ok(()),
        }
    }
}
