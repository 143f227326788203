//! Syntax input for type declarations.
//!
//! Declarations arrive already parsed. The tree is deserializable so that a
//! compilation unit can be supplied as JSON, e.g.
//!
//! ```json
//! { "pos": 10, "kind": { "Interface": { "elems": [
//!     { "name": { "name": "String", "pos": 20 },
//!       "ty": { "kind": { "Func": { "results": [ { "ty": { "kind": { "Name": "string" } } } ] } } } }
//! ] } } }
//! ```

use serde::Deserialize;
use std::fmt;
use tset_common::Pos;

/// A type expression with its source position.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TypeExpr {
    #[serde(default)]
    pub pos: Pos,
    pub kind: TypeExprKind,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum TypeExprKind {
    /// `T`
    Name(String),
    /// `pkg.T`
    Qualified { pkg: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `func[P C](params) results`
    Func(FuncTypeExpr),
    /// `interface{ ... }`
    Interface(InterfaceTypeExpr),
    /// `~T`
    Tilde(Box<TypeExpr>),
    /// `A | B`
    Or(Box<TypeExpr>, Box<TypeExpr>),
    /// A syntax error already reported by the parser.
    Bad,
}

/// A parameter, result, or type parameter.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Field {
    #[serde(default)]
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FuncTypeExpr {
    #[serde(default)]
    pub type_params: Vec<Field>,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub results: Vec<Field>,
    /// The last parameter is `...T`; its expression is the element type.
    #[serde(default)]
    pub variadic: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
}

/// One element of an interface body: a method (`name` set), a legacy type
/// list entry (`name` is `type`), or an embedded type (`name` absent).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InterfaceElem {
    #[serde(default)]
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct InterfaceTypeExpr {
    #[serde(default)]
    pub elems: Vec<InterfaceElem>,
}

impl TypeExpr {
    pub fn new(pos: Pos, kind: TypeExprKind) -> Self {
        TypeExpr { pos, kind }
    }

    pub fn name(pos: Pos, name: &str) -> Self {
        Self::new(pos, TypeExprKind::Name(name.to_string()))
    }

    pub fn pointer(pos: Pos, elem: TypeExpr) -> Self {
        Self::new(pos, TypeExprKind::Pointer(Box::new(elem)))
    }

    pub fn slice(pos: Pos, elem: TypeExpr) -> Self {
        Self::new(pos, TypeExprKind::Slice(Box::new(elem)))
    }

    pub fn tilde(pos: Pos, elem: TypeExpr) -> Self {
        Self::new(pos, TypeExprKind::Tilde(Box::new(elem)))
    }

    /// `x | y`, positioned at `x`.
    pub fn or(x: TypeExpr, y: TypeExpr) -> Self {
        Self::new(x.pos, TypeExprKind::Or(Box::new(x), Box::new(y)))
    }

    pub fn func(pos: Pos, func: FuncTypeExpr) -> Self {
        Self::new(pos, TypeExprKind::Func(func))
    }

    pub fn interface(pos: Pos, elems: Vec<InterfaceElem>) -> Self {
        Self::new(pos, TypeExprKind::Interface(InterfaceTypeExpr { elems }))
    }
}

impl Field {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Field { name: None, ty }
    }
}

impl InterfaceElem {
    pub fn method(name: &str, pos: Pos, ty: TypeExpr) -> Self {
        InterfaceElem {
            name: Some(Ident {
                name: name.to_string(),
                pos,
            }),
            ty,
        }
    }

    pub fn embedded(ty: TypeExpr) -> Self {
        InterfaceElem { name: None, ty }
    }
}

impl FuncTypeExpr {
    /// `func(params) results` with unnamed fields.
    pub fn simple(params: Vec<TypeExpr>, results: Vec<TypeExpr>) -> Self {
        FuncTypeExpr {
            params: params.into_iter().map(Field::unnamed).collect(),
            results: results.into_iter().map(Field::unnamed).collect(),
            ..FuncTypeExpr::default()
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field], variadic: bool) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if let Some(name) = &field.name {
            write!(f, "{name} ")?;
        }
        if variadic && i + 1 == fields.len() {
            f.write_str("...")?;
        }
        write!(f, "{}", field.ty)?;
    }
    Ok(())
}

impl FuncTypeExpr {
    /// Everything after the `func` keyword.
    fn write_signature(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_params.is_empty() {
            f.write_str("[")?;
            write_fields(f, &self.type_params, false)?;
            f.write_str("]")?;
        }
        f.write_str("(")?;
        write_fields(f, &self.params, self.variadic)?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_none() => write!(f, " {}", single.ty),
            results => {
                f.write_str(" (")?;
                write_fields(f, results, false)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Name(name) => f.write_str(name),
            TypeExprKind::Qualified { pkg, name } => write!(f, "{pkg}.{name}"),
            TypeExprKind::Pointer(elem) => write!(f, "*{elem}"),
            TypeExprKind::Slice(elem) => write!(f, "[]{elem}"),
            TypeExprKind::Func(func) => {
                f.write_str("func")?;
                func.write_signature(f)
            }
            TypeExprKind::Interface(iface) => {
                f.write_str("interface{")?;
                for (i, elem) in iface.elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match (&elem.name, &elem.ty.kind) {
                        (Some(name), TypeExprKind::Func(func)) if name.name != "type" => {
                            f.write_str(&name.name)?;
                            func.write_signature(f)?;
                        }
                        (Some(name), _) => write!(f, "{} {}", name.name, elem.ty)?,
                        (None, _) => write!(f, "{}", elem.ty)?,
                    }
                }
                f.write_str("}")
            }
            TypeExprKind::Tilde(elem) => write!(f, "~{elem}"),
            TypeExprKind::Or(x, y) => write!(f, "{x} | {y}"),
            TypeExprKind::Bad => f.write_str("(bad expr)"),
        }
    }
}
