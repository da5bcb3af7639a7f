use serde::{Deserialize, Serialize};
use std::fmt;

/// A package dump: every type declaration found in one source package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Package {
    pub fn new(name: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            declarations,
        }
    }
}

/// Top-level named type declaration (`type Name[T any] ...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            ty,
            doc: None,
            comment: None,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParam>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One entry of a type parameter list; several names may share a constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub names: Vec<String>,
    pub constraint: TypeExpr,
}

impl TypeParam {
    pub fn new<I, S>(names: I, constraint: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            constraint,
        }
    }
}

/// Struct member or interface element.
///
/// A field without names is an embedded (anonymous) field; its name is
/// derived from its type by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Raw tag text, with or without the surrounding back-quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Trailing line comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Field {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::grouped([name], ty)
    }

    pub fn grouped<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
            tag: None,
            doc: None,
            comment: None,
        }
    }

    pub fn embedded(ty: TypeExpr) -> Self {
        Self::grouped(Vec::<String>::new(), ty)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// Prefix operators that can appear in a type position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `~T`, underlying-type constraint
    #[serde(rename = "~")]
    Tilde,
    #[serde(rename = "^")]
    Caret,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "&")]
    Ampersand,
    #[serde(rename = "<-")]
    Receive,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Tilde => "~",
            UnaryOp::Caret => "^",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Ampersand => "&",
            UnaryOp::Receive => "<-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// `*T`
    Pointer { inner: Box<TypeExpr> },

    /// `[]T` or `[N]T`
    Array { element: Box<TypeExpr> },

    /// `struct { ... }`
    Struct { fields: Vec<Field> },

    /// `interface { ... }`
    Interface { members: Vec<Field> },

    /// `int`, `MyType`
    Ident { name: String },

    /// `time.Time`
    Qualified { namespace: String, name: String },

    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },

    /// Basic literal as written in source (`"a"`, `42`, `` `raw` ``)
    Literal { value: String },

    /// `(T)`
    Paren { inner: Box<TypeExpr> },

    /// `A | B`
    Binary {
        left: Box<TypeExpr>,
        op: String,
        right: Box<TypeExpr>,
    },

    /// `~T`, `-1`
    Unary { op: UnaryOp, operand: Box<TypeExpr> },

    /// Call expression
    Call,

    /// Function signature
    Func,

    /// Channel type
    Chan,

    /// `List[T]`, `Pair[K, V]`
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },

    /// Any other node the parser hands over.
    ///
    /// Parsers must wrap nodes without a variant of their own as
    /// `{"kind": "opaque", "node": "<node kind>", "text": "<source>"}`.
    /// The compiler rejects these with the node kind and source text. A
    /// `kind` outside this enum is a deserialization error instead.
    Opaque { node: String, text: String },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident { name: name.into() }
    }

    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer {
            inner: Box::new(inner),
        }
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array {
            element: Box::new(element),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        TypeExpr::Struct { fields }
    }

    pub fn interface(members: Vec<Field>) -> Self {
        TypeExpr::Interface { members }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TypeExpr::Literal {
            value: value.into(),
        }
    }

    pub fn paren(inner: TypeExpr) -> Self {
        TypeExpr::Paren {
            inner: Box::new(inner),
        }
    }

    pub fn binary(left: TypeExpr, op: impl Into<String>, right: TypeExpr) -> Self {
        TypeExpr::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: TypeExpr) -> Self {
        TypeExpr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn generic(base: TypeExpr, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            base: Box::new(base),
            args,
        }
    }

    pub fn opaque(node: impl Into<String>, text: impl Into<String>) -> Self {
        TypeExpr::Opaque {
            node: node.into(),
            text: text.into(),
        }
    }

    /// Name of the node variant, for diagnostics
    pub fn kind(&self) -> &str {
        match self {
            TypeExpr::Pointer { .. } => "pointer",
            TypeExpr::Array { .. } => "array",
            TypeExpr::Struct { .. } => "struct",
            TypeExpr::Interface { .. } => "interface",
            TypeExpr::Ident { .. } => "ident",
            TypeExpr::Qualified { .. } => "qualified",
            TypeExpr::Map { .. } => "map",
            TypeExpr::Literal { .. } => "literal",
            TypeExpr::Paren { .. } => "paren",
            TypeExpr::Binary { .. } => "binary",
            TypeExpr::Unary { .. } => "unary",
            TypeExpr::Call => "call",
            TypeExpr::Func => "func",
            TypeExpr::Chan => "chan",
            TypeExpr::Generic { .. } => "generic",
            TypeExpr::Opaque { node, .. } => node.as_str(),
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeExpr::Pointer { .. })
    }
}

/// Renders the node back to source-like text
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Pointer { inner } => write!(f, "*{}", inner),
            TypeExpr::Array { element } => write!(f, "[]{}", element),
            TypeExpr::Struct { fields } => {
                f.write_str("struct {")?;
                write_members(f, fields)?;
                f.write_str("}")
            }
            TypeExpr::Interface { members } => {
                f.write_str("interface {")?;
                write_members(f, members)?;
                f.write_str("}")
            }
            TypeExpr::Ident { name } => f.write_str(name),
            TypeExpr::Qualified { namespace, name } => write!(f, "{}.{}", namespace, name),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Literal { value } => f.write_str(value),
            TypeExpr::Paren { inner } => write!(f, "({})", inner),
            TypeExpr::Binary { left, op, right } => write!(f, "{} {} {}", left, op, right),
            TypeExpr::Unary { op, operand } => write!(f, "{}{}", op, operand),
            TypeExpr::Call => f.write_str("call(...)"),
            TypeExpr::Func => f.write_str("func(...)"),
            TypeExpr::Chan => f.write_str("chan"),
            TypeExpr::Generic { base, args } => {
                write!(f, "{}[", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str("]")
            }
            TypeExpr::Opaque { text, .. } => f.write_str(text),
        }
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { "; " })?;
        write!(f, "{}", field)?;
    }
    if !fields.is_empty() {
        f.write_str(" ")?;
    }
    Ok(())
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", self.names.join(", "))?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            if tag.starts_with('`') {
                write!(f, " {}", tag)?;
            } else {
                write!(f, " `{}`", tag)?;
            }
        }
        Ok(())
    }
}
