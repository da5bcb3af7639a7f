use crate::context::{CompileOptions, CompilerContext};
use crate::error::{CompileError, CompileResult};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;
use typeport_ast::{TypeExpr, UnaryOp};

static RAW_LITERAL_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([$\\])").expect("raw literal escape regex"));

/// TypeScript spelling of a primitive identifier.
///
/// Numeric types all become `number`, keeping the source width as a comment.
pub fn primitive_type(name: &str) -> Cow<'_, str> {
    match name {
        "bool" => Cow::Borrowed("boolean"),
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "byte" | "rune" | "float32" | "float64" | "complex64"
        | "complex128" => Cow::Owned(format!("number /* {} */", name)),
        _ => Cow::Borrowed(name),
    }
}

/// `[]byte` and `[]uint8` carry encoded blobs, not numbers
fn is_byte_like(element: &TypeExpr) -> bool {
    matches!(element, TypeExpr::Ident { name } if name == "byte" || name == "uint8")
}

/// Renders a single type expression into a fresh string
pub fn render_type(ty: &TypeExpr, options: &CompileOptions) -> CompileResult<String> {
    let mut ctx = CompilerContext::new(options);
    ctx.write_type(ty, 0, false)?;
    Ok(ctx.into_output())
}

impl CompilerContext<'_> {
    /// Writes the TypeScript form of `ty`.
    ///
    /// `depth` is the indentation level of the enclosing member; `group`
    /// asks for parentheses around fragments that would otherwise bind
    /// loosely (a pointer inside an array element).
    pub fn write_type(&mut self, ty: &TypeExpr, depth: usize, group: bool) -> CompileResult<()> {
        self.enter()?;
        let result = self.write_type_node(ty, depth, group);
        self.leave();
        result
    }

    fn write_type_node(&mut self, ty: &TypeExpr, depth: usize, group: bool) -> CompileResult<()> {
        match ty {
            TypeExpr::Pointer { inner } => {
                if group {
                    self.add_char('(');
                }
                self.write_type(inner, depth, false)?;
                self.add(" | undefined");
                if group {
                    self.add_char(')');
                }
            }
            TypeExpr::Array { element } => {
                if is_byte_like(element) {
                    self.add("string");
                } else {
                    self.write_type(element, depth, true)?;
                    self.add("[]");
                }
            }
            TypeExpr::Struct { fields } => {
                self.add("{\n");
                self.write_struct_fields(fields, depth + 1)?;
                self.add_indent(depth + 1);
                self.add_char('}');
            }
            TypeExpr::Ident { name } => {
                if name == "any" {
                    let options = self.options;
                    self.add(&primitive_type(&options.fallback_type));
                } else {
                    self.add(&primitive_type(name));
                }
            }
            TypeExpr::Qualified { namespace, name } => {
                let qualified = format!("{}.{}", namespace, name);
                let options = self.options;
                match options.type_mappings.get(&qualified) {
                    Some(mapped) => self.add(mapped),
                    None => {
                        debug!(type_name = %qualified, "No mapping, using fallback type");
                        self.add_fallback();
                        self.add(" /* ");
                        self.add(&qualified);
                        self.add(" */");
                    }
                }
            }
            TypeExpr::Map { key, value } => {
                self.add("{ [key: ");
                self.write_type(key, depth, false)?;
                self.add("]: ");
                self.write_type(value, depth, false)?;
                self.add_char('}');
            }
            TypeExpr::Literal { value } => {
                if value.starts_with('`') {
                    let escaped = RAW_LITERAL_ESCAPE.replace_all(value, "\\${1}");
                    self.add(&escaped);
                } else {
                    self.add(value);
                }
            }
            TypeExpr::Paren { inner } => {
                self.add_char('(');
                self.write_type(inner, depth, false)?;
                self.add_char(')');
            }
            TypeExpr::Binary { left, op, right } => {
                self.write_type(left, depth, false)?;
                self.add_char(' ');
                self.add(op);
                self.add_char(' ');
                self.write_type(right, depth, false)?;
            }
            TypeExpr::Interface { members } => {
                self.write_interface_fields(members, depth + 1)?;
            }
            TypeExpr::Call | TypeExpr::Func | TypeExpr::Chan => {
                debug!(kind = ty.kind(), "Erasing construct to fallback type");
                self.add_fallback();
            }
            TypeExpr::Unary { op, operand } => match op {
                // Constraint marker with no TypeScript counterpart
                UnaryOp::Tilde => self.write_type(operand, depth, false)?,
                UnaryOp::Caret => {
                    self.add_char('~');
                    self.write_type(operand, depth, false)?;
                }
                UnaryOp::Plus | UnaryOp::Minus | UnaryOp::Not => {
                    self.add(op.as_str());
                    self.write_type(operand, depth, false)?;
                }
                UnaryOp::Ampersand | UnaryOp::Receive => {
                    return Err(CompileError::unsupported(
                        format!("unary {}", op),
                        ty.to_string(),
                    ));
                }
            },
            TypeExpr::Generic { base, args } => {
                self.write_type(base, depth, false)?;
                self.add_char('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.add(", ");
                    }
                    self.write_type(arg, depth, false)?;
                }
                self.add_char('>');
            }
            TypeExpr::Opaque { node, text } => {
                return Err(CompileError::unsupported(node.clone(), text.clone()));
            }
        }
        Ok(())
    }
}
