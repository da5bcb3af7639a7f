use crate::ast::*;

/// Visitor pattern for traversing declaration trees immutably
///
/// Default implementations walk the entire tree.
/// Override specific visit_* methods to act on particular nodes.
pub trait Visitor: Sized {
    fn visit_package(&mut self, package: &Package) {
        walk_package(self, package);
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_type_param(&mut self, param: &TypeParam) {
        self.visit_type_expr(&param.constraint);
    }

    fn visit_field(&mut self, field: &Field) {
        self.visit_type_expr(&field.ty);
    }

    fn visit_type_expr(&mut self, expr: &TypeExpr) {
        walk_type_expr(self, expr);
    }
}

pub fn walk_package<V: Visitor>(visitor: &mut V, package: &Package) {
    for decl in &package.declarations {
        visitor.visit_declaration(decl);
    }
}

pub fn walk_declaration<V: Visitor>(visitor: &mut V, decl: &Declaration) {
    for param in &decl.type_params {
        visitor.visit_type_param(param);
    }
    visitor.visit_type_expr(&decl.ty);
}

pub fn walk_type_expr<V: Visitor>(visitor: &mut V, expr: &TypeExpr) {
    match expr {
        TypeExpr::Pointer { inner } | TypeExpr::Paren { inner } => {
            visitor.visit_type_expr(inner);
        }
        TypeExpr::Array { element } => {
            visitor.visit_type_expr(element);
        }
        TypeExpr::Struct { fields } => {
            for field in fields {
                visitor.visit_field(field);
            }
        }
        TypeExpr::Interface { members } => {
            for member in members {
                visitor.visit_field(member);
            }
        }
        TypeExpr::Map { key, value } => {
            visitor.visit_type_expr(key);
            visitor.visit_type_expr(value);
        }
        TypeExpr::Binary { left, right, .. } => {
            visitor.visit_type_expr(left);
            visitor.visit_type_expr(right);
        }
        TypeExpr::Unary { operand, .. } => {
            visitor.visit_type_expr(operand);
        }
        TypeExpr::Generic { base, args } => {
            visitor.visit_type_expr(base);
            for arg in args {
                visitor.visit_type_expr(arg);
            }
        }
        TypeExpr::Ident { .. }
        | TypeExpr::Qualified { .. }
        | TypeExpr::Literal { .. }
        | TypeExpr::Call
        | TypeExpr::Func
        | TypeExpr::Chan
        | TypeExpr::Opaque { .. } => {
            // Leaf nodes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct IdentCounter {
        idents: Vec<String>,
        fields: usize,
    }

    impl Visitor for IdentCounter {
        fn visit_field(&mut self, field: &Field) {
            self.fields += 1;
            self.visit_type_expr(&field.ty);
        }

        fn visit_type_expr(&mut self, expr: &TypeExpr) {
            if let TypeExpr::Ident { name } = expr {
                self.idents.push(name.clone());
            }
            walk_type_expr(self, expr);
        }
    }

    #[test]
    fn test_walk_reaches_nested_nodes() {
        let decl = Declaration::new(
            "Box",
            TypeExpr::structure(vec![
                Field::named("Items", TypeExpr::array(TypeExpr::ident("T"))),
                Field::named(
                    "Inner",
                    TypeExpr::structure(vec![Field::named(
                        "Index",
                        TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("int")),
                    )]),
                ),
            ]),
        )
        .with_type_params(vec![TypeParam::new(["T"], TypeExpr::ident("any"))]);

        let mut counter = IdentCounter::default();
        counter.visit_package(&Package::new("demo", vec![decl]));

        assert_eq!(counter.fields, 3);
        assert_eq!(counter.idents, vec!["any", "T", "string", "int"]);
    }
}
