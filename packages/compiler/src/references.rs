use crate::context::CompileOptions;
use std::collections::BTreeSet;
use typeport_ast::{walk_type_expr, Package, TypeExpr, Visitor};

/// Collects every `namespace.Name` a tree refers to
#[derive(Default)]
struct QualifiedNames {
    names: BTreeSet<String>,
}

impl Visitor for QualifiedNames {
    fn visit_type_expr(&mut self, expr: &TypeExpr) {
        if let TypeExpr::Qualified { namespace, name } = expr {
            self.names.insert(format!("{}.{}", namespace, name));
        }
        walk_type_expr(self, expr);
    }
}

/// Qualified names referenced anywhere in `package`, sorted
pub fn collect_qualified_names(package: &Package) -> BTreeSet<String> {
    let mut collector = QualifiedNames::default();
    collector.visit_package(package);
    collector.names
}

/// Qualified names that will be emitted as the fallback type
pub fn unmapped_references(package: &Package, options: &CompileOptions) -> Vec<String> {
    collect_qualified_names(package)
        .into_iter()
        .filter(|name| !options.type_mappings.contains_key(name))
        .collect()
}
