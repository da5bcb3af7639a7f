use crate::context::{CompileOptions, CompilerContext};
use crate::error::CompileResult;
use crate::naming;
use crate::references;
use tracing::{debug, info, instrument, warn};
use typeport_ast::{Declaration, Package, TypeExpr};

pub const GENERATED_HEADER: &str = "// Code generated by typeport. DO NOT EDIT.";

/// Compile one top-level declaration.
///
/// Returns an empty string for declarations that are not exported.
#[instrument(skip(decl, options), fields(name = %decl.name, type_params = decl.type_params.len()))]
pub fn compile_declaration(decl: &Declaration, options: &CompileOptions) -> CompileResult<String> {
    if !naming::is_exported(&decl.name) {
        debug!("Skipping unexported declaration");
        return Ok(String::new());
    }

    let mut ctx = CompilerContext::new(options);

    if options.preserve_comments {
        if let Some(doc) = &decl.doc {
            ctx.write_doc_comment(doc, 0);
        }
    }

    match &decl.ty {
        TypeExpr::Struct { fields } => {
            ctx.add("export interface ");
            ctx.add(&decl.name);
            ctx.write_type_params(&decl.type_params)?;
            ctx.add(" {\n");
            ctx.write_struct_fields(fields, 0)?;
            ctx.add("}\n");
        }
        ty => {
            ctx.add("export type ");
            ctx.add(&decl.name);
            ctx.write_type_params(&decl.type_params)?;
            ctx.add(" = ");
            match ty {
                TypeExpr::Interface { members } => ctx.write_interface_fields(members, 0)?,
                ty => ctx.write_type(ty, 0, false)?,
            }
            ctx.add_char(';');
            ctx.write_line_end(decl.comment.as_deref());
        }
    }

    Ok(ctx.into_output())
}

/// Compile every declaration of a package into one TypeScript module
#[instrument(
    skip(package, options),
    fields(package = %package.name, declarations = package.declarations.len())
)]
pub fn compile_package(package: &Package, options: &CompileOptions) -> CompileResult<String> {
    info!("Compiling package");

    for name in references::unmapped_references(package, options) {
        warn!(type_name = %name, fallback = %options.fallback_type, "Unmapped qualified type");
    }

    let mut output = String::from(GENERATED_HEADER);
    output.push('\n');

    if let Some(frontmatter) = options.frontmatter.as_deref().filter(|f| !f.is_empty()) {
        output.push('\n');
        output.push_str(frontmatter);
        if !frontmatter.ends_with('\n') {
            output.push('\n');
        }
    }

    let mut emitted = 0;
    for decl in &package.declarations {
        let compiled = compile_declaration(decl, options)?;
        if compiled.is_empty() {
            continue;
        }
        output.push('\n');
        output.push_str(&compiled);
        emitted += 1;
    }

    info!(emitted, "Package compiled");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use typeport_ast::{Field, TypeParam};

    #[test]
    fn test_struct_declaration() {
        let decl = Declaration::new(
            "User",
            TypeExpr::structure(vec![
                Field::named("Name", TypeExpr::ident("string")).with_tag(r#"json:"name""#)
            ]),
        )
        .with_doc("User is a person.");

        let output = compile_declaration(&decl, &CompileOptions::default()).unwrap();
        assert_eq!(
            output,
            "/**\n * User is a person.\n */\nexport interface User {\n  name: string;\n}\n"
        );
    }

    #[test]
    fn test_alias_declaration() {
        let decl = Declaration::new("IDs", TypeExpr::array(TypeExpr::ident("int64")))
            .with_comment("sorted");
        let output = compile_declaration(&decl, &CompileOptions::default()).unwrap();
        assert_eq!(output, "export type IDs = number /* int64 */[]; // sorted\n");
    }

    #[test]
    fn test_generic_struct_declaration() {
        let decl = Declaration::new(
            "Page",
            TypeExpr::structure(vec![Field::named(
                "Items",
                TypeExpr::array(TypeExpr::ident("T")),
            )
            .with_tag(r#"json:"items""#)]),
        )
        .with_type_params(vec![TypeParam::new(["T"], TypeExpr::ident("any"))]);

        let output = compile_declaration(&decl, &CompileOptions::default()).unwrap();
        assert_eq!(output, "export interface Page<T extends any> {\n  items: T[];\n}\n");
    }

    #[test]
    fn test_interface_declaration() {
        let methods_only = Declaration::new(
            "Stringer",
            TypeExpr::interface(vec![Field::named("String", TypeExpr::Func)]),
        );
        assert_eq!(
            compile_declaration(&methods_only, &CompileOptions::default()).unwrap(),
            "export type Stringer = any;\n"
        );

        let union = Declaration::new(
            "Number",
            TypeExpr::interface(vec![Field::embedded(TypeExpr::binary(
                TypeExpr::unary(typeport_ast::UnaryOp::Tilde, TypeExpr::ident("int")),
                "|",
                TypeExpr::ident("float64"),
            ))]),
        );
        assert_eq!(
            compile_declaration(&union, &CompileOptions::default()).unwrap(),
            "export type Number = \n  number /* int */ | number /* float64 */;\n"
        );
    }

    #[test]
    fn test_unexported_declaration_is_skipped() {
        let decl = Declaration::new("internal", TypeExpr::ident("string"));
        assert_eq!(compile_declaration(&decl, &CompileOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_package_layout() {
        let package = Package::new(
            "models",
            vec![
                Declaration::new("ID", TypeExpr::ident("string")),
                Declaration::new("hidden", TypeExpr::ident("int")),
                Declaration::new("Flag", TypeExpr::ident("bool")),
            ],
        );
        let options = CompileOptions {
            frontmatter: Some("import type { Money } from './money';".to_string()),
            ..Default::default()
        };

        let output = compile_package(&package, &options).unwrap();
        assert_eq!(
            output,
            "// Code generated by typeport. DO NOT EDIT.\n\
             \n\
             import type { Money } from './money';\n\
             \n\
             export type ID = string;\n\
             \n\
             export type Flag = boolean;\n"
        );
    }

    #[test]
    fn test_package_error_stops_compilation() {
        let package = Package::new(
            "broken",
            vec![Declaration::new(
                "Bad",
                TypeExpr::structure(vec![
                    Field::named("X", TypeExpr::ident("int")).with_tag("json:x")
                ]),
            )],
        );
        assert!(matches!(
            compile_package(&package, &CompileOptions::default()),
            Err(CompileError::MalformedTag { .. })
        ));
    }
}
