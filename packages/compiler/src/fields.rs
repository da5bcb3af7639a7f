use crate::comments::single_line;
use crate::context::CompilerContext;
use crate::error::CompileResult;
use crate::naming;
use crate::tags::TagDirectives;
use tracing::debug;
use typeport_ast::{Field, TypeExpr};

impl CompilerContext<'_> {
    /// Writes one property line per visible struct member.
    ///
    /// Members at `depth` are indented `depth + 1` levels. Skipped members
    /// leave no trace in the output.
    pub fn write_struct_fields(&mut self, fields: &[Field], depth: usize) -> CompileResult<()> {
        for field in fields {
            let idents: Vec<&str> = naming::field_identifiers(field)
                .into_iter()
                .filter(|ident| naming::is_exported(ident))
                .collect();
            if idents.is_empty() {
                debug!(field = %field, "Skipping field without a visible name");
                continue;
            }

            let Some(directives) = TagDirectives::resolve(field.tag.as_deref())? else {
                debug!(field = %field, "Skipping field excluded by its tag");
                continue;
            };

            // A tag rename names one property, so grouped names collapse to it
            let idents = if directives.rename.is_some() {
                &idents[..1]
            } else {
                &idents[..]
            };
            for ident in idents {
                let name = naming::emitted_name(ident, &directives, self.options.flavor);
                self.write_struct_field(field, &name, &directives, depth)?;
            }
        }
        Ok(())
    }

    fn write_struct_field(
        &mut self,
        field: &Field,
        name: &str,
        directives: &TagDirectives,
        depth: usize,
    ) -> CompileResult<()> {
        if self.options.preserve_comments {
            if let Some(doc) = &field.doc {
                self.write_doc_comment(doc, depth + 1);
            }
        }

        self.add_indent(depth + 1);
        if directives.readonly {
            self.add("readonly ");
        }
        self.add(&naming::property_key(name));

        let optional = directives.optional || (field.ty.is_pointer() && !directives.required);
        if optional {
            self.add_char('?');
        }
        self.add(": ");

        match &directives.type_override {
            Some(ts_type) => self.add(ts_type),
            None => {
                // A required pointer is always present, so drop `| undefined`
                let ty = match &field.ty {
                    TypeExpr::Pointer { inner } if directives.required => inner.as_ref(),
                    ty => ty,
                };
                self.write_type(ty, depth, false)?;
            }
        }
        self.add_char(';');
        self.write_line_end(field.comment.as_deref());
        Ok(())
    }

    /// Writes an interface as the intersection of its non-method members.
    ///
    /// An interface made only of methods has no structural form and becomes
    /// the fallback type.
    pub fn write_interface_fields(&mut self, members: &[Field], depth: usize) -> CompileResult<()> {
        let mut wrote_member = false;

        for member in members {
            if matches!(member.ty, TypeExpr::Func) {
                continue;
            }
            if wrote_member {
                self.add(" &\n");
            } else {
                self.add_char('\n');
                wrote_member = true;
            }

            if self.options.preserve_comments {
                if let Some(doc) = &member.doc {
                    self.write_doc_comment(doc, depth + 1);
                }
            }
            self.add_indent(depth + 1);
            self.write_type(&member.ty, depth, false)?;

            if let Some(comment) = member
                .comment
                .as_deref()
                .filter(|_| self.options.preserve_comments)
            {
                self.add(" // ");
                self.add(&single_line(comment));
                self.add_char('\n');
            }
        }

        if !wrote_member {
            self.add_fallback();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{CompileOptions, CompilerContext, Flavor};
    use crate::error::CompileError;
    use typeport_ast::{Field, TypeExpr, UnaryOp};

    fn struct_body(fields: &[Field], options: &CompileOptions) -> String {
        let mut ctx = CompilerContext::new(options);
        ctx.write_struct_fields(fields, 0).expect("Failed to compile fields");
        ctx.into_output()
    }

    fn single(field: Field) -> String {
        struct_body(&[field], &CompileOptions::default())
    }

    #[test]
    fn test_renamed_optional_field() {
        let field = Field::named("Name", TypeExpr::ident("string"))
            .with_tag(r#"`json:"name,omitempty"`"#);
        assert_eq!(single(field), "  name?: string;\n");
    }

    #[test]
    fn test_required_pointer_field() {
        let field = Field::named("ID", TypeExpr::pointer(TypeExpr::ident("int64")))
            .with_tag(r#"`json:"id" tstype:",required"`"#);
        assert_eq!(single(field), "  id: number /* int64 */;\n");
    }

    #[test]
    fn test_pointer_field_is_optional() {
        let field = Field::named("Parent", TypeExpr::pointer(TypeExpr::ident("Node")))
            .with_tag(r#"json:"parent""#);
        assert_eq!(single(field), "  parent?: Node | undefined;\n");
    }

    #[test]
    fn test_map_field() {
        let field = Field::named(
            "Tags",
            TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("string")),
        )
        .with_tag(r#"json:"tags""#);
        assert_eq!(single(field), "  tags: { [key: string]: string};\n");
    }

    #[test]
    fn test_array_of_pointers_field() {
        let field = Field::named(
            "Ptrs",
            TypeExpr::array(TypeExpr::pointer(TypeExpr::ident("int"))),
        );
        let options = CompileOptions::default().with_flavor(Flavor::Yaml);
        assert_eq!(
            struct_body(&[field], &options),
            "  ptrs: (number /* int */ | undefined)[];\n"
        );
    }

    #[test]
    fn test_byte_slice_field() {
        let field = Field::named("Payload", TypeExpr::array(TypeExpr::ident("byte")));
        assert_eq!(single(field), "  Payload: string;\n");
    }

    #[test]
    fn test_skipped_fields_leave_no_trace() {
        let fields = vec![
            Field::named("A", TypeExpr::ident("int")).with_tag(r#"json:"a""#),
            Field::named("Secret", TypeExpr::ident("string")).with_tag(r#"json:"-""#),
            Field::named("Internal", TypeExpr::ident("string")).with_tag(r#"yaml:"-""#),
            Field::named("Hidden", TypeExpr::ident("string")).with_tag(r#"tstype:"-""#),
            Field::named("Bound", TypeExpr::ident("T")).with_tag(r#"tstype:",extends""#),
            Field::named("private", TypeExpr::ident("string")),
            Field::embedded(TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("int"))),
            Field::named("B", TypeExpr::ident("bool")).with_tag(r#"json:"b""#),
        ];
        assert_eq!(
            struct_body(&fields, &CompileOptions::default()),
            "  a: number /* int */;\n  b: boolean;\n"
        );
    }

    #[test]
    fn test_private_field_tag_is_not_parsed() {
        let field = Field::named("hidden", TypeExpr::ident("int")).with_tag("not a tag");
        assert_eq!(single(field), "");
    }

    #[test]
    fn test_malformed_tag_is_fatal() {
        let options = CompileOptions::default();
        let mut ctx = CompilerContext::new(&options);
        let field = Field::named("Name", TypeExpr::ident("string")).with_tag("json:name");
        assert!(matches!(
            ctx.write_struct_fields(&[field], 0),
            Err(CompileError::MalformedTag { .. })
        ));
    }

    #[test]
    fn test_embedded_fields() {
        let fields = vec![Field::embedded(TypeExpr::qualified("time", "Time"))];
        assert_eq!(
            struct_body(&fields, &CompileOptions::default()),
            "  Time: any /* time.Time */;\n"
        );

        let options = CompileOptions::default().with_mapping("time.Time", "string");
        assert_eq!(struct_body(&fields, &options), "  Time: string;\n");

        let pointer = vec![Field::embedded(TypeExpr::pointer(TypeExpr::ident("Base")))];
        assert_eq!(
            struct_body(&pointer, &CompileOptions::default()),
            "  Base?: Base | undefined;\n"
        );
    }

    #[test]
    fn test_grouped_names() {
        let field = Field::grouped(["X", "y", "Z"], TypeExpr::ident("float64"));
        assert_eq!(
            single(field),
            "  X: number /* float64 */;\n  Z: number /* float64 */;\n"
        );

        let renamed = Field::grouped(["X", "Y"], TypeExpr::ident("int")).with_tag(r#"json:"v""#);
        assert_eq!(single(renamed), "  v: number /* int */;\n");

        let yaml_only = Field::grouped(["lower", "Upper", "Other"], TypeExpr::ident("bool"))
            .with_tag(r#"yaml:"flag,omitempty""#);
        assert_eq!(single(yaml_only), "  flag?: boolean;\n");
    }

    #[test]
    fn test_readonly_quoted_and_override() {
        let field = Field::named("ContentType", TypeExpr::ident("string"))
            .with_tag(r#"json:"content-type" tstype:"'json' | 'xml',readonly""#);
        assert_eq!(
            single(field),
            "  readonly 'content-type': 'json' | 'xml';\n"
        );
    }

    #[test]
    fn test_override_keeps_pointer_optionality() {
        let field = Field::named("At", TypeExpr::pointer(TypeExpr::qualified("time", "Time")))
            .with_tag(r#"json:"at" tstype:"Date""#);
        assert_eq!(single(field), "  at?: Date;\n");
    }

    #[test]
    fn test_yaml_flavor_lowercases() {
        let fields = vec![
            Field::named("MaxRetries", TypeExpr::ident("int")),
            Field::named("Host", TypeExpr::ident("string")).with_tag(r#"yaml:"hostname""#),
        ];
        let options = CompileOptions::default().with_flavor(Flavor::Yaml);
        assert_eq!(
            struct_body(&fields, &options),
            "  maxretries: number /* int */;\n  hostname: string;\n"
        );
    }

    #[test]
    fn test_comments() {
        let field = Field::named("Timeout", TypeExpr::ident("int"))
            .with_tag(r#"json:"timeout""#)
            .with_doc("Timeout for requests.")
            .with_comment("seconds");
        assert_eq!(
            single(field.clone()),
            "  /**\n   * Timeout for requests.\n   */\n  timeout: number /* int */; // seconds\n"
        );

        let options = CompileOptions::default().without_comments();
        assert_eq!(
            struct_body(&[field], &options),
            "  timeout: number /* int */;\n"
        );
    }

    #[test]
    fn test_nested_struct_indentation() {
        let field = Field::named(
            "Inner",
            TypeExpr::structure(vec![
                Field::named("X", TypeExpr::ident("string")).with_tag(r#"json:"x""#)
            ]),
        )
        .with_tag(r#"json:"inner""#);
        assert_eq!(single(field), "  inner: {\n    x: string;\n  };\n");
    }

    fn interface_body(members: &[Field], options: &CompileOptions) -> String {
        let mut ctx = CompilerContext::new(options);
        ctx.write_interface_fields(members, 0)
            .expect("Failed to compile interface");
        ctx.into_output()
    }

    #[test]
    fn test_interface_methods_only() {
        let members = vec![
            Field::named("String", TypeExpr::Func),
            Field::named("Close", TypeExpr::Func),
        ];
        assert_eq!(interface_body(&members, &CompileOptions::default()), "any");
        assert_eq!(interface_body(&[], &CompileOptions::default()), "any");

        let options = CompileOptions {
            fallback_type: "unknown".to_string(),
            ..Default::default()
        };
        assert_eq!(interface_body(&members, &options), "unknown");
    }

    #[test]
    fn test_interface_intersection() {
        let members = vec![
            Field::embedded(TypeExpr::binary(
                TypeExpr::unary(UnaryOp::Tilde, TypeExpr::ident("int")),
                "|",
                TypeExpr::ident("string"),
            )),
            Field::named("Len", TypeExpr::Func),
            Field::embedded(TypeExpr::ident("Stringer")),
        ];
        assert_eq!(
            interface_body(&members, &CompileOptions::default()),
            "\n  number /* int */ | string &\n  Stringer"
        );
    }

    #[test]
    fn test_interface_member_comments() {
        let members = vec![
            Field::embedded(TypeExpr::ident("Reader"))
                .with_doc("Reader half.")
                .with_comment("reads"),
            Field::embedded(TypeExpr::ident("Writer")),
        ];
        assert_eq!(
            interface_body(&members, &CompileOptions::default()),
            "\n  /**\n   * Reader half.\n   */\n  Reader // reads\n &\n  Writer"
        );
    }

    #[test]
    fn test_interface_multiline_comment_stays_on_one_line() {
        let members = vec![
            Field::embedded(TypeExpr::ident("Reader")).with_comment("first line\nsecond line\n"),
            Field::embedded(TypeExpr::ident("Writer")),
        ];
        assert_eq!(
            interface_body(&members, &CompileOptions::default()),
            "\n  Reader // first line second line\n &\n  Writer"
        );
    }
}
