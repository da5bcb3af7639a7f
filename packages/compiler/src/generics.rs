use crate::context::CompilerContext;
use crate::error::CompileResult;
use typeport_ast::TypeParam;

impl CompilerContext<'_> {
    /// Writes `<A extends C1, B extends C2>`, or nothing for an empty list
    pub fn write_type_params(&mut self, params: &[TypeParam]) -> CompileResult<()> {
        if params.is_empty() {
            return Ok(());
        }

        self.add_char('<');
        let mut first = true;
        for param in params {
            for name in &param.names {
                if !first {
                    self.add(", ");
                }
                first = false;
                self.add(name);
                self.add(" extends ");
                self.write_type(&param.constraint, 0, true)?;
            }
        }
        self.add_char('>');
        Ok(())
    }
}
