use crate::error::{CompileError, CompileResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Output naming mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Field identifiers are kept as written
    #[default]
    Default,
    /// Field identifiers are lower-cased, matching YAML decoders
    Yaml,
}

/// Options for TypeScript compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// One level of indentation
    pub indent: String,
    /// Type used for anything without a faithful translation
    pub fallback_type: String,
    /// `namespace.Name` to literal TypeScript type
    pub type_mappings: BTreeMap<String, String>,
    pub flavor: Flavor,
    /// Whether doc and trailing comments are copied into the output
    pub preserve_comments: bool,
    /// Text placed after the generated-file header of every package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<String>,
    /// Deepest type expression nesting accepted before giving up
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            fallback_type: "any".to_string(),
            type_mappings: BTreeMap::new(),
            flavor: Flavor::Default,
            preserve_comments: true,
            frontmatter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.type_mappings.insert(from.into(), to.into());
        self
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn without_comments(mut self) -> Self {
        self.preserve_comments = false;
        self
    }
}

/// Compilation context: the output buffer of one top-level emission
pub struct CompilerContext<'a> {
    buffer: String,
    nesting: usize,
    pub options: &'a CompileOptions,
}

impl<'a> CompilerContext<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            buffer: String::new(),
            nesting: 0,
            options,
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn add_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn add_fallback(&mut self) {
        self.buffer.push_str(&self.options.fallback_type);
    }

    pub fn get_output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }

    /// Records one more level of type nesting
    pub(crate) fn enter(&mut self) -> CompileResult<()> {
        if self.nesting >= self.options.max_depth {
            return Err(CompileError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }
        self.nesting += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }
}
