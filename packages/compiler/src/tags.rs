//! Struct tag parsing and the directives derived from it.
//!
//! Parsing (`StructTag::parse`) and interpretation (`TagDirectives::resolve`)
//! are separate stages so each can be exercised on its own.

use crate::error::{CompileError, CompileResult};

/// Namespaces that rename a field, in evaluation order.
/// A later namespace overwrites what an earlier one set.
pub const NAMING_NAMESPACES: [&str; 2] = ["json", "yaml"];

/// Namespace carrying TypeScript-specific overrides
pub const OVERRIDE_NAMESPACE: &str = "tstype";

/// One `key:"name,opt1,opt2"` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

impl Tag {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A parsed struct tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    tags: Vec<Tag>,
}

impl StructTag {
    /// Parses `json:"name,omitempty" yaml:"name"` style tag text.
    /// Surrounding back-quotes, if present, are stripped first.
    pub fn parse(raw: &str) -> CompileResult<Self> {
        let text = raw
            .strip_prefix('`')
            .and_then(|t| t.strip_suffix('`'))
            .unwrap_or(raw);
        let malformed = |reason: &str| CompileError::malformed_tag(raw, reason);

        let bytes = text.as_bytes();
        let mut tags = Vec::new();
        let mut pos = 0;

        loop {
            while pos < bytes.len() && bytes[pos] == b' ' {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }

            let key_start = pos;
            while pos < bytes.len()
                && bytes[pos] > b' '
                && bytes[pos] != b':'
                && bytes[pos] != b'"'
                && bytes[pos] != 0x7f
            {
                pos += 1;
            }
            if pos == key_start {
                return Err(malformed("invalid key"));
            }
            let key = &text[key_start..pos];

            if pos + 1 >= bytes.len() || bytes[pos] != b':' {
                return Err(malformed(&format!("missing ':' after key {:?}", key)));
            }
            pos += 1;
            if bytes[pos] != b'"' {
                return Err(malformed(&format!("value of {:?} is not quoted", key)));
            }

            let value_start = pos;
            pos += 1;
            while pos < bytes.len() && bytes[pos] != b'"' {
                if bytes[pos] == b'\\' {
                    pos += 1;
                }
                pos += 1;
            }
            if pos >= bytes.len() {
                return Err(malformed(&format!("unterminated value of {:?}", key)));
            }
            let quoted = &text[value_start + 1..pos];
            pos += 1;

            let value = unquote(quoted)
                .map_err(|reason| malformed(&format!("value of {:?}: {}", key, reason)))?;

            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_string();
            tags.push(Tag {
                key: key.to_string(),
                name,
                options: parts.map(str::to_string).collect(),
            });
        }

        Ok(Self { tags })
    }

    /// First entry with the given key
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Decodes the body of a double-quoted string with backslash escapes.
///
/// The decoded value must be valid UTF-8: a `\xNN` or octal escape above
/// 0x7f that does not complete a UTF-8 sequence is rejected, so the tag is
/// malformed.
fn unquote(body: &str) -> Result<String, String> {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' => return Err("newline in quoted value".to_string()),
            '\\' => {
                let escape = chars
                    .next()
                    .ok_or_else(|| "trailing backslash".to_string())?;
                match escape {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => out.push(read_radix(&mut chars, 2, 16)? as u8),
                    '0'..='7' => {
                        let mut value = escape.to_digit(8).unwrap_or_default();
                        for _ in 0..2 {
                            let digit = chars
                                .next()
                                .and_then(|d| d.to_digit(8))
                                .ok_or_else(|| "invalid octal escape".to_string())?;
                            value = value * 8 + digit;
                        }
                        if value > 0xff {
                            return Err("octal escape out of range".to_string());
                        }
                        out.push(value as u8);
                    }
                    'u' | 'U' => {
                        let digits = if escape == 'u' { 4 } else { 8 };
                        let code = read_radix(&mut chars, digits, 16)?;
                        let ch = char::from_u32(code)
                            .ok_or_else(|| format!("invalid code point {:#x}", code))?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                    }
                    other => return Err(format!("unknown escape \\{}", other)),
                }
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(out).map_err(|_| "escapes do not form valid UTF-8".to_string())
}

fn read_radix(
    chars: &mut std::str::Chars<'_>,
    count: usize,
    radix: u32,
) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(radix))
            .ok_or_else(|| "invalid numeric escape".to_string())?;
        value = value * radix + digit;
    }
    Ok(value)
}

/// What a field's tag asks the compiler to do with it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDirectives {
    /// Emitted name replacing the field identifier
    pub rename: Option<String>,
    /// `omitempty` on the naming namespace that won
    pub optional: bool,
    /// Pointer fields stay mandatory
    pub required: bool,
    pub readonly: bool,
    /// Literal TypeScript type replacing the translated one
    pub type_override: Option<String>,
}

impl TagDirectives {
    /// Resolves directives from raw tag text.
    ///
    /// Returns `Ok(None)` when the field must be left out of the output.
    pub fn resolve(raw: Option<&str>) -> CompileResult<Option<Self>> {
        let Some(raw) = raw else {
            return Ok(Some(Self::default()));
        };
        Ok(Self::from_tag(&StructTag::parse(raw)?))
    }

    pub fn from_tag(tag: &StructTag) -> Option<Self> {
        let mut directives = Self::default();

        for namespace in NAMING_NAMESPACES {
            if let Some(entry) = tag.get(namespace) {
                if entry.name == "-" {
                    return None;
                }
                directives.rename = (!entry.name.is_empty()).then(|| entry.name.clone());
                directives.optional = entry.has_option("omitempty");
            }
        }

        if let Some(entry) = tag.get(OVERRIDE_NAMESPACE) {
            if entry.name == "-" || entry.has_option("extends") {
                return None;
            }
            directives.type_override = (!entry.name.is_empty()).then(|| entry.name.clone());
            directives.required = entry.has_option("required");
            directives.readonly = entry.has_option("readonly");
        }

        Some(directives)
    }
}
