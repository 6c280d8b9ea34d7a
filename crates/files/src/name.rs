//! Logical data file names.
//!
//! Data files come in families (`map0.mul`, `map1.mul`, `staidx2.mul`), so
//! callers ask for a base name plus an index and/or a type suffix.

use std::fmt::Write;

use crate::FileError;

/// A logical file name, expanded to a concrete file name by [`render`].
///
/// [`render`]: FileName::render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileName<'a> {
    /// Used as-is: `verdata.mul`.
    Plain(&'a str),
    /// A template where `{0}` stands for the index: `map{0}.mul`.
    Indexed { template: &'a str, index: i32 },
    /// `{name}{index}.{ext}`: `("map", 2, "mul")` is `map2.mul`.
    IndexedTyped {
        name: &'a str,
        index: i32,
        ext: &'a str,
    },
    /// `{name}.{ext}`: `("verdata", "mul")` is `verdata.mul`.
    Typed { name: &'a str, ext: &'a str },
}

impl FileName<'_> {
    /// Expands the name into the file name to look up.
    pub fn render(&self) -> Result<String, FileError> {
        match *self {
            FileName::Plain(name) => Ok(name.to_string()),
            FileName::Indexed { template, index } => format_index(template, index),
            FileName::IndexedTyped { name, index, ext } => Ok(format!("{name}{index}.{ext}")),
            FileName::Typed { name, ext } => Ok(format!("{name}.{ext}")),
        }
    }
}

impl<'a> From<&'a str> for FileName<'a> {
    fn from(name: &'a str) -> Self {
        FileName::Plain(name)
    }
}

/// Expands a composite template with a single argument.
///
/// Supports `{0}`, zero padding via `{0:D3}` or `{0:000}`, and `{{` / `}}`
/// escapes. Anything else is rejected.
fn format_index(template: &str, index: i32) -> Result<String, FileError> {
    let err = |reason: &str| FileError::Format {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(template.len() + 4);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut placeholder = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return Err(err("unterminated placeholder")),
                        Some(c) => placeholder.push(c),
                    }
                }
                write_placeholder(&mut out, &placeholder, index)
                    .map_err(|reason| err(reason.as_str()))?;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(err("unmatched closing brace")),
            c => out.push(c),
        }
    }

    Ok(out)
}

fn write_placeholder(out: &mut String, placeholder: &str, index: i32) -> Result<(), String> {
    let (arg, format) = match placeholder.split_once(':') {
        Some((arg, format)) => (arg, Some(format)),
        None => (placeholder, None),
    };

    if arg.trim() != "0" {
        return Err(format!("unsupported argument {arg:?}"));
    }

    let width = match format {
        None => 0,
        Some(f) => pad_width(f).ok_or_else(|| format!("unsupported format {f:?}"))?,
    };

    let digits = index.unsigned_abs();
    let sign = if index < 0 { "-" } else { "" };
    // Writing to a String cannot fail.
    let _ = write!(out, "{sign}{digits:0width$}");
    Ok(())
}

/// Largest zero-padding width accepted in a placeholder.
const MAX_PAD_WIDTH: usize = 99;

/// Width for `D`, `Dn` (either case) or an all-zero custom format.
fn pad_width(format: &str) -> Option<usize> {
    let width = if let Some(rest) = format.strip_prefix(['D', 'd']) {
        if rest.is_empty() {
            0
        } else if rest.bytes().all(|b| b.is_ascii_digit()) {
            rest.parse().ok()?
        } else {
            return None;
        }
    } else if !format.is_empty() && format.bytes().all(|b| b == b'0') {
        format.len()
    } else {
        return None;
    };
    (width <= MAX_PAD_WIDTH).then_some(width)
}
