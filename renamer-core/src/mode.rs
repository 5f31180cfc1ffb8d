//! Rename modes and the computation of a target name for a single entry.

use crate::entry::FileEntry;
use crate::error::RenameError;
use crate::name::{camel_case, format_size, title_case, zero_pad, MAX_NAME_BYTES};
use crate::plan::{ExtensionPolicy, PlanOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width `{counter}` is padded to in templates
const TEMPLATE_COUNTER_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Upper,
    Lower,
    Title,
    Camel,
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Title => "title",
            Self::Camel => "camel",
        };
        f.write_str(name)
    }
}

/// How new names are computed. Exactly one mode is active per plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenameMode {
    /// `prefix` + zero padded counter + original extension
    Sequential {
        prefix: String,
        start_index: u64,
        digit_width: usize,
    },
    /// Literal replace-all of `pattern` with `replacement`
    PatternReplace { pattern: String, replacement: String },
    CaseChange { kind: CaseKind },
    /// Regular expression replace-all over the full file name
    Regex { search: String, replace: String },
    /// Placeholders: `{name}`, `{ext}`, `{counter}`, `{date}`, `{time}`, `{size}`
    Template { template: String },
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential {
                prefix,
                start_index,
                digit_width,
            } => write!(
                f,
                "sequential '{}' from {} ({} digits)",
                prefix, start_index, digit_width
            ),
            Self::PatternReplace {
                pattern,
                replacement,
            } => write!(f, "replace '{}' -> '{}'", pattern, replacement),
            Self::CaseChange { kind } => write!(f, "case {}", kind),
            Self::Regex { search, replace } => write!(f, "regex '{}' -> '{}'", search, replace),
            Self::Template { template } => write!(f, "template '{}'", template),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplatePart {
    Literal(String),
    Name,
    Ext,
    Counter,
    Date,
    Time,
    Size,
}

/// A mode whose parameters have been validated and whose regex is compiled
#[derive(Debug)]
pub(crate) enum CompiledMode<'a> {
    Sequential {
        prefix: &'a str,
        start: u64,
        width: usize,
    },
    Pattern {
        pattern: &'a str,
        replacement: &'a str,
        full_name: bool,
    },
    Case(CaseKind),
    Regex {
        regex: Regex,
        replace: String,
    },
    Template(Vec<TemplatePart>),
}

fn reject_separators(what: &str, value: &str) -> Result<(), RenameError> {
    if value.contains('/') || value.contains('\\') {
        return Err(RenameError::InvalidPattern(format!(
            "{} '{}' must not contain a path separator",
            what, value
        )));
    }
    Ok(())
}

impl RenameMode {
    /// Validate the parameters for a batch of `count` files
    pub(crate) fn compile(&self, count: usize) -> Result<CompiledMode<'_>, RenameError> {
        match self {
            Self::Sequential {
                prefix,
                start_index,
                digit_width,
            } => {
                reject_separators("prefix", prefix)?;
                if prefix.len().saturating_add(*digit_width) > MAX_NAME_BYTES {
                    return Err(RenameError::InvalidPattern(format!(
                        "prefix plus {} digits exceeds the {}-byte name limit",
                        digit_width, MAX_NAME_BYTES
                    )));
                }
                let last = count.saturating_sub(1) as u64;
                if start_index.checked_add(last).is_none() {
                    return Err(RenameError::InvalidPattern(format!(
                        "sequence starting at {} overflows for {} files",
                        start_index, count
                    )));
                }
                Ok(CompiledMode::Sequential {
                    prefix,
                    start: *start_index,
                    width: *digit_width,
                })
            },
            Self::PatternReplace {
                pattern,
                replacement,
            } => {
                if pattern.is_empty() {
                    return Err(RenameError::InvalidPattern(
                        "replace pattern must not be empty".to_string(),
                    ));
                }
                Ok(CompiledMode::Pattern {
                    pattern,
                    replacement,
                    full_name: pattern.contains('.'),
                })
            },
            Self::CaseChange { kind } => Ok(CompiledMode::Case(*kind)),
            Self::Regex { search, replace } => {
                let regex = Regex::new(search).map_err(|e| {
                    RenameError::InvalidPattern(format!("invalid regex '{}': {}", search, e))
                })?;
                Ok(CompiledMode::Regex {
                    regex,
                    replace: translate_backrefs(replace),
                })
            },
            Self::Template { template } => Ok(CompiledMode::Template(parse_template(template)?)),
        }
    }
}

/// Rewrite `\1`-style group references into the `${1}` form `regex` expects
pub(crate) fn translate_backrefs(replace: &str) -> String {
    let mut out = String::with_capacity(replace.len());
    let mut chars = replace.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek().is_some_and(char::is_ascii_digit) {
            out.push_str("${");
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                out.push(d);
            }
            out.push('}');
        } else {
            out.push(c);
        }
    }
    out
}

pub(crate) fn parse_template(template: &str) -> Result<Vec<TemplatePart>, RenameError> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            },
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for k in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed {
                    return Err(RenameError::InvalidPattern(format!(
                        "unclosed '{{' in template '{}'",
                        template
                    )));
                }
                let part = match key.as_str() {
                    "name" => TemplatePart::Name,
                    "ext" => TemplatePart::Ext,
                    "counter" => TemplatePart::Counter,
                    "date" => TemplatePart::Date,
                    "time" => TemplatePart::Time,
                    "size" => TemplatePart::Size,
                    other => {
                        return Err(RenameError::InvalidPattern(format!(
                            "unknown placeholder '{{{}}}' in template '{}'",
                            other, template
                        )))
                    },
                };
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(part);
            },
            '}' => {
                return Err(RenameError::InvalidPattern(format!(
                    "unmatched '}}' in template '{}'",
                    template
                )))
            },
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    for part in &parts {
        if let TemplatePart::Literal(text) = part {
            reject_separators("template", text)?;
        }
    }
    if parts.is_empty() {
        return Err(RenameError::InvalidPattern("template is empty".to_string()));
    }
    Ok(parts)
}

fn change_case(s: &str, kind: CaseKind) -> String {
    match kind {
        CaseKind::Upper => s.to_uppercase(),
        CaseKind::Lower => s.to_lowercase(),
        CaseKind::Title => title_case(s),
        CaseKind::Camel => camel_case(s),
    }
}

fn change_extension_case(ext: &str, kind: CaseKind) -> String {
    match kind {
        CaseKind::Upper => ext.to_uppercase(),
        CaseKind::Lower | CaseKind::Title | CaseKind::Camel => ext.to_lowercase(),
    }
}

impl CompiledMode<'_> {
    /// Target file name for `entry` at 0-based `position` in the input
    pub(crate) fn target_name(
        &self,
        entry: &FileEntry,
        position: usize,
        options: &PlanOptions,
    ) -> String {
        match self {
            Self::Sequential {
                prefix,
                start,
                width,
            } => format!(
                "{}{}{}",
                prefix,
                zero_pad(start + position as u64, *width),
                entry.extension()
            ),
            Self::Pattern {
                pattern,
                replacement,
                full_name,
            } => {
                if *full_name {
                    entry.file_name().replace(pattern, replacement)
                } else {
                    format!(
                        "{}{}",
                        entry.stem().replace(pattern, replacement),
                        entry.extension()
                    )
                }
            },
            Self::Case(kind) => {
                let ext = match options.case_extension {
                    ExtensionPolicy::Keep => entry.extension().to_string(),
                    ExtensionPolicy::Apply => change_extension_case(entry.extension(), *kind),
                };
                format!("{}{}", change_case(entry.stem(), *kind), ext)
            },
            Self::Regex { regex, replace } => regex
                .replace_all(entry.file_name(), replace.as_str())
                .into_owned(),
            Self::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Literal(text) => out.push_str(text),
                        TemplatePart::Name => out.push_str(entry.stem()),
                        TemplatePart::Ext => out.push_str(entry.extension()),
                        TemplatePart::Counter => out.push_str(&zero_pad(
                            position as u64 + 1,
                            TEMPLATE_COUNTER_WIDTH,
                        )),
                        TemplatePart::Date => {
                            out.push_str(&options.now.format("%Y-%m-%d").to_string());
                        },
                        TemplatePart::Time => {
                            out.push_str(&options.now.format("%H-%M-%S").to_string());
                        },
                        TemplatePart::Size => out.push_str(&format_size(entry.size())),
                    }
                }
                out
            },
        }
    }
}
