//! File name helpers: splitting, validation and the string transforms the
//! rename modes are built from.

/// Windows reserved device names that cannot be used as a file name
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters rejected on at least one mainstream filesystem
const ILLEGAL_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Longest file name (in bytes) accepted by common filesystems
pub const MAX_NAME_BYTES: usize = 255;

/// Split a file name into stem and extension.
///
/// The extension keeps its leading dot. A name whose only dot is the first
/// character (`.bashrc`) has no extension.
pub fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(0) | None => (file_name, ""),
        Some(idx) => file_name.split_at(idx),
    }
}

/// Check if a filename is a Windows reserved name
/// Always checks regardless of platform to ensure cross-platform compatibility
pub fn is_windows_reserved(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name).to_uppercase();
    WINDOWS_RESERVED.contains(&base.as_str())
}

/// Validate a computed file name, returning a short description of the
/// first problem found.
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty name".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("'{}' is a reserved path component", name));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(format!(
            "name is {} bytes, limit is {}",
            name.len(),
            MAX_NAME_BYTES
        ));
    }
    if let Some(c) = name
        .chars()
        .find(|c| ILLEGAL_CHARS.contains(c) || c.is_control())
    {
        return Err(format!("illegal character {:?}", c));
    }
    if name.ends_with(' ') || name.ends_with('.') {
        return Err("trailing space or dot".to_string());
    }
    if is_windows_reserved(name) {
        return Err(format!("'{}' is a reserved device name", name));
    }
    Ok(())
}

/// Zero-pad `value` to at least `width` digits
pub fn zero_pad(value: u64, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

/// Upper-case the first letter of every alphanumeric run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Join words separated by `_`, `-` or whitespace as camelCase
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
    }
    out
}

/// Human readable size, e.g. `1.5 KB`
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// `stem_N.ext` for the collision suffix policy
pub fn with_suffix(file_name: &str, n: usize) -> String {
    let (stem, ext) = split_name(file_name);
    format!("{}_{}{}", stem, n, ext)
}
