//! File name derivation
//!
//! Clipboard text is reduced to a filesystem-safe subset and substituted
//! into the user's template. Template literals and fill characters pass
//! through untouched (the user wrote them); substituted values are always
//! sanitized first, so a value can never smuggle a path separator into the
//! name.
//!
//! Template syntax:
//! - `{name}` inserts a variable
//! - `{name:[[fill]align][width][.precision]}` truncates the value to
//!   `precision` characters, then pads it to `width` characters with `fill`
//!   (default space). `align` is `<` (default), `>` or `^`.
//! - `{{` and `}}` are literal braces

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use thiserror::Error;
use tracing::warn;

use crate::constants::files;

/// Why a template could not be rendered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    #[error("unsupported format spec '{spec}' for '{name}'")]
    UnsupportedFormat { name: String, spec: String },

    #[error("malformed template: {0}")]
    Malformed(&'static str),
}

/// Map `text` onto the allowed character set, truncate it to `max_len`
/// characters and trim surrounding whitespace.
///
/// Allowed: alphanumerics, space, `-`, `_`, `.`. Anything else becomes `_`.
/// Returns `"empty"` rather than an empty string.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        files::EMPTY_TEXT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Values available to a template for one save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub date: String,
    pub time: String,
    pub datetime: String,
    pub timestamp: String,
    pub text: String,
    pub text_full: String,
}

impl TemplateVars {
    /// Variables for a save at `now` with already-sanitized text
    pub fn at<Tz>(now: &DateTime<Tz>, sanitized_text: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H-%M-%S").to_string(),
            datetime: now.format("%Y%m%d_%H%M%S").to_string(),
            timestamp: now.timestamp().to_string(),
            text: sanitized_text.to_string(),
            text_full: sanitized_text.to_string(),
        }
    }

    /// Fixed illustrative values used to preview a template
    pub fn example() -> Self {
        Self {
            date: "2024-01-15".to_string(),
            time: "14-30-05".to_string(),
            datetime: "20240115_143005".to_string(),
            timestamp: "1705332605".to_string(),
            text: "example_text".to_string(),
            text_full: "example_text".to_string(),
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "date" => Some(self.date.as_str()),
            "time" => Some(self.time.as_str()),
            "datetime" => Some(self.datetime.as_str()),
            "timestamp" => Some(self.timestamp.as_str()),
            "text" => Some(self.text.as_str()),
            "text_full" => Some(self.text_full.as_str()),
            _ => None,
        }
    }

    /// Name used when the template cannot be rendered
    pub fn fallback_name(&self) -> String {
        format!(
            "{}{}.{}",
            files::FALLBACK_PREFIX,
            self.datetime,
            files::EXTENSION
        )
    }
}

/// Substitute `vars` into `template`
pub fn render(template: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(TemplateError::Malformed("single '}' encountered")),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(TemplateError::Malformed("nested '{' in field"));
                        }
                        Some(ch) => field.push(ch),
                        None => return Err(TemplateError::Malformed("unclosed '{'")),
                    }
                }
                out.push_str(&render_field(&field, vars)?);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn render_field(field: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };

    if name.is_empty() {
        return Err(TemplateError::Malformed("empty field name"));
    }

    let value = vars
        .get(name)
        .ok_or_else(|| TemplateError::UnknownVariable(name.to_string()))?;

    match spec {
        None | Some("") => Ok(value.to_string()),
        Some(spec) => {
            let spec = FormatSpec::parse(spec).ok_or_else(|| TemplateError::UnsupportedFormat {
                name: name.to_string(),
                spec: spec.to_string(),
            })?;
            Ok(spec.apply(value))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            _ => None,
        }
    }
}

/// String format spec: `[[fill]align][width][.precision]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    fill: char,
    align: Align,
    width: usize,
    precision: Option<usize>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Option<Self> {
        let mut fill = ' ';
        let mut align = Align::Left;
        let mut rest = spec;

        let mut chars = spec.chars();
        match (chars.next(), chars.next()) {
            (Some(f), Some(a)) if Align::from_char(a).is_some() => {
                fill = f;
                align = Align::from_char(a)?;
                rest = &spec[f.len_utf8() + a.len_utf8()..];
            }
            (Some(a), _) if Align::from_char(a).is_some() => {
                align = Align::from_char(a)?;
                rest = &spec[a.len_utf8()..];
            }
            _ => {}
        }

        let (width, precision) = match rest.split_once('.') {
            Some((width, precision)) => (width, Some(precision)),
            None => (rest, None),
        };

        let width = if width.is_empty() {
            0
        } else {
            parse_count(width)?
        };
        let precision = match precision {
            Some(digits) => Some(parse_count(digits)?),
            None => None,
        };

        Some(Self {
            fill,
            align,
            width,
            precision,
        })
    }

    /// Truncate to `precision`, then pad to `width`, both in characters
    fn apply(&self, value: &str) -> String {
        let truncated: String = match self.precision {
            Some(precision) => value.chars().take(precision).collect(),
            None => value.to_string(),
        };

        let padding = self.width.saturating_sub(truncated.chars().count());
        let (before, after) = match self.align {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };

        let mut out = String::with_capacity(truncated.len() + padding * self.fill.len_utf8());
        out.extend(std::iter::repeat_n(self.fill, before));
        out.push_str(&truncated);
        out.extend(std::iter::repeat_n(self.fill, after));
        out
    }
}

/// Non-empty run of ASCII digits, no sign
fn parse_count(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Render the file name for `text` saved at `now`
pub fn derive<Tz>(
    template: &str,
    text: &str,
    now: &DateTime<Tz>,
    max_len: usize,
) -> Result<String, TemplateError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let vars = TemplateVars::at(now, &sanitize(text, max_len));
    render(template, &vars)
}

/// Like [`derive`], but an unusable template yields `clip_<datetime>.txt`
/// and a warning instead of an error
pub fn derive_or_fallback<Tz>(
    template: &str,
    text: &str,
    now: &DateTime<Tz>,
    max_len: usize,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    derive(template, text, now, max_len).unwrap_or_else(|e| {
        warn!(template = %template, error = %e, "Invalid template, using fallback name");
        TemplateVars::at(now, files::EMPTY_TEXT).fallback_name()
    })
}

/// Append `.txt` unless the name already ends with it (any case)
pub fn ensure_txt_extension(name: &str) -> String {
    let suffix = format!(".{}", files::EXTENSION);
    if name.to_lowercase().ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_sanitize_replaces_disallowed_characters() {
        assert_eq!(sanitize("a/b\\c:d*e", 50), "a_b_c_d_e");
        assert_eq!(sanitize("keep me-_.ok", 50), "keep me-_.ok");
        assert_eq!(sanitize("line1\nline2\t", 50), "line1_line2_");
    }

    #[test]
    fn test_sanitize_keeps_unicode_alphanumerics() {
        assert_eq!(sanitize("héllo wörld 你好", 50), "héllo wörld 你好");
    }

    #[test]
    fn test_sanitize_truncates_by_characters() {
        assert_eq!(sanitize("abcdefghij", 4), "abcd");
        assert_eq!(sanitize("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_sanitize_trims_after_truncation() {
        assert_eq!(sanitize("   padded   ", 50), "padded");
        assert_eq!(sanitize("abc   def", 4), "abc");
    }

    #[test]
    fn test_sanitize_empty_sentinel() {
        assert_eq!(sanitize("", 50), "empty");
        assert_eq!(sanitize("     ", 50), "empty");
        assert_eq!(sanitize("x", 0), "empty");
        // Newlines become underscores, so they do not count as blank
        assert_eq!(sanitize("\n", 50), "_");
    }

    #[test]
    fn test_sanitize_output_properties() {
        let inputs = [
            "Hello, World! 123",
            "../../etc/passwd",
            "   ",
            "emoji 🎉 party",
            "tabs\tand\rreturns",
            "a very long piece of clipboard text that exceeds the default limit by a lot",
        ];
        for input in inputs {
            let out = sanitize(input, 20);
            assert!(out.chars().count() <= 20, "{input:?} -> {out:?}");
            assert!(!out.is_empty());
            assert!(
                out.chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')),
                "{input:?} -> {out:?}"
            );
            assert!(!out.contains('/'));
        }
    }

    #[test]
    fn test_template_vars_formatting() {
        let vars = TemplateVars::at(&fixed_now(), "Hello");
        assert_eq!(vars.date, "2024-03-09");
        assert_eq!(vars.time, "07-05-01");
        assert_eq!(vars.datetime, "20240309_070501");
        assert_eq!(vars.timestamp, fixed_now().timestamp().to_string());
        assert_eq!(vars.text, "Hello");
        assert_eq!(vars.text_full, "Hello");
    }

    #[test]
    fn test_derive_hello_world_scenario() {
        let name = derive(
            "clip_{date}_{time}_{text:.5}.txt",
            "Hello, World! 123",
            &fixed_now(),
            50,
        )
        .unwrap();
        assert_eq!(name, "clip_2024-03-09_07-05-01_Hello.txt");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let template = "{datetime}-{timestamp}-{text_full}.txt";
        let a = derive(template, "same text", &fixed_now(), 50).unwrap();
        let b = derive(template, "same text", &fixed_now(), 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_template_literals_pass_through() {
        let name = derive("notes/{text}.md", "a/b", &fixed_now(), 50).unwrap();
        assert_eq!(name, "notes/a_b.md");
    }

    #[test]
    fn test_brace_escapes() {
        let vars = TemplateVars::example();
        assert_eq!(render("{{{text}}}", &vars).unwrap(), "{example_text}");
    }

    #[test]
    fn test_precision_longer_than_value() {
        let vars = TemplateVars::example();
        assert_eq!(render("{date:.100}", &vars).unwrap(), "2024-01-15");
        assert_eq!(render("{text:.0}x", &vars).unwrap(), "x");
        assert_eq!(render("{text:}", &vars).unwrap(), "example_text");
    }

    #[test]
    fn test_width_and_alignment() {
        let vars = TemplateVars::example();
        assert_eq!(render("{text:>15}.txt", &vars).unwrap(), "   example_text.txt");
        assert_eq!(render("{text:15}|", &vars).unwrap(), "example_text   |");
        assert_eq!(render("{text:<15}|", &vars).unwrap(), "example_text   |");
        assert_eq!(render("{text:^16}|", &vars).unwrap(), "  example_text  |");
        assert_eq!(render("{text:^15}|", &vars).unwrap(), " example_text  |");
        // Width never truncates
        assert_eq!(render("{text:>4}", &vars).unwrap(), "example_text");
    }

    #[test]
    fn test_fill_with_precision() {
        let vars = TemplateVars::example();
        assert_eq!(render("{text:_<8.3}", &vars).unwrap(), "exa_____");
        assert_eq!(render("{text:*>6.3}", &vars).unwrap(), "***exa");
        assert_eq!(render("{text:->5.10}", &vars).unwrap(), "example_te");
        assert_eq!(render("{date:0>12}", &vars).unwrap(), "002024-01-15");
    }

    #[test]
    fn test_padding_counts_characters() {
        let vars = TemplateVars::at(&fixed_now(), "日本語");
        assert_eq!(render("{text:·^7}", &vars).unwrap(), "··日本語··");
    }

    #[test]
    fn test_derive_with_width_spec() {
        let name = derive("{text:_>8.5}.txt", "Hello, World!", &fixed_now(), 50).unwrap();
        assert_eq!(name, "___Hello.txt");
    }

    #[test]
    fn test_render_errors() {
        let vars = TemplateVars::example();
        assert_eq!(
            render("{user}.txt", &vars),
            Err(TemplateError::UnknownVariable("user".to_string()))
        );
        for spec in ["{text:.}", "{text:abc}", "{text:=10}", "{text:+5}", "{text:5.2.1}"] {
            assert!(
                matches!(render(spec, &vars), Err(TemplateError::UnsupportedFormat { .. })),
                "{spec}"
            );
        }
        assert!(matches!(render("{text", &vars), Err(TemplateError::Malformed(_))));
        assert!(matches!(render("text}", &vars), Err(TemplateError::Malformed(_))));
        assert!(matches!(render("{}", &vars), Err(TemplateError::Malformed(_))));
    }

    #[test]
    fn test_unknown_variable_uses_fallback() {
        for template in ["{nope}.txt", "clip_{date}_{user}.txt", "{text"] {
            let name = derive_or_fallback(template, "Hello", &fixed_now(), 50);
            assert_eq!(name, "clip_20240309_070501.txt");
        }
    }

    #[test]
    fn test_ensure_txt_extension() {
        assert_eq!(ensure_txt_extension("notes"), "notes.txt");
        assert_eq!(ensure_txt_extension("notes.txt"), "notes.txt");
        assert_eq!(ensure_txt_extension("NOTES.TXT"), "NOTES.TXT");
        assert_eq!(ensure_txt_extension("notes.md"), "notes.md.txt");
    }
}
