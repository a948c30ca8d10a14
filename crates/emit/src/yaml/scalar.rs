//! Scalar styles: plain, double-quoted and block literal.

/// Where a scalar is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Mapping value, sequence item or key
    Block,
    /// Inside `[a, b]`
    Flow,
}

/// How a string is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scalar {
    /// On the same line as its key or dash
    Inline(String),
    /// `|`, `|-` or `|+` header followed by the lines of the literal
    Block {
        header: &'static str,
        lines: Vec<String>,
    },
}

/// Words YAML 1.1 parsers turn into booleans, nulls or special floats.
const RESERVED: &[&str] = &[
    "true", "false", "null", "yes", "no", "on", "off", "y", "n", "~", ".inf", "-.inf", "+.inf",
    ".nan", "<<",
];

const INDICATORS: &[char] = &[':', '#', '&', '*', '!', '|', '>', '\'', '"', '%'];

const START_INDICATORS: &[char] = &['-', '?', ':', ',', '[', ']', '{', '}', '@', '`'];

const FLOW_INDICATORS: &[char] = &[',', '[', ']', '{', '}'];

/// Style a string for the given context.
pub(crate) fn string(value: &str, context: Context) -> Scalar {
    if value.contains('\n')
        && context == Context::Block
        && let Some(block) = block_literal(value)
    {
        return block;
    }
    if needs_quotes(value, context) {
        Scalar::Inline(quote(value))
    } else {
        Scalar::Inline(value.to_string())
    }
}

/// Whether a string must be double-quoted to read back as the same string.
pub(crate) fn needs_quotes(value: &str, context: Context) -> bool {
    let Some(first) = value.chars().next() else {
        return true;
    };

    if first.is_whitespace() || value.ends_with(char::is_whitespace) {
        return true;
    }
    if first.is_ascii_digit() || START_INDICATORS.contains(&first) {
        return true;
    }
    if value.contains(INDICATORS) {
        return true;
    }
    if context == Context::Flow && value.contains(FLOW_INDICATORS) {
        return true;
    }
    if value.chars().any(|c| c.is_control() || is_special(c)) {
        return true;
    }
    if RESERVED.iter().any(|w| w.eq_ignore_ascii_case(value)) {
        return true;
    }
    value.parse::<f64>().is_ok()
}

/// Double-quoted form with escapes.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() || is_special(c) => {
                out.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Line and paragraph separators and the byte order mark.
fn is_special(c: char) -> bool {
    matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}')
}

/// Block literal for a multi-line string, when the literal reads back
/// exactly: no leading whitespace on the first line, no trailing
/// whitespace on any line, no control characters besides newline and tab.
fn block_literal(value: &str) -> Option<Scalar> {
    let first = value.chars().next()?;
    if first.is_whitespace() {
        return None;
    }
    if value
        .chars()
        .any(|c| (c.is_control() && c != '\n' && c != '\t') || is_special(c))
    {
        return None;
    }
    if value
        .split('\n')
        .any(|line| line.ends_with([' ', '\t']))
    {
        return None;
    }

    let trailing = value.len() - value.trim_end_matches('\n').len();
    let (header, body) = match trailing {
        0 => ("|-", value),
        1 => ("|", &value[..value.len() - 1]),
        _ => ("|+", &value[..value.len() - 1]),
    };

    Some(Scalar::Block {
        header,
        lines: body.split('\n').map(str::to_string).collect(),
    })
}

/// Canonical float text; non-finite values are rejected before this point.
pub(crate) fn float(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(value: &str) -> String {
        match string(value, Context::Block) {
            Scalar::Inline(s) => s,
            Scalar::Block { .. } => panic!("expected inline scalar for {value:?}"),
        }
    }

    #[test]
    fn test_plain_strings() {
        for plain in [
            "ubuntu-latest",
            "Test Step",
            "actions/checkout@v4",
            "${{ matrix.os }}",
            "/tmp",
            "cargo test --workspace",
            "refs/heads/main",
        ] {
            assert_eq!(inline(plain), plain);
        }
    }

    #[test]
    fn test_reserved_words_are_quoted() {
        for word in ["true", "False", "NULL", "yes", "No", "on", "OFF", "y", "~"] {
            assert_eq!(inline(word), format!("\"{word}\""));
        }
    }

    #[test]
    fn test_numbers_are_quoted() {
        assert_eq!(inline("3.12"), "\"3.12\"");
        assert_eq!(inline("20"), "\"20\"");
        assert_eq!(inline("1e5"), "\"1e5\"");
        assert_eq!(inline("inf"), "\"inf\"");
        assert_eq!(inline(".inf"), "\".inf\"");
    }

    #[test]
    fn test_indicators_are_quoted() {
        assert_eq!(inline("a: b"), "\"a: b\"");
        assert_eq!(inline("0 0 * * *"), "\"0 0 * * *\"");
        assert_eq!(inline("@org/team"), "\"@org/team\"");
        assert_eq!(inline("- item"), "\"- item\"");
        assert_eq!(inline("it's"), "\"it's\"");
        assert_eq!(inline("x # y"), "\"x # y\"");
        assert_eq!(inline(""), "\"\"");
        assert_eq!(inline(" padded"), "\" padded\"");
    }

    #[test]
    fn test_flow_context_quotes_separators() {
        assert!(!needs_quotes("a,b", Context::Block));
        assert!(needs_quotes("a,b", Context::Flow));
        assert!(!needs_quotes("build", Context::Flow));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quote("back\\slash"), r#""back\\slash""#);
        assert_eq!(quote("tab\there"), r#""tab\there""#);
        assert_eq!(quote("bell\u{7}"), r#""bell\u0007""#);
    }

    #[test]
    fn test_block_literal_chomping() {
        assert_eq!(
            string("a\nb\n", Context::Block),
            Scalar::Block {
                header: "|",
                lines: vec!["a".into(), "b".into()]
            }
        );
        assert_eq!(
            string("a\nb", Context::Block),
            Scalar::Block {
                header: "|-",
                lines: vec!["a".into(), "b".into()]
            }
        );
        assert_eq!(
            string("a\n\n", Context::Block),
            Scalar::Block {
                header: "|+",
                lines: vec!["a".into(), String::new()]
            }
        );
    }

    #[test]
    fn test_multiline_falls_back_to_quotes() {
        assert_eq!(inline("  indented\nx"), "\"  indented\\nx\"");
        assert_eq!(inline("trailing \nx"), "\"trailing \\nx\"");
        assert_eq!(inline("\nleading"), "\"\\nleading\"");
    }

    #[test]
    fn test_float_text() {
        assert_eq!(float(1.0), "1.0");
        assert_eq!(float(3.5), "3.5");
        assert_eq!(float(-2.0), "-2.0");
    }
}
