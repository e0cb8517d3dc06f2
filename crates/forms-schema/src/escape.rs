//! String literal escaping for the node-document format

/// Quote `s` as a string literal
///
/// Backslashes are doubled and double quotes escaped. Characters a KDL
/// string may not hold literally (newlines and the disallowed control and
/// direction code points) are written as escapes; everything else is copied.
/// Escaping in one pass means the backslashes introduced for quotes are
/// never escaped again.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            other if needs_code_point_escape(other) => {
                out.push_str(&format!("\\u{{{:x}}}", u32::from(other)));
            }
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn needs_code_point_escape(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}'
            | '\u{b}'
            | '\u{e}'..='\u{1f}'
            | '\u{7f}'
            | '\u{85}'
            | '\u{200e}'..='\u{200f}'
            | '\u{2028}'..='\u{2029}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2066}'..='\u{2069}'
            | '\u{feff}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_quotes() {
        assert_eq!(escape("hello"), "\"hello\"");
        assert_eq!(escape(""), "\"\"");
    }

    #[test]
    fn escapes_backslash_before_quote() {
        assert_eq!(escape(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(escape(r#"\""#), r#""\\\"""#);
    }

    #[test]
    fn escapes_line_breaks() {
        assert_eq!(escape("line\nbreak\r\n"), r#""line\nbreak\r\n""#);
        assert_eq!(escape("page\u{c}\u{2028}"), r#""page\f\u{2028}""#);
    }

    #[test]
    fn escapes_disallowed_code_points() {
        assert_eq!(escape("\u{0}\u{7f}\u{feff}"), r#""\u{0}\u{7f}\u{feff}""#);
    }

    #[test]
    fn leaves_other_characters() {
        assert_eq!(escape("tab\there é ✓"), "\"tab\there é ✓\"");
    }
}
