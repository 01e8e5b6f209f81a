/// Quote and escape a string as a JSON string literal.
///
/// Besides what JSON requires (control characters, `"` and `\`), this
/// escapes `<`, U+2028 and U+2029 so the output can sit inside an HTML
/// `<script>` block or a JavaScript string.
///
/// # Examples
///
/// ```
/// use remote_arg_devalue::stringify_string;
///
/// assert_eq!(stringify_string("hi"), "\"hi\"");
/// assert_eq!(stringify_string("</script>"), "\"\\u003C/script>\"");
/// ```
pub fn stringify_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    let mut last = 0;

    for (i, ch) in s.char_indices() {
        let escaped = match ch {
            '"' => "\\\"".to_string(),
            '\\' => "\\\\".to_string(),
            '\u{0008}' => "\\b".to_string(),
            '\u{000C}' => "\\f".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            '<' => "\\u003C".to_string(),
            '\u{2028}' => "\\u2028".to_string(),
            '\u{2029}' => "\\u2029".to_string(),
            c if (c as u32) < 0x20 => format!("\\u{:04x}", c as u32),
            _ => continue,
        };
        result.push_str(&s[last..i]);
        result.push_str(&escaped);
        last = i + ch.len_utf8();
    }

    result.push_str(&s[last..]);
    result.push('"');
    result
}
