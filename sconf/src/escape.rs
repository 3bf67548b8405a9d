/// Quote a string, escaping `"`, line feeds and carriage returns.
///
/// The grammar has no escape for a backslash, so one is written as is. A
/// string holding a backslash followed by `n` or `r` reads back with that pair
/// turned into the control character, and a string ending in a backslash reads
/// back as an unterminated string.
pub fn escape_string(str: &str) -> String {
    let mut output = String::with_capacity(str.len() + 2);
    output.push('"');

    for c in str.chars() {
        match c {
            '\n' => output.push_str(r#"\n"#),
            '\r' => output.push_str(r#"\r"#),
            '"' => output.push_str(r#"\""#),
            c => output.push(c),
        }
    }

    output.push('"');
    output
}

/// Render a char literal.
///
/// Bytes above `0x7f` become the Latin-1 character, which encodes as two bytes
/// in UTF-8 and so does not read back as the same char.
pub fn escape_char(c: u8) -> String {
    let mut output = String::with_capacity(2);
    output.push('\\');
    output.push(char::from(c));
    output
}
