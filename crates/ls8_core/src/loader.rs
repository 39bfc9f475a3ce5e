/// Parse the text of an `.ls8` program into memory bytes.
///
/// Each line whose first character is a binary digit contributes one
/// byte: the leading run of `0`/`1` characters (eight at most) is parsed
/// base 2, so trailing `# comments` are allowed. Any other line - blank,
/// comment, garbage - is skipped silently.
pub fn parse_program(source: &str) -> Vec<u8> {
    source.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<u8> {
    if !line.starts_with(['0', '1']) {
        return None;
    }
    let digits: String = line
        .chars()
        .take_while(|c| *c == '0' || *c == '1')
        .take(8)
        .collect();
    u8::from_str_radix(&digits, 2).ok()
}
