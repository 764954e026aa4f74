use std::collections::HashMap;

/// Parse all `{{var}}` spans in `input`.
/// Returns a list of `(start_byte, end_byte, var_name)` where start/end are byte
/// offsets in the original string (inclusive of the `{{` and `}}` delimiters).
/// Empty names and unclosed braces are skipped.
pub fn parse_vars(input: &str) -> Vec<(usize, usize, String)> {
    let mut result = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i + 1 < len {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let start = i;
            let inner_start = i + 2;
            // Search for closing '}}'
            let mut j = inner_start;
            let mut found = false;
            while j + 1 < len {
                if bytes[j] == b'}' && bytes[j + 1] == b'}' {
                    found = true;
                    break;
                }
                j += 1;
            }
            if found {
                let name = &input[inner_start..j];
                let trimmed = name.trim();
                if !trimmed.is_empty() {
                    result.push((start, j + 2, trimmed.to_string()));
                }
                i = j + 2;
            } else {
                // Unclosed — skip
                break;
            }
        } else {
            i += 1;
        }
    }

    result
}

/// Replace every `{{name}}` placeholder whose name is present in `vars`.
/// Single pass over the original string: replacement values are never
/// re-scanned, and placeholders for unknown names stay literal. With an empty
/// mapping this is the identity transform.
pub fn substitute(input: &str, vars: &HashMap<String, String>) -> String {
    let spans = parse_vars(input);
    if spans.is_empty() {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for (start, end, name) in &spans {
        output.push_str(&input[last..*start]);
        match vars.get(name) {
            Some(value) => output.push_str(value),
            None => output.push_str(&input[*start..*end]),
        }
        last = *end;
    }

    output.push_str(&input[last..]);
    output
}
