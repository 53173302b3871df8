//! Quote-aware field splitting
//!
//! Fields are returned exactly as written: quotes stay in the text and doubled
//! quotes are not collapsed, so joining the fields with the delimiter gives the
//! line back.

/// Split one line into fields.
///
/// A `"` toggles quoted mode and is kept. Inside quotes `""` is kept as-is and
/// does not toggle, and the delimiter is an ordinary character. An empty line
/// has no fields. An unterminated quote runs to the end of the line.
pub fn split_fields(line: &str, delimiter: char, trim: bool) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                chars.next();
                field.push_str("\"\"");
                continue;
            }
            in_quotes = !in_quotes;
            field.push(c);
        } else if c == delimiter && !in_quotes {
            fields.push(finish_field(std::mem::take(&mut field), trim));
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        tracing::warn!("Unterminated quote in line: {}", line);
    }
    fields.push(finish_field(field, trim));
    fields
}

fn finish_field(field: String, trim: bool) -> String {
    if trim {
        field.trim().to_string()
    } else {
        field
    }
}
