use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Counts commas and semicolons outside quotes on the header record.
/// Semicolon wins only on a strict majority.
pub fn detect_delimiter(text: &str) -> Delimiter {
    let mut in_quotes = false;
    let mut commas = 0usize;
    let mut semicolons = 0usize;
    for c in text.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            '\n' | '\r' if !in_quotes => break,
            _ => {}
        }
    }
    if semicolons > commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

pub fn parse_records(text: &str, delimiter: Delimiter) -> Result<Vec<CsvRecord>, InputError> {
    let delim = delimiter.as_char();
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut field_quoted = false;
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut quote_line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_quoted => {
                in_quotes = true;
                field_quoted = true;
                quote_line = line;
            }
            c if c == delim => {
                fields.push(std::mem::take(&mut field));
                field_quoted = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                field_quoted = false;
                push_record(&mut records, &mut fields, record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(InputError::Parse(format!(
            "unterminated quoted field starting on line {quote_line}"
        )));
    }
    if !field.is_empty() || field_quoted || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, &mut fields, record_line);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<CsvRecord>, fields: &mut Vec<String>, line: usize) {
    let fields = std::mem::take(fields);
    if fields.iter().all(String::is_empty) {
        return;
    }
    records.push(CsvRecord { line, fields });
}

/// Renders one output record, quoting fields that need it.
pub fn format_record<S: AsRef<str>>(fields: &[S], delimiter: Delimiter) -> String {
    let delim = delimiter.as_char();
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delim);
        }
        let field = field.as_ref();
        let needs_quotes = field
            .chars()
            .any(|c| c == delim || c == '"' || c == '\n' || c == '\r');
        if needs_quotes {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/csv.rs"]
mod tests;
