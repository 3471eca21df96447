//! Delimited Text Parsing
//!
//! Minimal quote-aware parser for the practice extract. The published files
//! follow the usual spreadsheet-export conventions, so the rules are:
//! a cell may be wrapped in double quotes; a doubled quote (`""`) inside a
//! quoted cell escapes to a literal quote; a quoted cell may embed the
//! delimiter and line breaks; `\r` is ignored everywhere; `\n` outside quotes
//! terminates the row.

/// Parses delimited text into rows of trimmed-as-written cells.
///
/// Blank lines are dropped. A final row without a trailing newline is still
/// emitted.
pub fn parse_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    // "" escapes to a literal quote, otherwise the quote closes.
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        cell.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\r' => {}
                _ => cell.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut cell));
                    push_row(&mut rows, std::mem::take(&mut row));
                }
                c if c == delimiter => row.push(std::mem::take(&mut cell)),
                _ => cell.push(c),
            }
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        push_row(&mut rows, row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    // A blank line parses to a single empty cell.
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(row);
}
