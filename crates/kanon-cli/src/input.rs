//! Delimited text reader.
//!
//! Quoting follows RFC 4180: a field that starts with `"` runs to the next
//! unpaired quote, `""` inside it is a literal quote, and delimiters and
//! line breaks inside quotes belong to the field. Both `\n` and `\r\n` end
//! a record. Blank lines are skipped.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kanon::Dataset;
use tracing::debug;

pub struct ReadOptions {
    pub delimiter: char,
    pub has_header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
        }
    }
}

/// One parsed record and the line it started on.
#[derive(Debug, PartialEq, Eq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Reads `path` into a [`Dataset`].
pub fn read_dataset(path: &Path, options: &ReadOptions) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dataset =
        parse_dataset(&text, options).with_context(|| format!("Invalid input {}", path.display()))?;

    debug!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.column_count(),
        "Loaded dataset"
    );
    Ok(dataset)
}

fn parse_dataset(text: &str, options: &ReadOptions) -> Result<Dataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = parse_records(text, options.delimiter)?.into_iter().peekable();

    let columns: Vec<String> = if options.has_header {
        match records.next() {
            Some(header) => header.fields,
            None => bail!("file is empty; expected a header row"),
        }
    } else {
        let width = records.peek().map_or(0, |r| r.fields.len());
        (1..=width).map(|i| format!("column_{i}")).collect()
    };

    let mut rows = Vec::new();
    for record in records {
        if record.fields.len() != columns.len() {
            bail!(
                "line {}: expected {} fields, found {}",
                record.line,
                columns.len(),
                record.fields.len()
            );
        }
        rows.push(record.fields);
    }

    Ok(Dataset::new(columns, rows)?)
}

fn parse_records(text: &str, delimiter: char) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if !fields.is_empty() || !field.is_empty() || quoted {
                    fields.push(std::mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                quoted = false;
                line += 1;
                record_line = line;
            }
            c if c == delimiter => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        bail!("line {record_line}: unterminated quoted field");
    }
    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(text: &str) -> Vec<Vec<String>> {
        parse_records(text, ',')
            .unwrap()
            .into_iter()
            .map(|r| r.fields)
            .collect()
    }

    #[test]
    fn plain_records() {
        assert_eq!(
            fields("age,zip\n20-29,902**\n"),
            vec![vec!["age", "zip"], vec!["20-29", "902**"]]
        );
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        assert_eq!(fields("a,b\r\n1,2"), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn quoted_fields() {
        assert_eq!(
            fields("\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\n"),
            vec![vec!["a,b", "say \"hi\"", "two\nlines"]]
        );
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(fields(",\n\"\"\n"), vec![vec!["", ""], vec![""]]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = parse_records("a\n\nb\n", ',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn record_line_accounts_for_embedded_newlines() {
        let records = parse_records("\"x\ny\"\nz\n", ',').unwrap();
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_records("a\n\"open,b\n", ',').unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn custom_delimiter() {
        let records = parse_records("a;b,c\n", ';').unwrap();
        assert_eq!(records[0].fields, vec!["a", "b,c"]);
    }

    #[test]
    fn ragged_row_reports_line() {
        let err = parse_dataset("age,zip\n1,2\n3\n", &ReadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn headerless_input_gets_generated_names() {
        let options = ReadOptions {
            has_header: false,
            ..ReadOptions::default()
        };
        let dataset = parse_dataset("1,*\n2,*\n", &options).unwrap();
        assert_eq!(dataset.columns(), ["column_1", "column_2"]);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn header_only_file_has_no_records() {
        let dataset = parse_dataset("\u{feff}age,zip\n", &ReadOptions::default()).unwrap();
        assert_eq!(dataset.columns(), ["age", "zip"]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn empty_file_needs_a_header() {
        assert!(parse_dataset("", &ReadOptions::default()).is_err());
    }

    #[test]
    fn duplicate_header_is_rejected() {
        assert!(parse_dataset("a,a\n1,2\n", &ReadOptions::default()).is_err());
    }
}
