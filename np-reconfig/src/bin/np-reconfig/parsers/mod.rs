//! Parsers for the CSV files of the NP schedulability test suite.
//!
//! Both files hold one record per line with comma-separated integer fields. A first line which
//! does not start with a number is taken to be the header and skipped, as are empty lines.
mod job_set;
mod precedence;

use std::io::BufRead;

use np_reconfig_core::problem::Interval;
pub(crate) use job_set::parse_job_set;
pub(crate) use precedence::parse_precedence_constraints;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JobSetParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected {expected} fields, found {found}")]
    WrongNumberOfFields {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("line {line}: '{field}' is not an integer")]
    InvalidNumber { line: usize, field: String },

    #[error("line {line}: the interval [{min}, {max}] is empty")]
    EmptyInterval { line: usize, min: i64, max: i64 },
}

/// Calls `on_record` with the one-based line number and the integer fields of every record.
fn for_each_record(
    reader: impl BufRead,
    mut on_record: impl FnMut(usize, &[i64]) -> Result<(), JobSetParseError>,
) -> Result<(), JobSetParseError> {
    let mut fields = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if line_number == 1 && is_header(trimmed) {
            continue;
        }

        fields.clear();
        for field in trimmed.split(',') {
            let field = field.trim();
            let value = field
                .parse::<i64>()
                .map_err(|_| JobSetParseError::InvalidNumber {
                    line: line_number,
                    field: field.to_owned(),
                })?;
            fields.push(value);
        }

        on_record(line_number, &fields)?;
    }

    Ok(())
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|first| first.trim().parse::<i64>().is_err())
}

fn interval(line: usize, min: i64, max: i64) -> Result<Interval, JobSetParseError> {
    if min > max {
        return Err(JobSetParseError::EmptyInterval { line, min, max });
    }

    Ok(Interval::new(min, max))
}

fn id_part(line: usize, value: i64) -> Result<u64, JobSetParseError> {
    u64::try_from(value).map_err(|_| JobSetParseError::InvalidNumber {
        line,
        field: value.to_string(),
    })
}
