use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CleanError;

pub const PATH_PROMPT: &str = "Ingrese la ruta del archivo Excel: ";
pub const COLUMN_PROMPT: &str = "Ingrese el número de columna a limpiar: ";

// Same shape `int()` accepts: optional sign, digits with single underscores
// between them, surrounding whitespace ignored.
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(?:_[0-9]+)*$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub path: String,
    /// 1-based; not range-checked yet.
    pub column: i64,
}

/// Asks for the workbook path and the column to clean.
pub fn collect<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<UserInput, CleanError> {
    let path = ask(&mut reader, &mut writer, PATH_PROMPT)?;
    let column = ask(&mut reader, &mut writer, COLUMN_PROMPT)?;
    let column = parse_column(&column)?;
    Ok(UserInput { path, column })
}

fn ask<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<String, CleanError> {
    writer
        .write_all(prompt.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(CleanError::Terminal)?;

    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(CleanError::Terminal)?;
    if read == 0 {
        return Err(CleanError::InputClosed);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

pub fn parse_column(raw: &str) -> Result<i64, CleanError> {
    let invalid = || CleanError::InvalidColumnNumber {
        input: raw.to_string(),
    };

    let trimmed = raw.trim();
    if !INTEGER.is_match(trimmed) {
        return Err(invalid());
    }
    // Too large for i64 is still a number; saturate so the range check rejects it.
    trimmed
        .replace('_', "")
        .parse::<i64>()
        .or_else(|err| match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(invalid()),
        })
}
