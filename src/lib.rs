//! Strips commas from one column of an `.xlsx` workbook.
//!
//! [`run`] asks for a file and a column, cleans the text cells of that
//! column in the first sheet and saves the workbook next to the original as
//! `<name>_limpio.xlsx`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

pub mod clean;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod sheet;
pub mod workbook;

pub use clean::{clean_column, output_path};
pub use error::CleanError;
pub use sheet::{CellValue, Sheet};
pub use workbook::Workbook;

/// Runs one interactive cleaning pass and returns the path written.
pub fn run<R: BufRead, W: Write>(reader: R, writer: W) -> Result<PathBuf> {
    let input = prompt::collect(reader, writer).context("No se pudo leer la entrada")?;
    process_excel(&input.path, input.column)
}

/// Cleans `column` of the first sheet in `path` and saves the result.
pub fn process_excel(path: &str, column: i64) -> Result<PathBuf> {
    let workbook =
        Workbook::load(path).with_context(|| format!("No se pudo abrir el archivo: {path}"))?;
    let mut workbook = workbook
        .map_active(|sheet| clean_column(sheet, column))
        .with_context(|| format!("No se pudo limpiar la columna {column}"))?;
    info!(
        "column {column}: {} cells cleaned",
        workbook.active().edits().count()
    );

    let output = PathBuf::from(output_path(path));
    if output.as_path() == workbook.source() {
        warn!("{} has no .xlsx in its name; overwriting it", output.display());
    }
    workbook
        .save(&output)
        .with_context(|| format!("No se pudo guardar el archivo: {}", output.display()))?;
    Ok(output)
}
