//! Loading and saving `.xlsx` workbooks.
//!
//! Cell values are read with calamine into a [`Sheet`]; the same file is
//! also read with umya-spreadsheet so that saving keeps every other sheet,
//! style and formula. Only cells the [`Sheet`] marks as edited are written
//! back.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use calamine::{CellType, Data, Range, Reader, Xlsx, open_workbook};
use log::{debug, info};
use umya_spreadsheet::Spreadsheet;

use crate::error::CleanError;
use crate::sheet::{CellValue, Sheet, cell_ref};

pub struct Workbook {
    source: PathBuf,
    book: Spreadsheet,
    active: Sheet,
}

impl Workbook {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CleanError> {
        let path = path.as_ref();
        if let Err(err) = fs::metadata(path) {
            if err.kind() == io::ErrorKind::NotFound {
                return Err(CleanError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
        }

        let mut active = read_first_sheet(path)?;
        let book =
            umya_spreadsheet::reader::xlsx::read(path).map_err(|err| invalid(path, err))?;
        let worksheet = book
            .get_sheet_by_name(active.name())
            .ok_or_else(|| invalid(path, format!("worksheet {} is unreadable", active.name())))?;
        // Styled but empty cells still count towards the bounds.
        let (highest_column, highest_row) = worksheet.get_highest_column_and_row();
        active.extend_to(highest_row, highest_column);

        info!(
            "loaded {}: sheet {:?}, {} rows x {} columns",
            path.display(),
            active.name(),
            active.max_row(),
            active.max_column()
        );
        Ok(Workbook {
            source: path.to_path_buf(),
            book,
            active,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn active(&self) -> &Sheet {
        &self.active
    }

    /// Hands the active sheet to `f` by value and keeps whatever it returns.
    pub fn map_active<F, E>(mut self, f: F) -> Result<Self, E>
    where
        F: FnOnce(Sheet) -> Result<Sheet, E>,
    {
        self.active = f(self.active)?;
        Ok(self)
    }

    /// Writes the whole workbook, with the active sheet's edits applied, to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), CleanError> {
        let path = path.as_ref();
        let save_error = |reason: String| CleanError::Save {
            path: path.to_path_buf(),
            reason,
        };

        let sheet = self
            .book
            .get_sheet_by_name_mut(self.active.name())
            .ok_or_else(|| save_error(format!("worksheet {} not found", self.active.name())))?;

        let mut written = 0usize;
        for (row, column, value) in self.active.edits() {
            let cell = sheet.get_cell_mut(cell_ref(row, column).as_str());
            match value {
                // Always a string cell, even when the cleaned text looks numeric.
                CellValue::Text(text) => {
                    cell.set_value_string(text.as_str());
                }
                CellValue::Formula(formula) => {
                    cell.set_formula(formula.as_str());
                }
                other => {
                    return Err(save_error(format!(
                        "cannot write {other:?} to {}",
                        cell_ref(row, column)
                    )));
                }
            }
            written += 1;
        }
        debug!("{written} cells rewritten in {:?}", self.active.name());

        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .map_err(|err| save_error(err.to_string()))?;
        info!("saved {}", path.display());
        Ok(())
    }
}

fn invalid(path: &Path, reason: impl Display) -> CleanError {
    CleanError::InvalidFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_first_sheet(path: &Path) -> Result<Sheet, CleanError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|err| invalid(path, err))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CleanError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

    let values = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| invalid(path, err))?;
    let formulas = workbook
        .worksheet_formula(&sheet_name)
        .map_err(|err| invalid(path, err))?;

    let mut sheet = Sheet::new(sheet_name);
    place(&mut sheet, &values, |d: &Data| CellValue::from(d));
    // A formula replaces its cached value.
    place(&mut sheet, &formulas, |f: &String| CellValue::Formula(f.clone()));
    Ok(sheet)
}

/// Copies the used cells of `range` into `sheet` at their absolute positions.
fn place<T, F>(sheet: &mut Sheet, range: &Range<T>, to_value: F)
where
    T: CellType,
    F: Fn(&T) -> CellValue,
{
    let (Some((first_row, first_col)), Some((last_row, last_col))) = (range.start(), range.end())
    else {
        return;
    };

    for (row, col, cell) in range.used_cells() {
        sheet.set(
            first_row + row as u32 + 1,
            first_col + col as u32 + 1,
            to_value(cell),
        );
    }
    sheet.extend_to(last_row + 1, last_col + 1);
}
