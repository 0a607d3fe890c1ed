use log::debug;

use crate::error::CleanError;
use crate::sheet::{CellValue, Sheet, cell_ref};

pub const OUTPUT_SUFFIX: &str = "_limpio.xlsx";

/// Removes every comma from the text cells of one column.
///
/// Formula cells count as text: their source loses its commas too, the same
/// way a formula string read without cached values would.
///
/// The column is validated against `sheet.max_column()` before anything is
/// touched, so an error always leaves the sheet as it was.
pub fn clean_column(mut sheet: Sheet, column: i64) -> Result<Sheet, CleanError> {
    let target = u32::try_from(column)
        .ok()
        .filter(|&c| c >= 1 && c <= sheet.max_column())
        .ok_or(CleanError::InvalidColumn { column })?;

    for row in 1..=sheet.max_row() {
        let cleaned = match sheet.get(row, target) {
            Some(CellValue::Text(text)) if text.contains(',') => {
                CellValue::Text(text.replace(',', ""))
            }
            Some(CellValue::Formula(formula)) if formula.contains(',') => {
                CellValue::Formula(formula.replace(',', ""))
            }
            _ => continue,
        };
        debug!("{}: -> {:?}", cell_ref(row, target), cleaned);
        sheet.replace(row, target, cleaned);
    }

    Ok(sheet)
}

/// Derives the output file name: every `.xlsx` becomes `_limpio.xlsx`.
///
/// A path without `.xlsx` comes back unchanged.
pub fn output_path(input: &str) -> String {
    input.replace(".xlsx", OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_b_sheet() -> Sheet {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set(1, 1, CellValue::Text("a,1".into()));
        sheet.set(1, 2, CellValue::Text("1,000".into()));
        sheet.set(2, 2, CellValue::Text("2,500".into()));
        sheet.set(3, 2, CellValue::Text("no-comma".into()));
        sheet.set(4, 2, CellValue::Number(42.0));
        sheet.set(5, 1, CellValue::Text("x,y".into()));
        sheet.set(2, 3, CellValue::Text(",,c,".into()));
        sheet
    }

    fn column(sheet: &Sheet, column: u32) -> Vec<Option<CellValue>> {
        (1..=sheet.max_row())
            .map(|row| sheet.get(row, column).cloned())
            .collect()
    }

    #[test]
    fn strips_commas_from_text_in_target_column() {
        let sheet = clean_column(column_b_sheet(), 2).unwrap();

        assert_eq!(
            column(&sheet, 2),
            vec![
                Some(CellValue::Text("1000".into())),
                Some(CellValue::Text("2500".into())),
                Some(CellValue::Text("no-comma".into())),
                Some(CellValue::Number(42.0)),
                None,
            ]
        );
    }

    #[test]
    fn other_columns_are_untouched() {
        let original = column_b_sheet();
        let sheet = clean_column(original.clone(), 2).unwrap();

        for col in [1, 3] {
            assert_eq!(column(&sheet, col), column(&original, col));
        }
        let edits: Vec<_> = sheet.edits().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(edits, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn every_comma_is_removed_anywhere_in_the_string() {
        let sheet = clean_column(column_b_sheet(), 3).unwrap();
        let original = ",,c,";
        let cleaned = sheet.get(2, 3).and_then(CellValue::as_text).unwrap();

        assert_eq!(cleaned, "c");
        assert_eq!(
            cleaned.len(),
            original.len() - original.matches(',').count()
        );
    }

    #[test]
    fn non_text_values_survive() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set(1, 1, CellValue::Formula("SUM(B1:C1)".into()));
        sheet.set(2, 1, CellValue::Bool(false));
        sheet.set(3, 1, CellValue::Error("#N/A".into()));
        sheet.set(4, 1, CellValue::Duration("PT1H".into()));
        let before = sheet.clone();

        let after = clean_column(sheet, 1).unwrap();
        assert_eq!(after, before);
        assert!(!after.is_edited());
    }

    #[test]
    fn formula_source_loses_its_commas() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set(1, 1, CellValue::Number(1.0));
        sheet.set(1, 2, CellValue::Formula("SUM(A1,A2)".into()));
        sheet.set(2, 2, CellValue::Formula("A1*2".into()));

        let sheet = clean_column(sheet, 2).unwrap();
        assert_eq!(
            sheet.get(1, 2),
            Some(&CellValue::Formula("SUM(A1A2)".into()))
        );
        let edits: Vec<_> = sheet.edits().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(edits, vec![(1, 2)]);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let once = clean_column(column_b_sheet(), 2).unwrap();
        let twice = clean_column(once.clone(), 2).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn out_of_range_column_leaves_sheet_alone() {
        let original = column_b_sheet();
        assert_eq!(original.max_column(), 3);

        for bad in [0, -1, 4, i64::MAX] {
            let err = clean_column(original.clone(), bad).unwrap_err();
            match err {
                CleanError::InvalidColumn { column } => assert_eq!(column, bad),
                other => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(
            CleanError::InvalidColumn { column: 4 }.to_string(),
            "Column number 4 is not valid"
        );
    }

    #[test]
    fn first_column_of_empty_sheet_is_valid() {
        let sheet = clean_column(Sheet::new("Sheet1"), 1).unwrap();
        assert!(!sheet.is_edited());
        assert!(clean_column(sheet, 2).is_err());
    }

    #[test]
    fn output_path_rewrites_xlsx_extension() {
        assert_eq!(output_path("data.xlsx"), "data_limpio.xlsx");
        assert_eq!(output_path("dir/ventas 2024.xlsx"), "dir/ventas 2024_limpio.xlsx");
        assert_eq!(output_path("a.xlsx.xlsx"), "a_limpio.xlsx_limpio.xlsx");
    }

    #[test]
    fn output_path_without_xlsx_is_the_input() {
        assert_eq!(output_path("data.xls"), "data.xls");
        assert_eq!(output_path("DATA.XLSX"), "DATA.XLSX");
    }
}
