use anyhow::Result;

fn main() -> Result<()> {
    let mut book = umya_spreadsheet::new_file();

    let sheet = book.get_active_sheet_mut();

    sheet.get_cell_mut("A1").set_value_string("producto");
    sheet.get_cell_mut("B1").set_value_string("importe");

    // Column B holds thousands separators that xlclean should strip.
    sheet.get_cell_mut("A2").set_value_string("sillas, mesas");
    sheet.get_cell_mut("B2").set_value_string("1,000");
    sheet.get_cell_mut("A3").set_value_string("lamparas");
    sheet.get_cell_mut("B3").set_value_string("2,500");
    sheet.get_cell_mut("A4").set_value_string("alfombras");
    sheet.get_cell_mut("B4").set_value_number(42);

    umya_spreadsheet::writer::xlsx::write(&book, "sample.xlsx")?;
    println!("Wrote sample.xlsx (run xlclean on it and pick column 2)");
    Ok(())
}
