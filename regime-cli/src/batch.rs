use std::collections::BTreeMap;
use std::io::Read;

use regime_core::models::{FormValue, TaxForm};
use thiserror::Error;

/// Errors that can occur when reading a batch CSV.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::CsvParse(err.to_string())
    }
}

/// Reads taxpayer forms from a header-keyed CSV file.
///
/// The fixed columns `annual_salary`, `age_category`, `is_salaried` and
/// `professional_tax` map to the corresponding form fields; every other
/// column is treated as a deduction section keyed by its header, e.g.
/// `section_80c`. Blank cells are skipped, so a row behaves exactly like a
/// form that never submitted the field.
pub struct FormReader;

impl FormReader {
    /// Parse one form per CSV row.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice. Rows are not validated here; validation happens when
    /// each form is calculated, so one bad row cannot sink the batch.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxForm>, BatchError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut forms = Vec::new();

        for result in csv_reader.deserialize() {
            let row: BTreeMap<String, String> = result?;
            forms.push(form_from_row(row));
        }

        Ok(forms)
    }
}

fn form_from_row(row: BTreeMap<String, String>) -> TaxForm {
    let mut form = TaxForm::default();
    for (column, cell) in row {
        if cell.trim().is_empty() {
            continue;
        }
        let value = FormValue::from(cell);
        match column.as_str() {
            "annual_salary" => form.annual_salary = Some(value),
            "age_category" => form.age_category = Some(value),
            "is_salaried" => form.is_salaried = Some(value),
            "professional_tax" => form.professional_tax = Some(value),
            _ => {
                form.deductions.insert(column, value);
            }
        }
    }
    form
}
