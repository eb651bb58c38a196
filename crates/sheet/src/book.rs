use crate::csv::CsvOptions;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;
use std::path::Path;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
    date_1904: bool,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
            date_1904: false,
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the workbook stores serial dates with the 1904 epoch
    #[must_use]
    pub fn is_date_1904(&self) -> bool {
        self.date_1904
    }

    /// Mark the workbook as using the 1904 epoch
    pub fn set_date_1904(&mut self, date_1904: bool) {
        self.date_1904 = date_1904;
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Find the first sheet, in book order, whose lowercased name equals the
    /// lowercased `name`.
    #[must_use]
    pub fn find_sheet_ignore_case(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.to_lowercase();
        self.sheets
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, sheet)| sheet)
    }

    /// Add a sheet to the book
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Load a book, choosing the decoder from the file extension
    ///
    /// Workbook formats (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) keep every sheet;
    /// delimited text (`csv`, `tsv`) becomes a single sheet named after the file stem.
    pub fn from_path<P: AsRef<Path>>(path: P, options: &FileLoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::from_workbook(path),
            "csv" => Self::from_csv_with_options(path, options.csv.clone()),
            "tsv" => Self::from_csv_with_options(path, options.tsv.clone()),
            _ => Err(SheetError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// Options for loading files
#[derive(Debug, Clone)]
pub struct FileLoadOptions {
    /// Options applied to `csv` inputs
    pub csv: CsvOptions,
    /// Options applied to `tsv` inputs
    pub tsv: CsvOptions,
}

impl Default for FileLoadOptions {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            tsv: CsvOptions::tsv(),
        }
    }
}

impl FileLoadOptions {
    /// Set the CSV options
    #[must_use]
    pub fn with_csv_options(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }

    /// Set the TSV options
    #[must_use]
    pub fn with_tsv_options(mut self, tsv: CsvOptions) -> Self {
        self.tsv = tsv;
        self
    }
}
