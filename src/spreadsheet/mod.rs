//! # Spreadsheet Loading Module
//!
//! Reads Excel (.xlsx, .xlsm, .xlam, .xlsb, .xls, .xla) and OpenDocument
//! (.ods) workbooks through calamine and turns one worksheet into a
//! [`Table`]: the first row provides column names, the remaining rows the
//! records, and every column gets an inferred semantic type.
mod cell;
mod criteria;
mod sheet;

pub use cell::{header_text, to_value};
pub use criteria::Criteria;
pub use sheet::table_from_range;

use crate::database::{Table, TableError};
use crate::helpers::reader::SourceReader;
use calamine::{open_workbook_from_rs, Ods, OdsError, Reader, Xls, XlsError, Xlsb, XlsbError, Xlsx, XlsxError};
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Custom error types for spreadsheet operations.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Error in Excel 2007+ format (.xlsx, .xlsm, .xlam)
    #[error("Invalid xlsx file format: {0}")]
    InvalidXlsxFileFormat(#[from] XlsxError),

    /// Error in Excel Binary format (.xlsb)
    #[error("Invalid xlsb file format: {0}")]
    InvalidXlsbFileFormat(#[from] XlsbError),

    /// Error in legacy Excel format (.xls, .xla)
    #[error("Invalid xls file format: {0}")]
    InvalidXlsFileFormat(#[from] XlsError),

    /// Error in OpenDocument format (.ods)
    #[error("Invalid ods file format: {0}")]
    InvalidOdsFileFormat(#[from] OdsError),

    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    /// The file could not be read
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook contains no sheet at all
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// No sheet matches the requested name or pattern
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// The requested sheet name is neither a sheet nor a valid glob pattern
    #[error("Invalid sheet name pattern: {0}")]
    InvalidSheetPattern(#[from] glob::PatternError),

    /// Sheet content could not be assembled into a table
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Workbook formats recognized by file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Excel 2007+ (.xlsx, .xlsm, .xlam)
    Xlsx,
    /// Excel Binary (.xlsb)
    Xlsb,
    /// Legacy Excel (.xls, .xla)
    Xls,
    /// OpenDocument (.ods)
    Ods,
}

impl Format {
    /// Detects the format from the extension of a file name, ignoring case.
    pub fn detect(file_name: &str) -> Result<Self, SpreadsheetError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xlam") => Ok(Self::Xlsx),
            Some("xlsb") => Ok(Self::Xlsb),
            Some("xls") | Some("xla") => Ok(Self::Xls),
            Some("ods") => Ok(Self::Ods),
            _ => Err(SpreadsheetError::InvalidFileFormat {
                name: file_name.to_owned(),
            }),
        }
    }
}

/// Wrapper enum for different spreadsheet format readers.
pub enum Spreadsheet {
    /// Excel 2007+ format reader (.xlsx, .xlsm, .xlam)
    Xlsx(Xlsx<SourceReader>),
    /// Excel Binary format reader (.xlsb)
    Xlsb(Xlsb<SourceReader>),
    /// Legacy Excel format reader (.xls, .xla)
    Xls(Xls<SourceReader>),
    /// OpenDocument format reader (.ods)
    Ods(Ods<SourceReader>),
}

impl Spreadsheet {
    /// Opens a workbook file, choosing the reader from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not supported, the file cannot be
    /// read, or its content is not a valid workbook of that format.
    pub fn open<P>(path: P) -> Result<Spreadsheet, SpreadsheetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = Format::detect(&path.to_string_lossy())?;
        let reader = SourceReader::open(path)?;
        debug!(path = %path.display(), ?format, "Opening workbook");
        Self::from_reader(format, reader)
    }

    /// Opens a workbook held in memory, e.g. an uploaded file. `file_name`
    /// only serves to pick the format.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Spreadsheet, SpreadsheetError> {
        let format = Format::detect(file_name)?;
        debug!(file_name, ?format, size = bytes.len(), "Opening workbook from memory");
        Self::from_reader(format, SourceReader::from_bytes(bytes))
    }

    fn from_reader(format: Format, reader: SourceReader) -> Result<Spreadsheet, SpreadsheetError> {
        match format {
            Format::Xlsx => Ok(Self::Xlsx(open_workbook_from_rs(reader)?)),
            Format::Xlsb => Ok(Self::Xlsb(open_workbook_from_rs(reader)?)),
            Format::Xls => Ok(Self::Xls(open_workbook_from_rs(reader)?)),
            Format::Ods => Ok(Self::Ods(open_workbook_from_rs(reader)?)),
        }
    }

    /// Returns the names of all sheets in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Xlsx(xlsx) => xlsx.sheet_names(),
            Self::Xlsb(xlsb) => xlsb.sheet_names(),
            Self::Xls(xls) => xls.sheet_names(),
            Self::Ods(ods) => ods.sheet_names(),
        }
    }

    /// Reads the named sheet into a table.
    pub fn load_table(&mut self, sheet_name: &str) -> Result<Table, SpreadsheetError> {
        let range = match self {
            Self::Xlsx(xlsx) => xlsx.worksheet_range(sheet_name)?,
            Self::Xlsb(xlsb) => xlsb.worksheet_range(sheet_name)?,
            Self::Xls(xls) => xls.worksheet_range(sheet_name)?,
            Self::Ods(ods) => ods.worksheet_range(sheet_name)?,
        };
        let table = table_from_range(&range)?;
        info!(
            sheet = sheet_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded sheet"
        );
        Ok(table)
    }

    /// Selects a sheet with `criteria` and reads it, returning the chosen
    /// sheet name along with the table.
    pub fn load(&mut self, criteria: &Criteria) -> Result<(String, Table), SpreadsheetError> {
        let names = self.sheet_names();
        let sheet_name = criteria.select(&names)?.to_owned();
        let table = self.load_table(&sheet_name)?;
        Ok((sheet_name, table))
    }
}
