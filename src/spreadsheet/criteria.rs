use crate::spreadsheet::SpreadsheetError;
use glob::Pattern;

/// Criteria for selecting the sheet to load.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name or glob pattern; the first sheet when absent.
    pub sheet: Option<String>,
}

impl Criteria {
    /// Criteria selecting the given sheet name or pattern.
    pub fn for_sheet(sheet: &str) -> Self {
        Self {
            sheet: Some(sheet.to_owned()),
        }
    }

    /// Picks one sheet out of `names`.
    ///
    /// An exact name match wins; otherwise the requested name is used as a
    /// glob pattern and the first matching sheet is returned.
    pub fn select<'a>(&self, names: &'a [String]) -> Result<&'a str, SpreadsheetError> {
        let first = names.first().ok_or(SpreadsheetError::EmptyWorkbook)?;
        let Some(wanted) = &self.sheet else {
            return Ok(first.as_str());
        };
        if let Some(name) = names.iter().find(|name| *name == wanted) {
            return Ok(name.as_str());
        }
        let pattern = Pattern::new(wanted)?;
        names
            .iter()
            .find(|name| pattern.matches(name))
            .map(String::as_str)
            .ok_or_else(|| SpreadsheetError::SheetNotFound(wanted.to_owned()))
    }
}
