use crate::utils::constants::NA_TOKENS;
use serde::{Deserialize, Serialize};

/// Cell storage for a single column. Nulls are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Build a column from raw CSV cells. Empty cells and the usual null
    /// markers (`NA`, `nan`, `null`, ...) are missing. The column is numeric
    /// when every other cell parses as a float, text otherwise.
    pub fn infer(name: impl Into<String>, cells: Vec<String>) -> Self {
        let is_numeric = cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !is_null_token(c))
            .all(|c| c.parse::<f64>().is_ok());

        if is_numeric {
            let values = cells.iter().map(|c| parse_number(c)).collect();
            Self::numeric(name, values)
        } else {
            let values = cells
                .into_iter()
                .map(|c| if is_null_token(c.trim()) { None } else { Some(c) })
                .collect();
            Self::text(name, values)
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }

    pub fn null_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// New column holding the rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Self {
        let data = match &self.data {
            ColumnData::Numeric(v) => ColumnData::Numeric(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
        };
        Self {
            name: self.name.clone(),
            data,
        }
    }

    /// Replace nulls with `value`, converting a numeric column to text.
    /// Returns the number of cells filled.
    pub fn fill_text(&mut self, value: &str) -> usize {
        let filled = self.null_count();
        let cells: Vec<Option<String>> = match std::mem::replace(
            &mut self.data,
            ColumnData::Text(Vec::new()),
        ) {
            ColumnData::Text(v) => v
                .into_iter()
                .map(|c| Some(c.unwrap_or_else(|| value.to_string())))
                .collect(),
            ColumnData::Numeric(v) => v
                .into_iter()
                .map(|c| Some(c.map_or_else(|| value.to_string(), |n| n.to_string())))
                .collect(),
        };
        self.data = ColumnData::Text(cells);
        filled
    }
}

fn is_null_token(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// Float value of a cell; null markers and NaN spellings are missing.
fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if is_null_token(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| !v.is_nan())
}
