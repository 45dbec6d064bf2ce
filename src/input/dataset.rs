use std::collections::HashSet;

use crate::input::InputError;

/// One survey answer cell. `None` is the missing sentinel.
pub type Cell = Option<String>;

/// Immutable rows x named columns table, loaded once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, InputError> {
        if columns.is_empty() {
            return Err(InputError::InvalidInput(
                "dataset has no columns".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(InputError::InvalidInput(format!(
                    "duplicate column name: {name}"
                )));
            }
        }

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row.into_iter()
                    .map(|cell| cell.filter(|v| !v.is_empty()))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Row-major walk over the given columns: every row, then each column in
    /// the order given. Missing cells are skipped.
    pub fn values_row_major<'a>(
        &'a self,
        cols: &'a [usize],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().flat_map(move |row| {
            cols.iter()
                .filter_map(move |&col| row.get(col).and_then(|c| c.as_deref()))
        })
    }
}

#[cfg(test)]
impl Dataset {
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }
}
