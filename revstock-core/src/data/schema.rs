//! Required columns of the price file and header resolution.

use std::fmt;

/// A column the loader needs from the price file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Symbol,
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    Change,
}

impl Column {
    /// Every required column, in canonical order.
    pub const ALL: [Column; 8] = [
        Column::Symbol,
        Column::Date,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
        Column::Change,
    ];

    /// Canonical header name as written in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::Date => "Date",
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::Volume => "volume",
            Column::Change => "change",
        }
    }

    fn matches(self, header: &str) -> bool {
        header.trim().eq_ignore_ascii_case(self.name())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(Column),
}

/// Positions of the required columns within a header row.
///
/// Header names are trimmed and compared case-insensitively. When a name
/// appears twice the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    positions: [usize; 8],
}

impl HeaderMap {
    /// Resolve every required column against a header row.
    pub fn resolve<'a, I>(headers: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut positions = [0usize; 8];
        for (slot, column) in Column::ALL.iter().enumerate() {
            positions[slot] = headers
                .iter()
                .position(|h| column.matches(h))
                .ok_or(SchemaError::MissingColumn(*column))?;
        }
        Ok(Self { positions })
    }

    /// Index of `column` in the source row.
    pub fn index(&self, column: Column) -> usize {
        let slot = Column::ALL
            .iter()
            .position(|c| *c == column)
            .unwrap_or_default();
        self.positions[slot]
    }
}
