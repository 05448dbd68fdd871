use thiserror::Error;

use crate::automaton::AutomatonError;

/// Parsing of transition tables.
pub mod input;
pub use input::{read, read_from_path, read_mealy, read_moore};

/// Serialization of transition tables.
pub mod output;
pub use output::WriteTable;

/// Describes the layout of a table. Cells are separated by `delimiter`, which is `;` by
/// default.
///
/// A Mealy table starts with a header row holding an empty cell followed by the state names.
/// Each further row holds an input symbol followed by one cell `next/output` per state.
/// A Moore table starts with a row of outputs and a row of state names, both led by an empty
/// cell, followed by one row per input symbol holding the next state for each state. In both
/// kinds of table an empty cell means that no transition is defined.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TableFormat {
    /// The byte separating two cells of a row.
    pub delimiter: u8,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl TableFormat {
    /// Creates a format with the given delimiter.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

/// Separates the next state from the output in a cell of a Mealy table.
pub const MEALY_CELL_SEPARATOR: char = '/';

/// Abstracts the ways in which the textual content of a table can be malformed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum FormatError {
    #[error("table is empty, expected a header row")]
    MissingHeader,
    #[error("moore table is missing the row of state names")]
    MissingStateRow,
    #[error("moore table declares {outputs} outputs for {states} states")]
    OutputCount { outputs: usize, states: usize },
    #[error("row {row} has {found} cells but {expected} were expected")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell `{cell}` in row {row} lacks the `/` between next state and output")]
    MissingSeparator { row: usize, cell: String },
}

/// Errors that can occur when reading or writing a table.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TableError {
    #[error("malformed table: {0}")]
    Format(#[from] FormatError),
    #[error("table does not describe a valid machine: {0}")]
    Automaton(#[from] AutomatonError),
    #[error("could not process delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::{read_mealy, read_moore, TableFormat, WriteTable};
    use crate::prelude::*;

    const MEALY: &str = "\
;S0;S1;S2
x1;S1/y1;S0/y2;S0/y1
x2;S0/y1;S2/y2;S1/y1
";

    const MOORE: &str = "\
;y1;y2;y1;y2
;S0;S1;S2;S3
x1;S1;S0;S3;S2
x2;S2;S3;S0;S1
";

    #[test_log::test]
    fn minimize_mealy_table() {
        let mm = read_mealy(MEALY.as_bytes(), TableFormat::default()).unwrap();
        assert_eq!(mm.states(), &["S0", "S1", "S2"]);

        let written = mm.minimize().to_table_string(TableFormat::default()).unwrap();
        let reread = read_mealy(written.as_bytes(), TableFormat::default()).unwrap();
        assert!(reread.bisimilar(&mm));
        assert_eq!(written.lines().next(), Some(";a1;a2;a3"));
    }

    #[test_log::test]
    fn minimize_moore_table() {
        let mm = read_moore(MOORE.as_bytes(), TableFormat::default()).unwrap();
        let min = mm.minimize();
        assert_eq!(min.size(), 2);

        let written = min.to_table_string(TableFormat::default()).unwrap();
        assert_eq!(written, ";y1;y2\n;a1;a2\nx1;a2;a1\nx2;a1;a2\n");
    }
}
