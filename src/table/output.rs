use std::{io::Write, path::Path};

use tracing::trace;

use crate::prelude::*;

use super::{TableError, TableFormat, MEALY_CELL_SEPARATOR};

/// Implemented by machines that can be serialized into a table. The whole table is rendered
/// into memory before anything is handed to the destination, so a failing machine never
/// leaves a partially written table behind.
pub trait WriteTable {
    /// Produces the rows of the table, each as a vector of cells.
    fn table_rows(&self) -> Vec<Vec<String>>;

    /// Renders the table into bytes using `format`.
    fn to_table_bytes(&self, format: TableFormat) -> Result<Vec<u8>, TableError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter)
            .from_writer(vec![]);
        for row in self.table_rows() {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| TableError::Io(std::io::Error::new(e.error().kind(), e.to_string())))?;
        trace!("rendered table of {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Renders the table into a string using `format`.
    fn to_table_string(&self, format: TableFormat) -> Result<String, TableError> {
        let bytes = self.to_table_bytes(format)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes the table to `w` using `format`.
    fn write_table<W: Write>(&self, w: &mut W, format: TableFormat) -> Result<(), TableError> {
        let bytes = self.to_table_bytes(format)?;
        w.write_all(&bytes)?;
        w.flush()?;
        Ok(())
    }

    /// Writes the table into the file at `path`, replacing its contents.
    fn write_table_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: TableFormat,
    ) -> Result<(), TableError> {
        let bytes = self.to_table_bytes(format)?;
        std::fs::write(path.as_ref(), bytes)?;
        trace!("wrote table to {}", path.as_ref().display());
        Ok(())
    }
}

/// The leading cell of every header row is left empty.
fn header<'a, I: IntoIterator<Item = &'a String>>(cells: I) -> Vec<String> {
    std::iter::once(String::new())
        .chain(cells.into_iter().cloned())
        .collect()
}

impl WriteTable for MealyMachine {
    fn table_rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![header(self.states())];
        for sym in self.alphabet().universe() {
            let mut row = vec![sym.clone()];
            row.extend(self.states().iter().map(|q| match self.transition(sym, q) {
                Some(e) => format!("{}{MEALY_CELL_SEPARATOR}{}", e.target, e.output),
                None => String::new(),
            }));
            rows.push(row);
        }
        rows
    }
}

impl WriteTable for MooreMachine {
    fn table_rows(&self) -> Vec<Vec<String>> {
        let outputs: Vec<String> = self
            .states()
            .iter()
            .map(|q| self.output(q).cloned().unwrap_or_default())
            .collect();
        let mut rows = vec![header(&outputs), header(self.states())];
        for sym in self.alphabet().universe() {
            let mut row = vec![sym.clone()];
            row.extend(
                self.states()
                    .iter()
                    .map(|q| self.transition(sym, q).cloned().unwrap_or_default()),
            );
            rows.push(row);
        }
        rows
    }
}

impl WriteTable for Automaton {
    fn table_rows(&self) -> Vec<Vec<String>> {
        match self {
            Automaton::Mealy(mm) => mm.table_rows(),
            Automaton::Moore(mm) => mm.table_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        table::{read_mealy, read_moore, TableFormat, WriteTable},
    };

    #[test]
    fn absent_transitions_are_written_as_empty_cells() {
        let mm = MealyMachine::new(["A", "B"], ["0", "1"], [("A", "0", "x", "B")]).unwrap();
        assert_eq!(
            mm.to_table_string(TableFormat::default()).unwrap(),
            ";A;B\n0;B/x;\n1;;\n"
        );

        let moore = MooreMachine::new(["A", "B"], ["0"], [("B", "0", "A")], [("A", "x"), ("B", "y")])
            .unwrap();
        assert_eq!(
            moore.to_table_string(TableFormat::default()).unwrap(),
            ";x;y\n;A;B\n0;;A\n"
        );
    }

    #[test]
    fn written_tables_read_back() {
        let mm = MealyMachine::new(
            ["A", "B", "C"],
            ["0", "1"],
            [
                ("A", "0", "x", "B"),
                ("A", "1", "y", "C"),
                ("B", "0", "x", "A"),
                ("C", "1", "y", "A"),
            ],
        )
        .unwrap();
        let mut buf = vec![];
        mm.write_table(&mut buf, TableFormat::default()).unwrap();
        assert_eq!(read_mealy(buf.as_slice(), TableFormat::default()).unwrap(), mm);

        let moore = mm.into_moore();
        let written = Automaton::from(moore.clone())
            .to_table_string(TableFormat::default())
            .unwrap();
        assert_eq!(
            read_moore(written.as_bytes(), TableFormat::default()).unwrap(),
            moore
        );
    }
}
