use std::{io::Read, path::Path};

use tracing::{debug, trace};

use crate::{prelude::*, Output, State, Symbol};

use super::{FormatError, TableError, TableFormat, MEALY_CELL_SEPARATOR};

/// Collects all rows of the table, each as a vector of cells together with its one-based
/// row number.
fn rows<R: Read>(read: R, format: TableFormat) -> Result<Vec<(usize, Vec<String>)>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(read);
    let mut out = vec![];
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        out.push((i + 1, record.iter().map(str::to_string).collect()));
    }
    trace!("read {} rows from table", out.len());
    Ok(out)
}

/// Checks that `cells` has an input symbol followed by one cell per state and returns them.
fn transition_row(
    row: usize,
    cells: &[String],
    states: usize,
) -> Result<(&String, &[String]), FormatError> {
    if cells.len() != states + 1 {
        return Err(FormatError::RowLength {
            row,
            expected: states + 1,
            found: cells.len(),
        });
    }
    Ok((&cells[0], &cells[1..]))
}

/// Parses a Mealy machine from a table with a header row of state names followed by one row
/// per input symbol, where each cell is of the form `next/output` or empty.
pub fn read_mealy<R: Read>(read: R, format: TableFormat) -> Result<MealyMachine, TableError> {
    let mut rows = rows(read, format)?.into_iter();
    let (_, header) = rows.next().ok_or(FormatError::MissingHeader)?;
    let states: Vec<State> = header.into_iter().skip(1).collect();

    let mut alphabet: Vec<Symbol> = vec![];
    let mut transitions: Vec<(State, Symbol, Output, State)> = vec![];
    for (row, cells) in rows {
        let (sym, cells) = transition_row(row, &cells, states.len())?;
        for (source, cell) in states.iter().zip(cells) {
            if cell.is_empty() {
                continue;
            }
            let Some((target, output)) = cell.split_once(MEALY_CELL_SEPARATOR) else {
                return Err(FormatError::MissingSeparator {
                    row,
                    cell: cell.clone(),
                }
                .into());
            };
            transitions.push((source.clone(), sym.clone(), output.into(), target.into()));
        }
        alphabet.push(sym.clone());
    }

    let mm = MealyMachine::new(states, alphabet, transitions)?;
    debug!(
        "read mealy machine with {} states over {}",
        mm.size(),
        mm.alphabet()
    );
    Ok(mm)
}

/// Parses a Moore machine from a table with a row of outputs, a row of state names and one
/// row per input symbol, where each cell holds the next state or is empty.
pub fn read_moore<R: Read>(read: R, format: TableFormat) -> Result<MooreMachine, TableError> {
    let mut rows = rows(read, format)?.into_iter();
    let (_, output_row) = rows.next().ok_or(FormatError::MissingHeader)?;
    let (_, state_row) = rows.next().ok_or(FormatError::MissingStateRow)?;
    let outputs: Vec<Output> = output_row.into_iter().skip(1).collect();
    let states: Vec<State> = state_row.into_iter().skip(1).collect();
    if outputs.len() != states.len() {
        return Err(FormatError::OutputCount {
            outputs: outputs.len(),
            states: states.len(),
        }
        .into());
    }

    let mut alphabet: Vec<Symbol> = vec![];
    let mut transitions: Vec<(State, Symbol, State)> = vec![];
    for (row, cells) in rows {
        let (sym, cells) = transition_row(row, &cells, states.len())?;
        for (source, target) in states.iter().zip(cells) {
            if !target.is_empty() {
                transitions.push((source.clone(), sym.clone(), target.clone()));
            }
        }
        alphabet.push(sym.clone());
    }

    let mm = MooreMachine::new(
        states.clone(),
        alphabet,
        transitions,
        states.into_iter().zip(outputs),
    )?;
    debug!(
        "read moore machine with {} states over {}",
        mm.size(),
        mm.alphabet()
    );
    Ok(mm)
}

/// Parses a machine of the given kind.
pub fn read<R: Read>(
    kind: MachineKind,
    read: R,
    format: TableFormat,
) -> Result<Automaton, TableError> {
    Ok(match kind {
        MachineKind::Mealy => read_mealy(read, format)?.into(),
        MachineKind::Moore => read_moore(read, format)?.into(),
    })
}

/// Opens the file at `path` and parses a machine of the given kind from it.
pub fn read_from_path<P: AsRef<Path>>(
    kind: MachineKind,
    path: P,
    format: TableFormat,
) -> Result<Automaton, TableError> {
    let file = std::fs::File::open(path.as_ref())?;
    trace!("reading {kind} table from {}", path.as_ref().display());
    read(kind, std::io::BufReader::new(file), format)
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        table::{FormatError, TableError, TableFormat},
    };

    use super::{read, read_mealy, read_moore};

    #[test]
    fn partial_mealy_tables_are_accepted() {
        let mm = read_mealy(";A;B\n0;B/x;\n1;A/y;A/x\n".as_bytes(), TableFormat::default()).unwrap();
        assert_eq!(mm.states(), &["A", "B"]);
        assert_eq!(mm.transition("0", "A"), Some(&MealyEdge::new("x", "B")));
        assert!(mm.transition("0", "B").is_none());
        assert_eq!(mm.transitions().len(), 3);
    }

    #[test]
    fn malformed_mealy_cells_are_rejected() {
        let err = read_mealy(";A;B\n0;B/x;Ax\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Format(FormatError::MissingSeparator { row: 2, ref cell }) if cell == "Ax"
        ));

        let err = read_mealy(";A;B\n0;B/x\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Format(FormatError::RowLength {
                row: 2,
                expected: 3,
                found: 2
            })
        ));

        let err = read_mealy("".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(err, TableError::Format(FormatError::MissingHeader)));
    }

    #[test]
    fn undeclared_states_are_structural_errors() {
        let err = read_mealy(";A\n0;C/x\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Automaton(AutomatonError::UnknownState { .. })
        ));

        let err = read_moore(";x\n;A\n0;C\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Automaton(AutomatonError::UnknownState { .. })
        ));
    }

    #[test]
    fn moore_headers_must_align() {
        let err = read_moore(";x;y\n;A\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Format(FormatError::OutputCount {
                outputs: 2,
                states: 1
            })
        ));
        let err = read_moore(";x;y\n".as_bytes(), TableFormat::default()).unwrap_err();
        assert!(matches!(err, TableError::Format(FormatError::MissingStateRow)));
    }

    #[test]
    fn other_delimiters() {
        let aut = read(
            MachineKind::Moore,
            ",x,y\n,A,B\n0,B,\n".as_bytes(),
            TableFormat::with_delimiter(b','),
        )
        .unwrap();
        assert_eq!(aut.kind(), MachineKind::Moore);
        let mm = aut.into_moore();
        assert_eq!(mm.output("B"), Some(&"y".to_string()));
        assert!(mm.transition("0", "B").is_none());
    }
}
