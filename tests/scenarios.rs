use transducers::{
    prelude::*,
    table::{read_mealy, read_moore, TableFormat, WriteTable},
};

fn mealy(table: &str) -> MealyMachine {
    read_mealy(table.as_bytes(), TableFormat::default()).unwrap()
}

#[test_log::test]
fn two_state_mealy_is_already_minimal() {
    let mm = mealy(";A;B\n0;B/x;A/y\n1;A/y;B/x\n");
    let min = mm.minimize();

    assert_eq!(min.size(), 2);
    assert_eq!(
        min.to_table_string(TableFormat::default()).unwrap(),
        ";a1;a2\n0;a2/x;a1/y\n1;a1/y;a2/x\n"
    );
}

#[test_log::test]
fn states_with_equal_futures_are_merged() {
    let mm = mealy(";A;B;C\n0;B/x;C/x;B/x\n");
    let partition = mm.equivalence_partition();
    assert!(partition.same_class("B", "C"));

    let min = mm.minimize();
    assert_eq!(min.size(), 1);
    assert_eq!(min.transition("0", "a1"), Some(&MealyEdge::new("x", "a1")));
    assert!(min.bisimilar(&mm));
}

#[test_log::test]
fn mealy_to_moore_on_two_state_machine() {
    let mm = mealy(";A;B\n0;B/x;A/y\n1;A/y;B/x\n");
    let moore = mm.clone().into_moore();

    assert!((2..=4).contains(&moore.size()));
    for q in moore.states() {
        assert!(moore.output(q).is_some());
    }
    assert_eq!(moore.outputs().len(), moore.size());
    assert_eq!(
        moore.to_table_string(TableFormat::default()).unwrap(),
        ";y;x\n;q0;q1\n0;q1;q0\n1;q0;q1\n"
    );
    assert!(moore.into_mealy().bisimilar(&mm));
}

#[test_log::test]
fn unreachable_states_are_pruned() {
    let mm = mealy(";A;B;C\n0;B/x;A/y;A/x\n1;A/x;B/y;B/y\n");
    let pruned = mm.clone().prune();

    assert_eq!(pruned.states(), &["A", "B"]);
    assert!(pruned.transitions().iter().all(|(_, q, _)| q != "C"));
    assert_eq!(
        pruned.to_table_string(TableFormat::default()).unwrap(),
        ";A;B\n0;B/x;A/y\n1;A/x;B/y\n"
    );
}

#[test_log::test]
fn moore_tables_round_trip_through_minimization() {
    let table = ";y1;y1;y2;y2\n;S0;S1;S2;S3\nx1;S1;S0;S3;S2\nx2;S2;S3;S0;S1\n";
    let mm = read_moore(table.as_bytes(), TableFormat::default()).unwrap();
    let min = mm.minimize();

    assert_eq!(
        min.to_table_string(TableFormat::default()).unwrap(),
        ";y1;y2\n;a1;a2\nx1;a1;a2\nx2;a2;a1\n"
    );
    assert!(min.bisimilar(&mm));
    assert_eq!(min.minimize(), min);
}
