use owo_colors::OwoColorize;

use crate::{prelude::*, State};

/// Returns a string representation of the transition table of the transition system, one
/// row per state in declaration order and one column per symbol. The initial state is
/// highlighted, if `state_decorator` is given its result is shown in an extra column and
/// missing transitions are shown as `-`.
pub(crate) fn transition_table<Ts, ED>(
    ts: &Ts,
    state_decorator: Option<&dyn Fn(&State) -> String>,
    edge_decorator: ED,
) -> String
where
    Ts: TransitionSystem,
    ED: Fn(&Ts::Edge) -> String,
{
    let mut builder = tabled::builder::Builder::default();
    let mut header = vec!["State".to_string()];
    if state_decorator.is_some() {
        header.push("Output".to_string());
    }
    header.extend(ts.alphabet().universe().cloned());
    builder.push_record(header);

    for q in ts.states() {
        let mut row = vec![if q == ts.initial() {
            q.bold().to_string()
        } else {
            q.to_string()
        }];
        if let Some(decorate) = state_decorator {
            row.push(decorate(q));
        }
        for sym in ts.alphabet().universe() {
            match ts.edge(q, sym) {
                Some(edge) => row.push(edge_decorator(edge)),
                None => row.push("-".to_string()),
            }
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}
