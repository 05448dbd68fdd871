use std::hash::Hash;

use crate::{math::Map, State};

/// Hands out names of the form `<prefix><n>` to keys. A key receives its name the first time
/// it is seen, consecutive numbers are used in order of first appearance and seeing a key
/// again returns the name it already has. The names therefore only depend on the order in
/// which keys are presented, which callers must make deterministic.
#[derive(Debug, Clone)]
pub struct CanonicalNamer<K> {
    prefix: &'static str,
    start: usize,
    names: Map<K, State>,
}

impl<K: Hash + Eq> CanonicalNamer<K> {
    /// Creates a namer whose first name is `<prefix><start>`.
    pub fn new(prefix: &'static str, start: usize) -> Self {
        Self {
            prefix,
            start,
            names: Map::default(),
        }
    }

    /// The names `a1`, `a2`, ... that are used for equivalence classes.
    pub fn classes() -> Self {
        Self::new("a", 1)
    }

    /// The names `q0`, `q1`, ... that are used for synthesized states.
    pub fn states() -> Self {
        Self::new("q", 0)
    }

    /// Returns the name of `key`, assigning the next free one if `key` is new.
    pub fn name(&mut self, key: K) -> &State {
        let next = self.start + self.names.len();
        let prefix = self.prefix;
        self.names
            .entry(key)
            .or_insert_with(|| format!("{prefix}{next}"))
    }
}

#[cfg(test)]
mod tests {
    use super::CanonicalNamer;

    #[test]
    fn names_follow_first_appearance() {
        let mut namer = CanonicalNamer::classes();
        let names: Vec<String> = ["x", "y", "x", "z", "y"]
            .into_iter()
            .map(|k| namer.name(k).clone())
            .collect();
        assert_eq!(names, vec!["a1", "a2", "a1", "a3", "a2"]);
        assert_eq!(namer.name("w"), "a4");

        let mut states = CanonicalNamer::states();
        assert_eq!(states.name(("B", "x")), "q0");
        assert_eq!(states.name(("A", "")), "q1");
    }
}
