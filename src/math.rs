use crate::State;

/// Type alias for maps, we use this to hide which type of map we are actually using. The map
/// remembers insertion order, which every algorithm in this crate relies on for determinism.
pub type Map<K, V> = indexmap::IndexMap<K, V>;
/// Type alias for sets that preserve insertion order.
pub type OrderedSet<S> = indexmap::IndexSet<S>;
/// Type alias for sets which are only ever used for membership tests, iteration order is
/// unspecified.
pub type Set<S> = fxhash::FxHashSet<S>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa. Iteration is ordered by `L`.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on a congruence relation, it assigns each state the
/// name of the class it belongs to. States are kept in the order in which they were
/// classified, which is the declaration order whenever the partition is produced by
/// [`crate::minimization`].
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Partition(Map<State, State>);

impl Partition {
    /// Builds a partition from pairs of state and class name.
    pub fn new<I: IntoIterator<Item = (State, State)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }

    /// Returns the size of the partition, i.e. the number of distinct classes.
    pub fn size(&self) -> usize {
        self.classes().count()
    }

    /// Returns the name of the class that `state` belongs to, if the state is classified.
    pub fn class_of(&self, state: &str) -> Option<&State> {
        self.0.get(state)
    }

    /// Iterates over the distinct class names in the order they are first encountered.
    pub fn classes(&self) -> impl Iterator<Item = &State> + '_ {
        self.0.values().collect::<OrderedSet<_>>().into_iter()
    }

    /// Iterates over all pairs of state and class name.
    pub fn iter(&self) -> impl Iterator<Item = (&State, &State)> + '_ {
        self.0.iter()
    }

    /// Returns true if and only if `p` and `q` are classified and belong to the same class.
    pub fn same_class(&self, p: &str, q: &str) -> bool {
        matches!((self.class_of(p), self.class_of(q)), (Some(a), Some(b)) if a == b)
    }
}

impl<K: Into<State>, V: Into<State>> FromIterator<(K, V)> for Partition {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}
