use itertools::Itertools;

use crate::{math::OrderedSet, Symbol};

/// An alphabet is the ordered collection of input symbols a machine reads. The order in
/// which symbols are declared is the order in which every algorithm iterates over them,
/// it determines the shape of signatures during minimization as well as the row order
/// of a written table.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Alphabet(OrderedSet<Symbol>);

impl Alphabet {
    /// Creates a new alphabet from the given symbols. Returns the first symbol that occurs
    /// more than once as error.
    pub fn new<S, I>(symbols: I) -> Result<Self, Symbol>
    where
        S: Into<Symbol>,
        I: IntoIterator<Item = S>,
    {
        let mut set = OrderedSet::default();
        for sym in symbols {
            let sym = sym.into();
            if set.contains(&sym) {
                return Err(sym);
            }
            set.insert(sym);
        }
        Ok(Self(set))
    }

    /// Iterates over the symbols in declaration order.
    pub fn universe(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.0.iter()
    }

    /// Returns true if `sym` is part of the alphabet.
    pub fn contains(&self, sym: &str) -> bool {
        self.0.contains(sym)
    }

    /// The number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no symbol is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.universe().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::Alphabet;

    #[test]
    fn alphabet_keeps_declaration_order() {
        let alphabet = Alphabet::new(["b", "a", "c"]).unwrap();
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert!(alphabet.contains("a"));
        assert!(!alphabet.contains("d"));
        assert_eq!(alphabet.size(), 3);
        assert_eq!(alphabet.to_string(), "{b, a, c}");
        assert_eq!(Alphabet::new(["x", "y", "x"]), Err("x".to_string()));
    }
}
