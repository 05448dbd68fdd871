pub(crate) mod partition_refinement;

use crate::{math::Partition, prelude::*};

impl MooreMachine {
    /// Returns the unique minimal moore machine that is bisimilar to `self`. This means
    /// for every finite word, the output of `self` and the output of the returned moore
    /// machine is the same. Unreachable states are pruned first, the states of the result
    /// are named `a1`, `a2`, ... where `a1` is the class of the initial state.
    pub fn minimize(&self) -> MooreMachine {
        let pruned = self.clone().prune();
        let partition = partition_refinement::moore_partition_refinement(&pruned);
        partition_refinement::moore_quotient(&pruned, &partition)
    }

    /// Computes the partition of the reachable states of `self` into classes of
    /// indistinguishable states.
    pub fn equivalence_partition(&self) -> Partition {
        partition_refinement::moore_partition_refinement(&self.clone().prune())
    }
}

impl MealyMachine {
    /// Minimizes `self` using partition refinement. Unreachable states are pruned first, the
    /// states of the result are named `a1`, `a2`, ... where `a1` is the class of the initial
    /// state.
    pub fn minimize(&self) -> MealyMachine {
        let pruned = self.clone().prune();
        let partition = partition_refinement::mealy_partition_refinement(&pruned);
        partition_refinement::mealy_quotient(&pruned, &partition)
    }

    /// Computes the partition of the reachable states of `self` into classes of
    /// indistinguishable states.
    pub fn equivalence_partition(&self) -> Partition {
        partition_refinement::mealy_partition_refinement(&self.clone().prune())
    }
}
