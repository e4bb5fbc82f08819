//! 0/1 knapsack as a sequential decision problem, for beam search.
//!
//! Items are decided in order: take (if it fits) or skip. The score of a
//! partial packing is the value packed so far, so a beam keeps the most
//! valuable prefixes. [`Knapsack::optimal_value`] gives the exact answer by
//! dynamic programming for comparison.
//!
//! Weight sums that overflow `u32` never fit; value sums saturate.

use lodestar_kernel::contract::{EvaluateDomain, SearchDomain};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{DecisionWorld, DescribeWorld, WorldError};

/// Largest accepted capacity. Bounds the dynamic-programming table.
pub const MAX_CAPACITY: u32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemV1 {
    pub weight: u32,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnapsackSpecV1 {
    pub capacity: u32,
    pub items: Vec<ItemV1>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Take,
    Skip,
}

/// Items decided so far.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Packing {
    /// Index of the next undecided item.
    pub next: usize,
    pub weight: u32,
    pub value: u32,
    /// Indices of taken items, ascending.
    pub taken: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Knapsack {
    items: Vec<ItemV1>,
    capacity: u32,
}

impl Knapsack {
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] for an empty item list or a capacity
    /// above [`MAX_CAPACITY`].
    pub fn new(capacity: u32, items: Vec<ItemV1>) -> Result<Self, WorldError> {
        if items.is_empty() {
            return Err(WorldError::invalid("knapsack needs at least one item"));
        }
        if capacity > MAX_CAPACITY {
            return Err(WorldError::invalid(format!(
                "knapsack capacity {capacity} exceeds {MAX_CAPACITY}"
            )));
        }
        Ok(Self { items, capacity })
    }

    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn from_spec(spec: &KnapsackSpecV1) -> Result<Self, WorldError> {
        Self::new(spec.capacity, spec.items.clone())
    }

    #[must_use]
    pub fn items(&self) -> &[ItemV1] {
        &self.items
    }

    /// Best achievable value, by dynamic programming over capacity.
    #[must_use]
    pub fn optimal_value(&self) -> u32 {
        let capacity = self.capacity as usize;
        let mut best = vec![0_u32; capacity + 1];
        for item in &self.items {
            let weight = item.weight as usize;
            if weight > capacity {
                continue;
            }
            for room in (weight..=capacity).rev() {
                best[room] = best[room].max(best[room - weight].saturating_add(item.value));
            }
        }
        best[capacity]
    }

    fn fits(&self, state: &Packing, item: ItemV1) -> bool {
        state
            .weight
            .checked_add(item.weight)
            .is_some_and(|weight| weight <= self.capacity)
    }
}

impl SearchDomain for Knapsack {
    type State = Packing;
    type Action = Choice;

    fn domain_id(&self) -> &str {
        "knapsack"
    }

    fn initial_state(&self) -> Packing {
        Packing {
            next: 0,
            weight: 0,
            value: 0,
            taken: Vec::new(),
        }
    }

    fn is_terminal(&self, state: &Packing) -> bool {
        state.next >= self.items.len()
    }

    fn available_actions(&self, state: &Packing) -> Vec<Choice> {
        let Some(item) = self.items.get(state.next) else {
            return Vec::new();
        };
        if self.fits(state, *item) {
            vec![Choice::Take, Choice::Skip]
        } else {
            vec![Choice::Skip]
        }
    }

    fn apply_action(&self, state: &Packing, action: &Choice) -> Packing {
        let item = self.items[state.next];
        let mut next = state.clone();
        next.next += 1;
        if *action == Choice::Take {
            assert!(self.fits(state, item), "item {} does not fit", state.next);
            next.weight += item.weight;
            next.value = next.value.saturating_add(item.value);
            next.taken.push(state.next);
        }
        next
    }
}

impl EvaluateDomain for Knapsack {
    fn evaluate(&self, state: &Packing) -> f64 {
        f64::from(state.value)
    }
}

impl DescribeWorld for Knapsack {
    fn describe_state(&self, state: &Packing) -> Value {
        json!({"taken": state.taken, "value": state.value, "weight": state.weight})
    }

    fn describe_action(&self, action: &Choice) -> Value {
        Value::String(
            match action {
                Choice::Take => "take",
                Choice::Skip => "skip",
            }
            .to_string(),
        )
    }

    fn fixture(&self) -> Value {
        let items: Vec<Value> = self
            .items
            .iter()
            .map(|item| json!({"value": item.value, "weight": item.weight}))
            .collect();
        json!({"capacity": self.capacity, "items": items})
    }
}

impl DecisionWorld for Knapsack {
    fn fallback_action(&self) -> Choice {
        Choice::Skip
    }
}
