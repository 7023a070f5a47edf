//! Exact 0/1 knapsack by branch and bound.
//!
//! # Algorithm
//!
//! Items are sorted by value/weight ratio, best first. Each search node has
//! decided the first `next` items and carries the weight and value taken so
//! far plus an upper bound on what its subtree can reach. A node branches
//! into "take item `next`" and "skip item `next`"; a child is kept only if
//! its bound beats the best profit found so far.
//!
//! The bound is the fractional relaxation: fill the remaining budget with
//! the following items in ratio order and take a fractional slice of the
//! first one that does not fit.
//!
//! Nodes are explored breadth-first by default. Best-first (highest bound
//! first) prunes more on large instances and returns the same optimum.
//!
//! Take decisions are kept in an arena with parent links, so the chosen
//! items are recovered by walking back from the best node.
//!
//! # Reference
//!
//! Kolesar, P.J. (1967). "A branch and bound algorithm for the knapsack
//! problem", *Management Science* 13(9), 723-735.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Item;

/// Order in which open search nodes are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    /// FIFO queue.
    #[default]
    BreadthFirst,
    /// Priority queue on the fractional bound.
    BestFirst,
}

/// Shared flag that stops a running search from another thread.
///
/// # Examples
///
/// ```
/// use u_delivery::assignment::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Settings for [`knapsack_with`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnapsackConfig {
    /// Expansion order.
    pub order: SearchOrder,
    /// Stop after expanding this many nodes.
    pub node_limit: Option<usize>,
    /// External stop request.
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl KnapsackConfig {
    /// Sets the expansion order.
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Caps the number of expanded nodes.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn should_stop(&self, explored: usize) -> bool {
        self.node_limit.is_some_and(|limit| explored >= limit)
            || self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Result of [`knapsack_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackOutcome {
    /// Best total value found.
    pub max_profit: f64,
    /// Indices into the input items of the chosen set, ascending.
    pub selected: Vec<usize>,
    /// Number of search nodes expanded.
    pub explored: usize,
    /// `false` if the search was stopped before the queue emptied, in which
    /// case `max_profit` is a lower bound on the optimum.
    pub completed: bool,
}

/// Upper bound on the value reachable from a search node.
///
/// `items` must be sorted by [`Item::ratio`], best first. The node has
/// decided items `0..next` and holds `weight` and `value`. An overweight
/// node is worth nothing.
///
/// # Examples
///
/// ```
/// use u_delivery::assignment::{fractional_bound, Item};
///
/// let items = [Item::new(6.0, 30.0), Item::new(4.0, 20.0), Item::new(3.0, 10.0)];
/// assert_eq!(fractional_bound(&items, 10.0, 0, 0.0, 0.0), 50.0);
/// // skip the first item: 20 + 10 and nothing left to slice
/// assert_eq!(fractional_bound(&items, 10.0, 1, 0.0, 0.0), 30.0);
/// // only 2 units left after the second item: 20 + 2 * 10/3
/// assert!((fractional_bound(&items, 6.0, 1, 0.0, 0.0) - (20.0 + 20.0 / 3.0)).abs() < 1e-9);
/// assert_eq!(fractional_bound(&items, 10.0, 1, 11.0, 30.0), 0.0);
/// ```
pub fn fractional_bound(items: &[Item], budget: f64, next: usize, weight: f64, value: f64) -> f64 {
    if weight > budget {
        return 0.0;
    }
    let mut bound = value;
    let mut used = weight;
    let mut j = next;
    while j < items.len() && used + items[j].weight <= budget {
        used += items[j].weight;
        bound += items[j].value;
        j += 1;
    }
    if j < items.len() {
        bound += (budget - used) * items[j].value / items[j].weight;
    }
    bound
}

/// Maximum total value of items fitting in `budget`.
///
/// # Examples
///
/// ```
/// use u_delivery::assignment::{knapsack, Item};
///
/// let items = [Item::new(6.0, 30.0), Item::new(4.0, 20.0), Item::new(3.0, 10.0)];
/// assert_eq!(knapsack(10.0, &items), 50.0);
/// ```
pub fn knapsack(budget: f64, items: &[Item]) -> f64 {
    knapsack_with(budget, items, &KnapsackConfig::default()).max_profit
}

#[derive(Debug, Clone, Copy)]
struct Node {
    next: usize,
    weight: f64,
    value: f64,
    bound: f64,
    taken: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Take {
    item: usize,
    parent: Option<usize>,
}

struct Ranked {
    node: Node,
    seq: usize,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .bound
            .total_cmp(&other.node.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

enum Frontier {
    Fifo(VecDeque<Node>),
    Best(BinaryHeap<Ranked>, usize),
}

impl Frontier {
    fn new(order: SearchOrder) -> Self {
        match order {
            SearchOrder::BreadthFirst => Frontier::Fifo(VecDeque::new()),
            SearchOrder::BestFirst => Frontier::Best(BinaryHeap::new(), 0),
        }
    }

    fn push(&mut self, node: Node) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(node),
            Frontier::Best(heap, seq) => {
                heap.push(Ranked { node, seq: *seq });
                *seq += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<Node> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Best(heap, _) => heap.pop().map(|r| r.node),
        }
    }
}

/// Branch-and-bound knapsack with configurable order and stopping rules.
pub fn knapsack_with(budget: f64, items: &[Item], config: &KnapsackConfig) -> KnapsackOutcome {
    let n = items.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| items[b].ratio().total_cmp(&items[a].ratio()));
    let sorted: Vec<Item> = order.iter().map(|&i| items[i]).collect();

    let mut takes: Vec<Take> = Vec::new();
    let mut frontier = Frontier::new(config.order);
    frontier.push(Node {
        next: 0,
        weight: 0.0,
        value: 0.0,
        bound: fractional_bound(&sorted, budget, 0, 0.0, 0.0),
        taken: None,
    });

    let mut max_profit = 0.0f64;
    let mut best: Option<usize> = None;
    let mut explored = 0usize;
    let mut completed = true;

    while let Some(node) = frontier.pop() {
        if config.should_stop(explored) {
            completed = false;
            break;
        }
        explored += 1;
        if node.next == n || node.bound <= max_profit {
            continue;
        }

        let item = sorted[node.next];
        let weight = node.weight + item.weight;
        if weight <= budget {
            let value = node.value + item.value;
            takes.push(Take {
                item: node.next,
                parent: node.taken,
            });
            let taken = Some(takes.len() - 1);
            if value > max_profit {
                max_profit = value;
                best = taken;
            }
            let bound = fractional_bound(&sorted, budget, node.next + 1, weight, value);
            if bound > max_profit {
                frontier.push(Node {
                    next: node.next + 1,
                    weight,
                    value,
                    bound,
                    taken,
                });
            }
        }

        let bound = fractional_bound(&sorted, budget, node.next + 1, node.weight, node.value);
        if bound > max_profit {
            frontier.push(Node {
                next: node.next + 1,
                bound,
                ..node
            });
        }
    }

    let mut selected = Vec::new();
    let mut cursor = best;
    while let Some(idx) = cursor {
        selected.push(order[takes[idx].item]);
        cursor = takes[idx].parent;
    }
    selected.sort_unstable();

    if completed {
        debug!(explored, max_profit, items = n, "knapsack search finished");
    } else {
        warn!(explored, max_profit, "knapsack search stopped before completion");
    }

    KnapsackOutcome {
        max_profit,
        selected,
        explored,
        completed,
    }
}
