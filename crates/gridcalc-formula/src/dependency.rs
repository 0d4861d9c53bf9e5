//! Dependency tracking and evaluation ordering for formula cells

use ahash::{AHashMap, AHashSet};
use gridcalc_core::CellAddress;

/// Dependency graph for formula cells
///
/// An edge runs from a formula cell to every formula cell it reads.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<CellAddress, AHashSet<CellAddress>>,
}

/// Evaluation order for a set of formula cells
#[derive(Debug, Default, Clone)]
pub struct EvaluationPlan {
    /// Every reachable cell, precedents before dependents
    pub order: Vec<CellAddress>,
    /// Cells that lie on a cycle or depend on one
    pub circular: AHashSet<CellAddress>,
}

impl EvaluationPlan {
    /// Check whether a cell lies on or depends on a cycle
    pub fn is_circular(&self, cell: CellAddress) -> bool {
        self.circular.contains(&cell)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting(usize),
    Done,
}

struct Frame {
    cell: CellAddress,
    precedents: Vec<CellAddress>,
    next: usize,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellAddress, dependent: CellAddress) {
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Get cells that the given cell depends on
    pub fn precedents(&self, cell: CellAddress) -> impl Iterator<Item = CellAddress> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.precedents.values().map(|set| set.len()).sum()
    }

    /// Order the cells reachable from `roots` for evaluation and find the
    /// ones caught in cycles
    ///
    /// The walk is an iterative depth-first search, so chain length is not
    /// limited by the call stack. A back edge marks every cell on the stack
    /// between its ends as circular; a cell that reads a circular cell is
    /// circular too.
    pub fn plan<I>(&self, roots: I) -> EvaluationPlan
    where
        I: IntoIterator<Item = CellAddress>,
    {
        let mut plan = EvaluationPlan::default();
        let mut marks: AHashMap<CellAddress, Mark> = AHashMap::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in roots {
            if marks.contains_key(&root) {
                continue;
            }
            marks.insert(root, Mark::Visiting(0));
            stack.push(self.frame(root));

            while let Some(frame) = stack.last_mut() {
                if let Some(&next) = frame.precedents.get(frame.next) {
                    frame.next += 1;
                    match marks.get(&next).copied() {
                        None => {
                            marks.insert(next, Mark::Visiting(stack.len()));
                            stack.push(self.frame(next));
                        }
                        Some(Mark::Visiting(depth)) => {
                            plan.circular
                                .extend(stack[depth..].iter().map(|f| f.cell));
                        }
                        Some(Mark::Done) => {}
                    }
                    continue;
                }

                let cell = frame.cell;
                if self.precedents(cell).any(|p| plan.circular.contains(&p)) {
                    plan.circular.insert(cell);
                }
                marks.insert(cell, Mark::Done);
                plan.order.push(cell);
                stack.pop();
            }
        }

        plan
    }

    fn frame(&self, cell: CellAddress) -> Frame {
        let mut precedents: Vec<_> = self.precedents(cell).collect();
        precedents.sort_unstable();
        Frame {
            cell,
            precedents,
            next: 0,
        }
    }
}
