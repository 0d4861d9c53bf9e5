//! Sheet calculation engine
//!
//! Resolves formula cells with dependency tracking, circular reference
//! detection and a per-pass memo table. Formulas are parsed once per pass,
//! their precedents are evaluated first, and no cell's evaluation recurses
//! into another's.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new("Sheet1");
//! sheet.set_cell_value("A1", "10").unwrap();
//! sheet.set_cell_value("A2", "20").unwrap();
//! sheet.set_cell_formula("A3", "=A1+A2").unwrap();
//!
//! let stats = sheet.calculate().unwrap();
//! assert_eq!(stats.cells_calculated, 1);
//! assert_eq!(sheet.value("A3").unwrap(), ResolvedValue::Number(30.0));
//! ```

use ahash::{AHashMap, AHashSet};
use gridcalc_core::{
    CellAddress, CellError, CellProvider, CellRecord, ResolvedValue, Result, Sheet,
};
use gridcalc_formula::range::check_size;
use gridcalc_formula::{
    evaluate, parse_formula, DependencyGraph, Formula, FormulaResult, ValueLookup,
    DEFAULT_MAX_RANGE_CELLS,
};
use tracing::{debug, trace, warn};

/// Options for sheet calculation
#[derive(Debug, Clone)]
pub struct CalculationOptions {
    /// Reuse results stored in the sheet by the last `calculate()` instead of
    /// recomputing them
    pub use_cached_results: bool,
    /// Largest range a single formula may read (default: 1,000,000 cells)
    pub max_range_cells: usize,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            use_cached_results: true,
            max_range_cells: DEFAULT_MAX_RANGE_CELLS,
        }
    }
}

impl CalculationOptions {
    /// Options that ignore stored results and recompute every formula read
    pub fn uncached() -> Self {
        Self {
            use_cached_results: false,
            ..Self::default()
        }
    }
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of formula cells
    pub formula_count: usize,
    /// Number of cells calculated (cells with reusable results are skipped)
    pub cells_calculated: usize,
    /// Number of cells on or depending on a circular reference
    pub circular_references: usize,
    /// Number of calculated cells whose result is an error
    pub errors: usize,
}

/// Extension trait for Sheet to add calculation methods
pub trait SheetCalculationExt {
    /// Calculate all formulas and store their results, with default options
    fn calculate(&mut self) -> Result<CalculationStats>;

    /// Calculate all formulas with custom options
    fn calculate_with_options(&mut self, options: &CalculationOptions) -> Result<CalculationStats>;

    /// Resolved value of a cell by address string (e.g., "B4")
    fn value(&self, address: &str) -> Result<ResolvedValue>;

    /// Resolved value of a cell
    fn value_at(&self, addr: CellAddress) -> ResolvedValue;

    /// Resolved value of a cell with custom options
    fn value_with_options(&self, addr: CellAddress, options: &CalculationOptions)
        -> ResolvedValue;
}

impl SheetCalculationExt for Sheet {
    fn calculate(&mut self) -> Result<CalculationStats> {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(&mut self, options: &CalculationOptions) -> Result<CalculationStats> {
        let mut formula_cells: Vec<CellAddress> =
            self.formula_cells().map(|(addr, _)| addr).collect();
        formula_cells.sort_unstable();

        let (results, stats, edges) = {
            let mut evaluator = Evaluator::new(&*self, options.clone());
            evaluator.evaluate_cells(formula_cells.iter().copied());
            let edges = evaluator.graph.edge_count();
            let results: Vec<(CellAddress, ResolvedValue)> = formula_cells
                .iter()
                .map(|&addr| (addr, evaluator.value(addr)))
                .collect();
            let stats = CalculationStats {
                formula_count: formula_cells.len(),
                ..evaluator.stats().clone()
            };
            (results, stats, edges)
        };

        for (addr, value) in results {
            self.set_formula_result(addr, value)?;
        }

        debug!(
            sheet = self.name(),
            formulas = stats.formula_count,
            calculated = stats.cells_calculated,
            dependencies = edges,
            circular = stats.circular_references,
            errors = stats.errors,
            "sheet calculated"
        );
        Ok(stats)
    }

    fn value(&self, address: &str) -> Result<ResolvedValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr))
    }

    fn value_at(&self, addr: CellAddress) -> ResolvedValue {
        self.value_with_options(addr, &CalculationOptions::default())
    }

    fn value_with_options(
        &self,
        addr: CellAddress,
        options: &CalculationOptions,
    ) -> ResolvedValue {
        Evaluator::new(self, options.clone()).value(addr)
    }
}

/// Guarded, memoizing evaluator over any cell provider
///
/// One evaluator is one evaluation pass: results are memoized until it is
/// dropped, so it must not outlive a mutation of the grid. The borrow of the
/// provider enforces this for [`Sheet`].
pub struct Evaluator<'a, P: CellProvider + ?Sized> {
    provider: &'a P,
    options: CalculationOptions,
    /// Parsed formulas (or their parse errors) collected so far
    formulas: AHashMap<CellAddress, FormulaResult<Formula>>,
    graph: DependencyGraph,
    memo: AHashMap<CellAddress, ResolvedValue>,
    stats: CalculationStats,
}

impl<'a, P: CellProvider + ?Sized> Evaluator<'a, P> {
    /// Create an evaluator reading cells from `provider`
    pub fn new(provider: &'a P, options: CalculationOptions) -> Self {
        Self {
            provider,
            options,
            formulas: AHashMap::new(),
            graph: DependencyGraph::new(),
            memo: AHashMap::new(),
            stats: CalculationStats::default(),
        }
    }

    /// Statistics for the cells evaluated so far
    ///
    /// `formula_count` is left at zero; only the caller knows the grid.
    pub fn stats(&self) -> &CalculationStats {
        &self.stats
    }

    /// Resolved value of a cell, evaluating it (and its precedents) if needed
    pub fn value(&mut self, addr: CellAddress) -> ResolvedValue {
        if let Some(value) = self.memo.get(&addr) {
            return value.clone();
        }
        let provider = self.provider;
        match provider.record(addr) {
            None => ResolvedValue::Empty,
            Some(CellRecord::Literal(text)) => ResolvedValue::from_literal(text),
            Some(CellRecord::Formula { .. }) => {
                self.evaluate_cells([addr]);
                self.memo
                    .get(&addr)
                    .cloned()
                    .unwrap_or(ResolvedValue::Error(CellError::Formula))
            }
        }
    }

    /// Evaluate every formula cell reachable from `roots`
    pub fn evaluate_cells<I>(&mut self, roots: I)
    where
        I: IntoIterator<Item = CellAddress>,
    {
        let roots: Vec<CellAddress> = roots.into_iter().collect();
        self.collect(&roots);

        let plan = self.graph.plan(roots);
        for &cell in &plan.order {
            if self.memo.contains_key(&cell) {
                continue;
            }

            let value = if plan.is_circular(cell) {
                warn!(cell = %cell, "circular reference");
                self.stats.circular_references += 1;
                ResolvedValue::Error(CellError::CircularReference)
            } else {
                match self.formulas.get(&cell) {
                    Some(Ok(formula)) => {
                        let mut lookup = MemoLookup {
                            provider: self.provider,
                            memo: &self.memo,
                            max_range_cells: self.options.max_range_cells,
                        };
                        evaluate(formula, &mut lookup).unwrap_or_else(|e| {
                            debug!(cell = %cell, error = %e, "formula evaluation failed");
                            ResolvedValue::Error(CellError::Formula)
                        })
                    }
                    Some(Err(_)) => ResolvedValue::Error(CellError::Formula),
                    None => continue,
                }
            };

            trace!(cell = %cell, value = %value, "evaluated");
            self.stats.cells_calculated += 1;
            if value.is_error() {
                self.stats.errors += 1;
            }
            self.memo.insert(cell, value);
        }
    }

    /// Parse every formula reachable from `roots` and record the formula
    /// cells each one reads in the dependency graph
    fn collect(&mut self, roots: &[CellAddress]) {
        let provider = self.provider;
        let mut pending: Vec<CellAddress> = roots.to_vec();
        let mut seen: AHashSet<CellAddress> = AHashSet::new();

        while let Some(cell) = pending.pop() {
            if !seen.insert(cell)
                || self.memo.contains_key(&cell)
                || self.formulas.contains_key(&cell)
            {
                continue;
            }
            let Some(CellRecord::Formula { text, cached_value }) = provider.record(cell) else {
                continue;
            };

            if self.options.use_cached_results {
                if let Some(value) = cached_value {
                    self.memo.insert(cell, value.clone());
                    continue;
                }
            }

            let parsed = parse_formula(text);
            match &parsed {
                Ok(formula) => {
                    for range in formula.references() {
                        // An oversized range fails at evaluation before any cell is read
                        if check_size(&range, self.options.max_range_cells).is_err() {
                            continue;
                        }
                        for precedent in range.cells() {
                            if provider.record(precedent).is_some_and(CellRecord::is_formula) {
                                self.graph.add_dependency(precedent, cell);
                                pending.push(precedent);
                            }
                        }
                    }
                }
                Err(e) => {
                    debug!(cell = %cell, formula = %text, error = %e, "formula failed to parse")
                }
            }
            self.formulas.insert(cell, parsed);
        }
    }
}

/// Read-only view of the memo table handed to formula evaluation
struct MemoLookup<'m, P: CellProvider + ?Sized> {
    provider: &'m P,
    memo: &'m AHashMap<CellAddress, ResolvedValue>,
    max_range_cells: usize,
}

impl<P: CellProvider + ?Sized> ValueLookup for MemoLookup<'_, P> {
    fn value(&mut self, addr: CellAddress) -> ResolvedValue {
        if let Some(value) = self.memo.get(&addr) {
            return value.clone();
        }
        match self.provider.record(addr) {
            None => ResolvedValue::Empty,
            Some(CellRecord::Literal(text)) => ResolvedValue::from_literal(text),
            // Precedents are evaluated first, so this is never reached
            Some(CellRecord::Formula { .. }) => {
                warn!(cell = %addr, "formula read before it was evaluated");
                ResolvedValue::Error(CellError::Formula)
            }
        }
    }

    fn max_range_cells(&self) -> usize {
        self.max_range_cells
    }
}
