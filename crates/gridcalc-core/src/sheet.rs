//! Sheet type: the host grid

use ahash::AHashMap;

use crate::cell::{CellAddress, CellRange, CellRecord, ResolvedValue};
use crate::error::{Error, Result};

/// Read access to stored cell records
///
/// This is the only view of the grid the formula engine needs.
pub trait CellProvider {
    /// Get the record stored at an address (`None` for an empty cell)
    fn record(&self, addr: CellAddress) -> Option<&CellRecord>;
}

impl CellProvider for AHashMap<CellAddress, CellRecord> {
    fn record(&self, addr: CellAddress) -> Option<&CellRecord> {
        self.get(&addr)
    }
}

/// A sparse grid of cells
///
/// Every mutation clears the formula results stored by the last
/// calculation, since any of them may depend on the changed cell.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: AHashMap<CellAddress, CellRecord>,
    /// Set while any formula record holds a cached result
    results_stored: bool,
}

impl Sheet {
    /// Create a new, empty sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: AHashMap::new(),
            results_stored: false,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell record by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellRecord>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(&addr))
    }

    /// Get a cell record by address
    pub fn cell_at(&self, addr: CellAddress) -> Option<&CellRecord> {
        self.cells.get(&addr)
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell holds anything
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all non-empty cells, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &CellRecord)> + '_ {
        self.cells.iter().map(|(addr, record)| (*addr, record))
    }

    /// Iterate over all formula cells, in no particular order
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellAddress, &str)> + '_ {
        self.cells
            .iter()
            .filter_map(|(addr, record)| record.formula_text().map(|text| (*addr, text)))
    }

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let mut addrs = self.cells.keys();
        let first = *addrs.next()?;
        let (start, end) = addrs.fold((first, first), |(start, end), addr| {
            (
                CellAddress::new(start.row.min(addr.row), start.col.min(addr.col)),
                CellAddress::new(end.row.max(addr.row), end.col.max(addr.col)),
            )
        });
        Some(CellRange::new(start, end))
    }

    // === Cell Modification ===

    /// Set a cell from input text by address string
    ///
    /// Text starting with `=` becomes a formula, other text a literal;
    /// empty text clears the cell.
    pub fn set_cell_value(&mut self, address: &str, input: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr, input);
        Ok(())
    }

    /// Set a cell from input text by address
    pub fn set_cell_value_at(&mut self, addr: CellAddress, input: &str) {
        match CellRecord::from_input(input) {
            Some(record) => {
                self.cells.insert(addr, record);
            }
            None => {
                self.cells.remove(&addr);
            }
        }
        self.invalidate_results();
    }

    /// Set a numeric literal by address string
    pub fn set_cell_number(&mut self, address: &str, value: f64) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr, &ResolvedValue::Number(value).to_string());
        Ok(())
    }

    /// Set a cell formula by address string
    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_formula_at(addr, formula);
        Ok(())
    }

    /// Set a cell formula by address
    pub fn set_cell_formula_at(&mut self, addr: CellAddress, formula: &str) {
        // Ensure formula starts with '='
        let formula = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        };

        self.cells.insert(addr, CellRecord::formula(formula));
        self.invalidate_results();
    }

    /// Clear a cell
    pub fn clear_cell(&mut self, address: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.clear_cell_at(addr);
        Ok(())
    }

    /// Clear a cell by address
    pub fn clear_cell_at(&mut self, addr: CellAddress) {
        if self.cells.remove(&addr).is_some() {
            self.invalidate_results();
        }
    }

    // === Calculation results ===

    /// Store the calculated result of a formula cell
    ///
    /// This does not count as a mutation: other stored results stay valid.
    pub fn set_formula_result(&mut self, addr: CellAddress, value: ResolvedValue) -> Result<()> {
        match self.cells.get_mut(&addr) {
            Some(CellRecord::Formula { cached_value, .. }) => {
                *cached_value = Some(value);
                self.results_stored = true;
                Ok(())
            }
            _ => Err(Error::NoFormula(addr.to_string())),
        }
    }

    /// Check whether any formula result is currently stored
    pub fn has_formula_results(&self) -> bool {
        self.results_stored
    }

    /// Clear stored results; a no-op unless a calculation stored some
    fn invalidate_results(&mut self) {
        if !std::mem::take(&mut self.results_stored) {
            return;
        }
        for record in self.cells.values_mut() {
            if let CellRecord::Formula { cached_value, .. } = record {
                *cached_value = None;
            }
        }
    }
}

impl CellProvider for Sheet {
    fn record(&self, addr: CellAddress) -> Option<&CellRecord> {
        self.cell_at(addr)
    }
}
