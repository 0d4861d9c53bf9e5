//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationStats,
    // Cell types
    CellAddress,
    CellError,
    CellRange,
    CellRecord,
    // Error types
    Error,
    ResolvedValue,
    Result,
    // Main types
    Sheet,
    // Extension traits
    SheetCalculationExt,
    ValueLookup,
};
