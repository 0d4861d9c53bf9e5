//! Built-in functions

pub mod criteria;
pub mod math;

use ahash::AHashMap;
use std::sync::OnceLock;

use crate::error::{FormulaError, FormulaResult};

static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The shared registry of built-in functions
pub fn registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Which formula variant a function call parses into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Sum,
    SumIf,
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Argument hint shown to users, e.g. `SUMIF(range, criteria, [sum_range])`
    pub signature: &'static str,
    /// One-line description
    pub description: &'static str,
    pub kind: FunctionKind,
}

impl FunctionDef {
    /// Check an argument count against the arity bounds
    pub fn check_arity(&self, actual: usize) -> FormulaResult<()> {
        let too_few = actual < self.min_args;
        let too_many = self.max_args.is_some_and(|max| actual > max);
        if too_few || too_many {
            let expected = match self.max_args {
                Some(max) if max == self.min_args => max.to_string(),
                Some(max) => format!("{} to {}", self.min_args, max),
                None => format!("at least {}", self.min_args),
            };
            return Err(FormulaError::ArgumentCount {
                function: self.name.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register(FunctionDef {
            name: "SUM",
            min_args: 1,
            max_args: None,
            signature: "SUM(value1, [value2], ...)",
            description: "Adds numbers, cell references and ranges",
            kind: FunctionKind::Sum,
        });

        registry.register(FunctionDef {
            name: "SUMIF",
            min_args: 2,
            max_args: Some(3),
            signature: "SUMIF(range, criteria, [sum_range])",
            description: "Adds the cells that meet a numeric comparison",
            kind: FunctionKind::SumIf,
        });

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// All registered functions, sorted by name
    pub fn functions(&self) -> Vec<&FunctionDef> {
        let mut defs: Vec<_> = self.functions.values().collect();
        defs.sort_by_key(|def| def.name);
        defs
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
