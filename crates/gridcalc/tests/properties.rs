// Property-based tests for range expansion and formula evaluation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use gridcalc::{
    evaluate_arithmetic, expand_range, resolve, CellAddress, ResolvedValue, Sheet,
    SheetCalculationExt,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn address() -> impl Strategy<Value = CellAddress> {
    (0u32..40, 0u8..8).prop_map(|(row, col)| CellAddress::new(row, col))
}

/// Small non-negative integers keep float sums exact
fn literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        "[a-z]{1,6}",
        Just(String::new()),
    ]
}

fn grid() -> impl Strategy<Value = Vec<(CellAddress, String)>> {
    prop::collection::vec((address(), literal()), 0..40)
}

fn build(cells: &[(CellAddress, String)]) -> Sheet {
    let mut sheet = Sheet::new("Sheet1");
    for (addr, input) in cells {
        sheet.set_cell_value_at(*addr, input);
    }
    sheet
}

fn number_of(sheet: &Sheet, addr: CellAddress) -> f64 {
    sheet.value_at(addr).to_number_or_zero()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn range_expansion_is_column_major(a in address(), b in address()) {
        let range = a.to(b);
        let cells = expand_range(&range.to_string()).unwrap();

        prop_assert_eq!(cells.len() as u64, range.cell_count());
        for pair in cells.windows(2) {
            let (x, y) = (pair[0], pair[1]);
            prop_assert!((x.col, x.row) < (y.col, y.row));
        }
        prop_assert!(cells.iter().all(|c| range.contains(c)));
    }

    #[test]
    fn reversed_range_expands_like_forward(a in address(), b in address()) {
        let forward = format!("{}:{}", a, b);
        let backward = format!("{}:{}", b, a);
        prop_assert_eq!(expand_range(&forward).unwrap(), expand_range(&backward).unwrap());
    }

    #[test]
    fn sum_matches_manual_total(cells in grid(), a in address(), b in address()) {
        let mut sheet = build(&cells);
        let target = CellAddress::new(100, 25);
        let range = a.to(b);
        sheet.set_cell_formula_at(target, &format!("=SUM({})", range));

        let expected: f64 = range.cells().map(|c| number_of(&sheet, c)).sum();
        prop_assert_eq!(sheet.value_at(target), ResolvedValue::Number(expected));
    }

    #[test]
    fn sumif_matches_manual_filter(
        cells in grid(),
        threshold in 0u32..1000,
        greater in any::<bool>(),
        col in 0u8..7,
    ) {
        let mut sheet = build(&cells);
        let target = CellAddress::new(100, 25);
        let range = CellAddress::new(0, col).to(CellAddress::new(39, col));
        let sum_range = CellAddress::new(0, col + 1).to(CellAddress::new(39, col + 1));
        let op = if greater { '>' } else { '<' };
        sheet.set_cell_formula_at(
            target,
            &format!("=SUMIF({}, \"{}{}\", {})", range, op, threshold, sum_range),
        );

        let threshold = f64::from(threshold);
        let expected: f64 = range
            .cells()
            .zip(sum_range.cells())
            .filter_map(|(r, s)| {
                let r = sheet.value_at(r).as_number()?;
                let s = match sheet.value_at(s) {
                    ResolvedValue::Empty => 0.0,
                    other => other.as_number()?,
                };
                let hit = if greater { r > threshold } else { r < threshold };
                hit.then_some(s)
            })
            .sum();
        prop_assert_eq!(sheet.value_at(target), ResolvedValue::Number(expected));
    }

    #[test]
    fn resolving_twice_is_idempotent(cells in grid(), a in address(), b in address()) {
        let sheet = build(&cells);
        let mut lookup = |addr: CellAddress| sheet.value_at(addr);
        for formula in [format!("=SUM({})", a.to(b)), format!("=({}+{})*2-{}", a, b, a)] {
            let first = resolve(&formula, &mut lookup);
            let second = resolve(&formula, &mut lookup);
            prop_assert!(!first.is_error());
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn calculate_agrees_with_direct_reads(cells in grid(), a in address(), b in address()) {
        let mut sheet = build(&cells);
        sheet.set_cell_formula_at(CellAddress::new(100, 0), &format!("=SUM({})", a.to(b)));
        sheet.set_cell_formula_at(CellAddress::new(101, 0), &format!("={}+A101", a));

        let before: Vec<_> = [100, 101]
            .iter()
            .map(|&row| sheet.value_at(CellAddress::new(row, 0)))
            .collect();
        sheet.calculate().unwrap();
        let after: Vec<_> = [100, 101]
            .iter()
            .map(|&row| sheet.value_at(CellAddress::new(row, 0)))
            .collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn arithmetic_agrees_with_direct_computation(
        a in 0u32..1000,
        b in 0u32..1000,
        c in 1u32..1000,
    ) {
        let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(evaluate_arithmetic(&format!("{} + {} * {}", a, b, c)).unwrap(), fa + fb * fc);
        prop_assert_eq!(evaluate_arithmetic(&format!("({} + {}) * {}", a, b, c)).unwrap(), (fa + fb) * fc);
        prop_assert_eq!(evaluate_arithmetic(&format!("{} - {} / {}", a, b, c)).unwrap(), fa - fb / fc);
    }
}
