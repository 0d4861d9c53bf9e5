//! Tests for formula evaluation with cell references

use gridcalc::prelude::*;
use gridcalc::{expand_range, resolve};
use pretty_assertions::assert_eq;

fn sheet(cells: &[(&str, &str)]) -> Sheet {
    let mut sheet = Sheet::new("Sheet1");
    for (address, input) in cells {
        sheet.set_cell_value(address, input).unwrap();
    }
    sheet
}

fn value(sheet: &Sheet, address: &str) -> ResolvedValue {
    sheet.value(address).unwrap()
}

fn number(n: f64) -> ResolvedValue {
    ResolvedValue::Number(n)
}

/// The sample sheet: names, scores, teams and a total
fn demo_sheet() -> Sheet {
    sheet(&[
        ("A1", "Name"),
        ("B1", "Score"),
        ("C1", "Team"),
        ("A2", "John"),
        ("B2", "30"),
        ("C2", "Red"),
        ("A3", "Alice"),
        ("B3", "25"),
        ("C3", "Blue"),
        ("A4", "Total"),
        ("B4", "=SUM(B2:B3)"),
    ])
}

#[test]
fn test_sum_of_range() {
    let sheet = demo_sheet();
    assert_eq!(value(&sheet, "B4"), number(55.0));
    assert_eq!(value(&sheet, "B4").to_string(), "55");
}

#[test]
fn test_sumif_with_sum_range() {
    let sheet = sheet(&[
        ("A1", "5"),
        ("A2", "15"),
        ("A3", "20"),
        ("B1", "1"),
        ("B2", "2"),
        ("B3", "3"),
        ("C1", "=SUMIF(A1:A3, \">10\", B1:B3)"),
    ]);
    assert_eq!(value(&sheet, "C1"), number(5.0));
}

#[test]
fn test_sumif_without_sum_range() {
    let sheet = sheet(&[
        ("A1", "5"),
        ("A2", "15"),
        ("A3", "20"),
        ("C1", "=SUMIF(A1:A3, \">10\")"),
    ]);
    assert_eq!(value(&sheet, "C1"), number(35.0));
}

#[test]
fn test_sumif_reads_formula_cells() {
    let sheet = sheet(&[
        ("A1", "=2*3"),
        ("A2", "=A1*2"),
        ("B1", "=SUMIF(A1:A2, \"<10\")"),
    ]);
    assert_eq!(value(&sheet, "B1"), number(6.0));
}

#[test]
fn test_arithmetic_precedence() {
    let sheet = sheet(&[("A1", "=2+3*4"), ("A2", "=(2+3)*4")]);
    assert_eq!(value(&sheet, "A1"), number(14.0));
    assert_eq!(value(&sheet, "A2"), number(20.0));
}

#[test]
fn test_negative_reference() {
    let sheet = sheet(&[("A1", "-3"), ("B1", "=A1*2"), ("C1", "=10-A1")]);
    assert_eq!(value(&sheet, "B1"), number(-6.0));
    assert_eq!(value(&sheet, "C1"), number(13.0));
}

#[test]
fn test_empty_cell_is_empty() {
    let sheet = demo_sheet();
    assert_eq!(value(&sheet, "Z99"), ResolvedValue::Empty);
    assert_eq!(value(&sheet, "Z99").to_string(), "");
}

#[test]
fn test_literals_resolve_to_themselves() {
    let sheet = demo_sheet();
    assert_eq!(value(&sheet, "A2"), ResolvedValue::Text("John".into()));
    assert_eq!(value(&sheet, "B2"), number(30.0));
}

#[test]
fn test_malformed_formulas_are_errors() {
    let sheet = sheet(&[
        ("A1", "=SUM("),
        ("A2", "=SUMIF(B1:B3)"),
        ("A3", "=SUMIF(B1:B3, \">1\", C1:C3, D1)"),
        ("A4", "=1/0"),
        ("A5", "=2+"),
        ("A6", "=SUM(B1:)"),
    ]);
    for address in ["A1", "A2", "A3", "A4", "A5", "A6"] {
        assert_eq!(
            value(&sheet, address),
            ResolvedValue::Error(CellError::Formula),
            "{} should be an error",
            address
        );
        assert_eq!(value(&sheet, address).to_string(), "#ERROR!");
    }
}

#[test]
fn test_error_is_distinct_from_error_text() {
    let sheet = sheet(&[("A1", "#ERROR!"), ("A2", "=SUM(")]);
    assert_eq!(value(&sheet, "A1"), ResolvedValue::Text("#ERROR!".into()));
    assert!(value(&sheet, "A2").is_error());
}

#[test]
fn test_error_cells_count_as_zero() {
    let sheet = sheet(&[("A1", "=SUM("), ("A2", "=A1+1")]);
    assert_eq!(value(&sheet, "A2"), number(1.0));
}

#[test]
fn test_idempotent_reads() {
    let sheet = demo_sheet();
    let first = value(&sheet, "B4");
    let second = value(&sheet, "B4");
    assert_eq!(first, second);
    assert_eq!(
        sheet.value_with_options(CellAddress::parse("B4").unwrap(), &CalculationOptions::uncached()),
        first
    );
}

#[test]
fn test_range_expansion_order() {
    let cells: Vec<String> = expand_range("A1:B2")
        .unwrap()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(cells, vec!["A1", "A2", "B1", "B2"]);
}

#[test]
fn test_reversed_range() {
    assert_eq!(expand_range("B2:A1").unwrap(), expand_range("A1:B2").unwrap());

    let sheet = sheet(&[("A1", "1"), ("A2", "2"), ("A3", "=SUM(A2:A1)")]);
    assert_eq!(value(&sheet, "A3"), number(3.0));
}

#[test]
fn test_circular_references() {
    let sheet = sheet(&[
        ("A1", "=B1"),
        ("B1", "=A1"),
        ("C1", "=A1+1"),
        ("D1", "=5*2"),
        ("E1", "=E1"),
    ]);
    let circular = ResolvedValue::Error(CellError::CircularReference);
    assert_eq!(value(&sheet, "A1"), circular);
    assert_eq!(value(&sheet, "B1"), circular);
    assert_eq!(value(&sheet, "C1"), circular);
    assert_eq!(value(&sheet, "E1"), circular);
    assert_eq!(value(&sheet, "A1").to_string(), "#CIRCULAR!");
    assert_eq!(value(&sheet, "D1"), number(10.0));
}

#[test]
fn test_circular_reference_through_range() {
    let sheet = sheet(&[("A1", "1"), ("A2", "=SUM(A1:A3)"), ("A3", "=A2")]);
    assert!(value(&sheet, "A2").is_error());
    assert_eq!(value(&sheet, "A1"), number(1.0));
}

#[test]
fn test_long_reference_chain() {
    let mut sheet = Sheet::new("Sheet1");
    sheet.set_cell_value("A1", "1").unwrap();
    for row in 2..=5000 {
        sheet
            .set_cell_value(&format!("A{}", row), &format!("=A{}+1", row - 1))
            .unwrap();
    }

    assert_eq!(value(&sheet, "A5000"), number(5000.0));

    let stats = sheet.calculate().unwrap();
    assert_eq!(stats.formula_count, 4999);
    assert_eq!(stats.errors, 0);
}

#[test]
fn test_calculate_stores_results() {
    let mut sheet = demo_sheet();
    let stats = sheet.calculate().unwrap();

    assert_eq!(stats.formula_count, 1);
    assert_eq!(stats.cells_calculated, 1);
    let b4 = CellAddress::parse("B4").unwrap();
    assert_eq!(sheet.cell_at(b4).unwrap().cached_value(), Some(&number(55.0)));
}

#[test]
fn test_mutation_invalidates_results() {
    let mut sheet = demo_sheet();
    sheet.calculate().unwrap();
    assert!(sheet.has_formula_results());

    sheet.set_cell_value("B3", "70").unwrap();
    assert!(!sheet.has_formula_results());
    assert_eq!(value(&sheet, "B4"), number(100.0));

    sheet.calculate().unwrap();
    sheet.clear_cell("B2").unwrap();
    assert_eq!(value(&sheet, "B4"), number(70.0));
}

#[test]
fn test_resolve_with_closure_lookup() {
    let sheet = demo_sheet();
    let mut lookup = |addr: CellAddress| sheet.value_at(addr);
    assert_eq!(resolve("=B4*2", &mut lookup), number(110.0));
    assert_eq!(resolve("=SUMIF(B2:B4, \">40\")", &mut lookup), number(55.0));
    assert_eq!(resolve("Total", &mut lookup), ResolvedValue::Text("Total".into()));
}

#[test]
fn test_case_insensitive_function_names() {
    let sheet = sheet(&[
        ("A1", "1"),
        ("A2", "2"),
        ("B1", "=sum(A1:A2)"),
        ("B2", "=SumIf(A1:A2, \">1\")"),
    ]);
    assert_eq!(value(&sheet, "B1"), number(3.0));
    assert_eq!(value(&sheet, "B2"), number(2.0));
}

#[test]
fn test_large_sheet_invalidated_after_calculate() {
    let mut sheet = Sheet::new("Sheet1");
    for row in 0..20_000 {
        sheet.set_cell_value_at(CellAddress::new(row, 0), "=1+1");
    }
    sheet.set_cell_value("B1", "=SUM(A1:A20000)").unwrap();

    let stats = sheet.calculate().unwrap();
    assert_eq!(stats.formula_count, 20_001);
    assert!(sheet.has_formula_results());
    assert_eq!(value(&sheet, "B1"), number(40_000.0));

    sheet.set_cell_value("A1", "5").unwrap();
    assert!(!sheet.has_formula_results());
    assert_eq!(sheet.cell("B1").unwrap().unwrap().cached_value(), None);
    assert_eq!(value(&sheet, "B1"), number(40_003.0));
}

#[test]
fn test_unregistered_function_names_are_skipped() {
    let sheet = sheet(&[("B2", "7")]);
    let mut lookup = |addr: CellAddress| sheet.value_at(addr);
    assert_eq!(resolve("=FOO(1)", &mut lookup), number(1.0));
    assert_eq!(resolve("=AVERAGE(B2)", &mut lookup), number(7.0));
    assert_eq!(resolve("=MAX(B2)*2", &mut lookup), number(14.0));
}
