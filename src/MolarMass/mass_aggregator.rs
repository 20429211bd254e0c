//! Turns element counts into molar mass, per-element subtotals and mass percentages.
//!
//! Subtotals are summed in ascending symbol order and nothing is rounded, so the same tally
//! always gives a bit-identical result.
use super::evaluator::ElementTally;
use super::formula_error::FormulaError;
use super::periodic_table::PeriodicTable;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

/// contribution of one element to the molar mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub element: String,
    pub atom_count: u64,
    /// g/mol
    pub atomic_weight: f64,
    /// atom_count * atomic_weight, g/mol
    pub subtotal_mass: f64,
    /// share of the total molar mass, %
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// molar mass, g/mol
    pub total_weight: f64,
    /// sorted by element symbol
    pub breakdown: Vec<BreakdownEntry>,
}

impl CalculationResult {
    pub fn atom_count(&self, element: &str) -> Option<u64> {
        self.breakdown
            .iter()
            .find(|e| e.element == element)
            .map(|e| e.atom_count)
    }

    /// breakdown as a table with values rounded to `decimal_places`
    pub fn to_table(&self, decimal_places: usize) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Element"),
            Cell::new("Atoms"),
            Cell::new("Atomic weight, g/mol"),
            Cell::new("Mass, g/mol"),
            Cell::new("Mass, %"),
        ]));
        for entry in &self.breakdown {
            table.add_row(Row::new(vec![
                Cell::new(&entry.element),
                Cell::new(&entry.atom_count.to_string()),
                Cell::new(&format!("{:.*}", decimal_places, entry.atomic_weight)),
                Cell::new(&format!("{:.*}", decimal_places, entry.subtotal_mass)),
                Cell::new(&format!("{:.*}", decimal_places, entry.percentage)),
            ]));
        }
        table.add_row(Row::new(vec![
            Cell::new("Total"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(&format!("{:.*}", decimal_places, self.total_weight)),
            Cell::new(&format!("{:.*}", decimal_places, 100.0)),
        ]));
        table
    }

    pub fn pretty_print(&self, decimal_places: usize) {
        self.to_table(decimal_places).printstd();
    }
}

/// weighs every element of the tally
pub fn aggregate(
    tally: &ElementTally,
    table: &PeriodicTable,
) -> Result<CalculationResult, FormulaError> {
    let mut breakdown = Vec::with_capacity(tally.len());
    let mut total_weight = 0.0;
    // BTreeMap iteration is already sorted by symbol
    for (element, &atom_count) in tally {
        let atomic_weight =
            table
                .atomic_weight(element)
                .ok_or_else(|| FormulaError::UnknownElement {
                    symbol: element.clone(),
                })?;
        let subtotal_mass = atom_count as f64 * atomic_weight;
        total_weight += subtotal_mass;
        breakdown.push(BreakdownEntry {
            element: element.clone(),
            atom_count,
            atomic_weight,
            subtotal_mass,
            percentage: 0.0,
        });
    }
    if breakdown.is_empty() || total_weight == 0.0 {
        return Err(FormulaError::EmptyFormula);
    }
    for entry in &mut breakdown {
        entry.percentage = entry.subtotal_mass / total_weight * 100.0;
    }
    Ok(CalculationResult {
        total_weight,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tally(pairs: &[(&str, u64)]) -> ElementTally {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn test_aggregate_water() {
        let table = PeriodicTable::standard();
        let result = aggregate(&tally(&[("H", 2), ("O", 1)]), &table).unwrap();
        assert_relative_eq!(result.total_weight, 18.015, epsilon = 1e-3);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].element, "H");
        assert_eq!(result.breakdown[0].subtotal_mass, 2.0 * 1.008);
        assert_relative_eq!(result.breakdown[0].percentage, 11.19, epsilon = 1e-2);
        assert_relative_eq!(result.breakdown[1].percentage, 88.81, epsilon = 1e-2);
        assert_eq!(result.atom_count("O"), Some(1));
        assert_eq!(result.atom_count("C"), None);
    }

    #[test]
    fn test_aggregate_custom_table() {
        let table = PeriodicTable::from_json_str(r#"{"A": 1.0, "B": 3.0}"#).unwrap();
        let result = aggregate(&tally(&[("B", 1), ("A", 1)]), &table).unwrap();
        assert_eq!(result.total_weight, 4.0);
        assert_eq!(result.breakdown[0].element, "A");
        assert_eq!(result.breakdown[0].percentage, 25.0);
        assert_eq!(result.breakdown[1].percentage, 75.0);
    }

    #[test]
    fn test_empty_tally() {
        let table = PeriodicTable::standard();
        assert_eq!(
            aggregate(&ElementTally::new(), &table),
            Err(FormulaError::EmptyFormula)
        );
    }

    #[test]
    fn test_element_missing_from_table() {
        let table = PeriodicTable::from_json_str(r#"{"H": 1.008}"#).unwrap();
        assert_eq!(
            aggregate(&tally(&[("H", 2), ("O", 1)]), &table),
            Err(FormulaError::UnknownElement {
                symbol: "O".to_string()
            })
        );
    }

    #[test]
    fn test_table_rendering() {
        let table = PeriodicTable::standard();
        let result = aggregate(&tally(&[("H", 2), ("O", 1)]), &table).unwrap();
        let rendered = result.to_table(3).to_string();
        assert!(rendered.contains("Element"));
        assert!(rendered.contains("18.015"));
        assert!(rendered.contains("100.000"));
        assert_eq!(result.to_table(3).len(), 4);
    }
}
