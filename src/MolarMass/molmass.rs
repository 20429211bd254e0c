//! Module to calculate the atomic composition and molar mass of a chemical formula
//!
//! string -> tokenizer -> parser -> evaluator -> mass aggregator. Each stage returns a
//! `Result`, the first error is returned unchanged.
use super::chemical_groups::ChemicalGroups;
use super::evaluator::{ElementTally, Evaluator};
use super::formula_error::FormulaError;
use super::mass_aggregator::{CalculationResult, aggregate};
use super::parser::get_ast;
use super::periodic_table::{PeriodicTable, periodic_table};
use log::{info, warn};
use nalgebra::DMatrix;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// phase marks (g), (l), (s), (c), (aq) at the end of a formula. (S) and (C) are sulfur and
// carbon, only (G) and (L) are accepted in upper case
static PHASE_MARK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:[glscGL]|aq)\)$").expect("phase mark pattern is a valid regex")
});

/// removes one trailing phase mark: "H2O(g)" -> "H2O". Only the tail is cut, so positions
/// reported for the rest of the formula stay valid
pub fn strip_phase_mark(formula: &str) -> &str {
    match PHASE_MARK_REGEX.find(formula) {
        Some(m) => &formula[..m.start()],
        None => formula,
    }
}

/// molar mass and element breakdown of `formula` using the process-wide periodic table
pub fn calculate_molecular_weight(formula: &str) -> Result<CalculationResult, FormulaError> {
    calculate_molecular_weight_with(formula, periodic_table())
}

/// same as `calculate_molecular_weight` against an explicit table
pub fn calculate_molecular_weight_with(
    formula: &str,
    table: &PeriodicTable,
) -> Result<CalculationResult, FormulaError> {
    MolarMassCalculator::new(table).calculate(formula)
}

/// element composition of `formula`, e.g. "Na(NO3)2" -> {"N": 2, "Na": 1, "O": 6}
pub fn parse_formula(formula: &str) -> Result<ElementTally, FormulaError> {
    MolarMassCalculator::new(periodic_table()).composition(formula)
}

/// molar masses of a vector of chemical formulas, one result per formula
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
) -> Vec<Result<f64, FormulaError>> {
    MolarMassCalculator::new(periodic_table()).calculate_many(vec_of_formulae)
}

/// matrix of atom counts: row i is substance i, columns are the elements (alphabetical)
pub fn create_elem_composition_matrix(
    vec_of_formulae: &[&str],
) -> Result<(DMatrix<f64>, Vec<String>), FormulaError> {
    MolarMassCalculator::new(periodic_table()).composition_matrix(vec_of_formulae)
}

/// binds a periodic table with optional group abbreviations and phase-mark handling
#[derive(Debug, Clone)]
pub struct MolarMassCalculator<'a> {
    table: &'a PeriodicTable,
    groups: Option<&'a ChemicalGroups>,
    strip_phase_marks: bool,
}

impl<'a> MolarMassCalculator<'a> {
    pub fn new(table: &'a PeriodicTable) -> Self {
        Self {
            table,
            groups: None,
            strip_phase_marks: false,
        }
    }

    pub fn with_groups(mut self, groups: &'a ChemicalGroups) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn strip_phase_marks(mut self, strip: bool) -> Self {
        self.strip_phase_marks = strip;
        self
    }

    pub fn table(&self) -> &PeriodicTable {
        self.table
    }

    pub fn composition(&self, formula: &str) -> Result<ElementTally, FormulaError> {
        let formula = if self.strip_phase_marks {
            strip_phase_mark(formula)
        } else {
            formula
        };
        let ast = get_ast(formula)?;
        let mut evaluator = Evaluator::new(self.table);
        if let Some(groups) = self.groups {
            evaluator = evaluator.with_groups(groups);
        }
        evaluator.evaluate(&ast)
    }

    pub fn calculate(&self, formula: &str) -> Result<CalculationResult, FormulaError> {
        let tally = self.composition(formula)?;
        aggregate(&tally, self.table)
    }

    pub fn calculate_many(&self, vec_of_formulae: &[&str]) -> Vec<Result<f64, FormulaError>> {
        info!("calculating molar masses of {} substances", vec_of_formulae.len());
        vec_of_formulae
            .iter()
            .map(|formula| {
                let result = self.calculate(formula).map(|r| r.total_weight);
                if let Err(e) = &result {
                    warn!("failed to calculate molar mass of {}: {}", formula, e);
                }
                result
            })
            .collect()
    }

    pub fn composition_matrix(
        &self,
        vec_of_formulae: &[&str],
    ) -> Result<(DMatrix<f64>, Vec<String>), FormulaError> {
        let compositions = vec_of_formulae
            .iter()
            .map(|formula| self.composition(formula))
            .collect::<Result<Vec<_>, _>>()?;
        let elements: Vec<String> = compositions
            .iter()
            .flat_map(|c| c.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut matrix = DMatrix::zeros(compositions.len(), elements.len());
        for (i, composition) in compositions.iter().enumerate() {
            for (j, element) in elements.iter().enumerate() {
                if let Some(count) = composition.get(element) {
                    matrix[(i, j)] = *count as f64;
                }
            }
        }
        info!(
            "element composition matrix {}x{} created",
            matrix.nrows(),
            matrix.ncols()
        );
        Ok((matrix, elements))
    }
}
