//! Folds a parsed formula into element counts.
//!
//! The walk is depth first and carries the product of all enclosing multipliers, so
//! `Ca3(PO4)2` yields 3 Ca, 2 P and 8 O. The hydration term is folded into the same tally,
//! scaled by its own multiplier. Symbols are checked against the periodic table here, the
//! first unknown one aborts the evaluation.
use super::chemical_groups::ChemicalGroups;
use super::formula_error::FormulaError;
use super::parser::{Formula, FormulaNode};
use super::periodic_table::PeriodicTable;
use std::collections::BTreeMap;

/// element symbol -> total number of atoms, alphabetical
pub type ElementTally = BTreeMap<String, u64>;

pub struct Evaluator<'a> {
    table: &'a PeriodicTable,
    groups: Option<&'a ChemicalGroups>,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a PeriodicTable) -> Self {
        Evaluator {
            table,
            groups: None,
        }
    }

    pub fn with_groups(mut self, groups: &'a ChemicalGroups) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn evaluate(&self, formula: &Formula) -> Result<ElementTally, FormulaError> {
        let mut tally = ElementTally::new();
        self.visit(&formula.main, 1, &mut tally)?;
        if let Some(hydration) = &formula.hydration {
            self.visit(hydration, 1, &mut tally)?;
        }
        Ok(tally)
    }

    fn visit(
        &self,
        node: &FormulaNode,
        multiplier: u64,
        tally: &mut ElementTally,
    ) -> Result<(), FormulaError> {
        match node {
            FormulaNode::Atom { element, count } => {
                let n = scale(*count, multiplier, element)?;
                if self.table.contains(element) {
                    add(tally, element, n)
                } else if let Some(composition) = self.groups.and_then(|g| g.get(element)) {
                    for (symbol, k) in composition {
                        add(tally, symbol, scale(*k, n, symbol)?)?;
                    }
                    Ok(())
                } else {
                    Err(FormulaError::UnknownElement {
                        symbol: element.clone(),
                    })
                }
            }
            FormulaNode::Group {
                children,
                multiplier: m,
            } => {
                let inner = multiplier
                    .checked_mul(u64::from(*m))
                    .ok_or_else(|| overflow_in(children))?;
                for child in children {
                    self.visit(child, inner, tally)?;
                }
                Ok(())
            }
        }
    }
}

fn scale(count: u32, multiplier: u64, symbol: &str) -> Result<u64, FormulaError> {
    u64::from(count)
        .checked_mul(multiplier)
        .ok_or_else(|| FormulaError::CountOverflow {
            symbol: symbol.to_string(),
        })
}

fn add(tally: &mut ElementTally, symbol: &str, n: u64) -> Result<(), FormulaError> {
    let entry = tally.entry(symbol.to_string()).or_insert(0);
    *entry = entry
        .checked_add(n)
        .ok_or_else(|| FormulaError::CountOverflow {
            symbol: symbol.to_string(),
        })?;
    Ok(())
}

// overflow reported against the first atom found inside the group
fn overflow_in(children: &[FormulaNode]) -> FormulaError {
    let mut node = children.first();
    while let Some(FormulaNode::Group { children, .. }) = node {
        node = children.first();
    }
    let symbol = match node {
        Some(FormulaNode::Atom { element, .. }) => element.clone(),
        _ => String::new(),
    };
    FormulaError::CountOverflow { symbol }
}
