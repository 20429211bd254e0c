/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Formulas may contain nested groups with multipliers and one hydration/adduct clause
/// after a dot, e.g. `Fe2(SO4)3`, `K4(Fe(CN)6)`, `CuSO4.5H2O`, `Na2CO3.H2O`.
///
///  # Examples
/// ```
/// use ChemFormula::MolarMass::molmass::calculate_molecular_weight;
/// let result = calculate_molecular_weight("CuSO4.5H2O").unwrap();
/// println!("Molar mass: {:?} g/mol", result.total_weight);
/// for entry in &result.breakdown {
///     println!("{}: {} atoms, {:.2} %", entry.element, entry.atom_count, entry.percentage);
/// }
/// use ChemFormula::MolarMass::molmass::parse_formula;
/// let atomic_composition = parse_formula("Na(NO3)2").unwrap();
/// assert_eq!(atomic_composition["O"], 6);
/// ```
pub mod molmass;

/// immutable symbol -> atomic weight table, built-in IUPAC data or loaded from JSON
pub mod periodic_table;

/// formula string -> tokens
pub mod tokenizer;
/// tokens -> syntax tree of atoms and groups
///  # Examples
/// ```
/// use ChemFormula::MolarMass::parser::{get_ast, FormulaNode};
/// let ast = get_ast("Ca3(PO4)2").unwrap();
/// assert!(ast.hydration.is_none());
/// if let FormulaNode::Group { children, multiplier } = ast.main {
///     assert_eq!(multiplier, 1);
///     assert_eq!(children.len(), 2);
/// }
/// ```
pub mod parser;
/// syntax tree -> element counts
pub mod evaluator;
/// element counts -> molar mass with per-element breakdown
pub mod mass_aggregator;

/// abbreviations like Me, Et, Ph standing for groups of atoms
///  # Examples
/// ```
/// use ChemFormula::MolarMass::chemical_groups::ChemicalGroups;
/// use ChemFormula::MolarMass::molmass::MolarMassCalculator;
/// use ChemFormula::MolarMass::periodic_table::PeriodicTable;
/// let table = PeriodicTable::standard();
/// let groups = ChemicalGroups::common(&table).unwrap();
/// let calculator = MolarMassCalculator::new(&table).with_groups(&groups);
/// let toluene = calculator.calculate("C6H5Me").unwrap();
/// assert_eq!(toluene.atom_count("C"), Some(7));
/// ```
pub mod chemical_groups;

pub mod formula_error;
