//! # Periodic Table Module
//!
//! ## Purpose
//! Immutable mapping from element symbol to standard atomic weight (g/mol) used by the
//! evaluator to validate symbols and by the mass aggregator to weigh atoms.
//!
//! ## Data
//! - Built-in table: elements 1-118, IUPAC conventional standard atomic weights. Elements
//!   without a standard weight carry the mass number of their most stable isotope.
//! - Custom tables may be loaded from JSON `{ "H": 1.008, "O": 15.999 }`; symbols must match
//!   `[A-Z][a-z]?` and weights must be positive and finite.
//!
//! ## Global instance
//! A process-wide table lives in a `OnceLock`: `install_periodic_table` may put a custom table
//! in place once, before first use; otherwise `periodic_table()` lazily builds the standard one.
//! The table is never mutated afterwards, so it is shared between threads without locking.
use log::info;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, OnceLock};
use thiserror::Error;

// (symbol, name, standard atomic weight) in order of atomic number
static ELEMENTS: [(&str, &str, f64); 118] = [
    ("H", "Hydrogen", 1.008),
    ("He", "Helium", 4.002602),
    ("Li", "Lithium", 6.94),
    ("Be", "Beryllium", 9.0121831),
    ("B", "Boron", 10.81),
    ("C", "Carbon", 12.011),
    ("N", "Nitrogen", 14.007),
    ("O", "Oxygen", 15.999),
    ("F", "Fluorine", 18.998403163),
    ("Ne", "Neon", 20.1797),
    ("Na", "Sodium", 22.98976928),
    ("Mg", "Magnesium", 24.305),
    ("Al", "Aluminium", 26.9815385),
    ("Si", "Silicon", 28.085),
    ("P", "Phosphorus", 30.973761998),
    ("S", "Sulfur", 32.06),
    ("Cl", "Chlorine", 35.45),
    ("Ar", "Argon", 39.948),
    ("K", "Potassium", 39.0983),
    ("Ca", "Calcium", 40.078),
    ("Sc", "Scandium", 44.955908),
    ("Ti", "Titanium", 47.867),
    ("V", "Vanadium", 50.9415),
    ("Cr", "Chromium", 51.9961),
    ("Mn", "Manganese", 54.938044),
    ("Fe", "Iron", 55.845),
    ("Co", "Cobalt", 58.933194),
    ("Ni", "Nickel", 58.6934),
    ("Cu", "Copper", 63.546),
    ("Zn", "Zinc", 65.38),
    ("Ga", "Gallium", 69.723),
    ("Ge", "Germanium", 72.630),
    ("As", "Arsenic", 74.921595),
    ("Se", "Selenium", 78.971),
    ("Br", "Bromine", 79.904),
    ("Kr", "Krypton", 83.798),
    ("Rb", "Rubidium", 85.4678),
    ("Sr", "Strontium", 87.62),
    ("Y", "Yttrium", 88.90584),
    ("Zr", "Zirconium", 91.224),
    ("Nb", "Niobium", 92.90637),
    ("Mo", "Molybdenum", 95.95),
    ("Tc", "Technetium", 98.0),
    ("Ru", "Ruthenium", 101.07),
    ("Rh", "Rhodium", 102.90550),
    ("Pd", "Palladium", 106.42),
    ("Ag", "Silver", 107.8682),
    ("Cd", "Cadmium", 112.414),
    ("In", "Indium", 114.818),
    ("Sn", "Tin", 118.710),
    ("Sb", "Antimony", 121.760),
    ("Te", "Tellurium", 127.60),
    ("I", "Iodine", 126.90447),
    ("Xe", "Xenon", 131.293),
    ("Cs", "Caesium", 132.90545196),
    ("Ba", "Barium", 137.327),
    ("La", "Lanthanum", 138.90547),
    ("Ce", "Cerium", 140.116),
    ("Pr", "Praseodymium", 140.90766),
    ("Nd", "Neodymium", 144.242),
    ("Pm", "Promethium", 145.0),
    ("Sm", "Samarium", 150.36),
    ("Eu", "Europium", 151.964),
    ("Gd", "Gadolinium", 157.25),
    ("Tb", "Terbium", 158.92535),
    ("Dy", "Dysprosium", 162.500),
    ("Ho", "Holmium", 164.93033),
    ("Er", "Erbium", 167.259),
    ("Tm", "Thulium", 168.93422),
    ("Yb", "Ytterbium", 173.045),
    ("Lu", "Lutetium", 174.9668),
    ("Hf", "Hafnium", 178.49),
    ("Ta", "Tantalum", 180.94788),
    ("W", "Tungsten", 183.84),
    ("Re", "Rhenium", 186.207),
    ("Os", "Osmium", 190.23),
    ("Ir", "Iridium", 192.217),
    ("Pt", "Platinum", 195.084),
    ("Au", "Gold", 196.966569),
    ("Hg", "Mercury", 200.592),
    ("Tl", "Thallium", 204.38),
    ("Pb", "Lead", 207.2),
    ("Bi", "Bismuth", 208.98040),
    ("Po", "Polonium", 209.0),
    ("At", "Astatine", 210.0),
    ("Rn", "Radon", 222.0),
    ("Fr", "Francium", 223.0),
    ("Ra", "Radium", 226.0),
    ("Ac", "Actinium", 227.0),
    ("Th", "Thorium", 232.0377),
    ("Pa", "Protactinium", 231.03588),
    ("U", "Uranium", 238.02891),
    ("Np", "Neptunium", 237.0),
    ("Pu", "Plutonium", 244.0),
    ("Am", "Americium", 243.0),
    ("Cm", "Curium", 247.0),
    ("Bk", "Berkelium", 247.0),
    ("Cf", "Californium", 251.0),
    ("Es", "Einsteinium", 252.0),
    ("Fm", "Fermium", 257.0),
    ("Md", "Mendelevium", 258.0),
    ("No", "Nobelium", 259.0),
    ("Lr", "Lawrencium", 266.0),
    ("Rf", "Rutherfordium", 267.0),
    ("Db", "Dubnium", 268.0),
    ("Sg", "Seaborgium", 269.0),
    ("Bh", "Bohrium", 270.0),
    ("Hs", "Hassium", 277.0),
    ("Mt", "Meitnerium", 278.0),
    ("Ds", "Darmstadtium", 281.0),
    ("Rg", "Roentgenium", 282.0),
    ("Cn", "Copernicium", 285.0),
    ("Nh", "Nihonium", 286.0),
    ("Fl", "Flerovium", 289.0),
    ("Mc", "Moscovium", 290.0),
    ("Lv", "Livermorium", 293.0),
    ("Ts", "Tennessine", 294.0),
    ("Og", "Oganesson", 294.0),
];

static SYMBOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]?$").expect("symbol pattern is a valid regex"));

static PERIODIC_TABLE: OnceLock<PeriodicTable> = OnceLock::new();

/// true if `s` has the shape of an element symbol: one uppercase ASCII letter optionally
/// followed by one lowercase ASCII letter
pub fn is_symbol_like(s: &str) -> bool {
    SYMBOL_REGEX.is_match(s)
}

/// element record of the built-in table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_mass: f64,
}

/// all built-in elements in order of atomic number
pub fn elements() -> impl Iterator<Item = Element> {
    ELEMENTS
        .iter()
        .enumerate()
        .map(|(i, &(symbol, name, atomic_mass))| Element {
            atomic_number: (i + 1) as u8,
            symbol,
            name,
            atomic_mass,
        })
}

/// English name of an element of the built-in table
pub fn element_name(symbol: &str) -> Option<&'static str> {
    ELEMENTS
        .iter()
        .find(|(s, _, _)| *s == symbol)
        .map(|&(_, name, _)| name)
}

#[derive(Debug, Error)]
pub enum PeriodicTableError {
    #[error("Invalid element symbol '{0}'")]
    InvalidSymbol(String),
    #[error("Invalid atomic weight {weight} for element {symbol}")]
    InvalidWeight { symbol: String, weight: f64 },
    #[error("Periodic table contains no elements")]
    Empty,
    #[error("Periodic table is already initialized")]
    AlreadyInitialized,
    #[error("Failed to read periodic table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse periodic table: {0}")]
    Json(#[from] serde_json::Error),
}

/// immutable symbol -> atomic weight mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PeriodicTable {
    weights: BTreeMap<String, f64>,
}

impl PeriodicTable {
    /// the built-in IUPAC table
    pub fn standard() -> Self {
        let weights = ELEMENTS
            .iter()
            .map(|&(symbol, _, mass)| (symbol.to_string(), mass))
            .collect();
        Self { weights }
    }

    /// builds a table from (symbol, weight) pairs, validating every entry
    pub fn from_weights<I>(weights: I) -> Result<Self, PeriodicTableError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut table = BTreeMap::new();
        for (symbol, weight) in weights {
            if !is_symbol_like(&symbol) {
                return Err(PeriodicTableError::InvalidSymbol(symbol));
            }
            if !weight.is_finite() || weight <= 0.0 {
                return Err(PeriodicTableError::InvalidWeight { symbol, weight });
            }
            table.insert(symbol, weight);
        }
        if table.is_empty() {
            return Err(PeriodicTableError::Empty);
        }
        Ok(Self { weights: table })
    }

    pub fn from_json_str(json: &str) -> Result<Self, PeriodicTableError> {
        let weights: BTreeMap<String, f64> = serde_json::from_str(json)?;
        Self::from_weights(weights)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PeriodicTableError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn atomic_weight(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.weights.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// symbols with weights, alphabetical
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

impl Default for PeriodicTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// the process-wide table; built from the standard data on first use unless
/// `install_periodic_table` was called before
pub fn periodic_table() -> &'static PeriodicTable {
    PERIODIC_TABLE.get_or_init(PeriodicTable::standard)
}

/// puts a custom table in place of the standard one. Must happen before the first
/// calculation; fails if a table is already initialized
pub fn install_periodic_table(table: PeriodicTable) -> Result<(), PeriodicTableError> {
    let n = table.len();
    PERIODIC_TABLE
        .set(table)
        .map_err(|_| PeriodicTableError::AlreadyInitialized)?;
    info!("periodic table with {} elements installed", n);
    Ok(())
}
