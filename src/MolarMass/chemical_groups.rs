//! Chemical formulae may contain special names for chemical groups, e.g. Me (methyl) which
//! stands for {"C":1, "H":3}. The evaluator expands such abbreviations into regular elements.
use super::formula_error::GroupError;
use super::periodic_table::{PeriodicTable, is_symbol_like};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemicalGroups {
    groups: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ChemicalGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// methyl, ethyl and phenyl
    pub fn common(table: &PeriodicTable) -> Result<Self, GroupError> {
        let mut groups = Self::new();
        groups.insert(table, "Me", [("C", 1), ("H", 3)])?;
        groups.insert(table, "Et", [("C", 2), ("H", 5)])?;
        groups.insert(table, "Ph", [("C", 6), ("H", 5)])?;
        Ok(groups)
    }

    /// adds a group. The abbreviation must look like an element symbol (so the tokenizer
    /// reads it as one) but must not be a real element of `table`
    pub fn insert<'a, I>(
        &mut self,
        table: &PeriodicTable,
        abbreviation: &str,
        composition: I,
    ) -> Result<(), GroupError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        if !is_symbol_like(abbreviation) {
            return Err(GroupError::InvalidAbbreviation(abbreviation.to_string()));
        }
        if table.contains(abbreviation) {
            return Err(GroupError::ShadowsElement(abbreviation.to_string()));
        }
        let mut atoms = BTreeMap::new();
        for (symbol, count) in composition {
            if !table.contains(symbol) {
                return Err(GroupError::UnknownElement {
                    abbreviation: abbreviation.to_string(),
                    symbol: symbol.to_string(),
                });
            }
            if count == 0 {
                return Err(GroupError::ZeroCount {
                    abbreviation: abbreviation.to_string(),
                    symbol: symbol.to_string(),
                });
            }
            let total: &mut u32 = atoms.entry(symbol.to_string()).or_insert(0);
            *total = total
                .checked_add(count)
                .ok_or_else(|| GroupError::CountOverflow {
                    abbreviation: abbreviation.to_string(),
                    symbol: symbol.to_string(),
                })?;
        }
        if atoms.is_empty() {
            return Err(GroupError::EmptyComposition(abbreviation.to_string()));
        }
        self.groups.insert(abbreviation.to_string(), atoms);
        Ok(())
    }

    /// builds groups from the configuration map { "Me": {"C": 1, "H": 3} }
    pub fn from_map(
        table: &PeriodicTable,
        map: &BTreeMap<String, BTreeMap<String, u32>>,
    ) -> Result<Self, GroupError> {
        let mut groups = Self::new();
        for (abbreviation, composition) in map {
            groups.insert(
                table,
                abbreviation,
                composition.iter().map(|(s, n)| (s.as_str(), *n)),
            )?;
        }
        Ok(groups)
    }

    pub fn get(&self, abbreviation: &str) -> Option<&BTreeMap<String, u32>> {
        self.groups.get(abbreviation)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, u32>)> {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_groups() {
        let table = PeriodicTable::standard();
        let groups = ChemicalGroups::common(&table).unwrap();
        let me = groups.get("Me").unwrap();
        assert_eq!(me.get("C"), Some(&1));
        assert_eq!(me.get("H"), Some(&3));
        assert!(groups.get("Bu").is_none());
    }

    #[test]
    fn test_invalid_groups() {
        let table = PeriodicTable::standard();
        let mut groups = ChemicalGroups::new();
        assert_eq!(
            groups.insert(&table, "Ac", [("C", 2), ("H", 3), ("O", 1)]),
            Err(GroupError::ShadowsElement("Ac".to_string()))
        );
        assert_eq!(
            groups.insert(&table, "tBu", [("C", 4), ("H", 9)]),
            Err(GroupError::InvalidAbbreviation("tBu".to_string()))
        );
        assert_eq!(
            groups.insert(&table, "Qq", [("C", 1), ("Xx", 3)]),
            Err(GroupError::UnknownElement {
                abbreviation: "Qq".to_string(),
                symbol: "Xx".to_string()
            })
        );
        assert_eq!(
            groups.insert(&table, "Qq", [("C", 0)]),
            Err(GroupError::ZeroCount {
                abbreviation: "Qq".to_string(),
                symbol: "C".to_string()
            })
        );
        assert_eq!(
            groups.insert(&table, "Qq", std::iter::empty::<(&str, u32)>()),
            Err(GroupError::EmptyComposition("Qq".to_string()))
        );
        assert_eq!(
            groups.insert(&table, "Qq", [("C", u32::MAX), ("C", 1)]),
            Err(GroupError::CountOverflow {
                abbreviation: "Qq".to_string(),
                symbol: "C".to_string()
            })
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn test_repeated_symbols_are_summed() {
        let table = PeriodicTable::standard();
        let mut groups = ChemicalGroups::new();
        groups
            .insert(&table, "Qq", [("C", 1), ("H", 3), ("C", 1)])
            .unwrap();
        assert_eq!(groups.get("Qq").unwrap().get("C"), Some(&2));
    }

    #[test]
    fn test_from_map() {
        let table = PeriodicTable::standard();
        let map = BTreeMap::from([(
            "Bz".to_string(),
            BTreeMap::from([("C".to_string(), 7), ("H".to_string(), 7)]),
        )]);
        let groups = ChemicalGroups::from_map(&table, &map).unwrap();
        assert_eq!(groups.get("Bz").unwrap().get("C"), Some(&7));
    }
}
