//! # Settings Module
//!
//! ## Purpose
//! Central configuration of the formula calculator: which periodic table to use, how to
//! print results, whether trailing phase marks are stripped and which chemical group
//! abbreviations are known. Stored as JSON (`formula_config.json` by default).
//!
//! ## Configuration Format
//! ```json
//! {
//!   "periodic_table": null,
//!   "strip_phase_marks": true,
//!   "decimal_places": 3,
//!   "log_level": "info",
//!   "groups": { "Me": { "C": 1, "H": 3 } }
//! }
//! ```
//! `periodic_table` is a path to a JSON table `{ "H": 1.008, ... }`; `null` selects the
//! built-in one. Missing keys take their defaults, a missing file means all defaults.
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use ChemFormula::settings::SettingsManager;
//!
//! let mut settings = SettingsManager::new();
//! settings.set_decimal_places(4)?;
//! let table = settings.load_periodic_table()?;
//! let groups = settings.chemical_groups(&table)?;
//! ```
use crate::MolarMass::chemical_groups::ChemicalGroups;
use crate::MolarMass::formula_error::GroupError;
use crate::MolarMass::periodic_table::{PeriodicTable, PeriodicTableError};
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "formula_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File does not exist: {0}")]
    FileNotFound(String),
    #[error(transparent)]
    PeriodicTable(#[from] PeriodicTableError),
    #[error(transparent)]
    Group(#[from] GroupError),
}

/// Serializable configuration of the calculator.
///
/// # Fields
/// * `periodic_table` - Path to a JSON periodic table, `None` for the built-in table
/// * `strip_phase_marks` - Remove trailing (g), (l), (s), (c), (aq) before parsing. (S) and (C) are kept
/// * `decimal_places` - Rounding used when printing results
/// * `log_level` - off, error, warn, info, debug or trace
/// * `groups` - Chemical group abbreviations and their atomic composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    pub periodic_table: Option<String>,
    pub strip_phase_marks: bool,
    pub decimal_places: usize,
    pub log_level: String,
    pub groups: BTreeMap<String, BTreeMap<String, u32>>,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            periodic_table: None,
            strip_phase_marks: true,
            decimal_places: 3,
            log_level: "info".to_string(),
            groups: BTreeMap::new(),
        }
    }
}

/// Loads, updates and saves `FormulaConfig`.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: FormulaConfig,
    config_file: String,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Creates a manager backed by `formula_config.json` in the current directory.
    /// A missing or broken file leaves the defaults in place.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Creates a manager backed by a custom configuration file.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}: {}, using default settings", config_file, e);
                FormulaConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Reads the configuration file; defaults if the file does not exist.
    ///
    /// # Returns
    /// * `Ok(FormulaConfig)` - Loaded or default configuration
    /// * `Err(SettingsError)` - On I/O errors or malformed JSON
    pub fn load_config(config_file: &str) -> Result<FormulaConfig, SettingsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: FormulaConfig = serde_json::from_str(&content)?;
            info!("settings loaded from {}", config_file);
            Ok(config)
        } else {
            Ok(FormulaConfig::default())
        }
    }

    /// Writes the current configuration to the config file.
    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &FormulaConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn decimal_places(&self) -> usize {
        self.config.decimal_places
    }

    pub fn strip_phase_marks(&self) -> bool {
        self.config.strip_phase_marks
    }

    /// Log level from the configuration, `Info` if it can not be parsed.
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.config.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Switches to a JSON periodic table. The file must exist and hold a valid table.
    pub fn set_periodic_table(&mut self, path: &str) -> Result<(), SettingsError> {
        if !Path::new(path).exists() {
            return Err(SettingsError::FileNotFound(path.to_string()));
        }
        PeriodicTable::from_json_file(path)?;
        self.config.periodic_table = Some(path.to_string());
        self.save_config()
    }

    /// Back to the built-in periodic table.
    pub fn use_standard_periodic_table(&mut self) -> Result<(), SettingsError> {
        self.config.periodic_table = None;
        self.save_config()
    }

    pub fn set_decimal_places(&mut self, decimal_places: usize) -> Result<(), SettingsError> {
        self.config.decimal_places = decimal_places;
        self.save_config()
    }

    pub fn set_strip_phase_marks(&mut self, strip: bool) -> Result<(), SettingsError> {
        self.config.strip_phase_marks = strip;
        self.save_config()
    }

    /// Adds or replaces a chemical group after checking it against the configured table.
    pub fn add_group(
        &mut self,
        abbreviation: &str,
        composition: BTreeMap<String, u32>,
    ) -> Result<(), SettingsError> {
        let table = self.load_periodic_table()?;
        let mut check = ChemicalGroups::new();
        check.insert(
            &table,
            abbreviation,
            composition.iter().map(|(s, n)| (s.as_str(), *n)),
        )?;
        self.config
            .groups
            .insert(abbreviation.to_string(), composition);
        self.save_config()
    }

    pub fn remove_group(&mut self, abbreviation: &str) -> Result<(), SettingsError> {
        self.config.groups.remove(abbreviation);
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = FormulaConfig::default();
        self.save_config()
    }

    /// The configured periodic table, built-in one if none is configured.
    pub fn load_periodic_table(&self) -> Result<PeriodicTable, SettingsError> {
        match &self.config.periodic_table {
            Some(path) => {
                let table = PeriodicTable::from_json_file(path)?;
                info!("periodic table with {} elements loaded from {}", table.len(), path);
                Ok(table)
            }
            None => Ok(PeriodicTable::standard()),
        }
    }

    /// The configured chemical groups validated against `table`.
    pub fn chemical_groups(&self, table: &PeriodicTable) -> Result<ChemicalGroups, SettingsError> {
        Ok(ChemicalGroups::from_map(table, &self.config.groups)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_path(file: &NamedTempFile) -> String {
        file.path().to_string_lossy().to_string()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = SettingsManager::with_config_file("no_such_formula_config.json");
        assert_eq!(manager.get_config(), &FormulaConfig::default());
        assert_eq!(manager.decimal_places(), 3);
        assert!(manager.strip_phase_marks());
        assert_eq!(manager.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"decimal_places": 5, "log_level": "debug"}"#)
            .unwrap();
        let manager = SettingsManager::with_config_file(&temp_path(&file));
        assert_eq!(manager.decimal_places(), 5);
        assert_eq!(manager.log_level(), LevelFilter::Debug);
        assert!(manager.strip_phase_marks());
        assert!(manager.get_config().groups.is_empty());
    }

    #[test]
    fn test_broken_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            SettingsManager::load_config(&temp_path(&file)),
            Err(SettingsError::Json(_))
        ));
        let manager = SettingsManager::with_config_file(&temp_path(&file));
        assert_eq!(manager.get_config(), &FormulaConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let path = temp_path(&file);
        let mut manager = SettingsManager::with_config_file("no_such_formula_config.json");
        manager.config_file = path.clone();
        manager.set_decimal_places(2).unwrap();
        manager.set_strip_phase_marks(false).unwrap();
        manager
            .add_group(
                "Me",
                BTreeMap::from([("C".to_string(), 1), ("H".to_string(), 3)]),
            )
            .unwrap();

        let reloaded = SettingsManager::with_config_file(&path);
        assert_eq!(reloaded.get_config(), manager.get_config());
        assert_eq!(reloaded.decimal_places(), 2);
        assert!(!reloaded.strip_phase_marks());

        let table = reloaded.load_periodic_table().unwrap();
        let groups = reloaded.chemical_groups(&table).unwrap();
        assert_eq!(groups.get("Me").unwrap().get("H"), Some(&3));

        manager.remove_group("Me").unwrap();
        manager.reset_to_defaults().unwrap();
        let reloaded = SettingsManager::with_config_file(&path);
        assert_eq!(reloaded.get_config(), &FormulaConfig::default());
    }

    #[test]
    fn test_invalid_group_rejected() {
        let file = NamedTempFile::new().unwrap();
        let mut manager = SettingsManager::with_config_file(&temp_path(&file));
        let err = manager
            .add_group("Fe", BTreeMap::from([("C".to_string(), 1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Group(GroupError::ShadowsElement(_))
        ));
        assert!(manager.get_config().groups.is_empty());
    }

    #[test]
    fn test_custom_periodic_table() {
        let mut table_file = NamedTempFile::new().unwrap();
        table_file.write_all(br#"{"H": 1.0, "O": 16.0}"#).unwrap();
        let config_file = NamedTempFile::new().unwrap();
        let mut manager = SettingsManager::with_config_file(&temp_path(&config_file));

        manager.set_periodic_table(&temp_path(&table_file)).unwrap();
        let table = manager.load_periodic_table().unwrap();
        assert_eq!(table.len(), 2);

        assert!(matches!(
            manager.set_periodic_table("no_such_table.json"),
            Err(SettingsError::FileNotFound(_))
        ));

        manager.use_standard_periodic_table().unwrap();
        assert_eq!(manager.load_periodic_table().unwrap().len(), 118);
    }

    #[test]
    fn test_invalid_periodic_table_rejected() {
        let mut table_file = NamedTempFile::new().unwrap();
        table_file.write_all(br#"{"H": -1.0}"#).unwrap();
        let config_file = NamedTempFile::new().unwrap();
        let mut manager = SettingsManager::with_config_file(&temp_path(&config_file));
        assert!(matches!(
            manager.set_periodic_table(&temp_path(&table_file)),
            Err(SettingsError::PeriodicTable(
                PeriodicTableError::InvalidWeight { .. }
            ))
        ));
        assert_eq!(manager.get_config().periodic_table, None);
    }
}
