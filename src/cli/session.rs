use crate::MolarMass::chemical_groups::ChemicalGroups;
use crate::MolarMass::molmass::MolarMassCalculator;
use crate::MolarMass::periodic_table::{PeriodicTable, install_periodic_table, periodic_table};
use crate::settings::{SettingsError, SettingsManager};
use log::info;

/// everything the command line front end needs: settings, the installed periodic table and
/// the configured chemical groups
pub struct Session {
    pub settings: SettingsManager,
    table: &'static PeriodicTable,
    groups: ChemicalGroups,
}

impl Session {
    /// installs the configured periodic table process-wide and builds the groups against it
    pub fn start(settings: SettingsManager) -> Result<Self, SettingsError> {
        let table = settings.load_periodic_table()?;
        install_periodic_table(table)?;
        Self::with_table(settings, periodic_table())
    }

    pub fn with_table(
        settings: SettingsManager,
        table: &'static PeriodicTable,
    ) -> Result<Self, SettingsError> {
        let groups = settings.chemical_groups(table)?;
        info!(
            "session ready: {} elements, groups: {}",
            table.len(),
            groups.iter().map(|(g, _)| g.as_str()).collect::<Vec<_>>().join(", ")
        );
        Ok(Self {
            settings,
            table,
            groups,
        })
    }

    pub fn calculator(&self) -> MolarMassCalculator<'_> {
        let calculator = MolarMassCalculator::new(self.table)
            .strip_phase_marks(self.settings.strip_phase_marks());
        if self.groups.is_empty() {
            calculator
        } else {
            calculator.with_groups(&self.groups)
        }
    }

    pub fn table(&self) -> &PeriodicTable {
        self.table
    }

    pub fn groups(&self) -> &ChemicalGroups {
        &self.groups
    }

    pub fn decimal_places(&self) -> usize {
        self.settings.decimal_places()
    }
}
