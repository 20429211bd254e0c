#[allow(non_snake_case)]
pub mod MolarMass;
pub mod cli;
pub mod settings;
