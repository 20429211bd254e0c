/// parsing of command line arguments and printing of results
pub mod cli_args;
/// interactive menu
pub mod cli_main;
/// settings, periodic table and groups shared by the front end
pub mod session;
