use super::cli_args::print_outcome;
use super::session::Session;
use crate::MolarMass::periodic_table::{element_name, elements};
use prettytable::{Cell, Row, Table};
use std::io::{self, BufRead, Write};

pub fn run_interactive_menu(session: &Session) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        show_main_menu();
        let Some(choice) = get_user_input(&mut input) else {
            break;
        };

        match choice.trim() {
            "1" => calculate_one(session, &mut input),
            "2" => calculate_list(session, &mut input),
            "3" => show_periodic_table(session),
            "4" => show_groups(session),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Molar mass calculator: formulas with groups, e.g. Fe2(SO4)3,\n
    and hydrates, e.g. CuSO4.5H2O \n \x1b[0m"
    );
    println!("\x1b[33m1. Calculate molar mass\x1b[0m");
    println!("\x1b[33m2. Calculate a list of formulas\x1b[0m");
    println!("\x1b[33m3. Periodic table\x1b[0m");
    println!("\x1b[33m4. Chemical groups\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    // a prompt that fails to flush still shows up with the next line
    let _ = io::stdout().flush();
}

// None on end of input or read error
fn get_user_input<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn calculate_one<R: BufRead>(session: &Session, input: &mut R) {
    prompt("Formula: ");
    if let Some(line) = get_user_input(input) {
        let formula = line.trim();
        let outcome = session.calculator().calculate(formula);
        print_outcome(session, formula, &outcome);
    }
}

fn calculate_list<R: BufRead>(session: &Session, input: &mut R) {
    prompt("Formulas separated by commas: ");
    let Some(line) = get_user_input(input) else {
        return;
    };
    let formulas: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    let masses = session.calculator().calculate_many(&formulas);
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Formula"), Cell::new("Molar mass, g/mol")]));
    for (formula, mass) in formulas.iter().zip(masses) {
        let value = match mass {
            Ok(m) => format!("{:.*}", session.decimal_places(), m),
            Err(e) => e.to_string(),
        };
        table.add_row(Row::new(vec![Cell::new(formula), Cell::new(&value)]));
    }
    table.printstd();
}

pub fn periodic_table_view(session: &Session) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Z"),
        Cell::new("Symbol"),
        Cell::new("Name"),
        Cell::new("Atomic weight, g/mol"),
    ]));
    // built-in elements in order of atomic number, then anything only a custom table has
    for element in elements() {
        if let Some(weight) = session.table().atomic_weight(element.symbol) {
            table.add_row(Row::new(vec![
                Cell::new(&element.atomic_number.to_string()),
                Cell::new(element.symbol),
                Cell::new(element.name),
                Cell::new(&weight.to_string()),
            ]));
        }
    }
    for (symbol, weight) in session.table().iter() {
        if element_name(symbol).is_none() {
            table.add_row(Row::new(vec![
                Cell::new(""),
                Cell::new(symbol),
                Cell::new(""),
                Cell::new(&weight.to_string()),
            ]));
        }
    }
    table
}

fn show_periodic_table(session: &Session) {
    periodic_table_view(session).printstd();
}

fn show_groups(session: &Session) {
    if session.groups().is_empty() {
        println!("No chemical groups configured");
        return;
    }
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Group"), Cell::new("Atoms")]));
    for (abbreviation, composition) in session.groups().iter() {
        let atoms = composition
            .iter()
            .map(|(symbol, n)| format!("{}{}", symbol, n))
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(Row::new(vec![Cell::new(abbreviation), Cell::new(&atoms)]));
    }
    table.printstd();
}
