//! Running the command.

use crate::args::{Action, Args};
use liferule_lib::{
    rules::{Table3x3, ALL_3X3},
    Config, LifeRules, State, TreeRules, VerbatimGrid,
};
use log::info;
use std::error::Error;

/// Describes a rule string.
fn rule(
    input: &str,
    table: bool,
    block: Option<u16>,
    generation: u64,
) -> Result<(), Box<dyn Error>> {
    let mut rules = LifeRules::new();
    let mut grid = VerbatimGrid::new();
    rules.set_rule(input, &mut grid)?;
    let rule = rules.rule();

    println!("rule = {}", rule.name());
    match rule.wolfram() {
        Some(code) => println!("wolfram = {}", code),
        None => {
            println!("neighborhood = {:?}", rule.neighborhood());
            println!("totalistic = {}", rule.is_totalistic());
            println!("b0 = {}", rule.has_b0());
            println!("alternate = {}", rule.alternate_rules());
        }
    }
    if rule.is_regular_life() {
        info!("{} is Conway's Game of Life", rule.name());
    }

    if table {
        print_table(rule.table3x3());
    }
    if let Some(block) = block {
        let next = rule.map(generation).lookup(block);
        println!("{:#06x} -> {:#08b}", block, next);
    }
    Ok(())
}

/// Prints a 3×3 table as 8 lines of 64 digits.
fn print_table(table: &Table3x3) {
    let digits: Vec<char> = (0..ALL_3X3)
        .map(|i| if table[i] { '1' } else { '0' })
        .collect();
    for line in digits.chunks(64) {
        println!("{}", line.iter().collect::<String>());
    }
}

/// Describes a rule tree.
fn tree(input: &str, cells: Option<[u8; 9]>, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut rules = TreeRules::new()?;
    let mut grid = VerbatimGrid::new();
    rules.set_rule(input, &mut grid, config)?;
    let tree = rules.tree();

    println!("rule = {}", rules.get_rule());
    println!("num_states = {}", rules.num_cell_states());
    println!("num_neighbors = {}", tree.num_neighbors());
    println!("num_nodes = {}", tree.num_nodes());

    if let Some(cells) = cells {
        if let Some(&bad) = cells.iter().find(|&&c| c as usize >= tree.num_states()) {
            let message = format!("State {} out of range for {} states.", bad, tree.num_states());
            return Err(message.into());
        }
        let next = tree.slowcalc(cells.map(State));
        println!("next = {}", next);
    }
    Ok(())
}

pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.action {
        Action::Rule {
            rule: input,
            table,
            block,
            generation,
        } => rule(&input, table, block, generation),
        Action::Tree { rule: input, cells } => tree(&input, cells, &args.config),
    }
}
