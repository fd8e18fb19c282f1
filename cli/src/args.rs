//! Parsing command-line arguments.

use clap::{
    command,
    error::{ErrorKind, Result as ClapResult},
    value_parser, Arg, ArgAction, ArgMatches, Command, Error,
};
use liferule_lib::{Config, LifeRule};
use log::info;
use std::{
    fs,
    num::ParseIntError,
    path::{Path, PathBuf},
};

/// What to do with the rule.
pub(crate) enum Action {
    /// Builds a rule string and describes it.
    Rule {
        rule: String,
        table: bool,
        block: Option<u16>,
        generation: u64,
    },
    /// Loads a rule tree and describes it.
    Tree { rule: String, cells: Option<[u8; 9]> },
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) action: Action,
    pub(crate) config: Config,
    pub(crate) verbose: u8,
}

/// Parses a block of a 4×4 lookup table, in decimal or `0x` hexadecimal.
fn parse_block(s: &str) -> Result<u16, String> {
    match s.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| e.to_string())
}

/// Parses nine comma-separated states: `nw,n,ne,w,c,e,sw,s,se`.
fn parse_cells(s: &str) -> Result<[u8; 9], String> {
    let mut cells = [0; 9];
    let mut count = 0;
    for (i, word) in s.split(',').enumerate() {
        let cell = cells
            .get_mut(i)
            .ok_or_else(|| String::from("expected 9 states"))?;
        *cell = word.trim().parse().map_err(|e: ParseIntError| e.to_string())?;
        count += 1;
    }
    if count != 9 {
        return Err(String::from("expected 9 states"));
    }
    Ok(cells)
}

/// Reads a configuration file in TOML, YAML or JSON, by its extension.
fn read_config(path: &Path) -> ClapResult<Config> {
    let text = fs::read_to_string(path).map_err(|e| Error::raw(ErrorKind::Io, e))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = match extension {
        "toml" => toml::from_str(&text).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&text).map_err(|e| e.to_string()),
        _ => Err(format!("unknown config format: {}", path.display())),
    }
    .map_err(|e| Error::raw(ErrorKind::InvalidValue, e))?;
    info!("Read config from {}", path.display());
    Ok(config)
}

fn rule_command() -> Command {
    Command::new("rule")
        .about("Builds a rule string")
        .long_about(
            "Builds a rule string\n\
             Supports Life-like, isotropic non-totalistic, hexagonal, von Neumann \
             and Wolfram rules, with an optional bounded-grid suffix.\n\
             Prints the canonical rule string and what the rule looks like.\n",
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .required(true)
                .index(1)
                .value_parser(|s: &str| {
                    s.parse::<LifeRule>()
                        .map(|_| s.to_owned())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("TABLE")
                .help("Prints the 3×3 transition table")
                .short('t')
                .long("table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("BLOCK")
                .help("Looks up a 4×4 block, in decimal or 0x hexadecimal")
                .short('b')
                .long("block")
                .value_parser(parse_block),
        )
        .arg(
            Arg::new("GEN")
                .help("Generation of the block lookup")
                .long_help(
                    "Generation of the block lookup\n\
                     Only matters for rules with B0, whose even and odd generations \
                     use different tables.\n",
                )
                .short('g')
                .long("generation")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
}

fn tree_command() -> Command {
    Command::new("tree")
        .about("Loads a rule tree")
        .long_about(
            "Loads a rule tree\n\
             B3/S23 uses the built-in tree. Other rules are read from \
             <RULE>.tree in the user rules directory, then in the rules directory.\n",
        )
        .arg(
            Arg::new("RULE")
                .help("Name of the rule tree")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("CELLS")
                .help("Evaluates the tree on nine states: nw,n,ne,w,c,e,sw,s,se")
                .long("cells")
                .value_parser(parse_cells),
        )
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        let matches = command!()
            .subcommand_required(true)
            .arg(
                Arg::new("CONFIG")
                    .help("Configuration file, in TOML, YAML or JSON")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .global(true)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("RULES")
                    .help("Rules directory")
                    .long("rules")
                    .value_name("DIR")
                    .global(true)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("USERRULES")
                    .help("User rules directory, searched before the rules directory")
                    .long("user-rules")
                    .value_name("DIR")
                    .global(true)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("VERBOSE")
                    .help("Logs more, up to -vvv")
                    .short('v')
                    .long("verbose")
                    .global(true)
                    .action(ArgAction::Count),
            )
            .subcommand(rule_command())
            .subcommand(tree_command())
            .try_get_matches()?;

        let (name, sub) = matches
            .subcommand()
            .ok_or_else(|| Error::raw(ErrorKind::MissingSubcommand, "missing subcommand"))?;
        let verbose = sub.get_count("VERBOSE");
        let mut config = match sub.get_one::<PathBuf>("CONFIG") {
            Some(path) => read_config(path)?,
            None => Config::new(),
        };
        if let Some(dir) = sub.get_one::<PathBuf>("RULES") {
            config = config.set_rules_dir(dir);
        }
        if let Some(dir) = sub.get_one::<PathBuf>("USERRULES") {
            config = config.set_user_rules(dir);
        }

        let action = match name {
            "rule" => rule_action(sub),
            _ => Action::Tree {
                rule: rule_string(sub),
                cells: sub.get_one::<[u8; 9]>("CELLS").copied(),
            },
        };

        Ok(Args {
            action,
            config,
            verbose,
        })
    }
}

fn rule_string(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("RULE")
        .cloned()
        .unwrap_or_default()
}

fn rule_action(matches: &ArgMatches) -> Action {
    Action::Rule {
        rule: rule_string(matches),
        table: matches.get_flag("TABLE"),
        block: matches.get_one::<u16>("BLOCK").copied(),
        generation: matches.get_one::<u64>("GEN").copied().unwrap_or(0),
    }
}
