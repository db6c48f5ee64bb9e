use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use satchel_cli::{load_dataset, search_report, table_report, Shell, TableRequest};
use satchel_core::fs::find_file_upwards;
use satchel_core::validate::require;
use satchel_core::{init_tracing_at, PerformanceTimer, SatchelConfig};
use tracing::debug;

/// Config file picked up from the working directory or its parents
const CONFIG_FILE_NAME: &str = "satchel.json";
const CONFIG_SEARCH_LIMIT: usize = 3;

fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .help("JSON file holding an array of records")
        .required(true)
        .index(1)
}

fn cli() -> Command {
    Command::new("satchel")
        .version(satchel_core::VERSION)
        .about("Search and tabulate JSON records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (JSON)")
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("search")
                .about("Print the records matching a query")
                .arg(file_arg())
                .arg(
                    Arg::new("query")
                        .value_name("QUERY")
                        .help("Search terms; prefix a term with '-' to exclude it")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Print records as a table")
                .arg(file_arg())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .value_name("TITLE")
                        .help("Title printed above the table"),
                )
                .arg(
                    Arg::new("sample")
                        .long("sample")
                        .value_name("ROWS")
                        .help("Print at most this many rows")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("include")
                        .long("include")
                        .value_name("COLUMN")
                        .help("Only print this column (repeatable)")
                        .action(ArgAction::Append)
                        .conflicts_with("exclude"),
                )
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .value_name("COLUMN")
                        .help("Skip this column (repeatable)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("shell")
                .about("Query records interactively")
                .arg(file_arg()),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let debug = matches.get_flag("debug");
    init_tracing_at(if debug { "debug" } else { "info" });

    let mut config = load_config(matches.get_one::<String>("config"))?;
    config.debug |= debug;

    match matches.subcommand() {
        Some(("search", sub)) => {
            let records = load(sub, &config).await?;
            let query = sub
                .get_many::<String>("query")
                .map(|terms| terms.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            print!("{}", search_report(&records, &query, &config)?);
        }
        Some(("table", sub)) => {
            let records = load(sub, &config).await?;
            let request = TableRequest {
                title: sub.get_one::<String>("title").cloned(),
                sample: sub.get_one::<usize>("sample").copied(),
                include: strings(sub, "include"),
                exclude: strings(sub, "exclude"),
            };
            print!("{}", table_report(&records, &request, &config.table)?);
        }
        Some(("shell", sub)) => {
            let records = load(sub, &config).await?;
            println!("Satchel shell v{}", satchel_core::VERSION);
            println!("Loaded {} records", records.len());
            if config.debug {
                println!("Debug mode: enabled");
            }
            println!("Type .help for help, .quit to exit");
            println!();

            let mut shell = Shell::new(records, config);
            run_shell(&mut shell)?;
        }
        _ => unreachable!("a subcommand is required"),
    }

    Ok(())
}

fn load_config(explicit: Option<&String>) -> Result<SatchelConfig> {
    let path = match explicit {
        Some(path) => Some(PathBuf::from(path)),
        None => find_file_upwards(std::env::current_dir()?, CONFIG_FILE_NAME, CONFIG_SEARCH_LIMIT),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "using configuration file");
            Ok(SatchelConfig::from_file(path)?)
        }
        None => Ok(SatchelConfig::default()),
    }
}

async fn load(sub: &ArgMatches, config: &SatchelConfig) -> Result<Vec<serde_json::Value>> {
    let file = require(sub.get_one::<String>("file"), "file")?;

    let mut timer = PerformanceTimer::new("load");
    let records = load_dataset(file).await?;
    timer.checkpoint("parsed dataset");

    debug!(records = records.len(), max_depth = config.search.max_depth, "dataset ready");
    Ok(records)
}

fn strings(sub: &ArgMatches, id: &str) -> Vec<String> {
    sub.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn run_shell(shell: &mut Shell) -> Result<()> {
    use rustyline::{error::ReadlineError, DefaultEditor};

    let mut rl = DefaultEditor::new()?;
    let is_interactive = io::stdin().is_terminal();

    while shell.is_running() {
        match rl.readline("?> ") {
            Ok(line) => {
                let trimmed = line.trim();

                // Echo input in non-interactive mode
                if !is_interactive && !trimmed.is_empty() {
                    println!("?> {trimmed}");
                }

                if trimmed.starts_with('.') {
                    rl.add_history_entry(trimmed)?;
                    match shell.parse_input(trimmed) {
                        Ok(command) => match shell.handle_command(command) {
                            Ok(output) => shell.notifier().on_output(&output),
                            Err(e) => shell.notifier().on_error(&format!("Error: {e}")),
                        },
                        Err(e) => shell.notifier().on_error(&format!("Error: {e}")),
                    }
                    continue;
                }

                if !trimmed.is_empty() {
                    rl.add_history_entry(trimmed)?;
                }
                match shell.execute(trimmed) {
                    Ok((table, matched, duration)) => shell.notifier().on_result(&table, matched, duration),
                    Err(e) => shell.notifier().on_error(&format!("Error: {e}")),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use .quit to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    shell.show_exit_stats();

    Ok(())
}
