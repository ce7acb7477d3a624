//! `sheet` - a line-oriented front end over the in-memory spreadsheet engine.

mod error;

use error::{CliError, Result};
use sheet_engine::{Position, Sheet, Value};
use std::env;
use std::io::{self, BufRead, Write};

fn print_usage() {
    eprintln!("Usage: sheet [OPTIONS]");
    eprintln!();
    eprintln!("With no options, reads commands from stdin:");
    eprintln!("  set <CELL> <text>   Set a cell's contents (e.g. \"set B1 =A1+1\")");
    eprintln!("  clear <CELL>        Clear a cell");
    eprintln!("  get <CELL>          Print a cell's display value");
    eprintln!("  print               Print the whole sheet's values, tab-separated");
    eprintln!("  printtext           Print the whole sheet's literal text, tab-separated");
    eprintln!("  quit                Exit");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <EXPR>   Evaluate a one-cell expression at A1 and print it");
    eprintln!("  -h, --help             Print help");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut command: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires an expression");
                    std::process::exit(1);
                }
                command = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: unknown option: {arg}");
                print_usage();
                std::process::exit(1);
            }
            other => {
                eprintln!("Error: unexpected argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Some(expr) = command {
        match run_command_mode(&expr) {
            Ok(is_error) => {
                if is_error {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = run_repl() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Evaluates a single expression at `A1` and prints its display value.
/// Mirrors the teacher's `-c`/`--command` one-shot mode, including the
/// auto-prepended `=` for bare arithmetic (`sheet -c "5+3"` behaves the
/// same as `sheet -c "=5+3"`).
fn run_command_mode(expr: &str) -> Result<bool> {
    let mut sheet = Sheet::new();
    let a1 = Position::new(0, 0);
    let text = if expr.starts_with('=') {
        expr.to_string()
    } else {
        format!("={expr}")
    };
    sheet.set_cell(a1, &text)?;

    let value = sheet
        .get_cell(a1)
        .expect("A1 was just set")
        .get_value();
    println!("{value}");
    Ok(matches!(value, Value::Error(_)))
}

fn run_repl() -> Result<()> {
    let mut sheet = Sheet::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Err(e) = dispatch(line, &mut sheet, &mut stdout.lock()) {
            match e {
                CliError::UnknownCommand(cmd) => eprintln!("Error: unknown command: {cmd}"),
                other => eprintln!("Error: {other}"),
            }
        }
    }
    Ok(())
}

fn dispatch(line: &str, sheet: &mut Sheet, out: &mut impl Write) -> Result<()> {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or("");

    match command {
        "quit" | "q" => std::process::exit(0),
        "set" => {
            let pos = parse_cell_arg(parts.next())?;
            let text = parts.next().unwrap_or("");
            sheet.set_cell(pos, text)?;
        }
        "clear" => {
            let pos = parse_cell_arg(parts.next())?;
            sheet.clear_cell(pos)?;
        }
        "get" => {
            let pos = parse_cell_arg(parts.next())?;
            match sheet.get_cell(pos) {
                Some(cell) => writeln!(out, "{}", cell.get_value())?,
                None => writeln!(out)?,
            }
        }
        "print" => sheet.print_values(out)?,
        "printtext" => sheet.print_texts(out)?,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    }
    Ok(())
}

fn parse_cell_arg(arg: Option<&str>) -> Result<Position> {
    let label = arg.ok_or_else(|| CliError::Usage("expected a cell reference".to_string()))?;
    Position::parse_label(label)
        .ok_or_else(|| CliError::Usage(format!("invalid cell reference: {label}")))
}
