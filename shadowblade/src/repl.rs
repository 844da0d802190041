//! Line-oriented mode: every line read from stdin is one combat order.

use armory_core::{Command, Dispatcher};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
  #list  - Show the armory
  #help  - Show this help
  #quit  - Exit
  (anything else is an attack order, e.g. `attack Hype`)";

/// A line with a leading `#` is a shell command, everything else an order.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Blank,
    List,
    Help,
    Quit,
    Unknown(&'a str),
    Order(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }
    let Some(rest) = line.strip_prefix('#') else {
        return Input::Order(line);
    };
    match rest.split_whitespace().next() {
        Some("list") => Input::List,
        Some("help") => Input::Help,
        Some("quit") | Some("exit") => Input::Quit,
        _ => Input::Unknown(line),
    }
}

pub async fn run(dispatcher: &Dispatcher, json: bool) -> anyhow::Result<()> {
    println!("=== Shadowblade ===");
    println!("{} weapons ready. Commands:", dispatcher.catalog().len());
    println!("{HELP}");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        match classify(&line) {
            Input::Blank => continue,
            Input::Quit => {
                println!("Standing down.");
                break;
            }
            Input::Help => println!("[HELP]\n{HELP}"),
            Input::List => crate::print_catalog(dispatcher.catalog(), json)?,
            Input::Unknown(cmd) => println!("[ERROR] Unknown command {cmd}. Type #help for help."),
            Input::Order(order) => match dispatcher.engage(&Command::new(order)).await {
                Ok(engagement) => crate::print_engagement(&engagement, json)?,
                Err(e) => println!("[ERROR] {e}"),
            },
        }
        stdout.flush().ok();
    }

    Ok(())
}
