//! Menu-driven interactive loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use epi_core::{MetricKind, MetricRequest};

use crate::input::{FieldBound, Prompter};
use crate::session::Session;

const SHOW_HISTORY: &str = "6";
const EXIT: &str = "7";

enum MenuChoice {
    Metric(MetricKind),
    ShowHistory,
    Exit,
    Invalid,
}

fn parse_choice(text: &str) -> MenuChoice {
    let text = text.trim();
    if text == SHOW_HISTORY {
        return MenuChoice::ShowHistory;
    }
    if text == EXIT {
        return MenuChoice::Exit;
    }
    MetricKind::ALL
        .iter()
        .find(|kind| kind.menu_index().to_string() == text)
        .map(|kind| MenuChoice::Metric(*kind))
        .unwrap_or(MenuChoice::Invalid)
}

fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Epidemiology Metrics Calculator")?;
    for kind in MetricKind::ALL {
        writeln!(out, "{}. {}", kind.menu_index(), kind.display_name())?;
    }
    writeln!(out, "{}. Show History", SHOW_HISTORY)?;
    writeln!(out, "{}. Exit", EXIT)
}

/// Collect the fields for `kind`. `None` if input ends midway.
fn read_request<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    kind: MetricKind,
) -> std::io::Result<Option<MetricRequest>> {
    use crate::input::FieldBound::NonNegative;

    macro_rules! field {
        ($message:expr, $bound:expr) => {
            match prompter.read_number($message, $bound)? {
                Some(value) => value,
                None => return Ok(None),
            }
        };
    }

    let request = match kind {
        MetricKind::AttackRate => MetricRequest::AttackRate {
            cases: field!("Enter number of new cases: ", NonNegative),
            population: field!("Enter population at risk: ", NonNegative),
        },
        MetricKind::CaseFatalityRate => MetricRequest::CaseFatalityRate {
            deaths: field!("Enter number of deaths: ", NonNegative),
            cases: field!("Enter number of confirmed cases: ", NonNegative),
        },
        MetricKind::IncidenceRate => MetricRequest::IncidenceRate {
            cases: field!("Enter number of new cases: ", NonNegative),
            population: field!("Enter total population: ", NonNegative),
            multiplier: field!(
                "Enter multiplier (e.g., 1000 or 100000): ",
                FieldBound::AtLeast(1.0)
            ),
        },
        MetricKind::Prevalence => MetricRequest::Prevalence {
            existing_cases: field!("Enter total existing cases: ", NonNegative),
            population: field!("Enter total population: ", NonNegative),
        },
        MetricKind::DoublingTime => MetricRequest::DoublingTime {
            growth_rate: field!("Enter exponential growth rate (e.g., 0.2): ", NonNegative),
        },
    };
    Ok(Some(request))
}

fn show_history<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    let entries = session.history().entries();
    if entries.is_empty() {
        return writeln!(out, "No calculations yet.");
    }
    writeln!(out, "\nCalculation History:")?;
    for entry in &entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

fn finish<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    session.save()?;
    if session.is_persistent() {
        writeln!(out, "History saved. Goodbye.")?;
    } else {
        writeln!(out, "Goodbye.")?;
    }
    Ok(())
}

/// Run the menu loop until the user exits or input ends, then save history.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, output: W) -> Result<()> {
    let mut prompter = Prompter::new(input, output);

    loop {
        print_menu(prompter.output())?;
        let Some(line) = prompter.read_line("Choose an option: ")? else {
            writeln!(prompter.output())?;
            break;
        };

        match parse_choice(&line) {
            MenuChoice::Metric(kind) => {
                let Some(request) = read_request(&mut prompter, kind)? else {
                    writeln!(prompter.output())?;
                    break;
                };
                match session.calculate(&request) {
                    Ok(result) => writeln!(prompter.output(), "Result: {}", result)?,
                    Err(err) => {
                        log::debug!("{} rejected: {}", kind, err);
                        writeln!(prompter.output(), "{}", err)?;
                    }
                }
            }
            MenuChoice::ShowHistory => show_history(session, prompter.output())?,
            MenuChoice::Exit => break,
            MenuChoice::Invalid => writeln!(prompter.output(), "Invalid choice. Try again.")?,
        }
    }

    finish(session, prompter.output())
}
