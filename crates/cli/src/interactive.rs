//! Line-driven editing session over an [`InputState`].

use anyhow::Result;
use btb_calc_presentation::input_state::{Field, FieldUpdate};
use btb_calc_presentation::{InputState, Report};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const HELP: &str = "\
commands:
  <field> <value>   set a field (blank value means 0), e.g. `future_price 2400`
  <field>=<value>   same as above
  label <name>      rename the volatile asset
  fields            list fields and their values
  show              print the full report
  reset             restore the starting parameters
  help              this text
  quit              leave";

/// Reads commands from `input` until EOF or `quit`, writing results to
/// `output`.
///
/// Every recomputation is rendered through an observer, so the summary line
/// printed after an edit is exactly what the state held after that edit.
pub fn run_session<R, W>(mut state: InputState, input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let initial = *state.params();
    let rendered: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&rendered);
    state.subscribe(move |s| {
        let line = Report::new(s.label(), s.params(), s.derived()).summary_line();
        sink.borrow_mut().push(line);
    });

    writeln!(output, "{}", Report::new(state.label(), state.params(), state.derived()).summary_line())?;
    writeln!(output, "type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = split_command(line);
        match command {
            "quit" | "exit" => break,
            "help" => writeln!(output, "{HELP}")?,
            "show" => {
                Report::new(state.label(), state.params(), state.derived())
                    .to_table()
                    .print(&mut output)?;
            }
            "fields" => {
                for field in Field::ALL {
                    writeln!(output, "{:<18} {}", field.name(), field.get(state.params()))?;
                }
            }
            "reset" => state.replace(initial),
            "label" => state.set_label(rest),
            name => match state.set_by_name(name, rest) {
                Ok(FieldUpdate::Applied { .. }) => {}
                Ok(FieldUpdate::KeptPrevious { error, previous, .. }) => {
                    writeln!(output, "{error}; keeping {previous}")?;
                }
                Err(error) => writeln!(output, "{error}; type `help` for commands")?,
            },
        }

        for summary in rendered.borrow_mut().drain(..) {
            writeln!(output, "{summary}")?;
        }
    }

    Ok(())
}

/// Splits `future_price 2400` or `future_price=2400` into name and value.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(|c: char| c == '=' || c.is_whitespace()) {
        Some((command, rest)) => (command.trim(), rest.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_session(InputState::default(), Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("future_price 2400"), ("future_price", "2400"));
        assert_eq!(split_command("apr=1.5"), ("apr", "1.5"));
        assert_eq!(split_command("show"), ("show", ""));
        assert_eq!(split_command("label  Wrapped ETH"), ("label", "Wrapped ETH"));
    }

    #[test]
    fn test_session_renders_each_edit() {
        let out = run("future_price 1500\nfuture_price=2223.24\nquit\nfuture_price 9999\n");
        let lines: Vec<&str> = out.lines().collect();

        // greeting, hint, then one summary per edit; nothing after quit
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("$1,500.00"));
        assert!(lines[2].ends_with("HODL"));
        assert!(lines[3].ends_with("LP"));
    }

    #[test]
    fn test_session_reports_bad_input() {
        let out = run("days 2.5\nvolatility 3\n");

        assert!(out.contains("days_in_future: '2.5' is not a whole, non-negative number of days; keeping 7"));
        assert!(out.contains("unknown field 'volatility'"));
    }

    #[test]
    fn test_session_label_and_reset() {
        let out = run("label WETH\nfuture_price 1500\nreset\n");
        let last = out.lines().last().unwrap();

        assert!(last.starts_with("WETH @ $2,223.24"));
    }

    #[test]
    fn test_session_show_and_fields() {
        let out = run("show\nfields\n");

        assert!(out.contains("Recommendation"));
        assert!(out.contains("days_out_of_range"));
    }
}
