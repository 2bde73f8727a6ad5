//! Line-based interactive demo.

use std::io::Write;

use anyhow::Context;
use credcheck_core::InputStore;
use credcheck_demo::RequestStateMachine;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display::render_samples;
use crate::output::{Output, print_state};

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Quit,
    Samples,
    /// 1-based sample number.
    Sample(usize),
    Text(String),
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Line::Text(line.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("quit" | "q"), None, _) => Line::Quit,
        (Some("samples"), None, _) => Line::Samples,
        (Some("sample"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Line::Sample(n),
            _ => Line::Unknown(trimmed.to_string()),
        },
        _ => Line::Unknown(trimmed.to_string()),
    }
}

/// Whether the loop keeps reading after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Read candidate texts from stdin until EOF or `:quit`, analysing each one.
pub async fn run(machine: &RequestStateMachine, output: Output) -> anyhow::Result<()> {
    let mut input = InputStore::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "Paste a news headline, article text, or URL, then press Enter.")?;
    writeln!(stdout, "Commands: :sample N, :samples, :quit")?;
    write!(stdout, "{}", render_samples())?;

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let flow = step(machine, &mut input, &line, output, &mut stdout).await?;
        stdout.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Handle one input line: a command, or new text to analyse and wait for.
async fn step(
    machine: &RequestStateMachine,
    input: &mut InputStore,
    line: &str,
    output: Output,
    out: &mut impl Write,
) -> anyhow::Result<Flow> {
    match parse_line(line) {
        Line::Quit => return Ok(Flow::Quit),
        Line::Samples => {
            write!(out, "{}", render_samples())?;
            return Ok(Flow::Continue);
        }
        Line::Sample(n) => {
            if !input.load_sample(n - 1) {
                writeln!(out, "No sample {n}.")?;
                return Ok(Flow::Continue);
            }
            writeln!(out, "> {}", input.text())?;
        }
        Line::Text(text) => input.set_text(text),
        Line::Unknown(command) => {
            writeln!(out, "Unknown command: {command}")?;
            return Ok(Flow::Continue);
        }
    }

    match machine.submit(input) {
        Ok(submission) => {
            // The request may already have settled; only the settled state is rendered.
            output.pending(out)?;
            let settled = submission.settled().await;
            print_state(out, &settled, output)?;
        }
        Err(reason) => writeln!(out, "{reason}")?,
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use credcheck_client::SimulatedAnalyzer;
    use credcheck_core::{RequestState, SAMPLE_TEXTS};
    use credcheck_demo::SubmitRejected;

    #[test]
    fn plain_lines_are_text() {
        assert_eq!(parse_line("Hello world"), Line::Text("Hello world".into()));
        assert_eq!(parse_line(""), Line::Text(String::new()));
        assert_eq!(parse_line("  spaced  "), Line::Text("  spaced  ".into()));
    }

    #[test]
    fn commands() {
        assert_eq!(parse_line(":quit"), Line::Quit);
        assert_eq!(parse_line(" :q "), Line::Quit);
        assert_eq!(parse_line(":samples"), Line::Samples);
        assert_eq!(parse_line(":sample 2"), Line::Sample(2));
    }

    #[test]
    fn bad_commands_are_unknown() {
        for line in [":sample", ":sample 0", ":sample two", ":sample 1 2", ":help"] {
            assert!(
                matches!(parse_line(line), Line::Unknown(_)),
                "{line:?} should be unknown"
            );
        }
    }

    fn demo_machine() -> RequestStateMachine {
        RequestStateMachine::new(Arc::new(SimulatedAnalyzer::new(Duration::ZERO)))
    }

    async fn drive(machine: &RequestStateMachine, input: &mut InputStore, line: &str) -> String {
        let mut out = Vec::new();
        let flow = step(machine, input, line, Output::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        String::from_utf8(out).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn fast_analysis_renders_one_card() {
        let machine = demo_machine();
        let mut input = InputStore::new();

        for _ in 0..20 {
            let printed = drive(&machine, &mut input, "Local community raises funds").await;
            assert_eq!(printed.matches("Likely Authentic").count(), 1, "{printed}");
            assert!(printed.starts_with("Analyzing...\n"), "{printed}");
        }
    }

    #[tokio::test]
    async fn sample_line_loads_and_analyses() {
        let machine = demo_machine();
        let mut input = InputStore::new();

        let printed = drive(&machine, &mut input, ":sample 3").await;

        assert!(printed.starts_with("> BREAKING: Government announces"));
        assert_eq!(printed.matches("Likely Misinformation").count(), 1);
        assert_eq!(input.text(), SAMPLE_TEXTS[2]);
    }

    #[tokio::test]
    async fn empty_line_is_rejected_without_analysis() {
        let machine = demo_machine();
        let mut input = InputStore::new();

        let printed = drive(&machine, &mut input, "   ").await;

        assert_eq!(printed, format!("{}\n", SubmitRejected::EmptyText));
        assert_eq!(machine.state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let machine = demo_machine();
        let mut out = Vec::new();
        let flow = step(&machine, &mut InputStore::new(), ":quit", Output::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(flow, Flow::Quit);
        assert!(out.is_empty());
    }
}
