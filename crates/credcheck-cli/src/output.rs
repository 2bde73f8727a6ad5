use std::io::Write;

use anyhow::Context;
use credcheck_client::simulated::DISCLAIMER;
use credcheck_core::{RequestState, action_label};

use crate::display::render_state;

/// How settled states are written out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub simulated: bool,
}

impl Output {
    /// Announce an in-flight request. Silent in JSON mode.
    pub fn pending(&self, out: &mut impl Write) -> anyhow::Result<()> {
        if !self.json {
            writeln!(out, "{}", action_label(&RequestState::Pending))?;
        }
        Ok(())
    }
}

pub fn print_state(out: &mut impl Write, state: &RequestState, output: Output) -> anyhow::Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(state).context("serialising state")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }
    write!(out, "{}", render_state(state))?;
    if output.simulated && state.result().is_some() {
        writeln!(out)?;
        writeln!(out, "{DISCLAIMER}")?;
    }
    Ok(())
}
