use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::prelude::*;

impl Dfa {
    /// Returns a string representation of the transition table. The initial state is marked
    /// with `→`, accepting states with `*` and missing transitions are shown as `-`.
    pub fn transition_table(&self) -> String {
        let executor = self.executor();
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.unique_symbols().map(|sym| format!("{sym:?}"))),
        );
        for q in self.state_ids().unique() {
            let mut row = vec![format!(
                "{}{}{}",
                if self.is_initial(q) { "→" } else { "" },
                if self.is_accepting(q) { "*" } else { "" },
                q
            )];
            row.extend(self.alphabet.unique_symbols().map(|sym| {
                executor
                    .next_state(q, sym)
                    .map_or_else(|| "-".to_string(), ToString::to_string)
            }));
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for SimulationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.symbol {
            None => write!(f, "{}: start in {}", self.index, self.state)?,
            Some(sym) => write!(f, "{}: read '{sym}' -> {}", self.index, self.state)?,
        }
        write!(f, " | remaining {:?}", self.remaining)
    }
}

impl std::fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.accepted { "accepted" } else { "rejected" };
        write!(f, "{:?} {verdict}, path [{}]", self.input, self.path.iter().join(" -> "))?;
        if let Some(message) = self.failure_message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Halt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Halt::Completed { accepted: true } => write!(f, "accepted"),
            Halt::Completed { accepted: false } => write!(f, "rejected"),
            Halt::Failed(failure) => write!(f, "failed: {failure}"),
        }
    }
}

impl Simulation {
    /// Lists the steps one per line, followed by the reason the simulation ended.
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.halt.to_string()))
            .join("\n")
    }

    /// Like [`Simulation::render`], but colors the states and the final verdict for a terminal.
    pub fn render_colored(&self) -> String {
        let steps = self.steps.iter().map(|step| {
            let state = step.state.blue().to_string();
            match step.symbol {
                None => format!("{}: start in {state}", step.index),
                Some(sym) => format!("{}: read '{}' -> {state}", step.index, sym.bold()),
            }
        });
        let halt = match &self.halt {
            Halt::Completed { accepted: true } => self.halt.green().to_string(),
            Halt::Completed { accepted: false } => self.halt.yellow().to_string(),
            Halt::Failed(_) => self.halt.red().to_string(),
        };
        steps.chain(std::iter::once(halt)).join("\n")
    }
}
