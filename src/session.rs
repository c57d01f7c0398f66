// src/session.rs

//! Interactive recipe entry
//!
//! Line-oriented prompts: recipe name (empty stops the session),
//! description, meal codes, then ingredient lines until an empty line.
//! End of input is treated like an empty answer.

use crate::error::Result;
use crate::ingest::{IngestReport, RecipeDraft, ingest_recipe};
use crate::parser::IngredientLine;
use crate::vocabulary::{Category, registry};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use tracing::debug;

/// Shown when an ingredient line does not parse
pub const INCONCLUSIVE: &str = "Quantity or measure is inconclusive!";

/// Prompt-driven recipe entry over any reader and writer
pub struct IngestSession<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IngestSession<R, W> {
    /// Create a session reading answers from `input` and writing prompts to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collect and store recipes until an empty name; returns one report per recipe
    pub fn run(&mut self, conn: &mut Connection) -> Result<Vec<IngestReport>> {
        let mut reports = Vec::new();

        while let Some(draft) = self.read_draft()? {
            let report = ingest_recipe(conn, &draft)?;
            writeln!(
                self.output,
                "Saved '{}' with {} ingredient(s).",
                draft.name,
                report.stored.len()
            )?;
            reports.push(report);
        }

        Ok(reports)
    }

    /// Prompt for one recipe; `None` once the user enters an empty name
    pub fn read_draft(&mut self) -> Result<Option<RecipeDraft>> {
        let name = self.ask("Recipe name: ")?.unwrap_or_default();
        if name.is_empty() {
            return Ok(None);
        }

        let description = self.ask("Recipe description: ")?.unwrap_or_default();
        let mut draft = RecipeDraft::new(name, description);
        let Some(meal_ids) = self.ask_meals()? else {
            debug!("Input ended before meals were chosen for '{}'", draft.name);
            return Ok(None);
        };
        draft.meal_ids = meal_ids;

        while let Some(line) = self.ask("Input quantity of ingredient <press enter to stop>: ")? {
            if line.is_empty() {
                break;
            }
            match IngredientLine::parse(&line) {
                Ok(parsed) => debug!("Accepted ingredient line: {}", parsed),
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "{}", INCONCLUSIVE)?;
                    continue;
                }
                Err(e) => return Err(e),
            }
            draft.lines.push(line);
        }

        Ok(Some(draft))
    }

    /// Ask for meal codes until one or more valid codes are given; `None` at end of input
    fn ask_meals(&mut self) -> Result<Option<Vec<i64>>> {
        let menu = registry()
            .entries(Category::Meal)
            .map(|(id, name)| format!("{}) {}", id, name))
            .collect::<Vec<_>>()
            .join(" ");

        loop {
            writeln!(self.output, "{}", menu)?;
            let Some(answer) = self.ask("When the dish can be served: ")? else {
                return Ok(None);
            };
            if let Some(ids) = parse_meal_codes(&answer) {
                return Ok(Some(ids));
            }
            writeln!(self.output, "Please enter meal numbers from the list, separated by spaces.")?;
        }
    }

    /// Write a prompt and read one trimmed answer; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }
}

/// Parse space separated meal codes; `None` if empty or any code is not a meal id
pub fn parse_meal_codes(answer: &str) -> Option<Vec<i64>> {
    let mut ids = Vec::new();
    for token in answer.split_whitespace() {
        let id: i64 = token.parse().ok()?;
        registry().name_of(Category::Meal, id).ok()?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    (!ids.is_empty()).then_some(ids)
}
