//! Line-based prompts and styled output over any reader/writer pair.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use hms_core::render::Table;
use hms_core::{FieldSpec, OverlongPolicy};
use thiserror::Error;

use crate::menu::Menu;

const BANNER_WIDTH: usize = 121;

/// Raised when the input reaches end of file; the session treats it as exit.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    #[must_use]
    pub const fn with_screen_clearing(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    fn read_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", label.green())?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt until the answer parses as `N`.
    pub fn prompt_number<N: FromStr>(&mut self, label: &str) -> anyhow::Result<N> {
        loop {
            if let Ok(value) = self.prompt(label)?.trim().parse() {
                return Ok(value);
            }
            self.error("Invalid input!")?;
        }
    }

    /// Prompt until the answer is a finite decimal number.
    pub fn prompt_amount(&mut self, label: &str) -> anyhow::Result<f64> {
        loop {
            let value: f64 = self.prompt_number(label)?;
            if value.is_finite() {
                return Ok(value);
            }
            self.error("Invalid input!")?;
        }
    }

    /// Prompt until the answer is acceptable for `spec` under `policy`.
    pub fn prompt_field(
        &mut self,
        label: &str,
        spec: FieldSpec,
        policy: OverlongPolicy,
    ) -> anyhow::Result<String> {
        loop {
            let line = self.prompt(label)?;
            match spec.apply(&line, policy) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    /// Show `M` and read a menu number. `None` means a number outside the menu.
    pub fn choose<M: Menu>(&mut self) -> anyhow::Result<Option<M>> {
        self.heading(M::TITLE)?;
        self.rule()?;
        for (idx, item) in M::ITEMS.iter().enumerate() {
            writeln!(self.output, "{}", format!("{}. {item}", idx + 1).yellow())?;
        }
        self.rule()?;

        let mut label = "Enter your choice: ".to_string();
        loop {
            if let Ok(choice) = self.prompt(&label)?.trim().parse::<u32>() {
                return Ok(M::from_choice(choice));
            }
            self.error("Invalid input!")?;
            label = format!("Enter the valid option({}): ", M::valid_options());
        }
    }

    pub fn banner(&mut self) -> anyhow::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        let edge = "=".repeat(BANNER_WIDTH);
        let title = format!(
            "{:*^width$}",
            "   WELCOME TO HOSPITAL MANAGEMENT SYSTEM   ",
            width = BANNER_WIDTH
        );
        for line in [&edge, &title, &edge] {
            writeln!(self.output, "{}", line.as_str().on_blue().bold())?;
        }
        Ok(())
    }

    pub fn heading(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", format!("\n--- {title} ---").magenta().bold())?;
        Ok(())
    }

    pub fn rule(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", "_".repeat(BANNER_WIDTH).blue())?;
        Ok(())
    }

    pub fn table(&mut self, table: &Table) -> anyhow::Result<()> {
        let rule = Table::rule();
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "{}", table.header)?;
        writeln!(self.output, "{rule}")?;
        for row in &table.rows {
            writeln!(self.output, "{}", row.as_str().cyan())?;
        }
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }

    pub fn success(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", message.green().bold())?;
        Ok(())
    }

    pub fn notice(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", message.cyan())?;
        Ok(())
    }

    pub fn pause(&mut self) -> anyhow::Result<()> {
        write!(self.output, "{}", "\nPress Enter to continue...".green())?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }
}
