//! Progress bar display for the bootstrap steps

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::steps::{Step, StepOutcome};

/// Progress display for a bootstrap run
pub struct ProgressDisplay {
    /// One tick per step
    step_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total step count
    pub fn new(total_steps: u64) -> Self {
        let step_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let step_pb = ProgressBar::new(total_steps);
        step_pb.set_style(step_style);

        Self { step_pb }
    }

    /// A display that draws nothing, for tests
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            step_pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the step being executed
    pub fn start_step(&self, step: Step, current: usize, total: usize) {
        self.step_pb
            .set_message(format!("({current}/{total}) {}", step.label()));
    }

    /// Hide the bar while `f` runs, so child process output is not interleaved with it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.step_pb.suspend(f)
    }

    /// Record the outcome of a step and advance
    pub fn complete_step(&self, step: Step, outcome: &StepOutcome) {
        let line = match outcome {
            StepOutcome::Done => format!("{} {}", Style::new().green().apply_to("✓"), step),
            StepOutcome::AlreadySatisfied => format!(
                "{} {} {}",
                Style::new().green().apply_to("✓"),
                step,
                Style::new().dim().apply_to("(already done)")
            ),
            StepOutcome::Warned(message) => format!(
                "{} {}: {}",
                Style::new().yellow().apply_to("!"),
                step,
                Style::new().yellow().apply_to(message)
            ),
            StepOutcome::Skipped(reason) => format!(
                "{} {} {}",
                Style::new().dim().apply_to("-"),
                step,
                Style::new().dim().apply_to(format!("(skipped: {reason})"))
            ),
        };
        self.println(line);
        self.step_pb.inc(1);
    }

    /// Mark the failing step
    pub fn fail_step(&self, step: Step) {
        self.println(format!("{} {}", Style::new().red().apply_to("✗"), step));
    }

    /// A hidden bar swallows `println`, so fall back to plain stderr
    fn println(&self, line: String) {
        if self.step_pb.is_hidden() {
            eprintln!("{line}");
        } else {
            self.step_pb.println(line);
        }
    }

    /// Finish after the last step
    pub fn finish(&self) {
        self.step_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.step_pb.abandon();
    }
}
