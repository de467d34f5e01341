//! Progress reporting for ask-group execution

use colored::Colorize;
use confluence_application::ProgressNotifier;
use confluence_domain::{CollectionReport, Participant, ResponseSlot, SlotState};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress with progress bars: one for delivery, one for answers
pub struct ProgressReporter {
    multi: MultiProgress,
    delivery_bar: Mutex<Option<ProgressBar>>,
    answer_bar: Mutex<Option<ProgressBar>>,
    summary_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            delivery_bar: Mutex::new(None),
            answer_bar: Mutex::new(None),
            summary_spinner: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn add_bar(&self, prefix: &str, total: usize) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix(prefix.to_string());
        pb
    }

    fn with_bar(slot: &Mutex<Option<ProgressBar>>, f: impl FnOnce(&ProgressBar)) {
        if let Some(pb) = slot.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            f(pb);
        }
    }

    fn take_bar(slot: &Mutex<Option<ProgressBar>>) -> Option<ProgressBar> {
        slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    fn store_bar(slot: &Mutex<Option<ProgressBar>>, pb: ProgressBar) {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_dispatch_start(&self, total: usize) {
        let pb = self.add_bar("Delivering", total);
        pb.set_message("Starting...");
        Self::store_bar(&self.delivery_bar, pb);

        let answers = self.add_bar("Answers", total);
        answers.set_message("Waiting...");
        Self::store_bar(&self.answer_bar, answers);
    }

    fn on_prompt_delivered(&self, participant: &Participant, delivered: bool) {
        Self::with_bar(&self.delivery_bar, |pb| {
            let status = if delivered {
                format!("{} {}", "v".green(), participant)
            } else {
                format!("{} {}", "x".red(), participant)
            };
            pb.set_message(status);
            pb.inc(1);
            if pb.position() >= pb.length().unwrap_or(0) {
                pb.finish_with_message(format!("{}", "delivered".green()));
            }
        });
    }

    fn on_slot_resolved(&self, slot: &ResponseSlot) {
        Self::with_bar(&self.answer_bar, |pb| {
            let status = match slot.state() {
                SlotState::Answered(_) => format!("{} {}", "v".green(), slot.participant()),
                SlotState::TimedOut => format!("{} {}", "-".yellow(), slot.participant()),
                _ => format!("{} {}", "x".red(), slot.participant()),
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_collection_complete(&self, report: &CollectionReport) {
        if let Some(pb) = Self::take_bar(&self.delivery_bar) {
            pb.finish_and_clear();
        }
        if let Some(pb) = Self::take_bar(&self.answer_bar) {
            pb.finish_with_message(format!(
                "{} answered",
                report.answered_count().to_string().green()
            ));
        }
    }

    fn on_summary_start(&self) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Summarizing");
        pb.set_message("asking the oracle...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Self::store_bar(&self.summary_spinner, pb);
    }

    fn on_summary_complete(&self, success: bool) {
        if let Some(pb) = Self::take_bar(&self.summary_spinner) {
            if success {
                pb.finish_with_message(format!("{}", "done".green()));
            } else {
                pb.finish_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, total: usize) {
        println!("{} {} ({} participants)", "->".cyan(), "Asking".bold(), total);
    }

    fn on_prompt_delivered(&self, participant: &Participant, delivered: bool) {
        if !delivered {
            println!("  {} {} (not delivered)", "x".red(), participant);
        }
    }

    fn on_slot_resolved(&self, slot: &ResponseSlot) {
        if let SlotState::Answered(_) = slot.state() {
            println!("  {} {} answered", "v".green(), slot.participant());
        }
    }

    fn on_collection_complete(&self, report: &CollectionReport) {
        println!(
            "{} {} of {} answered",
            "->".cyan(),
            report.answered_count(),
            report.slots().len()
        );
    }
}
