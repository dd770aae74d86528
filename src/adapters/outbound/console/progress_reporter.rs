use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// ConsoleProgressReporter adapter for reporting progress to the terminal
///
/// Informational and completion messages go to stdout, errors and warnings
/// to stderr. Progress through the target list is drawn with an indicatif
/// bar on stderr, which indicatif hides when stderr is not a terminal.
pub struct ConsoleProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template("   {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} - {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-");
            pb.set_style(style);
            *pb_option = Some(pb.clone());
            pb
        }
    }

    /// Prints without tearing an active progress bar
    fn print(&self, print: impl FnOnce()) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }
}

impl Default for ConsoleProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report(&self, message: &str) {
        self.print(|| println!("{}", message));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.print(|| eprintln!("{}", message));
    }

    fn report_completion(&self, message: &str) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
        println!();
        println!("{}", message);
    }
}
