//! Console progress for the content pass.

use crate::domain::FileRecord;
use crate::render::ReportProgress;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl ReportProgress for ConsoleProgress {
    fn start(&mut self, total_files: usize) {
        println!("📄 Processing files...");
        let bar = ProgressBar::new(total_files as u64);
        let bar_style = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(bar_style);
        self.bar = Some(bar);
    }

    fn file(&mut self, record: &FileRecord) {
        if let Some(bar) = &self.bar {
            bar.set_message(record.relative_path.clone());
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
