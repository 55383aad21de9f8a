use std::io::{self, Write};
use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

const TEMPLATE: &str = "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}";

/// Creates the run's progress bar, drawn on stdout next to the log lines.
///
/// Only the first call creates a bar; later calls return the same one.
pub fn start(total: u64) -> &'static ProgressBar {
    PROGRESS.get_or_init(|| {
        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            pb.set_style(style.progress_chars("█▓░").tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ]));
        }
        pb
    })
}

pub fn finish() {
    if let Some(pb) = PROGRESS.get() {
        pb.finish_and_clear();
    }
}

/// Log sink that keeps log lines from tearing the progress bar.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) if !pb.is_finished() => pb.suspend(|| io::stdout().write_all(buf))?,
            _ => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
