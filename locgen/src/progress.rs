use indicatif::{ProgressBar, ProgressStyle};

/// Console progress over a known number of network batches. Batches
/// run at roughly one per second, so the ETA readout is meaningful.
pub fn batch_bar(label: String, batches: usize) -> ProgressBar {
    let bar = ProgressBar::new(batches as u64);
    bar.set_message(label);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} eta {eta}")
            .expect("incorrect progress bar format string")
            .progress_chars("=> "),
    );
    bar
}
