/// ProgressReporter port for reporting progress during a run
///
/// Informational messages and failures are reported separately so that
/// adapters can route them to different streams.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports progress through the target list
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    ///
    /// The default implementation ignores progress updates.
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
