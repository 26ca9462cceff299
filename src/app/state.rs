use crate::convert::{
    ConversionOutcome, ConvertError, InputQueue, ItemEvent, QueuedFile, ResultSet,
};

/// Run state of the current batch. A run only ever moves
/// Idle -> Running -> Completed; a reset (or adding more files after
/// completion) returns to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunProgress {
    Idle,
    Running {
        total: usize,
        resolved: usize,
        succeeded: usize,
        failed: usize,
    },
    Completed {
        total: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl Default for RunProgress {
    fn default() -> Self {
        RunProgress::Idle
    }
}

/// User-visible classification of a finished run. Zero successes is its own
/// case because the sensible follow-up action differs from a partial run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSummary {
    AllSucceeded { total: usize },
    Partial { succeeded: usize, failed: usize },
    TotalFailure { failed: usize },
}

/// One line of the per-item details log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetail {
    Converted { new_name: String },
    Failed(ConvertError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLogEntry {
    pub name: String,
    pub detail: ItemDetail,
}

/// All batch state, mutated only through the operations below. The UI layer
/// reads it and forwards user actions; the run thread reaches it only via
/// `apply_event`.
#[derive(Default)]
pub struct BatchState {
    pub progress: RunProgress,
    pub queue: InputQueue,
    pub results: ResultSet,
    pub current_file: Option<String>,
    pub item_log: Vec<ItemLogEntry>,
    pub error_message: Option<String>,
    pub show_details: bool,
}

impl BatchState {
    pub fn is_running(&self) -> bool {
        matches!(self.progress, RunProgress::Running { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.progress, RunProgress::Completed { .. })
    }

    /// Appends files to the queue. A fresh addition invalidates any prior
    /// completion percentage, so the run state returns to Idle (results from
    /// earlier runs are kept and keep accumulating).
    pub fn add_files(&mut self, files: Vec<QueuedFile>) {
        if self.is_running() {
            log::warn!("ignoring add_files while a run is in progress");
            return;
        }
        if files.is_empty() {
            return;
        }
        self.progress = RunProgress::Idle;
        self.current_file = None;
        self.error_message = None;
        self.queue.add(files);
    }

    /// Removes one queued file; only permitted while Idle.
    pub fn remove_queued(&mut self, index: usize) {
        if self.progress != RunProgress::Idle {
            log::warn!("ignoring queue removal outside the Idle state");
            return;
        }
        self.queue.remove_at(index);
    }

    /// Transitions Idle -> Running and hands back the captured work list.
    /// Returns None (and changes nothing) when the queue is empty or a run
    /// is already in flight.
    pub fn begin_run(&mut self) -> Option<Vec<QueuedFile>> {
        if self.is_running() {
            log::warn!("ignoring start while a run is in progress");
            return None;
        }
        if self.queue.is_empty() {
            return None;
        }

        let snapshot = self.queue.take();
        self.progress = RunProgress::Running {
            total: snapshot.len(),
            resolved: 0,
            succeeded: 0,
            failed: 0,
        };
        self.current_file = None;
        self.error_message = None;
        self.item_log.clear();
        Some(snapshot)
    }

    /// Applies one event from the run thread: successes are appended to the
    /// result set immediately, failures only counted; the last resolution
    /// flips the state to Completed.
    pub fn apply_event(&mut self, event: ItemEvent) {
        match event {
            ItemEvent::Started { name } => {
                self.current_file = Some(name);
            }
            ItemEvent::Resolved(outcome) => {
                let RunProgress::Running {
                    total,
                    mut resolved,
                    mut succeeded,
                    mut failed,
                } = self.progress
                else {
                    log::warn!("dropping resolution received outside a run");
                    return;
                };

                resolved += 1;
                match outcome {
                    ConversionOutcome::Success(image) => {
                        succeeded += 1;
                        self.item_log.push(ItemLogEntry {
                            name: image.original_name.clone(),
                            detail: ItemDetail::Converted {
                                new_name: image.new_name.clone(),
                            },
                        });
                        self.results.push(image);
                    }
                    ConversionOutcome::Failure {
                        original_name,
                        error,
                    } => {
                        failed += 1;
                        log::warn!("conversion of {original_name} failed: {error}");
                        self.item_log.push(ItemLogEntry {
                            name: original_name,
                            detail: ItemDetail::Failed(error),
                        });
                    }
                }

                if resolved >= total {
                    self.progress = RunProgress::Completed {
                        total,
                        succeeded,
                        failed,
                    };
                    self.current_file = None;
                    if failed > 0 {
                        self.error_message = Some(format!(
                            "Completed with {failed} failed conversion{}.",
                            if failed == 1 { "" } else { "s" }
                        ));
                    }
                } else {
                    self.progress = RunProgress::Running {
                        total,
                        resolved,
                        succeeded,
                        failed,
                    };
                }
            }
        }
    }

    /// Percentage of batch items resolved, 0-100.
    pub fn progress_percent(&self) -> u8 {
        match self.progress {
            RunProgress::Idle => 0,
            RunProgress::Running { total, resolved, .. } => {
                if total == 0 {
                    0
                } else {
                    ((100.0 * resolved as f32) / total as f32).round() as u8
                }
            }
            RunProgress::Completed { .. } => 100,
        }
    }

    pub fn summary(&self) -> Option<RunSummary> {
        match self.progress {
            RunProgress::Completed {
                total,
                succeeded,
                failed,
            } => Some(if failed == 0 {
                RunSummary::AllSucceeded { total }
            } else if succeeded == 0 {
                RunSummary::TotalFailure { failed }
            } else {
                RunSummary::Partial { succeeded, failed }
            }),
            _ => None,
        }
    }

    pub fn status_text(&self) -> String {
        match self.progress {
            RunProgress::Idle => String::new(),
            RunProgress::Running {
                total,
                resolved,
                succeeded,
                failed,
            } => format!(
                "Converting {resolved}/{total} | ✅ Converted: {succeeded} | ❌ Failed: {failed}"
            ),
            RunProgress::Completed { .. } => match self.summary() {
                Some(RunSummary::AllSucceeded { total }) => {
                    format!("All {total} photos converted")
                }
                Some(RunSummary::Partial { succeeded, failed }) => {
                    format!("Converted {succeeded} photos, {failed} failed")
                }
                Some(RunSummary::TotalFailure { failed }) => {
                    format!("All {failed} conversions failed")
                }
                None => String::new(),
            },
        }
    }

    /// Returns to Idle. `clear_results` distinguishes a full "start new
    /// batch" reset from an add-more continuation that keeps accumulated
    /// results. Ignored while a run is in flight (no cancellation).
    pub fn reset(&mut self, clear_results: bool) {
        if self.is_running() {
            log::warn!("ignoring reset while a run is in progress");
            return;
        }
        self.queue.clear();
        self.progress = RunProgress::Idle;
        self.current_file = None;
        self.error_message = None;
        self.item_log.clear();
        self.show_details = false;
        if clear_results {
            self.results.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{derive_output_name, CameraMetadata, ConvertedImage};
    use std::path::PathBuf;

    fn queued(name: &str) -> QueuedFile {
        QueuedFile {
            name: name.to_string(),
            size: 0,
            path: PathBuf::from(name),
        }
    }

    fn success(name: &str) -> ItemEvent {
        ItemEvent::Resolved(ConversionOutcome::Success(ConvertedImage::new(
            name.to_string(),
            derive_output_name(name),
            name.as_bytes().to_vec(),
            CameraMetadata::default(),
        )))
    }

    fn failure(name: &str) -> ItemEvent {
        ItemEvent::Resolved(ConversionOutcome::Failure {
            original_name: name.to_string(),
            error: ConvertError::RemoteStatus(500),
        })
    }

    /// Runs a whole batch through the state machine, failing the named
    /// items, and collects the published percentage after every event.
    fn drive(state: &mut BatchState, names: &[&str], failing: &[&str]) -> Vec<u8> {
        state.add_files(names.iter().map(|n| queued(n)).collect());
        let snapshot = state.begin_run().expect("run should start");
        assert_eq!(snapshot.len(), names.len());

        let mut percents = vec![state.progress_percent()];
        for file in &snapshot {
            state.apply_event(ItemEvent::Started {
                name: file.name.clone(),
            });
            if failing.contains(&file.name.as_str()) {
                state.apply_event(failure(&file.name));
            } else {
                state.apply_event(success(&file.name));
            }
            percents.push(state.progress_percent());
        }
        percents
    }

    #[test]
    fn all_successes_fill_the_result_set_and_reach_100() {
        let mut state = BatchState::default();
        let percents = drive(&mut state, &["a.cr2", "b.nef", "c.arw"], &[]);

        assert_eq!(state.results.len(), 3);
        assert_eq!(state.summary(), Some(RunSummary::AllSucceeded { total: 3 }));
        assert_eq!(*percents.last().unwrap(), 100);
        assert!(state.queue.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn progress_is_monotone_within_a_run() {
        let mut state = BatchState::default();
        let percents = drive(&mut state, &["a.cr2", "b.nef", "c.arw", "d.dng"], &["b.nef"]);

        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(percents[0], 0);
        assert_eq!(*percents.last().unwrap(), 100);
    }

    #[test]
    fn failing_subset_leaves_complementary_items_in_order() {
        let mut state = BatchState::default();
        drive(
            &mut state,
            &["a.cr2", "b.nef", "c.arw", "d.dng"],
            &["b.nef", "d.dng"],
        );

        let names: Vec<_> = state.results.iter().map(|i| i.new_name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "c.jpg"]);
        assert_eq!(
            state.summary(),
            Some(RunSummary::Partial {
                succeeded: 2,
                failed: 2
            })
        );
    }

    #[test]
    fn partial_scenario_reports_one_failure_and_ordered_successes() {
        let mut state = BatchState::default();
        drive(&mut state, &["A.CR2", "B.NEF", "C.ARW"], &["B.NEF"]);

        let names: Vec<_> = state.results.iter().map(|i| i.new_name.as_str()).collect();
        assert_eq!(names, ["A.jpg", "C.jpg"]);
        assert_eq!(
            state.summary(),
            Some(RunSummary::Partial {
                succeeded: 2,
                failed: 1
            })
        );
    }

    #[test]
    fn single_item_failure_is_a_total_failure_with_empty_results() {
        let mut state = BatchState::default();
        drive(&mut state, &["X.DNG"], &["X.DNG"]);

        assert_eq!(state.summary(), Some(RunSummary::TotalFailure { failed: 1 }));
        assert!(state.results.is_empty());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn starting_while_running_is_a_noop() {
        let mut state = BatchState::default();
        state.add_files(vec![queued("a.cr2")]);
        state.queue.add(vec![queued("b.nef")]);
        let first = state.begin_run();
        assert!(first.is_some());
        assert!(state.begin_run().is_none());
        assert!(state.is_running());
    }

    #[test]
    fn starting_with_an_empty_queue_is_a_noop() {
        let mut state = BatchState::default();
        assert!(state.begin_run().is_none());
        assert_eq!(state.progress, RunProgress::Idle);
    }

    #[test]
    fn mutation_is_gated_while_running() {
        let mut state = BatchState::default();
        state.add_files(vec![queued("a.cr2")]);
        state.begin_run().unwrap();

        state.add_files(vec![queued("late.nef")]);
        state.remove_queued(0);
        state.reset(true);
        assert!(state.is_running());
        assert!(state.queue.is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = BatchState::default();
        drive(&mut state, &["a.cr2"], &[]);

        state.reset(true);
        assert!(state.queue.is_empty());
        assert_eq!(state.progress_percent(), 0);
        assert!(state.results.is_empty());

        state.reset(true);
        assert!(state.queue.is_empty());
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn adding_after_completion_keeps_results_and_zeroes_progress() {
        let mut state = BatchState::default();
        drive(&mut state, &["a.cr2"], &[]);
        assert_eq!(state.progress_percent(), 100);

        state.add_files(vec![queued("b.nef")]);
        assert_eq!(state.progress_percent(), 0);
        assert_eq!(state.progress, RunProgress::Idle);
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn results_accumulate_across_runs_until_explicit_reset() {
        let mut state = BatchState::default();
        drive(&mut state, &["a.cr2"], &[]);
        drive(&mut state, &["b.nef"], &[]);

        let names: Vec<_> = state.results.iter().map(|i| i.new_name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg"]);

        state.reset(true);
        assert!(state.results.is_empty());
    }

    #[test]
    fn status_text_distinguishes_the_three_outcomes() {
        let mut all_ok = BatchState::default();
        drive(&mut all_ok, &["a.cr2"], &[]);
        assert_eq!(all_ok.status_text(), "All 1 photos converted");

        let mut partial = BatchState::default();
        drive(&mut partial, &["a.cr2", "b.nef"], &["b.nef"]);
        assert_eq!(partial.status_text(), "Converted 1 photos, 1 failed");

        let mut none = BatchState::default();
        drive(&mut none, &["a.cr2"], &["a.cr2"]);
        assert_eq!(none.status_text(), "All 1 conversions failed");
    }
}
