mod state;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

use eframe::egui;
use ignore::Walk;

use crate::convert::{is_raw_file, BatchRunner, ItemEvent, QueuedFile, RemoteConverter};
use crate::utils::{archive, config::AppConfig};

pub use state::{BatchState, ItemDetail, ItemLogEntry, RunProgress, RunSummary};

pub struct RawBatchApp {
    config: AppConfig,
    state: BatchState,
    event_receiver: Option<Receiver<ItemEvent>>,
}

impl RawBatchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        log::info!("conversion endpoint: {}", config.endpoint);
        Self {
            config,
            state: BatchState::default(),
            event_receiver: None,
        }
    }

    /// Feeds selected or dropped paths into the queue, dropping anything
    /// that is not a RAW file the endpoint could handle.
    pub fn add_paths(&mut self, paths: Vec<PathBuf>) {
        let mut accepted = Vec::new();
        for path in paths {
            if !is_raw_file(&path) {
                log::warn!("skipping non-RAW selection: {}", path.display());
                continue;
            }
            match QueuedFile::from_path(path) {
                Some(file) => accepted.push(file),
                None => log::warn!("skipping selection with unusable file name"),
            }
        }
        self.state.add_files(accepted);
    }

    /// Walks a folder (honoring ignore files) and queues every RAW file
    /// found, in traversal order.
    pub fn add_folder(&mut self, root: &Path) {
        let mut paths = Vec::new();
        for entry in Walk::new(root) {
            match entry {
                Ok(entry) if entry.path().is_file() => paths.push(entry.path().to_path_buf()),
                Ok(_) => {}
                Err(err) => log::warn!("error walking {}: {err}", root.display()),
            }
        }
        self.add_paths(paths);
    }

    /// Captures the queue and runs it on a background thread, one item at a
    /// time, streaming events back through the channel drained each frame.
    pub fn start_run(&mut self) {
        let Some(snapshot) = self.state.begin_run() else {
            return;
        };
        log::info!("starting batch of {} items", snapshot.len());

        let (sender, receiver) = channel();
        self.event_receiver = Some(receiver);

        let converter = RemoteConverter::new(self.config.endpoint.clone(), self.config.quality);
        let runner = BatchRunner::new(converter, snapshot);
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                runner.run(&sender).await;
            });
        });
    }

    pub fn reset_batch(&mut self) {
        if self.state.is_running() {
            return;
        }
        self.event_receiver = None;
        self.state.reset(true);
    }

    /// Packs every converted photo into one zip and writes it where the
    /// user chooses. A no-op while results are empty.
    pub fn download_all(&mut self) {
        if self.state.results.is_empty() {
            return;
        }

        let bytes = match archive::pack(self.state.results.archive_entries()) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("archive packing failed: {err}");
                self.state.error_message = Some(format!("Could not build archive: {err}"));
                return;
            }
        };

        let Some(target) = rfd::FileDialog::new()
            .set_file_name("converted_photos.zip")
            .save_file()
        else {
            return;
        };

        match std::fs::write(&target, bytes) {
            Ok(()) => {
                log::info!("archive written to {}", target.display());
                if let Some(parent) = target.parent() {
                    let _ = open::that(parent);
                }
            }
            Err(err) => {
                log::error!("could not write archive: {err}");
                self.state.error_message = Some(format!("Could not write archive: {err}"));
            }
        }
    }

    /// Saves one converted photo through a save dialog.
    pub fn save_item(&mut self, index: usize) {
        let (name, bytes) = match self.state.results.get(index) {
            Some(item) => (item.new_name.clone(), item.bytes.clone()),
            None => return,
        };
        let Some(target) = rfd::FileDialog::new().set_file_name(&name).save_file() else {
            return;
        };
        if let Err(err) = std::fs::write(&target, bytes) {
            log::error!("could not save {name}: {err}");
            self.state.error_message = Some(format!("Could not save {name}: {err}"));
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        if let Some(receiver) = &self.event_receiver {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }

        let had_updates = !events.is_empty();
        for event in events {
            self.state.apply_event(event);
        }

        if self.state.is_completed() && self.event_receiver.is_some() {
            self.event_receiver = None;
            log::info!("{}", self.state.status_text());
        }

        if had_updates || self.state.is_running() {
            ctx.request_repaint();
        }
    }

    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() && !self.state.is_running() {
            self.add_paths(dropped);
        }
    }
}

impl eframe::App for RawBatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.collect_dropped_files(ctx);
        self.render(ctx);
    }
}
