use std::path::{Path, PathBuf};

/// RAW extensions the remote endpoint accepts (it may support more, but
/// these are the ones we let into the queue).
const RAW_EXTENSIONS: [&str; 10] = [
    "cr2", "cr3", "nef", "arw", "dng", "raf", "orf", "rw2", "pef", "srw",
];

pub fn is_raw_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// One user-selected input awaiting conversion. Never mutated after
/// creation; the path is the opaque handle read at dispatch time.
#[derive(Debug, Clone)]
pub struct QueuedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl QueuedFile {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        Some(Self { name, size, path })
    }
}

/// Files awaiting conversion, in submission order. Duplicate names are
/// kept distinct by position.
#[derive(Debug, Default)]
pub struct InputQueue {
    files: Vec<QueuedFile>,
}

impl InputQueue {
    pub fn add(&mut self, files: impl IntoIterator<Item = QueuedFile>) {
        self.files.extend(files);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<QueuedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            log::warn!("ignoring removal of out-of-range queue index {index}");
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Drains the queue into the immutable work list for a run.
    pub fn take(&mut self) -> Vec<QueuedFile> {
        std::mem::take(&mut self.files)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedFile> {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> QueuedFile {
        QueuedFile {
            name: name.to_string(),
            size: 0,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn add_preserves_submission_order_and_duplicates() {
        let mut queue = InputQueue::default();
        queue.add([file("a.cr2"), file("b.nef"), file("a.cr2")]);
        let names: Vec<_> = queue.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.cr2", "b.nef", "a.cr2"]);
    }

    #[test]
    fn remove_at_takes_exactly_one_position() {
        let mut queue = InputQueue::default();
        queue.add([file("a.cr2"), file("b.nef"), file("c.arw")]);
        let removed = queue.remove_at(1).unwrap();
        assert_eq!(removed.name, "b.nef");
        let names: Vec<_> = queue.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.cr2", "c.arw"]);
    }

    #[test]
    fn remove_at_out_of_range_is_a_noop() {
        let mut queue = InputQueue::default();
        queue.add([file("a.cr2")]);
        assert!(queue.remove_at(5).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn take_drains_the_queue() {
        let mut queue = InputQueue::default();
        queue.add([file("a.cr2"), file("b.nef")]);
        let snapshot = queue.take();
        assert_eq!(snapshot.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn raw_extension_check_is_case_insensitive() {
        assert!(is_raw_file(Path::new("shot.CR3")));
        assert!(is_raw_file(Path::new("shot.nef")));
        assert!(!is_raw_file(Path::new("shot.jpg")));
        assert!(!is_raw_file(Path::new("noext")));
    }
}
