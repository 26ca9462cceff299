use crate::convert::types::CameraMetadata;

/// A successfully converted photo held in memory until the batch is reset.
#[derive(Clone)]
pub struct ConvertedImage {
    pub original_name: String,
    pub new_name: String,
    pub bytes: Vec<u8>,
    pub metadata: CameraMetadata,
    preview: Option<egui::TextureHandle>,
    preview_failed: bool,
}

impl ConvertedImage {
    pub fn new(
        original_name: String,
        new_name: String,
        bytes: Vec<u8>,
        metadata: CameraMetadata,
    ) -> Self {
        Self {
            original_name,
            new_name,
            bytes,
            metadata,
            preview: None,
            preview_failed: false,
        }
    }

    /// Lazily decodes the JPEG payload into a texture the first time the
    /// item is rendered. Decode failures are remembered so we don't retry
    /// every frame.
    pub fn preview_texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        if self.preview.is_none() && !self.preview_failed {
            match image::load_from_memory(&self.bytes) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    self.preview =
                        Some(ctx.load_texture(self.new_name.clone(), color, egui::TextureOptions::LINEAR));
                }
                Err(err) => {
                    log::warn!("could not decode preview for {}: {err}", self.new_name);
                    self.preview_failed = true;
                }
            }
        }
        self.preview.as_ref()
    }

    /// Drops the texture so the GPU copy is freed when the item is evicted.
    pub fn release_preview(&mut self) {
        self.preview = None;
    }
}

/// Ordered, append-only collection of converted photos. Accumulates across
/// runs until an explicit new-batch reset.
#[derive(Default)]
pub struct ResultSet {
    items: Vec<ConvertedImage>,
}

impl ResultSet {
    pub fn push(&mut self, item: ConvertedImage) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConvertedImage> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ConvertedImage> {
        self.items.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&ConvertedImage> {
        self.items.get(index)
    }

    /// (name, bytes) pairs in arrival order, for the archive packager.
    pub fn archive_entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.items
            .iter()
            .map(|item| (item.new_name.as_str(), item.bytes.as_slice()))
    }

    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.release_preview();
        }
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ConvertedImage {
        ConvertedImage::new(
            format!("{name}.cr2"),
            format!("{name}.jpg"),
            name.as_bytes().to_vec(),
            CameraMetadata::default(),
        )
    }

    #[test]
    fn results_keep_arrival_order() {
        let mut results = ResultSet::default();
        results.push(item("a"));
        results.push(item("b"));
        let names: Vec<_> = results.iter().map(|i| i.new_name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn archive_entries_expose_new_names_and_payloads() {
        let mut results = ResultSet::default();
        results.push(item("a"));
        let entries: Vec<_> = results.archive_entries().collect();
        assert_eq!(entries, [("a.jpg", b"a".as_slice())]);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut results = ResultSet::default();
        results.push(item("a"));
        results.clear();
        assert!(results.is_empty());
    }
}
