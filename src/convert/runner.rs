use std::sync::mpsc::Sender;

use crate::convert::client::Converter;
use crate::convert::queue::QueuedFile;
use crate::convert::types::ItemEvent;

/// Drives a captured work list through the converter, strictly one item at
/// a time. Each dispatch is awaited to completion before the next begins,
/// so resolved items reach the UI in submission order.
pub struct BatchRunner<C: Converter> {
    converter: C,
    items: Vec<QueuedFile>,
}

impl<C: Converter> BatchRunner<C> {
    pub fn new(converter: C, items: Vec<QueuedFile>) -> Self {
        Self { converter, items }
    }

    pub async fn run(self, events: &Sender<ItemEvent>) {
        let total = self.items.len();
        for (index, file) in self.items.iter().enumerate() {
            log::info!("converting {} ({} of {total})", file.name, index + 1);
            events
                .send(ItemEvent::Started {
                    name: file.name.clone(),
                })
                .unwrap_or_default();

            let outcome = self.converter.convert(file).await;
            events.send(ItemEvent::Resolved(outcome)).unwrap_or_default();
        }
        log::info!("batch of {total} items finished");
    }
}
