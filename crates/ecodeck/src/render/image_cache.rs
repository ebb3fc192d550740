use anyhow::{Context, Result};
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};

type Fetched = (String, Result<egui::ColorImage>);

enum Slot {
    Pending,
    Ready(egui::TextureHandle),
    /// Never retried; the slide keeps its skeleton.
    Failed,
}

/// Remote images keyed by URL, fetched once each on background threads.
pub struct ImageCache {
    slots: HashMap<String, Slot>,
    tx: Sender<Fetched>,
    rx: Receiver<Fetched>,
}

impl ImageCache {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            slots: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Start fetching `url` unless it was requested before.
    pub fn request(&mut self, ctx: &egui::Context, url: &str) {
        if self.slots.contains_key(url) {
            return;
        }
        self.slots.insert(url.to_string(), Slot::Pending);

        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let owned = url.to_string();
        let spawned = std::thread::Builder::new()
            .name("image-fetch".to_string())
            .spawn(move || {
                let result = fetch(&owned);
                // The receiver only disappears when the app is closing.
                let _ = tx.send((owned, result));
                ctx.request_repaint();
            });
        if let Err(e) = spawned {
            log::warn!("could not start image fetch for {url}: {e}");
            self.slots.insert(url.to_string(), Slot::Failed);
        }
    }

    /// Upload any finished downloads as textures.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((url, result)) = self.rx.try_recv() {
            self.store(ctx, url, result);
        }
    }

    fn store(&mut self, ctx: &egui::Context, url: String, result: Result<egui::ColorImage>) {
        if !self.slots.contains_key(&url) {
            log::debug!("discarding image {url} no longer in use");
            return;
        }
        let slot = match result {
            Ok(image) => {
                log::debug!("loaded image {url}");
                Slot::Ready(ctx.load_texture(&url, image, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                log::warn!("image {url} failed to load: {e:#}");
                Slot::Failed
            }
        };
        self.slots.insert(url, slot);
    }

    pub fn texture(&self, url: &str) -> Option<&egui::TextureHandle> {
        match self.slots.get(url) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    /// Drop every slot whose URL is not in `keep`, releasing its texture.
    pub fn retain_only(&mut self, keep: &HashSet<String>) {
        let before = self.slots.len();
        self.slots.retain(|url, _| keep.contains(url));
        let dropped = before - self.slots.len();
        if dropped > 0 {
            log::debug!("released {dropped} unused images");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.slots.values().any(|slot| matches!(slot, Slot::Pending))
    }
}

fn fetch(url: &str) -> Result<egui::ColorImage> {
    let mut response = ureq::get(url)
        .call()
        .with_context(|| format!("Failed to fetch {url}"))?;
    let bytes = response
        .body_mut()
        .read_to_vec()
        .context("Failed to read image body")?;
    decode(&bytes)
}

fn decode(bytes: &[u8]) -> Result<egui::ColorImage> {
    let image = image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_raw(),
    ))
}
