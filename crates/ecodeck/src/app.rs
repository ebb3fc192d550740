use eframe::egui;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crate::config::Config;
use crate::generation::{self, GeminiClient, SlideSource};
use crate::render;
use crate::render::deck::DeckView;
use crate::render::image_cache::ImageCache;
use crate::slide::{self, Presentation};
use crate::state::{Deck, Effect, Event, Lifecycle};
use crate::theme::Theme;

const WINDOW_TITLE: &str = "EcoChem Slides";

struct EcoDeckApp {
    deck: Deck,
    source: Arc<dyn SlideSource>,
    image_host: String,
    theme: Theme,
    image_cache: ImageCache,
    results_tx: Sender<generation::Result<Presentation>>,
    results_rx: Receiver<generation::Result<Presentation>>,
    mounted: bool,
    generation_started: Option<Instant>,
}

impl EcoDeckApp {
    fn new(source: Arc<dyn SlideSource>, image_host: String) -> Self {
        let (results_tx, results_rx) = mpsc::channel();
        Self {
            deck: Deck::new(),
            source,
            image_host,
            theme: Theme::emerald(),
            image_cache: ImageCache::new(),
            results_tx,
            results_rx,
            mounted: false,
            generation_started: None,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        for effect in self.deck.dispatch(event) {
            match effect {
                Effect::StartGeneration => self.start_generation(ctx),
                Effect::SetFullscreen(on) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
                }
            }
        }
    }

    fn start_generation(&mut self, ctx: &egui::Context) {
        log::info!("starting slide generation");
        self.generation_started = Some(Instant::now());

        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        let repaint = ctx.clone();
        let spawned = std::thread::Builder::new()
            .name("generation".to_string())
            .spawn(move || {
                let result = source.generate();
                // The receiver only disappears when the app is closing.
                let _ = tx.send(result);
                repaint.request_repaint();
            });

        if let Err(e) = spawned {
            self.dispatch(
                ctx,
                Event::GenerationFailed(format!("could not start generation: {e}")),
            );
        }
    }

    /// Turn finished generation results into events.
    fn poll_generation(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.results_rx.try_recv() {
            if let Some(started) = self.generation_started.take() {
                log::debug!(
                    "generation finished after {:.1}s",
                    started.elapsed().as_secs_f32()
                );
            }
            let event = match result {
                Ok(slides) => Event::GenerationSucceeded(slides),
                Err(e) => Event::GenerationFailed(e.to_string()),
            };
            let installed = matches!(event, Event::GenerationSucceeded(_));
            self.dispatch(ctx, event);
            if installed {
                self.prune_images();
            }
        }
    }

    /// Free textures that no slide of the current presentation refers to.
    fn prune_images(&mut self) {
        let Some(presentation) = self.deck.presentation() else {
            return;
        };
        log::info!("presenting {} slides", presentation.len());
        let keep: HashSet<String> = presentation
            .iter()
            .map(|s| slide::placeholder_image_url(&self.image_host, &s.image_keyword))
            .collect();
        self.image_cache.retain_only(&keep);
    }

    /// Mirror the window's real fullscreen state into the deck.
    fn sync_fullscreen(&mut self, ctx: &egui::Context) {
        let actual = ctx.input(|i| i.viewport().fullscreen);
        if let Some(actual) = actual {
            if actual != self.deck.fullscreen() {
                self.dispatch(ctx, Event::FullscreenChanged(actual));
            }
        }
    }

    fn current_image_url(&self) -> Option<String> {
        self.deck
            .current_slide()
            .map(|s| slide::placeholder_image_url(&self.image_host, &s.image_keyword))
    }
}

impl eframe::App for EcoDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl EcoDeckApp {
    /// Run one frame: drain background work, read keys, paint, apply events.
    fn show(&mut self, ctx: &egui::Context) {
        if !self.mounted {
            self.mounted = true;
            self.dispatch(ctx, Event::Mount);
        }

        self.poll_generation(ctx);
        self.image_cache.poll(ctx);
        self.sync_fullscreen(ctx);

        let mut events = Vec::new();

        // Navigation keys only apply once slides are showing.
        if self.deck.view().is_some() {
            ctx.input(|i| {
                if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                    events.push(Event::Next);
                }
                if i.key_pressed(egui::Key::ArrowLeft) {
                    events.push(Event::Previous);
                }
            });
        }

        let image_url = self.current_image_url();
        if let Some(url) = &image_url {
            self.image_cache.request(ctx, url);
        }

        let bg = self.theme.backdrop;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);

                match self.deck.lifecycle() {
                    Lifecycle::Idle => {
                        render::status::draw_loading(ui, &self.theme, rect, scale, None);
                    }
                    Lifecycle::Loading { previous } => {
                        let replacing = previous.as_ref().map(|p| p.len());
                        render::status::draw_loading(ui, &self.theme, rect, scale, replacing);
                    }
                    Lifecycle::Error { message } => {
                        if render::status::draw_error(ui, &self.theme, rect, scale, message) {
                            events.push(Event::Regenerate);
                        }
                    }
                    Lifecycle::Success { presentation, view } => {
                        let deck_view = DeckView {
                            presentation,
                            view,
                            image_cache: &self.image_cache,
                            image_url: image_url.as_deref().unwrap_or_default(),
                        };
                        events.extend(deck_view.draw(ui, &self.theme, rect, scale));
                    }
                }
            });

        for event in events {
            self.dispatch(ctx, event);
        }

        // Keep animating spinners and skeletons.
        if self.deck.is_loading() || self.image_cache.has_pending() {
            ctx.request_repaint();
        }
    }
}

pub fn run(windowed: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let client = GeminiClient::from_config(&config)?;
    log::info!("using model {}", client.model());

    let windowed = windowed || config.windowed();
    let image_host = config.image_host().to_string();
    let source: Arc<dyn SlideSource> = Arc::new(client);

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(WINDOW_TITLE)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(WINDOW_TITLE)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(EcoDeckApp::new(source, image_host)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
