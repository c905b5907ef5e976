//! wasm-bindgen surface for the browser host
//!
//! JavaScript owns the canvas, the `requestAnimationFrame` loop and the input
//! listeners. It calls `trigger()` on key/click, `frame()` once per animation
//! frame, and draws from `snapshot()`.

use wasm_bindgen::prelude::*;

use crate::highscores::load_high_score;
use crate::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
use crate::settings::{Settings, Sprite};
use crate::sim::{GameSession, autopilot, tick};
use crate::Viewport;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{e}, using in-memory storage");
            Box::new(MemoryStore::new())
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let mut store = open_store();
        let settings = Settings::load(&mut *store);
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(
            seed,
            Viewport::new(width, height),
            load_high_score(&*store),
        );
        log::info!("Gravity Switcher ready (sprite {})", settings.sprite.as_str());
        WebGame {
            session,
            store,
            settings,
            idle_mode: false,
        }
    }

    /// Space bar / click
    pub fn trigger(&mut self) {
        let outcome = self.session.trigger();
        log::debug!("Trigger: {outcome:?}");
    }

    /// Advance one frame. Returns the frame's events as JSON.
    pub fn frame(&mut self) -> String {
        if self.idle_mode && autopilot::should_trigger(&self.session) {
            self.session.trigger();
        }
        let events = tick(&mut self.session, &mut self.store);
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Could not encode events: {e}");
            "[]".to_string()
        })
    }

    /// Everything the renderer needs, as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|e| {
            log::warn!("Could not encode snapshot: {e}");
            "{}".to_string()
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_viewport(Viewport::new(width, height));
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
        log::info!("Idle mode: {on}");
    }

    /// Current sprite asset name
    pub fn sprite(&self) -> String {
        self.settings.sprite.as_str().to_string()
    }

    /// Asset names in picker order
    pub fn sprites() -> Vec<String> {
        Sprite::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }

    /// Select a sprite by name; invalid names select the default.
    /// Returns the asset name actually selected.
    pub fn select_sprite(&mut self, name: &str) -> String {
        self.settings
            .select_sprite_by_name(&mut self.store, name)
            .as_str()
            .to_string()
    }
}
