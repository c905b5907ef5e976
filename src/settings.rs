//! Player preferences
//!
//! Only the cosmetic sprite is persisted. Image loading and the picker UI
//! live with the host; this module validates and stores the choice.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Selectable player bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sprite {
    #[default]
    Classic,
    Boo,
    Bow,
    Flower,
    Glasses,
    TopHat,
}

impl Sprite {
    /// Picker order
    pub const ALL: [Sprite; 6] = [
        Sprite::Classic,
        Sprite::Boo,
        Sprite::Bow,
        Sprite::Flower,
        Sprite::Glasses,
        Sprite::TopHat,
    ];

    /// Asset file name, also the stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            Sprite::Classic => "kiro-classic.png",
            Sprite::Boo => "kiro-boo.png",
            Sprite::Bow => "kiro-bow.png",
            Sprite::Flower => "kiro-flower.png",
            Sprite::Glasses => "kiro-glasses.png",
            Sprite::TopHat => "kiro-tophat.png",
        }
    }

    /// Accepts the asset file name or the bare name ("boo", "TopHat")
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(sprite) = Self::ALL.iter().find(|sp| sp.as_str() == s) {
            return Some(*sprite);
        }
        match s.to_lowercase().as_str() {
            "classic" => Some(Sprite::Classic),
            "boo" => Some(Sprite::Boo),
            "bow" => Some(Sprite::Bow),
            "flower" => Some(Sprite::Flower),
            "glasses" => Some(Sprite::Glasses),
            "tophat" | "top-hat" => Some(Sprite::TopHat),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub sprite: Sprite,
}

impl Settings {
    /// Storage key
    pub const SPRITE_KEY: &'static str = "gravity-switcher-sprite";

    /// Load preferences; unknown or unreadable values fall back to defaults.
    /// An invalid stored sprite is overwritten with the default.
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Self {
        let mut settings = Self::default();
        match store.get(Self::SPRITE_KEY) {
            Ok(Some(name)) => {
                settings.select_sprite_by_name(store, &name);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not read sprite preference: {e}"),
        }
        settings
    }

    /// Change sprite and persist. Returns the sprite actually selected.
    pub fn select_sprite_by_name<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: &str,
    ) -> Sprite {
        let sprite = Sprite::from_name(name).unwrap_or_else(|| {
            log::warn!("Invalid sprite {name:?}, using {}", Sprite::default().as_str());
            Sprite::default()
        });
        self.select_sprite(store, sprite);
        sprite
    }

    pub fn select_sprite<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, sprite: Sprite) {
        self.sprite = sprite;
        if let Err(e) = store.set(Self::SPRITE_KEY, sprite.as_str()) {
            log::warn!("Could not save sprite preference: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::testing::BrokenStore;

    #[test]
    fn test_names_round_trip() {
        for sprite in Sprite::ALL {
            assert_eq!(Sprite::from_name(sprite.as_str()), Some(sprite));
        }
        assert_eq!(Sprite::from_name("TopHat"), Some(Sprite::TopHat));
        assert_eq!(Sprite::from_name("kiro-unicorn.png"), None);
        assert_eq!(Sprite::from_name(""), None);
    }

    #[test]
    fn test_load_default_and_invalid() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&mut store).sprite, Sprite::Classic);

        store.set(Settings::SPRITE_KEY, "../../etc/passwd").unwrap();
        assert_eq!(Settings::load(&mut store).sprite, Sprite::Classic);
        // The bad value is replaced so it is not reported on every start
        assert_eq!(
            store.get(Settings::SPRITE_KEY).unwrap().as_deref(),
            Some("kiro-classic.png")
        );

        store.set(Settings::SPRITE_KEY, "kiro-bow.png").unwrap();
        assert_eq!(Settings::load(&mut store).sprite, Sprite::Bow);

        assert_eq!(Settings::load(&mut BrokenStore).sprite, Sprite::Classic);
    }

    #[test]
    fn test_select_persists() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::load(&mut store);
        settings.select_sprite(&mut store, Sprite::Glasses);
        assert_eq!(Settings::load(&mut store).sprite, Sprite::Glasses);

        assert_eq!(settings.select_sprite_by_name(&mut store, "nope"), Sprite::Classic);
        assert_eq!(
            store.get(Settings::SPRITE_KEY).unwrap().as_deref(),
            Some("kiro-classic.png")
        );
    }

    #[test]
    fn test_select_with_broken_store_still_applies() {
        let mut settings = Settings::default();
        settings.select_sprite(&mut BrokenStore, Sprite::Flower);
        assert_eq!(settings.sprite, Sprite::Flower);
    }
}
