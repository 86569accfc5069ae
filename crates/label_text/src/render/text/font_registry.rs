//! Font catalog
//!
//! The [`FontRegistry`] discovers fonts from a [`ContentSource`] on first
//! use, owns them, and tracks which one is the default. It is an explicit
//! context object: create one per content root and share it with `Arc`.
//!
//! Discovery runs two passes:
//!
//! 1. Every texture under the fonts folder whose path ends in `/Font` names
//!    a font by its parent folder (`Fonts/Classic/Font` → `Classic`).
//! 2. Each configured known font name is probed at `{folder}/{name}/Font`.
//!
//! Names found by the first pass are not probed again. A discovered font
//! whose atlas cannot be loaded is still registered; it stays unusable and
//! draws nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use super::font_asset::FontAsset;
use crate::assets::ContentSource;
use crate::config::LabelTextConfig;
use crate::render::api::RenderResources;

#[derive(Default)]
struct Catalog {
    fonts: IndexMap<String, Arc<FontAsset>>,
    default: Option<String>,
}

/// Registry of loaded fonts
pub struct FontRegistry {
    config: LabelTextConfig,
    content: Arc<dyn ContentSource>,
    initialized: AtomicBool,
    init_lock: Mutex<()>,
    catalog: RwLock<Catalog>,
}

impl FontRegistry {
    /// Create an empty registry; fonts are discovered on first use
    pub fn new(config: LabelTextConfig, content: Arc<dyn ContentSource>) -> Self {
        Self {
            config,
            content,
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(()),
            catalog: RwLock::new(Catalog::default()),
        }
    }

    /// Configuration the registry was created with
    pub fn config(&self) -> &LabelTextConfig {
        &self.config
    }

    /// Whether discovery has run since creation or the last cleanup
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Run discovery unless it already ran
    ///
    /// Safe under concurrent first use: exactly one caller performs
    /// discovery, the others wait for it and then see the full catalog.
    pub fn ensure_initialized(&self) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }
        self.initialize();
    }

    /// Discover fonts and pick the default
    ///
    /// No-op when already initialized. Fonts that fail to load are kept in
    /// the catalog as unusable entries.
    pub fn initialize(&self) {
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        let mut catalog = self.write_catalog();
        let folder = self.config.fonts_folder.as_str();

        for (path, _) in self.content.textures_in_folder(folder) {
            let Some(name) = font_name_from_path(&path) else {
                continue;
            };
            if catalog.fonts.contains_key(name) {
                continue;
            }
            log::debug!("Discovered font '{}' at '{}'", name, path);
            self.load_into(&mut catalog, name);
        }

        for name in &self.config.known_fonts {
            if catalog.fonts.contains_key(name) {
                continue;
            }
            if self.content.find_texture(&format!("{folder}/{name}/Font")).is_some() {
                log::debug!("Found known font '{}'", name);
                self.load_into(&mut catalog, name);
            }
        }

        catalog.default = if catalog.fonts.contains_key(&self.config.preferred_default) {
            Some(self.config.preferred_default.clone())
        } else {
            catalog.fonts.keys().next().cloned()
        };

        match &catalog.default {
            Some(default) => log::info!(
                "Font registry initialized with {} font(s), default '{}'",
                catalog.fonts.len(),
                default
            ),
            None => log::warn!("Font registry initialized with no fonts"),
        }

        self.initialized.store(true, Ordering::Release);
    }

    fn load_into(&self, catalog: &mut Catalog, name: &str) {
        let mut font = FontAsset::new(name);
        if !font.initialize(self.content.as_ref(), &self.config) {
            log::warn!("Font '{}' registered without a usable atlas", name);
        }
        catalog.fonts.insert(name.to_string(), Arc::new(font));
    }

    /// Add a font to the catalog, replacing any font of the same name
    ///
    /// Fonts that were never initialized are loaded from this registry's
    /// content source first. A replaced font has its materials released
    /// through `resources`.
    pub fn register_font(
        &self,
        mut font: FontAsset,
        resources: &mut dyn RenderResources,
    ) -> Arc<FontAsset> {
        self.ensure_initialized();
        if !font.is_initialized() {
            font.initialize(self.content.as_ref(), &self.config);
        }

        let font = Arc::new(font);
        let replaced = self
            .write_catalog()
            .fonts
            .insert(font.name().to_string(), Arc::clone(&font));

        if let Some(replaced) = replaced {
            log::warn!("Font '{}' is already registered. Overwriting.", font.name());
            replaced.reset_materials(resources);
        }
        font
    }

    /// Font by name, or the default font when `name` is unknown
    pub fn get_font(&self, name: &str) -> Option<Arc<FontAsset>> {
        self.ensure_initialized();
        let catalog = self.read_catalog();

        if let Some(font) = catalog.fonts.get(name) {
            return Some(Arc::clone(font));
        }

        log::warn!("Font '{}' not found. Using default font.", name);
        Self::default_in(&catalog)
    }

    /// The default font, `None` when no fonts are registered
    pub fn default_font(&self) -> Option<Arc<FontAsset>> {
        self.ensure_initialized();
        Self::default_in(&self.read_catalog())
    }

    /// Name of the default font
    pub fn default_font_name(&self) -> Option<String> {
        self.ensure_initialized();
        self.read_catalog().default.clone()
    }

    fn default_in(catalog: &Catalog) -> Option<Arc<FontAsset>> {
        catalog
            .default
            .as_ref()
            .and_then(|name| catalog.fonts.get(name))
            .cloned()
    }

    /// Make `name` the default font
    ///
    /// Returns `false` (and leaves the default unchanged) when no font of
    /// that name is registered.
    pub fn set_default_font(&self, name: &str) -> bool {
        self.ensure_initialized();
        let mut catalog = self.write_catalog();

        if !catalog.fonts.contains_key(name) {
            log::error!("Cannot set default font to '{}' - font not registered.", name);
            return false;
        }

        catalog.default = Some(name.to_string());
        true
    }

    /// Registered font names in registration order
    pub fn font_names(&self) -> Vec<String> {
        self.ensure_initialized();
        self.read_catalog().fonts.keys().cloned().collect()
    }

    /// Registered fonts in registration order
    pub fn fonts(&self) -> Vec<Arc<FontAsset>> {
        self.ensure_initialized();
        self.read_catalog().fonts.values().cloned().collect()
    }

    /// Number of registered fonts
    pub fn len(&self) -> usize {
        self.ensure_initialized();
        self.read_catalog().fonts.len()
    }

    /// Whether no fonts are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the cached materials of every registered font
    ///
    /// Fonts stay registered; new materials are created on demand.
    pub fn reset_materials(&self, resources: &mut dyn RenderResources) {
        for font in self.read_catalog().fonts.values() {
            font.reset_materials(resources);
        }
    }

    /// Release every font's materials and forget all fonts
    ///
    /// The next query runs discovery again.
    pub fn cleanup(&self, resources: &mut dyn RenderResources) {
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut catalog = self.write_catalog();

        for font in catalog.fonts.values() {
            font.reset_materials(resources);
        }
        catalog.fonts.clear();
        catalog.default = None;

        self.initialized.store(false, Ordering::Release);
    }

    /// Re-run discovery, keeping the current default when it still exists
    pub fn refresh_fonts(&self, resources: &mut dyn RenderResources) {
        let previous = self.read_catalog().default.clone();

        self.cleanup(resources);
        self.ensure_initialized();

        if let Some(previous) = previous {
            let mut catalog = self.write_catalog();
            if catalog.fonts.contains_key(&previous) {
                catalog.default = Some(previous);
            } else {
                log::info!("Previous default font '{}' is gone after refresh", previous);
            }
        }
    }

    fn read_catalog(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_catalog(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `Fonts/Classic/Font` → `Classic`
fn font_name_from_path(path: &str) -> Option<&str> {
    if !path.ends_with("/Font") {
        return None;
    }
    path.rsplit('/').nth(1).filter(|name| !name.is_empty())
}
