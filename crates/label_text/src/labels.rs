//! Floor label facade
//!
//! [`LabelTextSystem`] is what a host renderer talks to. It ties the font
//! registry, the mesh cache and the host's [`RenderResources`] together and
//! keeps the user-facing settings: active font, default tint and opacity.
//!
//! Each system owns its registry. Fonts cache material handles issued by
//! one backend, so a registry is never shared between systems.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use label_text::assets::DirectoryContent;
//! use label_text::config::LabelTextConfig;
//! use label_text::labels::LabelTextSystem;
//! use label_text::render::text::FontRegistry;
//! use label_text::render::HeadlessResources;
//!
//! let content = Arc::new(DirectoryContent::new("Textures"));
//! let registry = FontRegistry::new(LabelTextConfig::default(), content);
//! let mut labels = LabelTextSystem::new(registry, HeadlessResources::new());
//!
//! if let Some(draw) = labels.request_label_mesh(None, "KITCHEN", None) {
//!     println!("{} wide, material {:?}", draw.width, draw.material);
//! }
//! ```

use std::sync::Arc;

use crate::foundation::Color;
use crate::render::api::{MaterialHandle, MeshHandle, RenderResources};
use crate::render::text::{FontAsset, FontRegistry, LabelMesh, MeshCache};

/// Everything needed to draw one label
#[derive(Debug, Clone, Copy)]
pub struct LabelDraw<'a> {
    /// Label geometry
    pub mesh: &'a LabelMesh,
    /// Uploaded geometry, `None` when the backend rejected the upload
    pub mesh_handle: Option<MeshHandle>,
    /// Tinted font material
    pub material: MaterialHandle,
    /// Advance width of the label
    pub width: f32,
}

/// Label text front end for a renderer
pub struct LabelTextSystem<R: RenderResources> {
    registry: FontRegistry,
    mesh_cache: MeshCache,
    resources: R,
    active_font: Option<String>,
    default_color: Color,
    opacity: f32,
}

impl<R: RenderResources> LabelTextSystem<R> {
    /// Create a label system owning `registry`
    ///
    /// Default tint and opacity come from the registry's configuration; the
    /// active font is the registry default.
    pub fn new(registry: FontRegistry, resources: R) -> Self {
        let config = registry.config();
        let default_color = config.default_color;
        let opacity = percent_to_opacity(config.opacity_percent);
        let active_font = registry.default_font_name();

        Self {
            registry,
            mesh_cache: MeshCache::new(),
            resources,
            active_font,
            default_color,
            opacity,
        }
    }

    /// Mesh and material for `text`
    ///
    /// `font_name` of `None` uses the active font; unknown names fall back
    /// to the registry default. Returns `None` when no font is available or
    /// the text has nothing to draw.
    pub fn request_label_mesh(
        &mut self,
        font_name: Option<&str>,
        text: &str,
        color_override: Option<Color>,
    ) -> Option<LabelDraw<'_>> {
        let font = match font_name.or(self.active_font.as_deref()) {
            Some(name) => self.registry.get_font(name),
            None => self.registry.default_font(),
        }?;

        let entry = self.mesh_cache.get_or_build(&mut self.resources, &font, text);
        let mesh = entry.mesh.as_ref()?;

        let color = color_override.unwrap_or(self.default_color);
        let material = font.get_material(&mut self.resources, color, self.opacity)?;

        Some(LabelDraw {
            mesh,
            mesh_handle: entry.handle,
            material,
            width: mesh.width(),
        })
    }

    /// Add or replace a font
    ///
    /// Meshes built from a replaced font are released along with its
    /// materials.
    pub fn register_font(&mut self, font: FontAsset) -> Arc<FontAsset> {
        let font = self.registry.register_font(font, &mut self.resources);
        self.mesh_cache.clear_font(&mut self.resources, font.name());
        font
    }

    /// Switch the active font
    ///
    /// Returns `false` when no font of that name is registered.
    pub fn set_active_font(&mut self, name: &str) -> bool {
        if !self.registry.set_default_font(name) {
            return false;
        }

        if self.active_font.as_deref() != Some(name) {
            log::info!("Active label font changed to '{}'", name);
            self.mesh_cache.clear(&mut self.resources);
            self.active_font = Some(name.to_string());
        }
        true
    }

    /// Change the tint used for labels without a color of their own
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
        self.registry.reset_materials(&mut self.resources);
    }

    /// Change label opacity, in percent (clamped to 1-100)
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity = percent_to_opacity(percent);
        self.registry.reset_materials(&mut self.resources);
    }

    /// Rediscover fonts, keeping the active font when it still exists
    pub fn refresh_font_catalog(&mut self) {
        self.mesh_cache.clear(&mut self.resources);
        self.registry.refresh_fonts(&mut self.resources);
        self.active_font = self.registry.default_font_name();
    }

    /// Release every mesh and material this system created
    pub fn shutdown(&mut self) {
        self.mesh_cache.clear(&mut self.resources);
        self.registry.reset_materials(&mut self.resources);
    }

    /// Name of the active font
    pub fn active_font(&self) -> Option<&str> {
        self.active_font.as_deref()
    }

    /// Tint used for labels without a color of their own
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Label opacity (0.01-1.0)
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Font registry
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Built mesh cache
    pub fn mesh_cache(&self) -> &MeshCache {
        &self.mesh_cache
    }

    /// Resource backend
    pub fn resources(&self) -> &R {
        &self.resources
    }
}

impl<R: RenderResources> Drop for LabelTextSystem<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn percent_to_opacity(percent: u8) -> f32 {
    f32::from(percent.clamp(1, 100)) / 100.0
}
