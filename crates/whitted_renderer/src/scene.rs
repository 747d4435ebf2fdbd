//! Scene configuration.
//!
//! A [`SceneBuilder`] collects the camera, lights, surfaces and render
//! settings through chained calls. [`SceneBuilder::build`] validates them
//! and freezes everything into a [`Scene`], which is read-only (and
//! `Sync`) for the duration of a render.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hittable::{Hit, Surface};
use crate::{Color, Light, PinholeCamera, Ray, SceneError};
use whitted_math::Interval;

/// Highest supported anti-aliasing grid side.
pub const MAX_ANTI_ALIASING_FACTOR: u32 = 3;

/// Render settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Number of ray generations traced; 1 = primary rays only
    pub max_recursion_level: u32,
    /// Side of the stratified sample grid per pixel (1, 2 or 3)
    pub anti_aliasing_factor: u32,
    /// Whether to trace mirror reflections
    pub reflections: bool,
    /// Whether to trace refractions through transparent surfaces
    pub refractions: bool,
    /// Scene ambient light
    pub ambient: Color,
    /// Color returned by rays that miss every surface
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_recursion_level: 1,
            anti_aliasing_factor: 1,
            reflections: false,
            refractions: false,
            ambient: Color::ONE,
            background: Color::new(0.0, 0.5, 1.0),
        }
    }
}

impl RenderSettings {
    /// Number of primary rays cast per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.anti_aliasing_factor * self.anti_aliasing_factor
    }

    fn validate(&self) -> Result<(), SceneError> {
        if !(1..=MAX_ANTI_ALIASING_FACTOR).contains(&self.anti_aliasing_factor) {
            return Err(SceneError::InvalidAntiAliasingFactor(
                self.anti_aliasing_factor,
            ));
        }
        if self.max_recursion_level == 0 {
            return Err(SceneError::InvalidRecursionLevel);
        }
        Ok(())
    }
}

/// Chained scene configuration.
#[derive(Debug)]
pub struct SceneBuilder {
    name: String,
    camera: Option<PinholeCamera>,
    settings: RenderSettings,
    lights: Vec<Box<dyn Light>>,
    surfaces: Vec<Surface>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            name: String::from("scene"),
            camera: None,
            settings: RenderSettings::default(),
            lights: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn camera(mut self, camera: PinholeCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Replace all render settings at once.
    pub fn settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn ambient(mut self, ambient: Color) -> Self {
        self.settings.ambient = ambient;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.settings.background = background;
        self
    }

    pub fn add_light(mut self, light: impl Light + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    pub fn add_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn max_recursion_level(mut self, level: u32) -> Self {
        self.settings.max_recursion_level = level;
        self
    }

    pub fn anti_aliasing_factor(mut self, factor: u32) -> Self {
        self.settings.anti_aliasing_factor = factor;
        self
    }

    pub fn reflections(mut self, enabled: bool) -> Self {
        self.settings.reflections = enabled;
        self
    }

    pub fn refractions(mut self, enabled: bool) -> Self {
        self.settings.refractions = enabled;
        self
    }

    /// Validate the configuration and freeze it into a [`Scene`].
    pub fn build(self) -> Result<Scene, SceneError> {
        let camera = self.camera.ok_or(SceneError::MissingCamera)?;
        if !camera.has_valid_basis() {
            return Err(SceneError::DegenerateCamera);
        }
        self.settings.validate()?;

        Ok(Scene {
            name: self.name,
            camera,
            settings: self.settings,
            lights: self.lights,
            surfaces: self.surfaces,
        })
    }
}

/// A frozen, renderable scene.
#[derive(Debug)]
pub struct Scene {
    name: String,
    camera: PinholeCamera,
    settings: RenderSettings,
    lights: Vec<Box<dyn Light>>,
    surfaces: Vec<Surface>,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Reopen the scene for reconfiguration between renders.
    pub fn into_builder(self) -> SceneBuilder {
        SceneBuilder {
            name: self.name,
            camera: Some(self.camera),
            settings: self.settings,
            lights: self.lights,
            surfaces: self.surfaces,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Nearest hit along `ray` over every surface, scanned in insertion order.
    ///
    /// On equal distances the earlier surface wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest = None;
        let mut closest_so_far = f32::INFINITY;

        for surface in &self.surfaces {
            if let Some(hit) = surface.intersect(ray, Interval::new(0.0, closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }

    /// Whether any surface blocks `ray_to_light` from reaching `light`.
    pub fn is_occluded(&self, light: &dyn Light, ray_to_light: &Ray) -> bool {
        self.surfaces
            .iter()
            .any(|surface| light.is_occluded_by(surface, ray_to_light))
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scene: {}", self.name)?;
        writeln!(f, "Camera: {}", self.camera)?;
        writeln!(f, "Ambient: {}", self.settings.ambient)?;
        writeln!(f, "Background color: {}", self.settings.background)?;
        writeln!(f, "Max recursion level: {}", self.settings.max_recursion_level)?;
        writeln!(f, "Anti aliasing factor: {}", self.settings.anti_aliasing_factor)?;
        writeln!(f, "Light sources: {}", self.lights.len())?;
        write!(f, "Surfaces: {}", self.surfaces.len())
    }
}
