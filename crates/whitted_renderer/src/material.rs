//! Phong material coefficients.

use whitted_math::Color;

/// Refractive index of the medium surrounding every surface.
pub const AIR_REFRACTIVE_INDEX: f32 = 1.0;

/// Transmission parameters of a transparent surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transparency {
    /// Weight of the refracted contribution, in [0, 1]
    pub intensity: f32,
    /// Refractive index inside the surface (1.5 = glass)
    pub refractive_index: f32,
}

/// Material coefficients used by the local illumination model and the
/// recursive reflection/refraction terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance (Ka)
    pub ka: Color,
    /// Diffuse reflectance (Kd)
    pub kd: Color,
    /// Specular reflectance (Ks)
    pub ks: Color,
    /// Phong exponent (n)
    pub shininess: i32,
    /// Weight of the mirror-reflected contribution (Kr), in [0, 1]
    pub reflection_intensity: f32,
    /// `Some` for transparent surfaces
    pub transparency: Option<Transparency>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::splat(0.1),
            kd: Color::ONE,
            ks: Color::splat(0.7),
            shininess: 10,
            reflection_intensity: 0.0,
            transparency: None,
        }
    }
}

impl Material {
    /// A perfect mirror: no local color, full reflection.
    pub fn mirror() -> Self {
        Self {
            ka: Color::ZERO,
            kd: Color::ZERO,
            ks: Color::ZERO,
            reflection_intensity: 1.0,
            ..Default::default()
        }
    }

    /// Clear glass with a slight reflection.
    pub fn glass() -> Self {
        Self {
            ka: Color::ZERO,
            kd: Color::ZERO,
            ks: Color::splat(0.7),
            shininess: 100,
            reflection_intensity: 0.1,
            transparency: Some(Transparency {
                intensity: 0.9,
                refractive_index: 1.5,
            }),
        }
    }

    pub fn with_ambient(mut self, ka: Color) -> Self {
        self.ka = ka;
        self
    }

    pub fn with_diffuse(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_specular(mut self, ks: Color, shininess: i32) -> Self {
        self.ks = ks;
        self.shininess = shininess;
        self
    }

    /// Set the reflection intensity, clamped to [0, 1].
    pub fn with_reflection(mut self, intensity: f32) -> Self {
        self.reflection_intensity = intensity.clamp(0.0, 1.0);
        self
    }

    /// Make the surface transparent. The intensity is clamped to [0, 1].
    pub fn with_transparency(mut self, intensity: f32, refractive_index: f32) -> Self {
        self.transparency = Some(Transparency {
            intensity: intensity.clamp(0.0, 1.0),
            refractive_index,
        });
        self
    }

    /// Copy with the reflection and transmission weights clamped to
    /// [0, 1], for materials written as struct literals.
    pub fn clamped(mut self) -> Self {
        self.reflection_intensity = self.reflection_intensity.clamp(0.0, 1.0);
        if let Some(transparency) = self.transparency.as_mut() {
            transparency.intensity = transparency.intensity.clamp(0.0, 1.0);
        }
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency.is_some()
    }

    /// Refractive indices (n1, n2) for a ray entering (`front_face`) or
    /// leaving the surface.
    pub fn refractive_indices(&self, front_face: bool) -> Option<(f32, f32)> {
        self.transparency.map(|t| {
            if front_face {
                (AIR_REFRACTIVE_INDEX, t.refractive_index)
            } else {
                (t.refractive_index, AIR_REFRACTIVE_INDEX)
            }
        })
    }
}
