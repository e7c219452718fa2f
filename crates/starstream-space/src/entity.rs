//! Entity descriptors: what the renderer draws, without any rendering types.
//!
//! Sprite selection is data-only. An entity carries a [`Visual`] describing
//! which sprite variants and tints a renderer should resolve; the streaming
//! core itself never touches a texture.

use glam::Vec2;
use rand::Rng;

/// Alpha an external renderer should apply to the planet atmosphere sprite.
pub const ATMOSPHERE_ALPHA: f32 = 0.5;
/// Alpha an external renderer should apply to the planet light overlay.
pub const LIGHT_ALPHA: f32 = 0.35;

const STAR_SPRITE_VARIANTS: u8 = 3;
const SPHERE_SPRITE_VARIANTS: u8 = 3;
const NOISE_SPRITE_VARIANTS: u8 = 28;
const LIGHT_SPRITE_VARIANTS: u8 = 10;

/// The two kinds of background entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Far-band point of light.
    Star,
    /// Near-band layered sphere sprite.
    Planet,
}

/// Sprite descriptor chosen once at construction and resolved by an external
/// renderer. Variant indices select from fixed sprite tables; tints are RGB
/// in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// One of the star sprites.
    Star {
        /// Star sprite index in `0..3`.
        sprite: u8,
    },
    /// Layered planet: tinted sphere, tinted surface noise, tinted
    /// translucent atmosphere noise, and a light overlay.
    Planet {
        /// Sphere sprite index in `0..3`.
        sphere: u8,
        /// Tint for the sphere sprite.
        sphere_tint: [f32; 3],
        /// Surface noise sprite index in `0..28`.
        noise: u8,
        /// Tint for the surface noise.
        noise_tint: [f32; 3],
        /// Atmosphere noise sprite index in `0..28`, drawn at
        /// [`ATMOSPHERE_ALPHA`].
        atmosphere: u8,
        /// Tint for the atmosphere noise.
        atmosphere_tint: [f32; 3],
        /// Light overlay sprite index in `0..10`, drawn at [`LIGHT_ALPHA`].
        light: u8,
    },
}

impl Visual {
    /// Draw a random visual for the given kind.
    pub fn random<R: Rng>(kind: EntityKind, rng: &mut R) -> Self {
        match kind {
            EntityKind::Star => Visual::Star {
                sprite: rng.random_range(0..STAR_SPRITE_VARIANTS),
            },
            EntityKind::Planet => Visual::Planet {
                sphere: rng.random_range(0..SPHERE_SPRITE_VARIANTS),
                sphere_tint: random_tint(rng),
                noise: rng.random_range(0..NOISE_SPRITE_VARIANTS),
                noise_tint: random_tint(rng),
                atmosphere: rng.random_range(0..NOISE_SPRITE_VARIANTS),
                atmosphere_tint: random_tint(rng),
                light: rng.random_range(0..LIGHT_SPRITE_VARIANTS),
            },
        }
    }
}

fn random_tint<R: Rng>(rng: &mut R) -> [f32; 3] {
    [rng.random(), rng.random(), rng.random()]
}

/// One visual object cycling between a layer's active list and its pool.
///
/// Constructed once per reset; spawning re-draws `depth`, re-derives the
/// scale-dependent fields, and repositions it. While the system runs, an
/// entity is owned by exactly one of {active list, pool}, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Star or planet; fixed at construction.
    pub kind: EntityKind,
    /// Sprite descriptor; fixed at construction.
    pub visual: Visual,
    /// Intrinsic sprite footprint in world units; fixed at construction.
    pub base_size: Vec2,
    /// Distance along the into-screen axis; fixed per spawn.
    pub depth: f32,
    /// Viewpoint-relative position; mutated every tick while live.
    pub position: Vec2,
    /// Apparent scale derived from depth at spawn time; never recomputed
    /// while live.
    pub visual_scale: f32,
    /// `base_size * visual_scale` with the minimum-size correction applied.
    pub size: Vec2,
    /// `vanishing_point - depth`: nearer entities draw on top.
    pub draw_order: f32,
    /// Whether the renderer should rasterize this entity.
    pub renderable: bool,
    /// Whether the layer manager considers this entity part of the scene.
    pub attached: bool,
}

impl Entity {
    /// Construct a dormant entity destined for a pool.
    ///
    /// Spawn-time fields (depth, position, scale, size, draw order) hold
    /// placeholder zeros until the layer's spawn path assigns them.
    pub fn new<R: Rng>(kind: EntityKind, base_size: Vec2, rng: &mut R) -> Self {
        Self {
            kind,
            visual: Visual::random(kind, rng),
            base_size,
            depth: 0.0,
            position: Vec2::ZERO,
            visual_scale: 0.0,
            size: Vec2::ZERO,
            draw_order: 0.0,
            renderable: false,
            attached: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_star_visual_indices_in_table_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let Visual::Star { sprite } = Visual::random(EntityKind::Star, &mut rng) else {
                panic!("star kind produced a planet visual");
            };
            assert!(sprite < STAR_SPRITE_VARIANTS);
        }
    }

    #[test]
    fn test_planet_visual_indices_in_table_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let Visual::Planet {
                sphere,
                noise,
                atmosphere,
                light,
                sphere_tint,
                ..
            } = Visual::random(EntityKind::Planet, &mut rng)
            else {
                panic!("planet kind produced a star visual");
            };
            assert!(sphere < SPHERE_SPRITE_VARIANTS);
            assert!(noise < NOISE_SPRITE_VARIANTS);
            assert!(atmosphere < NOISE_SPRITE_VARIANTS);
            assert!(light < LIGHT_SPRITE_VARIANTS);
            for channel in sphere_tint {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_new_entity_is_dormant() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let entity = Entity::new(EntityKind::Star, Vec2::new(4.0, 4.0), &mut rng);
        assert!(!entity.renderable);
        assert!(!entity.attached);
        assert_eq!(entity.position, Vec2::ZERO);
        assert_eq!(entity.base_size, Vec2::new(4.0, 4.0));
    }
}
