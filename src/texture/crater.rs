//! Crater height-field carving.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{HeightField, TextureError};
use crate::noise::{normalize_field, white_field};

/// Tunables for the crater height-field generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraterConfig {
    /// How many craters to carve; the actual count is drawn from this range.
    pub count: RangeInclusive<u32>,
    /// Smallest crater radius, in pixels.
    pub min_radius: f32,
    /// Largest crater radius, in pixels.
    pub max_radius: f32,
    /// Amplitude of the final white-noise roughness pass.
    pub roughness: f32,
}

impl Default for CraterConfig {
    fn default() -> Self {
        Self {
            count: 5..=15,
            min_radius: 5.0,
            max_radius: 30.0,
            roughness: 0.1,
        }
    }
}

/// Carves bowl-shaped craters into a flat mid-gray field and roughens it.
///
/// Each crater samples a center and radius, resampling until the full bowl
/// fits inside the field bounds. Inside the radius the depth follows
/// `sin(theta) * 0.5` with `cos(theta) = distance / radius`, deepest at the
/// center and zero at the rim. Later craters overwrite earlier ones where they
/// overlap. A final pass adds normalized white-noise roughness to every
/// pixel and clamps the field to [0, 1].
pub fn generate_crater_field<R: Rng>(
    size: usize,
    config: &CraterConfig,
    rng: &mut R,
) -> Result<HeightField, TextureError> {
    if size == 0 {
        return Err(TextureError::ZeroSize);
    }
    if config.min_radius <= 0.0 || config.min_radius > config.max_radius {
        return Err(TextureError::InvalidRadiusRange {
            min: config.min_radius,
            max: config.max_radius,
        });
    }
    // The placement loop below resamples until a bowl fits; a minimum radius
    // wider than half the field would never terminate.
    if config.min_radius * 2.0 >= size as f32 {
        return Err(TextureError::CraterTooLarge {
            radius: config.min_radius,
            size,
        });
    }

    let mut field = HeightField::filled(size, 0.5);

    let crater_count = rng.random_range(config.count.clone());
    for _ in 0..crater_count {
        let mut center_x = rng.random_range(0..size) as i32;
        let mut center_y = rng.random_range(0..size) as i32;
        let mut radius = rng.random_range(config.min_radius..=config.max_radius);
        while (center_x as f32) < radius
            || center_x as f32 + radius > size as f32
            || (center_y as f32) < radius
            || center_y as f32 + radius > size as f32
        {
            center_x = rng.random_range(0..size) as i32;
            center_y = rng.random_range(0..size) as i32;
            radius = rng.random_range(config.min_radius..=config.max_radius);
        }

        for x in 0..size as i32 {
            for y in 0..size as i32 {
                let sqr = ((x - center_x).pow(2) + (y - center_y).pow(2)) as f32;
                if sqr <= radius * radius {
                    let cos_theta = sqr.sqrt() / radius;
                    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                    let depth = sin_theta * 0.5;
                    field.set(x as usize, y as usize, 0.5 - depth);
                }
            }
        }
    }

    let mut roughness = white_field(size, rng.random());
    normalize_field(&mut roughness);
    for (value, rough) in field.values.iter_mut().zip(&roughness) {
        *value = (*value + (rough - 0.5) * config.roughness).clamp(0.0, 1.0);
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_craters_is_flat_plus_roughness() {
        let config = CraterConfig {
            count: 0..=0,
            ..CraterConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let field = generate_crater_field(64, &config, &mut rng).unwrap();
        // Only the roughness pass touched the field: every value stays within
        // half the roughness amplitude of 0.5, with no bowl depressions.
        for &value in &field.values {
            assert!((value - 0.5).abs() <= config.roughness * 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_craters_carve_below_midline() {
        let config = CraterConfig {
            count: 8..=8,
            ..CraterConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let field = generate_crater_field(128, &config, &mut rng).unwrap();
        let deepest = field.values.iter().cloned().fold(f32::MAX, f32::min);
        assert!(
            deepest < 0.2,
            "expected a deep bowl center, shallowest point was {deepest}"
        );
    }

    #[test]
    fn test_values_stay_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let field = generate_crater_field(96, &CraterConfig::default(), &mut rng).unwrap();
        for &value in &field.values {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_oversized_minimum_radius_rejected() {
        let config = CraterConfig {
            min_radius: 40.0,
            max_radius: 50.0,
            ..CraterConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_crater_field(64, &config, &mut rng),
            Err(TextureError::CraterTooLarge { .. })
        ));
    }

    #[test]
    fn test_inverted_radius_range_rejected() {
        let config = CraterConfig {
            min_radius: 10.0,
            max_radius: 5.0,
            ..CraterConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_crater_field(64, &config, &mut rng),
            Err(TextureError::InvalidRadiusRange { .. })
        ));
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(77);
            generate_crater_field(64, &CraterConfig::default(), &mut rng)
                .unwrap()
                .values
        };
        assert_eq!(run(), run());
    }
}
