//! Ranking of quantized colors as candidate seeds.
//!
//! Colors are rewarded for the share of the image their hue neighborhood
//! covers and for chroma, and penalized when achromatic or at extreme tones.

use crate::color::Color;
use crate::hct::math::sanitize_degrees_int;
use crate::hct::{hue_distance, Hct};
use crate::pipeline::extract::ExtractedColor;

const TARGET_CHROMA: f64 = 48.0;
const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
const CUTOFF_CHROMA: f64 = 5.0;
const CUTOFF_EXCITED_PROPORTION: f64 = 0.01;
/// Tones further than this from 50 start losing score.
const TONE_TOLERANCE: f64 = 40.0;
const WEIGHT_TONE: f64 = 1.0;

/// Google blue, used when no candidate survives filtering.
pub const FALLBACK_SEED: Color = Color::new(0x42, 0x85, 0xf4);

struct Scored {
    hct: Hct,
    score: f64,
}

/// Rank candidates and pick up to `desired` hue-diverse seeds, best first.
/// Never returns an empty list.
pub fn score(colors: &[ExtractedColor], desired: usize) -> Vec<Color> {
    let mut hue_population = [0.0f64; 360];
    let mut population_sum: f64 = 0.0;
    let candidates: Vec<(Hct, f64)> = colors
        .iter()
        .map(|c| (c.color.to_hct(), f64::from(c.weight)))
        .collect();

    for (hct, population) in &candidates {
        hue_population[sanitize_degrees_int(hct.hue().floor() as i32)] += population;
        population_sum += population;
    }
    if population_sum <= 0.0 {
        return vec![FALLBACK_SEED];
    }

    let mut hue_excited = [0.0f64; 360];
    for (hue, population) in hue_population.iter().enumerate() {
        let proportion = population / population_sum;
        for neighbor in (hue as i32 - 14)..(hue as i32 + 16) {
            hue_excited[sanitize_degrees_int(neighbor)] += proportion;
        }
    }

    let mut scored: Vec<Scored> = candidates
        .into_iter()
        .filter_map(|(hct, _)| {
            let proportion = hue_excited[sanitize_degrees_int(hct.hue().round() as i32)];
            if hct.chroma() < CUTOFF_CHROMA || proportion <= CUTOFF_EXCITED_PROPORTION {
                return None;
            }
            let proportion_score = proportion * 100.0 * WEIGHT_PROPORTION;
            let chroma_weight = if hct.chroma() < TARGET_CHROMA {
                WEIGHT_CHROMA_BELOW
            } else {
                WEIGHT_CHROMA_ABOVE
            };
            let chroma_score = (hct.chroma() - TARGET_CHROMA) * chroma_weight;
            let tone_penalty = ((hct.tone() - 50.0).abs() - TONE_TOLERANCE).max(0.0) * WEIGHT_TONE;
            Some(Scored {
                hct,
                score: proportion_score + chroma_score - tone_penalty,
            })
        })
        .collect();
    // Stable sort keeps population order among equal scores.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut chosen: Vec<Hct> = Vec::new();
    for min_distance in (15..=90).rev() {
        chosen.clear();
        for candidate in &scored {
            let distinct = chosen
                .iter()
                .all(|c| hue_distance(candidate.hct.hue(), c.hue()) >= f64::from(min_distance));
            if distinct {
                chosen.push(candidate.hct);
            }
            if chosen.len() >= desired {
                break;
            }
        }
        if chosen.len() >= desired {
            break;
        }
    }

    if chosen.is_empty() {
        return vec![FALLBACK_SEED];
    }
    chosen.into_iter().map(Color::from_hct).collect()
}

/// The single best seed color.
pub fn dominant_color(colors: &[ExtractedColor]) -> Color {
    score(colors, 4)
        .into_iter()
        .next()
        .unwrap_or(FALLBACK_SEED)
}
