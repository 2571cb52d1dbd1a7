use std::path::Path;

use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use log::debug;
use palette::{IntoColor, Lab, Srgb};

use crate::color::Color;
use crate::error::InputError;

/// A color extracted from the image with its cluster weight.
#[derive(Debug, Clone)]
pub struct ExtractedColor {
    pub color: Color,
    pub weight: f32,
}

pub const DEFAULT_BITMAP_SIZE: u32 = 128;
pub const DEFAULT_MAX_COLORS: usize = 128;

const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const DEDUP_THRESHOLD: f32 = 25.0; // ΔE² < 25 means ΔE < 5
const KMEANS_SEED: u64 = 42;

/// Dimensions that keep the pixel count within `bitmap_size²` while
/// preserving aspect ratio. Never upscales; each side is at least 1.
pub fn optimal_size(width: u32, height: u32, bitmap_size: u32) -> (u32, u32) {
    let image_area = u64::from(width) * u64::from(height);
    let bitmap_area = u64::from(bitmap_size) * u64::from(bitmap_size);
    let scale = if image_area > bitmap_area {
        (bitmap_area as f64 / image_area as f64).sqrt()
    } else {
        1.0
    };
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    (new_width, new_height)
}

/// Load an image, shrink it to the bitmap budget, and convert all pixels to
/// CIELAB space.
pub fn load_and_prepare(path: &Path, bitmap_size: u32) -> Result<Vec<Lab>, InputError> {
    let img = image::open(path).map_err(|source| {
        if !path.exists() {
            InputError::ImageNotFound(path.to_path_buf())
        } else {
            InputError::UnsupportedImage {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let (width, height) = optimal_size(img.width(), img.height(), bitmap_size);
    let img = if width < img.width() || height < img.height() {
        debug!(
            "resizing {}x{} -> {width}x{height}",
            img.width(),
            img.height()
        );
        img.resize_exact(width, height, FilterType::CatmullRom)
    } else {
        img
    };
    let rgb_img = img.to_rgb8();

    let pixels: Vec<Lab> = rgb_img
        .pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            srgb.into_color()
        })
        .collect();

    Ok(pixels)
}

/// Cluster LAB pixels into at most `max_colors` representative colors.
///
/// Returns deduplicated colors sorted by weight (descending).
/// Uses Hamerly's algorithm with K-means++ initialization.
pub fn quantize(pixels: &[Lab], max_colors: usize) -> Vec<ExtractedColor> {
    if pixels.is_empty() {
        return Vec::new();
    }
    // Cluster indices are stored as u8.
    let k = max_colors.clamp(1, 256).min(pixels.len());
    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, pixels, KMEANS_SEED);

    let total = pixels.len() as f32;

    let mut counts = vec![0u32; k];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let colors: Vec<ExtractedColor> = result
        .centroids
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, lab)| ExtractedColor {
            color: Color::from_lab(*lab),
            weight: counts[i] as f32 / total,
        })
        .collect();

    let mut colors = deduplicate(colors);
    colors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    debug!("quantized {} pixels into {} colors", pixels.len(), colors.len());

    colors
}

/// Fold each color into the first kept color within ΔE 5 of it, summing
/// weights. Input order decides which representative survives.
fn deduplicate(colors: Vec<ExtractedColor>) -> Vec<ExtractedColor> {
    let mut kept: Vec<(Lab, ExtractedColor)> = Vec::with_capacity(colors.len());
    for candidate in colors {
        let lab = candidate.color.to_lab();
        match kept
            .iter_mut()
            .find(|(seen, _)| delta_e_squared(seen, &lab) < DEDUP_THRESHOLD)
        {
            Some((_, existing)) => existing.weight += candidate.weight,
            None => kept.push((lab, candidate)),
        }
    }
    kept.into_iter().map(|(_, color)| color).collect()
}

fn delta_e_squared(a: &Lab, b: &Lab) -> f32 {
    (a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn lab(r: u8, g: u8, b: u8) -> Lab {
        Srgb::new(r, g, b).into_format::<f32>().into_color()
    }

    // --- optimal_size tests ---

    #[test]
    fn small_images_are_not_upscaled() {
        assert_eq!(optimal_size(64, 32, 128), (64, 32));
        assert_eq!(optimal_size(128, 128, 128), (128, 128));
    }

    #[test]
    fn large_images_fit_the_pixel_budget() {
        let (w, h) = optimal_size(1920, 1080, 128);
        assert!(w * h <= 128 * 128 + w + h, "{w}x{h}");
        assert_eq!((w, h), (171, 96));
    }

    #[test]
    fn extreme_aspect_ratio_keeps_one_pixel() {
        let (w, h) = optimal_size(100_000, 1, 128);
        assert_eq!(h, 1);
        assert!(w >= 1);
    }

    // --- load_and_prepare tests ---

    #[test]
    fn load_4x4_png() {
        let path = fixture_path("4x4_test.png");
        create_test_image_solid(&path, 4, 4, [128, 128, 128]);

        let pixels = load_and_prepare(&path, DEFAULT_BITMAP_SIZE).unwrap();
        assert_eq!(pixels.len(), 16);
    }

    #[test]
    fn load_large_image_resizes() {
        let path = fixture_path("512x512_test.png");
        create_test_image_solid(&path, 512, 512, [128, 128, 128]);

        let pixels = load_and_prepare(&path, DEFAULT_BITMAP_SIZE).unwrap();
        assert_eq!(pixels.len(), 128 * 128);
    }

    #[test]
    fn load_nonsquare_preserves_aspect_ratio() {
        let path = fixture_path("512x256_test.png");
        create_test_image_solid(&path, 512, 256, [128, 128, 128]);

        let pixels = load_and_prepare(&path, DEFAULT_BITMAP_SIZE).unwrap();
        assert_eq!(pixels.len(), 181 * 91);
    }

    #[test]
    fn load_file_not_found() {
        let result = load_and_prepare(Path::new("/nonexistent/image.png"), DEFAULT_BITMAP_SIZE);
        let err = result.unwrap_err();
        assert!(matches!(err, InputError::ImageNotFound(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn load_unsupported_format() {
        let path = fixture_path("not_an_image.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "this is not an image").unwrap();

        let err = load_and_prepare(&path, DEFAULT_BITMAP_SIZE).unwrap_err();
        assert!(
            err.to_string().contains("unsupported"),
            "expected unsupported format error, got: {err}"
        );
    }

    // --- quantize tests ---

    #[test]
    fn empty_input_produces_no_colors() {
        assert!(quantize(&[], 8).is_empty());
    }

    #[test]
    fn uniform_image_produces_one_dominant_color() {
        let pixels = vec![lab(200, 50, 50); 1000];

        let colors = quantize(&pixels, 8);

        assert!(
            colors.len() <= 2,
            "uniform image should produce ~1 color after dedup, got {}",
            colors.len()
        );
        assert!(colors[0].weight > 0.8);
    }

    #[test]
    fn two_color_image_produces_two_dominant_colors() {
        let mut pixels = vec![lab(200, 50, 50); 500];
        pixels.extend(vec![lab(50, 50, 200); 500]);

        let colors = quantize(&pixels, 8);

        assert!(colors.len() >= 2);
        let top_two_weight: f32 = colors.iter().take(2).map(|c| c.weight).sum();
        assert!(top_two_weight > 0.9, "top two cover {top_two_weight}");
    }

    #[test]
    fn more_clusters_than_pixels_is_clamped() {
        let pixels = vec![lab(10, 200, 10), lab(200, 10, 10), lab(10, 10, 200)];
        let colors = quantize(&pixels, DEFAULT_MAX_COLORS);
        assert!(!colors.is_empty() && colors.len() <= 3);
    }

    #[test]
    fn near_duplicates_merge_their_weight() {
        let colors = vec![
            ExtractedColor {
                color: Color::new(200, 50, 50),
                weight: 0.5,
            },
            ExtractedColor {
                color: Color::new(201, 51, 50),
                weight: 0.25,
            },
            ExtractedColor {
                color: Color::new(20, 50, 200),
                weight: 0.25,
            },
        ];
        let merged = deduplicate(colors);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].color, Color::new(200, 50, 50));
        assert!((merged[0].weight - 0.75).abs() < 1e-6);
    }

    #[test]
    fn results_sorted_by_weight_descending() {
        let mut pixels = vec![lab(200, 50, 50); 600];
        pixels.extend(vec![lab(50, 50, 200); 300]);
        pixels.extend(vec![lab(50, 200, 50); 100]);

        let colors = quantize(&pixels, 8);

        for window in colors.windows(2) {
            assert!(window[0].weight >= window[1].weight);
        }
    }

    // --- test helpers ---

    fn create_test_image_solid(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
        let img = image::RgbImage::from_fn(width, height, |_, _| image::Rgb(rgb));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        img.save(path).unwrap();
    }
}
