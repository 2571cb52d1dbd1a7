use super::cam16::Cam16;
use super::math::{argb_from_lstar, lstar_from_argb, sanitize_degrees};

const CHROMA_SEARCH_ENDPOINT: f64 = 0.4;
const LIGHTNESS_SEARCH_ENDPOINT: f64 = 0.01;
const DL_MAX: f64 = 0.2;
const DE_MAX: f64 = 1.0;

/// Find the sRGB color with the given hue and tone whose chroma is as close as
/// possible to (but not above) the requested chroma.
///
/// Out-of-gamut chroma is reduced by bisection until a color exists; if none
/// does, the gray of the requested tone is returned.
pub fn solve_to_argb(hue: f64, chroma: f64, tone: f64) -> u32 {
    if chroma < 1.0 || tone.round() <= 0.0 || tone.round() >= 100.0 {
        return argb_from_lstar(tone.clamp(0.0, 100.0));
    }
    let hue = sanitize_degrees(hue);

    let mut high = chroma;
    let mut mid = chroma;
    let mut low = 0.0;
    let mut first_loop = true;
    let mut answer = None;

    while (low - high).abs() >= CHROMA_SEARCH_ENDPOINT {
        let candidate = find_by_j(hue, mid, tone);
        if first_loop {
            if let Some(argb) = candidate {
                return argb;
            }
            first_loop = false;
            mid = low + (high - low) / 2.0;
            continue;
        }
        match candidate {
            Some(argb) => {
                answer = Some(argb);
                low = mid;
            }
            None => high = mid,
        }
        mid = low + (high - low) / 2.0;
    }

    answer.unwrap_or_else(|| argb_from_lstar(tone))
}

/// Bisect CAM16 lightness J for a color of the given hue and chroma whose
/// clipped sRGB form lands on the requested L*.
fn find_by_j(hue: f64, chroma: f64, tone: f64) -> Option<u32> {
    let mut low: f64 = 0.0;
    let mut high: f64 = 100.0;
    let mut best_dl = f64::MAX;
    let mut best_de = f64::MAX;
    let mut best = None;

    while (low - high).abs() > LIGHTNESS_SEARCH_ENDPOINT {
        let mid = low + (high - low) / 2.0;
        let clipped = Cam16::from_jch(mid, chroma, hue).to_argb();
        let clipped_lstar = lstar_from_argb(clipped);
        let dl = (tone - clipped_lstar).abs();

        if dl < DL_MAX {
            let cam_clipped = Cam16::from_argb(clipped);
            let de = cam_clipped.distance(&Cam16::from_jch(cam_clipped.j, cam_clipped.chroma, hue));
            if de <= DE_MAX && de <= best_de {
                best_dl = dl;
                best_de = de;
                best = Some(clipped);
            }
        }

        if best_dl == 0.0 && best_de == 0.0 {
            break;
        }
        if clipped_lstar < tone {
            low = mid;
        } else {
            high = mid;
        }
    }

    best
}
