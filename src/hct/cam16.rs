use std::f64::consts::PI;
use std::sync::OnceLock;

use super::math::{argb_from_xyz, xyz_from_argb, y_from_lstar, WHITE_POINT_D65};

/// Environment a color is perceived in. Only the standard sRGB viewing
/// conditions are used by the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

impl ViewingConditions {
    pub fn make(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let [x, y, z] = white_point;
        let r_w = x * 0.401288 + y * 0.650173 + z * -0.051461;
        let g_w = x * -0.250268 + y * 1.204414 + z * 0.045854;
        let b_w = x * -0.002079 + y * 0.048952 + z * 0.953127;

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        }
        .clamp(0.0, 1.0);

        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];
        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();
        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);

        let rgb_a_factors = [
            (fl * rgb_d[0] * r_w / 100.0).powf(0.42),
            (fl * rgb_d[1] * g_w / 100.0).powf(0.42),
            (fl * rgb_d[2] * b_w / 100.0).powf(0.42),
        ];
        let rgb_a = rgb_a_factors.map(|f| 400.0 * f / (f + 27.13));
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb: nbb,
            c,
            nc: f,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// sRGB-like conditions: D65 white, mid-gray background, average surround.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<ViewingConditions> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::make(
                WHITE_POINT_D65,
                200.0 / PI * y_from_lstar(50.0) / 100.0,
                50.0,
                2.0,
                false,
            )
        })
    }
}

fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * stop
}

/// CAM16 color appearance coordinates, plus the CAM16-UCS coordinates used for
/// color distance.
#[derive(Debug, Clone, Copy)]
pub struct Cam16 {
    pub hue: f64,
    pub chroma: f64,
    pub j: f64,
    pub jstar: f64,
    pub astar: f64,
    pub bstar: f64,
}

impl Cam16 {
    pub fn from_argb(argb: u32) -> Self {
        let [x, y, z] = xyz_from_argb(argb);
        Self::from_xyz(x, y, z, ViewingConditions::standard())
    }

    pub fn from_xyz(x: f64, y: f64, z: f64, vc: &ViewingConditions) -> Self {
        let r_c = 0.401288 * x + 0.650173 * y - 0.051461 * z;
        let g_c = -0.250268 * x + 1.204414 * y + 0.045854 * z;
        let b_c = -0.002079 * x + 0.048952 * y + 0.953127 * z;

        let adapt = |channel: f64, d: f64| {
            let scaled = d * channel;
            let af = (vc.fl * scaled.abs() / 100.0).powf(0.42);
            scaled.signum() * 400.0 * af / (af + 27.13)
        };
        let r_a = adapt(r_c, vc.rgb_d[0]);
        let g_a = adapt(g_c, vc.rgb_d[1]);
        let b_a = adapt(b_c, vc.rgb_d[2]);

        let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let atan_degrees = b.atan2(a).to_degrees();
        let hue = if atan_degrees < 0.0 {
            atan_degrees + 360.0
        } else if atan_degrees >= 360.0 {
            atan_degrees - 360.0
        } else {
            atan_degrees
        };

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * (a * a + b * b).sqrt() / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
        let chroma = alpha * (j / 100.0).sqrt();

        Self::with_ucs(hue, chroma, j, vc)
    }

    pub fn from_jch(j: f64, chroma: f64, hue: f64) -> Self {
        Self::with_ucs(hue, chroma, j, ViewingConditions::standard())
    }

    fn with_ucs(hue: f64, chroma: f64, j: f64, vc: &ViewingConditions) -> Self {
        let m = chroma * vc.fl_root;
        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = 1.0 / 0.0228 * (1.0 + 0.0228 * m).ln();
        let hue_radians = hue.to_radians();
        Self {
            hue,
            chroma,
            j,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// CAM16-UCS color difference.
    pub fn distance(&self, other: &Cam16) -> f64 {
        let dj = self.jstar - other.jstar;
        let da = self.astar - other.astar;
        let db = self.bstar - other.bstar;
        let de_prime = (dj * dj + da * da + db * db).sqrt();
        1.41 * de_prime.powf(0.63)
    }

    /// Packed sRGB color these coordinates describe, clipped to the gamut.
    pub fn to_argb(&self) -> u32 {
        let [x, y, z] = self.xyz_in(ViewingConditions::standard());
        argb_from_xyz(x, y, z)
    }

    fn xyz_in(&self, vc: &ViewingConditions) -> [f64; 3] {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };
        let t = (alpha / (1.64 - 0.29f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();

        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        let unadapt = |channel: f64| {
            let base = (27.13 * channel.abs() / (400.0 - channel.abs())).max(0.0);
            channel.signum() * (100.0 / vc.fl) * base.powf(1.0 / 0.42)
        };
        let r_f = unadapt(r_a) / vc.rgb_d[0];
        let g_f = unadapt(g_a) / vc.rgb_d[1];
        let b_f = unadapt(b_a) / vc.rgb_d[2];

        [
            1.86206786 * r_f - 1.01125463 * g_f + 0.14918677 * b_f,
            0.38752654 * r_f + 0.62144744 * g_f - 0.00897398 * b_f,
            -0.01584150 * r_f - 0.03412294 * g_f + 1.04996444 * b_f,
        ]
    }
}
