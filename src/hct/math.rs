//! sRGB / XYZ / L* conversions shared by the CAM16 model and the solver.

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [
        3.2413774792388685,
        -1.5376652402851851,
        -0.49885366846268053,
    ],
    [-0.9691452513005321, 1.8758853451067872, 0.04156585616912061],
    [
        0.05562093689691305,
        -0.20395524564742123,
        1.0571799111220335,
    ],
];

pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

pub fn argb_from_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xff00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn red(argb: u32) -> u8 {
    ((argb >> 16) & 0xff) as u8
}

pub fn green(argb: u32) -> u8 {
    ((argb >> 8) & 0xff) as u8
}

pub fn blue(argb: u32) -> u8 {
    (argb & 0xff) as u8
}

/// Linearize an 8-bit sRGB channel into [0, 100].
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040449936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Delinearize a [0, 100] linear channel into a clamped 8-bit sRGB channel.
pub fn delinearized(component: f64) -> u8 {
    let normalized = component / 100.0;
    let value = if normalized <= 0.0031308 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn xyz_from_argb(argb: u32) -> [f64; 3] {
    let rgb = [
        linearized(red(argb)),
        linearized(green(argb)),
        linearized(blue(argb)),
    ];
    multiply(rgb, &SRGB_TO_XYZ)
}

pub fn argb_from_xyz(x: f64, y: f64, z: f64) -> u32 {
    let [r, g, b] = multiply([x, y, z], &XYZ_TO_SRGB);
    argb_from_rgb(delinearized(r), delinearized(g), delinearized(b))
}

fn multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (i, m) in matrix.iter().enumerate() {
        out[i] = row[0] * m[0] + row[1] * m[1] + row[2] * m[2];
    }
    out
}

fn lab_f(t: f64) -> f64 {
    let e = 216.0 / 24389.0;
    let kappa = 24389.0 / 27.0;
    if t > e {
        t.cbrt()
    } else {
        (kappa * t + 16.0) / 116.0
    }
}

fn lab_invf(ft: f64) -> f64 {
    let e = 216.0 / 24389.0;
    let kappa = 24389.0 / 27.0;
    let ft3 = ft * ft * ft;
    if ft3 > e {
        ft3
    } else {
        (116.0 * ft - 16.0) / kappa
    }
}

/// Relative luminance Y in [0, 100] for a given L*.
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_invf((lstar + 16.0) / 116.0)
}

pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0) * 116.0 - 16.0
}

pub fn lstar_from_argb(argb: u32) -> f64 {
    lstar_from_y(xyz_from_argb(argb)[1])
}

/// The gray with the given L*.
pub fn argb_from_lstar(lstar: f64) -> u32 {
    let component = delinearized(y_from_lstar(lstar));
    argb_from_rgb(component, component, component)
}

/// Wrap any angle into [0, 360).
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let degrees = degrees % 360.0;
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

pub fn sanitize_degrees_int(degrees: i32) -> usize {
    degrees.rem_euclid(360) as usize
}

/// Shortest angular distance between two hues, in [0, 180].
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let difference = (sanitize_degrees(a) - sanitize_degrees(b)).abs();
    difference.min(360.0 - difference)
}

/// Sign of the shorter path from `from` to `to`: +1 when increasing the hue
/// gets there first, -1 otherwise.
pub fn rotation_direction(from: f64, to: f64) -> f64 {
    let increasing_difference = sanitize_degrees(to - from);
    if increasing_difference <= 180.0 {
        1.0
    } else {
        -1.0
    }
}
