//! Hash and noise primitives driving the wave height field and the cloud layer.
//!
//! All functions are pure: the same inputs always produce bit-identical
//! outputs, which keeps supersampled pixels coherent.

use crate::math::{fract, mix, smooth_weight, Mat2, Mat3, Vec2, Vec3, Vec4};

const HASH_SCALE: f32 = 43758.545_312_3;
const HASH_SCALE_3D: f32 = 43758.54;
const HASH_COEFFS_3D: Vec3 = Vec3::new(37.1, 61.7, 12.4);

const FBM_ROTATION: Mat3 = Mat3::from_cols(
    Vec3::new(0.0, 0.8, 0.6),
    Vec3::new(-0.8, 0.36, -0.48),
    Vec3::new(-0.6, -0.48, 0.64),
);
const FBM_OCTAVES: usize = 6;

const FAST32_OFFSET: Vec2 = Vec2::new(26.0, 161.0);
const FAST32_DOMAIN: f32 = 71.0;
const FAST32_LARGE_FLOATS: Vec2 = Vec2::new(951.135_664, 642.949_883);

const OCTAVE_TRANSFORM: Mat2 = Mat2::from_cols(Vec2::new(1.6, 1.2), Vec2::new(-1.2, 1.6));

const VALUE_SCROLL_RATE: f32 = 0.655;
const SWELL_SCROLL_RATE: f32 = 0.233;
const RIPPLE_SCROLL_RATE: f32 = 0.932;

/// Pseudo-random scalar in [0, 1).
pub fn hash1(n: f32) -> f32 {
    fract(n.sin() * HASH_SCALE)
}

/// Smoothly interpolated lattice noise in [0, 1).
pub fn value_noise_2d(x: Vec2) -> f32 {
    let p = x.floor();
    let f = x.fract();
    let fx = smooth_weight(f.x);
    let fy = smooth_weight(f.y);
    let n = p.x + (p.y * 57.0);
    mix(
        mix(hash1(n), hash1(n + 1.0), fx),
        mix(hash1(n + 57.0), hash1(n + 58.0), fx),
        fy,
    )
}

/// Four decorrelated hashes for the corners `(0,0)`, `(1,0)`, `(0,1)`, `(1,1)`
/// of the xy face of the lattice cell at `p`.
pub fn hash4v3(p: Vec3) -> Vec4 {
    Vec4::new(
        p.dot(HASH_COEFFS_3D),
        (p + Vec3::new(1.0, 0.0, 0.0)).dot(HASH_COEFFS_3D),
        (p + Vec3::new(0.0, 1.0, 0.0)).dot(HASH_COEFFS_3D),
        (p + Vec3::new(1.0, 1.0, 0.0)).dot(HASH_COEFFS_3D),
    )
    .map(|v| fract(v.sin() * HASH_SCALE_3D))
}

pub fn value_noise_3d(p: Vec3) -> f32 {
    let i = p.floor();
    let f = p.fract();
    let (fx, fy, fz) = (smooth_weight(f.x), smooth_weight(f.y), smooth_weight(f.z));
    let t1 = hash4v3(i);
    let t2 = hash4v3(i + Vec3::new(0.0, 0.0, 1.0));
    mix(
        mix(mix(t1.x, t1.y, fx), mix(t1.z, t1.w, fx), fy),
        mix(mix(t2.x, t2.y, fx), mix(t2.z, t2.w, fx), fy),
        fz,
    )
}

pub fn fbm3(p: Vec3) -> f32 {
    let octave = FBM_ROTATION * 4.0;
    let mut p = p * 0.5;
    let mut amplitude = 0.5;
    let mut f = 0.0;
    for _ in 0..FBM_OCTAVES {
        f += amplitude * value_noise_3d(p);
        p = p * octave;
        amplitude *= 0.5;
    }
    f
}

/// Brian Sharpe's FAST32 lattice hash. `cell` must hold integer coordinates.
/// Returns the x and y hash components for the corners
/// `(0,0)`, `(1,0)`, `(0,1)`, `(1,1)`.
pub fn fast_hash_2d(cell: Vec2) -> (Vec4, Vec4) {
    let p = Vec4::new(cell.x, cell.y, cell.x + 1.0, cell.y + 1.0);
    let inv_domain = 1.0 / FAST32_DOMAIN;
    let p = p - (p * inv_domain).map(f32::floor) * FAST32_DOMAIN;
    let p = p + Vec4::new(
        FAST32_OFFSET.x,
        FAST32_OFFSET.y,
        FAST32_OFFSET.x,
        FAST32_OFFSET.y,
    );
    let p = p * p;
    let p = p.xzxz() * p.yyww();
    let inv_x = 1.0 / FAST32_LARGE_FLOATS.x;
    let inv_y = 1.0 / FAST32_LARGE_FLOATS.y;
    ((p * inv_x).map(fract), (p * inv_y).map(fract))
}

fn quintic(x: f32) -> f32 {
    x * x * x * ((x * ((x * 6.0) - 15.0)) + 10.0)
}

/// Gradient noise in [-1, 1].
pub fn perlin_2d(p: Vec2) -> f32 {
    let pi = p.floor();
    let pf = Vec4::new(p.x - pi.x, p.y - pi.y, p.x - (pi.x + 1.0), p.y - (pi.y + 1.0));

    let (hash_x, hash_y) = fast_hash_2d(pi);
    let grad_x = hash_x.map(|h| h - 0.49999);
    let grad_y = hash_y.map(|h| h - 0.49999);
    let inv_len = (grad_x * grad_x + grad_y * grad_y).map(|len2| {
        if len2 > 0.0 {
            1.0 / len2.sqrt()
        } else {
            0.0
        }
    });
    let grad_results =
        inv_len * (grad_x * pf.xzxz() + grad_y * pf.yyww()) * std::f32::consts::SQRT_2;

    let bx = quintic(pf.x);
    let by = quintic(pf.y);
    let weights = Vec4::new(
        (1.0 - bx) * (1.0 - by),
        bx * (1.0 - by),
        (1.0 - bx) * by,
        bx * by,
    );
    grad_results.dot(weights)
}

/// Domain-rotated wave octaves: scrolling value noise for the broad swell,
/// direct Perlin for the first two octaves and ridged Perlin for the fine
/// ripples, which scroll roughly four times faster.
pub fn fractal_noise_2d(p: Vec2, time: f32, passes: usize) -> f32 {
    let mut xy = p;
    let mut m = 1.25;
    let mut w = 0.65;
    let mut f = 0.0;
    for i in 0..passes {
        f += value_noise_2d(xy + (time * VALUE_SCROLL_RATE)) * m * 0.25;
        if i < 2 {
            f += perlin_2d(xy.yx() - (time * SWELL_SCROLL_RATE)) * w * 0.12;
        } else {
            f += (perlin_2d(xy.yx() - (time * RIPPLE_SCROLL_RATE)) * w * 0.05).abs() * 1.75;
        }
        w *= 0.45;
        m *= 0.35;
        xy = xy * OCTAVE_TRANSFORM;
    }
    f
}
