//! Sky background: a cheap two-tone gradient and the layered cloud model
//! used for misses, reflections and fog.

use crate::math::{mix3, Vec3};
use crate::noise::fbm3;

const ZENITH: Vec3 = Vec3::new(0.15, 0.2, 0.4);
const HAZE: Vec3 = Vec3::new(0.32, 0.32, 0.35);
const HORIZON_GREY: Vec3 = Vec3::new(0.35, 0.35, 0.38);

const CLOUD_BASE: f32 = 100.0;
const CLOUD_RANGE_INV: f32 = 1.0 / 50.0;
const CLOUD_ATTENUATION: f32 = 0.06;
const CLOUD_LAYERS: usize = 22;
const CLOUD_DRIFT: Vec3 = Vec3::new(10.0, 0.0, 10.0);

/// Gradient sky without clouds or sun.
pub fn sky(rd: Vec3) -> Vec3 {
    let v = (1.0 - rd.y.max(0.0)).powf(6.0);
    mix3(ZENITH, HAZE, v).clamp01()
}

/// Sky with a sun disk, halo and drifting volumetric clouds.
pub fn sky_clouds(ro: Vec3, rd: Vec3, time: f32, light_dir: Vec3, light_colour: Vec3) -> Vec3 {
    // The horizon blend below is fully grey for these rays.
    if rd.y <= 0.0 {
        return HORIZON_GREY;
    }

    let cover = (0.6 + ((time * 0.05).sin() * 0.2)).clamp(0.0, 1.0);
    let low = ZENITH * 0.5;
    let high = Vec3::new(0.25, 0.5, 0.7) * 0.5;
    let sun_dot = rd.dot(light_dir).max(0.0);

    let ro = ro + (CLOUD_DRIFT * time);
    let base_t = (CLOUD_BASE - ro.y) / rd.y;
    let p = Vec3::new(ro.x + (base_t * rd.x), CLOUD_BASE, ro.z + (base_t * rd.z));
    let ds = 1.0 / (CLOUD_RANGE_INV * rd.y * (2.0 - rd.y) * CLOUD_LAYERS as f32);

    let mut col_sum = 0.0;
    let mut att_sum = 0.0;
    let mut att = 0.0;
    let mut s = 0.0;
    for _ in 0..CLOUD_LAYERS {
        let mut q = p + (rd * s);
        q.z *= 0.7;
        att += CLOUD_ATTENUATION * (cover - fbm3(q * 0.02)).max(0.0);
        let a = (1.0 - att_sum) * att;
        col_sum += a * (q.y - CLOUD_BASE) * CLOUD_RANGE_INV;
        att_sum += a;
        s += ds;
        if att_sum >= 1.0 {
            break;
        }
    }
    col_sum += 0.5 * ((1.0 - att_sum) * sun_dot.powf(3.0)).min(1.0);

    let cloud = Vec3::splat(col_sum) + (light_colour * 0.05);
    let sun = light_colour
        * ((sun_dot.powf(1500.0) * 2.0).min(1.0) + (sun_dot.powf(10.0) * 0.75).min(1.0))
            .clamp(0.0, 1.0);
    let background = mix3(low, high, 1.0 - rd.y);
    let col = mix3(background + sun, cloud * 1.6, att_sum).clamp01();

    mix3(col, HORIZON_GREY, (1.0 - (rd.y * 4.0)).clamp(0.0, 1.0))
}
