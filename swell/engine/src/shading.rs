use crate::math::{mix3, reflect, Vec3};
use crate::scene::SceneParameters;
use crate::sky::sky_clouds;

const WATER_COLOUR: Vec3 = Vec3::new(0.6, 0.75, 0.65);
const ATTENUATION_FALLOFF: f32 = 0.0001;

/// Lit water colour at a surface hit, already fogged.
pub fn shade(params: &SceneParameters, pos: Vec3, rd: Vec3, normal: Vec3, ro: Vec3) -> Vec3 {
    let light_dir = params.light_dir;
    let lambert = params.light_colour * normal.dot(light_dir).max(0.0);
    let view = (-rd).normalize();
    let heading = (view + light_dir).normalize();
    let highlight = heading.dot(normal).max(0.0).powf(params.specular_hardness);

    // Sun glints swell and fade as the cloud cover drifts.
    let cloud_specular = 0.1 + (4.0 - ((params.time * 0.05).sin() * 4.0));

    let fresnel = if params.reflections {
        (1.0 - view.dot(normal)).max(0.0).powf(5.0).min(1.0)
    } else {
        0.0
    };

    let specular = params.light_colour * (highlight * params.specular * cloud_specular);
    let mut light = ((params.diffuse * lambert) + specular) * (1.0 - fresnel);

    if fresnel > 0.0 {
        let reflected = reflect(rd, normal);
        let sky = sky_clouds(ro, reflected, params.time, light_dir, params.light_colour);
        light = light + (sky * fresnel);
    }

    let offset = pos - ro;
    let atten = (1.0 - (offset.dot(offset) * ATTENUATION_FALLOFF)).max(0.0);
    light = light + (WATER_COLOUR * ((pos.y - params.atten_depth) * params.atten_scale * atten));

    apply_fog(params, light, ro, rd, offset.length())
}

/// Exponential distance fog toward the cloud sky along the same ray.
pub fn apply_fog(
    params: &SceneParameters,
    colour: Vec3,
    ro: Vec3,
    rd: Vec3,
    distance: f32,
) -> Vec3 {
    let amount = 1.0 - (-distance * params.fog * params.fog).exp();
    if amount <= 0.0 {
        return colour;
    }
    let fog_colour = sky_clouds(ro, rd, params.time, params.light_dir, params.light_colour);
    mix3(colour, fog_colour, amount)
}
