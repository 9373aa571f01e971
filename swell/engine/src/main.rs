use std::io::{self, Read};
use std::time::Instant;

use swell_engine::config::{validate_config, IncomingConfig};
use swell_engine::cpu::render_cpu;
use swell_engine::render::RenderSettings;
use swell_engine::scene::SceneParameters;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let incoming: IncomingConfig = serde_json::from_str(&raw)?;
    let frames = incoming.into_frames();
    if frames.is_empty() {
        return Err("frames array must not be empty".into());
    }

    let total = frames.len();
    let mut prepared_frames = Vec::with_capacity(total);

    // Reject the whole batch before rendering anything.
    for (index, frame) in frames.iter().enumerate() {
        validate_config(frame).map_err(|error| format!("frame {}: {error}", index + 1))?;
        let params = SceneParameters::from_frame(frame)
            .map_err(|error| format!("frame {}: {error}", index + 1))?;
        prepared_frames.push((RenderSettings::from_frame(frame), params));
    }

    for (index, (settings, params)) in prepared_frames.iter().enumerate() {
        log::debug!("frame {} parameters: {:?}", index + 1, params);

        let started = Instant::now();
        let image = render_cpu(settings, params)
            .map_err(|error| format!("frame {}: {error}", index + 1))?;
        let elapsed_ms = started.elapsed().as_millis();
        image.save(&settings.output_path)?;

        log::info!(
            "[{}/{}] Rendered {}x{} at t={:.2}s [{}] in {} ms: {}",
            index + 1,
            total,
            settings.width,
            settings.height,
            params.time,
            settings.tuning.quality.as_str(),
            elapsed_ms,
            settings.output_path
        );
    }

    Ok(())
}
