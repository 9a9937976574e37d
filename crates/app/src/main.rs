//! Entry point for cityview.
//! Assembles the city scene, replays recorded input through the fly camera
//! and logs the resulting view. Windowing/GPU upload live in the host.

mod cli;
mod scene;
mod script;

use anyhow::{Context, Result};
use corelib::{Camera, CameraSettings, FrameClock, InputState, Vec3, camera, vec3};

use crate::cli::ViewerConfig;

fn build_camera(cfg: &ViewerConfig) -> Camera {
    let settings = if cfg.bounded {
        CameraSettings::bounded_city()
    } else {
        CameraSettings::default()
    };
    Camera::with_settings(
        vec3(0.0, 2.0, 25.0),
        Vec3::Y,
        camera::DEFAULT_YAW,
        camera::DEFAULT_PITCH,
        settings,
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ViewerConfig::from_env();
    log::info!(
        "Starting cityview. assets={:?}, viewport={}x{}, seed={}, bounded={}",
        cfg.assets,
        cfg.width,
        cfg.height,
        cfg.seed,
        cfg.bounded
    );

    let mut clock = FrameClock::start();
    let (scene, report) = scene::assemble(&cfg.assets, cfg.seed);
    log::info!(
        "Scene ready in {:.3}s: {} model(s), {} skipped, {} vertices, floor={}, skybox faces={}",
        clock.tick(),
        report.loaded.len(),
        report.skipped.len(),
        scene.vertex_count(),
        scene.floor_texture.is_some(),
        scene.skybox.as_ref().map_or(0, |sky| sky.loaded_faces())
    );

    for model in &scene.models {
        log::debug!(
            "  {}: {} vertices, textured={}, at {:?}",
            model.name,
            model.vertex_count(),
            model.texture.is_some(),
            model.transform.translation()
        );
    }

    let mut camera = build_camera(&cfg);
    let mut input = InputState::new();

    if let Some(path) = &cfg.input_script {
        let events = script::load_script(path)
            .with_context(|| format!("Failed to load input script {}", path.display()))?;
        let frames = script::replay(&events, &mut input, &mut camera);
        log::info!("Replayed {} event(s) over {} frame(s)", events.len(), frames);
    }

    log::info!(
        "Camera at {:?}, yaw={:.2}, pitch={:.2}, fov={:.1}",
        camera.position(),
        camera.yaw(),
        camera.pitch(),
        camera.zoom()
    );
    log::debug!("View: {:?}", camera.view_matrix());
    log::debug!("Projection: {:?}", camera.projection_matrix(cfg.width, cfg.height));

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_flag_selects_walled_camera() {
        let cfg = ViewerConfig {
            bounded: true,
            ..ViewerConfig::default()
        };
        let cam = build_camera(&cfg);
        let bounds = cam.settings().bounds.expect("bounds");
        assert!(bounds.contains(cam.position()));
        assert_eq!(cam.settings().movement_speed, 15.0);

        let free = build_camera(&ViewerConfig::default());
        assert!(free.settings().bounds.is_none());
    }
}
