//! Headless playback of a [`Scene`].
//!
//! Drives a real [`DriverLoop`] against a [`Raster`], pumping frames from a
//! [`ManualScheduler`] instead of a display, so the CLI and tests exercise
//! exactly the code path the browser runs.

use backdrop_core::driver::DriverLoop;
use backdrop_core::error::BackdropError;
use backdrop_core::host::{ListenerRegistry, ManualScheduler};
use backdrop_core::prng::Xorshift64;
use backdrop_core::scene::Scene;
use tracing::debug;

use crate::pixel::Raster;

/// Driver loop wired to headless host doubles.
pub type HeadlessLoop = DriverLoop<ManualScheduler, ListenerRegistry, Raster>;

/// Mounts a headless loop for `scene` without running any ticks.
pub fn mount(scene: &Scene) -> Result<HeadlessLoop, BackdropError> {
    scene.validate()?;
    let mut driver = DriverLoop::new(
        scene.config()?,
        Xorshift64::new(scene.seed),
        ManualScheduler::new(),
        ListenerRegistry::new(),
    );
    driver.mount(scene.viewport(), Some(Raster::new(scene.viewport())))?;
    Ok(driver)
}

/// Plays `scene` for its tick count and returns the last frame.
///
/// Pointer samples for tick `n` are delivered before frame `n` fires.
pub fn replay(scene: &Scene) -> Result<Raster, BackdropError> {
    let mut driver = mount(scene)?;

    for tick in 0..scene.ticks {
        for sample in scene.pointer_at(tick) {
            driver.on_pointer_move(sample.x, sample.y);
        }
        if driver.scheduler_mut().take_due().is_none() {
            break;
        }
        driver.on_frame();
    }

    debug!(
        width = scene.width,
        height = scene.height,
        ticks = scene.ticks,
        points = driver.field().len(),
        "scene replayed"
    );
    driver.into_surface().ok_or(BackdropError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::scene::PointerSample;
    use serde_json::json;

    fn scene(ticks: usize) -> Scene {
        let mut s = Scene::new(200, 150, 42);
        s.ticks = ticks;
        s
    }

    #[test]
    fn zero_ticks_leaves_raster_blank() {
        let raster = replay(&scene(0)).unwrap();
        assert_eq!((raster.width(), raster.height()), (200, 150));
        assert!(raster.is_blank());
    }

    #[test]
    fn ticks_draw_points() {
        let raster = replay(&scene(3)).unwrap();
        assert!(!raster.is_blank());
    }

    #[test]
    fn replay_is_deterministic() {
        let a = replay(&scene(30)).unwrap().to_rgba8();
        let b = replay(&scene(30)).unwrap().to_rgba8();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let mut other = scene(5);
        other.seed = 43;
        assert_ne!(
            replay(&scene(5)).unwrap().to_rgba8(),
            replay(&other).unwrap().to_rgba8()
        );
    }

    #[test]
    fn pointer_script_changes_the_frame() {
        let mut touched = scene(10);
        touched.pointer = vec![PointerSample { tick: 0, x: 100.0, y: 75.0 }];
        assert_ne!(
            replay(&scene(10)).unwrap().to_rgba8(),
            replay(&touched).unwrap().to_rgba8()
        );
    }

    #[test]
    fn mount_acquires_host_resources() {
        let driver = mount(&scene(0)).unwrap();
        assert_eq!(driver.events().active(), 2);
        assert_eq!(driver.scheduler().pending(), 1);
    }

    #[test]
    fn invalid_scenes_are_rejected() {
        assert!(matches!(
            replay(&Scene::new(0, 10, 1)),
            Err(BackdropError::InvalidDimensions)
        ));
        assert!(matches!(
            replay(&Scene::new(100_000, 100_000, 1)),
            Err(BackdropError::InvalidDimensions)
        ));
        let mut bad = scene(1);
        bad.params = json!({"glow_color": "teal"});
        assert!(matches!(replay(&bad), Err(BackdropError::InvalidColor(_))));
    }
}
