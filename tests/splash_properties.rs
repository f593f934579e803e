//! Property tests for the animation core.
//!
//! Each test samples progress values and inputs from a seeded RNG so failures
//! are reproducible.

use aquasplash::compositor::{Scene, Viewport};
use aquasplash::config::SplashConfig;
use aquasplash::controller::{Disposition, ScrollInput, SplashController, SplashState};
use aquasplash::kinematics::{transform, Animate, Progress, RenderFrame};
use aquasplash::spawn::{self, MAX_PARTICLE_COUNT};
use aquasplash::sub_emitter;
use aquasplash::{ParticleDescriptor, SplashError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 400;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_5a1a)
}

fn assert_unit(frame: &RenderFrame, what: &str) {
    assert!(
        (0.0..=1.0).contains(&frame.opacity),
        "{what}: opacity {} out of [0, 1]",
        frame.opacity
    );
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generation_is_reproducible() {
    let mut rng = rng();
    for _ in 0..20 {
        let count = rng.gen_range(0..2_000);
        assert_eq!(spawn::generate(count).unwrap(), spawn::generate(count).unwrap());
    }
}

#[test]
fn test_prefix_is_stable() {
    // Attributes depend on the index only; the count just spaces the angles.
    let short = spawn::generate(60).unwrap();
    let long = spawn::generate(120).unwrap();
    for (a, b) in short.iter().zip(&long) {
        assert_eq!(a.category, b.category);
        assert_eq!(a.size, b.size);
        assert_eq!(a.delay, b.delay);
    }
}

#[test]
fn test_count_limits() {
    assert!(spawn::generate(0).unwrap().is_empty());
    assert_eq!(spawn::generate(MAX_PARTICLE_COUNT).unwrap().len(), MAX_PARTICLE_COUNT);
    assert!(matches!(
        spawn::generate(MAX_PARTICLE_COUNT + 1),
        Err(SplashError::InvalidArgument(_))
    ));
}

// ============================================================================
// Kinematics
// ============================================================================

#[test]
fn test_every_droplet_starts_invisible() {
    let droplets = spawn::generate(240).unwrap();
    for d in &droplets {
        let frame = transform(d, 0.0);
        assert!(frame.opacity.abs() < 1e-6, "droplet {} has opacity {} at rest", d.index, frame.opacity);
    }
    for trail in sub_emitter::derive_trails(&droplets) {
        assert!(trail.frame(Progress::ZERO).opacity.abs() < 1e-6);
    }

    let bucket = SplashConfig::bucket();
    for d in &spawn::generate_with(240, &bucket.droplets).unwrap() {
        assert!(transform(d, 0.0).opacity.abs() < 1e-6);
    }
}

#[test]
fn test_opacity_bounded_for_every_family() {
    let mut rng = rng();
    let droplets = spawn::generate(240).unwrap();
    let trails = sub_emitter::derive_trails(&droplets);
    let streams = spawn::generate_streams(32).unwrap();
    let splatters = spawn::generate_splatters(18).unwrap();
    let drips = spawn::generate_drips(12).unwrap();
    let caustics = spawn::generate_caustics(12).unwrap();

    for _ in 0..SAMPLES {
        // Include values outside [0, 1]; transform clamps them.
        let raw: f32 = rng.gen_range(-0.5..1.5);
        let p = Progress::clamped(raw);

        for d in &droplets {
            assert_unit(&transform(d, raw), "droplet");
        }
        for t in &trails {
            assert_unit(&t.frame(p), "trail");
        }
        for s in &streams {
            assert_unit(&s.frame(p), "stream");
        }
        for s in &splatters {
            assert_unit(&s.frame(p), "splatter");
            for drop in sub_emitter::derive_sub_droplets(s) {
                assert_unit(&drop.frame(p), "sub-droplet");
            }
            for drip in sub_emitter::derive_splatter_drips(s) {
                assert_unit(&drip.frame(p), "splatter drip");
            }
        }
        for d in &drips {
            assert_unit(&d.frame(p), "drip");
            assert_unit(&sub_emitter::derive_drip_tip(d).frame(p), "drip tip");
        }
        for c in &caustics {
            assert_unit(&c.frame(p), "caustic");
        }
    }
}

#[test]
fn test_inert_before_delay() {
    let mut rng = rng();
    for d in spawn::generate(240).unwrap().iter().filter(|d| d.delay > 0.0) {
        let p = rng.gen_range(0.0..d.delay);
        assert_eq!(transform(d, p), RenderFrame::HIDDEN, "droplet {} moved early", d.index);
    }
}

#[test]
fn test_launch_distance_is_monotonic() {
    let mut rng = rng();
    let droplets: Vec<ParticleDescriptor> = spawn::generate(120)
        .unwrap()
        .into_iter()
        .map(|d| ParticleDescriptor { gravity: 0.0, ..d })
        .collect();

    for _ in 0..SAMPLES {
        let a: f32 = rng.gen_range(0.0..1.0);
        let b: f32 = rng.gen_range(0.0..1.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for d in &droplets {
            let near = transform(d, lo).position.length();
            let far = transform(d, hi).position.length();
            assert!(far + 1e-3 >= near, "droplet {} went backwards between {lo} and {hi}", d.index);
        }
    }
}

#[test]
fn test_terminal_position_holds() {
    for config in [SplashConfig::default(), SplashConfig::bucket(), SplashConfig::light()] {
        let droplets = spawn::generate_with(config.droplets.count.get(), &config.droplets).unwrap();
        for d in &droplets {
            let end = transform(d, 1.0);
            assert_eq!(end.local_progress, 1.0);
            assert_eq!(transform(d, 1.7), end);
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

#[test]
fn test_controller_monotonic_and_latched() {
    let mut rng = rng();
    for _ in 0..50 {
        let duration = rng.gen_range(100.0..5_000.0);
        let mut controller = SplashController::new(duration).unwrap();
        let mut last = controller.progress();
        let mut completed_at = None;

        for step in 0..500 {
            let delta = rng.gen_range(-120.0..120.0);
            let input = if rng.gen_bool(0.5) {
                ScrollInput::wheel(delta)
            } else {
                ScrollInput::touch_move(delta)
            };
            let was_complete = controller.is_complete();
            let disposition = controller.handle(input);

            if was_complete {
                assert_eq!(disposition, Disposition::PassThrough);
            } else {
                assert_eq!(disposition, Disposition::Consumed);
            }
            assert!(controller.progress() >= last);
            last = controller.progress();

            if controller.is_complete() && completed_at.is_none() {
                completed_at = Some(step);
                assert_eq!(controller.progress(), Progress::ONE);
            }
        }

        if completed_at.is_some() {
            assert_eq!(controller.state(), SplashState::Complete);
        }
    }
}

#[test]
fn test_exact_duration_completes_on_last_event() {
    let mut controller = SplashController::new(2_500.0).unwrap();
    for _ in 0..24 {
        assert_eq!(controller.handle(ScrollInput::wheel(100.0)), Disposition::Consumed);
        assert!(!controller.is_complete());
    }
    assert_eq!(controller.handle(ScrollInput::wheel(100.0)), Disposition::Consumed);
    assert!(controller.is_complete());
    assert_eq!(controller.handle(ScrollInput::wheel(100.0)), Disposition::PassThrough);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_scene_frames_respect_global_fade() {
    let mut rng = rng();
    let scene = Scene::new(&SplashConfig::default()).unwrap();
    let viewport = Viewport::new(1440.0, 900.0);

    for _ in 0..100 {
        let p = Progress::clamped(rng.gen_range(0.0..1.0));
        let frame = scene.render(p, viewport);
        for sprite in &frame.sprites {
            assert!(sprite.opacity <= frame.global_fade + 1e-6);
            assert!(sprite.size.x > 0.0 && sprite.size.y > 0.0);
        }
        assert!(frame.backdrop.atmosphere <= 0.15 + 1e-6);
    }
}
