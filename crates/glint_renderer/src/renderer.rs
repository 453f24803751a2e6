//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded bounce depth, resolved iteratively
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::{Camera, Hittable};
use glint_math::{gen_f64, unit_vector, Color, Interval, Ray};
use rand::RngCore;
use std::time::Instant;

/// Smallest accepted hit distance. Keeps scattered rays from re-hitting
/// the surface they start on due to floating point error.
pub const T_MIN: f64 = 0.001;

/// Upper bound of an encoded channel before scaling to 8 bits.
const CHANNEL_MAX: f64 = 0.9999;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 1000,
            image_height: 666,
            samples_per_pixel: 50,
            max_depth: 50,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through up to `depth` scatter events, multiplying the
/// attenuation of each. A ray that escapes picks up the sky color; one that
/// is absorbed or runs out of bounces contributes black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * sky_color(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted
    Color::ZERO
}

/// Background seen by rays that escape the scene.
///
/// Blends white towards light blue as the direction tilts upwards.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Each channel is gamma corrected, clamped to [0, 0.9999] and scaled by
/// 256 with truncation, so 1.0 maps to 255.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, CHANNEL_MAX);
    let encode = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `i` counts columns from the left and `j` counts rows from the bottom.
/// Returns the mean of all samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let width_span = f64::from(config.image_width - 1);
    let height_span = f64::from(config.image_height - 1);

    for _ in 0..config.samples_per_pixel {
        let s = (f64::from(i) + gen_f64(rng)) / width_span;
        let t = (f64::from(j) + gen_f64(rng)) / height_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    let scale = 1.0 / f64::from(config.samples_per_pixel);
    pixel_color * scale
}

/// Simple image buffer for storing render output.
///
/// Pixels are stored row-major with the top row first.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Index into `pixels`, computed in `usize` so large images don't wrap.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y = 0 being the top row.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Encoded 8-bit pixels in output order.
    pub fn rgb8_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels.iter().map(|color| color_to_rgb8(*color))
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.rgb8_pixels().flatten().collect()
    }
}

/// Render the entire scene to an image buffer.
///
/// Scanlines are traced from the top of the image down, drawing every
/// random number from `rng` in a fixed order.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    debug_assert!(
        config.image_width > 1 && config.image_height > 1,
        "image must be at least 2x2 pixels"
    );

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for j in (0..config.image_height).rev() {
        log::debug!("Scanlines remaining: {}", j);
        let y = config.image_height - 1 - j;
        for i in 0..config.image_width {
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(i, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CameraSettings, HitRecord, HittableList, Lambertian, Material, ScatterResult, Sphere,
    };
    use glint_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Absorbs every ray.
    struct Absorber;

    impl Material for Absorber {
        fn scatter(
            &self,
            _: &Ray,
            _: &HitRecord<'_>,
            _: &mut dyn RngCore,
        ) -> Option<ScatterResult> {
            None
        }
    }

    /// Sends every ray straight up with a fixed attenuation.
    struct Skyward(Color);

    impl Material for Skyward {
        fn scatter(
            &self,
            _: &Ray,
            rec: &HitRecord<'_>,
            _: &mut dyn RngCore,
        ) -> Option<ScatterResult> {
            Some(ScatterResult {
                attenuation: self.0,
                scattered: Ray::new(rec.p, Vec3::Y),
            })
        }
    }

    fn world_with(material: Arc<dyn Material>) -> HittableList {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -2.0), 1.0, material)));
        world
    }

    fn forward_ray() -> Ray {
        Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    fn test_camera(config: &RenderConfig) -> Camera {
        let aspect = f64::from(config.image_width) / f64::from(config.image_height);
        CameraSettings::default()
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .build(aspect)
    }

    #[test]
    fn test_sky_gradient() {
        let up_color = sky_color(&Ray::new(Point3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down_color = sky_color(&Ray::new(Point3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        let level_color = sky_color(&Ray::new(Point3::ZERO, Vec3::new(1.0, 0.0, 0.0)));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        assert!((down_color - Color::ONE).length() < 1e-12);
        assert!((level_color - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_ray_color_depth_zero_is_black() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(ray_color(&forward_ray(), &world, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_ray_color_miss_is_sky() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = forward_ray();
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), sky_color(&ray));
    }

    #[test]
    fn test_ray_color_absorbed_is_black() {
        let world = world_with(Arc::new(Absorber));
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(ray_color(&forward_ray(), &world, 10, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_ray_color_applies_attenuation() {
        let world = world_with(Arc::new(Skyward(Color::splat(0.5))));
        let mut rng = StdRng::seed_from_u64(42);

        let color = ray_color(&forward_ray(), &world, 2, &mut rng);
        assert!((color - Color::new(0.25, 0.35, 0.5)).length() < 1e-12);

        // One bounce is spent on the sphere, none left for the sky
        assert_eq!(ray_color(&forward_ray(), &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::new(0.25, 0.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_white_samples_average_to_255() {
        for samples in [1_u32, 7, 50, 100] {
            let mut sum = Color::ZERO;
            for _ in 0..samples {
                sum += Color::ONE;
            }
            let mean = sum * (1.0 / f64::from(samples));
            assert_eq!(color_to_rgb8(mean), [255, 255, 255]);
        }
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let world = world_with(Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))));
        let config = RenderConfig {
            image_width: 11,
            image_height: 11,
            samples_per_pixel: 4,
            max_depth: 5,
        };
        let camera = test_camera(&config);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel sees the grey sphere, which is darker than open sky
        let color = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.x < sky_color(&forward_ray()).x);
    }

    #[test]
    fn test_zero_depth_renders_black() {
        let world = world_with(Arc::new(Lambertian::new(Color::new(0.8, 0.2, 0.2))));
        let config = RenderConfig {
            image_width: 6,
            image_height: 4,
            samples_per_pixel: 3,
            max_depth: 0,
        };
        let camera = test_camera(&config);
        let mut rng = StdRng::seed_from_u64(42);

        let image = render(&camera, &world, &config, &mut rng);
        assert_eq!(image.pixels.len(), 24);
        assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
        assert!(image.rgb8_pixels().all(|rgb| rgb == [0, 0, 0]));
    }

    #[test]
    fn test_empty_scene_renders_sky_gradient() {
        let world = HittableList::new();
        let config = RenderConfig {
            image_width: 8,
            image_height: 6,
            samples_per_pixel: 16,
            max_depth: 5,
        };
        let camera = test_camera(&config);
        let mut rng = StdRng::seed_from_u64(42);

        let image = render(&camera, &world, &config, &mut rng);

        // Red drops from 1.0 (white) towards 0.5 (blue) going up the image
        let row_red = |y: u32| (0..image.width).map(|x| image.get(x, y).x).sum::<f64>();
        for y in 1..image.height {
            assert!(row_red(y - 1) < row_red(y), "row {} should be bluer than row {}", y - 1, y);
        }
        for x in 0..image.width {
            assert!(image.get(x, 0).x < image.get(x, image.height - 1).x);
        }
    }

    #[test]
    fn test_image_buffer_layout() {
        let mut image = ImageBuffer::new(3, 2);
        assert_eq!(image.pixels.len(), 6);
        image.set(2, 1, Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.get(0, 1), Color::ZERO);
    }

    #[test]
    fn test_image_buffer_index_exceeds_u32() {
        // 70_000 * 70_000 does not fit in a u32
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(69_999, 69_999), 70_000usize * 70_000 - 1);
        assert_eq!(image.index(5, 1), 70_005);
    }

    #[test]
    fn test_render_is_deterministic_for_a_seed() {
        let world = world_with(Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))));
        let config = RenderConfig {
            image_width: 5,
            image_height: 4,
            samples_per_pixel: 2,
            max_depth: 4,
        };
        let camera = test_camera(&config);

        let a = render(&camera, &world, &config, &mut StdRng::seed_from_u64(7));
        let b = render(&camera, &world, &config, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }
}
