//! Simple path tracer example.
//!
//! Renders a ground sphere and four spheres, two of them sharing one glass
//! material, and prints a PPM
//! image to stdout:
//!
//! ```text
//! cargo run --release -p glint_renderer --example simple_render > simple.ppm
//! ```

use glint_renderer::{
    color_to_rgb8, render, CameraSettings, Color, Dielectric, HittableList, Lambertian,
    Material, Metal, Point3, RenderConfig, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

fn main() -> io::Result<()> {
    let world = build_scene();

    let config = RenderConfig {
        image_width: 400,
        image_height: 225,
        samples_per_pixel: 20,
        max_depth: 10,
    };

    let camera = CameraSettings::default()
        .with_position(
            Point3::new(-2.0, 2.0, 1.0), // look_from
            Point3::new(0.0, 0.0, -1.0), // look_at
            Vec3::new(0.0, 1.0, 0.0),    // vup
        )
        .with_lens(30.0, 0.0, 3.4)
        .build(16.0 / 9.0);

    let mut rng = StdRng::seed_from_u64(1);
    let start = std::time::Instant::now();
    let image = render(&camera, &world, &config, &mut rng);
    eprintln!("Rendered in {:?}", start.elapsed());

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    writeln!(writer, "P3\n{} {}\n255", image.width, image.height)?;
    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    writer.flush()
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    world.add(Arc::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, center)));
    // Nested glass spheres sharing one material
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.45, glass)));
    world.add(Arc::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, gold)));

    world
}
