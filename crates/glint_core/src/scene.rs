//! Demo scene construction.
//!
//! Builds the demo scene: a large ground sphere, a field of small and
//! medium spheres with random materials, and three large feature spheres.

use std::sync::Arc;

use glint_math::{gen_f64, gen_range, random_vector, Color, Point3};
use glint_renderer::{Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use rand::RngCore;

const SMALL_RADIUS: f64 = 0.05;
const MEDIUM_RADIUS: f64 = 0.2;
const LARGE_RADIUS: f64 = 1.0;

/// Half extent of the square grid the random spheres are scattered over.
const FIELD_EXTENT: f64 = 11.0;

/// Spheres already placed on the ground, used to reject overlapping ones.
struct Placement {
    occupied: Vec<(Point3, f64)>,
}

impl Placement {
    fn new() -> Self {
        Self {
            occupied: Vec::new(),
        }
    }

    fn reserve(&mut self, center: Point3, radius: f64) {
        self.occupied.push((center, radius));
    }

    /// True if a sphere at `center` with `radius` touches no placed sphere.
    fn is_free(&self, center: Point3, radius: f64) -> bool {
        self.occupied
            .iter()
            .all(|(other, other_radius)| (*other - center).length() >= radius + other_radius)
    }
}

/// Build the demo scene, drawing every random choice from `rng`.
pub fn build_demo_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let large_centers = [
        Point3::new(0.0, LARGE_RADIUS, 0.0),
        Point3::new(-4.0 * LARGE_RADIUS, LARGE_RADIUS, 0.0),
        Point3::new(4.0 * LARGE_RADIUS, LARGE_RADIUS, 0.0),
    ];

    // Feature spheres claim their space before anything random is placed
    let mut placement = Placement::new();
    for center in large_centers {
        placement.reserve(center, LARGE_RADIUS);
    }

    // Ground
    let ground_material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    scatter_spheres(&mut world, &mut placement, MEDIUM_RADIUS, 1.0, rng);
    scatter_spheres(&mut world, &mut placement, SMALL_RADIUS, 0.4, rng);

    // Three main spheres
    let materials: [Arc<dyn Material>; 3] = [
        Arc::new(Dielectric::new(1.5)),
        Arc::new(Lambertian::new(Color::new(0.2, 0.3, 0.4))),
        Arc::new(Metal::new(Color::new(0.9, 0.6, 0.5), 0.0)),
    ];
    for (center, material) in large_centers.into_iter().zip(materials) {
        world.add(Arc::new(Sphere::new(center, LARGE_RADIUS, material)));
    }

    log::info!("Created {} objects", world.len());
    world
}

/// Scatter spheres of one size over the field on a jittered grid.
///
/// Each grid cell gets at most one sphere resting on the ground; cells whose
/// sphere would overlap an existing one are skipped.
fn scatter_spheres(
    world: &mut HittableList,
    placement: &mut Placement,
    radius: f64,
    step: f64,
    rng: &mut dyn RngCore,
) {
    let mut a = -FIELD_EXTENT;
    while a < FIELD_EXTENT {
        let mut b = -FIELD_EXTENT;
        while b < FIELD_EXTENT {
            let choose_mat = gen_f64(rng);
            let x = a + gen_f64(rng);
            let z = b + gen_f64(rng);
            let center = Point3::new(x, radius, z);

            if placement.is_free(center, radius) {
                placement.reserve(center, radius);
                let material = random_material(choose_mat, rng);
                world.add(Arc::new(Sphere::new(center, radius, material)));
            }

            b += step;
        }
        a += step;
    }
}

/// Pick a material: 60% diffuse, 20% metal, 20% glass.
fn random_material(choose_mat: f64, rng: &mut dyn RngCore) -> Arc<dyn Material> {
    if choose_mat < 0.6 {
        // Diffuse
        Arc::new(Lambertian::new(random_vector(rng, 0.0, 1.0)))
    } else if choose_mat < 0.8 {
        // Metal
        let albedo = random_vector(rng, 0.5, 1.0);
        let fuzz = gen_range(rng, 0.0, 0.5);
        Arc::new(Metal::new(albedo, fuzz))
    } else {
        // Glass
        Arc::new(Dielectric::new(gen_range(rng, 1.1, 2.0)))
    }
}
