//! End-to-end tests of the [Surface] contract across every primitive, using the canonical
//! epsilon tables.

use approx::assert_relative_eq;
use glint_kernel::core::types::{Number, Point3, Vector3};
use glint_kernel::shared::epsilon::{HIT_EPSILONS, SHADOW_EPSILONS};
use glint_kernel::shared::intersect::Intersection;
use glint_kernel::shared::ray::Ray;
use glint_kernel::surface::axis_box::AxisBoxSurface;
use glint_kernel::surface::compound::CompoundSurface;
use glint_kernel::surface::cylinder::CylinderSurface;
use glint_kernel::surface::planar::disk::DiskSurface;
use glint_kernel::surface::planar::plane::PlaneSurface;
use glint_kernel::surface::planar::rectangle::RectangleSurface;
use glint_kernel::surface::planar::triangle::TriangleSurface;
use glint_kernel::surface::planar::Planar;
use glint_kernel::surface::sphere::SphereSurface;
use glint_kernel::surface::torus::TorusSurface;
use glint_kernel::surface::{Surface, SurfaceInstance};

const TOLERANCE: Number = 1e-9;

/// Runs a hit-test against the canonical hit table, returning the accepted distance and
/// the written record
fn hit<S: Surface>(surface: &S, ray: &Ray) -> Option<(Number, Intersection)> {
    let mut t = Number::INFINITY;
    let mut record = Intersection::empty();
    surface
        .intersect(ray, &mut t, &mut record, &HIT_EPSILONS)
        .then_some((t, record))
}

/// Runs a shadow-test against the canonical shadow table, returning the occluding distance
fn shadow<S: Surface>(surface: &S, ray: &Ray, t_max: Number) -> Option<Number> {
    let mut t = Number::INFINITY;
    let mut occluder = None;
    let shadowed = surface.shadows(ray, &mut t, &mut occluder, &SHADOW_EPSILONS, t_max);
    assert_eq!(shadowed, occluder.is_some(), "occluder must be written exactly on true");
    shadowed.then_some(t)
}

// region Sphere

#[test]
fn sphere_head_on_hit() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));

    let (t, record) = hit(&sphere, &ray).expect("head-on ray must hit");
    // distance-to-centre minus the radius
    assert_relative_eq!(t, 8., epsilon = TOLERANCE);
    assert_relative_eq!(record.pos_w, Point3::new(0., 0., 8.), epsilon = TOLERANCE);
    assert_relative_eq!(record.normal, Vector3::new(0., 0., -1.), epsilon = TOLERANCE);
    assert!(!record.reversed);
}

#[test]
fn sphere_aimed_away_misses() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    let ray = Ray::new((0., 0., 0.), (0., 0., -1.));
    assert!(hit(&sphere, &ray).is_none());
}

#[test]
fn sphere_hit_from_inside_is_reversed() {
    let sphere = SphereSurface::new((0., 0., 0.), 2.);
    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));

    let (t, record) = hit(&sphere, &ray).expect("ray from the centre must hit the shell");
    assert_relative_eq!(t, 2., epsilon = TOLERANCE);
    // the geometric normal still points outwards, with the flag marking the back-face hit
    assert_relative_eq!(record.normal, Vector3::new(0., 0., 1.), epsilon = TOLERANCE);
    assert!(record.reversed);
}

#[test]
fn sphere_accepts_non_unit_directions() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    // double-length direction halves the parametric distance
    let ray = Ray::new((0., 0., 0.), (0., 0., 2.));

    let (t, record) = hit(&sphere, &ray).expect("scaled direction must still hit");
    assert_relative_eq!(t, 4., epsilon = TOLERANCE);
    assert_relative_eq!(record.pos_w, Point3::new(0., 0., 8.), epsilon = TOLERANCE);
}

#[test]
fn sphere_origin_on_shell_rejected_as_noise() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    // origin exactly on the shell, aimed away: both roots are at or behind the origin
    let ray = Ray::new((0., 0., 8.), (0., 0., -1.));
    assert!(hit(&sphere, &ray).is_none());
}

#[test]
fn sphere_miss_leaves_record_untouched() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    let hit_ray = Ray::new((0., 0., 0.), (0., 0., 1.));
    let miss_ray = Ray::new((0., 0., 0.), (0., 0., -1.));

    let mut t = Number::INFINITY;
    let mut record = Intersection::empty();
    assert!(sphere.intersect(&hit_ray, &mut t, &mut record, &HIT_EPSILONS));

    let before = record;
    assert!(!sphere.intersect(&miss_ray, &mut t, &mut record, &HIT_EPSILONS));
    assert_eq!(record, before);
}

// endregion Sphere

// region Box

#[test]
fn box_face_hits_along_each_axis() {
    let axis_box = AxisBoxSurface::new((-1., -1., -1.), (1., 1., 1.));

    let probes: [(Point3, Vector3); 6] = [
        (Point3::new(5., 0., 0.), Vector3::new(-1., 0., 0.)),
        (Point3::new(-5., 0., 0.), Vector3::new(1., 0., 0.)),
        (Point3::new(0., 5., 0.), Vector3::new(0., -1., 0.)),
        (Point3::new(0., -5., 0.), Vector3::new(0., 1., 0.)),
        (Point3::new(0., 0., 5.), Vector3::new(0., 0., -1.)),
        (Point3::new(0., 0., -5.), Vector3::new(0., 0., 1.)),
    ];

    for (pos, dir) in probes {
        let ray = Ray::new(pos, dir);
        let (t, record) = hit(&axis_box, &ray).expect("axis-aligned probe must hit");
        assert_relative_eq!(t, 4., epsilon = TOLERANCE);
        // the face normal points back at the probe
        assert_relative_eq!(record.normal, -dir, epsilon = TOLERANCE);
        assert!(!record.reversed);
    }
}

#[test]
fn box_hit_from_inside_is_reversed() {
    let axis_box = AxisBoxSurface::new((-1., -1., -1.), (1., 1., 1.));
    let ray = Ray::new((0., 0., 0.), (1., 0., 0.));

    let (t, record) = hit(&axis_box, &ray).expect("ray from inside must hit the exit face");
    assert_relative_eq!(t, 1., epsilon = TOLERANCE);
    assert_relative_eq!(record.normal, Vector3::new(1., 0., 0.), epsilon = TOLERANCE);
    assert!(record.reversed);
}

#[test]
fn box_offset_ray_misses() {
    let axis_box = AxisBoxSurface::new((-1., -1., -1.), (1., 1., 1.));
    // parallel to the x axis but two units above the top face
    let ray = Ray::new((5., 2., 0.), (-1., 0., 0.));
    assert!(hit(&axis_box, &ray).is_none());
}

// endregion Box

// region Cylinder

#[test]
fn cylinder_body_hit() {
    let cylinder = CylinderSurface::new((0., 0., 0.), 1., 2.);
    let ray = Ray::new((-5., 0., 0.), (1., 0., 0.));

    let (t, record) = hit(&cylinder, &ray).expect("ray at mid-height must hit the body");
    assert_relative_eq!(t, 4., epsilon = TOLERANCE);
    assert_relative_eq!(record.normal, Vector3::new(-1., 0., 0.), epsilon = TOLERANCE);
    assert!(!record.reversed);
}

#[test]
fn cylinder_rejects_hits_past_the_rim() {
    let cylinder = CylinderSurface::new((0., 0., 0.), 1., 2.);
    // would hit the infinite cylinder, but at y=2 which is above the body
    let ray = Ray::new((-5., 2., 0.), (1., 0., 0.));
    assert!(hit(&cylinder, &ray).is_none());
}

#[test]
fn cylinder_is_open_ended() {
    let cylinder = CylinderSurface::new((0., 0., 0.), 1., 2.);
    // straight down the axis: no caps, so nothing to hit
    let ray = Ray::new((0., 5., 0.), (0., -1., 0.));
    assert!(hit(&cylinder, &ray).is_none());
}

#[test]
fn cylinder_inside_hit_is_reversed() {
    let cylinder = CylinderSurface::new((0., 0., 0.), 1., 2.);
    let ray = Ray::new((0., 0., 0.), (1., 0., 0.));

    let (t, record) = hit(&cylinder, &ray).expect("ray from the axis must hit the body");
    assert_relative_eq!(t, 1., epsilon = TOLERANCE);
    assert!(record.reversed);
}

// endregion Cylinder

// region Planar surfaces

/// The `z = 0` plane, with `u`/`v` along `x`/`y` and the normal along `+z`
fn xy_plane() -> Planar { Planar::new((0., 0., 0.), (1., 0., 0.), (0., 1., 0.)) }

#[test]
fn plane_perpendicular_hit() {
    let plane = PlaneSurface::new(xy_plane());
    let ray = Ray::new((0.5, 7., 5.), (0., 0., -1.));

    let (t, record) = hit(&plane, &ray).expect("perpendicular ray must hit");
    assert_relative_eq!(t, 5., epsilon = TOLERANCE);
    assert_relative_eq!(record.normal, Vector3::new(0., 0., 1.), epsilon = TOLERANCE);
    assert!(!record.reversed);
}

#[test]
fn plane_parallel_ray_misses() {
    let plane = PlaneSurface::new(xy_plane());
    let ray = Ray::new((0., 0., 5.), (1., 0., 0.));
    assert!(hit(&plane, &ray).is_none());
}

#[test]
fn plane_back_face_hit_is_reversed() {
    let plane = PlaneSurface::new(xy_plane());
    let ray = Ray::new((0., 0., -5.), (0., 0., 1.));

    let (_, record) = hit(&plane, &ray).expect("ray from behind must still hit");
    assert!(record.reversed);
    // the stored normal stays the plane's fixed normal
    assert_relative_eq!(record.normal, Vector3::new(0., 0., 1.), epsilon = TOLERANCE);
}

#[test]
fn disk_respects_its_rim() {
    let disk = DiskSurface::new((0., 0., 0.), (0., 0., 1.), 1.);

    let inside = Ray::new((0.5, 0., 5.), (0., 0., -1.));
    let (t, _) = hit(&disk, &inside).expect("hit half a radius from the centre");
    assert_relative_eq!(t, 5., epsilon = TOLERANCE);

    let outside = Ray::new((1.5, 0., 5.), (0., 0., -1.));
    assert!(hit(&disk, &outside).is_none());
}

#[test]
fn rectangle_respects_its_edges() {
    // corner at the origin, edges two units along x and y
    let rect = RectangleSurface::new(Planar::new((0., 0., 0.), (2., 0., 0.), (0., 2., 0.)));

    let inside = Ray::new((1., 1., 5.), (0., 0., -1.));
    assert!(hit(&rect, &inside).is_some());

    let past_u = Ray::new((2.5, 1., 5.), (0., 0., -1.));
    assert!(hit(&rect, &past_u).is_none());

    let before_v = Ray::new((1., -0.5, 5.), (0., 0., -1.));
    assert!(hit(&rect, &before_v).is_none());
}

#[test]
fn triangle_respects_its_diagonal() {
    // right triangle with the corner at the origin and legs along x and y
    let triangle = TriangleSurface::new(Planar::new((0., 0., 0.), (2., 0., 0.), (0., 2., 0.)));

    let inside = Ray::new((0.5, 0.5, 5.), (0., 0., -1.));
    assert!(hit(&triangle, &inside).is_some());

    // inside the parallelogram, but past the diagonal
    let past_diagonal = Ray::new((1.5, 1.5, 5.), (0., 0., -1.));
    assert!(hit(&triangle, &past_diagonal).is_none());

    let negative_side = Ray::new((-0.5, 0.5, 5.), (0., 0., -1.));
    assert!(hit(&triangle, &negative_side).is_none());
}

// endregion Planar surfaces

// region Torus

#[test]
fn torus_transit_hits_the_near_rim() {
    let torus = TorusSurface::new((0., 0., 0.), 10., 3.);
    // through the ring plane: enters the tube at x = -13
    let ray = Ray::new((-20., 0., 0.), (1., 0., 0.));

    let (t, record) = hit(&torus, &ray).expect("transit ray must hit the outer rim");
    assert_relative_eq!(t, 7., epsilon = 1e-6);
    assert_relative_eq!(record.pos_w, Point3::new(-13., 0., 0.), epsilon = 1e-6);
    assert_relative_eq!(record.normal, Vector3::new(-1., 0., 0.), epsilon = 1e-6);
    assert!(!record.reversed);
}

#[test]
fn torus_ray_above_the_tube_misses() {
    let torus = TorusSurface::new((0., 0., 0.), 10., 3.);
    let ray = Ray::new((-20., 10., 0.), (1., 0., 0.));
    assert!(hit(&torus, &ray).is_none());
}

#[test]
fn torus_ray_down_the_axis_misses() {
    let torus = TorusSurface::new((0., 0., 0.), 10., 3.);
    // straight through the hole
    let ray = Ray::new((0., 10., 0.), (0., -1., 0.));
    assert!(hit(&torus, &ray).is_none());
}

#[test]
fn torus_tube_top_normal_points_up() {
    let torus = TorusSurface::new((0., 0., 0.), 10., 3.);
    // straight down onto the top of the tube at x = 10
    let ray = Ray::new((10., 10., 0.), (0., -1., 0.));

    let (t, record) = hit(&torus, &ray).expect("ray onto the tube top must hit");
    assert_relative_eq!(t, 7., epsilon = 1e-6);
    assert_relative_eq!(record.normal, Vector3::new(0., 1., 0.), epsilon = 1e-6);
}

// endregion Torus

// region Compound

#[test]
fn compound_reports_the_nearest_child() {
    let near = SphereSurface::new((0., 0., 5.), 1.);
    let far = SphereSurface::new((0., 0., 10.), 2.);
    // deliberately ordered far-first, so "first hit wins" would give the wrong answer
    let children: [SurfaceInstance; 2] = [far.into(), near.into()];
    let compound = CompoundSurface::new(children);

    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));
    let (t, record) = hit(&compound, &ray).expect("both children lie on the ray");
    assert_relative_eq!(t, 4., epsilon = TOLERANCE);

    // the output record is exactly the winning child's own record
    let (near_t, near_record) = hit(&near, &ray).unwrap();
    assert_relative_eq!(t, near_t, epsilon = TOLERANCE);
    assert_eq!(record, near_record);
}

#[test]
fn compound_misses_when_all_children_miss() {
    let children: [SurfaceInstance; 2] = [
        SphereSurface::new((0., 0., 5.), 1.).into(),
        SphereSurface::new((0., 0., 10.), 2.).into(),
    ];
    let compound = CompoundSurface::new(children);

    let ray = Ray::new((0., 0., 0.), (0., 1., 0.));
    assert!(hit(&compound, &ray).is_none());
}

#[test]
fn compound_shadows_on_any_child() {
    let near = SphereSurface::new((0., 0., 5.), 1.);
    let far = SphereSurface::new((0., 0., 10.), 2.);
    let children: [SurfaceInstance; 2] = [far.into(), near.into()];
    let compound = CompoundSurface::new(children);

    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));
    assert!(shadow(&compound, &ray, 20.).is_some());
    // no child occludes before t = 3
    assert!(shadow(&compound, &ray, 3.).is_none());
}

#[test]
fn nested_compounds_resolve_through_the_scratch_pool() {
    let inner_children: [SurfaceInstance; 2] = [
        SphereSurface::new((0., 0., 10.), 2.).into(),
        SphereSurface::new((0., 0., 20.), 2.).into(),
    ];
    let inner = CompoundSurface::new(inner_children);
    let outer_children: [SurfaceInstance; 2] = [inner.into(), SphereSurface::new((0., 0., 5.), 1.).into()];
    let outer = CompoundSurface::new(outer_children);

    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));
    let (t, _) = hit(&outer, &ray).expect("nested compound must still find the nearest hit");
    assert_relative_eq!(t, 4., epsilon = TOLERANCE);
}

// endregion Compound

// region Shadows

#[test]
fn shadow_cutoff_at_light_distance() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));
    // the hit sits at exactly t = 8

    assert_eq!(shadow(&sphere, &ray, 8.5), Some(8.));
    // an occluder at or past the light doesn't cast
    assert!(shadow(&sphere, &ray, 8.).is_none());
    assert!(shadow(&sphere, &ray, 7.).is_none());
}

#[test]
fn shadow_reports_the_occluding_token() {
    let sphere = SphereSurface::new((0., 0., 10.), 2.);
    let ray = Ray::new((0., 0., 0.), (0., 0., 1.));

    let mut t = Number::INFINITY;
    let mut occluder = None;
    assert!(sphere.shadows(&ray, &mut t, &mut occluder, &SHADOW_EPSILONS, 20.));
    assert_eq!(occluder, Some(sphere.token()));
}

// endregion Shadows
