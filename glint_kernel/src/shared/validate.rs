//! Debug-only validation helpers, called by surfaces before they hand back a successful hit.
//! All of these compile to nothing in release builds.

use crate::core::types::{Number, Point3, Vector3};
use crate::shared::intersect::Intersection;
use crate::shared::ray::Ray;
use approx::*;
use std::borrow::Borrow;

macro_rules! debug_assert_only {
    () => {
        if cfg!(not(debug_assertions)) {
            return;
        }
    };
}

pub const EPSILON: Number = 1e-6;
pub const RELATIVE: Number = 1e-3;

#[inline(always)]
#[track_caller]
pub fn number(val: impl Borrow<Number>) {
    debug_assert_only!();

    let val = val.borrow();
    assert!(!val.is_nan(), "should not be nan; val: {val}");
}

#[inline(always)]
#[track_caller]
pub fn normal3(n: impl Borrow<Vector3>) {
    debug_assert_only!();
    let n = n.borrow();
    vector3(n);
    assert!(
        n.is_normalized(),
        "should be normalised; vec: {n:?}, len: {:?}",
        n.length()
    );
}

#[inline(always)]
#[track_caller]
pub fn point3(v: impl Borrow<Point3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn vector3(v: impl Borrow<Vector3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn ray(r: impl Borrow<Ray>) {
    debug_assert_only!();
    let r = r.borrow();
    vector3(r.dir());
    assert!(
        r.dir().length_squared() > 0.,
        "ray direction should be non-zero; ray: {r:?}"
    );
}

/// Asserts that an intersection record is consistent with the ray and distance that produced it
#[inline(always)]
#[track_caller]
pub fn intersection(ray: impl Borrow<Ray>, intersect: impl Borrow<Intersection>, dist: impl Borrow<Number>) {
    debug_assert_only!();

    let intersect = intersect.borrow();
    let ray = ray.borrow();
    let dist = *dist.borrow();

    number(dist);
    point3(intersect.pos_w);
    point3(intersect.pos_l);

    assert!(
        Point3::relative_eq(&intersect.pos_w, &ray.at(dist), EPSILON, RELATIVE),
        "intersect position doesn't match ray at intersection dist; intersect_pos: {i_pos:?}, dist: {dist}, ray: {ray:?}, ray_pos: {r_pos:?}",
        i_pos = intersect.pos_w,
        r_pos = ray.at(dist)
    );

    normal3(intersect.normal);
}
