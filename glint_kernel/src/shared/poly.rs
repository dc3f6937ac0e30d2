//! Closed-form real-root extraction for quadratic, cubic and quartic polynomials.
//!
//! The torus surface needs the quartic; the quartic needs the other two. All three are
//! usable on their own.
//!
//! "Close to zero" is decided by a caller-supplied `eps`, not machine epsilon — it is a
//! numerical-robustness knob, and callers should pick a value consistent with the scale of
//! their coefficients.

use crate::core::types::Number;
use smallvec::{smallvec, SmallVec};
use std::f64::consts::PI;

/// Real roots of a polynomial, unordered. Quartics have at most four, so this never
/// spills to the heap.
pub type Roots = SmallVec<[Number; 4]>;

/// Epsilon-aware test for "close enough to zero to call it zero"
#[inline]
pub fn is_zero(x: Number, eps: Number) -> bool { x.abs() <= eps }

/// Solves `a·x² + b·x + c = 0` over the reals.
///
/// Returns no roots when the (normalised) discriminant is below `-eps`, one root when it
/// is within `eps` of zero, and two roots otherwise.
///
/// # Preconditions
/// `a` must be non-zero; passing `a == 0` divides by zero.
pub fn quadratic(a: Number, b: Number, c: Number, eps: Number) -> Roots {
    // normal form: x^2 + 2px + q = 0
    let p = b / (2. * a);
    let q = c / a;

    let d = (p * p) - q;

    if is_zero(d, eps) {
        smallvec![-p]
    } else if d < 0. {
        SmallVec::new()
    } else {
        let sqrt_d = d.sqrt();
        smallvec![sqrt_d - p, -sqrt_d - p]
    }
}

/// Solves `a·x³ + b·x² + c·x + d = 0` over the reals.
///
/// Classifies the discriminant of the depressed cubic with the epsilon test: zero gives
/// one or two roots (the multiple-root cases), negative gives three real roots via the
/// trigonometric branch, positive gives the single Cardano root. Always returns at least
/// one root.
///
/// # Preconditions
/// `a` must be non-zero; passing `a == 0` divides by zero.
pub fn cubic(a: Number, b: Number, c: Number, d: Number, eps: Number) -> Roots {
    // normal form: x^3 + Ax^2 + Bx + C = 0
    let a_n = b / a;
    let b_n = c / a;
    let c_n = d / a;

    // substitute x = y - A/3 to eliminate the quadric term: y^3 + 3py + 2q = 0
    let sq_a = a_n * a_n;
    let p = ((-sq_a / 3.) + b_n) / 3.;
    let q = ((2. / 27. * a_n * sq_a) - (a_n * b_n / 3.) + c_n) / 2.;

    let cb_p = p * p * p;
    let disc = (q * q) + cb_p;

    let mut roots: Roots = if is_zero(disc, eps) {
        if is_zero(q, eps) {
            // one triple solution
            smallvec![0.]
        } else {
            // one single and one double solution
            let u = (-q).cbrt();
            smallvec![2. * u, -u]
        }
    } else if disc < 0. {
        // casus irreducibilis: three real solutions
        let phi = (-q / (-cb_p).sqrt()).acos() / 3.;
        let t = 2. * (-p).sqrt();
        smallvec![
            t * phi.cos(),
            -t * (phi + PI / 3.).cos(),
            -t * (phi - PI / 3.).cos(),
        ]
    } else {
        // one real solution, via Cardano
        let sqrt_d = disc.sqrt();
        let u = (sqrt_d - q).cbrt();
        let v = -(sqrt_d + q).cbrt();
        smallvec![u + v]
    };

    // resubstitute
    let sub = a_n / 3.;
    for root in &mut roots {
        *root -= sub;
    }
    roots
}

/// Solves `a·x⁴ + b·x³ + c·x² + d·x + e = 0` over the reals, via Ferrari's method.
///
/// The depressed quartic's resolvent cubic is solved by [cubic], and its roots combine
/// into two quadratics solved by [quadratic]. Returns no roots when the resolvent leaves
/// a negative value (beyond `eps`) under either needed square root.
///
/// # Preconditions
/// `a` must be non-zero; passing `a == 0` divides by zero.
pub fn quartic(a: Number, b: Number, c: Number, d: Number, e: Number, eps: Number) -> Roots {
    // normal form: x^4 + Ax^3 + Bx^2 + Cx + D = 0
    let a_n = b / a;
    let b_n = c / a;
    let c_n = d / a;
    let d_n = e / a;

    // substitute x = y - A/4 to eliminate the cubic term: y^4 + py^2 + qy + r = 0
    let sq_a = a_n * a_n;
    let p = (-3. / 8. * sq_a) + b_n;
    let q = (sq_a * a_n / 8.) - (a_n * b_n / 2.) + c_n;
    let r = (-3. / 256. * sq_a * sq_a) + (sq_a * b_n / 16.) - (a_n * c_n / 4.) + d_n;

    let mut roots: Roots;

    if is_zero(r, eps) {
        // no absolute term: y(y^3 + py + q) = 0
        roots = cubic(1., 0., p, q, eps);
        roots.push(0.);
    } else {
        // solve the resolvent cubic, take one root, and combine into two quadratics
        let resolvent = cubic(1., -p / 2., -r, (r * p / 2.) - (q * q / 8.), eps);
        let z = resolvent[0];

        let mut u = (z * z) - r;
        let mut v = (2. * z) - p;

        if is_zero(u, eps) {
            u = 0.;
        } else if u > 0. {
            u = u.sqrt();
        } else {
            return SmallVec::new();
        }

        if is_zero(v, eps) {
            v = 0.;
        } else if v > 0. {
            v = v.sqrt();
        } else {
            return SmallVec::new();
        }

        roots = quadratic(1., if q < 0. { -v } else { v }, z - u, eps);
        roots.extend(quadratic(1., if q < 0. { v } else { -v }, z + u, eps));
    }

    // resubstitute
    let sub = a_n / 4.;
    for root in &mut roots {
        *root -= sub;
    }
    roots
}
