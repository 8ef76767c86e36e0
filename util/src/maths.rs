//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// The z component of the cross product of two 2D vectors, `a x b`.
///
/// Positive if `b` is anticlockwise of `a`.
pub fn cross_2d<T>(a: [T; 2], b: [T; 2]) -> T
where
    T: Float,
{
    a[0] * b[1] - a[1] * b[0]
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `self` is much smaller than `rhs.abs()` in
/// magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle in degrees into the range (-180, 180].
pub fn wrap_deg<T>(angle_deg: T) -> T
where
    T: Float,
{
    let half_turn = T::from(180.0).unwrap_or_else(T::zero);
    let turn = half_turn + half_turn;

    // Map into [0, 360) then shift the upper half down
    let wrapped = rem_euclid(angle_deg, turn);
    if wrapped > half_turn {
        wrapped - turn
    } else {
        wrapped
    }
}

/// Get the signed angular distance `a - b` in degrees, wrapped into (-180, 180].
pub fn get_ang_dist_deg<T>(a: T, b: T) -> T
where
    T: Float,
{
    wrap_deg(a - b)
}
