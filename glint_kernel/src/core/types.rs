use crate::core::colour::Colour3;

/// Numeric type used for colour calculations in the kernel
pub type Channel = f32;
pub type Colour = Colour3;

/// Numeric type used for most calculations in the kernel
pub type Number = f64;
pub type Vector2 = glamour::Vector2<Number>;
pub type Vector3 = glamour::Vector3<Number>;
pub type Point2 = glamour::Point2<Number>;
pub type Point3 = glamour::Point3<Number>;
pub type Size3 = glamour::Size3<Number>;
pub type Matrix4 = glamour::Matrix4<Number>;
pub type Quaternion = glam::DQuat;
/// Numeric identifier used to uniquely mark entities, used in surface tokens
pub type IdToken = u64;
