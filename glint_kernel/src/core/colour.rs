use crate::core::types::Channel;
use auto_ops::{impl_op_ex, impl_op_ex_commutative};
use std::array;
use std::ops::{Add, Deref, DerefMut, Div, Index, IndexMut, Mul, Sub};

/// An RGB colour value.
///
/// The kernel itself never shades anything; this exists so the scratch cache can hand out
/// reusable colour slots to the layers above.
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq)]
pub struct Colour3(pub [Channel; 3]);

impl Colour3 {
    /// How many channels there are. RGB is 3 channels.
    pub const CHANNEL_COUNT: usize = 3;

    pub const BLACK: Self = Self::new([0.; 3]);
    pub const WHITE: Self = Self::new([1.; 3]);

    pub const fn new(val: [Channel; 3]) -> Self { Self(val) }
}

// region To/From impls

impl From<[Channel; 3]> for Colour3 {
    fn from(val: [Channel; 3]) -> Self { Self::new(val) }
}
impl From<(Channel, Channel, Channel)> for Colour3 {
    fn from((r, g, b): (Channel, Channel, Channel)) -> Self { Self::new([r, g, b]) }
}
impl From<Colour3> for [Channel; 3] {
    fn from(Colour3(val): Colour3) -> Self { val }
}

// endregion To/From impls

// region Iterating/Indexing

impl IntoIterator for Colour3 {
    type Item = Channel;
    type IntoIter = array::IntoIter<Channel, 3>;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl Deref for Colour3 {
    type Target = [Channel; 3];

    fn deref(&self) -> &Self::Target { &self.0 }
}
impl DerefMut for Colour3 {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl Index<usize> for Colour3 {
    type Output = Channel;

    fn index(&self, index: usize) -> &Self::Output { &self.0[index] }
}
impl IndexMut<usize> for Colour3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.0[index] }
}

// endregion Iterating/Indexing

// region Operators

impl Colour3 {
    /// Maps each element of the colour with the given closure, and returns the new colour
    #[inline]
    pub fn map(&self, op: impl Fn(Channel) -> Channel) -> Self { self.0.map(op).into() }
    /// Maps each element of the colour with the given closure, with the element of another, and returns the new colour.
    #[inline]
    pub fn map2(&self, other: &Self, mut op: impl FnMut(Channel, Channel) -> Channel) -> Self {
        array::from_fn(|i| op(self[i], other[i])).into()
    }
}

impl_op_ex!(+ |a: &Colour3, b: &Colour3| -> Colour3 { a.map2(b, Channel::add) });
impl_op_ex!(-|a: &Colour3, b: &Colour3| -> Colour3 { a.map2(b, Channel::sub) });
impl_op_ex!(*|a: &Colour3, b: &Colour3| -> Colour3 { a.map2(b, Channel::mul) });
impl_op_ex!(/ |a: &Colour3, b: &Colour3| -> Colour3 { a.map2(b, Channel::div) });

impl_op_ex_commutative!(*|a: &Colour3, b: &Channel| -> Colour3 { a.map(|c| c * b) });
impl_op_ex!(/ |a: &Colour3, b: &Channel| -> Colour3 { a.map(|c| c / b) });

impl_op_ex!(+= |a: &mut Colour3, b: &Colour3| { *a = *a + b });
impl_op_ex!(-= |a: &mut Colour3, b: &Colour3| { *a = *a - b });
impl_op_ex!(*= |a: &mut Colour3, b: &Colour3| { *a = *a * b });
impl_op_ex!(*= |a: &mut Colour3, b: &Channel| { *a = *a * b });

// endregion Operators
