use core::any::Any;

use crate::descriptor::DescriptorBuilder;
use crate::info::Category;

/// A type a [`Variant`](crate::Variant) can hold.
///
/// The implementation fixes the [`Category`] and declares the type's
/// operations on a [`DescriptorBuilder`]. [`describe`](Bindable::describe)
/// runs once per type, the first time a value of the type is wrapped.
///
/// # Examples
///
/// An aggregate with members:
///
/// ```
/// use dv_variant::{Bindable, Category, DescriptorBuilder, Variant};
/// use dv_variant::members::Members;
///
/// #[derive(Clone)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Bindable for Point {
///     const CATEGORY: Category = Category::Aggregate;
///
///     fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
///         builder.members(
///             Members::new()
///                 .field("x", |p: &Point| &p.x)
///                 .field("y", |p: &Point| &p.y)
///                 .method("norm1", |p: &Point| p.x.abs() + p.y.abs()),
///         )
///     }
/// }
///
/// let p = Variant::new(Point { x: 3, y: -4 });
/// assert_eq!(p.lookup_member("y").unwrap().get::<i32>().unwrap(), -4);
/// assert_eq!(p.lookup_member("norm1").unwrap().call(()).unwrap().get::<i32>().unwrap(), 7);
/// ```
pub trait Bindable: Any + Clone {
    const CATEGORY: Category;

    /// Declares the operations of this type.
    ///
    /// The default declares nothing beyond the category defaults.
    #[inline(always)]
    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
    }
}
