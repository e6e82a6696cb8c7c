//! [`Bindable`](crate::Bindable) implementations for core, alloc and std types.
//!
//! - Scalars: `bool` `char` `i8 - i128` `isize` `u8 - u128` `usize` `f32` `f64`
//! - Arrays: `String` `&'static str` `Vec<T>` `VecDeque<T>` `[T; N]`
//! - Maps: `HashMap<K, V, S>` (std and hashbrown) `BTreeMap<K, V>`
//! - References: `Arc<T>` `Rc<T>` `Option<Arc<T>>` `Option<Rc<T>>`
//! - Pointers: `*const T` `*mut T`
//! - Callables: `fn(P..) -> R` `Function` `Callable<Args, Ret>`

mod callable;
mod map;
mod pointer;
mod reference;
mod scalar;
mod sequence;
mod text;
mod utils;
