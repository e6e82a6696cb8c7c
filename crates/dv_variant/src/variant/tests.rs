use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use dv_utils::Callable;

use crate::info::{Category, QualifiedType, Qualifier};
use crate::{Bindable, DescriptorBuilder, Variant, VariantError};

#[derive(Clone)]
struct Node {
    id: u32,
}

impl Bindable for Node {
    const CATEGORY: Category = Category::Aggregate;
}

// -----------------------------------------------------------------------------
// End to end

#[test]
fn stores_a_copy() {
    let mut x = 12;
    let v = Variant::new(x);
    x = 13;
    assert_eq!(x, 13);
    assert_eq!(v.get::<i32>().unwrap(), 12);
}

#[test]
fn empty_array() {
    let v = Variant::new(Vec::<i32>::new());
    assert!(v.has_value());
    assert!(!v.is_truthy());
    assert_eq!(v.length().unwrap(), 0);
}

#[test]
fn call_a_closure() {
    let twice = Variant::from_fn(|x: i32| x * 2);
    assert_eq!(twice.call((21,)).unwrap().get::<i32>().unwrap(), 42);
    assert_eq!(twice.category(), Some(Category::Callable));
}

#[test]
fn probe_a_map() {
    let map = Variant::new(BTreeMap::from([(String::from("a"), 11_i32)]));
    assert_eq!(map.probe("a").unwrap().get::<i32>().unwrap(), 11);
    assert!(!map.probe("b").unwrap().has_value());
    assert!(matches!(map.index(("b",)), Err(VariantError::KeyNotFound { .. })));
}

#[test]
fn null_reference() {
    let v = Variant::new(None::<Arc<Node>>);
    assert!(v.has_value());
    assert!(!v.is_truthy());
    assert!(v.get::<Option<Arc<Node>>>().unwrap().is_none());
    #[cfg(feature = "members")]
    assert_eq!(
        v.lookup_member("id").unwrap_err(),
        VariantError::NullReference {
            type_name: core::any::type_name::<Option<Arc<Node>>>(),
        },
    );
}

// -----------------------------------------------------------------------------
// Truthiness

#[test]
fn truthiness_by_category() {
    assert!(!Variant::empty().is_truthy());
    assert!(Variant::new(Node { id: 0 }).is_truthy());
    assert!(Variant::new(Arc::new(Node { id: 0 })).is_truthy());
    assert!(!Variant::new(false).is_truthy());
    assert!(!Variant::new(0_u64).is_truthy());
    assert!(!Variant::new(0.0_f64).is_truthy());
    assert!(!Variant::new('\0').is_truthy());
    assert!(Variant::new(-1_i8).is_truthy());
    assert!(!Variant::new(String::new()).is_truthy());
    assert!(Variant::new("x").is_truthy());
    assert!(!Variant::new(BTreeMap::<String, i32>::new()).is_truthy());
    assert!(!Variant::new(Callable::<(i32,), i32>::Unset).is_truthy());
    assert!(Variant::new(Callable::<(i32,), i32>::Function(|(x,)| x)).is_truthy());
    assert!(!Variant::new(core::ptr::null::<u8>()).is_truthy());
}

// -----------------------------------------------------------------------------
// Conversion

#[test]
fn conversion_targets_are_extractable() {
    let v = Variant::new(7_u8);
    for target in v.descriptor().unwrap().conversion_targets(Qualifier::Mutable) {
        assert!(v.converts_to(&target).unwrap(), "{target}");
    }
    assert_eq!(v.get::<char>().unwrap(), '\u{7}');
    assert_eq!(v.get::<f32>().unwrap(), 7.0);
    assert!(!v.converts_to(&QualifiedType::of::<i8>()).unwrap());
    assert!(v.get::<i8>().is_err());
}

#[test]
fn aggregates_only_convert_to_themselves() {
    let v = Variant::new(Node { id: 4 });
    assert_eq!(v.get::<Node>().unwrap().id, 4);
    assert_eq!(v.descriptor().unwrap().conversion_targets(Qualifier::Mutable).len(), 3);
    assert!(matches!(v.get::<u32>(), Err(VariantError::TypeMismatch { .. })));
}

#[test]
fn requalify_only_adds() {
    let mut v = Variant::new(String::from("s"));
    v.requalify(Qualifier::Immutable).unwrap();
    assert_eq!(v.qualifier(), Some(Qualifier::Immutable));
    assert!(v.peek::<String>().is_none());
    assert_eq!(v.get_as::<String>(Qualifier::SharedConst).unwrap(), "s");
    assert!(v.requalify(Qualifier::Mutable).is_err());
    assert!(Variant::empty().requalify(Qualifier::Const).is_err());
}

// -----------------------------------------------------------------------------
// Declared operations

#[derive(Clone)]
struct Grid {
    width: usize,
    cells: Vec<i64>,
}

impl Bindable for Grid {
    const CATEGORY: Category = Category::Aggregate;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .index_with(|g: &Grid, row: usize, col: usize| g.cells[row * g.width + col])
            .call_with(|g: &Grid, scale: i64| g.cells.iter().map(|c| c * scale).sum::<i64>())
    }
}

fn grid() -> Variant {
    Variant::new(Grid {
        width: 2,
        cells: vec![1, 2, 3, 4],
    })
}

#[test]
fn aggregate_index_with_typed_params() {
    let grid = grid();
    assert_eq!(grid.index((1_usize, 0_usize)).unwrap().get::<i64>().unwrap(), 3);
    assert_eq!(grid.index((0_u8, 1_u8)).unwrap().get::<i64>().unwrap(), 2);
    assert_eq!(
        grid.index((1_usize,)).unwrap_err(),
        VariantError::ArgumentCount { expected: 2, variadic: false, found: 1 },
    );
    assert!(matches!(grid.index(("a", 0_usize)), Err(VariantError::TypeMismatch { .. })));
    assert!(grid.iterate_over(|_, _| core::ops::ControlFlow::Continue(())).is_err());
}

#[test]
fn aggregate_call_with_typed_params() {
    let grid = grid();
    assert!(grid.descriptor().unwrap().is_callable());
    assert_eq!(grid.call((2_i64,)).unwrap().get::<i64>().unwrap(), 20);
    assert_eq!(grid.call((1_i32,)).unwrap().get::<i64>().unwrap(), 10);
    assert_eq!(
        grid.call(()).unwrap_err(),
        VariantError::ArgumentCount { expected: 1, variadic: false, found: 0 },
    );
    assert_eq!(
        Variant::new(Node { id: 1 }).call(()).unwrap_err(),
        VariantError::NotCallable { type_name: core::any::type_name::<Node>() },
    );
}

// -----------------------------------------------------------------------------
// Members

#[cfg(feature = "members")]
#[derive(Clone)]
struct Bag {
    items: Vec<u8>,
}

#[cfg(feature = "members")]
impl Bindable for Bag {
    const CATEGORY: Category = Category::Aggregate;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder.members(crate::members::Members::new().method("len", |b: &Bag| b.items.len()))
    }
}

#[cfg(feature = "members")]
#[derive(Clone)]
struct Span {
    length: usize,
}

#[cfg(feature = "members")]
impl Bindable for Span {
    const CATEGORY: Category = Category::Aggregate;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder.members(crate::members::Members::new().field("length", |s: &Span| &s.length))
    }
}

#[cfg(feature = "members")]
#[test]
fn aggregate_length_from_members() {
    assert_eq!(Variant::new(Bag { items: vec![1, 2, 3] }).length().unwrap(), 3);
    assert_eq!(Variant::new(Span { length: 9 }).length().unwrap(), 9);
    assert!(matches!(
        Variant::new(Node { id: 1 }).length(),
        Err(VariantError::NotSupported { operation: "length", .. })
    ));
}

#[cfg(feature = "members")]
#[test]
fn members_keep_the_qualifier() {
    let span = Variant::qualified(Span { length: 3 }, Qualifier::Immutable);
    let length = span.lookup_member("length").unwrap();
    assert_eq!(length.qualifier(), Some(Qualifier::Immutable));
    assert!(matches!(length.get::<usize>(), Err(VariantError::TypeMismatch { .. })));
    assert_eq!(length.get_as::<usize>(Qualifier::Immutable).unwrap(), 3);
    assert_eq!(span.length().unwrap(), 3);

    let bag = Variant::qualified(Bag { items: vec![1, 2] }, Qualifier::Const);
    let len = bag.lookup_member("len").unwrap();
    assert_eq!(len.qualifier(), Some(Qualifier::Const));
    let method = len.get_ref::<crate::members::BoundMethod>().unwrap();
    assert_eq!(method.receiver().qualifier(), Some(Qualifier::Const));
    assert_eq!(len.call(()).unwrap().get::<usize>().unwrap(), 2);
    assert_eq!(bag.length().unwrap(), 2);
}

#[cfg(feature = "members")]
#[test]
fn members_need_an_aggregate_or_reference() {
    assert_eq!(
        Variant::new(1_i32).lookup_member("x").unwrap_err(),
        VariantError::NotSupported {
            operation: "lookup_member",
            type_name: "i32",
        },
    );
    assert_eq!(Variant::empty().lookup_member("x").unwrap_err(), VariantError::Uninitialized);
}

// -----------------------------------------------------------------------------
// Rendering

#[test]
fn display_and_debug() {
    assert_eq!(Variant::new(3_i32).to_string(), "3");
    assert_eq!(format!("{:?}", Variant::new(3_i32)), "Variant(i32: 3)");
    assert_eq!(Variant::new(String::from("hi")).to_string(), "hi");
    assert_eq!(
        format!("{:?}", Variant::new(String::from("hi"))),
        "Variant(alloc::string::String: \"hi\")",
    );
    let names = Variant::new(vec![String::from("a"), String::from("b")]);
    assert_eq!(names.to_string(), "[\"a\", \"b\"]");
    assert_eq!(Variant::new(Node { id: 1 }).to_string(), "Node");
    assert_eq!(Variant::empty().to_string(), "<uninitialized>");
    assert_eq!(format!("{:?}", Variant::empty()), "Variant(<uninitialized>)");
}

#[test]
fn clone_is_deep_for_values() {
    let mut a = Variant::new(vec![1_i32]);
    let b = a.clone();
    a.peek_mut::<Vec<i32>>().unwrap().push(2);
    assert_eq!(a.length().unwrap(), 2);
    assert_eq!(b.length().unwrap(), 1);

    let empty = Variant::default();
    assert!(!empty.clone().has_value());
}
