use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;

use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::{Bindable, descriptor_of};

#[cfg(feature = "members")]
use crate::VariantError;
#[cfg(feature = "members")]
use core::any::type_name;

// Shared handles render, compare and look members up through the pointee.
// Pointees without equality compare by identity.

fn render_pointee<T: Bindable>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    descriptor_of::<T>().map_err(|_| fmt::Error)?.render(value, f)
}

fn literal_pointee<T: Bindable>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    descriptor_of::<T>().map_err(|_| fmt::Error)?.render_literal(value, f)
}

fn pointee_eq<T: Bindable>(a: &T, b: &T) -> Option<bool> {
    match descriptor_of::<T>().ok()?.equals(a, b) {
        Some(equal) => Some(equal),
        None => Some(core::ptr::eq(a, b)),
    }
}

fn pointee_cmp<T: Bindable>(a: &T, b: &T) -> Option<Ordering> {
    descriptor_of::<T>().ok()?.compare(a, b)
}

macro_rules! impl_shared {
    ($ptr:ident) => {
        impl<T: Bindable> Bindable for $ptr<T> {
            const CATEGORY: Category = Category::Reference;

            fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
                let builder = builder
                    .truthy(|_| true)
                    .render(|ptr, f| render_pointee::<T>(ptr, f))
                    .literal(|ptr, f| literal_pointee::<T>(ptr, f))
                    .equality(|a, b| pointee_eq::<T>(a, b))
                    .ordering(|a, b| pointee_cmp::<T>(a, b))
                    .convert_with(|ptr: &$ptr<T>| Some(ptr.clone()));

                #[cfg(feature = "members")]
                let builder = builder.lookup(|ptr, qualifier, name| {
                    descriptor_of::<T>()?.lookup_member(&**ptr, qualifier, name)
                });

                builder
            }
        }

        impl<T: Bindable> Bindable for Option<$ptr<T>> {
            const CATEGORY: Category = Category::Reference;

            fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
                let builder = builder
                    .truthy(|ptr| ptr.is_some())
                    .render(|ptr, f| match ptr {
                        Some(ptr) => render_pointee::<T>(ptr, f),
                        None => f.write_str("null"),
                    })
                    .literal(|ptr, f| match ptr {
                        Some(ptr) => literal_pointee::<T>(ptr, f),
                        None => f.write_str("null"),
                    })
                    .equality(|a, b| match (a, b) {
                        (Some(a), Some(b)) => pointee_eq::<T>(a, b),
                        (a, b) => Some(a.is_none() && b.is_none()),
                    })
                    .ordering(|a, b| match (a, b) {
                        (Some(a), Some(b)) => pointee_cmp::<T>(a, b),
                        (a, b) => Some(a.is_some().cmp(&b.is_some())),
                    });

                #[cfg(feature = "members")]
                let builder = builder.lookup(|ptr, qualifier, name| match ptr {
                    Some(ptr) => descriptor_of::<T>()?.lookup_member(&**ptr, qualifier, name),
                    None => Err(VariantError::NullReference {
                        type_name: type_name::<Self>(),
                    }),
                });

                builder
            }
        }
    };
}

impl_shared!(Arc);
impl_shared!(Rc);

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;

    use crate::info::Category;
    use crate::{Bindable, Variant};

    #[derive(Clone)]
    struct Node {
        label: String,
    }

    impl Bindable for Node {
        const CATEGORY: Category = Category::Aggregate;
    }

    #[test]
    fn null_reference_has_a_value() {
        let v = Variant::new(Option::<Rc<Node>>::None);
        assert!(v.has_value());
        assert!(!v.is_truthy());
        assert!(v.get::<Option<Rc<Node>>>().unwrap().is_none());
        assert_eq!(v.to_string(), "null");
    }

    #[test]
    fn handles_are_shared_not_copied() {
        let node = Arc::new(Node { label: "n".into() });
        let v = Variant::new(node.clone());
        let copy = v.clone();
        let out = copy.get::<Arc<Node>>().unwrap();
        assert!(Arc::ptr_eq(&out, &node));
        assert_eq!(Arc::strong_count(&node), 4);
        assert_eq!(out.label, "n");
    }

    #[test]
    fn non_null_converts_to_nullable() {
        let node = Rc::new(Node { label: "n".into() });
        let v = Variant::new(node.clone());
        assert!(v.is_truthy());
        let nullable = v.get::<Option<Rc<Node>>>().unwrap().unwrap();
        assert!(Rc::ptr_eq(&nullable, &node));

        let other = Variant::new(Rc::new(Node { label: "n".into() }));
        assert!(v.equals(&v.clone()).unwrap());
        assert!(!v.equals(&other).unwrap());
        assert!(v.equals(&Variant::new(Some(node))).unwrap());
    }

    #[test]
    fn pointee_rendering() {
        assert_eq!(Variant::new(Arc::new(5_u8)).to_string(), "5");
        assert_eq!(Variant::new(Some(Rc::new(String::from("s")))).to_string(), "s");
        let handles = Variant::new(vec![Some(Rc::new(String::from("s"))), None]);
        assert_eq!(handles.to_string(), "[\"s\", null]");
    }
}
