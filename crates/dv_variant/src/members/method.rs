use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, type_name};
use core::fmt;

use crate::call::{IntoMethod, Signature};
use crate::descriptor::{DescriptorBuilder, slot};
use crate::info::Category;
use crate::{Bindable, Variant, VariantError, VariantResult};

type MethodFn = Box<dyn Fn(&dyn Any, &[Variant]) -> VariantResult<Variant> + Send + Sync>;

// -----------------------------------------------------------------------------
// Method

/// A registered function member, shared by every lookup that finds it.
pub struct Method {
    name: &'static str,
    receiver: &'static str,
    signature: Signature,
    invoke: MethodFn,
}

impl Method {
    pub(crate) fn new<T, M, Marker>(name: &'static str, method: M) -> Self
    where
        T: Bindable,
        M: IntoMethod<T, Marker>,
    {
        Self {
            name,
            receiver: type_name::<T>(),
            signature: M::signature(),
            invoke: Box::new(move |receiver: &dyn Any, args: &[Variant]| {
                method.invoke(slot::<T>(receiver), args)
            }),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn signature(&self) -> Signature {
        self.signature
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// BoundMethod

/// A [`Method`] paired with the receiver it was looked up on.
///
/// The receiver is a copy taken at lookup time.
#[derive(Clone)]
pub struct BoundMethod {
    receiver: Variant,
    method: Arc<Method>,
}

impl BoundMethod {
    #[inline]
    pub(crate) fn new(receiver: Variant, method: Arc<Method>) -> Self {
        Self { receiver, method }
    }

    #[inline]
    pub fn receiver(&self) -> &Variant {
        &self.receiver
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn invoke(&self, args: &[Variant]) -> VariantResult<Variant> {
        match self.receiver.slot() {
            Some(receiver) => (self.method.invoke)(receiver, args),
            None => Err(VariantError::Uninitialized),
        }
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("receiver", &self.receiver)
            .field("method", &self.method)
            .finish()
    }
}

impl Bindable for BoundMethod {
    const CATEGORY: Category = Category::Callable;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .render(|bound, f| {
                write!(f, "<method {}::{}>", bound.method.receiver, bound.method.name)
            })
            .call(|bound, args| bound.invoke(args))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::info::Category;
    use crate::members::Members;
    use crate::{Bindable, DescriptorBuilder, Variant, VariantError};

    #[derive(Clone)]
    struct Counter {
        step: i64,
    }

    impl Bindable for Counter {
        const CATEGORY: Category = Category::Aggregate;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(
                Members::new().method("advance", |c: &Counter, from: i64| from + c.step),
            )
        }
    }

    #[test]
    fn bound_methods_keep_a_copy_of_the_receiver() {
        let mut counter = Variant::new(Counter { step: 5 });
        let advance = counter.lookup_member("advance").unwrap();
        counter.set(Counter { step: 100 });

        assert!(advance.is_truthy());
        assert_eq!(advance.call((1,)).unwrap().get::<i64>().unwrap(), 6);
        assert!(advance.to_string().ends_with("Counter::advance>"));
        assert!(matches!(
            advance.call(()),
            Err(VariantError::ArgumentCount { expected: 1, .. })
        ));
    }
}
