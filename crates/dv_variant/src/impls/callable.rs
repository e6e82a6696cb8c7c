use core::any::type_name;

use dv_utils::Callable;

use crate::call::{Function, IntoFunction, IntoReturn, Param, ParamTuple};
use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::Bindable;

macro_rules! impl_fn_pointer {
    ($($P:ident),*) => {
        impl<R, $($P,)*> Bindable for fn($($P,)*) -> R
        where
            R: IntoReturn + 'static,
            $($P: Param + 'static,)*
        {
            const CATEGORY: Category = Category::Callable;

            fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
                builder
                    .truthy(|_| true)
                    .render(|_, f| f.write_str(type_name::<Self>()))
                    .call(|func, args| <Self as IntoFunction<Self>>::invoke(func, args))
            }
        }
    };
}

impl_fn_pointer!();
impl_fn_pointer!(P0);
impl_fn_pointer!(P0, P1);
impl_fn_pointer!(P0, P1, P2);
impl_fn_pointer!(P0, P1, P2, P3);
impl_fn_pointer!(P0, P1, P2, P3, P4);
impl_fn_pointer!(P0, P1, P2, P3, P4, P5);

impl Bindable for Function {
    const CATEGORY: Category = Category::Callable;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|_| true)
            .render(|func, f| write!(f, "<function {}>", func.signature()))
            .call(|func, args| func.invoke(args))
    }
}

impl<Args, Ret> Bindable for Callable<Args, Ret>
where
    Args: ParamTuple + 'static,
    Ret: IntoReturn + 'static,
{
    const CATEGORY: Category = Category::Callable;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|callable| callable.is_set())
            .render(|callable, f| match callable.is_set() {
                true => write!(f, "<callable {}>", Args::signature()),
                false => f.write_str("<unset callable>"),
            })
            .call(|callable, args| callable.call(Args::from_args(args)?)?.into_return())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use dv_utils::Callable;

    use crate::call::Function;
    use crate::{Variant, VariantError};

    fn greet(name: String) -> String {
        alloc::format!("hello {name}")
    }

    #[test]
    fn fn_pointers_are_callable() {
        let v = Variant::new(greet as fn(String) -> String);
        assert!(v.is_truthy());
        assert_eq!(v.call(("bob",)).unwrap().get::<String>().unwrap(), "hello bob");
        assert_eq!(v.to_string(), "fn(alloc::string::String) -> alloc::string::String");
        assert!(v.get::<fn(String) -> String>().is_ok());
    }

    #[test]
    fn closures_double() {
        let v = Variant::from_fn(|x: i32| x * 2);
        assert_eq!(v.call((21,)).unwrap().get::<i32>().unwrap(), 42);
        assert_eq!(v.do_call(&[Variant::new(4_u8)]).unwrap().get::<i32>().unwrap(), 8);
        assert!(v.get::<Function>().is_ok());
        assert!(matches!(v.call(()), Err(VariantError::ArgumentCount { .. })));
        assert!(matches!(
            Variant::new(1).call(()),
            Err(VariantError::NotCallable { .. })
        ));
    }

    #[test]
    fn callables_follow_their_active_shape() {
        let mut callable: Callable<(i64, i64), i64> = Callable::default();
        assert!(!Variant::new(callable.clone()).is_truthy());
        assert_eq!(
            Variant::new(callable.clone()).call((1, 2)).unwrap_err(),
            VariantError::UninitializedCallable
        );

        callable.set_fn(|(a, b)| a * b);
        let v = Variant::new(callable);
        assert!(v.is_truthy());
        assert_eq!(v.call((6, 7)).unwrap().get::<i64>().unwrap(), 42);
    }
}
