use alloc::string::String;

use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::Bindable;

// Conversion targets follow the lossless `From` impls of the standard library.
macro_rules! impl_number {
    ($zero:literal: $($ty:ty => [$($target:ty),*]),+ $(,)?) => {
        $(
            impl Bindable for $ty {
                const CATEGORY: Category = Category::Scalar;

                fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
                    builder
                        .truthy(|v| *v != $zero)
                        .display()
                        .ord()
                        $(.convert_to::<$target>())*
                }
            }

            crate::impl_auto_register!($ty);
        )+
    };
}

impl_number! {
    0:
    u8 => [u16, u32, u64, u128, usize, i16, i32, i64, i128, isize, f32, f64, char],
    u16 => [u32, u64, u128, usize, i32, i64, i128, f32, f64],
    u32 => [u64, u128, i64, i128, f64],
    u64 => [u128, i128],
    u128 => [],
    usize => [],
    i8 => [i16, i32, i64, i128, isize, f32, f64],
    i16 => [i32, i64, i128, isize, f32, f64],
    i32 => [i64, i128, f64],
    i64 => [i128],
    i128 => [],
    isize => [],
}

impl_number! {
    0.0:
    f32 => [f64],
    f64 => [],
}

impl Bindable for bool {
    const CATEGORY: Category = Category::Scalar;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|v| *v)
            .display()
            .ord()
            .convert_to::<u8>()
            .convert_to::<u16>()
            .convert_to::<u32>()
            .convert_to::<u64>()
            .convert_to::<u128>()
            .convert_to::<usize>()
            .convert_to::<i8>()
            .convert_to::<i16>()
            .convert_to::<i32>()
            .convert_to::<i64>()
            .convert_to::<i128>()
            .convert_to::<isize>()
            .convert_to::<f32>()
            .convert_to::<f64>()
    }
}

impl Bindable for char {
    const CATEGORY: Category = Category::Scalar;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|v| *v != '\0')
            .display()
            .literal(|v, f| write!(f, "'{}'", v.escape_debug()))
            .ord()
            .convert_to::<u32>()
            .convert_to::<u64>()
            .convert_to::<u128>()
            .convert_to::<String>()
    }
}

crate::impl_auto_register!(bool, char);

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use crate::info::QualifiedType;
    use crate::{Variant, VariantError};

    #[test]
    fn widening_follows_from() {
        let v = Variant::new(200_u8);
        assert_eq!(v.get::<u64>().unwrap(), 200);
        assert_eq!(v.get::<i16>().unwrap(), 200);
        assert_eq!(v.get::<f64>().unwrap(), 200.0);
        assert_eq!(v.get::<char>().unwrap(), 'È');
        assert!(matches!(v.get::<i8>(), Err(VariantError::TypeMismatch { .. })));

        let v = Variant::new(-3_i32);
        assert_eq!(v.get::<i128>().unwrap(), -3);
        assert!(!v.converts_to(&QualifiedType::of::<f32>()).unwrap());
        assert!(v.get::<u32>().is_err());
    }

    #[test]
    fn bool_and_char() {
        assert_eq!(Variant::new(true).get::<i32>().unwrap(), 1);
        assert_eq!(Variant::new(false).get::<f32>().unwrap(), 0.0);
        assert_eq!(Variant::new('a').get::<u32>().unwrap(), 97);
        assert_eq!(Variant::new('a').get::<String>().unwrap(), "a");
        assert!(!Variant::new('\0').is_truthy());
        assert_eq!(Variant::new('\n').to_string(), "\n");
    }

    #[test]
    fn numbers_are_truthy_when_nonzero() {
        assert!(Variant::new(1_u64).is_truthy());
        assert!(!Variant::new(0_i8).is_truthy());
        assert!(!Variant::new(0.0_f64).is_truthy());
        assert!(Variant::new(f32::NAN).is_truthy());
        assert_eq!(Variant::new(2.5_f32).to_string(), "2.5");
    }
}
