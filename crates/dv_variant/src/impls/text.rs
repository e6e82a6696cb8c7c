use alloc::string::String;

use super::utils::{position, single_arg};
use crate::descriptor::{DescriptorBuilder, Visitor};
use crate::info::Category;
use crate::{Bindable, Variant, VariantResult};

// Strings are arrays of `char`: length, indexing and iteration count chars, not bytes.

fn char_at(text: &str, args: &[Variant]) -> VariantResult<Variant> {
    let pos = position(single_arg(args)?, text.chars().count())?;
    match text.chars().nth(pos) {
        Some(c) => Variant::try_new(c),
        None => Ok(Variant::empty()),
    }
}

fn iterate_chars(text: &str, visitor: &mut Visitor<'_>) -> VariantResult<()> {
    for (index, c) in text.chars().enumerate() {
        if visitor(Variant::try_new(index)?, Variant::try_new(c)?).is_break() {
            break;
        }
    }
    Ok(())
}

impl Bindable for String {
    const CATEGORY: Category = Category::Array;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|s| !s.is_empty())
            .display()
            .literal(|s, f| write!(f, "\"{}\"", s.escape_debug()))
            .ord()
            .length(|s| s.chars().count())
            .index(|s, args| char_at(s, args))
            .iterate(|s, visitor| iterate_chars(s, visitor))
    }
}

impl Bindable for &'static str {
    const CATEGORY: Category = Category::Array;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|s| !s.is_empty())
            .display()
            .literal(|s, f| write!(f, "\"{}\"", s.escape_debug()))
            .ord()
            .length(|s| s.chars().count())
            .index(|s, args| char_at(s, args))
            .iterate(|s, visitor| iterate_chars(s, visitor))
            .convert_to::<String>()
    }
}

crate::impl_auto_register!(String, &'static str);

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::ops::ControlFlow;

    use crate::{Variant, VariantError};

    #[test]
    fn strings_count_chars() {
        let v = Variant::new(String::from("héllo"));
        assert_eq!(v.length().unwrap(), 5);
        assert_eq!(v.index((1,)).unwrap().get::<char>().unwrap(), 'é');
        assert!(matches!(
            v.index((5,)),
            Err(VariantError::IndexOutOfRange { index: 5, len: 5 })
        ));
        assert!(matches!(
            v.index((-1,)),
            Err(VariantError::IndexOutOfRange { index: -1, len: 5 })
        ));
    }

    #[test]
    fn str_converts_to_string() {
        let v = Variant::new("abc");
        assert_eq!(v.get::<String>().unwrap(), "abc");
        assert_eq!(v.get::<&str>().unwrap(), "abc");
        assert!(!Variant::new("").is_truthy());

        let mut seen = Vec::new();
        v.iterate_over(|i, c| {
            seen.push((i.get::<usize>().unwrap(), c.get::<char>().unwrap()));
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(seen, [(0, 'a'), (1, 'b'), (2, 'c')]);
    }

    #[test]
    fn mixed_string_comparison() {
        let owned = Variant::new(String::from("abc"));
        let borrowed = Variant::new("abc");
        assert!(borrowed.equals(&owned).unwrap());
        assert!(owned.equals(&borrowed).unwrap());
        assert_eq!(Variant::new(vec!["a\"b"]).to_string(), "[\"a\\\"b\"]");
    }
}
