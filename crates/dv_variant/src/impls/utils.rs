use core::cmp::Ordering;
use core::fmt;

use crate::descriptor::Visitor;
use crate::{Bindable, Variant, VariantError, VariantResult, descriptor_of};

/// The single argument of an array or map index.
pub(super) fn single_arg(args: &[Variant]) -> VariantResult<&Variant> {
    match args {
        [arg] => Ok(arg),
        _ => Err(VariantError::ArgumentCount {
            expected: 1,
            variadic: false,
            found: args.len(),
        }),
    }
}

/// Resolves an integer argument against a length.
///
/// Any integer type is accepted, read through the read-only view so a
/// qualified argument works too. Negative and too large values are out
/// of range.
pub(super) fn position(arg: &Variant, len: usize) -> VariantResult<usize> {
    let index = match arg.read::<usize>() {
        Ok(index) => index as i128,
        Err(error) => arg
            .read::<i128>()
            .or_else(|_| arg.read::<isize>().map(|index| index as i128))
            .or_else(|_| {
                arg.read::<u128>()
                    .map(|index| i128::try_from(index).unwrap_or(i128::MAX))
            })
            .map_err(|_| error)?,
    };
    match usize::try_from(index) {
        Ok(pos) if pos < len => Ok(pos),
        _ => Err(VariantError::IndexOutOfRange { index, len }),
    }
}

pub(super) fn iterate_elements<'a, T: Bindable>(
    items: impl Iterator<Item = &'a T>,
    visitor: &mut Visitor<'_>,
) -> VariantResult<()> {
    for (index, item) in items.enumerate() {
        let key = Variant::try_new(index)?;
        let value = Variant::try_new(item.clone())?;
        if visitor(key, value).is_break() {
            break;
        }
    }
    Ok(())
}

pub(super) fn iterate_entries<'a, K: Bindable, V: Bindable>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    visitor: &mut Visitor<'_>,
) -> VariantResult<()> {
    for (key, value) in entries {
        let key = Variant::try_new(key.clone())?;
        let value = Variant::try_new(value.clone())?;
        if visitor(key, value).is_break() {
            break;
        }
    }
    Ok(())
}

/// Element-wise equality through the element descriptor.
pub(super) fn elements_eq<'a, T: Bindable>(
    lhs: impl ExactSizeIterator<Item = &'a T>,
    rhs: impl ExactSizeIterator<Item = &'a T>,
) -> Option<bool> {
    let descriptor = descriptor_of::<T>().ok()?;
    if lhs.len() != rhs.len() {
        return Some(false);
    }
    for (a, b) in lhs.zip(rhs) {
        if !descriptor.equals(a, b)? {
            return Some(false);
        }
    }
    Some(true)
}

/// Lexicographic ordering through the element descriptor.
pub(super) fn elements_cmp<'a, T: Bindable>(
    mut lhs: impl Iterator<Item = &'a T>,
    mut rhs: impl Iterator<Item = &'a T>,
) -> Option<Ordering> {
    let descriptor = descriptor_of::<T>().ok()?;
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
            (Some(a), Some(b)) => match descriptor.compare(a, b)? {
                Ordering::Equal => {}
                ordering => return Some(ordering),
            },
        }
    }
}

/// Renders `[a, b, c]` with elements in literal form.
pub(super) fn render_elements<'a, T: Bindable>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a T>,
) -> fmt::Result {
    let descriptor = descriptor_of::<T>().map_err(|_| fmt::Error)?;
    f.write_str("[")?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        descriptor.render_literal(item, f)?;
    }
    f.write_str("]")
}

/// Renders `{k: v, ...}` with keys and values in literal form.
pub(super) fn render_entries<'a, K: Bindable, V: Bindable>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> fmt::Result {
    let keys = descriptor_of::<K>().map_err(|_| fmt::Error)?;
    let values = descriptor_of::<V>().map_err(|_| fmt::Error)?;
    f.write_str("{")?;
    for (index, (key, value)) in entries.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        keys.render_literal(key, f)?;
        f.write_str(": ")?;
        values.render_literal(value, f)?;
    }
    f.write_str("}")
}
