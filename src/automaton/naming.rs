use std::borrow::Cow;

use itertools::Itertools;

const RESERVED: [char; 6] = ['\\', ',', '(', ')', '{', '}'];

fn escape(name: &str) -> Cow<'_, str> {
    if !name.contains(RESERVED) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    for chr in name.chars() {
        if RESERVED.contains(&chr) {
            out.push('\\');
        }
        out.push(chr);
    }
    Cow::Owned(out)
}

/// Name of the product state that pairs the states `left` and `right`, e.g. `(p, q)`.
///
/// Delimiters occurring in the component names are escaped with a backslash, so
/// distinct pairs always obtain distinct names.
pub fn pair_name(left: &str, right: &str) -> String {
    format!("({}, {})", escape(left), escape(right))
}

/// Name of the state that represents a class of states, e.g. `{p, q}`. The members
/// are given in a fixed order by the caller and escaped like in [`pair_name`].
pub fn class_name<'a, I: IntoIterator<Item = &'a str>>(members: I) -> String {
    format!("{{{}}}", members.into_iter().map(escape).join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_names_are_injective() {
        assert_eq!(pair_name("0", "1"), "(0, 1)");
        assert_ne!(pair_name("a, b", "c"), pair_name("a", "b, c"));
        assert_eq!(pair_name("(x)", "y"), "(\\(x\\), y)");
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name(["0", "2"]), "{0, 2}");
        assert_eq!(class_name(["sink"]), "{sink}");
        assert_ne!(class_name(["a,b"]), class_name(["a", "b"]));
    }
}
