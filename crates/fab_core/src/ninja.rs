//! Syntax helpers for the Ninja build-file format.
//!
//! Ninja treats `$` as its escape and substitution character. Paths in `build` lines additionally need spaces and
//! colons escaped, because those separate outputs, inputs and the rule name.
//!
//! ## Examples
//! ```rust
//! use fab_core::ninja;
//!
//! assert_eq!(ninja::escape_path("my dir/a.cc"), "my$ dir/a.cc");
//! assert_eq!(ninja::variable_refs("$cxx -c ${cxxflags} $$HOME"), ["cxx", "cxxflags"]);
//! ```

use std::borrow::Cow;

/// Variables the executor binds itself for every edge.
pub const BUILTIN_VARIABLES: &[&str] = &["in", "out"];

/// C compiler flag variable.
pub const CFLAGS: &str = "cflags";
/// C++ compiler flag variable.
pub const CXXFLAGS: &str = "cxxflags";
/// Linker flag variable.
pub const LDFLAGS: &str = "ldflags";

/// Computed flag variables, in emission order.
pub const FLAG_VARIABLES: &[&str] = &[CFLAGS, CXXFLAGS, LDFLAGS];

/// Escape a path for use as an output or input of a `build` line.
pub fn escape_path(path: &str) -> Cow<'_, str> {
    if !path.contains(['$', ' ', ':']) {
        return Cow::Borrowed(path);
    }
    let mut escaped = String::with_capacity(path.len() + 4);
    for ch in path.chars() {
        match ch {
            '$' | ' ' | ':' => {
                escaped.push('$');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Escape the right-hand side of a variable binding.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains('$') {
        Cow::Owned(value.replace('$', "$$"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Whether `name` can be the left-hand side of a top-level `name = value` binding (`[A-Za-z0-9_.-]+`).
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| is_simple_name_byte(b) || b == b'.')
}

/// Whether `path` can appear on a `build` or `default` line.
///
/// Newlines end the statement and `|` separates implicit and order-only dependencies. Neither has an escape.
pub fn is_representable_path(path: &str) -> bool {
    !path.contains(['\n', '\r', '|'])
}

/// Whether `value` can be the right-hand side of a binding. Newlines have no escape.
pub fn is_representable_value(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

/// Collect the variable names a template references, in order of first appearance.
///
/// Both `$name` and `${name}` are recognized. `$$`, `$ ` and `$:` are escapes, not references.
/// A name is `[A-Za-z0-9_-]+`; `.` ends a `$name` reference, so `$out.d` references `out`.
pub fn variable_refs(template: &str) -> Vec<&str> {
    let bytes = template.as_bytes();
    let mut refs: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let Some(&next) = bytes.get(i + 1) else {
            break;
        };

        let (name, advance) = if next == b'{' {
            match template[i + 2..].find('}') {
                Some(end) => (&template[i + 2..i + 2 + end], end + 3),
                None => break,
            }
        } else {
            let len = template[i + 1..]
                .bytes()
                .take_while(|b| is_simple_name_byte(*b))
                .count();
            (&template[i + 1..i + 1 + len], len.max(1) + 1)
        };

        if !name.is_empty() && !refs.contains(&name) {
            refs.push(name);
        }
        i += advance;
    }

    refs
}

fn is_simple_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
