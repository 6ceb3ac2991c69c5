use std::fmt;

/// A possibly schema-qualified SQL identifier, such as `["public", "users"]`.
///
/// Each part is quoted separately when serialized, so parts may contain any
/// character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub Vec<String>);

impl Name {
    pub fn new<I, S>(parts: I) -> Name
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Name(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// The unqualified part of the name.
    pub fn last(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns a new name with `part` appended, e.g. a column of a table.
    pub fn child(&self, part: impl Into<String>) -> Name {
        let mut parts = self.0.clone();
        parts.push(part.into());
        Name(parts)
    }

    /// The quoted form, e.g. `"public"."users"`.
    pub fn sanitize(&self) -> String {
        self.to_string()
    }
}

/// Writes `name` as a double quoted identifier.
pub(crate) fn quote_ident(dst: &mut String, name: &str) {
    dst.push('"');
    for ch in name.chars() {
        if ch == '"' {
            dst.push('"');
        }
        dst.push(ch);
    }
    dst.push('"');
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dst = String::new();
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                dst.push('.');
            }
            quote_ident(&mut dst, part);
        }
        f.write_str(&dst)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name(vec![value.to_string()])
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(vec![value])
    }
}

impl<const N: usize> From<[&str; N]> for Name {
    fn from(value: [&str; N]) -> Self {
        Name::new(value)
    }
}

impl From<Vec<String>> for Name {
    fn from(value: Vec<String>) -> Self {
        Name(value)
    }
}
