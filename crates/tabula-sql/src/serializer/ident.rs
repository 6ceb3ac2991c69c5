use super::{Formatter, Params, ToSql};
use crate::stmt::{name::quote_ident, Name};

/// A single quoted identifier part
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        quote_ident(f.dst, self.0.as_ref());
    }
}

impl ToSql for &Name {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = "";
        for part in &self.0 {
            fmt!(f, s Ident(part));
            s = ".";
        }
    }
}
