use super::{Comma, Formatter, Ident, Params, ToSql};
use crate::stmt::{self, Direction, Expr, OrderBy, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "select ");

        if self.columns.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(&self.columns));
        }

        if let Some(from) = &self.from {
            fmt!(f, " from " from);
        }

        Filter(&self.filter).to_sql(f);

        if !self.order_by.is_empty() {
            fmt!(f, " order by " Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " limit " limit);
        }

        if let Some(offset) = self.offset {
            fmt!(f, " offset " offset);
        }
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => "",
            Direction::Desc => " desc",
        };
        fmt!(f, &self.expr direction);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        assert_eq!(
            self.columns.len(),
            self.values.len(),
            "insert must have one value per column"
        );

        let table = &self.table;
        fmt!(f, "insert into " table);

        if self.columns.is_empty() {
            fmt!(f, " default values");
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            fmt!(f, " (" columns ") values (" Comma(&self.values) ")");
        }

        Returning(&self.returning).to_sql(f);
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(self.assignments.iter().map(Assignment));
        let table = &self.table;
        fmt!(f, "update " table " set " assignments);
        Filter(&self.filter).to_sql(f);
        Returning(&self.returning).to_sql(f);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        fmt!(f, "delete from " table);
        Filter(&self.filter).to_sql(f);
        Returning(&self.returning).to_sql(f);
    }
}

struct Assignment<'a>(&'a (String, Expr));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, Ident(column) " = " value);
    }
}

struct Filter<'a>(&'a Option<Expr>);

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(filter) = self.0 {
            fmt!(f, " where " filter);
        }
    }
}

struct Returning<'a>(&'a [Expr]);

impl ToSql for Returning<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !self.0.is_empty() {
            fmt!(f, " returning " Comma(self.0));
        }
    }
}
