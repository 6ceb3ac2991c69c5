use super::{Delimited, Formatter, Params, ToSql};
use crate::stmt::Expr;

/// An operand of a compound expression, parenthesized when required.
struct Operand<'a> {
    expr: &'a Expr,
    parens: bool,
}

impl<'a> Operand<'a> {
    /// Operand of `and`. Conjunctions bind tighter than disjunctions, so only
    /// `or` operands need grouping.
    fn and(expr: &'a Expr) -> Self {
        let parens = matches!(expr, Expr::Or(operands) if operands.len() > 1);
        Operand { expr, parens }
    }

    fn or(expr: &'a Expr) -> Self {
        Operand {
            expr,
            parens: false,
        }
    }

    /// Operand of a comparison, `not` or `is null`.
    fn unary(expr: &'a Expr) -> Self {
        let parens = match expr {
            Expr::And(operands) | Expr::Or(operands) => operands.len() > 1,
            Expr::BinaryOp(_) | Expr::IsNull(_) | Expr::Not(_) => true,
            Expr::Ident(_) | Expr::Raw(_) | Expr::Value(_) => false,
        };
        Operand { expr, parens }
    }
}

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.parens {
            fmt!(f, "(" self.expr ")");
        } else {
            self.expr.to_sql(f);
        }
    }
}

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(operands) => match &operands[..] {
                [] => fmt!(f, "true"),
                [operand] => operand.to_sql(f),
                _ => Delimited(operands.iter().map(Operand::and), " and ").to_sql(f),
            },
            Expr::Or(operands) => match &operands[..] {
                [] => fmt!(f, "false"),
                [operand] => operand.to_sql(f),
                _ => Delimited(operands.iter().map(Operand::or), " or ").to_sql(f),
            },
            Expr::BinaryOp(expr) => {
                let lhs = Operand::unary(&expr.lhs);
                let rhs = Operand::unary(&expr.rhs);
                fmt!(f, lhs " " expr.op.as_sql() " " rhs);
            }
            Expr::Ident(name) => name.to_sql(f),
            Expr::IsNull(expr) => fmt!(f, Operand::unary(expr) " is null"),
            Expr::Not(expr) => fmt!(f, "not " Operand::unary(expr)),
            Expr::Raw(sql) => sql.to_sql(f),
            Expr::Value(value) => {
                let placeholder = f.params.push(value);
                placeholder.to_sql(f);
            }
        }
    }
}
