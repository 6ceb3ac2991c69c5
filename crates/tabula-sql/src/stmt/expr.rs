use super::Name;

use tabula_core::Value;

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND of all operands; `true` when empty
    And(Vec<Expr>),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// A quoted, possibly qualified identifier
    Ident(Name),

    /// `<expr> is null`
    IsNull(Box<Expr>),

    /// `not <expr>`
    Not(Box<Expr>),

    /// OR of all operands; `false` when empty
    Or(Vec<Expr>),

    /// SQL text written verbatim
    Raw(String),

    /// A value sent as a query parameter
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl BinaryOp {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Like => "like",
        }
    }
}

impl Expr {
    /// A column of `table`, serialized as `"table"."column"`.
    pub fn column(table: &Name, column: impl Into<String>) -> Expr {
        Expr::Ident(table.child(column))
    }

    /// An unqualified identifier.
    pub fn ident(name: impl Into<Name>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn raw(sql: impl Into<String>) -> Expr {
        Expr::Raw(sql.into())
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::BinaryOp(ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        })
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn like(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Like, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        Expr::IsNull(Box::new(expr.into()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    pub fn and(operands: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(operands.into_iter().collect())
    }

    /// Combines `self` and `other` with AND, flattening nested conjunctions.
    pub fn and_with(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::And(mut lhs), Expr::And(rhs)) => {
                lhs.extend(rhs);
                Expr::And(lhs)
            }
            (Expr::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Expr::And(lhs)
            }
            (lhs, Expr::And(mut rhs)) => {
                rhs.insert(0, lhs);
                Expr::And(rhs)
            }
            (lhs, rhs) => Expr::And(vec![lhs, rhs]),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<Name> for Expr {
    fn from(value: Name) -> Self {
        Expr::Ident(value)
    }
}
