use super::Val;
use crate::error;
use crate::mach::Error;

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic and comparison on values. Sums, differences, products and
/// comparisons use the float view. Division and remainder use the integer
/// view and truncate toward zero.
pub struct Operation {}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() + rhs.as_float())
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() - rhs.as_float())
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() * rhs.as_float())
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let r = rhs.as_int();
        if r == 0 {
            return Err(error!(DivisionByZero; "div: Division by Zero"));
        }
        Ok(Val::from(lhs.as_int().wrapping_div(r)))
    }

    pub fn remainder(lhs: Val, rhs: Val) -> Result<Val> {
        let r = rhs.as_int();
        if r == 0 {
            return Err(error!(DivisionByZero; "mod: Division by Zero"));
        }
        Ok(Val::from(lhs.as_int().wrapping_rem(r)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() < rhs.as_float())
    }

    pub fn greater(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() > rhs.as_float())
    }

    pub fn equal(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() == rhs.as_float())
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() != rhs.as_float())
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() >= rhs.as_float())
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Val {
        Val::from(lhs.as_float() <= rhs.as_float())
    }
}
