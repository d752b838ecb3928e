//! Fixed-order exact decimal arithmetic used by every curve operation.
//!
//! Addition, subtraction, multiplication and negation on the scalar type are
//! exact. The multi-term folds below compose left to right in the order given
//! and round once, at the end, to the working precision, so two runs with the
//! same configuration produce bit-identical results.

use bigdecimal::BigDecimal;

use crate::error::CurveError;

/// Scalar type carried by every ramp and curve quantity.
pub type Decimal = BigDecimal;

/// The decimal constant 1/2 used by the kinematic formulas.
#[inline]
pub(crate) fn point_five() -> Decimal {
    Decimal::new(5.into(), 1)
}

/// Left-to-right sum of `terms`, rounded to `digits` significant digits.
pub(crate) fn sum(terms: &[&Decimal], digits: u64) -> Decimal {
    debug_assert!(!terms.is_empty());
    let mut acc = terms[0].clone();
    for term in &terms[1..] {
        acc = &acc + *term;
    }
    acc.with_prec(digits)
}

/// Left-to-right product of `factors`, rounded to `digits` significant digits.
pub(crate) fn prod(factors: &[&Decimal], digits: u64) -> Decimal {
    debug_assert!(!factors.is_empty());
    let mut acc = factors[0].clone();
    for factor in &factors[1..] {
        acc = &acc * *factor;
    }
    acc.with_prec(digits)
}

/// Conversion into the crate's scalar type.
///
/// Floats convert through their shortest decimal representation, so a caller
/// passing `0.1` gets the decimal `0.1` rather than the binary expansion of
/// the nearest `f64`. Strings carry values beyond what `f64` can represent.
pub trait IntoDecimal {
    fn into_decimal(self) -> Result<Decimal, CurveError>;
}

impl IntoDecimal for Decimal {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(self)
    }
}

impl IntoDecimal for &Decimal {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(self.clone())
    }
}

impl IntoDecimal for f64 {
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        if !self.is_finite() {
            return Err(CurveError::InvalidScalar {
                reason: format!("non-finite value {}", self),
            });
        }
        format!("{}", self)
            .parse()
            .map_err(|err| CurveError::InvalidScalar {
                reason: format!("cannot convert {}: {}", self, err),
            })
    }
}

impl IntoDecimal for &str {
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        self.parse().map_err(|err| CurveError::InvalidScalar {
            reason: format!("cannot parse {:?} as a decimal: {}", self, err),
        })
    }
}

impl IntoDecimal for String {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        self.as_str().into_decimal()
    }
}

impl IntoDecimal for i32 {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(Decimal::from(self))
    }
}

impl IntoDecimal for i64 {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(Decimal::from(self))
    }
}

impl IntoDecimal for u32 {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(Decimal::from(self))
    }
}

impl IntoDecimal for u64 {
    #[inline]
    fn into_decimal(self) -> Result<Decimal, CurveError> {
        Ok(Decimal::from(self))
    }
}
