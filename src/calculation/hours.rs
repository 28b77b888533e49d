//! Hour validation and ratio helpers shared by the calculations.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Fails with [`EngineError::InvalidInput`] if `hours` is negative.
pub(crate) fn ensure_non_negative(field: &str, owner: &str, hours: Decimal) -> EngineResult<()> {
    if hours.is_sign_negative() && !hours.is_zero() {
        return Err(EngineError::invalid_input(
            field,
            format!("{} has negative hours: {}", owner, hours),
        ));
    }
    Ok(())
}

fn out_of_range(field: &str) -> EngineError {
    EngineError::invalid_input(field, "value out of range")
}

/// Adds `hours` to `total`, failing with [`EngineError::InvalidInput`] on overflow.
pub(crate) fn add_hours(field: &str, total: Decimal, hours: Decimal) -> EngineResult<Decimal> {
    total.checked_add(hours).ok_or_else(|| out_of_range(field))
}

/// Sums `values`, failing with [`EngineError::InvalidInput`] on overflow.
pub(crate) fn sum_hours<I>(field: &str, values: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, hours| add_hours(field, total, hours))
}

/// Divides `numerator` by `denominator`, failing with [`EngineError::InvalidInput`]
/// when the quotient does not fit in a [`Decimal`].
pub(crate) fn divide(
    field: &str,
    numerator: Decimal,
    denominator: Decimal,
) -> EngineResult<Decimal> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| out_of_range(field))
}

/// Rounds half away from zero to `dp` decimal places.
pub(crate) fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole * 100` rounded to `dp` places, or zero when `whole` is zero.
pub(crate) fn percentage(
    field: &str,
    part: Decimal,
    whole: Decimal,
    dp: u32,
) -> EngineResult<Decimal> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = divide(field, part, whole)?;
    let percent = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| out_of_range(field))?;
    Ok(round_to(percent, dp))
}
