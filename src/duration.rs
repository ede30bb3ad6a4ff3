//! Conversion of free-text durations ("1 hour 30 mins") into whole minutes.

use crate::error::DurationError;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

fn unit_factor(unit: &str) -> Result<u32, DurationError> {
    match unit {
        "day" | "days" => Ok(MINUTES_PER_DAY),
        "hour" | "hours" | "hrs" => Ok(MINUTES_PER_HOUR),
        "min" | "mins" => Ok(1),
        other => Err(DurationError::InvalidUnit(other.to_string())),
    }
}

/// Converts a string of `<integer> <unit>` pairs to a total number of minutes.
///
/// An empty (or all-whitespace) input yields `0`. An odd number of tokens is
/// rejected with [`DurationError::MalformedDuration`] instead of dropping the
/// trailing token.
pub fn convert_to_minutes(input: &str) -> Result<u32, DurationError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(DurationError::MalformedDuration(input.to_string()));
    }

    tokens.chunks_exact(2).try_fold(0u32, |total, pair| {
        let quantity: u32 = pair[0]
            .parse()
            .map_err(|_| DurationError::InvalidQuantity(pair[0].to_string()))?;
        let factor = unit_factor(pair[1])?;
        quantity
            .checked_mul(factor)
            .and_then(|minutes| total.checked_add(minutes))
            .ok_or_else(|| DurationError::MalformedDuration(input.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(convert_to_minutes("2 hours 30 mins"), Ok(150));
        assert_eq!(convert_to_minutes("1 hour 1 min"), Ok(61));
        assert_eq!(convert_to_minutes("3 hrs"), Ok(180));
    }

    #[test]
    fn test_days() {
        assert_eq!(convert_to_minutes("1 day"), Ok(1440));
        assert_eq!(convert_to_minutes("2 days 4 hours 5 mins"), Ok(3125));
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(convert_to_minutes(""), Ok(0));
        assert_eq!(convert_to_minutes("   "), Ok(0));
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert_to_minutes("3 fortnights"),
            Err(DurationError::InvalidUnit("fortnights".to_string()))
        );
    }

    #[test]
    fn test_odd_token_count_fails_fast() {
        assert!(matches!(
            convert_to_minutes("1 hour 30"),
            Err(DurationError::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_non_numeric_quantity() {
        assert_eq!(
            convert_to_minutes("some mins"),
            Err(DurationError::InvalidQuantity("some".to_string()))
        );
    }
}
