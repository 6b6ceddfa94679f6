// nom parser combinators
use nom::character::complete::space0;
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::delimited;
use nom::IResult;

/// A line holding exactly one floating point value
///
/// Surrounding whitespace is ignored, anything else is a failure.
pub(crate) fn single_f64(i: &str) -> IResult<&str, f64> {
    all_consuming(delimited(space0, double, space0))(i.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_values() {
        assert_eq!(single_f64("  1.5e3\t").unwrap().1, 1500.0);
        assert_eq!(single_f64("42\r").unwrap().1, 42.0);
        assert_eq!(single_f64("-0.25").unwrap().1, -0.25);
    }

    #[test]
    fn rejects_trailing_content() {
        assert!(single_f64("1.0 2.0").is_err());
        assert!(single_f64("1.0abc").is_err());
        assert!(single_f64("").is_err());
        assert!(single_f64("   ").is_err());
    }
}
