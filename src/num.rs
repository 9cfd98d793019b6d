use fastnum::{
    UD128,
    decimal::{Context, RoundingMode},
};

use crate::error::EncodingError;

/// Base units to decimal amount converter for a coin with fixed decimals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn decimals(&self) -> u8 {
        self.decimals as u8
    }

    pub fn from_base_units(&self, value: u64) -> UD128 {
        UD128::from_parts(
            UD128::from(value).digits(),
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    /// Converts a decimal amount to base units. Amounts with digits beyond
    /// the coin precision are rejected.
    pub fn to_base_units(&self, value: UD128) -> Result<u64, EncodingError> {
        let rescaled = value.rescale(self.decimals as i16);
        if rescaled != value {
            return Err(EncodingError::InvalidU64(value.to_string()));
        }
        let le_bytes = rescaled.digits().to_radix_le(256);
        let significant = le_bytes
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        if significant > 8 {
            return Err(EncodingError::InvalidU64(value.to_string()));
        }
        let mut buf = [0u8; 8];
        buf[..significant].copy_from_slice(&le_bytes[..significant]);
        Ok(u64::from_le_bytes(buf))
    }

    /// Parses a decimal amount, e.g. `"1.25"`, into base units.
    pub fn parse(&self, amount: &str) -> Result<u64, EncodingError> {
        let value = UD128::from_str(amount.trim(), Context::default())
            .map_err(|_| EncodingError::InvalidU64(amount.to_string()))?;
        self.to_base_units(value)
    }
}

#[cfg(test)]
mod tests {
    use fastnum::udec128;

    use super::*;

    #[test]
    fn test_numeric_converter_from_base_units() {
        assert_eq!(
            Converter::new(0).from_base_units(1234567890),
            udec128!(1234567890)
        );
        assert_eq!(
            Converter::new(6).from_base_units(1234567890),
            udec128!(1234.56789)
        );
        assert_eq!(
            Converter::new(9).from_base_units(u64::MAX),
            udec128!(18446744073.709551615)
        );
    }

    #[test]
    fn test_numeric_converter_to_base_units() {
        assert_eq!(
            Converter::new(0).to_base_units(udec128!(1234567890)),
            Ok(1234567890)
        );
        assert_eq!(
            Converter::new(6).to_base_units(udec128!(1234.56789)),
            Ok(1234567890)
        );
        assert_eq!(Converter::new(9).to_base_units(udec128!(0)), Ok(0));
        assert!(matches!(
            Converter::new(0).to_base_units(udec128!(18446744073709551616)),
            Err(EncodingError::InvalidU64(_))
        ));
    }

    #[test]
    fn test_numeric_converter_parse() {
        assert_eq!(Converter::new(9).parse("1.5"), Ok(1_500_000_000));
        assert_eq!(Converter::new(6).parse(" 42 "), Ok(42_000_000));
        assert!(Converter::new(6).parse("-1").is_err());
        assert!(Converter::new(6).parse("abc").is_err());
    }

    #[test]
    fn test_numeric_converter_rejects_sub_unit_digits() {
        assert!(matches!(
            Converter::new(9).parse("0.0000000001"),
            Err(EncodingError::InvalidU64(_))
        ));
        assert!(matches!(
            Converter::new(6).to_base_units(udec128!(1.2345678)),
            Err(EncodingError::InvalidU64(_))
        ));
        assert_eq!(Converter::new(9).parse("1.000000000"), Ok(1_000_000_000));
        assert_eq!(Converter::new(9).parse("0.000000001"), Ok(1));
    }
}
