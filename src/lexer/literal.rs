//! Numeric literal decoding.
//!
//! The pattern has already checked the shape of the literal; what is left is
//! turning the digits into a value and enforcing the rules that depend on the
//! grammar version.

use crate::error::LexError;
use crate::source::Range;
use crate::version::Version;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

/// Base of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// `[1-9][0-9]*`
    Decimal,
    /// `0o17`
    Octal,
    /// `0x1F`
    Hexadecimal,
    /// `0b101`
    Binary,
    /// A bare digit run starting with `0`, e.g. `017`.  Octal before Python 3.
    LegacyOctal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Octal | Radix::LegacyOctal => 8,
            Radix::Hexadecimal => 16,
            Radix::Binary => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn imaginary(im: f64) -> Self {
        Self { re: 0.0, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re == 0.0 {
            write!(f, "{}j", self.im)
        } else {
            write!(f, "({}{:+}j)", self.re, self.im)
        }
    }
}

/// A decoded numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
    Complex(Complex),
}

/// A numeral as matched by the pattern, ready to decode.
///
/// All `&str` fields hold the digits only: no base prefix, no `l`/`L` or
/// `j`/`J` suffix.  Ranges are absolute offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeral<'src> {
    Float {
        text: &'src str,
        imaginary: bool,
    },
    ImaginaryInt {
        digits: &'src str,
    },
    Int {
        radix: Radix,
        digits: &'src str,
        /// Where `digits` sits in the source.
        digits_range: Range,
        /// Where the `l`/`L` suffix sits, if any.
        long_suffix: Option<Range>,
    },
}

impl Numeral<'_> {
    pub fn decode(&self, version: Version) -> Result<Number, LexError> {
        match *self {
            Numeral::Float { text, imaginary } => {
                let value = parse_float(text);
                Ok(if imaginary {
                    Number::Complex(Complex::imaginary(value))
                } else {
                    Number::Float(value)
                })
            }
            Numeral::ImaginaryInt { digits } => {
                let magnitude = parse_int(digits, 10);
                let im = magnitude.to_f64().unwrap_or(f64::INFINITY);
                Ok(Number::Complex(Complex::imaginary(im)))
            }
            Numeral::Int {
                radix,
                digits,
                digits_range,
                long_suffix,
            } => {
                if radix == Radix::LegacyOctal {
                    check_legacy_octal(digits, digits_range, version)?;
                }
                if let Some(suffix) = long_suffix
                    && version.forbids_long_suffix()
                {
                    return Err(LexError::DeprecatedLongIntegerSuffix { location: suffix });
                }
                Ok(Number::Int(parse_int(digits, radix.base())))
            }
        }
    }
}

/// `017` is octal in Python 2 and a syntax error in Python 3.  A lone `0` is
/// fine everywhere.
fn check_legacy_octal(digits: &str, range: Range, version: Version) -> Result<(), LexError> {
    if digits.len() <= 1 {
        return Ok(());
    }
    if version.forbids_bare_octal() {
        return Err(LexError::InvalidLeadingZeroDecimal {
            location: Range::new(range.begin, range.begin + 1),
        });
    }
    if let Some((i, digit)) = digits.char_indices().find(|(_, c)| matches!(c, '8' | '9')) {
        return Err(LexError::InvalidOctalDigit {
            digit,
            location: Range::new(range.begin + i, range.begin + i + 1),
        });
    }
    Ok(())
}

fn parse_int(digits: &str, radix: u32) -> BigInt {
    BigInt::parse_bytes(digits.as_bytes(), radix).expect("pattern only admits digits of the radix")
}

fn parse_float(text: &str) -> f64 {
    text.parse()
        .expect("pattern only admits well-formed decimal floats")
}
