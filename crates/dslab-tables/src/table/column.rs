//! Table columns, cell values and their formatting.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::TableError;

/// Largest number of decimals accepted in `%.Nf` formats.
pub const MAX_PRECISION: usize = 64;

/// A single value stored in a table row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl CellValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::UInt(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::UInt(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        CellValue::UInt(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::UInt(v as u64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

/// Print format of column values, parsed from printf-like strings (`%d`, `%.2f`, `%s`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellFormat {
    /// Value is printed as is.
    #[default]
    Default,
    /// Numbers are printed as integers, fractional part is truncated.
    Integer,
    /// Numbers are printed with fixed number of decimals. The shortest decimal form of the value
    /// is rounded half away from zero, so `1.005` with two decimals is printed as `1.01`.
    Fixed(usize),
    /// Value is printed as text.
    Text,
}

impl CellFormat {
    /// Formats value according to this format.
    /// Text values are never converted and are printed as is.
    pub fn apply(&self, value: &CellValue) -> String {
        match (self, value.as_f64()) {
            (CellFormat::Integer, Some(v)) => match value {
                CellValue::Int(_) | CellValue::UInt(_) => value.to_string(),
                _ => format!("{}", v.trunc() as i64),
            },
            (CellFormat::Fixed(precision), Some(v)) => match value {
                CellValue::Float(_) if !v.is_finite() => value.to_string(),
                _ => round_decimal(&value.to_string(), *precision),
            },
            _ => value.to_string(),
        }
    }
}

/// Rounds a plain decimal number (`-12.345`, no exponent) to `precision` decimals, half away from zero.
fn round_decimal(number: &str, precision: usize) -> String {
    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut kept: Vec<u8> = int_part.bytes().collect();
    let frac = frac_part.as_bytes();
    kept.extend((0..precision).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(precision).map_or(false, |d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let int_len = kept.len() - precision;
    let mut result = String::with_capacity(kept.len() + 2);
    if negative {
        result.push('-');
    }
    result.push_str(&String::from_utf8_lossy(&kept[..int_len]));
    if precision > 0 {
        result.push('.');
        result.push_str(&String::from_utf8_lossy(&kept[int_len..]));
    }
    result
}

impl FromStr for CellFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(CellFormat::Default),
            "%d" => Ok(CellFormat::Integer),
            "%s" => Ok(CellFormat::Text),
            "%f" => Ok(CellFormat::Fixed(6)),
            _ => s
                .strip_prefix("%.")
                .and_then(|rest| rest.strip_suffix('f'))
                .and_then(|precision| precision.parse::<usize>().ok())
                .filter(|precision| *precision <= MAX_PRECISION)
                .map(CellFormat::Fixed)
                .ok_or_else(|| TableError::InvalidFormat(s.to_string())),
        }
    }
}

/// Column of a table: title, optional subtitle (e.g. unit of measurement) and print format.
#[derive(Clone, Debug, PartialEq)]
pub struct TableColumn {
    pub title: String,
    pub subtitle: Option<String>,
    pub format: CellFormat,
}

impl TableColumn {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            format: CellFormat::Default,
        }
    }

    pub fn set_subtitle(&mut self, subtitle: &str) -> &mut Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn set_format(&mut self, format: CellFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("")
    }

    pub fn format(&self, value: &CellValue) -> String {
        self.format.apply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("%d".parse::<CellFormat>().unwrap(), CellFormat::Integer);
        assert_eq!("%.0f".parse::<CellFormat>().unwrap(), CellFormat::Fixed(0));
        assert_eq!("%.3f".parse::<CellFormat>().unwrap(), CellFormat::Fixed(3));
        assert_eq!("%f".parse::<CellFormat>().unwrap(), CellFormat::Fixed(6));
        assert_eq!("".parse::<CellFormat>().unwrap(), CellFormat::Default);
        assert!(matches!("%x".parse::<CellFormat>(), Err(TableError::InvalidFormat(_))));
        assert!(matches!("%.af".parse::<CellFormat>(), Err(TableError::InvalidFormat(_))));
        assert_eq!("%.64f".parse::<CellFormat>().unwrap(), CellFormat::Fixed(MAX_PRECISION));
        assert!(matches!("%.65f".parse::<CellFormat>(), Err(TableError::InvalidFormat(_))));
        assert!(matches!("%.400f".parse::<CellFormat>(), Err(TableError::InvalidFormat(_))));
    }

    #[test]
    fn test_integer_format_truncates() {
        assert_eq!(CellFormat::Integer.apply(&CellValue::Float(10.9)), "10");
        assert_eq!(CellFormat::Integer.apply(&CellValue::Float(-2.7)), "-2");
        assert_eq!(CellFormat::Integer.apply(&CellValue::UInt(42)), "42");
        assert_eq!(CellFormat::Integer.apply(&CellValue::from("n/a")), "n/a");
    }

    #[test]
    fn test_fixed_format_rounds_half_up() {
        assert_eq!(CellFormat::Fixed(0).apply(&CellValue::Float(10.5)), "11");
        assert_eq!(CellFormat::Fixed(0).apply(&CellValue::Float(10.4)), "10");
        assert_eq!(CellFormat::Fixed(2).apply(&CellValue::Float(1.0)), "1.00");
        assert_eq!(CellFormat::Fixed(1).apply(&CellValue::Int(3)), "3.0");
        assert_eq!(CellFormat::Fixed(2).apply(&CellValue::Float(1.005)), "1.01");
        assert_eq!(CellFormat::Fixed(2).apply(&CellValue::Float(0.995)), "1.00");
        assert_eq!(CellFormat::Fixed(1).apply(&CellValue::Float(9.96)), "10.0");
        assert_eq!(CellFormat::Fixed(0).apply(&CellValue::Float(-2.5)), "-3");
        assert_eq!(CellFormat::Fixed(3).apply(&CellValue::Float(0.0001)), "0.000");
    }

    #[test]
    fn test_fixed_format_extreme_values() {
        let huge = CellFormat::Fixed(6).apply(&CellValue::Float(1e305));
        assert_eq!(huge, format!("1{}.000000", "0".repeat(305)));

        let wide = CellFormat::Fixed(400).apply(&CellValue::Float(1.5));
        assert_eq!(wide, format!("1.5{}", "0".repeat(399)));

        assert_eq!(
            CellFormat::Fixed(2).apply(&CellValue::UInt(u64::MAX)),
            format!("{}.00", u64::MAX)
        );
        assert_eq!(CellFormat::Fixed(2).apply(&CellValue::Float(f64::INFINITY)), "inf");
        assert_eq!(CellFormat::Fixed(2).apply(&CellValue::Float(f64::NAN)), "NaN");
    }

    #[test]
    fn test_default_format() {
        assert_eq!(CellFormat::Default.apply(&CellValue::Float(10.5)), "10.5");
        assert_eq!(CellFormat::Default.apply(&CellValue::Int(-1)), "-1");
        assert_eq!(CellFormat::Text.apply(&CellValue::from("SUCCESS")), "SUCCESS");
    }

    #[test]
    fn test_column_setters_chain() {
        let mut column = TableColumn::new("StartTime");
        column.set_format(CellFormat::Integer).set_subtitle("Seconds");
        assert_eq!(column.subtitle(), "Seconds");
        assert_eq!(column.format, CellFormat::Integer);
        assert_eq!(TableColumn::new("Status").subtitle(), "");
    }
}
