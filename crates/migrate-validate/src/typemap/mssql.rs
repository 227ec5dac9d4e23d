//! SQL Server native types to canonical mapping.

use crate::core::schema::{CanonicalType, TypeFamily};

pub(super) fn map_type(
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    let lower = native.trim().to_lowercase();
    // max-length types report length -1 in the catalog.
    let length = length.filter(|l| *l >= 0);

    match lower.as_str() {
        "tinyint" | "smallint" | "int" | "bigint" => {
            CanonicalType::new(TypeFamily::Integer, native)
        }
        "decimal" | "numeric" => {
            CanonicalType::new(TypeFamily::Decimal, native).with_precision(precision, scale)
        }
        "money" => CanonicalType::new(TypeFamily::Decimal, native).with_precision(Some(19), Some(4)),
        "smallmoney" => {
            CanonicalType::new(TypeFamily::Decimal, native).with_precision(Some(10), Some(4))
        }
        "float" | "real" => CanonicalType::new(TypeFamily::Float, native),
        "varchar" | "nvarchar" | "text" | "ntext" | "xml" => {
            CanonicalType::new(TypeFamily::String, native).with_length(length)
        }
        "char" | "nchar" => CanonicalType::new(TypeFamily::FixedString, native).with_length(length),
        "date" => CanonicalType::new(TypeFamily::Date, native),
        "datetime" | "datetime2" | "smalldatetime" | "datetimeoffset" => {
            CanonicalType::new(TypeFamily::Timestamp, native)
        }
        "binary" | "varbinary" | "image" | "rowversion" | "timestamp" => {
            CanonicalType::new(TypeFamily::Binary, native).with_length(length)
        }
        "bit" => CanonicalType::new(TypeFamily::Boolean, native),
        _ => CanonicalType::new(TypeFamily::Other, native),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixed_precision() {
        let ty = map_type("money", None, None, None);
        assert_eq!((ty.family, ty.precision, ty.scale), (TypeFamily::Decimal, Some(19), Some(4)));
        let ty = map_type("smallmoney", None, None, None);
        assert_eq!((ty.precision, ty.scale), (Some(10), Some(4)));
    }

    #[test]
    fn test_nvarchar_max_drops_length() {
        let ty = map_type("nvarchar", None, None, Some(-1));
        assert_eq!(ty.family, TypeFamily::String);
        assert_eq!(ty.length, None);
    }

    #[test]
    fn test_bit_is_boolean() {
        assert_eq!(map_type("bit", None, None, None).family, TypeFamily::Boolean);
    }

    #[test]
    fn test_sqlserver_timestamp_is_binary() {
        // T-SQL "timestamp" is a row version, not a point in time.
        assert_eq!(map_type("timestamp", None, None, None).family, TypeFamily::Binary);
        assert_eq!(map_type("datetime2", None, None, None).family, TypeFamily::Timestamp);
    }
}
