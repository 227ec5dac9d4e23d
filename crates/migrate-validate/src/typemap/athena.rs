//! Amazon Athena (Trino/Hive) native types to canonical mapping.
//!
//! Athena has no information_schema attribute columns for precision or
//! length; everything rides inside the type string itself, e.g.
//! `decimal(10,2)` or `varchar(65535)`.

use super::split_type_args;
use crate::core::schema::{CanonicalType, TypeFamily};

pub(super) fn map_type(
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    let (base, arg1, arg2) = split_type_args(native);
    let precision = precision.or(arg1);
    let scale = scale.or(arg2);
    let length = length.or(arg1);

    match base.as_str() {
        "tinyint" | "smallint" | "int" | "integer" | "bigint" => {
            CanonicalType::new(TypeFamily::Integer, native)
        }
        "decimal" => CanonicalType::new(TypeFamily::Decimal, native).with_precision(precision, scale),
        "float" | "real" | "double" => CanonicalType::new(TypeFamily::Float, native),
        "string" | "varchar" => CanonicalType::new(TypeFamily::String, native).with_length(length),
        "char" => CanonicalType::new(TypeFamily::FixedString, native).with_length(length),
        "date" => CanonicalType::new(TypeFamily::Date, native),
        "timestamp" => CanonicalType::new(TypeFamily::Timestamp, native),
        "binary" | "varbinary" => CanonicalType::new(TypeFamily::Binary, native),
        "boolean" => CanonicalType::new(TypeFamily::Boolean, native),
        // array<...>, map<...>, struct<...> and friends.
        _ => CanonicalType::new(TypeFamily::Other, native),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_decimal_args() {
        let ty = map_type("decimal(10,2)", None, None, None);
        assert_eq!((ty.family, ty.precision, ty.scale), (TypeFamily::Decimal, Some(10), Some(2)));
    }

    #[test]
    fn test_varchar_embedded_length() {
        let ty = map_type("varchar(65535)", None, None, None);
        assert_eq!((ty.family, ty.length), (TypeFamily::String, Some(65535)));
    }

    #[test]
    fn test_bare_string() {
        let ty = map_type("string", None, None, None);
        assert_eq!((ty.family, ty.length), (TypeFamily::String, None));
    }

    #[test]
    fn test_complex_types_are_other() {
        assert_eq!(map_type("array<string>", None, None, None).family, TypeFamily::Other);
        assert_eq!(map_type("map<string,int>", None, None, None).family, TypeFamily::Other);
    }
}
