//! Oracle native types to canonical mapping.

use crate::core::schema::{CanonicalType, TypeFamily};

pub(super) fn map_type(
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    let lower = native.trim().to_lowercase();

    match lower.as_str() {
        "number" => match (precision, scale) {
            // NUMBER(p,0) with small p is an integer in practice.
            (Some(p), Some(0)) if p <= 9 => {
                CanonicalType::new(TypeFamily::Integer, native)
            }
            (Some(p), Some(0)) => {
                CanonicalType::new(TypeFamily::Decimal, native).with_precision(Some(p), Some(0))
            }
            _ => CanonicalType::new(TypeFamily::Decimal, native).with_precision(precision, scale),
        },
        "integer" | "int" | "smallint" => CanonicalType::new(TypeFamily::Integer, native),
        "binary_float" | "binary_double" | "float" | "real" => {
            CanonicalType::new(TypeFamily::Float, native)
        }
        "varchar2" | "nvarchar2" | "varchar" | "long" => {
            CanonicalType::new(TypeFamily::String, native).with_length(length)
        }
        "clob" | "nclob" => CanonicalType::new(TypeFamily::String, native),
        "char" | "nchar" => CanonicalType::new(TypeFamily::FixedString, native).with_length(length),
        // Oracle DATE carries a time component, so it is a timestamp.
        "date" => CanonicalType::new(TypeFamily::Timestamp, native),
        s if s.starts_with("timestamp") => CanonicalType::new(TypeFamily::Timestamp, native),
        s if s.starts_with("interval") => CanonicalType::new(TypeFamily::Other, native),
        "blob" | "raw" | "long raw" | "bfile" => {
            CanonicalType::new(TypeFamily::Binary, native).with_length(length)
        }
        "boolean" => CanonicalType::new(TypeFamily::Boolean, native),
        _ => CanonicalType::new(TypeFamily::Other, native),
    }
}
