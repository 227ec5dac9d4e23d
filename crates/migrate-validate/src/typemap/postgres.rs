//! PostgreSQL native types to canonical mapping.

use crate::core::schema::{CanonicalType, TypeFamily};

pub(super) fn map_type(
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    let lower = native.trim().to_lowercase();

    match lower.as_str() {
        "smallint" | "int2" | "integer" | "int" | "int4" | "bigint" | "int8" | "serial"
        | "bigserial" | "smallserial" => CanonicalType::new(TypeFamily::Integer, native),
        "numeric" | "decimal" => {
            CanonicalType::new(TypeFamily::Decimal, native).with_precision(precision, scale)
        }
        "real" | "float4" | "double precision" | "float8" => {
            CanonicalType::new(TypeFamily::Float, native)
        }
        "character varying" | "varchar" | "text" | "citext" | "name" => {
            CanonicalType::new(TypeFamily::String, native).with_length(length)
        }
        "character" | "char" | "bpchar" => {
            CanonicalType::new(TypeFamily::FixedString, native).with_length(length)
        }
        "date" => CanonicalType::new(TypeFamily::Date, native),
        "bytea" => CanonicalType::new(TypeFamily::Binary, native),
        "boolean" | "bool" => CanonicalType::new(TypeFamily::Boolean, native),
        s if s.starts_with("timestamp") => CanonicalType::new(TypeFamily::Timestamp, native),
        // time-of-day has no canonical family; uuid, json, arrays etc.
        // likewise fall through.
        _ => CanonicalType::new(TypeFamily::Other, native),
    }
}
