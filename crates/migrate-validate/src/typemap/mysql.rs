//! MySQL / MariaDB native types to canonical mapping.

use super::split_type_args;
use crate::core::schema::{CanonicalType, TypeFamily};

pub(super) fn map_type(
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    // MySQL catalogs often report the full column type, e.g. "int(11)" or
    // "decimal(10,2)". Prefer explicit catalog attributes over inline args.
    let (base, arg1, arg2) = split_type_args(native);
    let precision = precision.or(arg1);
    let scale = scale.or(arg2);
    let length = length.or(arg1);

    match base.as_str() {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "year" => {
            CanonicalType::new(TypeFamily::Integer, native)
        }
        "decimal" | "numeric" => {
            CanonicalType::new(TypeFamily::Decimal, native).with_precision(precision, scale)
        }
        "float" | "double" | "real" => CanonicalType::new(TypeFamily::Float, native),
        "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum" | "set"
        | "json" => CanonicalType::new(TypeFamily::String, native).with_length(length),
        "char" => CanonicalType::new(TypeFamily::FixedString, native).with_length(length),
        "date" => CanonicalType::new(TypeFamily::Date, native),
        "datetime" | "timestamp" => CanonicalType::new(TypeFamily::Timestamp, native),
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "bit" => {
            CanonicalType::new(TypeFamily::Binary, native).with_length(length)
        }
        "boolean" | "bool" => CanonicalType::new(TypeFamily::Boolean, native),
        _ => CanonicalType::new(TypeFamily::Other, native),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_args_parsed() {
        let ty = map_type("decimal(10,2)", None, None, None);
        assert_eq!((ty.family, ty.precision, ty.scale), (TypeFamily::Decimal, Some(10), Some(2)));
        let ty = map_type("varchar(255)", None, None, None);
        assert_eq!((ty.family, ty.length), (TypeFamily::String, Some(255)));
    }

    #[test]
    fn test_catalog_attributes_win() {
        let ty = map_type("decimal(10,2)", Some(12), Some(4), None);
        assert_eq!((ty.precision, ty.scale), (Some(12), Some(4)));
    }

    #[test]
    fn test_tinyint_is_integer() {
        // tinyint(1) is conventionally boolean but the catalog cannot
        // distinguish it, so it stays an integer.
        assert_eq!(map_type("tinyint(1)", None, None, None).family, TypeFamily::Integer);
    }

    #[test]
    fn test_text_variants() {
        for name in ["tinytext", "text", "mediumtext", "longtext"] {
            assert_eq!(map_type(name, None, None, None).family, TypeFamily::String);
        }
    }
}
