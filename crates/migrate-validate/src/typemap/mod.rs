//! Canonical type mapping for each supported engine.
//!
//! One lookup table per engine, dispatched by [`EngineKind`]. Mapping is a
//! pure, total function: any native type name the table does not recognize
//! maps to [`TypeFamily::Other`] with the original string retained, never an
//! error. The compatibility rule consumed by the column validator also
//! lives here.

mod athena;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod redshift;

use crate::connector::EngineKind;
use crate::core::schema::{CanonicalType, TypeFamily};

/// Map an engine's native type to its canonical descriptor.
pub fn map_type(
    engine: EngineKind,
    native: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    length: Option<i32>,
) -> CanonicalType {
    match engine {
        EngineKind::Oracle => oracle::map_type(native, precision, scale, length),
        EngineKind::Postgres => postgres::map_type(native, precision, scale, length),
        EngineKind::Mssql => mssql::map_type(native, precision, scale, length),
        EngineKind::Mysql => mysql::map_type(native, precision, scale, length),
        EngineKind::Redshift => redshift::map_type(native, precision, scale, length),
        EngineKind::Athena => athena::map_type(native, precision, scale, length),
    }
}

/// Outcome of comparing two canonical types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCompat {
    /// Families match and all comparable attributes agree.
    Compatible,
    /// Families match but string/binary lengths differ. Reported as a
    /// warning: engines pad and encode lengths differently.
    LengthDiffers,
    /// Families differ, or decimal precision/scale disagree beyond the
    /// configured tolerance.
    Incompatible,
}

/// Compare two canonical types for migration compatibility.
///
/// Decimal precision and scale are compared only when both sides report
/// them; a side without precision is an unconstrained numeric and cannot
/// be evaluated, so it degrades to compatible rather than raising.
pub fn type_compat(
    source: &CanonicalType,
    target: &CanonicalType,
    decimal_tolerance: i32,
) -> TypeCompat {
    if source.family != target.family {
        return TypeCompat::Incompatible;
    }

    match source.family {
        TypeFamily::Decimal => {
            let within = |a: Option<i32>, b: Option<i32>| match (a, b) {
                (Some(a), Some(b)) => (a - b).abs() <= decimal_tolerance,
                _ => true,
            };
            if within(source.precision, target.precision) && within(source.scale, target.scale) {
                TypeCompat::Compatible
            } else {
                TypeCompat::Incompatible
            }
        }
        TypeFamily::String | TypeFamily::FixedString | TypeFamily::Binary => {
            match (source.length, target.length) {
                (Some(a), Some(b)) if a != b => TypeCompat::LengthDiffers,
                _ => TypeCompat::Compatible,
            }
        }
        _ => TypeCompat::Compatible,
    }
}

/// Split a native type name like `decimal(10,2)` or `varchar(255)` into its
/// base name and parenthesized integer arguments. Engines that report type
/// parameters inline (Athena, some MySQL catalogs) need this; the rest see
/// the arguments through separate catalog columns.
pub(crate) fn split_type_args(native: &str) -> (String, Option<i32>, Option<i32>) {
    let lower = native.trim().to_lowercase();
    let Some(open) = lower.find('(') else {
        return (lower, None, None);
    };
    let base = lower[..open].trim().to_string();
    let args = lower[open + 1..].trim_end_matches(')');
    let mut parts = args.splitn(2, ',');
    let first = parts.next().and_then(|p| p.trim().parse::<i32>().ok());
    let second = parts.next().and_then(|p| p.trim().parse::<i32>().ok());
    (base, first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total() {
        // Unknown types never fail, for any engine.
        for engine in [
            EngineKind::Oracle,
            EngineKind::Postgres,
            EngineKind::Mssql,
            EngineKind::Mysql,
            EngineKind::Redshift,
            EngineKind::Athena,
        ] {
            let ty = map_type(engine, "no_such_type", None, None, None);
            assert_eq!(ty.family, TypeFamily::Other, "engine {}", engine);
            assert_eq!(ty.native, "no_such_type");

            let ty = map_type(engine, "", Some(-1), Some(99), Some(0));
            assert_eq!(ty.family, TypeFamily::Other);
        }
    }

    #[test]
    fn test_oracle_number_vs_postgres_numeric() {
        // The cross-engine scenario the whole mapper exists for:
        // NUMBER(10,2) and NUMERIC(10,2) land on the same canonical type.
        let oracle = map_type(EngineKind::Oracle, "NUMBER", Some(10), Some(2), None);
        let pg = map_type(EngineKind::Postgres, "numeric", Some(10), Some(2), None);
        assert_eq!(oracle.family, TypeFamily::Decimal);
        assert_eq!(pg.family, TypeFamily::Decimal);
        assert_eq!(
            type_compat(&oracle, &pg, 0),
            TypeCompat::Compatible
        );
    }

    #[test]
    fn test_compat_family_mismatch() {
        let a = map_type(EngineKind::Postgres, "integer", None, None, None);
        let b = map_type(EngineKind::Postgres, "text", None, None, None);
        assert_eq!(type_compat(&a, &b, 0), TypeCompat::Incompatible);
    }

    #[test]
    fn test_compat_decimal_tolerance() {
        let a = map_type(EngineKind::Postgres, "numeric", Some(10), Some(2), None);
        let b = map_type(EngineKind::Postgres, "numeric", Some(12), Some(2), None);
        assert_eq!(type_compat(&a, &b, 0), TypeCompat::Incompatible);
        assert_eq!(type_compat(&a, &b, 2), TypeCompat::Compatible);
    }

    #[test]
    fn test_compat_decimal_unconstrained_degrades() {
        let a = map_type(EngineKind::Oracle, "NUMBER", None, None, None);
        let b = map_type(EngineKind::Postgres, "numeric", Some(10), Some(2), None);
        assert_eq!(type_compat(&a, &b, 0), TypeCompat::Compatible);
    }

    #[test]
    fn test_compat_string_length_is_warning_grade() {
        let a = map_type(EngineKind::Oracle, "VARCHAR2", None, None, Some(100));
        let b = map_type(EngineKind::Postgres, "varchar", None, None, Some(200));
        assert_eq!(type_compat(&a, &b, 0), TypeCompat::LengthDiffers);
    }

    #[test]
    fn test_split_type_args() {
        assert_eq!(split_type_args("decimal(10,2)"), ("decimal".into(), Some(10), Some(2)));
        assert_eq!(split_type_args("varchar(255)"), ("varchar".into(), Some(255), None));
        assert_eq!(split_type_args("string"), ("string".into(), None, None));
        assert_eq!(split_type_args("array(int)"), ("array".into(), None, None));
    }
}
