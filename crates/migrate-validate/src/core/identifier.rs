//! Centralized identifier folding and expression normalization.
//!
//! Identifier comparison between engines is case-insensitive by default:
//! unquoted identifiers fold to upper case in Oracle and to lower case in
//! PostgreSQL, so neither side's casing can be trusted as-is. All identifiers
//! are folded to a single canonical form (upper case) before they are used as
//! comparison keys. Case-sensitive mode keeps the reported casing untouched.

/// Fold an identifier to its canonical comparison form.
pub fn fold_ident(name: &str, case_sensitive: bool) -> String {
    let trimmed = name.trim();
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// Build a qualified `schema.name` identifier for reports.
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", schema, name)
}

/// Normalize an expression (default value, check clause) for comparison:
/// trim, collapse whitespace runs, strip balanced outer parentheses, and
/// fold case. Engines pad and parenthesize these differently.
pub fn normalize_expr(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut last_space = false;
    for ch in expr.trim().chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch.to_ascii_uppercase());
            last_space = false;
        }
    }
    strip_outer_parens(out.trim())
}

/// Remove outer parentheses only when they wrap the whole expression.
fn strip_outer_parens(expr: &str) -> String {
    let mut current = expr.trim();
    while current.starts_with('(') && current.ends_with(')') && wraps_whole(current) {
        current = current[1..current.len() - 1].trim();
    }
    current.to_string()
}

fn wraps_whole(expr: &str) -> bool {
    let mut depth = 0i32;
    for (i, ch) in expr.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                // Closed the first paren before the end: not a full wrap.
                if depth == 0 && i + 1 < expr.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
