//! Tag post-processing.
//!
//! Generator output embeds dialect-conditional fragments as tag regions of
//! the form `/*<LABEL>/payload/*/` with LABEL one of `JS`, `TS`, `ES`.
//! Resolution is a dedicated scanner pass, not pattern matching; nesting is
//! not supported (a payload must not contain the closing delimiter).
//!
//! Resolving for a target is two steps in a fixed order: first regions whose
//! label matches the target (plus `ES`, which belongs to both) are replaced
//! by their payload, then a sweep deletes every region that is still tagged.
//! Resolving first is what lets `ES` fragments survive for both targets
//! before the sweep removes the leftovers.

use crate::transpiler::Target;

const OPEN: &str = "/*<";
const CLOSE: &str = "/*/";

/// Fully resolve tagged text for a target dialect.
pub fn resolve(text: &str, target: Target) -> String {
    let keep: &[&str] = match target {
        Target::Js => &["JS", "ES"],
        Target::Ts => &["TS", "ES"],
    };
    let resolved = rewrite(text, keep, false);
    rewrite(&resolved, &[], true)
}

/// Partial resolve used by plain transpilation: `ES` regions are replaced
/// by their payload, dialect-specific regions are left in place.
pub(crate) fn resolve_es(text: &str) -> String {
    rewrite(text, &["ES"], false)
}

/// One scanner pass over the text.
///
/// Regions whose label is in `keep` become their payload. Other regions are
/// copied verbatim, or deleted when `drop_others` is set. Malformed regions
/// (bad label, missing delimiter) are treated as plain text.
fn rewrite(text: &str, keep: &[&str], drop_others: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open_at) = rest.find(OPEN) {
        out.push_str(&rest[..open_at]);
        let region = &rest[open_at..];

        match scan_region(region) {
            Some((label, payload, len)) => {
                if keep.contains(&label) {
                    out.push_str(payload);
                } else if !drop_others {
                    out.push_str(&region[..len]);
                }
                rest = &region[len..];
            }
            None => {
                // Not a tag region; emit the opener and keep scanning
                out.push_str(OPEN);
                rest = &region[OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Scan one region starting at `/*<`. Returns (label, payload, total length).
fn scan_region(region: &str) -> Option<(&str, &str, usize)> {
    let after_open = &region[OPEN.len()..];
    let label_end = after_open.find('>')?;
    let label = &after_open[..label_end];
    if !matches!(label, "JS" | "TS" | "ES") {
        return None;
    }

    let after_label = &after_open[label_end + 1..];
    if !after_label.starts_with('/') {
        return None;
    }
    let payload_region = &after_label[1..];
    let payload_end = payload_region.find(CLOSE)?;
    let payload = &payload_region[..payload_end];

    let len = OPEN.len() + label_end + 1 + 1 + payload_end + CLOSE.len();
    Some((label, payload, len))
}
