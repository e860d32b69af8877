//! Previous-output splicing for phase 2 and phase 3 prompt bodies.
//!
//! Phase 2/3 template bodies carry a designated paste zone delimited by a
//! fixed start-marker line and end-marker line. At execution time the
//! whole delimited region (markers included) is replaced by a canonical
//! block that re-emits an instructional header, the previous phase's raw
//! output, and a closing marker.

use std::sync::LazyLock;

use regex::Regex;

/// Line prefix opening a paste zone in a phase 2/3 prompt body.
pub const PASTE_ZONE_START: &str = "### ▼▼▼";

/// Line prefix closing a paste zone.
pub const PASTE_ZONE_END: &str = "### ▲▲▲";

/// Matches the first paste zone, markers included. `(?s)` so the zone may
/// span lines; non-greedy so only the first delimited region is taken.
static PASTE_ZONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)### ▼▼▼.*?### ▲▲▲").expect("valid regex"));

/// Returns `true` if `body` contains a complete paste zone.
pub fn has_paste_zone(body: &str) -> bool {
    PASTE_ZONE_RE.is_match(body)
}

/// Splice the previous phase's output into the paste zone of `body`.
///
/// Applies only when `phase > 1` and `previous_output` is non-empty;
/// otherwise returns `body` unchanged. When no paste zone is present this
/// is a silent no-op — template validation at authoring time is expected
/// to have flagged the missing zone (see [`crate::prompt`]).
///
/// The previous output is carried verbatim: multi-line content is neither
/// truncated, re-escaped, nor whitespace-normalized.
pub fn splice_previous_output(body: &str, phase: i32, previous_output: &str) -> String {
    if phase <= 1 || previous_output.is_empty() {
        return body.to_string();
    }

    let Some(zone) = PASTE_ZONE_RE.find(body) else {
        return body.to_string();
    };

    let block = format!(
        "{PASTE_ZONE_START} Report generated in phase {} ▼▼▼\n\n{previous_output}\n\n{PASTE_ZONE_END} End of pasted report ▲▲▲",
        phase - 1
    );

    let mut result = String::with_capacity(body.len() + previous_output.len());
    result.push_str(&body[..zone.start()]);
    result.push_str(&block);
    result.push_str(&body[zone.end()..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Intro text.\n\n### ▼▼▼ Paste the phase 1 report here ▼▼▼\n(placeholder)\n### ▲▲▲ End ▲▲▲\n\nOutro text.";

    #[test]
    fn phase_one_is_untouched() {
        assert_eq!(splice_previous_output(BODY, 1, "output"), BODY);
    }

    #[test]
    fn empty_previous_output_is_untouched() {
        assert_eq!(splice_previous_output(BODY, 2, ""), BODY);
    }

    #[test]
    fn body_without_markers_unchanged() {
        let body = "No paste zone in here at all.";
        assert_eq!(splice_previous_output(body, 2, "report"), body);
    }

    #[test]
    fn replaces_exactly_the_delimited_region() {
        let out = splice_previous_output(BODY, 2, "PHASE ONE REPORT");
        assert!(out.starts_with("Intro text.\n\n"));
        assert!(out.ends_with("\n\nOutro text."));
        assert!(out.contains("Report generated in phase 1"));
        assert!(out.contains("\n\nPHASE ONE REPORT\n\n"));
        assert!(!out.contains("(placeholder)"));
    }

    #[test]
    fn multiline_output_carried_verbatim() {
        let report = "line one\n\n  indented\nline three";
        let out = splice_previous_output(BODY, 3, report);
        assert!(out.contains(report));
        assert!(out.contains("Report generated in phase 2"));
    }

    #[test]
    fn only_first_zone_is_replaced() {
        let body = format!("{BODY}\n\n### ▼▼▼ second zone ▼▼▼\nx\n### ▲▲▲ ▲▲▲");
        let out = splice_previous_output(&body, 2, "R");
        assert!(out.contains("second zone"));
        assert!(!out.contains("(placeholder)"));
    }

    #[test]
    fn detects_paste_zone_presence() {
        assert!(has_paste_zone(BODY));
        assert!(!has_paste_zone("plain body"));
        // Start marker alone is not a zone.
        assert!(!has_paste_zone("### ▼▼▼ dangling"));
    }
}
