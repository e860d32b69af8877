//! Variable substitution for prompt bodies.
//!
//! Prompt templates carry placeholders of the exact literal form
//! `[field_name]`. Substitution replaces every occurrence of a known
//! field's placeholder with that field's current value and leaves unknown
//! placeholders untouched.

/// Project field names usable as `[placeholder]` tokens in prompt bodies.
///
/// Values for optional project fields substitute as the empty string;
/// `competitors` substitutes as the list joined with `", "`.
pub const FIELD_COMPANY_NAME: &str = "company_name";
pub const FIELD_INDUSTRY: &str = "industry";
pub const FIELD_TARGET_MARKET: &str = "target_market";
pub const FIELD_MAIN_PRODUCT_SERVICE: &str = "main_product_service";
pub const FIELD_COMPETITORS: &str = "competitors";
pub const FIELD_BUDGET_RANGE: &str = "budget_range";

/// Replace every `[field_name]` placeholder in `text` with the matching
/// field value.
///
/// Matching is literal, case-sensitive, and whole-placeholder: field names
/// and values are never interpreted as regex. Placeholders with no
/// matching field are left verbatim. Pure and idempotent as long as field
/// values do not themselves contain placeholder syntax.
pub fn substitute(text: &str, fields: &[(&str, String)]) -> String {
    let mut result = text.to_string();
    for (name, value) in fields {
        let placeholder = format!("[{name}]");
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn replaces_known_placeholders() {
        let out = substitute(
            "Research [company_name] in the [industry] sector",
            &fields(&[("company_name", "Acme"), ("industry", "Tech")]),
        );
        assert_eq!(out, "Research Acme in the Tech sector");
    }

    #[test]
    fn unknown_placeholders_left_verbatim() {
        let out = substitute("[industry] in [unknownX]", &fields(&[("industry", "Tech")]));
        assert_eq!(out, "Tech in [unknownX]");
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = substitute(
            "[industry], again [industry]",
            &fields(&[("industry", "Retail")]),
        );
        assert_eq!(out, "Retail, again Retail");
    }

    #[test]
    fn empty_value_erases_placeholder() {
        let out = substitute("budget: [budget_range].", &fields(&[("budget_range", "")]));
        assert_eq!(out, "budget: .");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let out = substitute("[Industry]", &fields(&[("industry", "Tech")]));
        assert_eq!(out, "[Industry]");
    }

    #[test]
    fn regex_metacharacters_in_values_are_inert() {
        let out = substitute(
            "[competitors] compete",
            &fields(&[("competitors", "A.*, (B), [C]")]),
        );
        assert_eq!(out, "A.*, (B), [C] compete");
    }

    #[test]
    fn idempotent_for_placeholder_free_values() {
        let f = fields(&[("company_name", "Acme"), ("industry", "Tech")]);
        let once = substitute("[company_name] / [industry]", &f);
        let twice = substitute(&once, &f);
        assert_eq!(once, twice);
    }

    #[test]
    fn text_without_placeholders_unchanged() {
        let f = fields(&[("industry", "Tech")]);
        assert_eq!(substitute("no tokens here", &f), "no tokens here");
    }
}
