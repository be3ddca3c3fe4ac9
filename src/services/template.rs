//! Scoped-variable template expansion.
//!
//! Per-target coordinate overrides may reference host template variables
//! (`$lat`, `${lat}`). Expansion is purely request-local: the host supplies
//! the scoped-variable set with each query and unknown variables are left
//! untouched.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::ScopedVar;

// Braced form first so "${lat}" is not consumed as "$" + "{lat}".
static VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("variable pattern is valid"));

/// Substitute every `$name`/`${name}` occurrence in `input` with the value
/// of the matching scoped variable. Unknown variables are left as-is.
pub fn expand(input: &str, scoped_vars: &HashMap<String, ScopedVar>) -> String {
    VAR_PATTERN
        .replace_all(input, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match scoped_vars.get(name) {
                Some(var) => var.value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, &str)]) -> HashMap<String, ScopedVar> {
        entries
            .iter()
            .map(|&(name, value)| {
                (
                    name.to_string(),
                    ScopedVar {
                        text: value.to_string(),
                        value: value.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_plain_variable() {
        let scoped = vars(&[("lat", "48.1")]);
        assert_eq!(expand("$lat", &scoped), "48.1");
    }

    #[test]
    fn test_braced_variable() {
        let scoped = vars(&[("lat", "48.1")]);
        assert_eq!(expand("${lat}", &scoped), "48.1");
    }

    #[test]
    fn test_unknown_variable_left_untouched() {
        let scoped = vars(&[("lat", "48.1")]);
        assert_eq!(expand("$lon", &scoped), "$lon");
        assert_eq!(expand("${lon}", &scoped), "${lon}");
    }

    #[test]
    fn test_multiple_occurrences() {
        let scoped = vars(&[("a", "1"), ("b", "2")]);
        assert_eq!(expand("$a,${b},$a", &scoped), "1,2,1");
    }

    #[test]
    fn test_literal_text_passes_through() {
        assert_eq!(expand("51.4769", &HashMap::new()), "51.4769");
        assert_eq!(expand("", &HashMap::new()), "");
    }
}
