//! Variant expansion
//!
//! Generates the surface strings that should be recognized for one phrase:
//! English inflections of the last token, joined with both the space and the
//! hyphen form of the leading tokens. Synonyms and translations are not
//! produced here; they come from explicit seeds.

use std::collections::BTreeSet;

/// Split a phrase on whitespace and hyphens (lowercased, empties dropped)
pub fn tokenize(phrase: &str) -> Vec<String> {
    phrase
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inflected forms of a single token, including the token itself
pub fn inflect_token(token: &str) -> BTreeSet<String> {
    let t = token.to_lowercase();
    let mut forms = BTreeSet::new();

    if let Some(stem) = t.strip_suffix('y') {
        forms.insert(format!("{stem}ies"));
        forms.insert(format!("{stem}ied"));
        forms.insert(format!("{stem}ying"));
        forms.insert(format!("{t}s"));
    } else {
        for suffix in ["s", "es", "ed", "ing"] {
            forms.insert(format!("{t}{suffix}"));
        }
    }

    if t.ends_with("al") || t.ends_with("ic") {
        forms.insert(format!("{t}ly"));
    }

    forms.insert(t);
    forms
}

/// Expand one phrase into its lowercase surface variants.
///
/// Single token: inflections of the token. Multi-token: the leading tokens
/// stay fixed and every inflection of the last token is emitted in both the
/// space-joined and hyphen-joined form, plus the phrase itself.
pub fn expand_phrase(phrase: &str) -> BTreeSet<String> {
    let tokens = tokenize(phrase);
    let Some((last, leading)) = tokens.split_last() else {
        return BTreeSet::new();
    };

    let last_forms = inflect_token(last);
    if leading.is_empty() {
        return last_forms;
    }

    let stem_space = leading.join(" ");
    let stem_hyphen = leading.join("-");

    let mut out = BTreeSet::new();
    out.insert(phrase.trim().to_lowercase());
    for form in &last_forms {
        out.insert(format!("{stem_space} {form}"));
        out.insert(format!("{stem_hyphen}-{form}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Co-Generation  plant "), vec!["co", "generation", "plant"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_inflect_regular() {
        assert_eq!(
            inflect_token("drone"),
            set(&["drone", "drones", "dronees", "droneed", "droneing"])
        );
    }

    #[test]
    fn test_inflect_y_ending() {
        let forms = inflect_token("technology");
        assert!(forms.contains("technologies"));
        assert!(forms.contains("technologied"));
        assert!(forms.contains("technologying"));
        assert!(forms.contains("technologys"));
        assert!(!forms.contains("technologyed"));
    }

    #[test]
    fn test_inflect_adverbial() {
        assert!(inflect_token("digital").contains("digitally"));
        assert!(inflect_token("robotic").contains("roboticly"));
        assert!(!inflect_token("drone").iter().any(|f| f.ends_with("ly")));
    }

    #[test]
    fn test_expand_single_token() {
        let variants = expand_phrase("Biogas");
        assert!(variants.contains("biogas"));
        assert!(variants.contains("biogases"));
        assert!(!variants.iter().any(|v| v.contains(' ')));
    }

    #[test]
    fn test_expand_multi_token() {
        let variants = expand_phrase("green product");
        assert!(variants.contains("green product"));
        assert!(variants.contains("green products"));
        assert!(variants.contains("green-products"));
        assert!(variants.contains("green-product"));
    }

    #[test]
    fn test_expand_keeps_hyphenated_original() {
        let variants = expand_phrase("co-generation");
        assert!(variants.contains("co-generation"));
        assert!(variants.contains("co generation"));
        assert!(variants.contains("co-generations"));
    }

    #[test]
    fn test_expand_is_deterministic() {
        assert_eq!(expand_phrase("smart city"), expand_phrase("smart city"));
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand_phrase("").is_empty());
    }
}
