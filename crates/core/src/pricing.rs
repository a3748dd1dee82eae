//! Matching a requested number type against carrier price quotes.
//!
//! Carriers are inconsistent about the spelling of number types ("tollfree",
//! "toll free", "toll-free"), so matching runs through an explicit alias
//! table instead of a single comparison. The table is the whole rule set;
//! auditing it is auditing the matcher.

use thiserror::Error;

use crate::domain::number::PriceQuote;

/// Requested-type aliases, tried after an exact match fails. Each entry maps
/// a canonical caller spelling to the carrier labels it also accepts, and is
/// applied in both directions.
const TYPE_ALIASES: &[(&str, &[&str])] =
    &[("tollfree", &["toll free", "toll-free"]), ("local", &["local"])];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no price found for number type `{requested}`; carrier offers: {}", .available.join(", "))]
pub struct PricingMismatch {
    pub requested: String,
    /// Every number type the carrier actually returned, so the caller can
    /// self-correct.
    pub available: Vec<String>,
}

/// Finds the single quote matching `requested_type`. Rules, in order: exact
/// case-insensitive match, alias-table match in either direction. The first
/// rule that produces a quote wins.
pub fn match_price(
    quotes: &[PriceQuote],
    requested_type: &str,
) -> Result<PriceQuote, PricingMismatch> {
    let requested = normalize(requested_type);

    if let Some(quote) = quotes.iter().find(|quote| normalize(&quote.number_type) == requested) {
        return Ok(quote.clone());
    }

    for (canonical, aliases) in TYPE_ALIASES {
        let requested_is_canonical = requested == *canonical;
        let requested_is_alias = aliases.iter().any(|alias| requested == *alias);
        if !requested_is_canonical && !requested_is_alias {
            continue;
        }

        let found = quotes.iter().find(|quote| {
            let label = normalize(&quote.number_type);
            label == *canonical || aliases.iter().any(|alias| label == *alias)
        });
        if let Some(quote) = found {
            return Ok(quote.clone());
        }
    }

    Err(PricingMismatch {
        requested: requested_type.to_string(),
        available: quotes.iter().map(|quote| quote.number_type.clone()).collect(),
    })
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use crate::domain::number::PriceQuote;

    use super::match_price;

    fn quote(number_type: &str, current_price: &str) -> PriceQuote {
        PriceQuote {
            number_type: number_type.to_string(),
            base_price: current_price.to_string(),
            current_price: current_price.to_string(),
            price_unit: "USD".to_string(),
        }
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let quotes = vec![quote("Local", "1.15")];
        let matched = match_price(&quotes, "local").expect("exact match");
        assert_eq!(matched.current_price, "1.15");
    }

    #[test]
    fn tollfree_matches_spaced_carrier_label() {
        let quotes = vec![quote("toll free", "2.00")];
        let matched = match_price(&quotes, "tollfree").expect("alias match");
        assert_eq!(matched.current_price, "2.00");
    }

    #[test]
    fn spaced_request_matches_compact_carrier_label() {
        let quotes = vec![quote("tollfree", "2.00")];
        let matched = match_price(&quotes, "toll free").expect("reverse alias match");
        assert_eq!(matched.number_type, "tollfree");
    }

    #[test]
    fn hyphenated_carrier_label_is_accepted() {
        let quotes = vec![quote("toll-free", "2.15")];
        let matched = match_price(&quotes, "tollfree").expect("hyphen alias match");
        assert_eq!(matched.current_price, "2.15");
    }

    #[test]
    fn request_is_trimmed_and_lowercased() {
        let quotes = vec![quote("local", "1.15")];
        match_price(&quotes, "  LOCAL ").expect("normalized request should match");
    }

    #[test]
    fn mismatch_lists_every_available_type() {
        let quotes = vec![quote("local", "1.15"), quote("mobile", "1.00")];
        let error = match_price(&quotes, "tollfree").expect_err("no toll free quote offered");

        assert_eq!(error.requested, "tollfree");
        assert_eq!(error.available, vec!["local".to_string(), "mobile".to_string()]);
        assert!(error.to_string().contains("local, mobile"));
    }

    #[test]
    fn unknown_type_against_local_only_pricing_fails() {
        let quotes = vec![quote("local", "1.15")];
        let error = match_price(&quotes, "mobile").expect_err("mobile is not offered");
        assert_eq!(error.available, vec!["local".to_string()]);
    }

    #[test]
    fn empty_quote_list_reports_empty_availability() {
        let error = match_price(&[], "local").expect_err("nothing offered");
        assert!(error.available.is_empty());
    }
}
