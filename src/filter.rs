// Stylesheet filters and the "filter{selector}" input form
use url::Url;

use crate::sheet::StyleSheet;

/// Narrows which stylesheets a selector is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// No filter; every stylesheet matches.
    None,
    /// `#id` form, matched against the sheet's owner node id.
    ById(String),
    /// Href form, matched against the sheet's resolved href.
    ByHref(String),
}

impl FilterSpec {
    /// Classify the text in front of a `{`. Empty text means no filter, a
    /// leading `#` selects by owner id, anything else is an href.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            FilterSpec::None
        } else if let Some(id) = trimmed.strip_prefix('#') {
            FilterSpec::ById(id.to_string())
        } else {
            FilterSpec::ByHref(trimmed.to_string())
        }
    }

    /// Whether a stylesheet passes the filter. Comparison is case-sensitive
    /// and exact; no prefix or pattern matching.
    pub fn matches(&self, sheet: &StyleSheet, base: &Url) -> bool {
        match self {
            FilterSpec::None => true,
            // An absent or empty owner id never matches a non-empty filter.
            FilterSpec::ById(id) => {
                !id.is_empty() && sheet.owner_id.as_deref() == Some(id.as_str())
            }
            FilterSpec::ByHref(href) => {
                let Some(sheet_href) = sheet.href.as_deref() else {
                    return false;
                };
                // Resolve the filter text the same way the document resolved
                // the sheet's href, so relative and absolute forms compare
                // equal.
                let wanted = match base.join(href) {
                    Ok(resolved) => resolved.to_string(),
                    Err(_) => href.clone(),
                };
                sheet_href == wanted
            }
        }
    }
}

/// Split a raw selector string into its filter part and its selector text.
///
/// If the string contains `{`, the text before the first `{` is the filter
/// and the text up to the matching `}` is the selector; otherwise the whole
/// trimmed string is selector text. Braces inside selector text are not
/// escaped.
pub fn parse_selector(input: &str) -> (FilterSpec, String) {
    match input.find('{') {
        Some(open) => {
            let filter = FilterSpec::parse(&input[..open]);
            let rest = &input[open + 1..];
            let selector = match rest.find('}') {
                Some(close) => &rest[..close],
                None => rest,
            };
            (filter, selector.trim().to_string())
        }
        None => (FilterSpec::None, input.trim().to_string()),
    }
}
