// Selector resolution against the document's active stylesheets
use crate::filter::parse_selector;
use crate::sheet::{Document, RuleHandle};

/// Accepted selector shapes, one variant per input form.
#[derive(Debug, Clone)]
pub enum SelectorInput {
    /// A `"filter{selector}"` string.
    Text(String),
    /// A rule handle passed through unchanged.
    Handle(RuleHandle),
    /// A mixed list, resolved element by element in order.
    Many(Vec<SelectorInput>),
}

impl From<&str> for SelectorInput {
    fn from(text: &str) -> Self {
        SelectorInput::Text(text.to_string())
    }
}

impl From<String> for SelectorInput {
    fn from(text: String) -> Self {
        SelectorInput::Text(text)
    }
}

impl From<RuleHandle> for SelectorInput {
    fn from(handle: RuleHandle) -> Self {
        SelectorInput::Handle(handle)
    }
}

impl From<Vec<SelectorInput>> for SelectorInput {
    fn from(inputs: Vec<SelectorInput>) -> Self {
        SelectorInput::Many(inputs)
    }
}

impl From<&[&str]> for SelectorInput {
    fn from(texts: &[&str]) -> Self {
        SelectorInput::Many(texts.iter().map(|t| SelectorInput::from(*t)).collect())
    }
}

/// Ordered snapshot of the rules a selector resolved to.
///
/// Later stylesheet changes are not reflected; resolve again for a fresh
/// view. The handles stay valid for the document's lifetime.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    handles: Vec<RuleHandle>,
}

impl RuleSet {
    pub fn handles(&self) -> &[RuleHandle] {
        &self.handles
    }

    pub(crate) fn into_handles(self) -> Vec<RuleHandle> {
        self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleHandle> + '_ {
        self.handles.iter().copied()
    }
}

impl Document {
    /// Resolve a selector input into an ordered rule set.
    ///
    /// Stylesheets are visited most-recently-registered first, the internal
    /// staging sheet is skipped, and a rule matches only when its selector
    /// text is exactly equal to the parsed selector text. Unmatched input
    /// yields an empty set, never an error.
    pub fn select(&self, input: impl Into<SelectorInput>) -> RuleSet {
        let mut handles = Vec::new();
        self.collect(&input.into(), &mut handles);
        RuleSet { handles }
    }

    fn collect(&self, input: &SelectorInput, out: &mut Vec<RuleHandle>) {
        match input {
            SelectorInput::Text(text) => self.collect_text(text, out),
            SelectorInput::Handle(handle) => out.push(*handle),
            SelectorInput::Many(inputs) => {
                for input in inputs {
                    self.collect(input, out);
                }
            }
        }
    }

    fn collect_text(&self, text: &str, out: &mut Vec<RuleHandle>) {
        let (filter, selector) = parse_selector(text);
        let before = out.len();
        for (id, sheet) in self.sheets_newest_first() {
            if id == self.staging_sheet() {
                continue;
            }
            if !filter.matches(sheet, self.base()) {
                continue;
            }
            for (idx, rule) in sheet.rules.iter().enumerate() {
                if rule.selector_text == selector {
                    out.push(RuleHandle {
                        sheet: id,
                        rule: idx,
                    });
                }
            }
        }
        log::debug!(
            "Selector {:?} matched {} rule(s)",
            selector,
            out.len() - before
        );
    }
}
