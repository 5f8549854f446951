// Host document model: stylesheets, rules, and handles into them
use rustc_hash::FxHashMap;
use slab::Slab;
use url::Url;

use crate::props::PropertyNameResolver;

/// Identifies a stylesheet within its owning `Document`.
pub type SheetId = usize;

/// An index pair into host-owned rule storage.
///
/// Copying a handle never copies rule data; every holder of the same handle
/// observes the same live rule, and mutations persist for the document's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHandle {
    pub sheet: SheetId,
    pub rule: usize,
}

/// A CSS rule: selector text plus a live property map.
///
/// An empty-string value means the property is not set on this rule.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector_text: String,
    properties: FxHashMap<String, String>,
}

impl StyleRule {
    pub fn new(selector_text: impl Into<String>) -> Self {
        Self {
            selector_text: selector_text.into(),
            properties: FxHashMap::default(),
        }
    }

    /// Value stored under a resolved property name, empty string when unset.
    pub fn value(&self, name: &str) -> &str {
        self.properties.get(name).map(String::as_str).unwrap_or("")
    }

    /// Whether the rule carries a non-empty value for the property.
    pub fn has_value(&self, name: &str) -> bool {
        !self.value(name).is_empty()
    }

    /// Write a value, creating the property if it was absent.
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}

/// A stylesheet registered with a `Document`, optionally tied to an owner
/// node id or an href.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub owner_id: Option<String>,
    /// Resolved against the document base URL at registration time.
    pub href: Option<String>,
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stylesheet whose owner node carries the given id.
    pub fn with_owner_id(id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// A stylesheet loaded from the given href (relative or absolute).
    pub fn with_href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Add a rule to the stylesheet
    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }
}

/// The host document: owns every stylesheet in a slab arena and keeps the
/// registration order that rule resolution walks.
///
/// One internal staging stylesheet is created up front as the slot a host
/// would insert dynamically created rules into; resolution always skips it.
pub struct Document {
    sheets: Slab<StyleSheet>,
    order: Vec<SheetId>,
    base: Url,
    staging: SheetId,
    resolver: PropertyNameResolver,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_base(
            Url::parse("about:blank")
                .unwrap_or_else(|_| Url::parse("http://localhost/").unwrap()),
        )
    }

    pub fn with_base(base: Url) -> Self {
        let mut sheets = Slab::new();
        let staging = sheets.insert(StyleSheet::new());
        Self {
            sheets,
            order: vec![staging],
            base,
            staging,
            resolver: PropertyNameResolver::new(),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The internal staging stylesheet, skipped during rule resolution.
    pub fn staging_sheet(&self) -> SheetId {
        self.staging
    }

    /// Register a stylesheet. Its href, if any, is resolved against the base
    /// URL now so later filter comparisons see a single spelling.
    pub fn add_stylesheet(&mut self, mut sheet: StyleSheet) -> SheetId {
        if let Some(href) = sheet.href.take() {
            sheet.href = Some(self.resolve_href(&href));
        }
        let id = self.sheets.insert(sheet);
        self.order.push(id);
        id
    }

    /// Append a rule to a stylesheet. Host-side plumbing used to populate
    /// documents; resolution itself never creates rules.
    pub fn add_rule(
        &mut self,
        sheet: SheetId,
        selector: &str,
        properties: &[(&str, &str)],
    ) -> Option<RuleHandle> {
        let entry = self.sheets.get_mut(sheet)?;
        let mut rule = StyleRule::new(selector);
        for (name, value) in properties {
            rule.set_value(name, value);
        }
        entry.add_rule(rule);
        Some(RuleHandle {
            sheet,
            rule: entry.rules.len() - 1,
        })
    }

    pub fn stylesheet(&self, id: SheetId) -> Option<&StyleSheet> {
        self.sheets.get(id)
    }

    /// The live rule behind a handle, if the handle is still valid.
    pub fn rule(&self, handle: RuleHandle) -> Option<&StyleRule> {
        self.sheets.get(handle.sheet)?.rules.get(handle.rule)
    }

    pub fn rule_mut(&mut self, handle: RuleHandle) -> Option<&mut StyleRule> {
        self.sheets.get_mut(handle.sheet)?.rules.get_mut(handle.rule)
    }

    /// Resolve an href against the base URL, falling back to the raw text
    /// when it cannot be joined.
    pub fn resolve_href(&self, href: &str) -> String {
        match self.base.join(href) {
            Ok(resolved) => resolved.to_string(),
            Err(err) => {
                log::warn!("Failed to resolve href {:?} against base: {}", href, err);
                href.to_string()
            }
        }
    }

    /// Stylesheets in reverse registration order, most recently added first.
    pub(crate) fn sheets_newest_first(&self) -> impl Iterator<Item = (SheetId, &StyleSheet)> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.sheets.get(*id).map(|sheet| (*id, sheet)))
    }

    pub fn resolver(&self) -> &PropertyNameResolver {
        &self.resolver
    }

    /// Swap in a resolver, e.g. one probing a different host property surface.
    pub fn set_resolver(&mut self, resolver: PropertyNameResolver) {
        self.resolver = resolver;
    }
}
