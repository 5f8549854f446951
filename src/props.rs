// Vendor-prefix-aware property name resolution
use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

/// Vendor prefixes probed, in order, when the plain camelCased name is not
/// supported by the host.
pub const VENDOR_PREFIXES: [&str; 4] = ["Webkit", "Moz", "ms", "O"];

/// camelCase a hyphenated property name: `background-color` -> `backgroundColor`.
/// A name without hyphens passes through unchanged.
pub(crate) fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Title-cased form used when prepending a vendor prefix:
/// `background-color` -> `BackgroundColor`.
pub(crate) fn title_case(name: &str) -> String {
    let camel = camel_case(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

/// The feature-detection surface: a single shared reference style object
/// that reports whether a camelCased (possibly prefixed) property name
/// exists on it.
pub trait StyleProbe {
    fn has_property(&self, name: &str) -> bool;
}

/// Probe backed by a fixed table of supported property names.
pub struct DefaultStyleProbe {
    supported: FxHashSet<&'static str>,
}

// Unprefixed names a typical host supports, plus the handful that only
// exist in prefixed form.
const SUPPORTED_PROPERTIES: &[&str] = &[
    "color",
    "background",
    "backgroundColor",
    "backgroundImage",
    "backgroundPosition",
    "backgroundRepeat",
    "backgroundSize",
    "display",
    "visibility",
    "opacity",
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "border",
    "borderTop",
    "borderRight",
    "borderBottom",
    "borderLeft",
    "borderRadius",
    "borderColor",
    "borderStyle",
    "borderWidth",
    "outline",
    "boxShadow",
    "boxSizing",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "fontStyle",
    "lineHeight",
    "letterSpacing",
    "wordSpacing",
    "whiteSpace",
    "textAlign",
    "textDecoration",
    "textTransform",
    "verticalAlign",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "zIndex",
    "overflow",
    "overflowX",
    "overflowY",
    "cursor",
    "content",
    "transform",
    "transformOrigin",
    "transition",
    "flex",
    "flexDirection",
    "flexWrap",
    "justifyContent",
    "alignItems",
    "gap",
    "WebkitLineClamp",
    "WebkitTextFillColor",
];

impl DefaultStyleProbe {
    pub fn new() -> Self {
        Self {
            supported: SUPPORTED_PROPERTIES.iter().copied().collect(),
        }
    }

    /// A probe recognizing exactly the given names, for hosts with a known
    /// property surface.
    pub fn with_supported(names: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            supported: names.into_iter().collect(),
        }
    }
}

impl Default for DefaultStyleProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleProbe for DefaultStyleProbe {
    fn has_property(&self, name: &str) -> bool {
        self.supported.contains(name)
    }
}

/// Resolves hyphenated property names to the form actually present on the
/// host's reference style object, memoizing every answer.
///
/// The cache is keyed by the original hyphenated name and also stores
/// misses (as the camelCased fallback), so the probe is consulted at most
/// once per distinct input.
pub struct PropertyNameResolver {
    probe: Box<dyn StyleProbe>,
    cache: RefCell<FxHashMap<String, String>>,
}

impl Default for PropertyNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyNameResolver {
    pub fn new() -> Self {
        Self::with_probe(Box::new(DefaultStyleProbe::new()))
    }

    pub fn with_probe(probe: Box<dyn StyleProbe>) -> Self {
        Self {
            probe,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Map a hyphenated (or already camelCased) name to its effective form.
    /// Unknown names fall back to the plain camelCased spelling.
    pub fn resolve(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        if let Some(hit) = self.cache.borrow().get(name) {
            return hit.clone();
        }
        let resolved = self.probe_name(name);
        self.cache
            .borrow_mut()
            .insert(name.to_string(), resolved.clone());
        resolved
    }

    fn probe_name(&self, name: &str) -> String {
        let camel = camel_case(name);
        if self.probe.has_property(&camel) {
            return camel;
        }
        let title = title_case(name);
        for prefix in VENDOR_PREFIXES {
            let candidate = format!("{prefix}{title}");
            if self.probe.has_property(&candidate) {
                return candidate;
            }
        }
        camel
    }

    /// Drop every memoized name.
    pub fn reset(&self) {
        self.cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Probe that counts how many names it is asked about.
    struct CountingProbe {
        inner: DefaultStyleProbe,
        asked: Rc<Cell<usize>>,
    }

    impl StyleProbe for CountingProbe {
        fn has_property(&self, name: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.inner.has_property(name)
        }
    }

    #[test]
    fn camel_case_removes_hyphens() {
        assert_eq!(camel_case("background-color"), "backgroundColor");
        assert_eq!(camel_case("border-top-width"), "borderTopWidth");
        assert_eq!(camel_case("color"), "color");
        assert_eq!(camel_case("-webkit-transform"), "WebkitTransform");
    }

    #[test]
    fn title_case_uppercases_the_head() {
        assert_eq!(title_case("background-color"), "BackgroundColor");
        assert_eq!(title_case("transform"), "Transform");
    }

    #[test]
    fn supported_names_resolve_to_camel_case() {
        let resolver = PropertyNameResolver::new();
        assert_eq!(resolver.resolve("background-color"), "backgroundColor");
        assert_eq!(resolver.resolve("color"), "color");
    }

    #[test]
    fn prefixed_only_names_pick_up_their_prefix() {
        let resolver = PropertyNameResolver::new();
        assert_eq!(resolver.resolve("line-clamp"), "WebkitLineClamp");
        assert_eq!(resolver.resolve("text-fill-color"), "WebkitTextFillColor");
    }

    #[test]
    fn prefixes_are_probed_in_declared_order() {
        let probe = DefaultStyleProbe::with_supported(["MozAppearance", "msAppearance"]);
        let resolver = PropertyNameResolver::with_probe(Box::new(probe));
        // Webkit misses first, then Moz wins before ms is reached.
        assert_eq!(resolver.resolve("appearance"), "MozAppearance");
    }

    #[test]
    fn unknown_names_fall_back_to_camel_case() {
        let resolver = PropertyNameResolver::new();
        assert_eq!(resolver.resolve("frob-nicate"), "frobNicate");
    }

    #[test]
    fn empty_name_passes_through_uncached() {
        let resolver = PropertyNameResolver::new();
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn resolution_probes_the_host_at_most_once_per_name() {
        let asked = Rc::new(Cell::new(0));
        let probe = CountingProbe {
            inner: DefaultStyleProbe::new(),
            asked: asked.clone(),
        };
        let resolver = PropertyNameResolver::with_probe(Box::new(probe));

        let first = resolver.resolve("transform");
        let probes_after_first = asked.get();
        let second = resolver.resolve("transform");

        assert_eq!(first, second);
        assert_eq!(asked.get(), probes_after_first);
    }

    #[test]
    fn misses_are_cached_too() {
        let asked = Rc::new(Cell::new(0));
        let probe = CountingProbe {
            inner: DefaultStyleProbe::new(),
            asked: asked.clone(),
        };
        let resolver = PropertyNameResolver::with_probe(Box::new(probe));

        resolver.resolve("no-such-property");
        let probes_after_first = asked.get();
        resolver.resolve("no-such-property");

        // camelCase miss plus four prefix misses, then never again.
        assert_eq!(probes_after_first, 1 + VENDOR_PREFIXES.len());
        assert_eq!(asked.get(), probes_after_first);
    }

    #[test]
    fn reset_forces_a_fresh_probe() {
        let asked = Rc::new(Cell::new(0));
        let probe = CountingProbe {
            inner: DefaultStyleProbe::new(),
            asked: asked.clone(),
        };
        let resolver = PropertyNameResolver::with_probe(Box::new(probe));

        resolver.resolve("transform");
        let probes_after_first = asked.get();
        resolver.reset();
        resolver.resolve("transform");

        assert!(asked.get() > probes_after_first);
    }
}
