// Query and mutate CSS rules already present in a document's stylesheets,
// addressed by selector text and an optional stylesheet filter, with
// vendor-prefix-aware property access
mod access;
mod filter;
mod props;
mod resolve;
mod sheet;

pub use self::access::{Applied, PropertyArg, RuleSetStyles};
pub use self::filter::{FilterSpec, parse_selector};
pub use self::props::{DefaultStyleProbe, PropertyNameResolver, StyleProbe, VENDOR_PREFIXES};
pub use self::resolve::{RuleSet, SelectorInput};
pub use self::sheet::{Document, RuleHandle, SheetId, StyleRule, StyleSheet};
