//! PropertyMap: the extension key-value store on movie nodes.

use std::collections::BTreeMap;
use super::Value;

/// A map of property names to values. Ordered so flattened nodes are stable.
pub type PropertyMap = BTreeMap<String, Value>;

