/// Identifier lineage analysis
///
/// Finds every element marked with `aura:id` and records where in the tree it
/// sits. Occurrences are aggregated by id value across the whole component,
/// in first-seen (pre-order) order, and are never deduplicated: repeated ids
/// and differing owner tags both shape the `find()` return type.

use indexmap::IndexMap;

use crate::typegen::ast::Element;

/// Attribute that makes an element discoverable through `cmp.find(id)`
pub const ID_ATTRIBUTE: &str = "aura:id";

#[derive(Debug, Clone, PartialEq)]
pub struct IdOccurrence {
    /// Tag of the element carrying the id
    pub tag: String,
    /// Tags from the root down to, but not including, the owning element
    pub lineage: Vec<String>,
}

pub type IdLineage = IndexMap<String, Vec<IdOccurrence>>;

pub fn collect_ids(root: &Element) -> IdLineage {
    let mut ids = IdLineage::new();
    let mut chain = Vec::new();
    visit(root, &mut chain, &mut ids);
    ids
}

fn visit(element: &Element, chain: &mut Vec<String>, ids: &mut IdLineage) {
    for (key, value) in &element.attributes {
        if key.eq_ignore_ascii_case(ID_ATTRIBUTE) {
            ids.entry(value.clone()).or_default().push(IdOccurrence {
                tag: element.name.clone(),
                lineage: chain.clone(),
            });
        }
    }

    chain.push(element.name.clone());
    for child in &element.children {
        visit(child, chain, ids);
    }
    chain.pop();
}
