/// `find()` signature synthesis from identifier lineage
///
/// The union for an id is built in a fixed order that downstream tooling
/// relies on:
/// 1. `undefined` when the element may not be rendered
/// 2. `Aura.Component[]` when more than one tag carries the id
/// 3. each owning tag's type, in first-seen order, followed by its array
///    type when the tag can match more than once

use indexmap::IndexMap;

use crate::typegen::analyzer::IdLineage;

/// Renders its body once per collection item
pub const REPEAT_TAG: &str = "aura:iteration";
/// Renders its body only when a condition holds
pub const CONDITIONAL_TAG: &str = "aura:if";

pub const GENERIC_COMPONENT: &str = "Aura.Component";

#[derive(Debug, Clone, PartialEq)]
pub struct FindSignature {
    pub id: String,
    pub return_types: Vec<String>,
}

impl FindSignature {
    pub fn render(&self) -> String {
        format!(
            "    find(name: \"{}\"): {};\n",
            self.id,
            self.return_types.join(" | ")
        )
    }
}

pub fn synthesize(ids: &IdLineage) -> Vec<FindSignature> {
    ids.iter()
        .map(|(id, occurrences)| {
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            let mut may_be_absent = false;

            for occurrence in occurrences {
                let count = counts.entry(occurrence.tag.as_str()).or_insert(0);
                *count += 1;
                for ancestor in &occurrence.lineage {
                    if ancestor.eq_ignore_ascii_case(REPEAT_TAG) {
                        *count += 1;
                        may_be_absent = true;
                    }
                    if ancestor.eq_ignore_ascii_case(CONDITIONAL_TAG) {
                        may_be_absent = true;
                    }
                }
            }

            let mut return_types = Vec::new();
            if may_be_absent {
                return_types.push("undefined".to_string());
            }
            if counts.len() > 1 {
                return_types.push(format!("{}[]", GENERIC_COMPONENT));
            }
            for (tag, count) in counts {
                let component_type = component_type(tag);
                if count > 1 {
                    let array_type = format!("{}[]", component_type);
                    return_types.push(component_type);
                    return_types.push(array_type);
                } else {
                    return_types.push(component_type);
                }
            }

            FindSignature {
                id: id.clone(),
                return_types,
            }
        })
        .collect()
}

/// `c:MyCmp` → `Cmp.c.MyCmp`; plain HTML tags are generic components.
fn component_type(tag: &str) -> String {
    if tag.contains(':') {
        format!("Cmp.{}", tag.replace(':', "."))
    } else {
        GENERIC_COMPONENT.to_string()
    }
}

pub fn render_find_block(ids: &IdLineage) -> String {
    synthesize(ids).iter().map(FindSignature::render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typegen::analyzer::collect_ids;
    use crate::typegen::parser::parse_markup;

    fn union_for(markup: &str, id: &str) -> String {
        let root = parse_markup(markup).unwrap();
        synthesize(&collect_ids(&root))
            .into_iter()
            .find(|sig| sig.id == id)
            .map(|sig| sig.return_types.join(" | "))
            .unwrap()
    }

    #[test]
    fn test_single_custom_component() {
        let union = union_for(r#"<aura:component><c:Custom aura:id="x"/></aura:component>"#, "x");
        assert_eq!(union, "Cmp.c.Custom");
    }

    #[test]
    fn test_same_tag_twice() {
        let union = union_for(
            r#"<aura:component><c:Custom aura:id="x"/><c:Custom aura:id="x"/></aura:component>"#,
            "x",
        );
        assert_eq!(union, "Cmp.c.Custom | Cmp.c.Custom[]");
    }

    #[test]
    fn test_different_tags_get_generic_array_first() {
        let union = union_for(
            r#"<aura:component><c:A aura:id="x"/><aura:if><c:B aura:id="x"/></aura:if></aura:component>"#,
            "x",
        );
        assert_eq!(union, "undefined | Aura.Component[] | Cmp.c.A | Cmp.c.B");
    }

    #[test]
    fn test_html_tag_is_generic() {
        let union = union_for(r#"<aura:component><div aura:id="x"/></aura:component>"#, "x");
        assert_eq!(union, "Aura.Component");
    }

    #[test]
    fn test_iteration_makes_absent_and_multiple() {
        let union = union_for(
            r#"<aura:component><aura:iteration items="{!v.items}" var="item"><force:Row aura:id="row"/></aura:iteration></aura:component>"#,
            "row",
        );
        assert_eq!(union, "undefined | Cmp.force.Row | Cmp.force.Row[]");
    }

    #[test]
    fn test_conditional_pair_inside_if() {
        let union = union_for(
            r#"<aura:component><aura:if isTrue="{!v.on}"><force:TestComponent aura:id="id"/><force:TestComponent aura:id="id"/></aura:if></aura:component>"#,
            "id",
        );
        assert_eq!(union, "undefined | Cmp.force.TestComponent | Cmp.force.TestComponent[]");
    }

    #[test]
    fn test_marker_tags_match_case_insensitively() {
        let union = union_for(
            r#"<aura:component><Aura:If><c:A aura:id="x"/></Aura:If></aura:component>"#,
            "x",
        );
        assert_eq!(union, "undefined | Cmp.c.A");
    }

    #[test]
    fn test_render_block() {
        let root = parse_markup(r#"<aura:component><c:A aura:id="one"/><div aura:id="two"/></aura:component>"#).unwrap();
        assert_eq!(
            render_find_block(&collect_ids(&root)),
            "    find(name: \"one\"): Cmp.c.A;\n    find(name: \"two\"): Aura.Component;\n"
        );
    }
}
