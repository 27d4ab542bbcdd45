/// Component declaration generator
///
/// Emits the `Cmp.c` namespace declaration for one component or application:
/// attribute accessors, `aura:method` signatures, `find()` lookups, and
/// registered events, followed by the intersection with the base component
/// and the Apex controller.

use tracing::warn;

use crate::typegen::analyzer::collect_ids;
use crate::typegen::ast::Element;
use crate::typegen::find::render_find_block;
use crate::typegen::overrides::{parse_overrides, TypeOverrides};
use crate::typegen::types::{translate_type, ExternalTypes, EXTERNAL_NAMESPACE};

const ATTRIBUTE_TAG: &str = "aura:attribute";
const METHOD_TAG: &str = "aura:method";
const EVENT_TAG: &str = "aura:registerEvent";

/// Override keys with a fixed meaning on `aura:method` comments
const TYPE_KEY: &str = "type";
const RETURNS_KEY: &str = "returns";

pub struct CodeGenerator<'a> {
    component_name: &'a str,
    externals: &'a dyn ExternalTypes,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(component_name: &'a str, externals: &'a dyn ExternalTypes) -> Self {
        CodeGenerator {
            component_name,
            externals,
        }
    }

    pub fn generate(&self, root: &Element) -> String {
        let attributes = self.generate_attributes(root);
        let methods = self.generate_methods(root);
        let finds = render_find_block(&collect_ids(root));
        let events = self.generate_events(root);
        let base = base_component(root);
        let controller = controller(root);

        let name = self.component_name;
        format!(
            "declare namespace Cmp.c {{
  interface _{name} extends Aura.Component {{
{attributes}{methods}{finds}{events}  }}

  type {name} = _{name}{base}{controller};
}}
"
        )
    }

    fn generate_attributes(&self, root: &Element) -> String {
        let mut output = String::from("    get(key: \"v.body\"): Aura.Component[];\n");
        output.push_str("    set(key: \"v.body\", value: Aura.Component[]): void;\n");

        for attribute in root.children_named(ATTRIBUTE_TAG) {
            let Some(name) = attribute.attribute("name") else {
                warn!(component = self.component_name, "skipping aura:attribute without a name");
                continue;
            };
            let overrides = parse_overrides(&attribute.comments);
            let ts_type = self.attribute_type(attribute, &overrides);
            output.push_str(&format!("    get(key: \"v.{}\"): {};\n", name, ts_type));
            output.push_str(&format!(
                "    set(key: \"v.{}\", value: {}): void;\n",
                name, ts_type
            ));
        }

        output
    }

    fn generate_methods(&self, root: &Element) -> String {
        let mut output = String::new();

        for method in root.children_named(METHOD_TAG) {
            let Some(name) = method.attribute("name") else {
                warn!(component = self.component_name, "skipping aura:method without a name");
                continue;
            };
            let method_overrides = parse_overrides(&method.comments);

            let type_params = method_overrides
                .get(TYPE_KEY)
                .map(|params| format!("<{}>", normalize_commas(params)))
                .unwrap_or_default();
            let returns = method_overrides
                .get(RETURNS_KEY)
                .map(|returns| normalize_commas(returns))
                .unwrap_or_else(|| "any".to_string());

            let params: Vec<String> = method
                .children_named(ATTRIBUTE_TAG)
                .filter_map(|param| {
                    let param_name = param.attribute("name")?;
                    let required = param
                        .attribute("required")
                        .is_some_and(|value| value.eq_ignore_ascii_case("true"));
                    let ts_type = self.parameter_type(param, param_name, &method_overrides);
                    Some(format!(
                        "{}{}: {}",
                        param_name,
                        if required { "" } else { "?" },
                        ts_type
                    ))
                })
                .collect();

            output.push_str(&format!(
                "    {}{}({}): {};\n",
                name,
                type_params,
                params.join(", "),
                returns
            ));
        }

        output
    }

    fn generate_events(&self, root: &Element) -> String {
        let mut output = String::new();
        for event in root.children_named(EVENT_TAG) {
            match event.attribute("name") {
                Some(name) => {
                    output.push_str(&format!("    getEvent(name: \"{}\"): Aura.Event;\n", name))
                }
                None => {
                    warn!(component = self.component_name, "skipping aura:registerEvent without a name")
                }
            }
        }
        output
    }

    /// Comment override first, then the translated `type` attribute.
    fn attribute_type(&self, attribute: &Element, overrides: &TypeOverrides) -> String {
        if let Some(override_type) = overrides.get(TYPE_KEY) {
            return normalize_commas(override_type);
        }
        let declared = attribute.attribute("type").unwrap_or("any");
        translate_type(declared, self.externals)
    }

    fn parameter_type(&self, param: &Element, param_name: &str, method_overrides: &TypeOverrides) -> String {
        let own = parse_overrides(&param.comments);
        if own.contains_key(TYPE_KEY) {
            return self.attribute_type(param, &own);
        }
        let keyed = match param_name {
            TYPE_KEY | RETURNS_KEY => None,
            _ => method_overrides.get(param_name),
        };
        match keyed {
            Some(keyed) => normalize_commas(keyed),
            None => self.attribute_type(param, &own),
        }
    }
}

/// `c:BaseCmp` → `c.BaseCmp`, namespace lower-cased; no namespace means `c`.
pub fn descriptor_path(descriptor: &str) -> String {
    match descriptor.split_once(':') {
        Some((namespace, name)) => format!("{}.{}", namespace.to_lowercase(), name),
        None => format!("c.{}", descriptor),
    }
}

fn base_component(root: &Element) -> String {
    root.attribute("extends")
        .map(|extends| format!(" & Cmp.{}", descriptor_path(extends)))
        .unwrap_or_default()
}

fn controller(root: &Element) -> String {
    root.attribute("controller")
        .map(|controller| format!(" & {}.{}", EXTERNAL_NAMESPACE, controller))
        .unwrap_or_default()
}

/// Put a single space after every comma: `Aura.Action<T,R>` → `Aura.Action<T, R>`
fn normalize_commas(type_expr: &str) -> String {
    let mut output = String::with_capacity(type_expr.len() + 4);
    let mut chars = type_expr.chars().peekable();
    while let Some(ch) = chars.next() {
        output.push(ch);
        if ch == ',' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            output.push(' ');
        }
    }
    output
}
