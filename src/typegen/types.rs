/// Aura attribute type to TypeScript type translation

/// Answers whether a type name is declared outside the markup, e.g. an
/// Apex class with a pre-generated declaration file.
pub trait ExternalTypes: Sync {
    fn is_known_external_type(&self, name: &str) -> bool;
}

/// Predicate for runs without any external type declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalTypes;

impl ExternalTypes for NoExternalTypes {
    fn is_known_external_type(&self, _name: &str) -> bool {
        false
    }
}

/// Namespace that external type declarations live under
pub const EXTERNAL_NAMESPACE: &str = "Apex";

// Aura type names are case-insensitive, lookups use the lower-cased name
fn primitive(name: &str) -> Option<&'static str> {
    let mapped = match name.to_ascii_lowercase().as_str() {
        "boolean" => "boolean",
        "date" => "string",
        "datetime" => "number",
        "decimal" | "double" | "integer" | "long" => "number",
        "string" | "id" => "string",
        "list" | "set" => "Array<any>",
        "map" | "object" => "{[key: string]: any}",
        _ => return None,
    };
    Some(mapped)
}

/// Translate an Aura type name (optionally suffixed with `[]`) to TypeScript.
///
/// Names missing from the primitive table keep their exact casing. Names the
/// external predicate recognises are prefixed with [`EXTERNAL_NAMESPACE`].
pub fn translate_type(type_name: &str, externals: &dyn ExternalTypes) -> String {
    let (base, is_array) = match type_name.strip_suffix("[]") {
        Some(base) => (base, true),
        None => (type_name, false),
    };

    let mut translated = primitive(base).unwrap_or(base).to_string();
    if externals.is_known_external_type(&translated) {
        translated = format!("{}.{}", EXTERNAL_NAMESPACE, translated);
    }
    if is_array {
        translated.push_str("[]");
    }
    translated
}
