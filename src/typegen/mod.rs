/// Type declaration engine for Aura components and helpers
///
/// Architecture:
/// - ast: markup element tree with attached comments
/// - parser: markup loader (comment promotion included)
/// - types: attribute type translation and the external-type predicate
/// - overrides: `@key {type}` comment overrides
/// - analyzer: `aura:id` lineage collection
/// - find: `find()` union synthesis
/// - codegen: component declaration text
/// - jsdoc, helper: helper declaration text

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod find;
pub mod helper;
pub mod jsdoc;
pub mod overrides;
pub mod parser;
pub mod types;

use std::path::Path;

use crate::error::{Result, TypegenError};

pub use ast::{Comment, Element};
pub use codegen::CodeGenerator;
pub use helper::HelperGenerator;
pub use types::{ExternalTypes, NoExternalTypes};

/// Logical component name: the file's immediate parent directory.
///
/// `force-app/main/default/aura/MyCmp/MyCmp.cmp` → `MyCmp`
pub fn component_name(path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse markup read from `path`, reporting syntax errors against that file.
pub fn load_markup(path: &Path, source: &str) -> Result<Element> {
    parser::parse_markup(source).map_err(|e| TypegenError::Parse {
        file: path.to_path_buf(),
        line: e.line,
        column: e.column,
        message: e.message,
    })
}

/// Generate the `Cmp.c` declaration for a component or application.
pub fn build_component_dts(path: &Path, source: &str, externals: &dyn ExternalTypes) -> Result<String> {
    let root = load_markup(path, source)?;
    let name = component_name(path);
    Ok(CodeGenerator::new(&name, externals).generate(&root))
}

/// Generate the `Helper.c` declaration for a helper script.
///
/// The paired markup is only consulted for its `extends` attribute.
pub fn build_helper_dts(path: &Path, source: &str, markup_path: &Path, markup: &str) -> Result<String> {
    let root = load_markup(markup_path, markup)?;
    let name = component_name(path);
    HelperGenerator::new(&name, root.attribute("extends")).generate(path, source)
}
