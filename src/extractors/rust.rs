//! Symbol extraction for Rust source files.

use tree_sitter::{Node, Parser};

use super::{ExtractError, ExtractedSymbol, SymbolExtractor};

/// Extracts Rust item declarations: functions, types, traits, modules,
/// constants, statics, and macros.
pub struct RustExtractor;

impl SymbolExtractor for RustExtractor {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn version(&self) -> u32 {
        1
    }

    fn applies_to(&self, path: &str) -> bool {
        path.ends_with(".rs")
    }

    fn extract(&self, text: &str) -> Result<Vec<ExtractedSymbol>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| ExtractError(format!("failed to load Rust grammar: {e}")))?;
        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ExtractError("parser produced no tree".to_string()))?;

        let mut symbols = Vec::new();
        collect_symbols(tree.root_node(), text, &mut symbols);
        Ok(symbols)
    }
}

fn collect_symbols(node: Node, source: &str, symbols: &mut Vec<ExtractedSymbol>) {
    match node.kind() {
        "function_item" | "struct_item" | "enum_item" | "trait_item" | "union_item"
        | "mod_item" | "const_item" | "static_item" | "type_item" | "macro_definition" => {
            if let Some(name) = name_field_text(node, source) {
                symbols.push(ExtractedSymbol { name });
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_symbols(child, source, symbols);
    }
}

fn name_field_text(node: Node, source: &str) -> Option<String> {
    node.child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()
        .map(str::to_string)
}
