//! Symbol extraction for Go source files.

use tree_sitter::{Node, Parser};

use super::{ExtractError, ExtractedSymbol, SymbolExtractor};

/// Extracts top-level Go declarations: functions, methods, types,
/// constants, and variables.
pub struct GoExtractor;

impl SymbolExtractor for GoExtractor {
    fn name(&self) -> &'static str {
        "go"
    }

    fn version(&self) -> u32 {
        1
    }

    fn applies_to(&self, path: &str) -> bool {
        path.ends_with(".go")
    }

    fn extract(&self, text: &str) -> Result<Vec<ExtractedSymbol>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ExtractError(format!("failed to load Go grammar: {e}")))?;
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
        "function_declaration" | "method_declaration" | "type_spec" | "const_spec"
        | "var_spec" => {
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
