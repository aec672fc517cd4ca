use crate::extractors::{ExtractorRegistry, GoExtractor, RustExtractor, SymbolExtractor};

#[test]
fn go_extractor_collects_declaration_names() {
    let source = r#"package main

const answer = 42

var greeting = "hello"

type Server struct{}

func (s *Server) Handle() {}

func Foo() {}
"#;
    let symbols = GoExtractor.extract(source).unwrap();
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"answer"));
    assert!(names.contains(&"greeting"));
    assert!(names.contains(&"Server"));
    assert!(names.contains(&"Handle"));
    assert!(names.contains(&"Foo"));
}

#[test]
fn rust_extractor_collects_item_names() {
    let source = r#"
pub struct Config;

enum Mode {
    Fast,
    Slow,
}

trait Runner {
    fn run(&self);
}

pub fn main_loop() {}

const LIMIT: usize = 8;
"#;
    let symbols = RustExtractor.extract(source).unwrap();
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"Config"));
    assert!(names.contains(&"Mode"));
    assert!(names.contains(&"Runner"));
    assert!(names.contains(&"main_loop"));
    assert!(names.contains(&"LIMIT"));
}

#[test]
fn extractors_tolerate_broken_sources() {
    // tree-sitter recovers with a partial tree for broken input; extraction
    // returns whatever declarations it can still see instead of failing
    GoExtractor.extract("func Incomplete(").unwrap();
    RustExtractor.extract("fn missing_brace( {").unwrap();
}

#[test]
fn registry_resolves_by_path() {
    let registry = ExtractorRegistry::with_defaults();
    assert_eq!(
        registry.for_path("cmd/main.go").map(|e| e.name()),
        Some("go")
    );
    assert_eq!(
        registry.for_path("src/lib.rs").map(|e| e.name()),
        Some("rust")
    );
    assert!(registry.for_path("README.md").is_none());
}

#[test]
fn registry_version_combines_extractor_versions() {
    assert_eq!(ExtractorRegistry::with_defaults().version(), "go:1;rust:1");
    assert_eq!(ExtractorRegistry::new().version(), "");
}
