//! Integration tests for pyloader-plugin
//!
//! Drives the transform hook with a mocked parser and checks both the hook
//! result and the files written next to the source.

use mockall::mock;
use pyloader_core::{Error, LoaderOptions};
use pyloader_introspector::{FunctionSignature, ParsedModule, PythonParser};
use pyloader_plugin::PythonLoader;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mock! {
    pub Parser {}

    impl PythonParser for Parser {
        fn parse(&self, source: &str) -> pyloader_core::Result<ParsedModule>;
    }
}

const SOURCE: &str = "__all__ = [\"add\", \"subtract\"]\ndef add(a, b):\n  return a + b\n  \ndef subtract(a, b):\n  return a - b";

fn example_functions() -> Vec<FunctionSignature> {
    vec![
        FunctionSignature::new("add", ["a", "b"]),
        FunctionSignature::new("subtract", ["a", "b"]),
    ]
}

fn parser_returning(functions: Vec<FunctionSignature>) -> MockParser {
    let mut parser = MockParser::new();
    parser
        .expect_parse()
        .returning(move |_| Ok(ParsedModule::new(functions.clone())));
    parser
}

fn source_id(dir: &TempDir, file: &str) -> String {
    dir.path().join(file).to_string_lossy().into_owned()
}

fn sibling(id: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{id}{suffix}"))
}

fn options(generate_javascript: bool, generate_type_definitions: bool) -> LoaderOptions {
    LoaderOptions {
        generate_javascript,
        generate_type_definitions,
        ..LoaderOptions::default()
    }
}

/// Only `.py` ids are transformed; others never reach the parser
#[test]
fn test_non_python_ids_skip_parser() {
    let mut parser = MockParser::new();
    parser.expect_parse().times(0);

    let loader = PythonLoader::with_parser(options(true, true), parser).unwrap();

    for id in ["src/main.ts", "src/style.css", "src/math.py.js", "python"] {
        assert!(loader.transform("", id).unwrap().is_none(), "{id}");
    }
}

/// The parser sees the exact source text
#[test]
fn test_parser_receives_source() {
    let dir = TempDir::new().unwrap();
    let mut parser = MockParser::new();
    parser
        .expect_parse()
        .withf(|source| source == SOURCE)
        .times(1)
        .returning(|_| Ok(ParsedModule::new(example_functions())));

    let loader = PythonLoader::with_parser(options(false, false), parser).unwrap();
    assert!(loader.transform(SOURCE, &source_id(&dir, "example.py")).unwrap().is_some());
}

/// Default options write declarations but not JavaScript
#[test]
fn test_default_options_write_declarations_only() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");

    let loader =
        PythonLoader::with_parser(LoaderOptions::default(), parser_returning(example_functions()))
            .unwrap();
    let output = loader.transform(SOURCE, &id).unwrap().unwrap();

    assert!(!sibling(&id, ".js").exists());
    let written = fs::read_to_string(sibling(&id, ".d.ts")).unwrap();
    assert_eq!(written, output.meta.type_definitions);
    assert!(written.contains("export type addFunction = (a: any, b: any) => Promise<ExecuteResponse>;"));
    assert!(written.contains("export declare const example: (directorEndpoint: string) => {"));
}

/// With JavaScript output enabled the module code is written as well
#[test]
fn test_generate_javascript_writes_code() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");

    let loader =
        PythonLoader::with_parser(options(true, true), parser_returning(example_functions()))
            .unwrap();
    let output = loader.transform(SOURCE, &id).unwrap().unwrap();

    assert_eq!(fs::read_to_string(sibling(&id, ".js")).unwrap(), output.code);
    assert!(sibling(&id, ".d.ts").exists());
}

/// Declarations still reach the metadata when no files are written
#[test]
fn test_no_files_when_both_disabled() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");

    let loader =
        PythonLoader::with_parser(options(false, false), parser_returning(example_functions()))
            .unwrap();
    let output = loader.transform(SOURCE, &id).unwrap().unwrap();

    assert!(!sibling(&id, ".js").exists());
    assert!(!sibling(&id, ".d.ts").exists());
    assert!(output.meta.type_definitions.contains("subtractFunction"));
}

/// The hook result has the fixed fields bundlers expect
#[test]
fn test_output_shape() {
    let dir = TempDir::new().unwrap();
    let loader =
        PythonLoader::with_parser(options(false, false), parser_returning(example_functions()))
            .unwrap();
    let output = loader.transform(SOURCE, &source_id(&dir, "example.py")).unwrap().unwrap();

    assert!(output.map.is_none());
    assert!(!output.module_side_effects);
    assert!(output.code.starts_with("// Auto-generated from example by pyloader\n"));

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["moduleSideEffects"], false);
    assert!(json["map"].is_null());
    assert!(json["meta"]["typeDefinitions"].is_string());
}

/// One wrapper per function, each checking its own arity
#[test]
fn test_one_wrapper_per_function() {
    let dir = TempDir::new().unwrap();
    let functions = vec![
        FunctionSignature::new("zero", Vec::<String>::new()),
        FunctionSignature::new("one", ["a"]),
        FunctionSignature::new("three", ["a", "b", "c"]),
    ];
    let loader = PythonLoader::with_parser(options(false, false), parser_returning(functions)).unwrap();
    let output = loader.transform("", &source_id(&dir, "mixed.py")).unwrap().unwrap();

    assert_eq!(output.code.matches("= (...args) => {").count(), 3);
    assert!(output.code.contains("if (args.length !== 0) {"));
    assert!(output.code.contains("if (args.length !== 1) {"));
    assert!(output.code.contains("if (args.length !== 3) {"));
}

/// Transforming the same file twice gives identical output
#[test]
fn test_transform_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");
    let loader =
        PythonLoader::with_parser(options(false, true), parser_returning(example_functions()))
            .unwrap();

    let first = loader.transform(SOURCE, &id).unwrap();
    let first_file = fs::read(sibling(&id, ".d.ts")).unwrap();
    let second = loader.transform(SOURCE, &id).unwrap();
    let second_file = fs::read(sibling(&id, ".d.ts")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_file, second_file);
}

/// Parser failures abort the file and write nothing
#[test]
fn test_introspection_error_aborts() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "broken.py");

    let mut parser = MockParser::new();
    parser.expect_parse().times(1).returning(|_| {
        Err(Error::Introspection {
            message: "No module named 'numpy'".to_string(),
        })
    });

    let loader = PythonLoader::with_parser(options(true, true), parser).unwrap();
    let err = loader.transform("import numpy", &id).unwrap_err();

    assert_eq!(err.to_string(), "Import error: No module named 'numpy'");
    assert_no_siblings(&id);
}

/// An error document from the parser is an introspection failure too
#[test]
fn test_error_document_aborts() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "broken.py");

    let mut parser = MockParser::new();
    parser.expect_parse().returning(|_| {
        Ok(ParsedModule {
            functions: vec![],
            error: Some("invalid syntax (<unknown>, line 1)".to_string()),
        })
    });

    let loader = PythonLoader::with_parser(options(true, true), parser).unwrap();
    let err = loader.transform("def (", &id).unwrap_err();

    assert!(err.is_introspection_error());
    assert!(err.to_string().contains("invalid syntax"));
    assert_no_siblings(&id);
}

/// Names that cannot be emitted fail before anything is written
#[test]
fn test_unemittable_function_aborts() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "clash.py");

    let loader = PythonLoader::with_parser(
        options(true, true),
        parser_returning(vec![FunctionSignature::new("client", Vec::<String>::new())]),
    )
    .unwrap();

    assert!(loader.transform("", &id).unwrap_err().is_validation_error());
    assert_no_siblings(&id);
}

/// Write failures are reported with the failing path
#[test]
fn test_write_failure_is_io_error() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "missing/dir/example.py");

    let loader =
        PythonLoader::with_parser(options(false, true), parser_returning(example_functions()))
            .unwrap();
    let err = loader.transform(SOURCE, &id).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}

/// A failed declaration write leaves no JavaScript or temp files behind
#[test]
fn test_failed_declaration_write_keeps_directory_clean() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");
    fs::create_dir(sibling(&id, ".d.ts")).unwrap();

    let loader =
        PythonLoader::with_parser(options(true, true), parser_returning(example_functions()))
            .unwrap();
    let err = loader.transform(SOURCE, &id).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!sibling(&id, ".js").exists());

    let mut entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, ["example.py.d.ts"]);
}

/// A failed rewrite keeps the previous JavaScript output
#[test]
fn test_failed_write_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let id = source_id(&dir, "example.py");
    fs::write(sibling(&id, ".js"), "// previous").unwrap();
    fs::create_dir(sibling(&id, ".d.ts")).unwrap();

    let loader =
        PythonLoader::with_parser(options(true, true), parser_returning(example_functions()))
            .unwrap();
    assert!(loader.transform(SOURCE, &id).is_err());

    assert_eq!(fs::read_to_string(sibling(&id, ".js")).unwrap(), "// previous");
}

/// The configured runtime package is used in generated imports
#[test]
fn test_runtime_package_option() {
    let dir = TempDir::new().unwrap();
    let options = LoaderOptions {
        generate_type_definitions: false,
        runtime_package: "./runtime/python-api.js".to_string(),
        ..LoaderOptions::default()
    };
    let loader = PythonLoader::with_parser(options, parser_returning(example_functions())).unwrap();
    let output = loader.transform(SOURCE, &source_id(&dir, "example.py")).unwrap().unwrap();

    assert!(output.code.contains("from './runtime/python-api.js';"));
    assert!(output.meta.type_definitions.contains("from './runtime/python-api.js';"));
}

/// End to end with the real interpreter, when one is installed
#[test]
fn test_real_python_transform() {
    let Ok(loader) = PythonLoader::new(options(false, false)) else {
        eprintln!("skipping: no Python interpreter on PATH");
        return;
    };

    let dir = TempDir::new().unwrap();
    let source = format!("{SOURCE}\ndef helper():\n  pass\n");
    let output = loader.transform(&source, &source_id(&dir, "example.py")).unwrap().unwrap();

    assert!(output.code.contains("    add,\n    subtract\n"));
    assert!(!output.code.contains("const helper"));
}

fn assert_no_siblings(id: &str) {
    for suffix in [".js", ".d.ts"] {
        let path = sibling(id, suffix);
        assert!(!Path::new(&path).exists(), "{} was written", path.display());
    }
}
