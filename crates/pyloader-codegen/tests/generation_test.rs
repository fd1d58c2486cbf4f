//! End-to-end generation tests for pyloader-codegen.
//!
//! Compares generated modules against the exact expected text.

use pyloader_codegen::{GeneratedModule, ModuleGenerator};
use pyloader_core::ModuleName;
use pyloader_introspector::FunctionSignature;

const EXAMPLE_SOURCE: &str = "__all__ = [\"add\", \"subtract\"]\ndef add(a, b):\n  return a + b\n  \ndef subtract(a, b):\n  return a - b";

const EXPECTED_CODE: &str = r##"// Auto-generated from example by pyloader
import { PythonApiClient } from '@disguise-one/designer-pythonapi';

export const example = (directorEndpoint) => {
  const client = new PythonApiClient(directorEndpoint, "example", "__all__ = [\"add\", \"subtract\"]\ndef add(a, b):\n  return a + b\n  \ndef subtract(a, b):\n  return a - b");

  const registration = client.register();

  const add = (...args) => {
    if (args.length !== 2) {
      throw new Error(`Expected 2 arguments, but got ${args.length}`);
    }

    const script = `return add(${JSON.stringify(args[0])}, ${JSON.stringify(args[1])})`;

    return client.executeScript(script);
  };

  const subtract = (...args) => {
    if (args.length !== 2) {
      throw new Error(`Expected 2 arguments, but got ${args.length}`);
    }

    const script = `return subtract(${JSON.stringify(args[0])}, ${JSON.stringify(args[1])})`;

    return client.executeScript(script);
  };

  return {
    client,
    registration,
    add,
    subtract
  };
};
"##;

const EXPECTED_DECLARATIONS: &str = r"// Auto-generated from example by pyloader
import { AxiosResponse } from 'axios';
import { PythonApiClient, ExecuteResponse, RegisterResponse } from '@disguise-one/designer-pythonapi';

export type addFunction = (a: any, b: any) => Promise<ExecuteResponse>;
export type subtractFunction = (a: any, b: any) => Promise<ExecuteResponse>;

export declare const example: (directorEndpoint: string) => {
  client: PythonApiClient,
  registration: Promise<AxiosResponse<RegisterResponse>>,
  add: addFunction,
  subtract: subtractFunction
};
";

fn example_functions() -> Vec<FunctionSignature> {
    vec![
        FunctionSignature::new("add", ["a", "b"]),
        FunctionSignature::new("subtract", ["a", "b"]),
    ]
}

fn generate(module: &str, source: &str, functions: &[FunctionSignature]) -> GeneratedModule {
    ModuleGenerator::new()
        .unwrap()
        .generate(&ModuleName::new(module), source, functions, true)
        .unwrap()
}

#[test]
fn test_example_module_code() {
    let generated = generate("example", EXAMPLE_SOURCE, &example_functions());
    assert_eq!(generated.code, EXPECTED_CODE);
}

#[test]
fn test_example_module_declarations() {
    let generated = generate("example", EXAMPLE_SOURCE, &example_functions());
    assert_eq!(generated.type_declarations.as_deref(), Some(EXPECTED_DECLARATIONS));
}

#[test]
fn test_declarations_can_be_skipped() {
    let generated = ModuleGenerator::new()
        .unwrap()
        .generate(&ModuleName::new("example"), EXAMPLE_SOURCE, &example_functions(), false)
        .unwrap();

    assert_eq!(generated.code, EXPECTED_CODE);
    assert!(generated.type_declarations.is_none());
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate("example", EXAMPLE_SOURCE, &example_functions());
    let second = generate("example", EXAMPLE_SOURCE, &example_functions());
    assert_eq!(first, second);
}

#[test]
fn test_module_without_functions() {
    let generated = generate("empty", "", &[]);

    assert!(generated.code.contains(r#"new PythonApiClient(directorEndpoint, "empty", "");"#));
    assert!(generated.code.ends_with(
        "  const registration = client.register();\n\n  return {\n    client,\n    registration\n  };\n};\n"
    ));

    let declarations = generated.type_declarations.unwrap();
    assert!(!declarations.contains("export type"));
    assert!(declarations.contains(
        "RegisterResponse } from '@disguise-one/designer-pythonapi';\n\nexport declare const empty:"
    ));
    assert!(declarations.ends_with("registration: Promise<AxiosResponse<RegisterResponse>>\n};\n"));
}

#[test]
fn test_zero_arity_function() {
    let generated = generate("clock", "def now():\n    pass\n", &[FunctionSignature::new(
        "now",
        Vec::<String>::new(),
    )]);

    assert!(generated.code.contains("if (args.length !== 0) {"));
    assert!(generated.code.contains("const script = `return now()`;"));
    assert!(
        generated
            .type_declarations
            .unwrap()
            .contains("export type nowFunction = () => Promise<ExecuteResponse>;")
    );
}

#[test]
fn test_function_order_is_preserved() {
    let functions = vec![
        FunctionSignature::new("zeta", ["z"]),
        FunctionSignature::new("alpha", ["a"]),
    ];
    let generated = generate("ordered", "", &functions);

    let zeta = generated.code.find("const zeta").unwrap();
    let alpha = generated.code.find("const alpha").unwrap();
    assert!(zeta < alpha);
    assert!(generated.code.contains("    zeta,\n    alpha\n"));
}

#[test]
fn test_reserved_function_name_gets_binding() {
    let functions = vec![FunctionSignature::new("delete", ["key"])];
    let generated = generate("store", "", &functions);

    assert!(generated.code.contains("  const delete_ = (...args) => {"));
    assert!(generated.code.contains("const script = `return delete(${JSON.stringify(args[0])})`;"));
    assert!(generated.code.contains("    delete: delete_\n"));

    let declarations = generated.type_declarations.unwrap();
    assert!(declarations.contains("export type deleteFunction = (key: any) => Promise<ExecuteResponse>;"));
    assert!(declarations.contains("  delete: deleteFunction\n"));
}

#[test]
fn test_reserved_parameter_name_in_declarations() {
    let functions = vec![FunctionSignature::new("make", ["new", "class"])];
    let generated = generate("factory", "", &functions);

    assert!(
        generated
            .type_declarations
            .unwrap()
            .contains("export type makeFunction = (new_: any, class_: any) => Promise<ExecuteResponse>;")
    );
}

#[test]
fn test_module_name_is_sanitised_for_export() {
    let generated = generate("data-loader", "", &[]);

    assert!(generated.code.starts_with("// Auto-generated from data-loader by pyloader\n"));
    assert!(generated.code.contains("export const data_loader = (directorEndpoint) => {"));
    assert!(generated.code.contains(r#"(directorEndpoint, "data-loader", "")"#));
}

#[test]
fn test_module_named_like_an_import_gets_suffix() {
    for (module, export) in [
        ("PythonApiClient", "PythonApiClient_"),
        ("ExecuteResponse", "ExecuteResponse_"),
        ("RegisterResponse", "RegisterResponse_"),
        ("AxiosResponse", "AxiosResponse_"),
    ] {
        let generated = generate(module, "", &[]);
        let declarations = generated.type_declarations.unwrap();

        assert!(
            generated
                .code
                .contains(&format!("export const {export} = (directorEndpoint) => {{")),
            "{module}"
        );
        assert!(
            declarations.contains(&format!("export declare const {export}: (directorEndpoint: string)")),
            "{module}"
        );
        assert!(
            generated
                .code
                .contains(&format!(r#"(directorEndpoint, "{module}", "")"#)),
            "{module}"
        );
    }
}

#[test]
fn test_source_is_embedded_as_string_literal() {
    let source = "def quote():\n    return \"it's `tick` ${x}\"\n";
    let generated = generate("quotes", source, &[FunctionSignature::new(
        "quote",
        Vec::<String>::new(),
    )]);

    let literal = serde_json::to_string(source).unwrap();
    assert!(generated.code.contains(&literal));
}

#[test]
fn test_invalid_function_name_rejected() {
    let err = ModuleGenerator::new()
        .unwrap()
        .generate(
            &ModuleName::new("bad"),
            "",
            &[FunctionSignature::new("not valid", Vec::<String>::new())],
            true,
        )
        .unwrap_err();

    assert!(err.is_validation_error());
}

#[test]
fn test_client_member_collision_rejected() {
    let err = ModuleGenerator::new()
        .unwrap()
        .generate(
            &ModuleName::new("bad"),
            "",
            &[FunctionSignature::new("client", Vec::<String>::new())],
            false,
        )
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(err.to_string().contains("client"));
}

#[test]
fn test_custom_runtime_package() {
    let generated = ModuleGenerator::new()
        .unwrap()
        .with_runtime_package("./python-api.js")
        .unwrap()
        .generate(&ModuleName::new("example"), EXAMPLE_SOURCE, &example_functions(), true)
        .unwrap();

    assert!(generated.code.contains("import { PythonApiClient } from './python-api.js';"));
    assert!(
        generated
            .type_declarations
            .unwrap()
            .contains("RegisterResponse } from './python-api.js';")
    );
}
