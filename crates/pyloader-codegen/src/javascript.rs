//! JavaScript emission helpers.
//!
//! Python identifiers are almost always valid JavaScript identifiers; the
//! exceptions are JavaScript reserved words and file names that are not
//! identifiers at all. These helpers detect and map those cases.
//!
//! # Examples
//!
//! ```
//! use pyloader_codegen::javascript::{is_identifier, is_reserved_word, to_identifier};
//!
//! assert!(is_identifier("add_numbers"));
//! assert!(is_reserved_word("delete"));
//! assert_eq!(to_identifier("my-module"), "my_module");
//! ```

use pyloader_core::{Error, Result};

/// Words that cannot be used as bindings in an ES module (strict mode).
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Returns `true` if `word` is reserved in strict-mode JavaScript.
#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Returns `true` if `name` is an identifier both Python and JavaScript accept.
///
/// Reserved words still count as identifiers here; check them separately
/// with [`is_reserved_word`].
///
/// # Examples
///
/// ```
/// use pyloader_codegen::javascript::is_identifier;
///
/// assert!(is_identifier("_private"));
/// assert!(is_identifier("grüßen"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("a-b"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

/// Maps an arbitrary name onto a JavaScript identifier.
///
/// Invalid characters become `_`, a leading digit gets a `_` prefix, and
/// reserved words get a `_` suffix.
///
/// # Examples
///
/// ```
/// use pyloader_codegen::javascript::to_identifier;
///
/// assert_eq!(to_identifier("example"), "example");
/// assert_eq!(to_identifier("2d.tools"), "_2d_tools");
/// assert_eq!(to_identifier("import"), "import_");
/// assert_eq!(to_identifier(""), "_");
/// ```
#[must_use]
pub fn to_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c == '_' || c.is_alphanumeric() { c } else { '_' })
        .collect();

    if ident.chars().next().is_none_or(|c| c.is_numeric()) {
        ident.insert(0, '_');
    }

    if is_reserved_word(&ident) {
        ident.push('_');
    }

    ident
}

/// Renders `value` as a JavaScript string literal.
///
/// Uses JSON string encoding, which is what `JSON.stringify` produces for
/// the same input.
///
/// # Errors
///
/// Returns [`Error::SerializationError`] if encoding fails.
///
/// # Examples
///
/// ```
/// use pyloader_codegen::javascript::string_literal;
///
/// assert_eq!(string_literal("say \"hi\"\n").unwrap(), r#""say \"hi\"\n""#);
/// ```
pub fn string_literal(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::SerializationError {
        message: "failed to encode string literal".to_string(),
        source: Some(e),
    })
}

/// Builds the template-literal argument list of a call script.
///
/// Each argument is stringified independently at call time, in parameter
/// order.
///
/// # Examples
///
/// ```
/// use pyloader_codegen::javascript::stringified_arguments;
///
/// assert_eq!(stringified_arguments(0), "");
/// assert_eq!(
///     stringified_arguments(2),
///     "${JSON.stringify(args[0])}, ${JSON.stringify(args[1])}"
/// );
/// ```
#[must_use]
pub fn stringified_arguments(count: usize) -> String {
    (0..count)
        .map(|i| format!("${{JSON.stringify(args[{i}])}}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks that `name` can be emitted, reporting `field` on failure.
///
/// # Errors
///
/// Returns [`Error::ValidationError`] if `name` is not an identifier.
pub fn require_identifier(field: &str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::ValidationError {
            field: field.to_string(),
            reason: format!("'{name}' is not a valid identifier"),
        })
    }
}
