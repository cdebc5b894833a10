//! Runtime support emitted alongside user code.
//!
//! The language has a single builtin, `print`, lowered to a variadic call to
//! the C `printf`. This module renders the external declaration, one private
//! format string per printable type, and the constants backing string
//! literals.

use crate::ast::nodes::DataType;

const PRINTABLE: [DataType; 4] = [
    DataType::Int,
    DataType::Double,
    DataType::String,
    DataType::Bool,
];

pub fn printf_declaration() -> String {
    String::from("declare i32 @printf(ptr, ...)")
}

/// Name of the format string global used to print a value of type `ty`.
pub fn format_string_name(ty: DataType) -> String {
    format!("@.fmt.{}", ty.spelling())
}

fn format_specifier(ty: DataType) -> &'static str {
    match ty {
        DataType::Int | DataType::Bool => "%d\n",
        DataType::Double => "%f\n",
        DataType::String => "%s\n",
    }
}

/// Everything `print` needs at module level: the `printf` declaration
/// followed by one format string per printable type.
pub fn print_support() -> Vec<String> {
    let mut lines = vec![printf_declaration()];
    lines.extend(
        PRINTABLE
            .iter()
            .map(|ty| string_constant(&format_string_name(*ty), format_specifier(*ty))),
    );
    lines
}

/// A NUL-terminated private byte array holding `text`.
pub fn string_constant(name: &str, text: &str) -> String {
    format!(
        "{} = private unnamed_addr constant [{} x i8] c\"{}\\00\"",
        name,
        text.len() + 1,
        escape_bytes(text)
    )
}

fn escape_bytes(text: &str) -> String {
    text.bytes()
        .map(|byte| match byte {
            b' '..=b'~' if byte != b'"' && byte != b'\\' => (byte as char).to_string(),
            _ => format!("\\{:02X}", byte),
        })
        .collect()
}
