#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line/column position in the translation unit.
///
/// Attached to every token, AST node and instruction. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeLoc {
    pub line: u32,
    pub column: u32,
}

impl CodeLoc {
    pub fn new(line: u32, column: u32) -> Self {
        CodeLoc { line, column }
    }

    pub fn start() -> Self {
        CodeLoc { line: 1, column: 1 }
    }
}

impl Display for CodeLoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}C{}", self.line, self.column)
    }
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_source_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders an error with a source excerpt and a caret under the offending column.
///
/// ```text
/// Error: UnexpectedToken (unexpected token kind TOK_LBRACE, expected one of {TOK_RPAREN})
/// -> main.lang
///   |
/// 1 | int main := ( {
///   | --------------^
/// ```
pub fn format_error(error: &Error, source: &str, file_name: &str) -> String {
    let location = error.get_location();
    let line_string = location.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file_name));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_source_line(source, location.line).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (location.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file_name: &str) {
    eprint!("{}", format_error(error, source, file_name));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::tokens::TokenKind,
        CodeLoc,
    };

    #[test]
    fn test_get_source_line() {
        let content = std::fs::read_to_string("tests/test_file.txt").unwrap();

        assert_eq!(super::get_source_line(&content, 1), Some("int main := () {"));
        assert_eq!(super::get_source_line(&content, 3), Some("  return x + 2;"));
        assert_eq!(super::get_source_line(&content, 0), None);
        assert_eq!(super::get_source_line(&content, 42), None);
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "int main := ( {\n}";
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: vec![TokenKind::RParen],
                actual: TokenKind::LBrace,
            },
            CodeLoc::new(1, 15),
        );

        let rendered = super::format_error(&error, source, "main.lang");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "Error: UnexpectedToken (unexpected token kind TOK_LBRACE, expected one of {TOK_RPAREN})"
        );
        assert_eq!(lines[1], "-> main.lang");
        assert_eq!(lines[3], "1 | int main := ( {");
        assert_eq!(lines[4], "  | --------------^");
    }

    #[test]
    fn test_code_loc_display() {
        assert_eq!(CodeLoc::new(3, 7).to_string(), "L3C7");
        assert_eq!(CodeLoc::start(), CodeLoc::new(1, 1));
    }
}
