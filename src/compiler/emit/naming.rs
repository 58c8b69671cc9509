//! Derivation of generated names and comments from schema names and docs.
use crate::compiler::ast::Docs;

/// The name of the constant holding a declaration's value.
pub fn constant_name(name: &str) -> String {
    name.to_uppercase()
}

/// The name of the constant holding a declaration's width.
pub fn width_name(name: &str) -> String {
    format!("{}_WIDTH", constant_name(name))
}

pub fn count_width_name(name: &str) -> String {
    format!("{}_COUNT_WIDTH", constant_name(name))
}

pub fn width_one_name(name: &str) -> String {
    format!("{}_WIDTH_ONE", constant_name(name))
}

/// Flattens documentation onto a single line so it can trail a line of
/// output.
pub fn trailing(text: &str) -> String {
    text.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders documentation as whole comment lines: the summary, then every
/// line of the verbose documentation.
pub fn leading(docs: &Docs, indent: &str) -> Vec<String> {
    let mut lines = vec![];
    for line in docs.summary.lines() {
        lines.push(comment(indent, line));
    }
    if let Some(verbose) = &docs.verbose {
        for line in verbose.lines() {
            lines.push(comment(indent, line));
        }
    }
    lines
}

/// Renders only the verbose documentation as comment lines.
pub fn verbose(docs: &Docs, indent: &str) -> Vec<String> {
    docs.verbose
        .iter()
        .flat_map(|v| v.lines())
        .map(|line| comment(indent, line))
        .collect()
}

fn comment(indent: &str, line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        format!("{}//", indent)
    } else {
        format!("{}// {}", indent, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        for (name, expected) in vec![
            ("hero_write_t", ("HERO_WRITE_T", "HERO_WRITE_T_WIDTH")),
            ("DEPTH", ("DEPTH", "DEPTH_WIDTH")),
        ] {
            assert_eq!(
                (constant_name(name), width_name(name)),
                (expected.0.to_string(), expected.1.to_string())
            );
        }
        assert_eq!(count_width_name("Depth"), "DEPTH_COUNT_WIDTH");
        assert_eq!(width_one_name("Depth"), "DEPTH_WIDTH_ONE");
    }

    #[test]
    fn comments() {
        let docs = Docs::new("A bus.", Some("First line.\n\nThird line.\n"));
        assert_eq!(
            leading(&docs, ""),
            vec!["// A bus.", "// First line.", "//", "// Third line."]
        );
        assert_eq!(
            verbose(&docs, "    "),
            vec!["    // First line.", "    //", "    // Third line."]
        );
        assert_eq!(trailing("Spans\n  two lines"), "Spans two lines");
    }
}
