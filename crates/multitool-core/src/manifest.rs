//! Model-facing manifest of a toolkit.
//!
//! The manifest is an XML-like listing of every category and tool with the
//! tool's argument schema inlined. Categories and tools are emitted sorted by
//! name so the output is stable across runs.

use crate::toolkit::Toolkit;
use std::fmt::Write;

const CHILD_NOTE: &str =
    "**NOTE**: A child tool cannot be invoked directly, the parent tool must be invoked first via its parent.";

pub(crate) fn render(toolkit: &Toolkit) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "In this environment, you have access to the following <toolkit name=\"{}\">:",
        escape(toolkit.name())
    );
    out.push_str(
        "A <toolkit> is a collection of <parents>, a <parent> is a collection of <childs>.\n",
    );
    out.push_str("Below is the list of available <parents> and their <childs>:\n");

    for category in toolkit.categories() {
        let _ = writeln!(
            out,
            "<parent name=\"{}\" description=\"{}\">",
            escape(category.name()),
            escape(category.description())
        );
        for tool in category.tools() {
            let _ = writeln!(
                out,
                "<child name=\"{}\" description=\"{}\"><input_schema>{}</input_schema></child>",
                escape(tool.name()),
                escape(tool.description()),
                tool.schema().to_compact_string()
            );
        }
        out.push_str("</parent>\n");
        out.push_str(CHILD_NOTE);
        out.push('\n');
    }
    out.push_str("</toolkit>");
    out
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
