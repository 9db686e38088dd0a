//! Conversion of spell markup into LaTeX.

use crate::{PartSelection, SpellMarkup, Style};
use spellbook_core::Record;

const SPAN_OPEN: &str = "<span style='color:";
const SPAN_SIZE: &str = ";font-size:";
const SPAN_BODY: &str = "'>";
const SPAN_CLOSE: &str = "</span>";

/// A styled span split into its parts.
struct Span<'a> {
    color: Option<&'a str>,
    size: Option<&'a str>,
    body: &'a str,
}

impl<'a> Span<'a> {
    /// Splits a span produced by [`Style::apply`]. Text that is not a span is
    /// taken as an unstyled body.
    fn parse(markup: &'a str) -> Self {
        let parsed = markup
            .strip_prefix(SPAN_OPEN)
            .and_then(|rest| rest.strip_suffix(SPAN_CLOSE))
            .and_then(|rest| rest.split_once(SPAN_SIZE))
            .and_then(|(color, rest)| {
                let (size, body) = rest.split_once(SPAN_BODY)?;
                Some((color, size, body))
            });

        match parsed {
            Some((color, size, body)) => Self {
                color: specified(color),
                size: specified(size),
                body,
            },
            None => Self {
                color: None,
                size: None,
                body: markup,
            },
        }
    }
}

fn specified(value: &str) -> Option<&str> {
    match value {
        "" | "inherit" | "None" => None,
        value => Some(value),
    }
}

fn size_command(size: Option<&str>) -> &'static str {
    match size {
        Some("10px") => r"\tiny",
        Some("11px") => r"\scriptsize",
        Some("13px") => r"\small",
        _ => r"\normalsize",
    }
}

/// Converts the body of a span: bold, italics, line breaks, tabs and
/// escaping. Groups left open at the end are closed.
fn convert_body(body: &str) -> String {
    let text = body.replace("<br>", "\n").replace("&emsp;", "\t");
    let mut latex = String::with_capacity(text.len() * 2);
    let mut bold = false;
    let mut italic = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                latex.push_str(if bold { "}" } else { r"\textbf{" });
                bold = !bold;
            }
            '_' => {
                latex.push_str(if italic { "}" } else { r"\textit{" });
                italic = !italic;
            }
            '\n' => latex.push_str(r"\\"),
            '\t' => latex.push_str(r"\t "),
            '%' | '&' | '#' | '$' => {
                latex.push('\\');
                latex.push(c);
            }
            c => latex.push(c),
        }
    }

    if italic {
        latex.push('}');
    }
    if bold {
        latex.push('}');
    }
    latex
}

/// Converts one markup part into a LaTeX group.
///
/// # Example
///
/// ```rust
/// use spellbook_render::to_latex;
///
/// let latex = to_latex("<span style='color:gray;font-size:10px'>_LDJ_</span>");
/// assert_eq!(latex, r"{\tiny \textcolor{gray}{\textit{LDJ}}}");
/// ```
pub fn to_latex(markup: &str) -> String {
    let span = Span::parse(markup);
    let body = convert_body(span.body);
    let colored = match span.color {
        Some(color) => format!(r"\textcolor{{{}}}{{{}}}", color, body),
        None => body,
    };
    format!("{{{} {}}}", size_command(span.size), colored)
}

/// Converts every part and joins them with newlines.
pub fn parts_to_latex<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| to_latex(part.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full LaTeX description of one spell.
pub fn spell_to_latex(record: &Record, selection: &PartSelection) -> String {
    let parts = SpellMarkup::parts(record, selection);
    format!(r"\noindent{}", parts_to_latex(&parts))
}

/// One summary line for a spell.
pub fn summary_to_latex(record: &Record) -> String {
    to_latex(&Style::PLAIN.apply(&SpellMarkup::summary_line(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spellbook_core::Value;

    #[test]
    fn test_name_line() {
        let latex = to_latex(
            "<span style='color:inherit;font-size:inherit'>**Luz _(Light)_** - truque<br></span>",
        );
        assert_eq!(
            latex,
            r"{\normalsize \textbf{Luz \textit{(Light)}} - truque\\}"
        );
    }

    #[test]
    fn test_colour_and_size() {
        assert_eq!(
            to_latex("<span style='color:gray;font-size:11px'>[area, dano]<br></span>"),
            r"{\scriptsize \textcolor{gray}{[area, dano]\\}}"
        );
        assert_eq!(
            to_latex("<span style='color:inherit;font-size:13px'>&emsp;**Mana:** 5<br></span>"),
            r"{\small \t \textbf{Mana:} 5\\}"
        );
    }

    #[test]
    fn test_special_characters_are_escaped() {
        assert_eq!(
            to_latex("50% & #1 $"),
            r"{\normalsize 50\% \& \#1 \$}"
        );
    }

    #[test]
    fn test_unbalanced_markers_are_closed() {
        assert_eq!(to_latex("**a _b"), r"{\normalsize \textbf{a \textit{b}}}");
    }

    #[test]
    fn test_spell_to_latex() {
        let record = Record::from([
            ("nome".to_string(), Value::from("Luz")),
            ("name".to_string(), Value::from("Light")),
            ("nivel".to_string(), Value::Int(0)),
            ("source".to_string(), Value::from("LDJ")),
        ]);
        let selection = PartSelection {
            header: false,
            description: false,
            tags: false,
            classes: false,
            ..PartSelection::default()
        };

        assert_eq!(
            spell_to_latex(&record, &selection),
            "\\noindent{\\normalsize \\textbf{Luz \\textit{(Light)}} - truque\\\\}\n\
             {\\tiny \\textcolor{gray}{\\textit{LDJ}}}"
        );
    }

    #[test]
    fn test_summary_line() {
        let record = Record::from([
            ("nome".to_string(), Value::from("Escudo")),
            ("name".to_string(), Value::from("Shield")),
            ("magia_rara".to_string(), Value::Bool(true)),
        ]);
        assert_eq!(
            summary_to_latex(&record),
            r"{\normalsize Escudo \textit{(Shield)} (Rara)\\ }"
        );
    }
}
