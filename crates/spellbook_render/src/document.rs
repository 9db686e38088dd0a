//! Full LaTeX documents for a record set.

use crate::{PartSelection, spell_to_latex, summary_to_latex};
use spellbook_core::{Record, RecordSet, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Layout of the generated LaTeX document.
///
/// # Example
///
/// ```rust
/// use spellbook_core::RecordSet;
/// use spellbook_render::DocumentTemplate;
///
/// let latex = DocumentTemplate::new()
///     .title("Grimório")
///     .input("preamble")
///     .render(&RecordSet::empty());
///
/// assert!(latex.starts_with("\\documentclass{RPG_Adventure}"));
/// assert!(latex.contains("\\title{Grimório}"));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    /// Argument of `\documentclass`
    pub document_class: String,
    /// Title, also enables `\maketitle`
    pub title: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Files pulled in with `\input` before `\begin{document}`
    pub preamble: Vec<String>,
    /// Adds a summary chapter grouped by level
    pub with_summary: bool,
    /// Parts rendered for each spell
    pub parts: PartSelection,
}

impl DocumentTemplate {
    /// Creates a template for the `RPG_Adventure` class, with a summary and
    /// every part.
    pub fn new() -> Self {
        Self {
            document_class: "RPG_Adventure".to_string(),
            title: None,
            author: None,
            preamble: Vec::new(),
            with_summary: true,
            parts: PartSelection::default(),
        }
    }

    /// Sets the document class.
    pub fn document_class(mut self, document_class: impl Into<String>) -> Self {
        self.document_class = document_class.into();
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Adds a file to `\input` in the preamble.
    pub fn input(mut self, file: impl Into<String>) -> Self {
        self.preamble.push(file.into());
        self
    }

    /// Enables or disables the summary chapter.
    pub fn with_summary(mut self, with_summary: bool) -> Self {
        self.with_summary = with_summary;
        self
    }

    /// Selects the parts rendered for each spell.
    pub fn parts(mut self, parts: PartSelection) -> Self {
        self.parts = parts;
        self
    }

    /// Renders `records`, in their current order, into a complete document.
    pub fn render(&self, records: &RecordSet) -> String {
        debug!("Rendering {} spell(s)", records.len());

        let mut latex = format!("\\documentclass{{{}}}\n", self.document_class);
        for file in &self.preamble {
            latex += &format!("\\input{{{}}}\n", file);
        }
        latex += "\\providecommand{\\jump}{\\par\\medskip}\n";
        if let Some(title) = &self.title {
            latex += &format!("\\title{{{}}}\n", title);
        }
        if let Some(author) = &self.author {
            latex += &format!("\\author{{{}}}\n", author);
        }

        latex += "\\begin{document}\n";
        if self.title.is_some() {
            latex += "\\maketitle\n";
        }
        if self.with_summary {
            latex += &self.summary(records);
        }
        latex += &self.descriptions(records);
        latex += "\\end{document}\n";
        latex
    }

    /// Spell names grouped by level, cantrips first.
    fn summary(&self, records: &RecordSet) -> String {
        let mut levels: BTreeMap<i64, Vec<&Record>> = BTreeMap::new();
        for record in records {
            match record.get("nivel").and_then(Value::as_int) {
                Some(level) => levels.entry(level).or_default().push(record),
                None => debug!("Spell without a level left out of the summary"),
            }
        }

        let mut latex = "\\chapter{Sumário}\n\n".to_string();
        for (level, spells) in levels {
            let heading = if level == 0 {
                "Truques".to_string()
            } else {
                format!("Ciclo {}", level)
            };
            latex += &format!("\\noindent\\textbf{{{}}}\\jump\n", heading);
            for spell in spells {
                latex += &summary_to_latex(spell);
                latex.push('\n');
            }
            latex += "\\jump\n";
        }
        latex
    }

    fn descriptions(&self, records: &RecordSet) -> String {
        let mut latex = "\\chapter{Magias}\n\n".to_string();
        for record in records {
            latex += &spell_to_latex(record, &self.parts);
            latex += "\\jump\n";
        }
        latex
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(nome: &str, nivel: i64) -> Record {
        Record::from([
            ("nome".to_string(), Value::from(nome)),
            ("name".to_string(), Value::from(nome)),
            ("nivel".to_string(), Value::Int(nivel)),
        ])
    }

    fn records() -> RecordSet {
        RecordSet::from_records(vec![spell("Luz", 0), spell("Escudo", 1), spell("Alarme", 1)])
    }

    #[test]
    fn test_document_frame() {
        let latex = DocumentTemplate::new()
            .document_class("book")
            .author("Mestre")
            .render(&records());

        assert!(latex.starts_with("\\documentclass{book}\n"));
        assert!(latex.contains("\\author{Mestre}\n"));
        assert!(!latex.contains("\\maketitle"));
        assert!(latex.ends_with("\\end{document}\n"));
    }

    #[test]
    fn test_summary_groups_by_level() {
        let latex = DocumentTemplate::new().render(&records());

        let truques = latex.find("\\textbf{Truques}").unwrap();
        let ciclo = latex.find("\\textbf{Ciclo 1}").unwrap();
        let magias = latex.find("\\chapter{Magias}").unwrap();
        assert!(truques < ciclo && ciclo < magias);
        assert_eq!(latex.matches("Ciclo 1").count(), 1);
    }

    #[test]
    fn test_every_spell_is_described() {
        let latex = DocumentTemplate::new()
            .with_summary(false)
            .render(&records());

        assert!(!latex.contains("Sumário"));
        assert_eq!(latex.matches("\\noindent{").count(), 3);
        assert_eq!(latex.matches("}\\jump\n").count(), 3);
    }
}
