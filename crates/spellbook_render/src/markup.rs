//! Lightweight markup for a single spell.
//!
//! A spell is rendered as a sequence of parts (name line, header,
//! description, tags, classes, source). Inside a part, `**x**` is bold and
//! `_x_` is italic. Each part is wrapped in a `span` carrying its colour and
//! font size:
//!
//! ```text
//! <span style='color:gray;font-size:11px'>[area, dano]<br></span>
//! ```

use spellbook_core::{Record, Value};

/// Value of a string field meaning "not applicable".
pub const NOT_APPLICABLE: &str = "N/A";

/// Colour and size of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// CSS colour, `None` for the surrounding colour
    pub color: Option<&'static str>,
    /// CSS font size, `None` for the surrounding size
    pub size: Option<&'static str>,
}

impl Style {
    /// Surrounding colour and size.
    pub const PLAIN: Style = Style {
        color: None,
        size: None,
    };
    /// Casting time, range, components and duration.
    pub const HEADER: Style = Style {
        color: None,
        size: Some("13px"),
    };
    /// Tags and classes.
    pub const FOOTNOTE: Style = Style {
        color: Some("gray"),
        size: Some("11px"),
    };
    /// Source book.
    pub const SOURCE: Style = Style {
        color: Some("gray"),
        size: Some("10px"),
    };

    /// Wraps `text` into a styled span. Newlines become `<br>` and tabs
    /// become `&emsp;`.
    pub fn apply(&self, text: &str) -> String {
        let text = text.replace('\n', "<br>").replace('\t', "&emsp;");
        format!(
            "<span style='color:{};font-size:{}'>{}</span>",
            self.color.unwrap_or("inherit"),
            self.size.unwrap_or("inherit"),
            text
        )
    }
}

/// Which parts of a spell to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSelection {
    /// Name line with level, ritual and rarity
    pub name: bool,
    /// Casting time, range, components and duration
    pub header: bool,
    /// Description text
    pub description: bool,
    /// Tags
    pub tags: bool,
    /// Classes that can learn the spell
    pub classes: bool,
    /// Source book
    pub source: bool,
}

impl Default for PartSelection {
    fn default() -> Self {
        Self {
            name: true,
            header: true,
            description: true,
            tags: true,
            classes: true,
            source: true,
        }
    }
}

/// Builds the markup parts of a spell record.
pub struct SpellMarkup;

impl SpellMarkup {
    /// Returns the selected parts of `record`, each wrapped in a styled span.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spellbook_core::{Record, Value};
    /// use spellbook_render::{PartSelection, SpellMarkup};
    ///
    /// let record = Record::from([
    ///     ("nome".to_string(), Value::from("Luz")),
    ///     ("name".to_string(), Value::from("Light")),
    ///     ("nivel".to_string(), Value::Int(0)),
    /// ]);
    /// let selection = PartSelection {
    ///     header: false,
    ///     description: false,
    ///     tags: false,
    ///     classes: false,
    ///     source: false,
    ///     ..PartSelection::default()
    /// };
    ///
    /// let parts = SpellMarkup::parts(&record, &selection);
    /// assert_eq!(
    ///     parts,
    ///     vec!["<span style='color:inherit;font-size:inherit'>**Luz _(Light)_** - truque<br></span>"]
    /// );
    /// ```
    pub fn parts(record: &Record, selection: &PartSelection) -> Vec<String> {
        let mut parts = Vec::new();
        if selection.name {
            parts.push(Style::PLAIN.apply(&Self::name_line(record)));
        }
        if selection.header {
            parts.push(Style::HEADER.apply(&Self::header(record)));
        }
        if selection.description {
            parts.push(Style::PLAIN.apply(&format!("{}\n", text(record, "descricao"))));
        }
        if selection.tags {
            parts.push(Style::FOOTNOTE.apply(&sorted_list(record, "tags")));
        }
        if selection.classes {
            parts.push(Style::FOOTNOTE.apply(&sorted_list(record, "classes")));
        }
        if selection.source {
            parts.push(Style::SOURCE.apply(&format!("_{}_", text(record, "source"))));
        }
        parts
    }

    /// `**nome _(name)_**` followed by level, ritual and rarity.
    pub fn name_line(record: &Record) -> String {
        let level = match record.get("nivel").and_then(Value::as_int) {
            Some(level) if level > 0 => format!(" lvl {}", level),
            _ => " - truque".to_string(),
        };
        let ritual = if flag(record, "ritual") { " - ritual" } else { "" };

        format!(
            "**{} _({})_**{}{}{}\n",
            text(record, "nome"),
            text(record, "name"),
            level,
            ritual,
            rarity(record)
        )
    }

    /// Short form used in summaries: `nome _(name)_` and rarity.
    /// Not styled; see [`Style::apply`].
    pub fn summary_line(record: &Record) -> String {
        format!(
            "{} _({})_{}\n ",
            text(record, "nome"),
            text(record, "name"),
            rarity(record)
        )
    }

    fn header(record: &Record) -> String {
        let mut header = format!("\t**Escola(s):** {}\n", schools(record));
        header += &format!(
            "\t**Tempo conjuração:** {}\n",
            text(record, "tempo_conjuracao")
        );
        header += &format!("\t**Alcance:** {}\n", text(record, "alcance_area"));
        header += &format!("\t**Componentes:** {}\n", components(record));
        header += &format!("\t**Mana:** {}\n", mana(record));
        header += &format!("\t**Duração:** {}\n", text(record, "duracao"));

        for (column, label) in [
            ("dmg", "**Dano**:"),
            ("attack_save", "**Attack/Save:**"),
            ("dmg_effect", "**Dmg/effect:**"),
        ] {
            let value = text(record, column);
            if !value.is_empty() && value != NOT_APPLICABLE {
                header += &format!("\t{} {}\n", label, value);
            }
        }
        header
    }
}

fn text(record: &Record, column: &str) -> String {
    match record.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::List(items)) => items.join(", "),
        Some(value) => value.to_string(),
    }
}

fn flag(record: &Record, column: &str) -> bool {
    record.get(column).and_then(Value::as_bool).unwrap_or(false)
}

fn rarity(record: &Record) -> &'static str {
    if flag(record, "magia_rara") {
        " (Rara)"
    } else {
        ""
    }
}

fn list<'a>(record: &'a Record, column: &str) -> &'a [String] {
    record.get(column).and_then(Value::as_list).unwrap_or(&[])
}

fn sorted_list(record: &Record, column: &str) -> String {
    let mut items = list(record, column).to_vec();
    items.sort();
    format!("[{}]\n", items.join(", "))
}

/// Schools, with the elements in italics for elemental spells.
fn schools(record: &Record) -> String {
    let schools = list(record, "escola");
    let elements = list(record, "elementos");
    let joined = schools.join(", ");

    if schools.iter().any(|school| school == "elemental") && !elements.is_empty() {
        format!("{} (_{}_)", joined, elements.join(", "))
    } else {
        joined
    }
}

/// `VSM (a feather)` becomes `VSM _(a feather)_`.
fn components(record: &Record) -> String {
    let components = text(record, "componentes");
    let note = components
        .find('(')
        .zip(components.rfind(')'))
        .filter(|(open, close)| close > &(open + 1));

    match note {
        Some((open, close)) => {
            let letters = components.split(' ').next().unwrap_or_default();
            format!("{} _{}_", letters, &components[open..=close])
        }
        None => components,
    }
}

fn mana(record: &Record) -> String {
    let mana = text(record, "mana");
    match text(record, "mana_adicional").as_str() {
        "" | NOT_APPLICABLE => mana,
        extra => format!("{} (_+ {}_)", mana, extra),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fireball() -> Record {
        let fields: Vec<(&str, Value)> = vec![
            ("nome", "Bola de Fogo".into()),
            ("name", "Fireball".into()),
            ("nivel", Value::Int(3)),
            ("escola", vec!["elemental"].into()),
            ("elementos", vec!["fogo"].into()),
            ("ritual", false.into()),
            ("magia_rara", true.into()),
            ("tempo_conjuracao", "1 ação".into()),
            ("alcance_area", "45 metros".into()),
            ("componentes", "VSM (guano de morcego)".into()),
            ("mana", Value::Int(5)),
            ("mana_adicional", "1 por nível".into()),
            ("duracao", "instantânea".into()),
            ("dmg", "8d6".into()),
            ("attack_save", "DEX Save".into()),
            ("dmg_effect", "N/A".into()),
            ("descricao", "Uma explosão.".into()),
            ("tags", vec!["dano", "area"].into()),
            ("classes", vec!["mago"].into()),
            ("source", "LDJ".into()),
        ];
        fields
            .into_iter()
            .map(|(column, value)| (column.to_string(), value))
            .collect()
    }

    #[test]
    fn test_name_line() {
        assert_eq!(
            SpellMarkup::name_line(&fireball()),
            "**Bola de Fogo _(Fireball)_** lvl 3 (Rara)\n"
        );
    }

    #[test]
    fn test_header() {
        assert_eq!(
            SpellMarkup::header(&fireball()),
            "\t**Escola(s):** elemental (_fogo_)\n\
             \t**Tempo conjuração:** 1 ação\n\
             \t**Alcance:** 45 metros\n\
             \t**Componentes:** VSM _(guano de morcego)_\n\
             \t**Mana:** 5 (_+ 1 por nível_)\n\
             \t**Duração:** instantânea\n\
             \t**Dano**: 8d6\n\
             \t**Attack/Save:** DEX Save\n"
        );
    }

    #[test]
    fn test_parts_are_styled() {
        let parts = SpellMarkup::parts(&fireball(), &PartSelection::default());
        assert_eq!(parts.len(), 6);
        assert_eq!(
            parts[3],
            "<span style='color:gray;font-size:11px'>[area, dano]<br></span>"
        );
        assert_eq!(
            parts[5],
            "<span style='color:gray;font-size:10px'>_LDJ_</span>"
        );
    }

    #[test]
    fn test_components_without_note() {
        let mut record = fireball();
        record.insert("componentes".to_string(), Value::from("VS"));
        assert_eq!(components(&record), "VS");
    }
}
