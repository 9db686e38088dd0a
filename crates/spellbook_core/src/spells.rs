//! The built-in spell schema.
//!
//! Mirrors `config/spells_schema.yml`. It is a plain constructor rather than
//! a global so callers can swap in another schema.

use crate::{Check, ColumnBuilder, Schema, SchemaBuilder, ValueType};

/// Allowed schools of magic.
pub const ESCOLAS: &[&str] = &[
    "elemental",
    "necromancia",
    "psíquica",
    "ilusionista",
    "invocação",
    "espiritual",
    "atrativa",
    "musical",
    "pura",
    "receita",
];

/// Allowed elements.
pub const ELEMENTOS: &[&str] = &[
    "ar",
    "fogo",
    "luz",
    "metal",
    "relâmpago",
    "sombras",
    "terra",
    "veneno",
    "água",
];

/// Allowed tags.
pub const TAGS: &[&str] = &[
    "area",
    "buff",
    "debuff",
    "controle",
    "utilidade",
    "dano",
    "defesa",
    "cura",
    "distância",
    "corpo-a-corpo",
    "toque",
    "arma",
    "comunicação",
    "social",
    "detecção",
    "exploração",
];

/// Allowed classes.
pub const CLASSES: &[&str] = &[
    "arqueiro",
    "bardo",
    "monge",
    "ladino",
    "guerreiro",
    "mago",
    "xamã",
];

/// Allowed damage types and effects.
pub const DMG_EFFECTS: &[&str] = &[
    "N/A",
    // elements and schools
    "ar",
    "fogo",
    "luz",
    "metal",
    "relâmpago",
    "sombras",
    "terra",
    "veneno",
    "água",
    "elemental",
    "psíquico",
    "necrótico",
    "energia",
    // weapon damage
    "concussão",
    "perfurante",
    "cortante",
    // conditions
    "cego",
    "enfeitiçado",
    "surdo",
    "amedrontado",
    "agarrado",
    "incapacitado",
    "invisível",
    "paralisado",
    "petrificado",
    "envenenado",
    "caído",
    "contido",
    "estunado",
    "inconsciente",
    "exausto",
];

/// Allowed sources.
pub const SOURCES: &[&str] = &["LDJ", "Tasha", "Xanathar", "Etc.", "Homebrew"];

/// Casting time, e.g. "1 ação", "10 minutos".
pub const TEMPO_CONJURACAO_PATTERN: &str =
    r"\d+ (ação|ações|ação bônus|ações bônus|reação|reações|minuto|minutos|hora|horas)";

/// Range, e.g. "pessoal", "pessoal (cone de 4,5 metros)", "toque", "18 metros".
pub const ALCANCE_PATTERN: &str =
    r"pessoal( \(cone de \d+(,\d+)? metros?\))?|toque|\d+(,\d+)? metros?";

/// Components, e.g. "VS", "VSM (uma pena)".
pub const COMPONENTES_PATTERN: &str = r"V?S?M?( \(.+\))?";

/// Duration, e.g. "instantânea", "concentração, até 1 minuto".
pub const DURACAO_PATTERN: &str = r"(concentração,\s)?(até\s)?(\d+\s)?(minutos?|horas?|dias?|rodadas?|turnos?|instantâne[oa]|dissipada)";

/// Attack roll or saving throw.
pub const ATTACK_SAVE_PATTERN: &str =
    r"N/A|(DEX|STR|INT|CON|WIS|CHA)\s(Save|Test)|distância|corpo-a-corpo";

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn list_column(name: &str, allowed: &[&str]) -> ColumnBuilder {
    ColumnBuilder::new(name, ValueType::List).check(Check::ListSubsetOf {
        values: owned(allowed),
    })
}

fn regex_column(name: &str, pattern: &str) -> ColumnBuilder {
    ColumnBuilder::new(name, ValueType::String).check(Check::RegexFullmatch {
        pattern: pattern.to_string(),
    })
}

/// Returns the schema of a spell record.
pub fn spell_schema() -> Schema {
    SchemaBuilder::new("spells", "nome")
        .column(
            ColumnBuilder::new("nome", ValueType::String)
                .unique(true)
                .description("Portuguese name")
                .build(),
        )
        .column(
            ColumnBuilder::new("name", ValueType::String)
                .unique(true)
                .description("English name")
                .build(),
        )
        .column(
            ColumnBuilder::new("nivel", ValueType::Integer)
                .check(Check::Range {
                    min: Some(0.0),
                    max: Some(9.0),
                })
                .description("Spell level, 0 for cantrips")
                .build(),
        )
        .column(list_column("escola", ESCOLAS).build())
        .column(
            ColumnBuilder::new("ritual", ValueType::Boolean)
                .default_value(false)
                .build(),
        )
        .column(
            list_column("elementos", ELEMENTOS)
                .default_value(Vec::<String>::new())
                .build(),
        )
        .column(regex_column("tempo_conjuracao", TEMPO_CONJURACAO_PATTERN).build())
        .column(regex_column("alcance_area", ALCANCE_PATTERN).build())
        .column(regex_column("componentes", COMPONENTES_PATTERN).build())
        .column(
            ColumnBuilder::new("mana", ValueType::Integer)
                .check(Check::Range {
                    min: Some(0.0),
                    max: None,
                })
                .build(),
        )
        .column(
            regex_column("duracao", DURACAO_PATTERN)
                .check(Check::Lowercase)
                .build(),
        )
        .column(
            regex_column("attack_save", ATTACK_SAVE_PATTERN)
                .default_value("N/A")
                .build(),
        )
        .column(
            ColumnBuilder::new("dmg_effect", ValueType::String)
                .default_value("N/A")
                .check(Check::IsIn {
                    values: owned(DMG_EFFECTS),
                })
                .build(),
        )
        .column(
            ColumnBuilder::new("dmg", ValueType::String)
                .default_value("N/A")
                .build(),
        )
        .column(list_column("classes", CLASSES).build())
        .column(list_column("tags", TAGS).build())
        .column(ColumnBuilder::new("descricao", ValueType::String).build())
        .column(
            ColumnBuilder::new("source", ValueType::String)
                .check(Check::IsIn {
                    values: owned(SOURCES),
                })
                .build(),
        )
        .column(
            ColumnBuilder::new("mana_adicional", ValueType::String)
                .default_value("N/A")
                .build(),
        )
        .column(
            ColumnBuilder::new("magia_rara", ValueType::Boolean)
                .default_value(false)
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spell_schema_is_well_formed() {
        let schema = spell_schema();
        assert!(schema.check_definition().is_ok());
        assert_eq!(schema.columns.len(), 20);
        assert_eq!(schema.key_column, "nome");
    }

    #[test]
    fn test_spell_schema_list_columns() {
        let schema = spell_schema();
        assert_eq!(
            schema.list_columns(),
            vec!["escola", "elementos", "classes", "tags"]
        );
    }

    #[test]
    fn test_spell_schema_defaults() {
        let defaults = spell_schema().column_defaults();
        assert_eq!(defaults.len(), 7);
        assert_eq!(defaults.get("elementos"), Some(&Value::List(vec![])));
        assert_eq!(defaults.get("ritual"), Some(&Value::Bool(false)));
        assert_eq!(defaults.get("attack_save"), Some(&Value::from("N/A")));
        assert_eq!(defaults.get("nome"), None);
    }
}
