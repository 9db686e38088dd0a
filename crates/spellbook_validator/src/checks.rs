//! Value checks, compiled once per schema.
//!
//! Every [`Check`] variant is evaluated by [`CompiledCheck::passes`]. Regex
//! patterns are anchored so that only full matches pass.

use regex::Regex;
use spellbook_core::{Check, SchemaError, Value};
use std::collections::HashSet;

/// A check ready to be evaluated against values.
#[derive(Debug, Clone)]
pub struct CompiledCheck {
    name: String,
    kind: CheckKind,
}

#[derive(Debug, Clone)]
enum CheckKind {
    Range { min: Option<f64>, max: Option<f64> },
    IsIn(HashSet<String>),
    ListSubsetOf(HashSet<String>),
    Fullmatch(Regex),
    Lowercase,
}

impl CompiledCheck {
    /// Compiles `check` declared on `column`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if a regex does not compile.
    pub fn compile(column: &str, check: &Check) -> Result<Self, SchemaError> {
        let kind = match check {
            Check::Range { min, max } => CheckKind::Range {
                min: *min,
                max: *max,
            },
            Check::IsIn { values } => CheckKind::IsIn(values.iter().cloned().collect()),
            Check::ListSubsetOf { values } => {
                CheckKind::ListSubsetOf(values.iter().cloned().collect())
            }
            Check::RegexFullmatch { pattern } => {
                let anchored = format!("^(?:{})$", pattern);
                let regex = Regex::new(&anchored).map_err(|e| SchemaError::InvalidPattern {
                    column: column.to_string(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                CheckKind::Fullmatch(regex)
            }
            Check::Lowercase => CheckKind::Lowercase,
        };

        Ok(Self {
            name: check.name(),
            kind,
        })
    }

    /// Returns the report name of the check.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `value` satisfies the check.
    ///
    /// Callers skip nulls and values of the wrong type; a value the check
    /// cannot interpret fails.
    pub fn passes(&self, value: &Value) -> bool {
        match &self.kind {
            CheckKind::Range { min, max } => value.as_float().is_some_and(|number| {
                min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
            }),
            CheckKind::IsIn(allowed) => !value.is_list() && allowed.contains(&value.to_string()),
            CheckKind::ListSubsetOf(allowed) => value
                .as_list()
                .is_some_and(|items| items.iter().all(|item| allowed.contains(item))),
            CheckKind::Fullmatch(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            CheckKind::Lowercase => value.as_str().is_some_and(|s| {
                s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellbook_core::spells::{ALCANCE_PATTERN, DURACAO_PATTERN, TEMPO_CONJURACAO_PATTERN};

    fn regex(pattern: &str) -> CompiledCheck {
        CompiledCheck::compile(
            "col",
            &Check::RegexFullmatch {
                pattern: pattern.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_range_inclusive_and_open() {
        let level = CompiledCheck::compile(
            "nivel",
            &Check::Range {
                min: Some(0.0),
                max: Some(9.0),
            },
        )
        .unwrap();
        assert!(level.passes(&Value::Int(0)));
        assert!(level.passes(&Value::Int(9)));
        assert!(!level.passes(&Value::Int(15)));
        assert!(!level.passes(&Value::Int(-1)));
        assert_eq!(level.name(), "range(0, 9)");

        let mana = CompiledCheck::compile(
            "mana",
            &Check::Range {
                min: Some(0.0),
                max: None,
            },
        )
        .unwrap();
        assert!(mana.passes(&Value::Int(1_000)));
        assert!(!mana.passes(&Value::Int(-3)));
    }

    #[test]
    fn test_isin_compares_string_form() {
        let check = CompiledCheck::compile(
            "source",
            &Check::IsIn {
                values: vec!["LDJ".to_string(), "3".to_string()],
            },
        )
        .unwrap();
        assert!(check.passes(&Value::from("LDJ")));
        assert!(check.passes(&Value::Int(3)));
        assert!(!check.passes(&Value::from("ldj")));
    }

    #[test]
    fn test_list_subset() {
        let check = CompiledCheck::compile(
            "elementos",
            &Check::ListSubsetOf {
                values: vec!["fogo".to_string(), "ar".to_string()],
            },
        )
        .unwrap();
        assert!(check.passes(&Value::List(vec![])));
        assert!(check.passes(&Value::from(vec!["fogo", "ar"])));
        assert!(!check.passes(&Value::from(vec!["fogo", "gelo"])));
    }

    #[test]
    fn test_regex_is_full_match() {
        let tempo = regex(TEMPO_CONJURACAO_PATTERN);
        assert!(tempo.passes(&Value::from("1 ação")));
        assert!(tempo.passes(&Value::from("1 ação bônus")));
        assert!(tempo.passes(&Value::from("10 minutos")));
        assert!(!tempo.passes(&Value::from("1 ações extra")));
        assert!(!tempo.passes(&Value::from("uma ação")));

        let alternation = regex("a|b");
        assert!(alternation.passes(&Value::from("a")));
        assert!(!alternation.passes(&Value::from("ab")));
    }

    #[test]
    fn test_spell_patterns() {
        let alcance = regex(ALCANCE_PATTERN);
        assert!(alcance.passes(&Value::from("pessoal")));
        assert!(alcance.passes(&Value::from("pessoal (cone de 4,5 metros)")));
        assert!(alcance.passes(&Value::from("pessoal (cone de 9 metros)")));
        assert!(alcance.passes(&Value::from("18 metros")));
        assert!(alcance.passes(&Value::from("1,5 metro")));
        assert!(!alcance.passes(&Value::from("longe")));

        let duracao = regex(DURACAO_PATTERN);
        assert!(duracao.passes(&Value::from("instantânea")));
        assert!(duracao.passes(&Value::from("concentração, até 1 minuto")));
        assert!(duracao.passes(&Value::from("8 horas")));
        assert!(!duracao.passes(&Value::from("para sempre")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = CompiledCheck::compile(
            "componentes",
            &Check::RegexFullmatch {
                pattern: "V(".to_string(),
            },
        );
        assert!(matches!(
            result,
            Err(SchemaError::InvalidPattern { column, .. }) if column == "componentes"
        ));
    }

    #[test]
    fn test_lowercase() {
        let check = CompiledCheck::compile("duracao", &Check::Lowercase).unwrap();
        assert!(check.passes(&Value::from("1 minuto")));
        assert!(!check.passes(&Value::from("1 Minuto")));
        // At least one cased character is required.
        assert!(!check.passes(&Value::from("123")));
        assert!(!check.passes(&Value::from("")));
    }
}
