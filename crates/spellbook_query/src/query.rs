//! Free-form queries evaluated by DataFusion.
//!
//! The record set is loaded into an in-memory table named `records`, one
//! Arrow column per declared column plus a hidden row index. The expression
//! becomes the `WHERE` clause of a generated `SELECT`, and the selected row
//! indices are mapped back onto the input record set.

use crate::codec::join_list_columns;
use crate::{QueryError, filter};
use arrow_array::cast::AsArray;
use arrow_array::types::UInt64Type;
use arrow_array::{ArrayRef, BooleanArray, Int64Array, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema as ArrowSchema};
use datafusion::error::DataFusionError;
use datafusion::prelude::SessionContext;
use datafusion::sql::sqlparser::dialect::GenericDialect;
use datafusion::sql::sqlparser::keywords::Keyword;
use datafusion::sql::sqlparser::parser::Parser;
use datafusion::sql::sqlparser::tokenizer::{Token, Tokenizer};
use spellbook_core::{FilterSpec, QueryExpression, RecordSet, Schema, Value, ValueType};
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the table the expression is evaluated against.
pub const TABLE_NAME: &str = "records";

const ROW_INDEX: &str = "__row_index";

const NULL: &Value = &Value::Null;

/// Filter and query engine bound to one schema.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{QueryExpression, Record, RecordSet, Value, spells::spell_schema};
/// use spellbook_query::QueryEngine;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let engine = QueryEngine::new(spell_schema());
/// let records = RecordSet::from_records(vec![
///     Record::from([("nivel".to_string(), Value::Int(1))]),
///     Record::from([("nivel".to_string(), Value::Int(5))]),
/// ]);
///
/// let low = engine
///     .query(&records, &QueryExpression::new("nivel <= 3"))
///     .await
///     .unwrap();
/// assert_eq!(low.len(), 1);
/// # }
/// ```
pub struct QueryEngine {
    schema: Schema,
}

impl QueryEngine {
    /// Creates an engine for records of `schema`.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Returns the schema used to interpret records.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Applies a structured filter. See [`filter`](crate::filter()).
    pub fn filter(&self, records: &RecordSet, spec: &FilterSpec) -> Result<RecordSet, QueryError> {
        filter(records, spec, &self.schema)
    }

    /// Keeps the records for which `expression` evaluates to true.
    ///
    /// The expression is a SQL predicate over the declared columns: `AND`,
    /// `OR`, `NOT`, comparisons, `LIKE`, `IN` and scalar functions. List
    /// columns are seen as strings joined with
    /// [`LIST_DELIMITER`](crate::LIST_DELIMITER). Rows where the expression
    /// is false or null are dropped; the rest are returned unchanged, once
    /// each, in their input order.
    ///
    /// # Errors
    ///
    /// - [`QueryError::QuerySyntax`] if the expression does not parse
    /// - [`QueryError::NoSuchColumn`] if it names an undeclared column
    /// - [`QueryError::DelimiterInElement`] or [`QueryError::EmptyElement`]
    ///   if a list cannot be flattened
    /// - [`QueryError::Engine`] if DataFusion fails otherwise
    pub async fn query(
        &self,
        records: &RecordSet,
        expression: &QueryExpression,
    ) -> Result<RecordSet, QueryError> {
        let sql = self.plan_sql(expression)?;
        let joined = join_list_columns(records, &self.schema)?;

        if joined.is_empty() {
            return Ok(RecordSet::empty());
        }

        info!("Querying {} record(s): {}", joined.len(), expression);
        let batch = self.to_batch(&joined)?;

        let ctx = SessionContext::new();
        ctx.register_batch(TABLE_NAME, batch).map_err(engine_error)?;
        let frame = ctx.sql(&sql).await.map_err(engine_error)?;
        let batches = frame.collect().await.map_err(engine_error)?;

        let mut indices = Vec::new();
        for batch in &batches {
            let column = batch
                .column(0)
                .as_primitive_opt::<UInt64Type>()
                .ok_or_else(|| QueryError::engine("row index column has an unexpected type"))?;
            indices.extend(column.iter().flatten().map(|idx| idx as usize));
        }
        indices.sort_unstable();
        indices.dedup();
        debug!("Query selected {} record(s)", indices.len());

        Ok(records.select(&indices))
    }

    /// Checks the expression and wraps it into the statement to run.
    fn plan_sql(&self, expression: &QueryExpression) -> Result<String, QueryError> {
        if expression.is_empty() {
            return Err(QueryError::syntax("empty expression"));
        }

        let dialect = GenericDialect {};
        let mut parser = Parser::new(&dialect)
            .try_with_sql(expression.as_str())
            .map_err(|e| QueryError::syntax(e.to_string()))?;
        parser
            .parse_expr()
            .map_err(|e| QueryError::syntax(e.to_string()))?;
        parser
            .expect_token(&Token::EOF)
            .map_err(|e| QueryError::syntax(e.to_string()))?;

        self.check_identifiers(expression)?;
        Ok(format!(
            "SELECT {} FROM {} WHERE ({})",
            ROW_INDEX, TABLE_NAME, expression
        ))
    }

    /// Rejects bare identifiers that do not name a declared column.
    ///
    /// Keywords, quoted strings and function names are not identifiers.
    fn check_identifiers(&self, expression: &QueryExpression) -> Result<(), QueryError> {
        let dialect = GenericDialect {};
        let tokens = Tokenizer::new(&dialect, expression.as_str())
            .tokenize()
            .map_err(|e| QueryError::syntax(e.to_string()))?;
        let significant: Vec<&Token> = tokens
            .iter()
            .filter(|token| !matches!(token, Token::Whitespace(_)))
            .collect();

        for (pos, token) in significant.iter().enumerate() {
            let Token::Word(word) = token else {
                continue;
            };
            let is_call = matches!(significant.get(pos + 1), Some(Token::LParen));
            if word.quote_style.is_none() && (word.keyword != Keyword::NoKeyword || is_call) {
                continue;
            }

            let name = match word.quote_style {
                Some(_) => word.value.clone(),
                None => word.value.to_lowercase(),
            };
            if !self.schema.contains(&name) {
                return Err(QueryError::no_such_column(name));
            }
        }
        Ok(())
    }

    /// Builds the Arrow table for a record set whose lists are flattened.
    fn to_batch(&self, records: &RecordSet) -> Result<RecordBatch, QueryError> {
        let mut fields = Vec::with_capacity(self.schema.columns.len() + 1);
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.schema.columns.len() + 1);

        for column in &self.schema.columns {
            let values = records
                .iter()
                .map(|record| record.get(&column.name).unwrap_or(NULL));

            let (data_type, array): (DataType, ArrayRef) = match column.value_type {
                ValueType::Integer => (
                    DataType::Int64,
                    Arc::new(values.map(Value::as_int).collect::<Int64Array>()),
                ),
                ValueType::Boolean => (
                    DataType::Boolean,
                    Arc::new(values.map(Value::as_bool).collect::<BooleanArray>()),
                ),
                ValueType::String | ValueType::List => (
                    DataType::Utf8,
                    Arc::new(
                        values
                            .map(|value| (!value.is_null()).then(|| value.to_string()))
                            .collect::<StringArray>(),
                    ),
                ),
            };
            fields.push(Field::new(&column.name, data_type, true));
            arrays.push(array);
        }

        fields.push(Field::new(ROW_INDEX, DataType::UInt64, false));
        arrays.push(Arc::new(UInt64Array::from_iter_values(
            0..records.len() as u64,
        )));

        RecordBatch::try_new(Arc::new(ArrowSchema::new(fields)), arrays)
            .map_err(|e| QueryError::engine(e.to_string()))
    }
}

/// Maps a DataFusion error, recognising unknown columns.
fn engine_error(error: DataFusionError) -> QueryError {
    if let DataFusionError::SchemaError(schema_error, ..) = error.find_root() {
        let schema_error: &datafusion::common::SchemaError = schema_error;
        if let datafusion::common::SchemaError::FieldNotFound { field, .. } = schema_error {
            return QueryError::no_such_column(field.name.clone());
        }
    }
    QueryError::engine(error.to_string())
}
