use serde::{Deserialize, Serialize};

use crate::design::DesignTable;

use super::value::FieldValue;
use super::{FieldBlock, MtdError, Section};

/// Name of the single study variable created when no column is designated
pub const UNDEFINED_STUDY_VARIABLE: &str = "undefined";

/// A study variable discovered from a design table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyVariable {
    /// `column:value`, or `undefined`
    pub name: String,
    /// Designated column the variable came from
    pub column: Option<String>,
    /// Cell value that defines the variable
    pub value: Option<String>,
    /// Ascending 1-based indices of the assays in this variable
    pub assay_refs: Vec<usize>,
}

impl StudyVariable {
    /// Description used when the caller does not supply one
    pub fn default_description(&self) -> String {
        match (&self.column, &self.value) {
            (Some(column), Some(value)) => format!("Column: {}, value: {}", column, value),
            _ => "Undefined".to_string(),
        }
    }

    /// `assay[1]|assay[3]|...`
    pub fn assay_refs_value(&self) -> String {
        self.assay_refs
            .iter()
            .map(|i| format!("assay[{}]", i))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Discover study variables from the designated columns of `design`.
///
/// Variables are the distinct `column:value` cells, ordered by first
/// appearance scanning the designated columns in order, each column top to
/// bottom. With no designated column a single `undefined` variable holds
/// every assay.
pub fn discover_study_variables(
    design: &DesignTable,
    columns: &[String],
) -> Result<Vec<StudyVariable>, MtdError> {
    let assays = design.row_count();
    if assays == 0 {
        return Err(MtdError::MissingRequired("assay rows in design table".to_string()));
    }

    if columns.is_empty() {
        return Ok(vec![StudyVariable {
            name: UNDEFINED_STUDY_VARIABLE.to_string(),
            column: None,
            value: None,
            assay_refs: (1..=assays).collect(),
        }]);
    }

    // cells[c][r] is the "column:value" string of column c for assay r
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(columns.len());
    for column in columns {
        let values = design
            .column(column)
            .ok_or_else(|| MtdError::MissingRequired(format!("design column '{}'", column)))?;
        cells.push(values.iter().map(|v| format!("{}:{}", column, v)).collect());
    }

    let mut variables: Vec<StudyVariable> = Vec::new();
    for (column, column_cells) in columns.iter().zip(&cells) {
        let before = variables.len();
        for (row, cell) in column_cells.iter().enumerate() {
            if variables.iter().any(|v| &v.name == cell) {
                continue;
            }
            variables.push(StudyVariable {
                name: cell.clone(),
                column: Some(column.clone()),
                value: Some(cell[column.len() + 1..].to_string()),
                assay_refs: Vec::new(),
            });
            log::trace!("study variable '{}' first seen at assay {}", cell, row + 1);
        }
        if variables.len() - before == 1 && assays > 1 {
            log::warn!("design column '{}' holds a single value for all assays", column);
        }
    }

    for variable in &mut variables {
        variable.assay_refs = (0..assays)
            .filter(|&row| cells.iter().any(|column_cells| column_cells[row] == variable.name))
            .map(|row| row + 1)
            .collect();
    }

    Ok(variables)
}

/// Input for the `study_variable[i]` rows of an MTD section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyVariableSection {
    /// Design table columns that define study variables
    pub columns: Vec<String>,
    /// Average function term, once or per variable
    pub average_function: FieldValue<String>,
    /// Variation function term, once or per variable
    pub variation_function: FieldValue<String>,
    /// Description, once or per variable. Defaults to the defining column and value.
    pub description: FieldValue<String>,
    /// Not implemented; supplying it is an error
    pub factors: FieldValue<String>,
}

impl StudyVariableSection {
    /// Study variables defined by the given design columns
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Assemble the study_variable rows against a design table
    pub fn build(&self, design: &DesignTable) -> Result<Section, MtdError> {
        if !self.factors.is_absent() {
            return Err(MtdError::UnsupportedFeature("study_variable factors".to_string()));
        }

        let variables = discover_study_variables(design, &self.columns)?;
        let count = variables.len();

        let average_function = self.average_function.resolve("average_function", count)?;
        let variation_function = self.variation_function.resolve("variation_function", count)?;
        let description = match self.description.resolve("description", count)? {
            Some(description) => description,
            None => variables.iter().map(StudyVariable::default_description).collect(),
        };

        let section = FieldBlock::new("study_variable")
            .primary(variables.iter().map(|v| v.name.as_str()))
            .field("assay_refs", variables.iter().map(StudyVariable::assay_refs_value))
            .field_opt("average_function", average_function)
            .field_opt("variation_function", variation_function)
            .field("description", description)
            .build()?;

        log::debug!("assembled {} rows for {} study variables", section.len(), count);
        Ok(section)
    }
}
