use std::collections::HashMap;

/// Column names written by the batch validator.
pub mod columns {
    pub const NOMBRE_A_VALIDAR: &str = "Nombre_a_validar";
    pub const NOMBRE_ENCONTRADO: &str = "Nombre_encontrado";
    pub const PERIODO_A_VALIDAR: &str = "Periodo_a_validar";
    pub const FECHA_ENCONTRADA: &str = "Fecha_encontrada";
    pub const TAREA_A_VALIDAR: &str = "Tarea_a_validar";
    pub const TAREAS_ENCONTRADAS: &str = "Tareas_encontradas";
    pub const JUSTIFICACION: &str = "Justificacion";
    pub const LINK_IMAGEN: &str = "Link_imagen";
    pub const NOMBRE_OK: &str = "Nombre_ok";
    pub const PERIODO_OK: &str = "Periodo_ok";
    pub const TAREA_OK: &str = "Tarea_ok";
}

const TRUE: &str = "1";
const FALSE: &str = "0";

/// One of the three correctness flags a reviewer can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    Name,
    Period,
    Task,
}

impl FlagField {
    pub fn all() -> &'static [FlagField] {
        &[FlagField::Name, FlagField::Period, FlagField::Task]
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Name => columns::NOMBRE_OK,
            Self::Period => columns::PERIODO_OK,
            Self::Task => columns::TAREA_OK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Period => "Period",
            Self::Task => "Task",
        }
    }

    /// Columns holding the submitted and the detected value for this flag.
    pub fn compared_columns(self) -> (&'static str, &'static str) {
        match self {
            Self::Name => (columns::NOMBRE_A_VALIDAR, columns::NOMBRE_ENCONTRADO),
            Self::Period => (columns::PERIODO_A_VALIDAR, columns::FECHA_ENCONTRADA),
            Self::Task => (columns::TAREA_A_VALIDAR, columns::TAREAS_ENCONTRADAS),
        }
    }
}

/// Whether a stored flag value counts as "correct".
pub fn is_truthy(value: &str) -> bool {
    value.trim() == TRUE
}

/// One CSV row: column name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value of `column` if present and non-blank.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        self.fields.insert(column.to_string(), value.into());
    }

    pub fn flag(&self, field: FlagField) -> bool {
        is_truthy(self.get(field.column()))
    }

    /// Flip a flag; truthy becomes `"0"`, anything else becomes `"1"`.
    /// Returns the new state.
    pub fn toggle(&mut self, field: FlagField) -> bool {
        let next = !self.flag(field);
        self.set(field.column(), if next { TRUE } else { FALSE });
        next
    }

    pub fn image_path(&self) -> Option<&str> {
        self.non_empty(columns::LINK_IMAGEN)
    }
}

/// The ordered record sequence plus the header that defines column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }
}
