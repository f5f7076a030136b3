use tracing::Level;

use gridql::{FieldDef, Filterable, Schema, Value};
use serde::{Deserialize, Serialize};

/// A row of the task table.
#[allow(unused)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Task_Id")]
    pub id: i64,
    #[serde(rename = "Task_No")]
    pub no: String,
    #[serde(rename = "Task_Name")]
    pub name: String,
    #[serde(rename = "Task_Description")]
    pub description: Option<String>,
}

#[allow(unused)]
impl Task {
    pub fn new(id: i64, no: &str, name: &str, description: Option<&str>) -> Self {
        Self { id, no: no.to_string(), name: name.to_string(), description: description.map(str::to_string) }
    }
}

impl Filterable for Task {
    fn value(&self, name: &str) -> Option<Value> {
        match name {
            "Task_Id" => Some(Value::Integer(self.id)),
            "Task_No" => Some(Value::from(self.no.as_str())),
            "Task_Name" => Some(Value::from(self.name.as_str())),
            "Task_Description" => self.description.as_deref().map(Value::from),
            _ => None,
        }
    }
}

#[allow(unused)]
pub fn task_schema() -> Schema {
    Schema::builder()
        .field(FieldDef::integer("Task_Id").with_range().searchable_when_numeric())
        .field(FieldDef::text("Task_No").searchable_when_numeric())
        .field(FieldDef::text("Task_Name").searchable().with_contains())
        .field(FieldDef::text("Task_Description").optional().folded().searchable().with_contains())
        .build()
}

#[allow(unused)]
pub fn tasks() -> Vec<Task> {
    vec![
        Task::new(1, "T-001", "Paint hallway", Some("Two coats")),
        Task::new(2, "42", "Clean gutters", None),
        Task::new(3, "T-003", "42", Some("  Fix Roof ")),
        Task::new(4, "T-004", "Inspect roof", Some("fix roof")),
        Task::new(5, "T-005", "paint hallway", Some("")),
        Task::new(6, "6", "Order 50% off tiles", Some("Tiles_and grout")),
        Task::new(7, "T-007", " Paint hallway", Some("FIX ROOF")),
        Task::new(42, "T-042", "Replace boiler", Some("42")),
        Task::new(43, "T-043", "abc", Some("ABC")),
        Task::new(-3, "-3", "Negative", None),
    ]
}

#[allow(unused)]
pub fn ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<i64> { tasks.into_iter().map(|t| t.id).collect() }

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }
