//! Task results, structured output contracts and the aggregate crew output

use std::fmt;

use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::extract::parse_object;

pub type JsonMap = Map<String, Value>;

/// Shape a task's answer is expected to take beyond free text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputContract {
    /// Free text only
    #[default]
    Raw,
    /// A JSON object, optionally checked against a schema
    Json {
        #[serde(default)]
        schema: Option<Value>,
    },
    /// A named record described by a JSON schema
    Typed {
        #[serde(rename = "name")]
        type_name: String,
        schema: Value,
    },
}

impl OutputContract {
    /// Check that any bound schema compiles
    pub fn validate(&self) -> Result<(), String> {
        match self {
            OutputContract::Raw | OutputContract::Json { schema: None } => Ok(()),
            OutputContract::Json {
                schema: Some(schema),
            } => compile(schema).map(|_| ()),
            OutputContract::Typed { type_name, schema } => {
                if type_name.trim().is_empty() {
                    return Err("typed output needs a type name".to_string());
                }
                compile(schema).map(|_| ())
            }
        }
    }

    /// Derive the structured form of a raw answer
    ///
    /// `Ok(None)` for raw contracts. `Err` carries the reason a declared
    /// structure could not be produced; callers treat it as a warning.
    pub fn structure(&self, raw: &str) -> Result<Option<Structured>, String> {
        let (schema, type_name) = match self {
            OutputContract::Raw => return Ok(None),
            OutputContract::Json { schema } => (schema.as_ref(), None),
            OutputContract::Typed { type_name, schema } => (Some(schema), Some(type_name)),
        };

        let map = parse_object(raw).ok_or_else(|| "answer contains no JSON object".to_string())?;

        if let Some(schema) = schema {
            let compiled = compile(schema)?;
            let instance = Value::Object(map.clone());
            if !compiled.is_valid(&instance) {
                return Err("answer does not satisfy the output schema".to_string());
            }
        }

        Ok(Some(match type_name {
            Some(name) => Structured::Typed(TypedObject {
                type_name: name.clone(),
                fields: map,
            }),
            None => Structured::Json(map),
        }))
    }
}

fn compile(schema: &Value) -> Result<JSONSchema, String> {
    JSONSchema::compile(schema).map_err(|e| format!("invalid output schema: {}", e))
}

/// A schema-checked record with a type name
#[derive(Debug, Clone, PartialEq)]
pub struct TypedObject {
    pub type_name: String,
    pub fields: JsonMap,
}

impl fmt::Display for TypedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, ")")
    }
}

/// Structured side of a result; at most one form is ever present
#[derive(Debug, Clone, PartialEq)]
pub enum Structured {
    Json(JsonMap),
    Typed(TypedObject),
}

impl Structured {
    /// The mapping behind either form
    pub fn as_map(&self) -> &JsonMap {
        match self {
            Structured::Json(map) => map,
            Structured::Typed(typed) => &typed.fields,
        }
    }
}

/// Output of one completed task; immutable once recorded
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub name: String,
    pub agent: String,
    pub description: String,
    pub raw: String,
    pub structured: Option<Structured>,
}

impl TaskResult {
    pub fn json_dict(&self) -> Option<&JsonMap> {
        match &self.structured {
            Some(Structured::Json(map)) => Some(map),
            _ => None,
        }
    }

    pub fn typed(&self) -> Option<&TypedObject> {
        match &self.structured {
            Some(Structured::Typed(typed)) => Some(typed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task: {}", self.name)?;
        writeln!(f, "Agent: {}", self.agent)?;
        writeln!(f, "Description: {}", self.description.trim())?;
        writeln!(f, "Output:")?;
        write!(f, "{}", self.raw)
    }
}

/// Token accounting across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageMetrics {
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub successful_requests: u64,
}

impl UsageMetrics {
    /// Count one successful completion
    pub fn record(&mut self, usage: crew_llm::Usage) {
        self.prompt_tokens += usage.prompt_tokens;
        self.completion_tokens += usage.completion_tokens;
        self.total_tokens += usage.total_tokens;
        self.successful_requests += 1;
    }
}

impl std::ops::AddAssign for UsageMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.total_tokens += rhs.total_tokens;
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
        self.successful_requests += rhs.successful_requests;
    }
}

impl fmt::Display for UsageMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_tokens={} prompt_tokens={} completion_tokens={} successful_requests={}",
            self.total_tokens, self.prompt_tokens, self.completion_tokens, self.successful_requests
        )
    }
}

/// Aggregate result of a crew run
///
/// The headline fields (`raw`, `structured`) come from the last task only.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewOutput {
    pub run_id: Uuid,
    pub raw: String,
    pub structured: Option<Structured>,
    pub tasks_output: Vec<TaskResult>,
    pub token_usage: UsageMetrics,
}

impl CrewOutput {
    /// Assemble from the ordered task results; `None` when there are none
    pub fn from_results(
        run_id: Uuid,
        tasks_output: Vec<TaskResult>,
        token_usage: UsageMetrics,
    ) -> Option<Self> {
        let last = tasks_output.last()?;
        Some(Self {
            run_id,
            raw: last.raw.clone(),
            structured: last.structured.clone(),
            tasks_output,
            token_usage,
        })
    }

    pub fn json_dict(&self) -> Option<&JsonMap> {
        match &self.structured {
            Some(Structured::Json(map)) => Some(map),
            _ => None,
        }
    }

    pub fn typed(&self) -> Option<&TypedObject> {
        match &self.structured {
            Some(Structured::Typed(typed)) => Some(typed),
            _ => None,
        }
    }
}
