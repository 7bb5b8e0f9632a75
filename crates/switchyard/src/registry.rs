//! Immutable handler registry keyed by (category, name).
//!
//! Descriptors are constructed once at process start and never mutated; the
//! built registry is shared behind an `Arc` with no locking.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::progress::ProgressSink;
use crate::schema::InputSchema;

/// The fixed capability categories. The (category, name) pair forms the
/// dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "tools")]
    Tool,
    #[serde(rename = "resources")]
    Resource,
    #[serde(rename = "templates")]
    Template,
    #[serde(rename = "prompts")]
    Prompt,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tool,
        Category::Resource,
        Category::Template,
        Category::Prompt,
    ];

    /// The wire name, as it appears in method strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tool => "tools",
            Category::Resource => "resources",
            Category::Template => "templates",
            Category::Prompt => "prompts",
        }
    }

    /// Parse a method-string prefix. An unrecognized prefix is simply an
    /// unknown method, not a distinct error.
    pub fn parse(segment: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == segment)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments and progress channel handed to one handler invocation.
pub struct HandlerContext {
    /// Validated parameters, declared fields already coerced to their kinds.
    pub args: Map<String, Value>,
    /// Progress channel; inert in one-shot dispatch.
    pub progress: ProgressSink,
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send>>;

type HandlerFn = Arc<dyn Fn(HandlerContext) -> HandlerFuture + Send + Sync>;

/// Static metadata and entry point for one callable capability.
#[derive(Clone)]
pub struct HandlerDescriptor {
    pub category: Category,
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
    pub streaming_capable: bool,
    handler: HandlerFn,
}

impl HandlerDescriptor {
    pub fn new<F, Fut>(
        category: Category,
        name: &str,
        description: &str,
        input_schema: InputSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        Self {
            category,
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
            streaming_capable: false,
            handler: Arc::new(move |ctx| Box::pin(handler(ctx))),
        }
    }

    /// Mark the handler as able to report progress frames.
    pub fn streaming(mut self) -> Self {
        self.streaming_capable = true;
        self
    }

    /// Start the handler body. The dispatcher owns calling this, never the
    /// body itself.
    pub fn invoke(&self, ctx: HandlerContext) -> HandlerFuture {
        (self.handler)(ctx)
    }
}

impl std::fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("streaming_capable", &self.streaming_capable)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate handler registration: {category}/{name}")]
    Duplicate { category: Category, name: String },
}

/// Collects descriptors before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Arc<HandlerDescriptor>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, descriptor: HandlerDescriptor) -> Self {
        self.entries.push(Arc::new(descriptor));
        self
    }

    /// Freeze the registry. Duplicate (category, name) pairs are a startup
    /// failure, never a runtime one.
    pub fn build(self) -> Result<HandlerRegistry, RegistryError> {
        let mut by_key: HashMap<Category, HashMap<String, usize>> = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let names = by_key.entry(entry.category).or_default();
            if names.insert(entry.name.clone(), index).is_some() {
                return Err(RegistryError::Duplicate {
                    category: entry.category,
                    name: entry.name.clone(),
                });
            }
        }
        Ok(HandlerRegistry {
            by_key,
            entries: self.entries,
        })
    }
}

/// Read-only handler table, built once at startup.
#[derive(Debug)]
pub struct HandlerRegistry {
    by_key: HashMap<Category, HashMap<String, usize>>,
    entries: Vec<Arc<HandlerDescriptor>>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn lookup(&self, category: Category, name: &str) -> Option<&Arc<HandlerDescriptor>> {
        let index = *self.by_key.get(&category)?.get(name)?;
        Some(&self.entries[index])
    }

    /// All descriptors in registration order, so listings are reproducible
    /// across calls.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<HandlerDescriptor>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
