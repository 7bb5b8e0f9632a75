//! Read-only self-description over the registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::{Category, HandlerRegistry};
use crate::schema::InputSchema;

/// Server identity reported at the top of the describe response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

/// One capability in the describe listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
    pub streaming: bool,
}

/// Full registry listing, grouped by category in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub server: ServerInfo,
    pub tools: Vec<CapabilityEntry>,
    pub resources: Vec<CapabilityEntry>,
    pub templates: Vec<CapabilityEntry>,
    pub prompts: Vec<CapabilityEntry>,
}

/// Answers `describe` requests from registry metadata alone.
///
/// Always succeeds; never consults the validator.
#[derive(Debug, Clone)]
pub struct DescribeService {
    registry: Arc<HandlerRegistry>,
    server: ServerInfo,
}

impl DescribeService {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            server: ServerInfo::default(),
        }
    }

    pub fn with_server(mut self, server: ServerInfo) -> Self {
        self.server = server;
        self
    }

    pub fn describe(&self) -> DescribeResponse {
        let mut response = DescribeResponse {
            server: self.server.clone(),
            tools: Vec::new(),
            resources: Vec::new(),
            templates: Vec::new(),
            prompts: Vec::new(),
        };

        for descriptor in self.registry.iter() {
            let entry = CapabilityEntry {
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                input_schema: descriptor.input_schema.clone(),
                streaming: descriptor.streaming_capable,
            };
            match descriptor.category {
                Category::Tool => response.tools.push(entry),
                Category::Resource => response.resources.push(entry),
                Category::Template => response.templates.push(entry),
                Category::Prompt => response.prompts.push(entry),
            }
        }

        response
    }
}
