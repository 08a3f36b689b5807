//! Content sniffing for raw documents handed over by the document repository.
//!
//! Raw content is classified once into a [`ContentShape`]; everything after that
//! works on the typed variant.

use serde_json::Value;
use tracing::debug;

use crate::config::ConversionConfig;
use crate::error::{OperationsError, OperationsResult};
use crate::models::{Document, SopDocument, WorkflowDocument};
use crate::validation::{validate_content_size, validate_structured_content};

/// Result of classifying raw document content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentShape {
    /// Serialized SOP document
    Sop(SopDocument),
    /// Serialized workflow document
    Workflow(WorkflowDocument),
    /// Unstructured text, one entry per non-empty line
    PlainText(Vec<String>),
}

impl ContentShape {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sop(_) => "sop",
            Self::Workflow(_) => "workflow",
            Self::PlainText(_) => "plain_text",
        }
    }
}

/// Classify raw content as structured SOP, structured workflow, or plain text.
///
/// Bracket-prefixed content is tried as a serialized document first; when it
/// is not one, the same content is read as line-delimited text. Only content
/// that fits neither reading is rejected.
pub fn sniff_content(raw: &str, limits: &ConversionConfig) -> OperationsResult<ContentShape> {
    validate_content_size(raw, limits.max_content_bytes)?;

    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match parse_structured(trimmed, limits) {
            Ok(shape) => return Ok(shape),
            Err(err) => debug!(
                error = %err,
                "Content is not a structured document, reading it as line-delimited text"
            ),
        }
    }

    parse_plain_text(raw)
}

fn parse_structured(raw: &str, limits: &ConversionConfig) -> OperationsResult<ContentShape> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        OperationsError::unsupported_content(format!("malformed structured content: {e}"))
    })?;

    validate_structured_content(&value, limits.max_json_depth)?;

    let Value::Object(map) = &value else {
        return Err(OperationsError::unsupported_content(
            "structured content must be a SOP or workflow object",
        ));
    };

    let tagged = map.contains_key("document_type");
    let workflow_keyed = map.contains_key("workflow_id");
    let sop_keyed = map.contains_key("sop_id");

    let parsed = if tagged {
        serde_json::from_value::<Document>(value)
    } else if workflow_keyed {
        serde_json::from_value::<WorkflowDocument>(value).map(Document::Workflow)
    } else if sop_keyed {
        serde_json::from_value::<SopDocument>(value).map(Document::Sop)
    } else {
        return Err(OperationsError::unsupported_content(
            "structured content has neither document_type, sop_id nor workflow_id",
        ));
    };

    let document = parsed
        .map_err(|e| OperationsError::unsupported_content(format!("invalid document shape: {e}")))?;

    Ok(match document {
        Document::Sop(sop) => ContentShape::Sop(sop),
        Document::Workflow(workflow) => ContentShape::Workflow(workflow),
    })
}

fn parse_plain_text(raw: &str) -> OperationsResult<ContentShape> {
    if raw.contains('\0') {
        return Err(OperationsError::unsupported_content(
            "binary content is not line-delimited text",
        ));
    }

    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(OperationsError::unsupported_content(
            "content has no non-empty lines",
        ));
    }

    Ok(ContentShape::PlainText(lines))
}
