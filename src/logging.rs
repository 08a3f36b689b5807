//! # Structured Logging Module
//!
//! Environment-aware structured logging for wizard sessions, conversions and
//! coexistence analysis.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let layer = if use_json_format() {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // An embedder may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

fn get_environment() -> String {
    std::env::var("OPERATIONS_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn use_json_format() -> bool {
    std::env::var("OPERATIONS_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Log structured data for wizard session operations
pub fn log_wizard_operation(
    operation: &str,
    session_token: &str,
    state: &str,
    step_count: usize,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        session_token = %session_token,
        state = %state,
        step_count = step_count,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🧙 WIZARD_OPERATION"
    );
}

/// Log structured data for structural conversions
pub fn log_conversion_operation(
    operation: &str,
    source_id: Option<&str>,
    output_id: &str,
    step_count: usize,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        source_id = source_id,
        output_id = %output_id,
        step_count = step_count,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "🔄 CONVERSION_OPERATION"
    );
}

/// Log structured data for coexistence analysis
pub fn log_analysis_operation(
    analysis_id: &str,
    sop_reference: &str,
    workflow_reference: &str,
    alignment_score: f64,
    gap_count: usize,
) {
    tracing::info!(
        analysis_id = %analysis_id,
        sop_reference = %sop_reference,
        workflow_reference = %workflow_reference,
        alignment_score = alignment_score,
        gap_count = gap_count,
        timestamp = %Utc::now().to_rfc3339(),
        "📊 ANALYSIS_OPERATION"
    );
}

/// Log structured data for artifact requests
pub fn log_artifact_operation(
    operation: &str,
    output_reference: &str,
    artifact_id: Option<&str>,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        output_reference = %output_reference,
        artifact_id = artifact_id,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "📦 ARTIFACT_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
