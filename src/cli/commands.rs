//! CLI command implementations
//!
//! Each command returns the `data` payload of its response; `run_command`
//! writes it to stdout, or writes the coded error instead.
//!
//! Only `send` and `login` touch the network. They run on a
//! current-thread tokio runtime built per invocation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::builder::BuilderState;
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};
use crate::preview::{FieldValue, FormResponse, FormView};
use crate::schema::{self, registry, FieldKind, Schema};
use crate::store::{Session, StoredSchema, Workspace};
use crate::transport::{ApiClient, Submitter};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the form API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory for session and schema files
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,

    /// Per-request timeout in seconds (must be > 0)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Lowest log severity written: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://xapi.vengoreserve.com/api".to_string()
}
fn default_workspace_dir() -> String {
    ".formsmith".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            workspace_dir: default_workspace_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(CliError::config_error("api_base_url must not be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CliError::config_error(format!(
                "Invalid api_base_url: '{}'. Must start with http:// or https://",
                self.api_base_url
            )));
        }

        if self.workspace_dir.trim().is_empty() {
            return Err(CliError::config_error("workspace_dir must not be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(CliError::config_error("request_timeout_secs must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        match self.log_level.as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be trace, info, warn or error.",
                other
            ))),
        }
    }

    pub fn workspace_path(&self) -> PathBuf {
        PathBuf::from(&self.workspace_dir)
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.workspace_path())
    }

    pub fn api_client(&self) -> CliResult<ApiClient> {
        let timeout = Duration::from_secs(self.request_timeout_secs);
        Ok(ApiClient::new(self.api_base_url.trim(), timeout)?)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            return Err(err);
        }
    };
    run_command(&config, cli.command)
}

/// Run a command and write its response
pub fn run_command(config: &Config, cmd: Command) -> CliResult<()> {
    Logger::set_min_severity(config.severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("workspace_dir", &config.workspace_dir)],
    );

    match dispatch(config, cmd) {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

fn dispatch(config: &Config, cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Types => Ok(types()),
        Command::Generate { input } => generate(config, &input),
        Command::Validate { input } => validate(&input),
        Command::Preview { input, values } => preview(config, input.as_deref(), values.as_deref()),
        Command::Send { input } => block_on(send(config, &input)),
        Command::Login { email, password } => block_on(login(config, &email, &password)),
        Command::Logout => logout(config),
    }
}

fn block_on<F: std::future::Future<Output = CliResult<Value>>>(future: F) -> CliResult<Value> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(future)
}

/// Lists the field type and reservation status catalogs
pub fn types() -> Value {
    let field_types: Vec<Value> = registry::entries()
        .iter()
        .map(|entry| {
            json!({
                "type": entry.type_name,
                "default_options": entry.default_options,
                "custom_options": entry.has_custom_options,
            })
        })
        .collect();

    let statuses: Vec<Value> = registry::reservation_statuses()
        .iter()
        .map(|status| json!({ "id": status.id, "name": status.name }))
        .collect();

    json!({
        "field_types": field_types,
        "reservation_statuses": statuses,
    })
}

/// Normalizes and validates builder state, then stores the schema for
/// `preview`
pub fn generate(config: &Config, input: &Path) -> CliResult<Value> {
    let state: BuilderState = read_input(input)?;
    let schema = schema::prepare(&state)?;

    let path = config
        .workspace()
        .save_current_schema(&StoredSchema::new(schema.clone(), None))?;
    log_event_with_fields(
        Event::SchemaStored,
        &[("path", &path.display().to_string())],
    );

    Ok(serde_json::to_value(&schema)?)
}

/// Validates a schema file
pub fn validate(input: &Path) -> CliResult<Value> {
    let schema: Schema = read_input(input)?;
    schema::validate(&schema)?;
    Ok(json!({
        "valid": true,
        "name": schema.name,
        "sections": schema.template.len(),
        "fields": schema.field_count(),
    }))
}

/// A value entered in the preview, addressed by section position and
/// field name
#[derive(Debug, Deserialize)]
struct EnteredValue {
    section: usize,
    field: String,
    value: FieldValue,
}

/// Renders a schema and optionally fills it in
pub fn preview(config: &Config, input: Option<&Path>, values: Option<&Path>) -> CliResult<Value> {
    let schema = match input {
        Some(path) => read_input::<Schema>(path)?,
        None => config
            .workspace()
            .load_current_schema()?
            .ok_or_else(CliError::no_schema)?
            .schema,
    };

    let view = FormView::from_schema(&schema)?;
    let mut response = FormResponse::new();

    if let Some(path) = values {
        let entered: Vec<EnteredValue> = read_input(path)?;
        for entry in entered {
            fill(&view, &mut response, entry)?;
        }
    }

    Ok(json!({
        "form": view,
        "missing_required": response.missing_required(&view),
        "submission": view.submission(&response),
    }))
}

fn fill(view: &FormView, response: &mut FormResponse, entry: EnteredValue) -> CliResult<()> {
    let kind = view.field(entry.section, &entry.field)?.kind;
    match entry.value {
        FieldValue::Text(text) if kind == FieldKind::Select => {
            response.select(view, entry.section, &entry.field, &text)?
        }
        FieldValue::Text(text) => response.set_text(view, entry.section, &entry.field, text)?,
        FieldValue::Choices(choices) => {
            for choice in choices {
                response.toggle_checkbox(view, entry.section, &entry.field, &choice, true)?;
            }
        }
    }
    Ok(())
}

/// Sends builder state to the server.
///
/// A session error clears the stored session.
pub async fn send(config: &Config, input: &Path) -> CliResult<Value> {
    let state: BuilderState = read_input(input)?;
    let workspace = config.workspace();
    let session = workspace.load_session()?;
    let submitter = Submitter::new(config.api_client()?);

    let token = session.as_ref().map(|s| s.token.as_str());
    match submitter.submit(&state, token).await {
        Ok(submission) => {
            let stored = StoredSchema::new(submission.schema, submission.created.id);
            workspace.save_current_schema(&stored)?;
            Ok(json!({
                "form_id": stored.form_id,
                "name": stored.schema.name,
                "status": submission.created.status,
            }))
        }
        Err(err) => {
            if err.is_session() && workspace.clear_session()? {
                log_event(Event::Logout);
            }
            Err(err.into())
        }
    }
}

/// Logs in and stores the session
pub async fn login(config: &Config, email: &str, password: &str) -> CliResult<Value> {
    let client = config.api_client()?;
    let token = match client.login(email, password).await {
        Ok(token) => token,
        Err(err) => {
            log_event_with_fields(Event::LoginFailed, &[("error", &err.to_string())]);
            return Err(err.into());
        }
    };

    let session = Session::new(token);
    config.workspace().save_session(&session)?;
    log_event(Event::LoginComplete);

    Ok(json!({
        "logged_in": true,
        "logged_in_at": session.logged_in_at.to_rfc3339(),
    }))
}

/// Removes the stored session
pub fn logout(config: &Config) -> CliResult<Value> {
    let existed = config.workspace().clear_session()?;
    if existed {
        log_event(Event::Logout);
    }
    Ok(json!({ "logged_out": existed }))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use tempfile::TempDir;

    fn config(temp_dir: &TempDir) -> Config {
        Config {
            workspace_dir: temp_dir.path().join("ws").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    fn write_json(temp_dir: &TempDir, name: &str, value: Value) -> PathBuf {
        let path = temp_dir.path().join(name);
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn builder_json() -> Value {
        json!({
            "form_name": "  Booking ",
            "form_description": "",
            "account_id": "2",
            "sections": [{
                "name": "Guest",
                "required": false,
                "reservation_status_id": "1",
                "fields": [
                    { "name": "Name", "type": "text", "options": ["short"], "required": true },
                    { "name": "Room", "type": "select", "custom_options": "Single, Double" }
                ]
            }]
        })
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_json(&temp_dir, "formsmith.json", json!({}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "http://xapi.vengoreserve.com/api");
        assert_eq!(config.workspace_dir, ".formsmith");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_json(&temp_dir, "c.json", json!({ "request_timeout_secs": 0 }));

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert!(err.message().contains("request_timeout_secs"));
    }

    #[test]
    fn test_config_rejects_bad_url_and_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_json(&temp_dir, "c.json", json!({ "api_base_url": "ftp://x" }));
        assert!(Config::load(&path).is_err());

        let path = write_json(&temp_dir, "d.json", json!({ "log_level": "loud" }));
        assert!(Config::load(&path).unwrap_err().message().contains("log_level"));
    }

    #[test]
    fn test_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::resolve(Some(&temp_dir.path().join("nope.json"))).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert_eq!(Config::resolve(None).unwrap(), Config::default());
    }

    #[test]
    fn test_types_lists_catalogs() {
        let data = types();
        assert_eq!(data["field_types"].as_array().unwrap().len(), 5);
        assert_eq!(data["field_types"][0]["type"], "text");
        assert_eq!(data["field_types"][3]["custom_options"], true);
        assert_eq!(data["reservation_statuses"][0]["name"], "active");
    }

    #[test]
    fn test_generate_stores_schema_for_preview() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let input = write_json(&temp_dir, "builder.json", builder_json());

        let schema = generate(&config, &input).unwrap();
        assert_eq!(schema["name"], "Booking");
        assert_eq!(schema["account_id"], 2);
        assert_eq!(schema["template"][0]["fields"][1]["options"], json!(["Single", "Double"]));
        assert_eq!(schema["template"][0]["fields"][1]["field_id"], 2);

        let rendered = preview(&config, None, None).unwrap();
        assert_eq!(rendered["form"]["title"], "Booking");
        assert_eq!(rendered["missing_required"], json!(["Guest / Name"]));
    }

    #[test]
    fn test_generate_reports_validation_message() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let mut builder = builder_json();
        builder["form_name"] = json!("   ");
        let input = write_json(&temp_dir, "builder.json", builder);

        let err = generate(&config, &input).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Form name is required");
        assert_eq!(config.workspace().load_current_schema().unwrap(), None);
    }

    #[test]
    fn test_preview_without_schema() {
        let temp_dir = TempDir::new().unwrap();
        let err = preview(&config(&temp_dir), None, None).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::NoSchema);
    }

    #[test]
    fn test_preview_fills_values() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let input = write_json(&temp_dir, "builder.json", builder_json());
        generate(&config, &input).unwrap();

        let values = write_json(
            &temp_dir,
            "values.json",
            json!([
                { "section": 0, "field": "Name", "value": "Ada" },
                { "section": 0, "field": "Room", "value": "Double" }
            ]),
        );
        let rendered = preview(&config, None, Some(&values)).unwrap();
        assert!(rendered["missing_required"].as_array().unwrap().is_empty());
        let fields = &rendered["submission"]["template"][0]["fields"];
        assert_eq!(fields[0]["value"], "Ada");
        assert_eq!(fields[1]["value"], "Double");

        let bad = write_json(
            &temp_dir,
            "bad.json",
            json!([{ "section": 0, "field": "Room", "value": "Suite" }]),
        );
        let err = preview(&config, None, Some(&bad)).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::PreviewFailed);
    }

    #[test]
    fn test_validate_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let input = write_json(&temp_dir, "builder.json", builder_json());
        let schema = generate(&config, &input).unwrap();

        let schema_path = write_json(&temp_dir, "schema.json", schema.clone());
        let report = validate(&schema_path).unwrap();
        assert_eq!(report["valid"], true);
        assert_eq!(report["fields"], 2);

        let mut broken = schema;
        broken["account_id"] = json!(11);
        let broken_path = write_json(&temp_dir, "broken.json", broken);
        assert_eq!(
            validate(&broken_path).unwrap_err().message(),
            "Account ID must be between 1 and 10"
        );
    }

    #[test]
    fn test_logout_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        config.workspace().save_session(&Session::new("tok")).unwrap();

        assert_eq!(logout(&config).unwrap()["logged_out"], true);
        assert_eq!(logout(&config).unwrap()["logged_out"], false);
    }

    #[tokio::test]
    async fn test_send_without_session_fails_before_network() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let input = write_json(&temp_dir, "builder.json", builder_json());

        let err = send(&config, &input).await.unwrap_err();
        assert_eq!(err.code(), CliErrorCode::SessionInvalid);
    }
}
