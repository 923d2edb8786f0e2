//! Display formatting for CLI output
//!
//! Pure functions from typed results to text; the runner decides where
//! the text goes.

use super::commands::OutputFormat;
use crate::error::Result;
use crate::resources::apitokens::ApiToken;
use crate::resources::heat::Resource;
use crate::resources::inference::{Credential, Flavor};
use crate::resources::projects::Project;
use crate::resources::quotas::{CombinedQuota, LimitRequest, Quota};
use crate::resources::tasks::Task;
use crate::resources::users::RoleAssignment;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Table formatting helpers
// ============================================================================

/// Format a simple table with headers and rows
pub fn format_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "No resources found.\n".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers.iter().map(|h| h.to_uppercase()), &widths);
    for row in rows {
        push_row(&mut output, row.into_iter(), &widths);
    }
    output
}

fn push_row(output: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("   ");
        }
        match widths.get(i) {
            Some(width) => line.push_str(&format!("{cell:width$}")),
            None => line.push_str(&cell),
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

/// Two-column key/value listing
pub fn format_key_values<K: ToString, V: ToString>(pairs: impl IntoIterator<Item = (K, V)>) -> String {
    let rows = pairs
        .into_iter()
        .map(|(k, v)| vec![k.to_string(), v.to_string()])
        .collect();
    format_table(&["KEY", "VALUE"], rows)
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============================================================================
// Typed rows
// ============================================================================

/// Something that renders as one table row
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

impl Tabular for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "STATE", "CLIENT", "DEFAULT", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.state.to_string(),
            self.client_id.to_string(),
            self.is_default.to_string(),
            time(&self.created_at),
        ]
    }
}

impl Tabular for ApiToken {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "ROLE", "USER", "EXPIRES", "EXPIRED", "DELETED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.client_user.role.name.clone(),
            self.client_user.user_email.clone(),
            self.exp_date.as_ref().map_or_else(|| "never".to_string(), time),
            self.expired.to_string(),
            self.deleted.to_string(),
        ]
    }
}

impl Tabular for LimitRequest {
    fn headers() -> &'static [&'static str] {
        &["ID", "STATUS", "DESCRIPTION", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.to_string(),
            opt(self.description.as_deref()),
            time(&self.created_at),
        ]
    }
}

impl Tabular for Flavor {
    fn headers() -> &'static [&'static str] {
        &["NAME", "CPU", "MEMORY", "GPU", "GPU MODEL", "GPU MEMORY"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.cpu.to_string(),
            self.memory.to_string(),
            self.gpu.to_string(),
            opt(self.gpu_model.as_deref()),
            opt(self.gpu_memory),
        ]
    }
}

impl Tabular for Credential {
    fn headers() -> &'static [&'static str] {
        &["NAME", "USERNAME", "REGISTRY", "PROJECT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.username.clone(),
            self.registry_url.clone(),
            self.project_id.to_string(),
        ]
    }
}

impl Tabular for Resource {
    fn headers() -> &'static [&'static str] {
        &["NAME", "TYPE", "STATUS", "PHYSICAL ID", "UPDATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.resource_name.clone(),
            self.resource_type.clone(),
            self.resource_status.clone(),
            opt(self.physical_resource_id.as_deref()),
            self.updated_time.as_ref().map_or_else(|| "-".to_string(), time),
        ]
    }
}

impl Tabular for RoleAssignment {
    fn headers() -> &'static [&'static str] {
        &["ID", "ROLE", "USER", "CLIENT", "PROJECT", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.role.to_string(),
            self.user_id.to_string(),
            self.client_id.to_string(),
            opt(self.project_id),
            time(&self.created_at),
        ]
    }
}

impl Tabular for Task {
    fn headers() -> &'static [&'static str] {
        &["ID", "TYPE", "STATE", "ERROR", "CREATED", "FINISHED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.task_type.clone(),
            self.state.to_string(),
            opt(self.error.as_deref()),
            time(&self.created_on),
            self.finished_on.as_ref().map_or_else(|| "-".to_string(), time),
        ]
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Render a list of typed items
pub fn render_list<T: Tabular + Serialize>(format: OutputFormat, items: &[T]) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table => Ok(format_table(
            T::headers(),
            items.iter().map(Tabular::row).collect(),
        )),
    }
}

/// Render one typed item
pub fn render_one<T: Tabular + Serialize>(format: OutputFormat, item: &T) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(item),
        OutputFormat::Table => Ok(format_table(T::headers(), vec![item.row()])),
    }
}

/// Render a flat quota map
pub fn render_quota(format: OutputFormat, quota: &Quota) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(quota),
        OutputFormat::Table => Ok(format_key_values(quota)),
    }
}

/// Render global and per-region quotas, one row per limit
pub fn render_combined_quota(format: OutputFormat, quota: &CombinedQuota) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(quota),
        OutputFormat::Table => {
            let mut rows: Vec<Vec<String>> = quota
                .global_quotas
                .iter()
                .map(|(name, value)| vec!["global".to_string(), name.clone(), value.to_string()])
                .collect();
            for regional in &quota.regional_quotas {
                rows.extend(regional.limits.iter().map(|(name, value)| {
                    vec![regional.region_id.to_string(), name.clone(), value.to_string()]
                }));
            }
            Ok(format_table(&["SCOPE", "NAME", "VALUE"], rows))
        }
    }
}

/// Render an arbitrary JSON value (metadata, capacity maps)
pub fn render_value(format: OutputFormat, value: &Value) -> Result<String> {
    match (format, value) {
        (OutputFormat::Table, Value::Object(map)) => Ok(format_key_values(map.iter().map(
            |(k, v)| {
                let shown = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), shown)
            },
        ))),
        _ => to_json(value),
    }
}

/// One-line confirmation for mutations without a body
pub fn format_done(action: &str, resource: &str, id: &str) -> String {
    format!("{action} {resource} {id}\n")
}
