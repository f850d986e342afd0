use anyhow::bail;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::RoutineActivity;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output routine activities as a JSON array or one line each
pub fn output_routine_activities(
    output_format: OutputFormat,
    records: &[RoutineActivity],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No routine activities found");
            }
            for record in records {
                println!("{}", describe(record));
            }
        }
    }
    Ok(())
}

pub fn describe(record: &RoutineActivity) -> String {
    format!(
        "#{} routine {} activity {}: {} reps, {}s",
        record.id, record.routine_id, record.activity_id, record.count, record.duration
    )
}

/// Turn a non-2xx API response into an error carrying the API's name and message
pub async fn check_response(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let name = body.get("name").and_then(Value::as_str).unwrap_or("Error");
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed");
    bail!("{} ({}): {}", name, status, message)
}
