use serde_json::{json, Map, Value};

use crate::cli::config::ClientConfig;
use crate::cli::utils::{check_response, describe, output_routine_activities, output_success};
use crate::cli::OutputFormat;
use crate::database::models::RoutineActivity;
use crate::types::DbId;

const COLLECTION: &str = "api/routine_activities";

pub async fn list(client: &ClientConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let response = client.http.get(client.endpoint(COLLECTION)?).send().await?;
    let records: Vec<RoutineActivity> = check_response(response).await?.json().await?;
    output_routine_activities(output_format, &records)
}

pub async fn add(
    client: &ClientConfig,
    output_format: OutputFormat,
    routine_id: DbId,
    activity_id: DbId,
    count: i32,
    duration: i32,
) -> anyhow::Result<()> {
    let body = json!({
        "routineId": routine_id,
        "activityId": activity_id,
        "count": count,
        "duration": duration,
    });

    let request = client.http.post(client.endpoint(COLLECTION)?).json(&body);
    let response = client.authorized(request)?.send().await?;
    let created: RoutineActivity = check_response(response).await?.json().await?;

    output_success(
        output_format,
        &format!("Added {}", describe(&created)),
        Some(serde_json::to_value(&created)?),
    )
}

pub async fn update(
    client: &ClientConfig,
    output_format: OutputFormat,
    id: DbId,
    count: Option<i32>,
    duration: Option<i32>,
) -> anyhow::Result<()> {
    // Only send what was given so the server leaves the rest untouched
    let mut body = Map::new();
    if let Some(count) = count {
        body.insert("count".to_string(), json!(count));
    }
    if let Some(duration) = duration {
        body.insert("duration".to_string(), json!(duration));
    }
    if body.is_empty() {
        anyhow::bail!("nothing to update; pass --count and/or --duration");
    }

    let url = client.endpoint(&format!("{}/{}", COLLECTION, id))?;
    let request = client.http.patch(url).json(&Value::Object(body));
    let response = client.authorized(request)?.send().await?;
    let updated: RoutineActivity = check_response(response).await?.json().await?;

    output_success(
        output_format,
        &format!("Updated {}", describe(&updated)),
        Some(serde_json::to_value(&updated)?),
    )
}

pub async fn delete(client: &ClientConfig, output_format: OutputFormat, id: DbId) -> anyhow::Result<()> {
    let url = client.endpoint(&format!("{}/{}", COLLECTION, id))?;
    let response = client.authorized(client.http.delete(url))?.send().await?;
    let mut deleted: Map<String, Value> = check_response(response).await?.json().await?;
    deleted.remove("success");

    output_success(
        output_format,
        &format!("Deleted routine activity {}", id),
        Some(Value::Object(deleted)),
    )
}
