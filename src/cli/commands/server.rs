use serde_json::Value;

use crate::cli::config::ClientConfig;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

/// GET /health on the configured server
pub async fn health(client: &ClientConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = client.endpoint("health")?;
    let response = client.http.get(url.clone()).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        anyhow::bail!("{} is unhealthy ({})", client.base_url, status);
    }

    output_success(
        output_format,
        &format!("{} is healthy", client.base_url),
        body.get("data").cloned(),
    )
}
