use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config;
use crate::types::DbId;

/// Sign a token locally with the server's JWT_SECRET (development only;
/// the API has no login endpoint)
pub fn mint(
    output_format: OutputFormat,
    user_id: DbId,
    username: String,
    expiry_hours: Option<u64>,
) -> anyhow::Result<()> {
    let security = &config::config().security;
    let hours = expiry_hours.unwrap_or(security.jwt_expiry_hours);
    let token = generate_jwt(&Claims::new(user_id, username, hours)?, &security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "token": token, "expires_in_hours": hours }))?
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
