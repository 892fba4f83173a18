use anyhow::{bail, Context, Result};
use kubera_rest::{KuberaClient, UpdateItemRequest};
use serde_json::Value;
use termcolor::WriteColor;

use crate::output;

pub fn request_from(
    name: Option<String>,
    description: Option<String>,
    value: Option<f64>,
    cost: Option<f64>,
) -> UpdateItemRequest {
    UpdateItemRequest {
        name,
        description,
        value,
        cost,
    }
}

pub async fn run(
    client: &KuberaClient,
    out: &mut dyn WriteColor,
    item_id: &str,
    updates: &UpdateItemRequest,
    raw: bool,
) -> Result<()> {
    if updates.is_empty() {
        bail!("No updates specified. Use --name, --description, --value, or --cost");
    }

    let updated = client
        .update_item(item_id, updates)
        .await
        .context("Failed to update item")?;

    if !raw {
        let name = updated.get("name").and_then(Value::as_str).unwrap_or(item_id);
        output::print_success(out, &format!("Successfully updated item: {name}"))?;
    }
    output::print_item(out, &updated, raw)?;
    Ok(())
}
