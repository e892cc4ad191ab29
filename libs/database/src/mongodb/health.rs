use mongodb::{Client, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the server; `Err` carries the driver's message.
pub async fn check_health(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
