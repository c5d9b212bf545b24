use mongodb::{Client, bson::doc};

use crate::common::DatabaseResult;

/// Run `{ ping: 1 }` against the `admin` database
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(())
}
