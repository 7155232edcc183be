use crate::client::ApiClient;
use crate::schema;
use crewdesk_core::{CrewdeskResult, Record};
use serde_json::Value;

/// Typed façade over the `/positions` resource.
pub struct PositionsApi {
    client: ApiClient,
}

impl PositionsApi {
    /// Creates the positions façade over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/positions`. An absent `data` field yields an empty list.
    pub async fn list(&self) -> CrewdeskResult<Vec<Value>> {
        let data: Option<Vec<Value>> = self.client.get("/positions", &[]).await?;
        Ok(data.unwrap_or_default())
    }

    /// GET `/positions/{id}`.
    pub async fn get(&self, id: i64) -> CrewdeskResult<Value> {
        let data: Option<Value> = self.client.get(&format!("/positions/{id}"), &[]).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// POST `/positions` with a coerced write payload.
    pub async fn create(&self, mut record: Record) -> CrewdeskResult<Value> {
        schema::POSITION.coerce(&mut record)?;
        let data: Option<Value> = self
            .client
            .post("/positions", Some(&Value::Object(record)))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// PUT `/positions/{id}` with a coerced (possibly partial) payload.
    pub async fn update(&self, id: i64, mut record: Record) -> CrewdeskResult<Value> {
        schema::POSITION.coerce_partial(&mut record)?;
        let data: Option<Value> = self
            .client
            .put(&format!("/positions/{id}"), &Value::Object(record))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// DELETE `/positions/{id}`.
    pub async fn delete(&self, id: i64) -> CrewdeskResult<()> {
        self.client
            .delete::<Value>(&format!("/positions/{id}"))
            .await?;
        Ok(())
    }
}
