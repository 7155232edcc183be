use crate::client::ApiClient;
use crate::schema;
use crewdesk_core::{CrewdeskResult, Record};
use serde_json::Value;

/// Typed façade over the `/departments` resource.
pub struct DepartmentsApi {
    client: ApiClient,
}

impl DepartmentsApi {
    /// Creates the departments façade over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/departments`. An absent `data` field yields an empty list.
    pub async fn list(&self) -> CrewdeskResult<Vec<Value>> {
        let data: Option<Vec<Value>> = self.client.get("/departments", &[]).await?;
        Ok(data.unwrap_or_default())
    }

    /// GET `/departments/{id}`.
    pub async fn get(&self, id: i64) -> CrewdeskResult<Value> {
        let data: Option<Value> = self.client.get(&format!("/departments/{id}"), &[]).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// POST `/departments` with a coerced write payload.
    pub async fn create(&self, mut record: Record) -> CrewdeskResult<Value> {
        schema::DEPARTMENT.coerce(&mut record)?;
        let data: Option<Value> = self
            .client
            .post("/departments", Some(&Value::Object(record)))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// PUT `/departments/{id}` with a coerced (possibly partial) payload.
    pub async fn update(&self, id: i64, mut record: Record) -> CrewdeskResult<Value> {
        schema::DEPARTMENT.coerce_partial(&mut record)?;
        let data: Option<Value> = self
            .client
            .put(&format!("/departments/{id}"), &Value::Object(record))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// DELETE `/departments/{id}`.
    pub async fn delete(&self, id: i64) -> CrewdeskResult<()> {
        self.client
            .delete::<Value>(&format!("/departments/{id}"))
            .await?;
        Ok(())
    }
}
