use crate::client::ApiClient;
use crate::schema;
use crewdesk_core::{CrewdeskResult, Record};
use serde_json::Value;

/// Typed façade over the `/employees` resource.
pub struct EmployeesApi {
    client: ApiClient,
}

impl EmployeesApi {
    /// Creates the employees façade over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/employees`, optionally filtered by query parameters. An absent
    /// `data` field in the envelope yields an empty list.
    pub async fn list(&self, filters: &[(String, String)]) -> CrewdeskResult<Vec<Value>> {
        let data: Option<Vec<Value>> = self.client.get("/employees", filters).await?;
        Ok(data.unwrap_or_default())
    }

    /// GET `/employees/{id}`.
    pub async fn get(&self, id: i64) -> CrewdeskResult<Value> {
        let data: Option<Value> = self.client.get(&format!("/employees/{id}"), &[]).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// POST `/employees` with a coerced write payload.
    pub async fn create(&self, mut record: Record) -> CrewdeskResult<Value> {
        schema::EMPLOYEE.coerce(&mut record)?;
        let data: Option<Value> = self
            .client
            .post("/employees", Some(&Value::Object(record)))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// PUT `/employees/{id}` with a coerced (possibly partial) payload.
    pub async fn update(&self, id: i64, mut record: Record) -> CrewdeskResult<Value> {
        schema::EMPLOYEE.coerce_partial(&mut record)?;
        let data: Option<Value> = self
            .client
            .put(&format!("/employees/{id}"), &Value::Object(record))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// DELETE `/employees/{id}`.
    pub async fn delete(&self, id: i64) -> CrewdeskResult<()> {
        self.client
            .delete::<Value>(&format!("/employees/{id}"))
            .await?;
        Ok(())
    }
}
