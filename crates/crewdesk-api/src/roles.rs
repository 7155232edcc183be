use crate::client::ApiClient;
use crate::schema;
use crewdesk_core::{CrewdeskResult, Record};
use serde_json::{json, Value};

/// Typed façade over the `/roles` resource, plus role assignment under
/// `/employees/{id}/roles`.
pub struct RolesApi {
    client: ApiClient,
}

impl RolesApi {
    /// Creates the roles façade over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/roles`. An absent `data` field yields an empty list.
    pub async fn list(&self) -> CrewdeskResult<Vec<Value>> {
        let data: Option<Vec<Value>> = self.client.get("/roles", &[]).await?;
        Ok(data.unwrap_or_default())
    }

    /// GET `/roles/{id}`.
    pub async fn get(&self, id: i64) -> CrewdeskResult<Value> {
        let data: Option<Value> = self.client.get(&format!("/roles/{id}"), &[]).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// POST `/roles` with a coerced write payload.
    pub async fn create(&self, mut record: Record) -> CrewdeskResult<Value> {
        schema::ROLE.coerce(&mut record)?;
        let data: Option<Value> = self
            .client
            .post("/roles", Some(&Value::Object(record)))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// PUT `/roles/{id}` with a coerced (possibly partial) payload.
    pub async fn update(&self, id: i64, mut record: Record) -> CrewdeskResult<Value> {
        schema::ROLE.coerce_partial(&mut record)?;
        let data: Option<Value> = self
            .client
            .put(&format!("/roles/{id}"), &Value::Object(record))
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// DELETE `/roles/{id}`.
    pub async fn delete(&self, id: i64) -> CrewdeskResult<()> {
        self.client.delete::<Value>(&format!("/roles/{id}")).await?;
        Ok(())
    }

    /// POST `/employees/{employee_id}/roles` with `{ "role_id": N }`.
    pub async fn assign(&self, employee_id: i64, role_id: i64) -> CrewdeskResult<()> {
        let body = json!({ "role_id": role_id });
        self.client
            .post::<Value>(&format!("/employees/{employee_id}/roles"), Some(&body))
            .await?;
        Ok(())
    }
}
