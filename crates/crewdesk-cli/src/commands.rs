//! Command handlers: the view layer over the resource gateways and the
//! session manager. Handlers fetch, join related lookups, and print; all
//! typed coercion and error normalization happens below them.

use crate::forms;
use crate::table::{self, Column};
use chrono::NaiveDate;
use crewdesk_api::{DepartmentsApi, EmployeesApi, PositionsApi, RolesApi};
use crewdesk_core::Credentials;
use crewdesk_session::SessionManager;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, Write};

/// Everything a command needs: one façade per resource plus the session.
pub struct App {
    /// `/employees` gateway.
    pub employees: EmployeesApi,
    /// `/departments` gateway.
    pub departments: DepartmentsApi,
    /// `/positions` gateway.
    pub positions: PositionsApi,
    /// `/roles` gateway.
    pub roles: RolesApi,
    /// Session lifecycle owner.
    pub session: SessionManager,
}

impl App {
    /// Route guard: every command except `login`/`logout` needs an
    /// authenticated session and fails up front without one.
    pub fn require_session(&self) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!("not logged in. Run `crewdesk login` first.");
        }
        Ok(())
    }
}

// --- Session commands ---

/// Signs in and persists the session.
pub async fn login(app: &App, email: String, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    app.session
        .login(Credentials::new(email, password))
        .await?;
    println!("Signed in.");
    Ok(())
}

/// Signs out. Local session state is cleared even when the server call
/// fails.
pub async fn logout(app: &App) -> anyhow::Result<()> {
    app.session.logout().await;
    println!("Signed out.");
    Ok(())
}

/// Prints the authenticated user's profile.
pub fn whoami(app: &App) -> anyhow::Result<()> {
    match app.session.current().user {
        Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        None => println!("No profile stored for this session."),
    }
    Ok(())
}

// --- Dashboard ---

/// Workforce summary: headcount, profile completion, latest hire, and the
/// first few employees.
pub async fn dashboard(app: &App) -> anyhow::Result<()> {
    let employees = app.employees.list(&[]).await?;

    let total = employees.len();
    let completed = employees
        .iter()
        .filter(|e| e.get("profile_completed").map(truthy).unwrap_or(false))
        .count();
    let completion_rate = if total == 0 {
        0
    } else {
        (completed * 100 + total / 2) / total
    };
    let latest_hire = employees
        .iter()
        .filter_map(|e| e.get("hire_date").and_then(Value::as_str))
        .filter_map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .max();

    println!("Total employees:    {total}");
    println!("Profiles completed: {completed} ({completion_rate}%)");
    match latest_hire {
        Some(date) => println!("Latest hire:        {date}"),
        None => println!("Latest hire:        -"),
    }

    println!();
    println!("Recent employees");
    if employees.is_empty() {
        println!("  No employees yet.");
    }
    for employee in employees.iter().take(5) {
        let email = employee
            .get("work_email")
            .and_then(Value::as_str)
            .unwrap_or("-");
        let hired = employee
            .get("hire_date")
            .and_then(Value::as_str)
            .unwrap_or("-");
        println!("  {}  {email}  {hired}", full_name(employee));
    }
    Ok(())
}

// --- Employees ---

/// Lists employees with department and position names joined in. The three
/// lookups are independent requests, issued concurrently and joined before
/// rendering.
pub async fn employees_list(app: &App, filters: &[String]) -> anyhow::Result<()> {
    let filters = forms::parse_pairs(filters)?;
    let (employees, departments, positions) = tokio::try_join!(
        app.employees.list(&filters),
        app.departments.list(),
        app.positions.list(),
    )?;

    let department_index = table::name_index(&departments);
    let position_index = table::name_index(&positions);

    let columns = vec![
        Column::field("Code", "employee_code"),
        Column::render("Name", full_name),
        Column::field("Gender", "gender"),
        Column::field("Work email", "work_email"),
        Column::render("Department", move |row| {
            related_name(row, "department", "department_id", &department_index)
        }),
        Column::render("Position", move |row| {
            related_name(row, "position", "position_id", &position_index)
        }),
        Column::render("Profile completed", |row| {
            yes_no(row.get("profile_completed").map(truthy).unwrap_or(false))
        }),
    ];

    print!("{}", ensure_newline(table::render_table(&columns, &employees)));
    Ok(())
}

/// Prints one employee record.
pub async fn employees_get(app: &App, id: i64) -> anyhow::Result<()> {
    let employee = app.employees.get(id).await?;
    println!("{}", serde_json::to_string_pretty(&employee)?);
    Ok(())
}

/// Creates an employee from `--set key=value` fields.
pub async fn employees_create(app: &App, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let created = app.employees.create(record).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

/// Updates an employee's fields.
pub async fn employees_update(app: &App, id: i64, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let updated = app.employees.update(id, record).await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

/// Deletes an employee after confirmation.
pub async fn employees_delete(app: &App, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm(&format!("Delete employee {id}?"))? {
        println!("Aborted.");
        return Ok(());
    }
    app.employees.delete(id).await?;
    println!("Deleted employee {id}.");
    Ok(())
}

// --- Departments ---

/// Lists departments.
pub async fn departments_list(app: &App) -> anyhow::Result<()> {
    let departments = app.departments.list().await?;
    let columns = vec![
        Column::field("Name", "name"),
        Column::field("Code", "code"),
        Column::render("Manager", manager_name),
        Column::field("Description", "description"),
    ];
    print!(
        "{}",
        ensure_newline(table::render_table(&columns, &departments))
    );
    Ok(())
}

/// Creates a department from `--set key=value` fields.
pub async fn departments_create(app: &App, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let created = app.departments.create(record).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

/// Updates a department's fields.
pub async fn departments_update(app: &App, id: i64, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let updated = app.departments.update(id, record).await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

/// Deletes a department after confirmation.
pub async fn departments_delete(app: &App, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm(&format!("Delete department {id}?"))? {
        println!("Aborted.");
        return Ok(());
    }
    app.departments.delete(id).await?;
    println!("Deleted department {id}.");
    Ok(())
}

// --- Positions ---

/// Lists positions with their department names joined in.
pub async fn positions_list(app: &App) -> anyhow::Result<()> {
    let (positions, departments) =
        tokio::try_join!(app.positions.list(), app.departments.list())?;
    let department_index = table::name_index(&departments);

    let columns = vec![
        Column::field("Name", "name"),
        Column::field("Code", "code"),
        Column::render("Department", move |row| {
            related_name(row, "department", "department_id", &department_index)
        }),
        Column::field("Description", "description"),
    ];
    print!(
        "{}",
        ensure_newline(table::render_table(&columns, &positions))
    );
    Ok(())
}

/// Creates a position from `--set key=value` fields.
pub async fn positions_create(app: &App, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let created = app.positions.create(record).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

/// Updates a position's fields.
pub async fn positions_update(app: &App, id: i64, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let updated = app.positions.update(id, record).await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

/// Deletes a position after confirmation.
pub async fn positions_delete(app: &App, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm(&format!("Delete position {id}?"))? {
        println!("Aborted.");
        return Ok(());
    }
    app.positions.delete(id).await?;
    println!("Deleted position {id}.");
    Ok(())
}

// --- Roles ---

/// Lists roles with their permission lists.
pub async fn roles_list(app: &App) -> anyhow::Result<()> {
    let roles = app.roles.list().await?;
    let columns = vec![
        Column::field("Name", "name"),
        Column::field("Description", "description"),
        Column::render("Permissions", permission_list),
    ];
    print!("{}", ensure_newline(table::render_table(&columns, &roles)));
    Ok(())
}

/// Creates a role from `--set key=value` fields.
pub async fn roles_create(app: &App, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let created = app.roles.create(record).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

/// Updates a role's fields.
pub async fn roles_update(app: &App, id: i64, fields: &[String]) -> anyhow::Result<()> {
    let record = forms::pairs_to_record(fields)?;
    let updated = app.roles.update(id, record).await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

/// Deletes a role after confirmation.
pub async fn roles_delete(app: &App, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm(&format!("Delete role {id}?"))? {
        println!("Aborted.");
        return Ok(());
    }
    app.roles.delete(id).await?;
    println!("Deleted role {id}.");
    Ok(())
}

/// Assigns a role to an employee.
pub async fn roles_assign(app: &App, employee: i64, role: i64) -> anyhow::Result<()> {
    app.roles.assign(employee, role).await?;
    println!("Assigned role {role} to employee {employee}.");
    Ok(())
}

// --- Helpers ---

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

/// Loose truthiness for flags the server may send as booleans, 0/1, or
/// strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn full_name(row: &Value) -> String {
    let full = format!(
        "{} {}",
        row.get("first_name").and_then(Value::as_str).unwrap_or(""),
        row.get("last_name").and_then(Value::as_str).unwrap_or("")
    );
    let full = full.trim();
    if full.is_empty() {
        "-".to_string()
    } else {
        full.to_string()
    }
}

/// A related record's name: the embedded `{nested: {name}}` object first,
/// then a lookup by id, then the raw id, then a dash.
fn related_name(
    row: &Value,
    nested: &str,
    id_field: &str,
    index: &HashMap<i64, String>,
) -> String {
    if let Some(name) = row
        .get(nested)
        .and_then(|related| related.get("name"))
        .and_then(Value::as_str)
    {
        return name.to_string();
    }
    if let Some(id) = row.get(id_field).and_then(Value::as_i64) {
        return index.get(&id).cloned().unwrap_or_else(|| id.to_string());
    }
    "-".to_string()
}

fn manager_name(row: &Value) -> String {
    if let Some(name) = row
        .get("manager")
        .and_then(|manager| manager.get("full_name"))
        .and_then(Value::as_str)
    {
        return name.to_string();
    }
    match row.get("manager_id") {
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => table::display(Some(other)),
    }
}

fn permission_list(row: &Value) -> String {
    match row.get("permissions").and_then(Value::as_array) {
        Some(permissions) if !permissions.is_empty() => permissions
            .iter()
            .map(|permission| {
                permission
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| permission.to_string())
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => "No permissions".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_accepts_server_variants() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("1")));
        assert!(truthy(&json!("true")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!(null)));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            full_name(&json!({"first_name": "Sara", "last_name": "Moradi"})),
            "Sara Moradi"
        );
        assert_eq!(full_name(&json!({"first_name": "Sara"})), "Sara");
        assert_eq!(full_name(&json!({})), "-");
    }

    #[test]
    fn test_related_name_prefers_embedded_record() {
        let index = HashMap::from([(2, "People".to_string())]);
        let row = json!({"department": {"name": "Engineering"}, "department_id": 2});
        assert_eq!(related_name(&row, "department", "department_id", &index), "Engineering");
    }

    #[test]
    fn test_related_name_falls_back_to_index_then_id() {
        let index = HashMap::from([(2, "People".to_string())]);
        let by_index = json!({"department_id": 2});
        assert_eq!(related_name(&by_index, "department", "department_id", &index), "People");

        let unknown = json!({"department_id": 9});
        assert_eq!(related_name(&unknown, "department", "department_id", &index), "9");

        let absent = json!({});
        assert_eq!(related_name(&absent, "department", "department_id", &index), "-");
    }

    #[test]
    fn test_manager_name_variants() {
        assert_eq!(
            manager_name(&json!({"manager": {"full_name": "Reza Karimi"}})),
            "Reza Karimi"
        );
        assert_eq!(manager_name(&json!({"manager_id": 4})), "4");
        assert_eq!(manager_name(&json!({"manager_id": null})), "-");
        assert_eq!(manager_name(&json!({})), "-");
    }

    #[test]
    fn test_permission_list() {
        assert_eq!(
            permission_list(&json!({"permissions": ["employees.read", "roles.write"]})),
            "employees.read, roles.write"
        );
        assert_eq!(permission_list(&json!({"permissions": []})), "No permissions");
        assert_eq!(permission_list(&json!({})), "No permissions");
    }
}
