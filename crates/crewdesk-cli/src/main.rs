//! Crewdesk terminal console: entry point, argument parsing, and wiring.

mod commands;
mod config;
mod forms;
mod table;

use clap::{Parser, Subcommand};
use config::CrewdeskConfig;
use crewdesk_api::{ApiClient, AuthApi, DepartmentsApi, EmployeesApi, PositionsApi, RolesApi};
use crewdesk_session::{FileSessionStore, SessionCell, SessionManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crewdesk", about = "Crewdesk — HR/ERP admin console")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "crewdesk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the authenticated user's profile
    Whoami,
    /// Workforce summary
    Dashboard,
    /// Manage employees
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Manage departments
    Departments {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage positions
    Positions {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage roles and permissions
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// List employees, optionally filtered
    List {
        /// Filter as KEY=VALUE (repeatable)
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },
    /// Show one employee
    Get {
        /// Employee id
        id: i64,
    },
    /// Create an employee
    Create {
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Update an employee's fields
    Update {
        /// Employee id
        id: i64,
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Delete an employee
    Delete {
        /// Employee id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CrudAction {
    /// List records
    List,
    /// Create a record
    Create {
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Update a record's fields
    Update {
        /// Record id
        id: i64,
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a record
    Delete {
        /// Record id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// List roles
    List,
    /// Create a role
    Create {
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Update a role's fields
    Update {
        /// Role id
        id: i64,
        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a role
    Delete {
        /// Role id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Assign a role to an employee
    Assign {
        /// Employee id
        #[arg(long)]
        employee: i64,
        /// Role id
        #[arg(long)]
        role: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CrewdeskConfig::load(&cli.config).await?;
    let base_url = config.resolved_base_url();
    tracing::debug!(base_url = %base_url, data_dir = %config.data_dir.display(), "configured");

    let cell = SessionCell::new();
    let client = ApiClient::new(base_url, Arc::new(cell.clone()));
    let store = Arc::new(FileSessionStore::new(config.data_dir.clone()).await?);
    let session = SessionManager::restore(AuthApi::new(client.clone()), cell, store).await;

    let app = commands::App {
        employees: EmployeesApi::new(client.clone()),
        departments: DepartmentsApi::new(client.clone()),
        positions: PositionsApi::new(client.clone()),
        roles: RolesApi::new(client),
        session,
    };

    match cli.command {
        Commands::Login { email, password } => commands::login(&app, email, password).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Whoami => {
            app.require_session()?;
            commands::whoami(&app)
        }
        Commands::Dashboard => {
            app.require_session()?;
            commands::dashboard(&app).await
        }
        Commands::Employees { action } => {
            app.require_session()?;
            match action {
                EmployeeAction::List { filters } => commands::employees_list(&app, &filters).await,
                EmployeeAction::Get { id } => commands::employees_get(&app, id).await,
                EmployeeAction::Create { fields } => {
                    commands::employees_create(&app, &fields).await
                }
                EmployeeAction::Update { id, fields } => {
                    commands::employees_update(&app, id, &fields).await
                }
                EmployeeAction::Delete { id, yes } => {
                    commands::employees_delete(&app, id, yes).await
                }
            }
        }
        Commands::Departments { action } => {
            app.require_session()?;
            match action {
                CrudAction::List => commands::departments_list(&app).await,
                CrudAction::Create { fields } => commands::departments_create(&app, &fields).await,
                CrudAction::Update { id, fields } => {
                    commands::departments_update(&app, id, &fields).await
                }
                CrudAction::Delete { id, yes } => {
                    commands::departments_delete(&app, id, yes).await
                }
            }
        }
        Commands::Positions { action } => {
            app.require_session()?;
            match action {
                CrudAction::List => commands::positions_list(&app).await,
                CrudAction::Create { fields } => commands::positions_create(&app, &fields).await,
                CrudAction::Update { id, fields } => {
                    commands::positions_update(&app, id, &fields).await
                }
                CrudAction::Delete { id, yes } => {
                    commands::positions_delete(&app, id, yes).await
                }
            }
        }
        Commands::Roles { action } => {
            app.require_session()?;
            match action {
                RoleAction::List => commands::roles_list(&app).await,
                RoleAction::Create { fields } => commands::roles_create(&app, &fields).await,
                RoleAction::Update { id, fields } => {
                    commands::roles_update(&app, id, &fields).await
                }
                RoleAction::Delete { id, yes } => commands::roles_delete(&app, id, yes).await,
                RoleAction::Assign { employee, role } => {
                    commands::roles_assign(&app, employee, role).await
                }
            }
        }
    }
}
