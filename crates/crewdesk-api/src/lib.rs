//! Authenticated HTTP access to the Crewdesk REST API.
//!
//! [`ApiClient`] is the single chokepoint for outbound calls: it injects the
//! bearer token read from the session, negotiates JSON, and normalizes every
//! failure into one error with a human-readable message. The per-resource
//! façades ([`EmployeesApi`], [`DepartmentsApi`], [`PositionsApi`],
//! [`RolesApi`]) translate the `{ data: ... }` envelope into plain values and
//! run write payloads through the declarative field [`schema`]. Gateways own
//! no state: every call is a fresh request.

pub mod auth;
pub mod client;
pub mod departments;
pub mod employees;
pub mod positions;
pub mod roles;
pub mod schema;

pub use auth::{AuthApi, LoginSuccess, INVALID_LOGIN_RESPONSE};
pub use client::{ApiClient, Envelope, BASE_URL_ENV, DEFAULT_BASE_URL, GENERIC_SERVER_ERROR};
pub use departments::DepartmentsApi;
pub use employees::EmployeesApi;
pub use positions::PositionsApi;
pub use roles::RolesApi;
