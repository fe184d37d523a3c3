//! Blocking API client and scenario suite for the PetFriends service.
//!
//! # Overview
//! Builds `HttpRequest` values and decodes `HttpResponse` values without
//! touching the network (host-does-IO pattern); a `Transport` performs the
//! round-trip. On top of that sits a small scenario model: each scenario
//! declares the fixture it needs, calls the API and checks status and body.
//!
//! # Design
//! - `PetFriendsClient` is stateless; it holds only `base_url`.
//! - Every call yields an `ApiResponse` (status plus JSON-or-text body).
//!   Non-2xx statuses are data, never errors.
//! - `PetFriends<T: Transport>` offers one method per API operation.
//! - `scenario` provisions and tears down fixtures per scenario; `catalog`
//!   holds the scenarios themselves.
//! - DTOs are defined independently from the mock-server crate; the scenario
//!   tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod response;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod transport;
pub mod types;

pub use client::PetFriendsClient;
pub use config::Config;
pub use error::{ApiError, ConfigError, ScenarioError};
pub use form::{FormPart, MultipartForm, Photo};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use response::{ApiResponse, ResponseBody};
pub use scenario::{run_all, run_scenario, Fixture, RunReport, Scenario, ScenarioContext, ScenarioOutcome};
pub use session::PetFriends;
pub use transport::{Transport, UreqTransport};
pub use types::{AuthKey, Credentials, Pet, PetFilter, PetList};
