//! Declarative scenarios with per-scenario fixtures.
//!
//! # Design
//! A `Scenario` is a name, a fixture requirement and a plain `fn` that makes
//! calls and checks their results. The runner obtains the auth key,
//! provisions the fixture, runs the body and then deletes every pet the
//! fixture or the body created, so no scenario relies on pets left behind
//! by another one. Scenarios run strictly one after another.

use std::fmt;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::ScenarioError;
use crate::response::{ApiResponse, ResponseBody};
use crate::session::PetFriends;
use crate::transport::Transport;
use crate::types::AuthKey;

/// Pet created for scenarios that need a caller-owned pet.
pub const FIXTURE_PET: (&str, &str, &str) = ("Стрелка", "Собака", "4");

/// What must exist before a scenario body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    None,
    /// A freshly created caller-owned pet; its id is handed to the body.
    MyPet,
}

pub type ScenarioFn<T> = fn(&mut ScenarioContext<'_, T>) -> Result<(), ScenarioError>;

pub struct Scenario<T: Transport> {
    pub name: &'static str,
    pub fixture: Fixture,
    pub run: ScenarioFn<T>,
}

impl<T: Transport> Scenario<T> {
    pub const fn new(name: &'static str, fixture: Fixture, run: ScenarioFn<T>) -> Self {
        Self { name, fixture, run }
    }
}

impl<T: Transport> fmt::Debug for Scenario<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("fixture", &self.fixture)
            .finish()
    }
}

/// Everything a scenario body can reach.
pub struct ScenarioContext<'a, T: Transport> {
    pub api: &'a PetFriends<T>,
    pub config: &'a Config,
    pub key: AuthKey,
    pet_id: Option<String>,
    created: Vec<String>,
}

impl<'a, T: Transport> ScenarioContext<'a, T> {
    /// Id of the fixture pet.
    pub fn pet_id(&self) -> Result<&str, ScenarioError> {
        self.pet_id
            .as_deref()
            .ok_or_else(|| ScenarioError::Precondition("there is no my pets".to_string()))
    }

    /// Register a pet created by the scenario body for teardown.
    pub fn track_created(&mut self, response: &ApiResponse) {
        if let Some(id) = response.body.str_field("id") {
            self.created.push(id.to_string());
        }
    }

    fn provision(&mut self, fixture: Fixture) -> Result<(), ScenarioError> {
        if fixture == Fixture::None {
            return Ok(());
        }
        let (name, animal_type, age) = FIXTURE_PET;
        let created = self
            .api
            .add_new_pet_without_photo(&self.key, name, animal_type, age)?;
        match created.body.str_field("id") {
            Some(id) if created.is_ok() => {
                self.pet_id = Some(id.to_string());
                self.created.push(id.to_string());
                Ok(())
            }
            _ => Err(ScenarioError::Precondition(format!(
                "there is no my pets: creating one returned {}",
                created.status
            ))),
        }
    }

    fn teardown(&mut self) {
        for id in self.created.drain(..) {
            match self.api.delete_pet(&self.key, &id) {
                Ok(resp) if resp.is_ok() => {}
                // Already deleted by the scenario body.
                Ok(resp) => info!(pet_id = %id, status = resp.status, "fixture pet already gone"),
                Err(e) => warn!(pet_id = %id, error = %e, "failed to delete fixture pet"),
            }
        }
    }
}

/// Result of one scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub result: Result<(), ScenarioError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a sequential run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Authenticate, provision, run and tear down one scenario.
pub fn run_scenario<T: Transport>(
    api: &PetFriends<T>,
    config: &Config,
    scenario: &Scenario<T>,
) -> ScenarioOutcome {
    let result = authenticate(api, config).and_then(|key| {
        let mut ctx = ScenarioContext {
            api,
            config,
            key,
            pet_id: None,
            created: Vec::new(),
        };
        let result = ctx
            .provision(scenario.fixture)
            .and_then(|()| (scenario.run)(&mut ctx));
        ctx.teardown();
        result
    });

    match &result {
        Ok(()) => info!(scenario = scenario.name, "passed"),
        Err(e) => warn!(scenario = scenario.name, error = %e, "failed"),
    }
    ScenarioOutcome {
        name: scenario.name,
        result,
    }
}

/// Run scenarios in order, each to completion before the next.
pub fn run_all<T: Transport>(
    api: &PetFriends<T>,
    config: &Config,
    scenarios: &[Scenario<T>],
) -> RunReport {
    RunReport {
        outcomes: scenarios
            .iter()
            .map(|scenario| run_scenario(api, config, scenario))
            .collect(),
    }
}

fn authenticate<T: Transport>(api: &PetFriends<T>, config: &Config) -> Result<AuthKey, ScenarioError> {
    let resp = api.get_api_key(&config.valid.email, &config.valid.password)?;
    match resp.body.auth_key() {
        Some(key) if resp.is_ok() => Ok(key),
        _ => Err(ScenarioError::Precondition(format!(
            "cannot obtain auth key: status {}",
            resp.status
        ))),
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

pub fn expect(condition: bool, message: impl Into<String>) -> Result<(), ScenarioError> {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(message.into()))
    }
}

pub fn expect_status(resp: &ApiResponse, status: u16) -> Result<(), ScenarioError> {
    expect(
        resp.status == status,
        format!("expected status {status}, got {} ({})", resp.status, summary(resp)),
    )
}

pub fn expect_status_not(resp: &ApiResponse, status: u16) -> Result<(), ScenarioError> {
    expect(
        resp.status != status,
        format!("expected any status but {status} ({})", summary(resp)),
    )
}

pub fn expect_has_key(resp: &ApiResponse, name: &str) -> Result<(), ScenarioError> {
    expect(resp.body.has_key(name), format!("body has no `{name}`"))
}

pub fn expect_lacks_key(resp: &ApiResponse, name: &str) -> Result<(), ScenarioError> {
    expect(!resp.body.has_key(name), format!("body unexpectedly has `{name}`"))
}

pub fn expect_str_field(resp: &ApiResponse, name: &str, expected: &str) -> Result<(), ScenarioError> {
    let actual = resp.body.str_field(name);
    expect(
        actual == Some(expected),
        format!("expected `{name}` = {expected:?}, got {actual:?}"),
    )
}

pub fn expect_non_empty_field(resp: &ApiResponse, name: &str) -> Result<(), ScenarioError> {
    let actual = resp.body.str_field(name).unwrap_or_default();
    expect(!actual.is_empty(), format!("`{name}` is empty"))
}

fn summary(resp: &ApiResponse) -> String {
    const MAX: usize = 120;
    let text = match &resp.body {
        ResponseBody::Json(value) => value.to_string(),
        ResponseBody::Text(text) => text.clone(),
    };
    if text.chars().count() > MAX {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    } else {
        text
    }
}
