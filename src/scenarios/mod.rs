//! Player API scenarios
//!
//! Ten independent scenarios, each sending one request and judging one
//! response.
//!
//! ## Categories
//!
//! ### Create (1-2)
//! - Create Valid Player
//! - Create Invalid Player (age 200)
//!
//! ### Read (3-6)
//! - Get All Players
//! - Get All Players with the wrong method
//! - Get Player By Id
//! - Get Player with an invalid id
//!
//! ### Delete (7-8)
//! - Delete Player
//! - Delete Player with an invalid id
//!
//! ### Update (9-10)
//! - Update Player
//! - Update Player with an invalid id

mod create;
mod delete;
mod read;
mod update;

pub use create::CreatePlayerTest;
pub use delete::DeletePlayerTest;
pub use read::{GetAllPlayersTest, GetPlayerTest, MethodNotAllowedTest};
pub use update::UpdatePlayerTest;

use std::fmt;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::models::{Scenario, TestResult};

/// Status a scenario expects back from the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exactly this status
    Exactly(u16),
    /// Anything except this status
    Not(u16),
}

impl StatusExpectation {
    pub fn matches(&self, status: u16) -> bool {
        match *self {
            StatusExpectation::Exactly(expected) => status == expected,
            StatusExpectation::Not(rejected) => status != rejected,
        }
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusExpectation::Exactly(code) => write!(f, "{code}"),
            StatusExpectation::Not(code) => write!(f, "not {code}"),
        }
    }
}

/// Everything a scenario needs for one invocation
#[derive(Clone, Debug)]
pub struct ScenarioContext {
    client: HttpClient,
    worker: u32,
}

impl ScenarioContext {
    pub fn new(client: HttpClient, worker: u32) -> Self {
        Self { client, worker }
    }

    pub fn worker(&self) -> u32 {
        self.worker
    }

    /// Send the request; a transport failure becomes an `Error` result
    pub(crate) async fn send(
        &self,
        scenario: Scenario,
        request: &HttpRequest,
        started: Instant,
    ) -> Result<HttpResponse, TestResult> {
        self.client.send(request).await.map_err(|e| {
            error!(worker = self.worker, "Exception during API request: {}", e);
            TestResult::error(scenario, elapsed_ms(started), e.to_string())
        })
    }

    pub(crate) fn pass(
        &self,
        scenario: Scenario,
        started: Instant,
        message: impl Into<String>,
    ) -> TestResult {
        let message = message.into();
        info!(worker = self.worker, "{}", message);
        TestResult::pass(scenario, elapsed_ms(started)).with_message(message)
    }

    pub(crate) fn fail(
        &self,
        scenario: Scenario,
        started: Instant,
        message: impl Into<String>,
    ) -> TestResult {
        let message = message.into();
        warn!(worker = self.worker, "{}", message);
        TestResult::fail(scenario, elapsed_ms(started), message)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Build the request a scenario sends
pub fn build_request(scenario: Scenario) -> Result<HttpRequest, HttpError> {
    match scenario {
        Scenario::CreateValidPlayer => CreatePlayerTest::valid().request(),
        Scenario::CreateInvalidPlayer => CreatePlayerTest::invalid().request(),
        Scenario::GetAllPlayers => Ok(GetAllPlayersTest::new().request()),
        Scenario::GetAllPlayersInvalidMethod => Ok(MethodNotAllowedTest::get_all().request()),
        Scenario::GetPlayerById => Ok(GetPlayerTest::by_id(1).request()),
        Scenario::GetPlayerInvalidId => Ok(GetPlayerTest::invalid_id(-1).request()),
        Scenario::DeletePlayer => Ok(DeletePlayerTest::valid().request()),
        Scenario::DeletePlayerInvalidId => Ok(DeletePlayerTest::invalid().request()),
        Scenario::UpdatePlayer => UpdatePlayerTest::valid().request(),
        Scenario::UpdatePlayerInvalidId => UpdatePlayerTest::invalid().request(),
    }
}

/// Run a specific scenario
pub async fn run_scenario(scenario: Scenario, ctx: &ScenarioContext) -> TestResult {
    info!(worker = ctx.worker(), "Worker {} start: {}", ctx.worker(), scenario);

    let result = match scenario {
        Scenario::CreateValidPlayer => CreatePlayerTest::valid().run(ctx).await,
        Scenario::CreateInvalidPlayer => CreatePlayerTest::invalid().run(ctx).await,
        Scenario::GetAllPlayers => GetAllPlayersTest::new().run(ctx).await,
        Scenario::GetAllPlayersInvalidMethod => MethodNotAllowedTest::get_all().run(ctx).await,
        Scenario::GetPlayerById => GetPlayerTest::by_id(1).run(ctx).await,
        Scenario::GetPlayerInvalidId => GetPlayerTest::invalid_id(-1).run(ctx).await,
        Scenario::DeletePlayer => DeletePlayerTest::valid().run(ctx).await,
        Scenario::DeletePlayerInvalidId => DeletePlayerTest::invalid().run(ctx).await,
        Scenario::UpdatePlayer => UpdatePlayerTest::valid().run(ctx).await,
        Scenario::UpdatePlayerInvalidId => UpdatePlayerTest::invalid().run(ctx).await,
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            error!(worker = ctx.worker(), "{} could not be prepared: {}", scenario, e);
            TestResult::error(scenario, 0, e.to_string())
        }
    };

    info!(
        worker = ctx.worker(),
        "Worker {} end: {} {}",
        ctx.worker(),
        scenario,
        result.status
    );

    result.on_worker(ctx.worker())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::JSON_CONTENT_TYPE;

    #[test]
    fn test_status_expectation() {
        assert!(StatusExpectation::Exactly(201).matches(201));
        assert!(!StatusExpectation::Exactly(201).matches(200));
        assert!(StatusExpectation::Not(201).matches(400));
        assert!(!StatusExpectation::Not(200).matches(200));
        assert_eq!(StatusExpectation::Not(200).to_string(), "not 200");
    }

    #[test]
    fn test_every_body_is_valid_json() {
        for scenario in Scenario::all() {
            let request = build_request(scenario).unwrap();
            if let Some(body) = &request.body {
                let parsed: Result<serde_json::Value, _> = serde_json::from_str(body);
                assert!(parsed.is_ok(), "{scenario} body is not JSON: {body}");
            }
        }
        assert_eq!(JSON_CONTENT_TYPE, "application/json");
    }

    #[test]
    fn test_request_table() {
        let expected = [
            (Scenario::CreateValidPlayer, "POST", "/player/create/admin"),
            (Scenario::CreateInvalidPlayer, "POST", "/player/create/admin"),
            (Scenario::GetAllPlayers, "GET", "/player/get/all"),
            (Scenario::GetAllPlayersInvalidMethod, "DELETE", "/player/get/all"),
            (Scenario::GetPlayerById, "GET", "/player/get?playerId=1"),
            (Scenario::GetPlayerInvalidId, "GET", "/player/get/-1"),
            (Scenario::DeletePlayer, "DELETE", "/player/delete/admin/0"),
            (Scenario::DeletePlayerInvalidId, "DELETE", "/player/delete/admin/999"),
            (
                Scenario::UpdatePlayer,
                "PATCH",
                "/player/update/supervisor/1301229981",
            ),
            (Scenario::UpdatePlayerInvalidId, "PATCH", "/player/update/supervisor/-1"),
        ];

        for (scenario, method, path) in expected {
            let request = build_request(scenario).unwrap();
            assert_eq!(request.method, method, "{scenario}");
            assert_eq!(request.path, path, "{scenario}");
        }
    }

    #[test]
    fn test_only_mutations_carry_bodies() {
        for scenario in Scenario::all() {
            let request = build_request(scenario).unwrap();
            let has_body = matches!(request.method.as_str(), "POST" | "PATCH");
            assert_eq!(request.body.is_some(), has_body, "{scenario}");
        }
    }
}
