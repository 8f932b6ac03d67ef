//! Create scenarios
//!
//! Scenarios 1-2: Create Valid Player, Create Invalid Player

use anyhow::Result;
use std::time::Instant;
use tracing::info;

use super::{ScenarioContext, StatusExpectation};
use crate::http::{HttpError, HttpRequest};
use crate::models::{Editor, PlayerPayload, Scenario, TestResult};

const HTTP_CREATED: u16 = 201;

/// POST /player/create/{editor}
#[derive(Clone, Debug)]
pub struct CreatePlayerTest {
    pub editor: Editor,
    pub payload: PlayerPayload,
    pub expect_created: bool,
}

impl CreatePlayerTest {
    /// Scenario 1: a well-formed player must be created
    pub fn valid() -> Self {
        Self {
            editor: Editor::Admin,
            payload: PlayerPayload::for_create(25),
            expect_created: true,
        }
    }

    /// Scenario 2: an out-of-range age must be rejected
    pub fn invalid() -> Self {
        Self {
            editor: Editor::Admin,
            payload: PlayerPayload::for_create(200),
            expect_created: false,
        }
    }

    pub fn scenario(&self) -> Scenario {
        if self.expect_created {
            Scenario::CreateValidPlayer
        } else {
            Scenario::CreateInvalidPlayer
        }
    }

    pub fn expectation(&self) -> StatusExpectation {
        if self.expect_created {
            StatusExpectation::Exactly(HTTP_CREATED)
        } else {
            StatusExpectation::Not(HTTP_CREATED)
        }
    }

    pub fn request(&self) -> Result<HttpRequest, HttpError> {
        HttpRequest::post(format!("/player/create/{}", self.editor)).json(&self.payload)
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = self.scenario();
        let request = self.request()?;
        let start = Instant::now();

        if self.expect_created {
            info!(worker = ctx.worker(), "Creating a user...");
        } else {
            info!(worker = ctx.worker(), "Creating a user with invalid data...");
        }

        let response = match ctx.send(scenario, &request, start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        let code = response.status_code;
        let passed = self.expectation().matches(code);

        Ok(match (self.expect_created, passed) {
            (true, true) => ctx.pass(scenario, start, "User created successfully"),
            (true, false) => ctx.fail(
                scenario,
                start,
                format!("Failed to create user. Response code: {code}"),
            ),
            (false, true) => ctx.pass(
                scenario,
                start,
                format!("Invalid user rejected as expected. Response code: {code}"),
            ),
            (false, false) => ctx.fail(
                scenario,
                start,
                format!("User created successfully with invalid data. Response code: {code}"),
            ),
        })
    }
}
