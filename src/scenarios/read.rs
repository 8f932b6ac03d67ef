//! Read scenarios
//!
//! Scenarios 3-6: Get All Players, Get All Players with the wrong method,
//! Get Player By Id, Get Player with an invalid id

use anyhow::Result;
use std::time::Instant;
use tracing::info;

use super::{ScenarioContext, StatusExpectation};
use crate::assertions::{AssertionError, JsonBody};
use crate::http::{HttpRequest, HttpResponse};
use crate::models::{Scenario, TestResult, PLAYER_FIELDS};

const HTTP_OK: u16 = 200;
const HTTP_NOT_FOUND: u16 = 404;
const HTTP_METHOD_NOT_ALLOWED: u16 = 405;

/// Scenario 3: GET /player/get/all
#[derive(Clone, Debug, Default)]
pub struct GetAllPlayersTest;

impl GetAllPlayersTest {
    pub fn new() -> Self {
        Self
    }

    pub fn request(&self) -> HttpRequest {
        HttpRequest::get("/player/get/all")
    }

    /// Body must hold a non-empty `players` array whose first entry is a full player
    pub fn check_body(body: &str) -> Result<(), AssertionError> {
        JsonBody::parse(body)?
            .first_element("players")?
            .require_fields(PLAYER_FIELDS)
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = Scenario::GetAllPlayers;
        let start = Instant::now();

        let response = match ctx.send(scenario, &self.request(), start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        Ok(judge_player_body(
            ctx,
            scenario,
            start,
            &response,
            "Failed to get players",
            Self::check_body,
        ))
    }
}

/// Scenario 4: a method the endpoint does not support must yield 405
#[derive(Clone, Debug)]
pub struct MethodNotAllowedTest {
    pub method: String,
    pub path: String,
}

impl MethodNotAllowedTest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }

    /// DELETE against the list endpoint
    pub fn get_all() -> Self {
        Self::new("DELETE", "/player/get/all")
    }

    pub fn request(&self) -> HttpRequest {
        HttpRequest::new(self.method.clone(), self.path.clone())
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = Scenario::GetAllPlayersInvalidMethod;
        let start = Instant::now();

        let response = match ctx.send(scenario, &self.request(), start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        let code = response.status_code;
        Ok(
            if StatusExpectation::Exactly(HTTP_METHOD_NOT_ALLOWED).matches(code) {
                ctx.pass(scenario, start, "Expected Method Not Allowed error received")
            } else {
                ctx.fail(
                    scenario,
                    start,
                    format!("Unexpected response code: {code}"),
                )
            },
        )
    }
}

/// Scenarios 5-6: fetch a single player
#[derive(Clone, Debug)]
pub struct GetPlayerTest {
    pub player_id: i64,
    pub expect_found: bool,
}

impl GetPlayerTest {
    /// GET /player/get?playerId={id}, expecting the player back
    pub fn by_id(player_id: i64) -> Self {
        Self {
            player_id,
            expect_found: true,
        }
    }

    /// GET /player/get/{id}, expecting 404
    pub fn invalid_id(player_id: i64) -> Self {
        Self {
            player_id,
            expect_found: false,
        }
    }

    pub fn scenario(&self) -> Scenario {
        if self.expect_found {
            Scenario::GetPlayerById
        } else {
            Scenario::GetPlayerInvalidId
        }
    }

    pub fn request(&self) -> HttpRequest {
        if self.expect_found {
            HttpRequest::get(format!("/player/get?playerId={}", self.player_id))
        } else {
            HttpRequest::get(format!("/player/get/{}", self.player_id))
        }
    }

    /// Body must be a full player object
    pub fn check_body(body: &str) -> Result<(), AssertionError> {
        JsonBody::parse(body)?.require_fields(PLAYER_FIELDS)
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = self.scenario();
        let start = Instant::now();

        let response = match ctx.send(scenario, &self.request(), start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        if self.expect_found {
            return Ok(judge_player_body(
                ctx,
                scenario,
                start,
                &response,
                "Failed to get player",
                Self::check_body,
            ));
        }

        let code = response.status_code;
        Ok(if StatusExpectation::Exactly(HTTP_NOT_FOUND).matches(code) {
            ctx.pass(scenario, start, "Expected 404 Not Found for invalid player id")
        } else {
            ctx.fail(scenario, start, format!("Unexpected response code: {code}"))
        })
    }
}

/// 200 plus a body that passes `check`
fn judge_player_body(
    ctx: &ScenarioContext,
    scenario: Scenario,
    start: Instant,
    response: &HttpResponse,
    failure: &str,
    check: fn(&str) -> Result<(), AssertionError>,
) -> TestResult {
    let code = response.status_code;
    if !StatusExpectation::Exactly(HTTP_OK).matches(code) {
        return ctx.fail(scenario, start, format!("{failure}. Response code: {code}"));
    }

    info!(worker = ctx.worker(), "Received player data: {}", response.body);

    match check(&response.body) {
        Ok(()) => ctx.pass(scenario, start, "Player data has the expected shape"),
        Err(e) => ctx.fail(scenario, start, format!("Unexpected player data: {e}")),
    }
}
