//! Update scenarios
//!
//! Scenarios 9-10: Update Player, Update Player with an invalid id

use anyhow::Result;
use std::time::Instant;
use tracing::info;

use super::{ScenarioContext, StatusExpectation};
use crate::http::{HttpError, HttpRequest};
use crate::models::{Editor, PlayerPayload, Scenario, TestResult};

const HTTP_OK: u16 = 200;
const HTTP_NOT_FOUND: u16 = 404;

/// PATCH /player/update/{editor}/{id}
#[derive(Clone, Debug)]
pub struct UpdatePlayerTest {
    pub editor: Editor,
    pub player_id: i64,
    pub payload: PlayerPayload,
    pub expect_updated: bool,
}

impl UpdatePlayerTest {
    pub fn valid() -> Self {
        Self {
            editor: Editor::Supervisor,
            player_id: 1_301_229_981,
            payload: PlayerPayload::for_update(),
            expect_updated: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            expect_updated: false,
            ..Self::valid()
        }
        .with_player_id(-1)
    }

    pub fn with_player_id(mut self, player_id: i64) -> Self {
        self.player_id = player_id;
        self
    }

    pub fn scenario(&self) -> Scenario {
        if self.expect_updated {
            Scenario::UpdatePlayer
        } else {
            Scenario::UpdatePlayerInvalidId
        }
    }

    pub fn expectation(&self) -> StatusExpectation {
        if self.expect_updated {
            StatusExpectation::Exactly(HTTP_OK)
        } else {
            StatusExpectation::Exactly(HTTP_NOT_FOUND)
        }
    }

    pub fn request(&self) -> Result<HttpRequest, HttpError> {
        HttpRequest::patch(format!(
            "/player/update/{}/{}",
            self.editor, self.player_id
        ))
        .json(&self.payload)
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = self.scenario();
        let request = self.request()?;
        let start = Instant::now();

        info!(
            worker = ctx.worker(),
            "Updating player {} as {}", self.player_id, self.editor
        );

        let response = match ctx.send(scenario, &request, start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        let code = response.status_code;
        let passed = self.expectation().matches(code);

        Ok(match (self.expect_updated, passed) {
            (true, true) => ctx.pass(scenario, start, "Player updated successfully"),
            (true, false) => ctx.fail(
                scenario,
                start,
                format!("Failed to update player. Response code: {code}"),
            ),
            (false, true) => ctx.pass(
                scenario,
                start,
                "Expected error for updating player with invalid ID",
            ),
            (false, false) => ctx.fail(
                scenario,
                start,
                format!("Unexpected response code: {code}"),
            ),
        })
    }
}
