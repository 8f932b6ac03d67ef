//! Delete scenarios
//!
//! Scenarios 7-8: Delete Player, Delete Player with an invalid id

use anyhow::Result;
use std::time::Instant;

use super::{ScenarioContext, StatusExpectation};
use crate::http::HttpRequest;
use crate::models::{Editor, Scenario, TestResult};

const HTTP_OK: u16 = 200;

/// DELETE /player/delete/{editor}/{id}
#[derive(Clone, Debug)]
pub struct DeletePlayerTest {
    pub editor: Editor,
    pub player_id: i64,
    pub expect_deleted: bool,
}

impl DeletePlayerTest {
    pub fn valid() -> Self {
        Self {
            editor: Editor::Admin,
            player_id: 0,
            expect_deleted: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            editor: Editor::Admin,
            player_id: 999,
            expect_deleted: false,
        }
    }

    pub fn scenario(&self) -> Scenario {
        if self.expect_deleted {
            Scenario::DeletePlayer
        } else {
            Scenario::DeletePlayerInvalidId
        }
    }

    pub fn expectation(&self) -> StatusExpectation {
        if self.expect_deleted {
            StatusExpectation::Exactly(HTTP_OK)
        } else {
            StatusExpectation::Not(HTTP_OK)
        }
    }

    pub fn request(&self) -> HttpRequest {
        HttpRequest::delete(format!(
            "/player/delete/{}/{}",
            self.editor, self.player_id
        ))
    }

    pub async fn run(&self, ctx: &ScenarioContext) -> Result<TestResult> {
        let scenario = self.scenario();
        let start = Instant::now();

        let response = match ctx.send(scenario, &self.request(), start).await {
            Ok(response) => response,
            Err(result) => return Ok(result),
        };

        let code = response.status_code;
        let passed = self.expectation().matches(code);

        Ok(match (self.expect_deleted, passed) {
            (true, true) => ctx.pass(scenario, start, "Player deleted successfully"),
            (true, false) => ctx.fail(
                scenario,
                start,
                format!("Failed to delete player. Response code: {code}"),
            ),
            (false, true) => ctx.pass(
                scenario,
                start,
                format!("Expected failure. Response code: {code}"),
            ),
            (false, false) => ctx.fail(
                scenario,
                start,
                format!("Unexpected success. Player deleted with invalid ID. Response code: {code}"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_expectations() {
        assert!(DeletePlayerTest::valid().expectation().matches(200));
        assert!(!DeletePlayerTest::valid().expectation().matches(404));
        assert!(DeletePlayerTest::invalid().expectation().matches(404));
        assert!(!DeletePlayerTest::invalid().expectation().matches(200));
    }

    #[test]
    fn test_delete_request_has_no_body() {
        let request = DeletePlayerTest::invalid().request();
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.path, "/player/delete/admin/999");
        assert!(request.body.is_none());
    }
}
