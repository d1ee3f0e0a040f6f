// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! API to get a single contact.

use crate::driver::Driver;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use contacts_core::rest::{EmptyBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(emailid): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let contact = driver.get_contact(&emailid).await?;
    Ok(Json(contact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contact;
    use crate::model::testutils::contact;
    use crate::rest::testutils::*;
    use axum::http;
    use contacts_core::rest::testutils::*;

    fn route(emailid: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/contacts/{}", emailid))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let exp_contact = contact("a@x.com", "A", Some("C1"), Some("S1"));
        context.put_contact(&exp_contact).await;
        context.put_contact(&contact("b@x.com", "B", None, None)).await;

        let response = OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_empty()
            .await
            .expect_json::<Contact>()
            .await;
        assert_eq!(exp_contact, response);
    }

    #[tokio::test]
    async fn test_percent_encoded_emailid() {
        let context = TestContext::setup().await;

        let exp_contact = contact("a+b@x.com", "A", None, None);
        context.put_contact(&exp_contact).await;

        let response = OneShotBuilder::new(context.app(), route("a%2Bb%40x.com"))
            .send_empty()
            .await
            .expect_json::<Contact>()
            .await;
        assert_eq!(exp_contact, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;
    }

    #[tokio::test]
    async fn test_emailid_is_opaque() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("bob"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;

        OneShotBuilder::new(context.app(), route(&"x".repeat(100)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("a@x.com"));
}
