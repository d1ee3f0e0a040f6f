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

//! API to update the name and city of a contact.

use crate::driver::Driver;
use crate::model::{ContactUpdate, EmailId};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use contacts_core::rest::{JsonBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(emailid): Path<String>,
    JsonBody(update): JsonBody<ContactUpdate>,
) -> RestResult<impl IntoResponse> {
    let emailid = EmailId::new(emailid)?;
    let contact = driver.update_contact(emailid, update).await?;
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
    use serde_json::json;

    fn route(emailid: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/contacts/{}", emailid))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.put_contact(&contact("a@x.com", "A", Some("C1"), Some("S1"))).await;

        let response = OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_json(json!({"name": "B", "city": "C2"}))
            .await
            .expect_json::<Contact>()
            .await;
        let exp_contact = contact("a@x.com", "B", Some("C2"), Some("S1"));
        assert_eq!(exp_contact, response);

        assert_eq!(Some(exp_contact), context.get_contact("a@x.com").await);
    }

    #[tokio::test]
    async fn test_emailid_and_state_cannot_change() {
        let context = TestContext::setup().await;

        context.put_contact(&contact("a@x.com", "A", Some("C1"), Some("S1"))).await;

        let response = OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_json(json!({"emailid": "z@x.com", "name": "B", "state": "S2"}))
            .await
            .expect_json::<Contact>()
            .await;
        let exp_contact = contact("a@x.com", "B", None, Some("S1"));
        assert_eq!(exp_contact, response);

        assert_eq!(Some(exp_contact), context.get_contact("a@x.com").await);
        assert_eq!(None, context.get_contact("z@x.com").await);
    }

    #[tokio::test]
    async fn test_emailid_is_opaque() {
        let context = TestContext::setup().await;

        context.put_contact(&contact("bob", "Bob", None, Some("S1"))).await;

        let response = OneShotBuilder::new(context.app(), route("bob"))
            .send_json(json!({"name": "Robert", "city": "C2"}))
            .await
            .expect_json::<Contact>()
            .await;
        assert_eq!(contact("bob", "Robert", Some("C2"), Some("S1")), response);
    }

    #[tokio::test]
    async fn test_missing_contact() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_json(json!({"name": "B", "city": "C2"}))
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(json!({"emailid": "a@x.com", "name": "B", "city": "C2", "state": null}), response);

        assert_eq!(None, context.get_contact("a@x.com").await);
    }

    #[tokio::test]
    async fn test_invalid_update() {
        let context = TestContext::setup().await;

        context.put_contact(&contact("a@x.com", "A", None, None)).await;

        OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_json(json!({"city": "C2"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("missing field `name`")
            .await;

        OneShotBuilder::new(context.app(), route("a@x.com"))
            .send_json(json!({"name": ""}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("name cannot be empty")
            .await;

        assert_eq!(Some(contact("a@x.com", "A", None, None)), context.get_contact("a@x.com").await);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route("a@x.com"));
}
