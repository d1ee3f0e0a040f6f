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

//! API to find a contact by its identifier or by its name.

use crate::driver::Driver;
use crate::model::ContactLookup;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use contacts_core::rest::{JsonBody, RestResult};
use serde::Deserialize;

/// Message sent to the server to look up a contact.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct LookupRequest {
    /// Identifier of the contact to look for.
    emailid: Option<String>,

    /// Name of the contact to look for.
    name: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<LookupRequest>,
) -> RestResult<impl IntoResponse> {
    let lookup = ContactLookup::new(request.emailid, request.name)?;
    let contact = driver.find_contact(&lookup).await?;
    Ok(Json(contact))
}
