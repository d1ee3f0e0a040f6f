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

//! API to delete a contact.

use crate::driver::Driver;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use contacts_core::rest::{EmptyBody, RestResult};
use serde::{Deserialize, Serialize};

/// Message returned by the server after a deletion.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct DeleteResponse {
    /// Outcome of the operation.  Always "success" as failures are reported as errors.
    result: String,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(emailid): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    driver.delete_contact(&emailid).await?;
    Ok(Json(DeleteResponse { result: "success".to_owned() }))
}
