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

//! API to list contacts page by page.

use crate::driver::Driver;
use crate::model::Page;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use contacts_core::rest::{EmptyBody, RestResult};
use serde::Deserialize;

/// Raw query parameters for this API.  These are kept as strings so that bad values can be
/// replaced with defaults instead of rejecting the request.
#[derive(Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Maximum number of contacts to return.
    count: Option<String>,

    /// Number of contacts to skip.
    start: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Option<Query<ListQuery>>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let page = Page::parse(query.count.as_deref(), query.start.as_deref());
    let contacts = driver.list_contacts(page).await?;
    Ok(Json(contacts))
}
