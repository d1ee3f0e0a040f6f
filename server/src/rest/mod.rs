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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use tower_http::cors::CorsLayer;

mod contact_delete;
mod contact_get;
mod contact_put;
mod contacts_get;
mod contacts_post;
mod lookup_post;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/contacts", get(contacts_get::handler).post(contacts_post::handler))
        .route("/contacts/getContactByNameOrEmail", post(lookup_post::handler))
        .route(
            "/contacts/:emailid",
            get(contact_get::handler).put(contact_put::handler).delete(contact_delete::handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(driver)
}
