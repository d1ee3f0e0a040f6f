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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::{DEFAULT_QUERY_TIMEOUT, Driver};
use crate::model::*;
use crate::rest::app;
use axum::Router;
use contacts_core::db::{Db, DbError};
use std::sync::Arc;

pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(db::testutils::setup_sqlite().await);
        let driver = Driver::new(db.clone(), DEFAULT_QUERY_TIMEOUT);
        let app = app(driver);
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn put_contact(&self, contact: &Contact) {
        db::put_contact(&mut self.db.ex().await.unwrap(), contact).await.unwrap();
    }

    pub(crate) async fn get_contact(&self, emailid: &str) -> Option<Contact> {
        match db::get_contact(&mut self.db.ex().await.unwrap(), Some(emailid), None).await {
            Ok(contact) => Some(contact),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{}", e),
        }
    }
}
