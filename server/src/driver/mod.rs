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

//! Business logic for the service.

use contacts_core::db::Db;
use contacts_core::driver::{DriverError, DriverResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

mod contact;
mod contacts;
#[cfg(test)]
mod testutils;

/// Default maximum amount of time that a single driver operation can take.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `op` to completion unless it takes longer than `timeout`.
async fn with_timeout<T, F>(timeout: Duration, op: F) -> DriverResult<T>
where
    F: Future<Output = DriverResult<T>>,
{
    match tokio::time::timeout(timeout, op).await {
        Ok(result) => result,
        Err(_) => Err(DriverError::BackendError(format!(
            "Database operation timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they check out their own
/// connection or transaction and release it before returning, so it's incorrect for the caller to
/// use two separate calls to implement a single logical change.  For this reason, these
/// operations consume the driver.
///
/// Every operation is bounded by the query timeout given at construction time.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Maximum time that any single operation can take.
    timeout: Duration,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}
