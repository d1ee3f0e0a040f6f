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

//! REST service to manage a directory of contacts.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use contacts_core::db::Db;
use contacts_core::env::get_optional_var;
use derive_getters::Getters;
use log::{info, warn};
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

pub mod db;
mod driver;
use driver::{DEFAULT_QUERY_TIMEOUT, Driver};
pub(crate) mod model;
mod rest;
use rest::app;

/// Default TCP port to listen on.
const DEFAULT_PORT: u16 = 3000;

/// Configuration of the HTTP server.
#[derive(Debug, Getters, PartialEq)]
pub struct ServerOptions {
    /// TCP port to listen on.
    port: u16,

    /// Whether to listen on all interfaces instead of on the loopback interface only.
    bind_all: bool,

    /// Maximum amount of time that a single database operation can take.
    query_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, bind_all: false, query_timeout: DEFAULT_QUERY_TIMEOUT }
    }
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT`, `<prefix>_BIND_ALL` and
    /// `<prefix>_QUERY_TIMEOUT`.  All of them are optional and fall back to defaults.
    pub fn from_env(prefix: &str) -> Result<ServerOptions, String> {
        let defaults = ServerOptions::default();
        Ok(ServerOptions {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
            bind_all: get_optional_var::<bool>(prefix, "BIND_ALL")?.unwrap_or(defaults.bind_all),
            query_timeout: get_optional_var::<Duration>(prefix, "QUERY_TIMEOUT")?
                .unwrap_or(defaults.query_timeout),
        })
    }

    /// Computes the address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.bind_all { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };
        SocketAddr::from((ip, self.port))
    }
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for termination signals: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application as configured by `opts`, using `db` for
/// persistence.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    opts: ServerOptions,
    db: Box<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let db: Arc<dyn Db + Send + Sync> = Arc::from(db);
    let driver = Driver::new(db.clone(), opts.query_timeout);
    let app = app(driver);

    let bind_addr = opts.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;

    db.close().await;
    Ok(result?)
}
