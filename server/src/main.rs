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

//! Entry point to the contacts service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use contacts_core::db::Db;
use contacts_core::db::postgres::{PostgresDb, PostgresOptions};
use contacts_server::db::init_schema;
use contacts_server::{ServerOptions, serve};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = ServerOptions::from_env("CONTACTS")?;

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    let db = PostgresDb::connect(db_opts)?;
    init_schema(&mut db.ex().await?).await?;

    serve(opts, Box::from(db)).await
}
