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

//! Operations on the collection of contacts.

use crate::db;
use crate::driver::{Driver, with_timeout};
use crate::model::*;
use contacts_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Creates a new `contact` and returns it as stored.
    pub(crate) async fn create_contact(self, contact: Contact) -> DriverResult<Contact> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            db::put_contact(&mut self.db.ex().await?, &contact).await?;
            info!("Created contact {}", contact.emailid().as_str());
            Ok(contact)
        })
        .await
    }

    /// Gets the contacts within `page`, sorted by their identifier.
    pub(crate) async fn list_contacts(self, page: Page) -> DriverResult<Vec<Contact>> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            let contacts = db::list_contacts(&mut self.db.ex().await?, page).await?;
            Ok(contacts)
        })
        .await
    }
}
