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

//! Operations on a single contact.

use crate::db;
use crate::driver::{Driver, with_timeout};
use crate::model::*;
use contacts_core::driver::DriverResult;
use log::{debug, info};

impl Driver {
    /// Deletes the contact identified by `emailid`.  Deleting a missing contact is not an error.
    pub(crate) async fn delete_contact(self, emailid: &str) -> DriverResult<()> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            let deleted = db::delete_contact(&mut self.db.ex().await?, emailid).await?;
            if deleted == 0 {
                debug!("Asked to delete missing contact {}", emailid);
            } else {
                info!("Deleted contact {}", emailid);
            }
            Ok(())
        })
        .await
    }

    /// Finds the first contact, ordered by identifier, that satisfies any of the `lookup`
    /// criteria.
    pub(crate) async fn find_contact(self, lookup: &ContactLookup) -> DriverResult<Contact> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            let contact = db::get_contact(
                &mut self.db.ex().await?,
                lookup.emailid().as_deref(),
                lookup.name().as_deref(),
            )
            .await?;
            Ok(contact)
        })
        .await
    }

    /// Gets the contact identified by `emailid`.
    pub(crate) async fn get_contact(self, emailid: &str) -> DriverResult<Contact> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            let contact = db::get_contact(&mut self.db.ex().await?, Some(emailid), None).await?;
            Ok(contact)
        })
        .await
    }

    /// Applies `update` to the contact identified by `emailid` and returns the contact as it
    /// looks after the update.
    ///
    /// Updating a missing contact is not an error.  In that case nothing is stored and the
    /// returned contact only carries the requested values.
    pub(crate) async fn update_contact(
        self,
        emailid: EmailId,
        update: ContactUpdate,
    ) -> DriverResult<Contact> {
        let timeout = self.timeout;
        with_timeout(timeout, async move {
            let mut tx = self.db.begin().await?;
            let updated = db::update_contact(tx.ex(), &emailid, &update).await?;
            let contact = if updated == 0 {
                debug!("Asked to update missing contact {}", emailid.as_str());
                update.apply(emailid, None)
            } else {
                db::get_contact(tx.ex(), Some(emailid.as_str()), None).await?
            };
            tx.commit().await?;
            Ok(contact)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::testutils::contact;
    use contacts_core::db::DbError;
    use contacts_core::driver::DriverError;

    fn emailid(s: &str) -> EmailId {
        EmailId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_delete_contact_ok() {
        let context = TestContext::setup().await;

        db::put_contact(&mut context.ex().await, &contact("a@x.com", "A", None, None))
            .await
            .unwrap();
        db::put_contact(&mut context.ex().await, &contact("b@x.com", "B", None, None))
            .await
            .unwrap();

        context.driver().delete_contact("a@x.com").await.unwrap();

        assert_eq!(
            DbError::NotFound,
            db::get_contact(&mut context.ex().await, Some("a@x.com"), None).await.unwrap_err()
        );
        db::get_contact(&mut context.ex().await, Some("b@x.com"), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_contact_twice() {
        let context = TestContext::setup().await;

        db::put_contact(&mut context.ex().await, &contact("a@x.com", "A", None, None))
            .await
            .unwrap();

        context.driver().delete_contact("a@x.com").await.unwrap();
        context.driver().delete_contact("a@x.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_find_contact_by_either_field() {
        let context = TestContext::setup().await;

        let a = contact("a@x.com", "A", Some("C1"), None);
        let b = contact("b@x.com", "B", None, Some("S2"));
        db::put_contact(&mut context.ex().await, &a).await.unwrap();
        db::put_contact(&mut context.ex().await, &b).await.unwrap();

        let lookup = ContactLookup::new(None, Some("B".to_owned())).unwrap();
        assert_eq!(b, context.driver().find_contact(&lookup).await.unwrap());

        let lookup = ContactLookup::new(Some("a@x.com".to_owned()), None).unwrap();
        assert_eq!(a, context.driver().find_contact(&lookup).await.unwrap());

        let lookup = ContactLookup::new(Some("z@x.com".to_owned()), Some("B".to_owned())).unwrap();
        assert_eq!(b, context.driver().find_contact(&lookup).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_contact_not_found() {
        let context = TestContext::setup().await;

        let lookup = ContactLookup::new(Some("a@x.com".to_owned()), Some("A".to_owned())).unwrap();
        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            context.driver().find_contact(&lookup).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_contact_ok() {
        let context = TestContext::setup().await;

        let exp_contact = contact("a@x.com", "A", Some("C1"), Some("S1"));
        db::put_contact(&mut context.ex().await, &exp_contact).await.unwrap();

        let found = context.driver().get_contact("a@x.com").await.unwrap();
        assert_eq!(exp_contact, found);
    }

    #[tokio::test]
    async fn test_get_contact_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            context.driver().get_contact("a@x.com").await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_contact_existing() {
        let context = TestContext::setup().await;

        db::put_contact(&mut context.ex().await, &contact("a@x.com", "A", Some("C1"), Some("S1")))
            .await
            .unwrap();

        let update = ContactUpdate::new(
            ContactName::new("B").unwrap(),
            Some(Locality::new("C2").unwrap()),
        );
        let exp_contact = contact("a@x.com", "B", Some("C2"), Some("S1"));
        let updated = context.driver().update_contact(emailid("a@x.com"), update).await.unwrap();
        assert_eq!(exp_contact, updated);

        let stored = db::get_contact(&mut context.ex().await, Some("a@x.com"), None).await.unwrap();
        assert_eq!(exp_contact, stored);
    }

    #[tokio::test]
    async fn test_update_contact_missing() {
        let context = TestContext::setup().await;

        let update = ContactUpdate::new(
            ContactName::new("B").unwrap(),
            Some(Locality::new("C2").unwrap()),
        );
        let updated = context.driver().update_contact(emailid("a@x.com"), update).await.unwrap();
        assert_eq!(contact("a@x.com", "B", Some("C2"), None), updated);

        assert_eq!(
            DbError::NotFound,
            db::get_contact(&mut context.ex().await, Some("a@x.com"), None).await.unwrap_err()
        );
    }
}
