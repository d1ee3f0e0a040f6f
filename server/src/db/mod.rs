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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every operation binds its inputs as query parameters.  Values are never interpolated into the
//! text of a statement.

use crate::model::*;
use contacts_core::db::postgres;
#[cfg(test)]
use contacts_core::db::sqlite;
use contacts_core::db::{DbError, DbResult, Executor};
use futures::TryStreamExt;
use sqlx::Row;


/// Converts a raw `row` with the `emailid`, `name`, `city` and `state` columns into a contact.
///
/// `map_sqlx_error` is the backend-specific function to translate decoding errors.
fn contact_from_row<R>(row: R, map_sqlx_error: fn(sqlx::Error) -> DbError) -> DbResult<Contact>
where
    R: Row,
    for<'r> String: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
    for<'i> &'i str: sqlx::ColumnIndex<R>,
{
    let emailid: String = row.try_get("emailid").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let city: Option<String> = row.try_get("city").map_err(map_sqlx_error)?;
    let state: Option<String> = row.try_get("state").map_err(map_sqlx_error)?;

    Ok(Contact::new(
        EmailId::new(emailid)?,
        ContactName::new(name)?,
        city.map(Locality::new).transpose()?,
        state.map(Locality::new).transpose()?,
    ))
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the contact whose identifier is `emailid` or whose name is `name`.
///
/// Absent criteria never match.  If more than one contact matches, the one with the smallest
/// identifier wins.
pub(crate) async fn get_contact(
    ex: &mut Executor,
    emailid: Option<&str>,
    name: Option<&str>,
) -> DbResult<Contact> {
    let maybe_contact = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT emailid, name, city, state
                FROM contact_details
                WHERE emailid = $1 OR name = $2
                ORDER BY emailid
                LIMIT 1
            ";
            sqlx::query(query_str)
                .bind(emailid)
                .bind(name)
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .map(|row| contact_from_row(row, postgres::map_sqlx_error))
                .transpose()?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT emailid, name, city, state
                FROM contact_details
                WHERE emailid = ? OR name = ?
                ORDER BY emailid
                LIMIT 1
            ";
            sqlx::query(query_str)
                .bind(emailid)
                .bind(name)
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .map(|row| contact_from_row(row, sqlite::map_sqlx_error))
                .transpose()?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    maybe_contact.ok_or(DbError::NotFound)
}

/// Gets the contacts that fall within `page`, sorted by their identifier.
pub(crate) async fn list_contacts(ex: &mut Executor, page: Page) -> DbResult<Vec<Contact>> {
    let mut contacts = Vec::with_capacity(usize::try_from(page.count()).unwrap_or(0));

    match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT emailid, name, city, state
                FROM contact_details
                ORDER BY emailid
                LIMIT $1 OFFSET $2
            ";
            let mut rows =
                sqlx::query(query_str).bind(page.count()).bind(page.start()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                contacts.push(contact_from_row(row, postgres::map_sqlx_error)?);
            }
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT emailid, name, city, state
                FROM contact_details
                ORDER BY emailid
                LIMIT ? OFFSET ?
            ";
            let mut rows =
                sqlx::query(query_str).bind(page.count()).bind(page.start()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                contacts.push(contact_from_row(row, sqlite::map_sqlx_error)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }

    Ok(contacts)
}

/// Inserts the new `contact`.  Fails with `AlreadyExists` if its identifier is already in use.
pub(crate) async fn put_contact(ex: &mut Executor, contact: &Contact) -> DbResult<()> {
    let city = contact.city().as_ref().map(Locality::as_str);
    let state = contact.state().as_ref().map(Locality::as_str);

    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO contact_details (emailid, name, city, state)
                VALUES ($1, $2, $3, $4)
            ";
            sqlx::query(query_str)
                .bind(contact.emailid().as_str())
                .bind(contact.name().as_str())
                .bind(city)
                .bind(state)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO contact_details (emailid, name, city, state)
                VALUES (?, ?, ?, ?)
            ";
            sqlx::query(query_str)
                .bind(contact.emailid().as_str())
                .bind(contact.name().as_str())
                .bind(city)
                .bind(state)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    if rows_affected != 1 {
        return Err(DbError::BackendError(format!("Insert created {} rows", rows_affected)));
    }
    Ok(())
}

/// Overwrites the name and city of the contact identified by `emailid` with the values in
/// `update`.  Returns the number of modified contacts, which is zero if the contact is missing.
pub(crate) async fn update_contact(
    ex: &mut Executor,
    emailid: &EmailId,
    update: &ContactUpdate,
) -> DbResult<u64> {
    let city = update.city().as_ref().map(Locality::as_str);

    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "UPDATE contact_details SET name = $1, city = $2 WHERE emailid = $3";
            sqlx::query(query_str)
                .bind(update.name().as_str())
                .bind(city)
                .bind(emailid.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE contact_details SET name = ?, city = ? WHERE emailid = ?";
            sqlx::query(query_str)
                .bind(update.name().as_str())
                .bind(city)
                .bind(emailid.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    if rows_affected > 1 {
        return Err(DbError::BackendError(format!(
            "Update of {} affected {} rows",
            emailid.as_str(),
            rows_affected
        )));
    }
    Ok(rows_affected)
}

/// Deletes the contact identified by `emailid`.  Returns the number of deleted contacts, which is
/// zero if the contact is missing.
pub(crate) async fn delete_contact(ex: &mut Executor, emailid: &str) -> DbResult<u64> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM contact_details WHERE emailid = $1";
            sqlx::query(query_str)
                .bind(emailid)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM contact_details WHERE emailid = ?";
            sqlx::query(query_str)
                .bind(emailid)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    if rows_affected > 1 {
        return Err(DbError::BackendError(format!(
            "Deletion of {} affected {} rows",
            emailid,
            rows_affected
        )));
    }
    Ok(rows_affected)
}
