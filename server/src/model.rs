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

//! High-level data types.

use contacts_core::model::{ModelError, ModelResult, check_max_length};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Maximum length of any textual field of a contact, matching the width of the table columns.
pub(crate) const MAX_FIELD_LENGTH: usize = 50;

/// Number of contacts returned by a listing when the caller does not request a valid count.
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of contacts that a single listing can return.
pub(crate) const MAX_PAGE_SIZE: i64 = 10;

/// The email address that uniquely identifies a contact.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String")]
pub(crate) struct EmailId(String);

impl EmailId {
    /// Creates a new email identifier from an untrusted string `s`, making sure it can be stored.
    ///
    /// The identifier is an opaque key chosen by the caller, so its format is not checked.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("emailid cannot be empty".to_owned()));
        }
        check_max_length("emailid", &s, MAX_FIELD_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the email identifier.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailId {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        EmailId::new(value)
    }
}

/// The display name of a contact.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub(crate) struct ContactName(String);

impl ContactName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ModelError("name cannot be empty".to_owned()));
        }
        check_max_length("name", &s, MAX_FIELD_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContactName {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        ContactName::new(value)
    }
}

/// A free-form geographical attribute of a contact, such as its city or state.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub(crate) struct Locality(String);

impl Locality {
    /// Creates a new locality from an untrusted string `s`, making sure it fits in the database.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        check_max_length("locality", &s, MAX_FIELD_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the locality.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Locality {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        Locality::new(value)
    }
}

/// A contact as stored in the directory.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Contact {
    /// Unique identifier of the contact.  Cannot change once the contact is created.
    emailid: EmailId,

    /// Name of the contact.
    name: ContactName,

    /// City where the contact lives, if known.
    city: Option<Locality>,

    /// State where the contact lives, if known.
    state: Option<Locality>,
}

/// The subset of the fields of a contact that can be modified after creation.
#[derive(Constructor, Debug, Deserialize, Getters)]
pub(crate) struct ContactUpdate {
    /// New name for the contact.
    name: ContactName,

    /// New city for the contact.  `None` clears the previous value.
    city: Option<Locality>,
}

impl ContactUpdate {
    /// Applies this update to the contact identified by `emailid` whose `state` is known, yielding
    /// the contact as it looks after the update.
    pub(crate) fn apply(self, emailid: EmailId, state: Option<Locality>) -> Contact {
        Contact::new(emailid, self.name, self.city, state)
    }
}

/// Criteria to look up a contact by its identifier or by its name.
///
/// A contact matches if either criterion matches, so the criteria can refer to different
/// contacts.  Lookup values are not validated: a value that cannot be stored simply matches
/// nothing.
#[derive(Debug, Getters)]
pub(crate) struct ContactLookup {
    /// Identifier to look for, if any.
    emailid: Option<String>,

    /// Name to look for, if any.
    name: Option<String>,
}

impl ContactLookup {
    /// Creates a new set of lookup criteria, treating empty values as absent.  At least one of the
    /// criteria must be present.
    pub(crate) fn new(emailid: Option<String>, name: Option<String>) -> ModelResult<Self> {
        let emailid = emailid.filter(|s| !s.is_empty());
        let name = name.filter(|s| !s.is_empty());
        if emailid.is_none() && name.is_none() {
            return Err(ModelError("At least one of emailid or name is required".to_owned()));
        }
        Ok(Self { emailid, name })
    }
}

/// A window into the list of contacts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Page {
    /// Number of contacts to skip.
    start: i64,

    /// Maximum number of contacts to return.
    count: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self { start: 0, count: DEFAULT_PAGE_SIZE }
    }
}

impl Page {
    /// Creates a new page from the untrusted `count` and `start` values.
    ///
    /// Invalid values never cause an error: they are replaced by their defaults instead.
    pub(crate) fn new(count: Option<i64>, start: Option<i64>) -> Self {
        let count = match count {
            Some(count) if (1..=MAX_PAGE_SIZE).contains(&count) => count,
            _ => DEFAULT_PAGE_SIZE,
        };
        let start = match start {
            Some(start) if start >= 0 => start,
            _ => 0,
        };
        Self { start, count }
    }

    /// Creates a new page from the raw textual `count` and `start` values, as they come from a
    /// query string.  Unparseable values are treated as absent.
    pub(crate) fn parse(count: Option<&str>, start: Option<&str>) -> Self {
        let parse = |s: Option<&str>| s.and_then(|s| s.trim().parse::<i64>().ok());
        Page::new(parse(count), parse(start))
    }

    /// Returns the number of contacts to skip.
    pub(crate) fn start(&self) -> i64 {
        self.start
    }

    /// Returns the maximum number of contacts to return.
    pub(crate) fn count(&self) -> i64 {
        self.count
    }
}
