//! Organisation data model.

use std::fmt;

use uuid::Uuid;

use super::user::PersonName;

/// Validation errors raised by the organisation constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrganisationValidationError {
    #[error("organisation id must be a valid UUID")]
    InvalidId,
    #[error("name must be provided")]
    EmptyName,
}

/// Stable organisation identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganisationId(Uuid);

impl OrganisationId {
    /// Validate and construct an [`OrganisationId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, OrganisationValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| OrganisationValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrganisationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Non-blank organisation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganisationName(String);

impl OrganisationName {
    /// Validate and construct an [`OrganisationName`].
    pub fn new(name: impl Into<String>) -> Result<Self, OrganisationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrganisationValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Name of the organisation created for a user at registration.
    ///
    /// Only the first character of `first_name` is upper-cased; the rest is
    /// kept as provided.
    ///
    /// # Examples
    /// ```
    /// use membership_backend::domain::{OrganisationName, PersonName};
    ///
    /// let owner = PersonName::new("ada").expect("valid name");
    /// let name = OrganisationName::default_for(&owner);
    /// assert_eq!(name.as_str(), "Ada's Organisation");
    /// ```
    pub fn default_for(first_name: &PersonName) -> Self {
        let mut chars = first_name.as_str().chars();
        let capitalised: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self(format!("{capitalised}'s Organisation"))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OrganisationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// An organisation users can belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organisation {
    id: OrganisationId,
    name: OrganisationName,
    description: Option<String>,
}

impl Organisation {
    /// Assemble an organisation. An empty description is stored as absent.
    pub fn new(id: OrganisationId, name: OrganisationName, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description: description.filter(|text| !text.is_empty()),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &OrganisationId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &OrganisationName {
        &self.name
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Validated request to create an organisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganisation {
    name: OrganisationName,
    description: Option<String>,
}

impl NewOrganisation {
    /// Validate raw input.
    ///
    /// # Examples
    /// ```
    /// use membership_backend::domain::NewOrganisation;
    ///
    /// let draft = NewOrganisation::try_from_parts("Analytical Engines", Some("")).expect("valid");
    /// assert_eq!(draft.description(), None);
    /// ```
    pub fn try_from_parts(
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, OrganisationValidationError> {
        Ok(Self {
            name: OrganisationName::new(name)?,
            description: description.filter(|text| !text.is_empty()).map(str::to_owned),
        })
    }

    /// Requested name.
    pub fn name(&self) -> &OrganisationName {
        &self.name
    }

    /// Requested description, absent when empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Assign a fresh identifier.
    pub fn into_organisation(self) -> Organisation {
        Organisation::new(OrganisationId::random(), self.name, self.description)
    }
}
