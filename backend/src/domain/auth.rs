//! Authentication domain types.
//!
//! Registration and login inputs are validated here before any service logic
//! runs. Validation reports every failing field instead of stopping at the
//! first one, so clients can fix a form in a single round trip.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, PersonName, PhoneNumber, User, UserValidationError};

/// Field-level failures raised while validating a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("email must be provided")]
    EmptyEmail,
    #[error("email is invalid")]
    InvalidEmail,
    #[error("first name must be provided")]
    EmptyFirstName,
    #[error("last name must be provided")]
    EmptyLastName,
    #[error("password must be provided")]
    EmptyPassword,
}

/// Field-level failures raised while validating login credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must be provided")]
    EmptyEmail,
    #[error("email is invalid")]
    InvalidEmail,
    #[error("password must be provided")]
    EmptyPassword,
}

/// Raw registration fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationInput<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
    pub phone: Option<&'a str>,
}

/// Validated registration request.
///
/// The plaintext password is zeroised on drop.
#[derive(Clone)]
pub struct Registration {
    email: EmailAddress,
    first_name: PersonName,
    last_name: PersonName,
    password: Zeroizing<String>,
    phone: Option<PhoneNumber>,
}

impl Registration {
    /// Validate raw input, collecting every failing field.
    ///
    /// # Examples
    /// ```
    /// use membership_backend::domain::{Registration, RegistrationInput, RegistrationValidationError};
    ///
    /// let errors = Registration::try_from_parts(RegistrationInput {
    ///     email: "ada@example.com",
    ///     first_name: "",
    ///     last_name: "Lovelace",
    ///     password: "engines",
    ///     phone: None,
    /// })
    /// .err()
    /// .expect("first name missing");
    /// assert_eq!(errors, vec![RegistrationValidationError::EmptyFirstName]);
    /// ```
    pub fn try_from_parts(
        input: RegistrationInput<'_>,
    ) -> Result<Self, Vec<RegistrationValidationError>> {
        let mut errors = Vec::new();

        let email = EmailAddress::new(input.email)
            .map_err(|err| match err {
                UserValidationError::InvalidEmail => RegistrationValidationError::InvalidEmail,
                _ => RegistrationValidationError::EmptyEmail,
            })
            .map_err(|err| errors.push(err))
            .ok();
        let first_name = PersonName::new(input.first_name)
            .map_err(|_| errors.push(RegistrationValidationError::EmptyFirstName))
            .ok();
        let last_name = PersonName::new(input.last_name)
            .map_err(|_| errors.push(RegistrationValidationError::EmptyLastName))
            .ok();
        if input.password.is_empty() {
            errors.push(RegistrationValidationError::EmptyPassword);
        }

        match (email, first_name, last_name) {
            (Some(email), Some(first_name), Some(last_name)) if errors.is_empty() => Ok(Self {
                email,
                first_name,
                last_name,
                password: Zeroizing::new(input.password.to_owned()),
                phone: PhoneNumber::parse_optional(input.phone),
            }),
            _ => Err(errors),
        }
    }

    /// Address to register.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Given name; also seeds the default organisation name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Phone number, kept only when well formed.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .finish()
    }
}

/// Validated login credentials.
#[derive(Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw email and password, collecting every failing field.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, Vec<LoginValidationError>> {
        let mut errors = Vec::new();
        let email = EmailAddress::new(email)
            .map_err(|err| match err {
                UserValidationError::InvalidEmail => LoginValidationError::InvalidEmail,
                _ => LoginValidationError::EmptyEmail,
            })
            .map_err(|err| errors.push(err))
            .ok();
        if password.is_empty() {
            errors.push(LoginValidationError::EmptyPassword);
        }

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Email to look up.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to verify.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: AccessToken,
    pub user: User,
}
