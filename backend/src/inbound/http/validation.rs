//! Shared parsing helpers for inbound HTTP adapters.

use crate::domain::{DomainError, OrganisationId, UserId};

/// Message returned when an identifier in the path or body is malformed.
pub(crate) const CLIENT_ERROR_MESSAGE: &str = "Client error";

/// Message returned when the request body is not valid JSON.
pub(crate) const INVALID_JSON_MESSAGE: &str = "Invalid json data";

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|_| DomainError::client(CLIENT_ERROR_MESSAGE))
}

pub(crate) fn parse_organisation_id(raw: &str) -> Result<OrganisationId, DomainError> {
    OrganisationId::new(raw).map_err(|_| DomainError::client(CLIENT_ERROR_MESSAGE))
}

/// Treat absent and blank strings the same way.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("1234")]
    fn malformed_ids_are_client_errors(#[case] raw: &str) {
        assert_eq!(parse_user_id(raw).expect_err("rejected").code(), ErrorCode::ClientError);
        assert_eq!(
            parse_organisation_id(raw).expect_err("rejected"),
            DomainError::client(CLIENT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn well_formed_ids_parse() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        assert_eq!(parse_user_id(raw).expect("parses").to_string(), raw);
        assert_eq!(parse_organisation_id(raw).expect("parses").to_string(), raw);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some(" x "), Some("x"))]
    fn non_blank_trims(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(non_blank(input), expected);
    }
}
