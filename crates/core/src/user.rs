//! The user record as callers hand it to the gateway.

/// Insert payload for the `users` table.
///
/// The row identity is assigned by storage; callers never supply it. The
/// birthdate travels as its stored ISO-8601 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub birthdate: String,
    pub gender: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        birthdate: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birthdate: birthdate.into(),
            gender: gender.into(),
        }
    }
}
