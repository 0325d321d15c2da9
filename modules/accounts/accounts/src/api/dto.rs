use accounts_sdk::{Ownership, User};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// JSON representation of a user.
///
/// Password hash, DB-credential hash, SSO id and the logout counter have no
/// field here and can never be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub company: String,
    pub department: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    pub active: bool,
    pub admin: bool,
    pub name: String,
    pub surname: String,
    pub gender: String,
    /// Base64 (standard alphabet, padded).
    #[serde(with = "certificate_b64")]
    pub certificate: Vec<u8>,
    #[serde(default)]
    pub ownerships: Vec<OwnershipDto>,
}

/// Ownership as seen from the user side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipDto {
    pub id: i64,
    pub view_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl From<&Ownership> for OwnershipDto {
    fn from(o: &Ownership) -> Self {
        let view = o.view.as_ref();
        let group = view.and_then(|v| v.group.as_ref());
        Self {
            id: o.id,
            view_id: o.view_id,
            view_name: view.map(|v| v.name.clone()),
            group_id: view.map(|v| v.group_id),
            group_name: group.and_then(|g| g.name.clone()),
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            company: user.company.clone(),
            department: user.department.clone(),
            created: user.created,
            last_login: user.last_login,
            active: user.active,
            admin: user.admin,
            name: user.name.clone(),
            surname: user.surname.clone(),
            gender: user.gender.clone(),
            certificate: user.certificate.clone(),
            ownerships: user.ownerships.iter().map(OwnershipDto::from).collect(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

mod certificate_b64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
