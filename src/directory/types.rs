//! Directory record types

use serde::{Deserialize, Serialize};

/// A directory user as returned by the `/users` listing
///
/// Every property is optional because `$select` may trim the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Object ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Primary SMTP address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,

    /// Sign-in name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
}

impl User {
    /// Best human-readable label for the user
    ///
    /// Falls back through UPN, mail and ID when the display name is missing.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.user_principal_name.as_deref())
            .or(self.mail.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}
