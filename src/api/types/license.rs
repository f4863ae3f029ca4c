use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// License consumption for every user of an enterprise, connected servers included
#[allow(missing_docs)]
#[skip_serializing_none]
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseConsumedLicense {
    pub total_seats_consumed: Option<i64>,
    pub total_seats_purchased: Option<i64>,
    pub users: Option<Vec<EnterpriseConsumedLicenseUser>>,
}

/// License consumption of a single user
///
/// Every field is optional: a key missing from the payload stays `None`, while
/// an empty string or list sent by the server is kept as `Some`.
#[allow(missing_docs)]
#[skip_serializing_none]
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseConsumedLicenseUser {
    pub enterprise_server_emails: Option<Vec<String>>,
    pub enterprise_server_user: Option<bool>,
    pub enterprise_server_user_ids: Option<Vec<String>>,
    pub github_com_enterprise_role: Option<String>,
    pub github_com_enterprise_roles: Option<Vec<String>>,
    pub github_com_login: Option<String>,
    pub github_com_member_roles: Option<Vec<String>>,
    pub github_com_name: Option<String>,
    pub github_com_orgs_with_pending_invites: Option<Vec<String>>,
    pub github_com_profile: Option<String>,
    pub github_com_saml_name_id: Option<String>,
    pub github_com_two_factor_auth: Option<bool>,
    pub github_com_user: Option<bool>,
    pub github_com_verified_domain_emails: Option<Vec<String>>,
    pub license_type: Option<String>,
    pub total_user_accounts: Option<i64>,
    pub visual_studio_license_status: Option<String>,
    pub visual_studio_subscription_email: Option<String>,
    pub visual_studio_subscription_user: Option<bool>,
}

impl EnterpriseConsumedLicense {
    /// Users of the page, empty when the server left them out
    pub fn users(&self) -> &[EnterpriseConsumedLicenseUser] {
        self.users.as_deref().unwrap_or_default()
    }
}
