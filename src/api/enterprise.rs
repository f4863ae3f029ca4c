use reqwest::Method;

use crate::api::context::Context;
use crate::api::error::Result;
use crate::api::options::{add_options, path_param, ListOptions};
use crate::api::response::Response;
use crate::api::types::license::EnterpriseConsumedLicense;
use crate::api::GitHubAPI;

impl GitHubAPI {
    /// `GET /enterprises/{enterprise}/consumed-licenses`
    pub async fn list_consumed_licenses(
        &self,
        ctx: &Context,
        enterprise: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(EnterpriseConsumedLicense, Response)> {
        let url = format!("enterprises/{}/consumed-licenses", path_param(enterprise)?);
        let url = add_options(&url, opts)?;
        let request = self.new_request::<()>(Method::GET, &url, None)?;
        self.execute(ctx, request).await
    }
}
