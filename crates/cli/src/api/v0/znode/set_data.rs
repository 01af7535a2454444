use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::znode::ZNodeMeta;

use crate::api::client::ApiRequest;

/// PUT /api/v0/znode/data
///
/// Compare-and-swap write: the gateway accepts the payload only if
/// `version` still matches the node's current data version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDataRequest {
    pub path: String,
    pub version: i64,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDataResponse {
    pub meta: ZNodeMeta,
}

/// Body of a 409 response; tells the caller what version the store is
/// actually at so the conflict can be reported precisely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResponse {
    pub expected: i64,
    pub actual: i64,
}

impl ApiRequest for SetDataRequest {
    type Response = SetDataResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/znode/data").unwrap();
        client.put(full_url).json(&self)
    }
}
