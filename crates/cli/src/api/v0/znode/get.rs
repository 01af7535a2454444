use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::znode::{ZNodeAcl, ZNodeMeta};
use common::zpath::ZPath;

use crate::api::client::ApiRequest;

/// GET /api/v0/znode?path=...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNodeRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNodeResponse {
    pub path: ZPath,
    pub data: String,
    pub acl: Vec<ZNodeAcl>,
    pub meta: ZNodeMeta,
}

impl ApiRequest for GetNodeRequest {
    type Response = GetNodeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/znode").unwrap();
        client.get(full_url).query(&[("path", self.path)])
    }
}
