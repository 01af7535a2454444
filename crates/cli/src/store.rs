use async_trait::async_trait;
use reqwest::StatusCode;

use common::store::{StoreError, ZNodeStore};
use common::znode::{ZNode, ZNodeMeta};
use common::zpath::ZPath;

use crate::api::client::{ApiClient, ApiError};
use crate::api::v0::znode::get::GetNodeRequest;
use crate::api::v0::znode::set_data::{ConflictResponse, SetDataRequest};

/// Tree store backed by the gateway's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpZNodeStore {
    client: ApiClient,
}

impl HttpZNodeStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fold an API failure into the store error taxonomy. The gateway
    /// speaks in HTTP statuses; the session speaks in store errors.
    fn map_error(&self, path: &ZPath, expected_version: i64, err: ApiError) -> StoreError {
        match err {
            ApiError::HttpStatus(StatusCode::NOT_FOUND, _) => StoreError::NotFound(path.clone()),
            ApiError::HttpStatus(StatusCode::CONFLICT, body) => {
                // the 409 body carries the store's current version when
                // the gateway knows it
                let actual = serde_json::from_str::<ConflictResponse>(&body)
                    .map(|c| c.actual)
                    .unwrap_or(-1);
                StoreError::VersionConflict {
                    expected: expected_version,
                    actual,
                }
            }
            ApiError::HttpStatus(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                StoreError::PermissionDenied(path.clone())
            }
            ApiError::HttpStatus(status, body) => {
                StoreError::Transport(format!("HTTP {}: {}", status, body))
            }
            ApiError::Reqwest(e) => StoreError::Transport(e.to_string()),
            ApiError::UrlParse(e) => StoreError::Transport(e.to_string()),
        }
    }
}

#[async_trait]
impl ZNodeStore for HttpZNodeStore {
    async fn get_node(&self, path: &ZPath) -> Result<ZNode, StoreError> {
        let request = GetNodeRequest {
            path: path.as_str().to_string(),
        };

        let response = self
            .client
            .call(request)
            .await
            .map_err(|e| self.map_error(path, -1, e))?;

        Ok(ZNode {
            path: response.path,
            data: response.data,
            acl: response.acl,
            meta: response.meta,
        })
    }

    async fn set_data(
        &self,
        path: &ZPath,
        expected_version: i64,
        data: &str,
    ) -> Result<ZNodeMeta, StoreError> {
        let request = SetDataRequest {
            path: path.as_str().to_string(),
            version: expected_version,
            data: data.to_string(),
        };

        let response = self
            .client
            .call(request)
            .await
            .map_err(|e| self.map_error(path, expected_version, e))?;

        Ok(response.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpZNodeStore {
        let remote = url::Url::parse("http://localhost:9000").unwrap();
        HttpZNodeStore::new(ApiClient::new(&remote).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let store = store();
        let path = ZPath::parse("/config");

        let not_found = store.map_error(
            &path,
            2,
            ApiError::HttpStatus(StatusCode::NOT_FOUND, String::new()),
        );
        assert_eq!(not_found, StoreError::NotFound(path.clone()));

        let forbidden = store.map_error(
            &path,
            2,
            ApiError::HttpStatus(StatusCode::FORBIDDEN, String::new()),
        );
        assert_eq!(forbidden, StoreError::PermissionDenied(path.clone()));

        let server_error = store.map_error(
            &path,
            2,
            ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        );
        assert!(matches!(server_error, StoreError::Transport(_)));
    }

    #[test]
    fn test_conflict_mapping_reads_body() {
        let store = store();
        let path = ZPath::parse("/config");

        let with_body = store.map_error(
            &path,
            2,
            ApiError::HttpStatus(
                StatusCode::CONFLICT,
                "{\"expected\":2,\"actual\":5}".to_string(),
            ),
        );
        assert_eq!(
            with_body,
            StoreError::VersionConflict {
                expected: 2,
                actual: 5
            }
        );

        // a bare 409 still maps to a conflict, version unknown
        let bare = store.map_error(
            &path,
            2,
            ApiError::HttpStatus(StatusCode::CONFLICT, String::new()),
        );
        assert_eq!(
            bare,
            StoreError::VersionConflict {
                expected: 2,
                actual: -1
            }
        );
    }
}
