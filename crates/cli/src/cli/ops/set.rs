use std::path::PathBuf;

use clap::Args;

use common::session::{LoadError, SaveError};
use common::store::StoreError;
use common::zpath::ZPath;

/// Replace a node's data.
///
/// Without `--version` the current version is fetched first and the
/// write is issued against it; with `--version` the write goes straight
/// to the store and fails on any mismatch.
#[derive(Args, Debug, Clone)]
pub struct Set {
    /// Path of the node to write
    pub path: String,

    /// New data, inline
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// New data, read from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Expected data version; the write fails if the node has moved on
    #[arg(long)]
    pub version: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("no data given; pass --data or --file")]
    MissingContent,

    #[error("failed to read {0}: {1}")]
    ReadFile(PathBuf, std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

impl Set {
    fn content(&self) -> Result<String, SetError> {
        if let Some(data) = &self.data {
            return Ok(data.clone());
        }
        if let Some(file) = &self.file {
            return std::fs::read_to_string(file)
                .map_err(|e| SetError::ReadFile(file.clone(), e));
        }
        Err(SetError::MissingContent)
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Set {
    type Error = SetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let content = self.content()?;
        let path = ZPath::parse(&self.path);

        let meta = match self.version {
            Some(version) => ctx.store.set_data(&path, version, &content).await?,
            None => {
                let controller = ctx.controller();
                controller.load(path.as_str()).await?;
                controller.set_buffer(content).await;
                controller.save().await?
            }
        };

        Ok(format!("Saved {} at version {}", path, meta.data_version))
    }
}
