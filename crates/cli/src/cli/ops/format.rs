use clap::Args;

use common::format::{FormatError, FormatKind};
use common::session::{LoadError, SaveError};

/// Pretty-print a node's data under a format and print the result.
#[derive(Args, Debug, Clone)]
pub struct Format {
    /// Path of the node to format
    pub path: String,

    /// Format kind (text, json, yaml, xml); defaults to the format
    /// remembered for this path
    #[arg(long)]
    pub kind: Option<FormatKind>,

    /// Write the formatted data back to the node
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatOpError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Format {
    type Error = FormatOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller();
        controller.load(&self.path).await?;
        controller.recall_format().await;

        if let Some(kind) = self.kind {
            controller.switch_format(kind).await;
        }

        controller.format_buffer().await?;
        let formatted = controller.buffer().await;

        if self.write {
            let meta = controller.save().await?;
            ctx.ui.notify(&format!(
                "Saved {} at version {}",
                controller.snapshot().await.path(),
                meta.data_version
            ));
        }

        Ok(formatted)
    }
}
