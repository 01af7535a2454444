use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use common::format::FormatKind;
use common::session::{LoadError, NavigationGuard, SaveError};

/// Open a node's data in $EDITOR and save the result back.
///
/// The node is rendered under the format remembered for its path (or
/// `--kind`), handed to the editor as a temp file, and written back
/// with compare-and-swap. If the save is refused, the edits are either
/// discarded on confirmation or kept in the temp file.
#[derive(Args, Debug, Clone)]
pub struct Edit {
    /// Path of the node to edit
    pub path: String,

    /// Format kind (text, json, yaml, xml); overrides the remembered one
    #[arg(long)]
    pub kind: Option<FormatKind>,
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("editor failed: {0}")]
    Editor(String),
}

fn file_extension(kind: FormatKind) -> &'static str {
    match kind {
        FormatKind::Text => "txt",
        FormatKind::Json => "json",
        FormatKind::Yaml => "yaml",
        FormatKind::Xml => "xml",
    }
}

/// Run $EDITOR (default `vi`) on `path` and wait for it to exit.
async fn run_editor(path: PathBuf) -> Result<(), EditError> {
    let status = tokio::task::spawn_blocking(move || {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
        // $EDITOR may carry flags ("code -w")
        let mut parts = editor.split_whitespace();
        let program = parts.next().unwrap_or("vi").to_string();
        let args: Vec<String> = parts.map(str::to_string).collect();

        std::process::Command::new(program)
            .args(args)
            .arg(path)
            .status()
    })
    .await
    .map_err(|e| EditError::Editor(e.to_string()))??;

    if !status.success() {
        return Err(EditError::Editor(format!("editor exited with {}", status)));
    }
    Ok(())
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Edit {
    type Error = EditError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller();
        controller.load(&self.path).await?;

        // Recall runs alongside the user's explicit choice; an explicit
        // --kind pins the selection so the recall cannot override it.
        let recall = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.recall_format().await })
        };
        if let Some(kind) = self.kind {
            controller.switch_format(kind).await;
        }
        let _ = recall.await;

        let kind = controller.selected_format().await;
        if controller.formatter_available().await {
            if let Err(err) = controller.format_buffer().await {
                ctx.ui
                    .notify(&format!("note: data is not valid {}: {}", kind, err));
            }
        }

        let mut temp = tempfile::Builder::new()
            .prefix("zoonav-")
            .suffix(&format!(".{}", file_extension(kind)))
            .tempfile()?;
        temp.write_all(controller.buffer().await.as_bytes())?;
        temp.flush()?;

        run_editor(temp.path().to_path_buf()).await?;

        let edited = tokio::fs::read_to_string(temp.path()).await?;
        controller.set_buffer(edited).await;

        if !controller.is_dirty().await {
            return Ok("No changes.".to_string());
        }

        let path = controller.snapshot().await.path().clone();
        match controller.save().await {
            Ok(meta) => Ok(format!("Saved {} at version {}", path, meta.data_version)),
            Err(err) => {
                ctx.ui.report_error(&err);

                let guard = NavigationGuard::new(Arc::clone(&ctx.ui));
                if guard.can_leave(&controller).await {
                    Ok("Changes discarded.".to_string())
                } else {
                    let (_, rescue) = temp.keep().map_err(|e| EditError::Io(e.error))?;
                    Ok(format!("Your edits are kept at {}", rescue.display()))
                }
            }
        }
    }
}
