use clap::Args;

use common::store::StoreError;
use common::zpath::ZPath;

/// Print a node's data, optionally with its stat.
#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Path of the node to read
    pub path: String,

    /// Also print the node's stat (versions, timestamps, zxids)
    #[arg(long)]
    pub stat: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = GetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = ZPath::parse(&self.path);
        let node = ctx.store.get_node(&path).await?;

        if !self.stat {
            return Ok(node.data);
        }

        let meta = node.meta;
        let mut lines = vec![node.data];
        lines.push(String::new());
        lines.push(format!("path:             {}", node.path));
        lines.push(format!("czxid:            {}", meta.czxid));
        lines.push(format!("mzxid:            {}", meta.mzxid));
        lines.push(format!("ctime:            {}", meta.ctime));
        lines.push(format!("mtime:            {}", meta.mtime));
        lines.push(format!("data version:     {}", meta.data_version));
        lines.push(format!("acl version:      {}", meta.acl_version));
        lines.push(format!("children version: {}", meta.children_version));
        lines.push(format!("data length:      {}", meta.data_length));
        lines.push(format!("children:         {}", meta.num_children));
        lines.push(format!("ephemeral owner:  {}", meta.ephemeral_owner));

        Ok(lines.join("\n"))
    }
}
