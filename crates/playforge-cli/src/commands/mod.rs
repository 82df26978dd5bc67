//! One module per subcommand. Handlers translate arguments into service
//! calls and print results; no business logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod run;
pub mod validate;

use std::sync::Arc;

use playforge_adapters::{JinjaEngine, LocalFilesystem, YamlPlaybookLoader};
use playforge_core::application::ports::{Filesystem, PlaybookLoader, TemplateEngine};

/// The real adapters every playbook command shares.
pub(crate) struct Adapters {
    pub filesystem: Arc<dyn Filesystem>,
    pub loader: Arc<dyn PlaybookLoader>,
    pub engine: Arc<dyn TemplateEngine>,
}

impl Adapters {
    pub fn local() -> Self {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        Self {
            loader: Arc::new(YamlPlaybookLoader::new(filesystem.clone())),
            engine: Arc::new(JinjaEngine::new(filesystem.clone())),
            filesystem,
        }
    }
}
