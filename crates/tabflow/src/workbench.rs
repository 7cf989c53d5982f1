//! The workbench: command dispatch over the session engine and project tree.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use tabflow_core::{RetentionStore, WorkbenchConfig};
use tabflow_project::ProjectTree;
use tabflow_session::{DialogPresenter, RenderSink, SessionController};

use crate::command::Command;

/// One editor window: a session controller, its project tree, and the
/// command loop that drives them.
pub struct Workbench {
    controller: SessionController,
    tree: ProjectTree,
    config: WorkbenchConfig,
    config_path: Option<PathBuf>,
}

impl Workbench {
    /// Assemble a workbench from its host-provided collaborators.
    pub fn new(
        config: WorkbenchConfig,
        dialogs: Arc<dyn DialogPresenter>,
        sink: Arc<dyn RenderSink>,
        store: Arc<dyn RetentionStore>,
    ) -> Self {
        let controller = SessionController::new(config.clone(), dialogs, sink, store);
        Self {
            controller,
            tree: ProjectTree::new(),
            config,
            config_path: None,
        }
    }

    /// Remember where the configuration came from, so restart-init can
    /// re-read it.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// The session controller, for hosts that call it directly.
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Mutable access to the session controller.
    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    /// The project tree.
    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    /// Drain commands until every sender is gone.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("Workbench command loop started");
        while let Some(command) = commands.recv().await {
            if let Err(e) = self.dispatch(command).await {
                error!("Command failed: {:#}", e);
            }
        }
        info!("Workbench command loop stopped");
    }

    /// Route one command to the engine.
    pub async fn dispatch(&mut self, command: Command) -> anyhow::Result<()> {
        debug!("Dispatching {:?}", command);
        match command {
            Command::OpenFile { path } => {
                let opened = self
                    .controller
                    .open_existing(&path, &self.tree)
                    .with_context(|| format!("opening '{path}'"))?;
                if opened.is_none() {
                    warn!("'{}' is not part of the project", path);
                }
            }
            Command::NewTab => {
                self.controller.open(String::new(), None);
            }
            Command::CloseTab { index } => {
                self.controller
                    .close(index)
                    .await
                    .context("closing tab")?;
            }
            Command::CloseTabsRight { index } => {
                self.controller
                    .close_tabs_right(index)
                    .await
                    .context("closing tabs to the right")?;
            }
            Command::RaiseTab { index } => self.controller.raise_by_index(index),
            Command::ChangeTab { delta } => {
                let _ = self.controller.switch_cyclic(delta);
            }
            Command::ChangeTabLinear { shift } => {
                let _ = self.controller.switch_linear(shift);
            }
            Command::EndSwitchGesture => self.controller.end_switch_gesture(),
            Command::ReorderTab {
                moving,
                target,
                position,
            } => self.controller.reorder_tab(moving, target, position),
            Command::Render | Command::Startup => self.controller.render(),
            Command::Restart => {
                if let Some(path) = &self.config_path {
                    self.config = WorkbenchConfig::from_file(path)
                        .with_context(|| format!("reloading '{}'", path.display()))?;
                }
                self.controller.reload_config(self.config.clone());
            }
            Command::SetSyntax { mode } => self.controller.set_syntax(&mode),
            Command::AddDirectory { path } => {
                self.tree
                    .add_directory(&path)
                    .with_context(|| format!("adding project root '{}'", path.display()))?;
            }
            Command::RemoveAllDirectories => self.tree.remove_all(),
            Command::RefreshTree => self.tree.refresh(),
            Command::ToggleDirectory { path } => {
                let expanded = self.tree.toggle(&path);
                debug!("'{}' now {}", path, if expanded { "expanded" } else { "collapsed" });
            }
        }
        Ok(())
    }
}
