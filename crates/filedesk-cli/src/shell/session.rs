//! Executes parsed shell commands against a [`Workspace`].

use std::path::Path;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, warn};

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::types::FolderId;
use filedesk_entity::file::UploadBlob;
use filedesk_entity::folder::FolderNode;
use filedesk_entity::notification::Notification;
use filedesk_service::{FileFilter, FolderView, Selection, Workspace};

use super::parser::{CdTarget, SelectTarget, ShellCommand, ShellCommandParser};
use crate::output::{
    self, FileRow, FolderRow, NotificationRow, OutputFormat, kv_line, render_json, render_list,
};

const HELP: &str = "\
Commands:
  ls                               show the current folder
  cd <id|..|/>                     enter a folder, its parent, or root
  mkdir <name>                     create a folder here
  rmdir <id>                       delete a folder (its files move to root)
  upload <path>...                 upload local files to root
  rm [<id>...]                     delete files (the selection if no ids)
  mv <file-id> <folder-id|/>       move a file
  select <id|all|none>             change the selection in this folder
  cat <id>                         print a file's content
  recent [n]                       first files in upload order
  tree                             folder hierarchy
  find [query] [--kind K]          search all folders (K: images, documents, other)
  du                               storage usage
  notifications                    notification history
  help                             this text
  quit                             leave the shell";

/// What the shell loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the output (if any) and read the next line.
    Continue(String),
    /// Leave the shell.
    Quit,
}

/// One interactive session: a workspace, the selection in the current
/// folder, and a feed of notifications to echo.
#[derive(Debug)]
pub struct Session {
    ws: Workspace,
    format: OutputFormat,
    selection: Selection,
    notifications: broadcast::Receiver<Notification>,
}

#[derive(Serialize)]
struct Listing {
    path: String,
    exists: bool,
    folders: Vec<FolderRow>,
    files: Vec<FileRow>,
    selected: Vec<u64>,
}

impl Session {
    /// Start a session at root.
    pub fn new(ws: Workspace, format: OutputFormat) -> Self {
        let notifications = ws.notifications.subscribe();
        Self {
            ws,
            format,
            selection: Selection::new(),
            notifications,
        }
    }

    /// The workspace this session drives.
    pub fn workspace(&self) -> &Workspace {
        &self.ws
    }

    /// Prompt showing the current path.
    pub fn prompt(&self) -> String {
        format!("filedesk:{}> ", self.ws.navigator.view().path_string())
    }

    /// Parse and run one line.
    pub async fn run_line(&mut self, line: &str) -> AppResult<Outcome> {
        let command = ShellCommandParser::parse(line)
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.execute(command).await
    }

    /// Notifications pushed since the last call, rendered as lines.
    pub fn drain_notifications(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            match self.notifications.try_recv() {
                Ok(n) => lines.push(output::notification_line(&n)),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification feed lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        lines
    }

    /// Run one command.
    pub async fn execute(&mut self, command: ShellCommand) -> AppResult<Outcome> {
        debug!(command = ?command, "Executing shell command");

        let out = match command {
            ShellCommand::Quit => return Ok(Outcome::Quit),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Ls => self.render_view(&self.ws.navigator.view()),
            ShellCommand::Cd(target) => self.cd(target),
            ShellCommand::Mkdir { name } => {
                let parent = self.ws.navigator.cursor();
                let folder = self.ws.folders.create(&name, parent).await?;
                render_list(&[FolderRow::from(&folder)], self.format)
            }
            ShellCommand::Rmdir { id } => {
                let outcome = self.ws.folders.delete(id).await?;
                if outcome.orphaned_children > 0 {
                    output::warning_line(&format!(
                        "{} subfolder(s) of {id} now point at a missing parent",
                        outcome.orphaned_children
                    ))
                } else {
                    String::new()
                }
            }
            ShellCommand::Upload { paths } => {
                let mut blobs = Vec::with_capacity(paths.len());
                for path in &paths {
                    blobs.push(read_blob(path).await?);
                }
                let created = self.ws.files.upload(blobs).await?;
                let rows: Vec<FileRow> = created.iter().map(FileRow::from).collect();
                render_list(&rows, self.format)
            }
            ShellCommand::Rm { ids } => {
                let ids = if ids.is_empty() {
                    let visible = self.ws.navigator.visible_files();
                    let selected: Vec<_> = self
                        .selection
                        .selected_in(&visible)
                        .iter()
                        .map(|f| f.id)
                        .collect();
                    if selected.is_empty() {
                        return Err(AppError::validation(
                            "Nothing selected: give file ids or use 'select'",
                        ));
                    }
                    self.selection.clear();
                    selected
                } else {
                    ids
                };
                self.ws.files.delete(&ids).await?;
                String::new()
            }
            ShellCommand::Mv { file, target } => {
                match self.ws.files.move_to(file, target).await? {
                    Some(_) => String::new(),
                    None => output::warning_line(&format!("No file with id {file}")),
                }
            }
            ShellCommand::Select(target) => self.select(target),
            ShellCommand::Cat { id } => {
                let bytes = self.ws.files.read_content(id).await?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            ShellCommand::Recent { count } => {
                let rows: Vec<FileRow> = self
                    .ws
                    .files
                    .recent(count)
                    .iter()
                    .map(|f| FileRow::from(f.as_ref()))
                    .collect();
                render_list(&rows, self.format)
            }
            ShellCommand::Tree => {
                let tree = self.ws.folders.tree();
                match self.format {
                    OutputFormat::Json => render_json(&tree),
                    OutputFormat::Table => {
                        let mut lines = vec!["/".to_string()];
                        render_nodes(&tree.roots, "", &mut lines);
                        lines.join("\n")
                    }
                }
            }
            ShellCommand::Find { query, kind } => {
                let filter = FileFilter::query(query).with_kind(kind);
                let rows: Vec<FileRow> = self
                    .ws
                    .files
                    .search(&filter)
                    .iter()
                    .map(|f| FileRow::from(f.as_ref()))
                    .collect();
                render_list(&rows, self.format)
            }
            ShellCommand::Du => {
                let usage = self.ws.files.storage_usage();
                match self.format {
                    OutputFormat::Json => render_json(&usage),
                    OutputFormat::Table => [
                        kv_line("Files", &self.ws.file_store.len().to_string()),
                        kv_line("Folders", &self.ws.folder_store.len().to_string()),
                        kv_line("Usage", &usage.to_string()),
                    ]
                    .join("\n"),
                }
            }
            ShellCommand::Notifications => {
                let rows: Vec<NotificationRow> = self
                    .ws
                    .notifications
                    .history()
                    .await
                    .iter()
                    .map(NotificationRow::from)
                    .collect();
                render_list(&rows, self.format)
            }
        };

        self.selection
            .retain_visible(&self.ws.navigator.visible_files());
        Ok(Outcome::Continue(out))
    }

    fn cd(&self, target: CdTarget) -> String {
        let view = match target {
            CdTarget::Root => self.ws.navigator.enter(None),
            CdTarget::Up => self.ws.navigator.up(),
            CdTarget::Folder(id) => self.ws.navigator.enter(Some(id)),
        };
        if view.exists {
            String::new()
        } else {
            output::warning_line(&format!(
                "Folder {} does not exist; showing an empty view",
                view.cursor.map(FolderId::into_raw).unwrap_or_default()
            ))
        }
    }

    fn select(&mut self, target: SelectTarget) -> String {
        let visible = self.ws.navigator.visible_files();
        match target {
            SelectTarget::All => self.selection.toggle_all(&visible),
            SelectTarget::None => self.selection.clear(),
            SelectTarget::File(id) => {
                if !visible.iter().any(|f| f.id == id) {
                    return output::warning_line(&format!("File {id} is not in this folder"));
                }
                self.selection.toggle(id);
            }
        }
        format!("{} of {} selected", self.selection.len(), visible.len())
    }

    fn render_view(&self, view: &FolderView) -> String {
        let folders: Vec<FolderRow> = view
            .folders
            .iter()
            .map(|f| FolderRow::from(f.as_ref()))
            .collect();
        let files: Vec<FileRow> = view.files.iter().map(|f| FileRow::from(f.as_ref())).collect();

        match self.format {
            OutputFormat::Json => render_json(&Listing {
                path: view.path_string(),
                exists: view.exists,
                folders,
                files,
                selected: self
                    .selection
                    .selected_in(&view.files)
                    .iter()
                    .map(|f| f.id.into_raw())
                    .collect(),
            }),
            OutputFormat::Table => {
                if view.is_empty() {
                    return format!("{}\n(empty)", view.path_string());
                }
                let mut sections = vec![view.path_string()];
                if !folders.is_empty() {
                    sections.push(format!("Folders:\n{}", render_list(&folders, self.format)));
                }
                if !files.is_empty() {
                    sections.push(format!("Files:\n{}", render_list(&files, self.format)));
                }
                if !self.selection.is_empty() {
                    sections.push(format!("{} selected", self.selection.len()));
                }
                sections.join("\n")
            }
        }
    }
}

/// Read a local file into an upload blob, guessing its MIME type from the
/// extension.
async fn read_blob(path: &Path) -> AppResult<UploadBlob> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::NotFound,
            format!("Cannot read '{}'", path.display()),
            e,
        )
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(UploadBlob::new(name, mime, bytes))
}

fn render_nodes(nodes: &[FolderNode], prefix: &str, lines: &mut Vec<String>) {
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let branch = if last { "└── " } else { "├── " };
        let files = match node.file_count {
            0 => String::new(),
            1 => " [1 file]".to_string(),
            n => format!(" [{n} files]"),
        };
        lines.push(format!("{prefix}{branch}{} ({}){files}", node.name, node.id));

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_nodes(&node.children, &child_prefix, lines);
    }
}
