use crate::domain::{BufferEditor, RichTextEditor};
use crate::domain::rich_text_editor::ChangeHandler;
use anyhow::{bail, Context};
use tokio::process::Command;

/// Edits content in a program such as `$EDITOR`, through a temporary file.
pub struct ExternalEditor {
    command: String,
    buffer: BufferEditor,
}

impl ExternalEditor {
    /// `command` is the program plus any leading arguments, e.g. `code --wait`.
    pub fn new(command: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            buffer: BufferEditor::new(initial),
        }
    }

    /// Open the content in the editor and take whatever it saved.
    #[tracing::instrument(name = "Running external editor", skip(self), fields(command = %self.command))]
    pub async fn edit(&mut self) -> Result<(), anyhow::Error> {
        let mut words = self.command.split_whitespace();
        let program = words.next().context("No editor command configured")?;

        let file = tempfile::Builder::new()
            .prefix("newsletter-block-")
            .suffix(".md")
            .tempfile()
            .context("Failed to create a file to edit")?;
        tokio::fs::write(file.path(), self.buffer.get_content())
            .await
            .context("Failed to write the content to edit")?;

        let status = Command::new(program)
            .args(words)
            .arg(file.path())
            .status()
            .await
            .with_context(|| format!("Failed to start {}", program))?;
        if !status.success() {
            bail!("{} exited with {}", program, status);
        }

        let edited = tokio::fs::read_to_string(file.path())
            .await
            .context("Failed to read the edited content")?;
        self.buffer.set_content(edited.trim_end_matches(&['\r', '\n'][..]));
        Ok(())
    }
}

impl RichTextEditor for ExternalEditor {
    fn get_content(&self) -> String {
        self.buffer.get_content()
    }

    fn set_content(&mut self, content: &str) {
        self.buffer.set_content(content)
    }

    fn on_change(&mut self, handler: ChangeHandler) {
        self.buffer.on_change(handler)
    }
}
