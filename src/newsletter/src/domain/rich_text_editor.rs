/// Callback fired with the full editor content after every change.
pub type ChangeHandler = Box<dyn FnMut(&str) + Send>;

/// The capability the form needs from a rich-text editing widget. The concrete
/// editor is chosen by the front end; nothing else depends on it.
pub trait RichTextEditor {
    fn get_content(&self) -> String;

    fn set_content(&mut self, content: &str);

    fn on_change(&mut self, handler: ChangeHandler);
}

/// Plain in-memory editor, used when content arrives from files.
#[derive(Default)]
pub struct BufferEditor {
    content: String,
    handlers: Vec<ChangeHandler>,
}

impl BufferEditor {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            content: initial.into(),
            handlers: Vec::new(),
        }
    }
}

impl RichTextEditor for BufferEditor {
    fn get_content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: &str) {
        if self.content == content {
            return;
        }
        self.content = content.to_string();
        for handler in self.handlers.iter_mut() {
            handler(&self.content);
        }
    }

    fn on_change(&mut self, handler: ChangeHandler) {
        self.handlers.push(handler);
    }
}
