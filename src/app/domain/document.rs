use crate::app::services::text_ops::file_extension;

/// Name given to documents created with File/New.
pub const UNTITLED_NAME: &str = "untitled.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Languages the editor knows how to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    PlainText,
    JavaScript,
    Html,
    Css,
    Python,
    Php,
    Sql,
}

impl Language {
    /// Infer the language from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Self {
        match file_extension(name).as_deref() {
            Some("js") => Self::JavaScript,
            Some("html") | Some("htm") => Self::Html,
            Some("css") => Self::Css,
            Some("py") => Self::Python,
            Some("php") => Self::Php,
            Some("sql") => Self::Sql,
            _ => Self::PlainText,
        }
    }

    /// Widget mode name, `None` for plain text (no highlighting).
    pub fn mode(self) -> Option<&'static str> {
        match self {
            Self::PlainText => None,
            Self::JavaScript => Some("javascript"),
            Self::Html => Some("htmlmixed"),
            Self::Css => Some("css"),
            Self::Python => Some("python"),
            Self::Php => Some("php"),
            Self::Sql => Some("sql"),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::PlainText => "Plain Text",
            Self::JavaScript => "JavaScript",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Python => "Python",
            Self::Php => "PHP",
            Self::Sql => "SQL",
        }
    }
}

/// An in-memory named text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub content: String,
    pub language: Language,
}

impl Document {
    pub fn new_untitled(id: DocumentId) -> Self {
        Self {
            id,
            name: UNTITLED_NAME.to_string(),
            content: String::new(),
            language: Language::PlainText,
        }
    }

    pub fn new_imported(id: DocumentId, name: String, content: String) -> Self {
        let language = Language::from_file_name(&name);
        Self {
            id,
            name,
            content,
            language,
        }
    }

    /// Replace the content with freshly imported text, re-inferring the language.
    pub fn reimport(&mut self, content: String) {
        self.language = Language::from_file_name(&self.name);
        self.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_inference_table() {
        assert_eq!(Language::from_file_name("app.js"), Language::JavaScript);
        assert_eq!(Language::from_file_name("index.html"), Language::Html);
        assert_eq!(Language::from_file_name("index.htm"), Language::Html);
        assert_eq!(Language::from_file_name("site.css"), Language::Css);
        assert_eq!(Language::from_file_name("main.py"), Language::Python);
        assert_eq!(Language::from_file_name("page.php"), Language::Php);
        assert_eq!(Language::from_file_name("schema.sql"), Language::Sql);
        assert_eq!(Language::from_file_name("notes.txt"), Language::PlainText);
        assert_eq!(Language::from_file_name("Makefile"), Language::PlainText);
    }

    #[test]
    fn test_language_inference_ignores_case() {
        assert_eq!(Language::from_file_name("LEGACY.JS"), Language::JavaScript);
        assert_eq!(Language::from_file_name("Report.Sql"), Language::Sql);
    }

    #[test]
    fn test_mode_table() {
        assert_eq!(Language::JavaScript.mode(), Some("javascript"));
        assert_eq!(Language::Html.mode(), Some("htmlmixed"));
        assert_eq!(Language::Css.mode(), Some("css"));
        assert_eq!(Language::Python.mode(), Some("python"));
        assert_eq!(Language::Php.mode(), Some("php"));
        assert_eq!(Language::Sql.mode(), Some("sql"));
        assert_eq!(Language::PlainText.mode(), None);
    }

    #[test]
    fn test_new_untitled() {
        let doc = Document::new_untitled(DocumentId(7));
        assert_eq!(doc.name, "untitled.txt");
        assert!(doc.content.is_empty());
        assert_eq!(doc.language, Language::PlainText);
    }

    #[test]
    fn test_reimport_keeps_id_and_name() {
        let mut doc = Document::new_imported(DocumentId(3), "a.py".into(), "x = 1".into());
        doc.reimport("x = 2".into());
        assert_eq!(doc.id, DocumentId(3));
        assert_eq!(doc.name, "a.py");
        assert_eq!(doc.content, "x = 2");
        assert_eq!(doc.language, Language::Python);
    }
}
