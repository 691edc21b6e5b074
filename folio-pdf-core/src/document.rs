use crate::date::{format_pdf_date, parse_pdf_date};
use crate::error::{PdfError, Result};
use crate::geometry::Rectangle;
use crate::objects::{Array, Dictionary, Object, ObjectId, ObjectRegistry, PdfString};
use crate::views::{dictionary_view, PdfObjectWrapper};
use crate::writer::{PdfWriter, WriterConfig, XrefTable};
use chrono::{DateTime, Local, Utc};
use std::io::Write;

/// A PDF document: an object registry with a page tree, a catalog and an
/// information dictionary.
///
/// # Example
///
/// ```rust
/// use folio_pdf::annotations::LinkAnnotation;
/// use folio_pdf::geometry::Rectangle;
/// use folio_pdf::{Document, WriterConfig};
///
/// let mut doc = Document::new();
/// doc.set_title("My Document");
/// let page = doc.add_page(595.0, 842.0).unwrap();
///
/// let link = LinkAnnotation::create(Rectangle::from_position_and_size(72.0, 720.0, 100.0, 12.0));
/// doc.add_annotation(page, link).unwrap();
///
/// let bytes = doc.to_bytes(&WriterConfig::default()).unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.7"));
/// ```
pub struct Document {
    objects: ObjectRegistry,
    catalog: ObjectId,
    pages: ObjectId,
    info: ObjectId,
    page_ids: Vec<ObjectId>,
    pub(crate) metadata: DocumentMetadata,
}

/// Metadata for a PDF document, written to the `Info` dictionary on save.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: Some(format!("folio-pdf v{}", crate::VERSION)),
            creation_date: None,
            modification_date: None,
        }
    }
}

impl Document {
    /// Creates a document with an empty page tree.
    pub fn new() -> Self {
        let mut objects = ObjectRegistry::new();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::name("Pages"));
        pages.set("Kids", Array::new());
        pages.set("Count", 0);
        let pages = objects.register(pages);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", pages);
        let catalog = objects.register(catalog);

        let info = objects.register(Dictionary::new());

        Self {
            objects,
            catalog,
            pages,
            info,
            page_ids: Vec::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    /// Appends a page with a `[0 0 width height]` media box.
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<ObjectId> {
        let mut page = Dictionary::new();
        page.set("Type", Object::name("Page"));
        page.set("Parent", self.pages);
        page.set(
            "MediaBox",
            Rectangle::from_position_and_size(0.0, 0.0, width, height),
        );
        page.set("Resources", Dictionary::new());

        self.check_page_tree()?;
        let id = self.objects.register(page);
        self.page_ids.push(id);

        let count = self.page_ids.len();
        let tree = self.dictionary_mut(self.pages)?;
        tree.get_or_insert_array("Kids")?.push(id);
        tree.set("Count", count);

        tracing::debug!(page = %id, count, "added page");
        Ok(id)
    }

    /// Registers `annotation`, points its `P` entry at `page` and appends it
    /// to the page's `Annots`.
    pub fn add_annotation(&mut self, page: ObjectId, mut annotation: Dictionary) -> Result<ObjectId> {
        let page_dict = self.dictionary_mut(page)?;
        if let Some(annots) = page_dict.get("Annots") {
            if !matches!(annots, Object::Array(_)) {
                return Err(PdfError::WrongObjectKind {
                    key: "Annots".to_string(),
                    expected: "array",
                    found: annots.kind().as_str(),
                });
            }
        }

        annotation.set("P", page);
        let id = self.objects.register(annotation);
        self.dictionary_mut(page)?
            .get_or_insert_array("Annots")?
            .push(id);

        tracing::debug!(annotation = %id, %page, "added annotation");
        Ok(id)
    }

    /// Registers a signature dictionary. Signature dictionaries are always
    /// indirect.
    pub fn add_signature(&mut self, signature: Dictionary) -> ObjectId {
        self.objects.register(signature)
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn catalog_id(&self) -> ObjectId {
        self.catalog
    }

    pub fn info_id(&self) -> ObjectId {
        self.info
    }

    /// Pages in the order they were added.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.metadata.creator = Some(creator.into());
    }

    pub fn set_producer(&mut self, producer: impl Into<String>) {
        self.metadata.producer = Some(producer.into());
    }

    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
    }

    pub fn set_creation_date_local(&mut self, date: DateTime<Local>) {
        self.metadata.creation_date = Some(date.with_timezone(&Utc));
    }

    pub fn set_modification_date(&mut self, date: DateTime<Utc>) {
        self.metadata.modification_date = Some(date);
    }

    /// Writes the document and returns the byte offsets of its objects.
    ///
    /// Metadata is copied into the `Info` dictionary first. Nothing else in
    /// the graph is touched, so writing twice gives the same bytes.
    pub fn write<W: Write>(&mut self, writer: &mut W, config: &WriterConfig) -> Result<XrefTable> {
        self.sync_info()?;
        let mut pdf_writer = PdfWriter::with_config(writer, config.clone());
        pdf_writer.write_registry(&self.objects, self.catalog, Some(self.info))
    }

    pub fn to_bytes(&mut self, config: &WriterConfig) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, config)?;
        Ok(buffer)
    }

    /// Saves the document to a file with the default writer configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.save_with_config(path, &WriterConfig::default())
    }

    pub fn save_with_config(
        &mut self,
        path: impl AsRef<std::path::Path>,
        config: &WriterConfig,
    ) -> Result<()> {
        self.sync_info()?;
        let mut writer = PdfWriter::new(path, config.clone())?;
        writer.write_registry(&self.objects, self.catalog, Some(self.info))?;
        Ok(())
    }

    fn sync_info(&mut self) -> Result<()> {
        let metadata = self.metadata.clone();
        let mut info: DocumentInfo<'_> = self.objects.view(self.info)?;
        info.apply(&metadata);
        Ok(())
    }

    fn check_page_tree(&mut self) -> Result<()> {
        let tree = self.dictionary_mut(self.pages)?;
        match tree.get("Kids") {
            None | Some(Object::Array(_)) => Ok(()),
            Some(other) => Err(PdfError::WrongObjectKind {
                key: "Kids".to_string(),
                expected: "array",
                found: other.kind().as_str(),
            }),
        }
    }

    fn dictionary_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary> {
        match self.objects.resolve_mut(id) {
            Some(Object::Dictionary(dict)) => Ok(dict),
            Some(other) => Err(PdfError::InvalidStructure(format!(
                "object {id} is a {}, not a dictionary",
                other.kind()
            ))),
            None => Err(PdfError::DanglingReference(id.number(), id.generation())),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

dictionary_view! {
    /// View over the document information dictionary (`Info`).
    pub struct DocumentInfo;
}

impl DocumentInfo<'_> {
    pub fn title(&self) -> Option<String> {
        self.text("Title")
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.put("Title", PdfString::from_text(title))
    }

    pub fn author(&self) -> Option<String> {
        self.text("Author")
    }

    pub fn set_author(&mut self, author: &str) -> &mut Self {
        self.put("Author", PdfString::from_text(author))
    }

    pub fn producer(&self) -> Option<String> {
        self.text("Producer")
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        parse_pdf_date(&self.text("CreationDate")?).ok()
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        parse_pdf_date(&self.text("ModDate")?).ok()
    }

    /// Writes every field of `metadata`. Absent fields remove their key.
    pub fn apply(&mut self, metadata: &DocumentMetadata) -> &mut Self {
        let texts = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
            ("Creator", &metadata.creator),
            ("Producer", &metadata.producer),
        ];
        for (key, value) in texts {
            match value {
                Some(text) => self.put(key, PdfString::from_text(text)),
                None => self.remove_key(key),
            };
        }

        let dates = [
            ("CreationDate", metadata.creation_date),
            ("ModDate", metadata.modification_date),
        ];
        for (key, value) in dates {
            match value {
                Some(date) => self.put(key, PdfString::from_text(&format_pdf_date(date))),
                None => self.remove_key(key),
            };
        }
        self
    }

    fn text(&self, key: &str) -> Option<String> {
        self.dict.get_string(key).map(PdfString::to_text)
    }
}
