use crate::error::{PdfError, Result};
use crate::pdf_version::SUPPORTED_VERSIONS;
use crate::objects::{Dictionary, Object, ObjectId, ObjectRegistry, PdfString};
use crate::writer::config::WriterConfig;
use crate::writer::serializer::ObjectSerializer;
use crate::writer::xref::XrefTable;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Frames a registry as a complete file: header, objects in number order,
/// cross-reference table and trailer.
pub struct PdfWriter<W: Write> {
    writer: W,
    config: WriterConfig,
    xref: XrefTable,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self::with_config(writer, WriterConfig::default())
    }

    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        Self {
            writer,
            config,
            xref: XrefTable::new(),
            current_position: 0,
        }
    }

    /// Bytes written by the latest `write_registry` call.
    pub fn position(&self) -> u64 {
        self.current_position
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the whole file and returns the offsets of its objects.
    ///
    /// `root` must name an in-use object. On error the output is incomplete
    /// and should be discarded. Each call starts a new file, so offsets in the
    /// returned table count from that call's header.
    pub fn write_registry(
        &mut self,
        registry: &ObjectRegistry,
        root: ObjectId,
        info: Option<ObjectId>,
    ) -> Result<XrefTable> {
        if !registry.contains(root) {
            return Err(PdfError::DanglingReference(root.number(), root.generation()));
        }
        if !SUPPORTED_VERSIONS.contains(&self.config.pdf_version.as_str()) {
            return Err(PdfError::InvalidValue {
                key: "Version".to_string(),
                reason: format!("unsupported header version {:?}", self.config.pdf_version),
            });
        }
        self.xref = XrefTable::new();
        self.current_position = 0;
        tracing::debug!(
            objects = registry.len(),
            max_object_number = registry.max_object_number(),
            "writing document"
        );

        self.write_header()?;
        self.write_objects(registry)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(registry, root, info, xref_position)?;
        self.writer.flush()?;

        tracing::debug!(bytes = self.current_position, "document written");
        Ok(self.xref.clone())
    }

    fn write_header(&mut self) -> Result<()> {
        let header = format!("%PDF-{}\n", self.config.pdf_version);
        self.write_bytes(header.as_bytes())?;
        // Binary comment so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_objects(&mut self, registry: &ObjectRegistry) -> Result<()> {
        let serializer = ObjectSerializer::from_config(&self.config).with_registry(registry);
        let mut buffer = Vec::new();

        for (number, slot) in registry.entries() {
            match slot.object() {
                Some(object) => {
                    let id = ObjectId::new(number, slot.generation());
                    self.xref
                        .set_in_use(number, self.current_position, slot.generation());

                    buffer.clear();
                    serializer.write_indirect(&mut buffer, id, object)?;
                    self.write_bytes(&buffer)?;
                    tracing::trace!(%id, len = buffer.len(), "wrote object");
                }
                None => self.xref.set_free(number, slot.generation()),
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        let mut buffer = Vec::new();
        self.xref.write_to(&mut buffer)?;
        self.write_bytes(&buffer)
    }

    fn write_trailer(
        &mut self,
        registry: &ObjectRegistry,
        root: ObjectId,
        info: Option<ObjectId>,
        xref_position: u64,
    ) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", self.xref.len());
        trailer.set("Root", root);
        if let Some(info) = info {
            trailer.set("Info", info);
        }
        if let Some((original, current)) = &self.config.document_id {
            trailer.set(
                "ID",
                vec![
                    Object::String(PdfString::new(original.to_vec()).with_hex_writing(true)),
                    Object::String(PdfString::new(current.to_vec()).with_hex_writing(true)),
                ],
            );
        }

        let serializer = ObjectSerializer::from_config(&self.config).with_registry(registry);
        let mut buffer = b"trailer\n".to_vec();
        serializer.write_object(&mut buffer, &Object::Dictionary(trailer))?;
        buffer.extend_from_slice(format!("\nstartxref\n{xref_position}\n%%EOF\n").as_bytes());
        self.write_bytes(&buffer)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>, config: WriterConfig) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::with_config(BufWriter::new(file), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::config::DanglingReferencePolicy;
    use crate::objects::Stream;

    fn minimal_registry() -> (ObjectRegistry, ObjectId) {
        let mut registry = ObjectRegistry::new();
        let mut pages = Dictionary::new();
        pages.set("Type", Object::name("Pages"));
        pages.set("Kids", Vec::<Object>::new());
        pages.set("Count", 0);
        let pages_id = registry.register(pages);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", pages_id);
        let catalog_id = registry.register(catalog);
        (registry, catalog_id)
    }

    fn write(registry: &ObjectRegistry, root: ObjectId, config: WriterConfig) -> (Vec<u8>, XrefTable) {
        let mut writer = PdfWriter::with_config(Vec::new(), config);
        let xref = writer.write_registry(registry, root, None).unwrap();
        (writer.into_inner(), xref)
    }

    #[test]
    fn test_write_header() {
        let (registry, root) = minimal_registry();
        let (bytes, _) = write(&registry, root, WriterConfig::new().with_pdf_version("2.0"));
        assert!(bytes.starts_with(b"%PDF-2.0\n%\xE2\xE3\xCF\xD3\n"));
    }

    #[test]
    fn test_objects_in_number_order_with_offsets() {
        let (registry, root) = minimal_registry();
        let (bytes, xref) = write(&registry, root, WriterConfig::default());

        for number in 1..=2u32 {
            let offset = xref.offset(number).unwrap() as usize;
            let expected = format!("{number} 0 obj\n");
            assert_eq!(&bytes[offset..offset + expected.len()], expected.as_bytes());
        }
        assert!(xref.offset(1) < xref.offset(2));
    }

    #[test]
    fn test_trailer_and_startxref() {
        let (registry, root) = minimal_registry();
        let (bytes, _) = write(&registry, root, WriterConfig::default());
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("trailer\n<<\n/Size 3\n/Root 2 0 R\n>>\nstartxref\n"));
        assert!(text.ends_with("%%EOF\n"));

        let needle = b"xref\n0 3\n";
        let xref_at = bytes
            .windows(needle.len())
            .position(|window| window == needle)
            .unwrap();
        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert_eq!(startxref, xref_at);
    }

    #[test]
    fn test_free_slots_in_xref() {
        let (mut registry, root) = minimal_registry();
        let scratch = registry.register("scratch");
        registry.free(scratch).unwrap();

        let (bytes, xref) = write(&registry, root, WriterConfig::default());
        let text = String::from_utf8_lossy(&bytes);

        assert!(!text.contains("3 0 obj"));
        assert!(text.contains("0000000003 65535 f \n"));
        assert!(text.contains("0000000000 00001 f \n"));
        assert_eq!(xref.get(3).map(|e| e.is_in_use()), Some(false));
    }

    #[test]
    fn test_document_id_written_as_hex() {
        let (registry, root) = minimal_registry();
        let config = WriterConfig::new().with_document_id([0xAB; 16], [0x01; 16]);
        let (bytes, _) = write(&registry, root, config);
        let text = String::from_utf8_lossy(&bytes);

        let expected = format!("/ID [<{}> <{}>]", "AB".repeat(16), "01".repeat(16));
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_stream_object() {
        let (mut registry, root) = minimal_registry();
        registry.register(Stream::new(b"q Q".to_vec()));

        let (bytes, _) = write(&registry, root, WriterConfig::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("3 0 obj\n<<\n/Length 3\n>>\nstream\nq Q\nendstream\nendobj\n"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let registry = ObjectRegistry::new();
        let mut writer = PdfWriter::new_with_writer(Vec::new());
        let result = writer.write_registry(&registry, ObjectId::new(1, 0), None);
        assert!(matches!(result, Err(PdfError::DanglingReference(1, 0))));
        assert_eq!(writer.position(), 0);
    }

    #[test]
    fn test_dangling_policy_applies_to_objects() {
        let (mut registry, root) = minimal_registry();
        let mut annot = Dictionary::new();
        annot.set("P", ObjectId::new(40, 0));
        registry.register(annot);

        let (bytes, _) = write(&registry, root, WriterConfig::default());
        assert!(String::from_utf8_lossy(&bytes).contains("/P null"));

        let mut strict = PdfWriter::with_config(
            Vec::new(),
            WriterConfig::new().with_dangling_references(DanglingReferencePolicy::Error),
        );
        assert!(matches!(
            strict.write_registry(&registry, root, None),
            Err(PdfError::DanglingReference(40, 0))
        ));
    }

    #[test]
    fn test_output_is_deterministic() {
        let (registry, root) = minimal_registry();
        let (first, _) = write(&registry, root, WriterConfig::default());
        let (second, _) = write(&registry, root, WriterConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsupported_version_writes_nothing() {
        let (registry, root) = minimal_registry();
        for version in ["1.7\n1 0 obj", "3.0", ""] {
            let mut writer =
                PdfWriter::with_config(Vec::new(), WriterConfig::new().with_pdf_version(version));
            assert!(matches!(
                writer.write_registry(&registry, root, None),
                Err(PdfError::InvalidValue { .. })
            ));
            assert!(writer.into_inner().is_empty());
        }
    }

    #[test]
    fn test_second_write_is_a_standalone_file() {
        let (registry, root) = minimal_registry();
        let mut writer = PdfWriter::new_with_writer(Vec::new());
        let first = writer.write_registry(&registry, root, None).unwrap();
        let first_len = writer.position() as usize;
        let second = writer.write_registry(&registry, root, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(writer.position() as usize, first_len);
        let bytes = writer.into_inner();
        assert_eq!(&bytes[..first_len], &bytes[first_len..]);
    }

    #[test]
    fn test_new_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let (registry, root) = minimal_registry();

        let mut writer = PdfWriter::new(&path, WriterConfig::default()).unwrap();
        writer.write_registry(&registry, root, None).unwrap();
        drop(writer);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }
}
