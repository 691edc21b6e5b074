//! Signature dictionaries (ISO 32000-1 Section 12.8.1, Table 252)

use crate::date::{format_pdf_date, parse_pdf_date};
use crate::error::{PdfError, Result};
use crate::objects::{Array, Dictionary, Object, PdfName, PdfString, TextEncoding};
use crate::signatures::build_properties::SignatureBuildProperties;
use crate::views::{dictionary_view, PdfObjectWrapper};
use chrono::{DateTime, Utc};

dictionary_view! {
    /// View over a signature dictionary. Signature dictionaries are always
    /// written as indirect objects.
    pub struct Signature;
    must_be_indirect = true
}

impl Signature<'_> {
    /// Builds an empty signature dictionary (`Type Sig`).
    pub fn create() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Sig"));
        dict
    }

    /// Builds a signature dictionary naming its handler, for example
    /// `Adobe.PPKLite` with `adbe.pkcs7.detached`.
    pub fn create_with_filter(filter: &str, sub_filter: &str) -> Dictionary {
        let mut dict = Self::create();
        dict.set("Filter", Object::name(filter));
        dict.set("SubFilter", Object::name(sub_filter));
        dict
    }

    pub fn filter(&self) -> Option<&PdfName> {
        self.dict.get_name("Filter")
    }

    pub fn sub_filter(&self) -> Option<&PdfName> {
        self.dict.get_name("SubFilter")
    }

    /// Writes `ByteRange` as `[offset length offset length ...]`.
    pub fn set_byte_range(&mut self, range: &[i64]) -> Result<&mut Self> {
        if range.len() % 2 != 0 {
            return Err(PdfError::OddArrayLength {
                key: "ByteRange".to_string(),
                len: range.len(),
            });
        }
        if let Some(negative) = range.iter().find(|&&value| value < 0) {
            return Err(PdfError::InvalidValue {
                key: "ByteRange".to_string(),
                reason: format!("negative offset or length {negative}"),
            });
        }
        let array: Array = range.iter().map(|&value| Object::from(value)).collect();
        Ok(self.put("ByteRange", array))
    }

    /// `None` when `ByteRange` is missing or holds anything but integers.
    pub fn byte_range(&self) -> Option<Vec<i64>> {
        self.dict
            .get_array("ByteRange")?
            .iter()
            .map(Object::as_i64)
            .collect()
    }

    /// Writes the signature value as a hex string.
    pub fn set_contents(&mut self, contents: &[u8]) -> &mut Self {
        self.put("Contents", PdfString::new(contents).with_hex_writing(true))
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.dict.get_string("Contents").map(PdfString::as_bytes)
    }

    pub fn set_cert(&mut self, cert: &[u8]) -> &mut Self {
        self.put("Cert", PdfString::new(cert))
    }

    pub fn cert(&self) -> Option<&[u8]> {
        self.dict.get_string("Cert").map(PdfString::as_bytes)
    }

    /// Name of the signer.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.put_unicode("Name", name)
    }

    pub fn name(&self) -> Option<String> {
        self.text("Name")
    }

    pub fn set_location(&mut self, location: &str) -> &mut Self {
        self.put_unicode("Location", location)
    }

    pub fn location(&self) -> Option<String> {
        self.text("Location")
    }

    pub fn set_reason(&mut self, reason: &str) -> &mut Self {
        self.put_unicode("Reason", reason)
    }

    pub fn reason(&self) -> Option<String> {
        self.text("Reason")
    }

    pub fn set_contact(&mut self, contact_info: &str) -> &mut Self {
        self.put_unicode("ContactInfo", contact_info)
    }

    pub fn contact(&self) -> Option<String> {
        self.text("ContactInfo")
    }

    /// Signing time (`M`).
    pub fn set_date(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.put("M", PdfString::from_text(&format_pdf_date(date)))
    }

    pub fn set_signing_time(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.set_date(date)
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        parse_pdf_date(&self.text("M")?).ok()
    }

    /// Wraps `Prop_Build`, creating it on first use.
    ///
    /// Fails when `Prop_Build` holds something other than a direct
    /// dictionary, including a reference.
    pub fn build_properties(&mut self) -> Result<SignatureBuildProperties<'_>> {
        let sink = self.sink;
        let build = self.dict.get_or_insert_dict("Prop_Build")?;
        Ok(SignatureBuildProperties::wrap(build, sink))
    }

    /// Records the signing application as `Prop_Build/App/Name`.
    pub fn set_signature_creator(&mut self, creator: &str) -> Result<&mut Self> {
        self.build_properties()?.set_signature_creator(creator)?;
        Ok(self)
    }

    pub fn signature_creator(&self) -> Option<String> {
        self.dict
            .get_dict("Prop_Build")?
            .get_dict("App")?
            .get_name("Name")
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn put_unicode(&mut self, key: &str, text: &str) -> &mut Self {
        self.put(key, PdfString::with_encoding(text, TextEncoding::UnicodeBig))
    }

    fn text(&self, key: &str) -> Option<String> {
        self.dict.get_string(key).map(PdfString::to_text)
    }
}
