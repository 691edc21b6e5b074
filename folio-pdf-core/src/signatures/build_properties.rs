use crate::error::Result;
use crate::objects::Object;
use crate::views::{dictionary_view, PdfObjectWrapper};

dictionary_view! {
    /// The `Prop_Build` dictionary of a signature: which software built it.
    pub struct SignatureBuildProperties;
}

dictionary_view! {
    /// The `App` entry of `Prop_Build`, describing the signing application.
    pub struct SignatureAppProperties;
}

impl SignatureBuildProperties<'_> {
    /// Wraps `App`, creating it on first use.
    pub fn app(&mut self) -> Result<SignatureAppProperties<'_>> {
        let sink = self.sink;
        let app = self.dict.get_or_insert_dict("App")?;
        Ok(SignatureAppProperties::wrap(app, sink))
    }

    pub fn set_signature_creator(&mut self, creator: &str) -> Result<&mut Self> {
        self.app()?.set_signature_creator(creator);
        Ok(self)
    }

    pub fn signature_creator(&self) -> Option<String> {
        self.dict
            .get_dict("App")
            .and_then(|app| app.get_name("Name"))
            .map(|name| name.to_string_lossy().into_owned())
    }
}

impl SignatureAppProperties<'_> {
    /// Application name, written as a name object.
    pub fn set_signature_creator(&mut self, creator: &str) -> &mut Self {
        self.put("Name", Object::name(creator))
    }

    pub fn signature_creator(&self) -> Option<String> {
        self.dict
            .get_name("Name")
            .map(|name| name.to_string_lossy().into_owned())
    }
}
