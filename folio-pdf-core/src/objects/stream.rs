use crate::objects::{Dictionary, Object};

/// A dictionary plus an opaque payload.
///
/// The `encoded` flag records whether the payload has already been run
/// through the filters named in the dictionary. Nothing in this crate applies
/// or removes filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
    encoded: bool,
}

impl Stream {
    /// Unencoded stream whose `Length` matches `data`.
    pub fn new(data: Vec<u8>) -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.set("Length", data.len());

        Self {
            dictionary,
            data,
            encoded: false,
        }
    }

    /// Assembles a stream as-is. `Length` is left to the caller.
    pub fn from_parts(dictionary: Dictionary, data: Vec<u8>, encoded: bool) -> Self {
        Self {
            dictionary,
            data,
            encoded,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the payload and rewrites `Length`.
    pub fn set_data(&mut self, data: Vec<u8>, encoded: bool) {
        self.dictionary.set("Length", data.len());
        self.data = data;
        self.encoded = encoded;
    }

    pub fn is_encoded(&self) -> bool {
        self.encoded
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.dictionary.set("Filter", Object::name(filter));
    }

    pub fn set_decode_params(&mut self, params: Dictionary) {
        self.dictionary.set("DecodeParms", params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectId;

    fn length_ref() -> Object {
        Object::Reference(ObjectId::new(12, 0))
    }

    #[test]
    fn test_stream_new() {
        let data = vec![1, 2, 3, 4, 5];
        let stream = Stream::new(data.clone());

        assert_eq!(stream.data(), &data[..]);
        assert_eq!(stream.dictionary().get("Length"), Some(&Object::Number(5.0)));
        assert!(!stream.is_encoded());
    }

    #[test]
    fn test_stream_from_parts_keeps_dictionary() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("XObject"));
        dict.set("Length", length_ref());

        let stream = Stream::from_parts(dict, vec![0xFF, 0xD8, 0xFF], true);

        assert!(stream.is_encoded());
        assert_eq!(
            stream.dictionary().get("Length"),
            Some(&length_ref())
        );
        assert_eq!(stream.dictionary().get_name("Type").map(|n| n == "XObject"), Some(true));
    }

    #[test]
    fn test_stream_set_data_updates_length() {
        let mut stream = Stream::new(vec![1, 2, 3]);
        stream.set_data(vec![9; 10], true);

        assert_eq!(stream.data().len(), 10);
        assert_eq!(stream.dictionary().get_number("Length"), Some(10.0));
        assert!(stream.is_encoded());
    }

    #[test]
    fn test_stream_filter_and_params() {
        let mut stream = Stream::new(b"x\x9c".to_vec());
        let mut params = Dictionary::new();
        params.set("Predictor", 12);
        params.set("Columns", 5);

        stream.set_filter("FlateDecode");
        stream.set_decode_params(params);

        let dict = stream.dictionary();
        assert_eq!(dict.get_name("Filter").map(|n| n == "FlateDecode"), Some(true));
        assert_eq!(
            dict.get_dict("DecodeParms").and_then(|p| p.get_number("Columns")),
            Some(5.0)
        );
    }

    #[test]
    fn test_stream_equality_includes_encoded_flag() {
        let mut dict = Dictionary::new();
        dict.set("Length", 2);
        let plain = Stream::from_parts(dict.clone(), vec![1, 2], false);
        let encoded = Stream::from_parts(dict, vec![1, 2], true);

        assert_ne!(plain, encoded);
        assert_eq!(plain, plain.clone());
    }
}
