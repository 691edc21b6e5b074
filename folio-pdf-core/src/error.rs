use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid object reference: {0} {1} R")]
    InvalidObjectReference(u32, u16),

    #[error("Dangling object reference: {0} {1} R")]
    DanglingReference(u32, u16),

    #[error("Object {0} {1} R has been freed")]
    FreedObject(u32, u16),

    #[error("Object number {0} has exhausted its generation numbers")]
    GenerationExhausted(u32),

    #[error("Wrong object kind for /{key}: expected {expected}, found {found}")]
    WrongObjectKind {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Array /{key} must have an even number of elements, got {len}")]
    OddArrayLength { key: String, len: usize },

    #[error("Array /{key} length {len} is not a multiple of {multiple}")]
    InvalidArrayLength {
        key: String,
        len: usize,
        multiple: usize,
    },

    #[error("Invalid value for /{key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Number {0} has no PDF representation")]
    NonFiniteNumber(f64),

    #[error("Stream dictionary has no /Length entry")]
    MissingStreamLength,
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_pdf_error_display() {
        let error = PdfError::InvalidStructure("test message".to_string());
        assert_eq!(error.to_string(), "Invalid PDF structure: test message");
    }

    #[test]
    fn test_pdf_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_chain_display() {
        let errors = [
            (
                "Invalid object reference: 999 0 R",
                PdfError::InvalidObjectReference(999, 0),
            ),
            (
                "Dangling object reference: 4 2 R",
                PdfError::DanglingReference(4, 2),
            ),
            ("Object 7 1 R has been freed", PdfError::FreedObject(7, 1)),
            (
                "Wrong object kind for /Dest: expected array, name or string, found number",
                PdfError::WrongObjectKind {
                    key: "Dest".to_string(),
                    expected: "array, name or string",
                    found: "number",
                },
            ),
            (
                "Array /ByteRange must have an even number of elements, got 3",
                PdfError::OddArrayLength {
                    key: "ByteRange".to_string(),
                    len: 3,
                },
            ),
            (
                "Array /QuadPoints length 6 is not a multiple of 8",
                PdfError::InvalidArrayLength {
                    key: "QuadPoints".to_string(),
                    len: 6,
                    multiple: 8,
                },
            ),
            (
                "Stream dictionary has no /Length entry",
                PdfError::MissingStreamLength,
            ),
        ];

        for (expected, error) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_non_finite_number_display() {
        let error = PdfError::NonFiniteNumber(f64::INFINITY);
        assert_eq!(error.to_string(), "Number inf has no PDF representation");
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdfError>();
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(PdfError::GenerationExhausted(12));
        match result.unwrap_err() {
            PdfError::GenerationExhausted(number) => assert_eq!(number, 12),
            _ => panic!("Expected GenerationExhausted variant"),
        }
    }
}
