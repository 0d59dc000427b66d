//! Turns uploaded bytes into inline model parts.

use super::providers::{GenerativePart, InlineData};
use crate::models::Attachment;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Wrap raw bytes as a base64 inline part with the declared mime type.
pub fn file_to_generative_part(data: &[u8], mime_type: &str) -> GenerativePart {
    GenerativePart::InlineData(InlineData {
        mime_type: mime_type.to_string(),
        data: STANDARD.encode(data),
    })
}

impl From<&Attachment> for GenerativePart {
    fn from(attachment: &Attachment) -> Self {
        file_to_generative_part(&attachment.data, &attachment.mime_type)
    }
}

/// Recover the original bytes of an inline part.
pub fn decode_inline_data(inline: &InlineData) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(&inline.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn inline(part: GenerativePart) -> InlineData {
        match part {
            GenerativePart::InlineData(inline) => inline,
            other => panic!("expected inline data, got {:?}", other),
        }
    }

    #[test]
    fn binary_bytes_survive_encoding() {
        let data: Vec<u8> = (0..=255u8).chain([0, 0, 255, 10, 13]).collect();
        let part = inline(file_to_generative_part(&data, "application/octet-stream"));
        assert_eq!(decode_inline_data(&part).unwrap(), data);
    }

    #[test]
    fn empty_file_encodes_to_empty_string() {
        let part = inline(file_to_generative_part(&[], "audio/mpeg"));
        assert_eq!(part.data, "");
        assert!(decode_inline_data(&part).unwrap().is_empty());
    }

    #[test]
    fn uses_standard_padded_alphabet() {
        let part = inline(file_to_generative_part(b"\xfb\xff", "image/png"));
        assert_eq!(part.data, "+/8=");
        assert_eq!(part.mime_type, "image/png");
    }

    #[test]
    fn attachment_keeps_declared_mime_type() {
        let attachment = Attachment {
            field: "audio".into(),
            file_name: Some("clip.wav".into()),
            mime_type: "audio/wav".into(),
            data: Bytes::from_static(b"RIFF"),
        };
        let part = inline(GenerativePart::from(&attachment));
        assert_eq!(part.mime_type, "audio/wav");
        assert_eq!(decode_inline_data(&part).unwrap(), b"RIFF");
    }
}
