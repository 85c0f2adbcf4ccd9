//! Snapshot Codec
//!
//! `[{title, backgroundColor, zIndex, position: {top, left}, items: [{id, content}]}]`

use std::collections::HashSet;

use crate::domain::{DomainError, DomainResult, StickerData};

pub fn encode(stickers: &[StickerData]) -> DomainResult<String> {
    Ok(serde_json::to_string(stickers)?)
}

/// Parses and validates a whole snapshot. Item ids must be unique across
/// every sticker since they double as element ids.
pub fn decode(raw: &str) -> DomainResult<Vec<StickerData>> {
    let stickers: Vec<StickerData> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for item in stickers.iter().flat_map(|sticker| sticker.items.iter()) {
        if !seen.insert(&item.id) {
            return Err(DomainError::Conflict(format!("item id {} appears twice", item.id)));
        }
    }
    Ok(stickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[{"title":"Todo","backgroundColor":"rgb(160, 170, 180)","zIndex":4,"position":{"top":20,"left":30},"items":[{"id":"item-1","content":"milk"}]}]"#;

    #[test]
    fn test_decode_reads_wire_shape() {
        let stickers = decode(SNAPSHOT).unwrap();
        assert_eq!(stickers.len(), 1);
        assert_eq!(stickers[0].title, "Todo");
        assert_eq!(stickers[0].z_index, 4);
        assert_eq!(stickers[0].position.left, 30);
        assert_eq!(stickers[0].items[0].content, "milk");
    }

    #[test]
    fn test_encode_is_byte_compatible() {
        assert_eq!(encode(&decode(SNAPSHOT).unwrap()).unwrap(), SNAPSHOT);
    }

    #[test]
    fn test_malformed_json_is_invalid_input() {
        assert!(matches!(decode("[{\"title\":"), Err(DomainError::InvalidInput(_))));
        assert!(matches!(decode("{\"title\":\"not a list\"}"), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_item_ids_conflict() {
        let raw = r#"[
            {"title":"A","backgroundColor":"red","zIndex":1,"position":{"top":0,"left":0},"items":[{"id":"dup","content":"1"}]},
            {"title":"B","backgroundColor":"red","zIndex":2,"position":{"top":0,"left":0},"items":[{"id":"dup","content":"2"}]}
        ]"#;
        assert!(matches!(decode(raw), Err(DomainError::Conflict(_))));
    }
}
