//! Footer year stamp

use tracing::debug;
use vitrine_core::{Document, NodeKind};
use vitrine_platform::Host;

/// Write the host's current year into the element with id `year_id`
///
/// Returns `false` if there is no such text element.
pub fn stamp_year<H: Host + ?Sized>(doc: &mut Document, host: &H, year_id: &str) -> bool {
    let Some(node) = doc.get_by_id(year_id) else {
        debug!("footer element #{} not found, year not stamped", year_id);
        return false;
    };
    if !matches!(doc.kind(node), Some(NodeKind::Text(_))) {
        return false;
    }
    doc.set_text(node, host.local_year().to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::ManualHost;

    #[test]
    fn test_stamp_year() {
        let mut doc = Document::new();
        let root = doc.root();
        let year = doc
            .insert_with_id(root, "year", NodeKind::Text(String::new()))
            .unwrap();
        let host = ManualHost::new();
        host.set_year(2026);

        assert!(stamp_year(&mut doc, &host, "year"));
        assert_eq!(doc.text(year), Some("2026"));
    }

    #[test]
    fn test_missing_year_element() {
        let mut doc = Document::new();
        assert!(!stamp_year(&mut doc, &ManualHost::new(), "year"));
    }
}
