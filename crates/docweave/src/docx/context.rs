//! Per-call conversion state.

use ecow::{EcoString, eco_format};
use log::trace;

use crate::det::ListType;

use super::model::{NumberingDefinition, Relationship, RelationshipTarget};

/// Id counters and accumulated definitions of a single conversion call.
///
/// A fresh context is created for every call and threaded explicitly
/// through the walk, so identical input always yields identical ids.
#[derive(Debug)]
pub(crate) struct ConvertContext {
    next_num_id: u32,
    next_rel_id: u32,
    next_image: u32,
    pub numbering: Vec<NumberingDefinition>,
    pub relationships: Vec<Relationship>,
}

impl ConvertContext {
    pub fn new() -> Self {
        Self {
            next_num_id: 1,
            next_rel_id: 1,
            next_image: 1,
            numbering: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Allocates a numbering definition for a top-level list.
    pub fn alloc_numbering(&mut self, list_type: ListType) -> u32 {
        let num_id = self.next_num_id;
        self.next_num_id += 1;
        trace!("docweave: numbering {num_id} allocated for {list_type:?} list");
        self.numbering.push(NumberingDefinition { num_id, list_type });
        num_id
    }

    /// Allocates a relationship to an external hyperlink.
    pub fn alloc_hyperlink(&mut self, url: impl Into<EcoString>) -> EcoString {
        self.push_relationship(RelationshipTarget::Hyperlink { url: url.into() })
    }

    /// Allocates an image part and its relationship.
    pub fn alloc_image(&mut self, extension: &str, content_type: &str, data: Vec<u8>) -> EcoString {
        let part_name = eco_format!("media/image{}.{extension}", self.next_image);
        self.next_image += 1;
        self.push_relationship(RelationshipTarget::Image {
            part_name,
            content_type: content_type.into(),
            data,
        })
    }

    fn push_relationship(&mut self, target: RelationshipTarget) -> EcoString {
        let id = eco_format!("rId{}", self.next_rel_id);
        self.next_rel_id += 1;
        trace!("docweave: relationship {id} allocated");
        self.relationships.push(Relationship {
            id: id.clone(),
            target,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_call_scoped() {
        let mut cx = ConvertContext::new();
        assert_eq!(cx.alloc_numbering(ListType::Ordered), 1);
        assert_eq!(cx.alloc_numbering(ListType::Ordered), 2);
        assert_eq!(cx.alloc_hyperlink("https://a.example"), "rId1");
        assert_eq!(cx.alloc_image("png", "image/png", vec![1]), "rId2");

        let RelationshipTarget::Image { part_name, .. } = &cx.relationships[1].target else {
            panic!("expected an image relationship");
        };
        assert_eq!(part_name, "media/image1.png");

        let mut fresh = ConvertContext::new();
        assert_eq!(fresh.alloc_numbering(ListType::Unordered), 1);
        assert_eq!(fresh.alloc_hyperlink("x"), "rId1");
    }
}
