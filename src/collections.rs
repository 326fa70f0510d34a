//! The `listOf…` child-ownership container.
//!
//! Every container-typed relationship in SED-ML is a `SedListOf<T>`: an
//! ordered, owning sequence of one element type, keyed secondarily by the
//! children's `id` attributes. Insertion order is document order on output.
//!
//! Ownership follows Rust's move semantics: [`SedListOf::append`] takes the
//! child by value (the `appendAndOwn` of the original API), and the
//! `remove*` operations detach and hand the child back to the caller.
//! Callers that want to keep a copy clone before appending.

use serde::Serialize;

use crate::core::{SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError, SedOperationError};
use crate::xml::marshal::AttrContext;
use crate::xml::writer::{self, XmlWriter};

/// Types that can live in a `SedListOf` container.
///
/// `accepts_tag`/`from_tag` are the tag-dispatched construction half of the
/// generic reader: when the parser meets a child tag inside a `listOf…`
/// wrapper, the item type decides whether the tag is one of its concrete
/// element names and constructs the matching value. Element-group enums
/// (simulations, tasks, changes, ranges, outputs, curves) accept several
/// tags; plain types accept exactly one.
pub trait SedListItem: SedElement + Sized {
    /// The wrapper element name, e.g. `"listOfModels"`.
    const LIST_NAME: &'static str;

    fn accepts_tag(tag: &str) -> bool;

    fn from_tag(tag: &str) -> Option<Self>;
}

/// Ordered, owning collection of child elements of one declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SedListOf<T> {
    items: Vec<T>,
}

impl<T> Default for SedListOf<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: SedListItem> SedListOf<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at position `n`, or `None` out of range.
    pub fn get(&self, n: usize) -> Option<&T> {
        self.items.get(n)
    }

    pub fn get_mut(&mut self, n: usize) -> Option<&mut T> {
        self.items.get_mut(n)
    }

    /// The first element whose `id` equals the argument. Linear scan by
    /// design; element counts are expected to be small.
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|e| e.id() == Some(id))
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == Some(id))
    }

    /// Validates and appends, taking ownership of the child.
    ///
    /// Rejects children whose `id` already exists in the container
    /// ([`SedOperationError::DuplicateObjectId`]) and children missing
    /// required attributes ([`SedOperationError::InvalidObject`]).
    pub fn append(&mut self, elem: T) -> Result<(), SedOperationError> {
        if !elem.has_required_attributes() {
            return Err(SedOperationError::InvalidObject);
        }
        if let Some(id) = elem.id() {
            if self.get_by_id(id).is_some() {
                return Err(SedOperationError::DuplicateObjectId(id.to_owned()));
            }
        }
        self.items.push(elem);
        Ok(())
    }

    /// Detaches and returns the element at position `n`; the container no
    /// longer owns it. `None` out of range, and nothing changes.
    pub fn remove(&mut self, n: usize) -> Option<T> {
        (n < self.items.len()).then(|| self.items.remove(n))
    }

    /// Detaches and returns the first element with the given `id`.
    pub fn remove_by_id(&mut self, id: &str) -> Option<T> {
        let n = self.items.iter().position(|e| e.id() == Some(id))?;
        Some(self.items.remove(n))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Appends without validation; used by the parser (which logs schema
    /// problems instead of rejecting) and by the `create_*` factories.
    pub(crate) fn push_unchecked(&mut self, elem: T) -> &mut T {
        self.items.push(elem);
        // Just pushed, so the list is non-empty.
        let n = self.items.len() - 1;
        &mut self.items[n]
    }
}

impl<'a, T: SedListItem> IntoIterator for &'a SedListOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: SedListItem> SedElement for SedListOf<T> {
    fn element_name(&self) -> &'static str {
        T::LIST_NAME
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ListOf
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    fn read_attribute(&mut self, _name: &str, _value: &str, _ctx: &mut AttrContext<'_>) {}

    fn write_attributes(&self, _start: &mut quick_xml::events::BytesStart<'static>) {}

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        let item = T::from_tag(tag)?;
        Some(self.push_unchecked(item) as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        for item in &self.items {
            writer::write_element(w, item)?;
        }
        Ok(())
    }

    fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::UnknownCoreAttribute
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::model::SedModel;

    fn model(id: &str) -> SedModel {
        let mut m = SedModel::default();
        m.set_id(id);
        m.set_source("model.xml");
        m
    }

    #[test]
    fn append_preserves_order_and_counts() {
        let mut list: SedListOf<SedModel> = SedListOf::new();
        list.append(model("a")).unwrap();
        list.append(model("b")).unwrap();
        list.append(model("c")).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).and_then(|m| m.id()), Some("b"));
        assert!(list.get(3).is_none());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut list: SedListOf<SedModel> = SedListOf::new();
        list.append(model("m1")).unwrap();

        let err = list.append(model("m1")).unwrap_err();
        assert_eq!(err, SedOperationError::DuplicateObjectId("m1".into()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn incomplete_object_is_rejected() {
        let mut list: SedListOf<SedModel> = SedListOf::new();
        // Missing the required source attribute.
        let mut m = SedModel::default();
        m.set_id("m1");

        assert_eq!(list.append(m), Err(SedOperationError::InvalidObject));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_transfers_ownership_back() {
        let mut list: SedListOf<SedModel> = SedListOf::new();
        list.append(model("a")).unwrap();
        list.append(model("b")).unwrap();

        let detached = list.remove_by_id("a").expect("present");
        assert_eq!(detached.id(), Some("a"));
        assert_eq!(list.len(), 1);

        // Removing again finds nothing and changes nothing.
        assert!(list.remove_by_id("a").is_none());
        assert_eq!(list.len(), 1);

        // Indices shifted; position 0 is now "b".
        assert_eq!(list.remove(0).and_then(|m| m.id().map(str::to_owned)), Some("b".into()));
        assert!(list.remove(0).is_none());
    }

    #[test]
    fn get_by_id_returns_first_match() {
        let mut list: SedListOf<SedModel> = SedListOf::new();
        list.append(model("x")).unwrap();
        assert!(list.get_by_id("x").is_some());
        assert!(list.get_by_id("y").is_none());
    }
}
