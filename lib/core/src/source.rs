//! The contract between the search engine and whatever owns the contacts.

use crate::contact::{Contact, ContactId};
use crate::error::{Result, SourceError};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot order: name, ties broken by id
fn name_order(a: &Contact, b: &Contact) -> Ordering {
    a.name.cmp(&b.name).then(a.id.cmp(&b.id))
}

/// Immutable point-in-time view of a contact collection.
///
/// Cloning is cheap: the contacts live behind an `Arc` and are never
/// mutated once the snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSnapshot {
    version: u64,
    contacts: Arc<[Contact]>,
}

impl ContactSnapshot {
    /// Wrap contacts in the order given
    pub fn new(version: u64, contacts: Vec<Contact>) -> Self {
        Self {
            version,
            contacts: contacts.into(),
        }
    }

    /// Build a snapshot ordered by name, ties broken by id
    pub fn ordered_by_name(version: u64, mut contacts: Vec<Contact>) -> Self {
        contacts.sort_by(name_order);
        Self::new(version, contacts)
    }

    /// Next version of a name-ordered snapshot with one contact changed.
    ///
    /// `previous` is the entry being replaced, if any. Linear in the size of
    /// the snapshot; nothing is re-sorted.
    pub(crate) fn with_change(
        &self,
        version: u64,
        previous: Option<&Contact>,
        contact: Contact,
    ) -> Self {
        let mut contacts = Vec::with_capacity(self.contacts.len() + 1);
        contacts.extend_from_slice(&self.contacts);
        if let Some(previous) = previous {
            if let Ok(index) = contacts.binary_search_by(|c| name_order(c, previous)) {
                contacts.remove(index);
            }
        }
        let (Ok(index) | Err(index)) = contacts.binary_search_by(|c| name_order(c, &contact));
        contacts.insert(index, contact);
        Self::new(version, contacts)
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }
}

impl Default for ContactSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// What observers of a source receive: a fresh snapshot, or the reason the
/// latest read failed.
pub type SnapshotUpdate = std::result::Result<ContactSnapshot, SourceError>;

/// A continuously observable contact collection
pub trait ContactSource: Send + Sync {
    /// Subscribe to collection changes. The receiver starts at the current
    /// value and sees a new one after every insert or update.
    fn observe_all(&self) -> watch::Receiver<SnapshotUpdate>;

    /// Look up a single contact
    fn get_by_id(&self, id: ContactId) -> Result<Contact>;

    /// Number of contacts in the collection
    fn count(&self) -> Result<usize>;
}

impl<T: ContactSource + ?Sized> ContactSource for Arc<T> {
    fn observe_all(&self) -> watch::Receiver<SnapshotUpdate> {
        (**self).observe_all()
    }

    fn get_by_id(&self, id: ContactId) -> Result<Contact> {
        (**self).get_by_id(id)
    }

    fn count(&self) -> Result<usize> {
        (**self).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_by_name_breaks_ties_by_id() {
        let snapshot = ContactSnapshot::ordered_by_name(
            1,
            vec![
                Contact::new("Sansa", "2").with_id(4),
                Contact::new("Arya", "1").with_id(9),
                Contact::new("Arya", "3").with_id(2),
            ],
        );
        let ids: Vec<u64> = snapshot.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![2, 9, 4]);
        assert_eq!(snapshot.version(), 1);
    }

    #[test]
    fn test_with_change_keeps_name_order() {
        let base = ContactSnapshot::ordered_by_name(
            1,
            vec![
                Contact::new("Arya", "1").with_id(1),
                Contact::new("Jon", "2").with_id(2),
                Contact::new("Sansa", "3").with_id(3),
            ],
        );

        let added = base.with_change(2, None, Contact::new("Bran", "4").with_id(4));
        let names: Vec<&str> = added.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Arya", "Bran", "Jon", "Sansa"]);
        assert_eq!(added.version(), 2);
        assert_eq!(base.len(), 3);

        // A rename moves the contact to its new place
        let previous = Contact::new("Arya", "1").with_id(1);
        let renamed =
            added.with_change(3, Some(&previous), Contact::new("Yara", "1").with_id(1));
        let names: Vec<&str> = renamed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bran", "Jon", "Sansa", "Yara"]);
    }

    #[test]
    fn test_clone_shares_contacts() {
        let snapshot = ContactSnapshot::new(3, vec![Contact::new("Jon", "1")]);
        let copy = snapshot.clone();
        assert_eq!(snapshot, copy);
        assert!(std::ptr::eq(snapshot.contacts(), copy.contacts()));
    }
}
