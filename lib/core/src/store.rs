use crate::source::{ContactSnapshot, ContactSource, SnapshotUpdate};
use crate::{Contact, ContactId, Error, Result, SourceError};
use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, warn};

struct StoreInner {
    contacts: AHashMap<ContactId, Contact>,
    next_id: u64,
    version: u64,
    snapshot: ContactSnapshot,
}

impl StoreInner {
    /// Re-sort the whole collection into a new snapshot
    fn rebuild_snapshot(&mut self) -> ContactSnapshot {
        self.version += 1;
        let contacts: Vec<Contact> = self.contacts.values().cloned().collect();
        self.snapshot = ContactSnapshot::ordered_by_name(self.version, contacts);
        self.snapshot.clone()
    }

    /// Derive the next snapshot from the current one for a single change
    fn apply_to_snapshot(
        &mut self,
        previous: Option<&Contact>,
        contact: Contact,
    ) -> ContactSnapshot {
        self.version += 1;
        self.snapshot = self.snapshot.with_change(self.version, previous, contact);
        self.snapshot.clone()
    }

    fn reserve_id(&mut self, id: ContactId) {
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
    }
}

/// In-memory contact collection that publishes a new snapshot on every change
pub struct ContactStore {
    inner: RwLock<StoreInner>,
    updates: watch::Sender<SnapshotUpdate>,
}

impl ContactStore {
    pub fn new() -> Self {
        let (updates, _) = watch::channel(Ok(ContactSnapshot::empty()));
        Self {
            inner: RwLock::new(StoreInner {
                contacts: AHashMap::new(),
                next_id: 1,
                version: 0,
                snapshot: ContactSnapshot::empty(),
            }),
            updates,
        }
    }

    /// Number of contacts
    pub fn count(&self) -> usize {
        self.inner.read().contacts.len()
    }

    /// The id the next auto-assigned insert will receive
    pub fn next_id(&self) -> u64 {
        self.inner.read().next_id
    }

    /// Insert a contact, assigning an id when it has none
    pub fn insert(&self, mut contact: Contact) -> Result<ContactId> {
        let mut inner = self.inner.write();

        if contact.id.is_assigned() {
            if inner.contacts.contains_key(&contact.id) {
                return Err(Error::ContactExists(contact.id));
            }
        } else {
            contact.id = ContactId(inner.next_id);
        }

        let id = contact.id;
        inner.reserve_id(id);
        inner.contacts.insert(id, contact.clone());
        let snapshot = inner.apply_to_snapshot(None, contact);
        self.publish(snapshot);
        Ok(id)
    }

    /// Insert a batch and publish a single snapshot for all of it.
    ///
    /// Ids are assigned in batch order. Nothing is inserted when any
    /// explicit id is already taken.
    pub fn insert_many(&self, contacts: Vec<Contact>) -> Result<Vec<ContactId>> {
        let mut inner = self.inner.write();

        let mut next_id = inner.next_id;
        let mut taken = AHashSet::with_capacity(contacts.len());
        let mut staged = Vec::with_capacity(contacts.len());
        for mut contact in contacts {
            if contact.id.is_assigned() {
                if inner.contacts.contains_key(&contact.id) || taken.contains(&contact.id) {
                    return Err(Error::ContactExists(contact.id));
                }
                next_id = next_id.max(contact.id.0 + 1);
            } else {
                contact.id = ContactId(next_id);
                next_id += 1;
            }
            taken.insert(contact.id);
            staged.push(contact);
        }

        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ContactId> = staged.iter().map(|c| c.id).collect();
        inner.next_id = next_id;
        for contact in staged {
            inner.contacts.insert(contact.id, contact);
        }
        let snapshot = inner.rebuild_snapshot();
        self.publish(snapshot);
        Ok(ids)
    }

    /// Replace an existing contact
    pub fn update(&self, contact: Contact) -> Result<()> {
        if !contact.id.is_assigned() {
            return Err(Error::InvalidContact(
                "cannot update a contact without an id".to_string(),
            ));
        }

        let mut inner = self.inner.write();
        let previous = match inner.contacts.get_mut(&contact.id) {
            Some(existing) => std::mem::replace(existing, contact.clone()),
            None => return Err(Error::ContactNotFound(contact.id)),
        };
        let snapshot = inner.apply_to_snapshot(Some(&previous), contact);
        self.publish(snapshot);
        Ok(())
    }

    /// Insert or replace a contact that already carries an id
    pub fn upsert(&self, contact: Contact) -> Result<()> {
        if !contact.id.is_assigned() {
            return Err(Error::InvalidContact(
                "cannot upsert a contact without an id".to_string(),
            ));
        }

        let mut inner = self.inner.write();
        inner.reserve_id(contact.id);
        let previous = inner.contacts.insert(contact.id, contact.clone());
        let snapshot = inner.apply_to_snapshot(previous.as_ref(), contact);
        self.publish(snapshot);
        Ok(())
    }

    /// Replace the whole collection with previously stored contacts,
    /// publishing a single snapshot. Ids handed out before stay retired.
    pub fn restore(&self, contacts: Vec<Contact>, next_id: u64) -> Result<()> {
        if let Some(contact) = contacts.iter().find(|c| !c.id.is_assigned()) {
            return Err(Error::InvalidContact(format!(
                "stored contact '{}' has no id",
                contact.name
            )));
        }

        let mut inner = self.inner.write();
        inner.contacts.clear();
        for contact in contacts {
            inner.reserve_id(contact.id);
            inner.contacts.insert(contact.id, contact);
        }
        if next_id > inner.next_id {
            inner.next_id = next_id;
        }
        let snapshot = inner.rebuild_snapshot();
        self.publish(snapshot);
        Ok(())
    }

    /// Get a contact by ID
    pub fn get(&self, id: ContactId) -> Option<Contact> {
        self.inner.read().contacts.get(&id).cloned()
    }

    /// Current name-ordered snapshot
    pub fn all(&self) -> ContactSnapshot {
        self.inner.read().snapshot.clone()
    }

    /// Tell observers that the collection could not be read
    pub fn report_failure(&self, reason: impl Into<String>) {
        let error = SourceError::new(reason);
        warn!(reason = %error, "Contact source degraded");
        // Hold the lock so a concurrent mutation cannot publish in between.
        let _inner = self.inner.read();
        let _previous = self.updates.send_replace(Err(error));
    }

    /// Publish the current snapshot again, clearing a reported failure
    pub fn refresh(&self) {
        let inner = self.inner.read();
        let _previous = self.updates.send_replace(Ok(inner.snapshot.clone()));
    }

    /// Caller still holds the write lock, so snapshots go out in version order
    fn publish(&self, snapshot: ContactSnapshot) {
        debug!(
            version = snapshot.version(),
            contacts = snapshot.len(),
            "Publishing contact snapshot"
        );
        let _previous = self.updates.send_replace(Ok(snapshot));
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactSource for ContactStore {
    fn observe_all(&self) -> watch::Receiver<SnapshotUpdate> {
        self.updates.subscribe()
    }

    fn get_by_id(&self, id: ContactId) -> Result<Contact> {
        self.get(id).ok_or(Error::ContactNotFound(id))
    }

    fn count(&self) -> Result<usize> {
        Ok(ContactStore::count(self))
    }
}
