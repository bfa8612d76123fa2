//! Edits to the client collection at `inbounds[0].settings.clients`.
//!
//! Reads are lenient: any missing or wrong-shaped level reads as "no
//! clients". Appends are strict about everything above `clients`.

use thiserror::Error;

use crate::document::{ClientRecord, InboundSettings, Slot, XrayDocument};

/// The document does not have the shape needed to append a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("config has no inbounds")]
    MissingInbounds,
    #[error("config inbounds is not a list")]
    InboundsNotList,
    #[error("config inbounds list is empty")]
    NoInbound,
    #[error("first inbound is not an object")]
    InboundNotObject,
    #[error("first inbound has no settings")]
    MissingSettings,
    #[error("first inbound settings is not an object")]
    SettingsNotObject,
    #[error("inbound clients is not a list")]
    ClientsNotList,
}

fn settings(document: &XrayDocument) -> Option<&InboundSettings> {
    document.inbounds.typed()?.first()?.typed()?.settings.typed()
}

fn settings_mut(document: &mut XrayDocument) -> Result<&mut InboundSettings, StructureError> {
    let inbounds = match &mut document.inbounds {
        Slot::Typed(inbounds) => inbounds,
        Slot::Absent => return Err(StructureError::MissingInbounds),
        Slot::Raw(_) => return Err(StructureError::InboundsNotList),
    };
    let inbound = match inbounds.first_mut() {
        Some(Slot::Typed(inbound)) => inbound,
        Some(_) => return Err(StructureError::InboundNotObject),
        None => return Err(StructureError::NoInbound),
    };
    match &mut inbound.settings {
        Slot::Typed(settings) => Ok(settings),
        Slot::Absent => Err(StructureError::MissingSettings),
        Slot::Raw(_) => Err(StructureError::SettingsNotObject),
    }
}

/// Current clients in document order.
///
/// Never fails. Every object in the collection is listed whatever its field
/// types; entries that are not objects are skipped.
pub fn list_clients(document: &XrayDocument) -> Vec<ClientRecord> {
    settings(document)
        .and_then(|settings| settings.clients.typed())
        .map(|clients| {
            clients
                .iter()
                .filter_map(|slot| slot.typed().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Append a new client with the vision flow.
///
/// A missing `clients` key is created; a `clients` value that is present but
/// not a list is an error.
pub fn add_client(document: &mut XrayDocument, id: &str, email: &str) -> Result<(), StructureError> {
    let settings = settings_mut(document)?;

    if settings.clients.is_absent() {
        settings.clients = Slot::Typed(Vec::new());
    }
    let clients = settings
        .clients
        .typed_mut()
        .ok_or(StructureError::ClientsNotList)?;

    clients.push(Slot::Typed(ClientRecord::new(id, email)));
    Ok(())
}

/// Drop every client whose `id` equals `id`.
///
/// Entries that are not objects, or have no `id` key at all, are pruned along
/// the way. A record whose `id` is present but not a string never matches and
/// is kept. When the path to the collection does not exist the document is
/// left alone. Returns how many records matched; zero is not an error.
pub fn remove_client(document: &mut XrayDocument, id: &str) -> usize {
    let Ok(settings) = settings_mut(document) else {
        return 0;
    };
    let Some(clients) = settings.clients.typed_mut() else {
        return 0;
    };

    let before = clients.len();
    let mut matched = 0;
    clients.retain(|slot| {
        let Some(record) = slot.typed() else {
            return false;
        };
        match &record.id {
            Slot::Typed(existing) if existing == id => {
                matched += 1;
                false
            }
            Slot::Absent => false,
            Slot::Typed(_) | Slot::Raw(_) => true,
        }
    });

    let pruned = before - clients.len() - matched;
    if pruned > 0 {
        tracing::warn!(pruned, "Dropped malformed client entries");
    }
    matched
}
