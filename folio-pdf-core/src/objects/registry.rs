//! Arena of indirect objects.
//!
//! Every indirect object of a document lives in one slot of an
//! [`ObjectRegistry`]. Slot `n - 1` holds object number `n`; number 0 is
//! reserved for the head of the free list and never handed out.

use crate::diagnostics::{tracing_sink, DiagnosticSink};
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::views::PdfObjectWrapper;

/// Longest reference chain [`ObjectRegistry::deref`] follows.
const MAX_DEREF_DEPTH: usize = 32;

/// Whether a slot currently holds an object.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    InUse(Object),
    Free,
}

/// One object number's entry in the arena.
///
/// For a free slot, `generation` is the generation the slot will carry when
/// it is reused, which is also what the cross-reference table records for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    generation: u16,
    state: SlotState,
}

impl Slot {
    pub fn generation(&self) -> u16 {
        self.generation
    }

    pub fn object(&self) -> Option<&Object> {
        match &self.state {
            SlotState::InUse(object) => Some(object),
            SlotState::Free => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, SlotState::Free)
    }
}

/// Owner of all indirect objects of one document.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    slots: Vec<Slot>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the next unused object number, generation 0.
    pub fn register(&mut self, value: impl Into<Object>) -> ObjectId {
        self.slots.push(Slot {
            generation: 0,
            state: SlotState::InUse(value.into()),
        });
        let id = ObjectId::new(self.slots.len() as u32, 0);
        tracing::trace!(%id, "registered object");
        id
    }

    pub fn resolve(&self, id: ObjectId) -> Option<&Object> {
        self.check(id).ok().and_then(Slot::object)
    }

    pub fn resolve_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.checked_mut(id).ok()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.check(id).is_ok()
    }

    /// Overwrites the object behind `id`. The generation is unchanged.
    pub fn replace(&mut self, id: ObjectId, value: impl Into<Object>) -> Result<()> {
        *self.checked_mut(id)? = value.into();
        Ok(())
    }

    /// Releases the object behind `id` and returns it.
    ///
    /// The slot stays in the arena, marked free, with its generation bumped
    /// so that `id` and every copy of it stop resolving.
    pub fn free(&mut self, id: ObjectId) -> Result<Object> {
        self.check(id)?;
        let slot = &mut self.slots[id.number() as usize - 1];
        slot.generation = slot.generation.saturating_add(1);
        let released = std::mem::replace(&mut slot.state, SlotState::Free);
        tracing::debug!(%id, next_generation = slot.generation, "freed object");
        match released {
            SlotState::InUse(object) => Ok(object),
            SlotState::Free => Err(PdfError::FreedObject(id.number(), id.generation())),
        }
    }

    /// Puts `value` into the free slot that `freed` used to name and returns
    /// the new reference, which carries the incremented generation.
    ///
    /// A slot whose generation reached 65535 is retired for good.
    pub fn reuse(&mut self, freed: ObjectId, value: impl Into<Object>) -> Result<ObjectId> {
        let slot = self
            .slot_mut(freed.number())
            .ok_or(PdfError::InvalidObjectReference(
                freed.number(),
                freed.generation(),
            ))?;
        if !slot.is_free() {
            return Err(PdfError::InvalidStructure(format!(
                "object {} is still in use and cannot be reused",
                freed.number()
            )));
        }
        if slot.generation == u16::MAX {
            return Err(PdfError::GenerationExhausted(freed.number()));
        }
        slot.state = SlotState::InUse(value.into());
        let id = ObjectId::new(freed.number(), slot.generation);
        tracing::debug!(%id, "reused object slot");
        Ok(id)
    }

    /// Follows references until a direct object is reached.
    ///
    /// Returns `None` for a dangling link or a chain longer than 32 hops,
    /// which covers reference cycles.
    pub fn deref<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        let mut current = object;
        for _ in 0..MAX_DEREF_DEPTH {
            match current {
                Object::Reference(id) => current = self.resolve(*id)?,
                direct => return Some(direct),
            }
        }
        None
    }

    /// In-use objects in object-number order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object()
                .map(|object| (ObjectId::new(index as u32 + 1, slot.generation), object))
        })
    }

    /// Every slot, free ones included, with its object number.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (index as u32 + 1, slot))
    }

    /// Number of in-use objects.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_free()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest object number ever assigned, 0 when nothing was registered.
    pub fn max_object_number(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Wraps the dictionary behind `id` in a view that reports to `tracing`.
    pub fn view<'a, V: PdfObjectWrapper<'a>>(&'a mut self, id: ObjectId) -> Result<V> {
        self.view_with_sink(id, tracing_sink())
    }

    /// Wraps the dictionary behind `id`, or a stream's dictionary, in a view.
    pub fn view_with_sink<'a, V: PdfObjectWrapper<'a>>(
        &'a mut self,
        id: ObjectId,
        sink: &'a dyn DiagnosticSink,
    ) -> Result<V> {
        let dict: &'a mut Dictionary = match self.checked_mut(id)? {
            Object::Dictionary(dict) => dict,
            Object::Stream(stream) => stream.dictionary_mut(),
            other => {
                return Err(PdfError::InvalidStructure(format!(
                    "object {id} is a {}, not a dictionary",
                    other.kind()
                )))
            }
        };
        Ok(V::wrap(dict, sink))
    }

    fn slot(&self, number: u32) -> Option<&Slot> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
    }

    fn slot_mut(&mut self, number: u32) -> Option<&mut Slot> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
    }

    /// Classifies `id` against its slot.
    fn check(&self, id: ObjectId) -> Result<&Slot> {
        let slot = self
            .slot(id.number())
            .ok_or(PdfError::DanglingReference(id.number(), id.generation()))?;
        match slot.state {
            SlotState::InUse(_) if slot.generation == id.generation() => Ok(slot),
            SlotState::Free if slot.generation == id.generation().saturating_add(1) => {
                Err(PdfError::FreedObject(id.number(), id.generation()))
            }
            _ => Err(PdfError::DanglingReference(id.number(), id.generation())),
        }
    }

    fn checked_mut(&mut self, id: ObjectId) -> Result<&mut Object> {
        self.check(id)?;
        match self.slot_mut(id.number()).map(|slot| &mut slot.state) {
            Some(SlotState::InUse(object)) => Ok(object),
            _ => Err(PdfError::DanglingReference(id.number(), id.generation())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{AdvisoryKind, CollectingSink};
    use crate::objects::{Array, PdfName, PdfString, Stream};
    use crate::views::dictionary_view;
    use pretty_assertions::assert_eq;

    dictionary_view! {
        struct TestView;
    }

    fn sample_values() -> Vec<Object> {
        let mut nested = Dictionary::new();
        nested.set("Kids", vec![Object::Reference(ObjectId::new(3, 0))]);
        nested.set("Inner", {
            let mut inner = Dictionary::new();
            inner.set("Deep", Array::from_numbers([1.5, -2.0]));
            inner
        });

        vec![
            Object::Null,
            Object::Boolean(false),
            Object::Number(-12.25),
            Object::String(PdfString::new(vec![0, 1, 2]).with_hex_writing(true)),
            Object::Name(PdfName::from("Catalog")),
            Object::Array(Array::from(vec![Object::Null, Object::from("x")])),
            Object::Dictionary(nested),
            Object::Stream(Stream::new(b"BT ET".to_vec())),
            Object::Reference(ObjectId::new(9, 2)),
        ]
    }

    #[test]
    fn test_register_resolve_round_trip() {
        let mut registry = ObjectRegistry::new();
        for value in sample_values() {
            let id = registry.register(value.clone());
            assert_eq!(registry.resolve(id), Some(&value));
        }
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_numbers_are_monotonic_from_one() {
        let mut registry = ObjectRegistry::new();
        let ids: Vec<_> = (0..4).map(|i| registry.register(i)).collect();
        assert_eq!(
            ids,
            (1..=4).map(|n| ObjectId::new(n, 0)).collect::<Vec<_>>()
        );
        assert_eq!(registry.max_object_number(), 4);

        registry.free(ids[1]).unwrap();
        // Freeing never makes `register` hand out an old number
        assert_eq!(registry.register(Object::Null), ObjectId::new(5, 0));
    }

    #[test]
    fn test_resolve_misses() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(true);

        assert!(registry.resolve(ObjectId::new(0, 0)).is_none());
        assert!(registry.resolve(ObjectId::new(2, 0)).is_none());
        assert!(registry.resolve(ObjectId::new(1, 1)).is_none());
        assert!(registry.resolve(id).is_some());
    }

    #[test]
    fn test_replace_keeps_generation() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(1);

        registry.replace(id, "updated").unwrap();
        assert_eq!(registry.resolve(id), Some(&Object::from("updated")));
        assert_eq!(id.generation(), 0);

        let err = registry.replace(ObjectId::new(7, 0), Object::Null).unwrap_err();
        assert!(matches!(err, PdfError::DanglingReference(7, 0)));
    }

    #[test]
    fn test_free_then_reuse_bumps_generation() {
        let mut registry = ObjectRegistry::new();
        let old = registry.register("first");
        registry.register("second");

        assert_eq!(registry.free(old).unwrap(), Object::from("first"));
        assert!(registry.resolve(old).is_none());
        assert_eq!(registry.len(), 1);

        let new = registry.reuse(old, "third").unwrap();
        assert_eq!(new, ObjectId::new(1, 1));
        assert!(registry.resolve(old).is_none());
        assert_eq!(registry.resolve(new), Some(&Object::from("third")));

        // The stale reference stays dangling for replace too
        assert!(matches!(
            registry.replace(old, 0),
            Err(PdfError::DanglingReference(1, 0))
        ));
    }

    #[test]
    fn test_free_errors() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(Object::Null);
        registry.free(id).unwrap();

        assert!(matches!(registry.free(id), Err(PdfError::FreedObject(1, 0))));
        assert!(matches!(
            registry.free(ObjectId::new(4, 0)),
            Err(PdfError::DanglingReference(4, 0))
        ));
        assert!(matches!(
            registry.replace(id, 1),
            Err(PdfError::FreedObject(1, 0))
        ));
    }

    #[test]
    fn test_reuse_requires_free_slot() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(1);

        assert!(matches!(
            registry.reuse(id, 2),
            Err(PdfError::InvalidStructure(_))
        ));
        assert!(matches!(
            registry.reuse(ObjectId::new(3, 0), 2),
            Err(PdfError::InvalidObjectReference(3, 0))
        ));
    }

    #[test]
    fn test_generation_exhaustion() {
        let mut registry = ObjectRegistry::new();
        let mut id = registry.register(0);
        for _ in 0..u16::MAX - 1 {
            registry.free(id).unwrap();
            id = registry.reuse(id, 0).unwrap();
        }
        assert_eq!(id.generation(), u16::MAX - 1);

        registry.free(id).unwrap();
        assert!(matches!(
            registry.reuse(id, 0),
            Err(PdfError::GenerationExhausted(1))
        ));
        assert_eq!(registry.entries().next().map(|(_, s)| s.generation()), Some(u16::MAX));
    }

    #[test]
    fn test_iter_in_number_order_skips_free() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register(1);
        let b = registry.register(2);
        let c = registry.register(3);
        registry.free(b).unwrap();

        let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);

        let all: Vec<_> = registry.entries().map(|(n, s)| (n, s.is_free())).collect();
        assert_eq!(all, vec![(1, false), (2, true), (3, false)]);
    }

    #[test]
    fn test_deref_follows_chains() {
        let mut registry = ObjectRegistry::new();
        let target = registry.register(42);
        let hop = registry.register(target);

        let start = Object::Reference(hop);
        assert_eq!(registry.deref(&start), Some(&Object::Number(42.0)));

        let direct = Object::Boolean(true);
        assert_eq!(registry.deref(&direct), Some(&direct));

        let dangling = Object::Reference(ObjectId::new(99, 0));
        assert_eq!(registry.deref(&dangling), None);
    }

    #[test]
    fn test_deref_cycle_is_none() {
        let mut registry = ObjectRegistry::new();
        let first = registry.register(Object::Null);
        let second = registry.register(first);
        registry.replace(first, second).unwrap();

        assert_eq!(registry.deref(&Object::Reference(first)), None);
    }

    #[test]
    fn test_view_over_indirect_dictionary() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(Dictionary::new());

        registry
            .view::<TestView>(id)
            .unwrap()
            .put("Type", Object::name("Annot"));

        let dict = registry.resolve(id).and_then(Object::as_dict).unwrap();
        assert_eq!(dict.get_name("Type").map(|n| n == "Annot"), Some(true));
    }

    #[test]
    fn test_view_over_stream_dictionary() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(Stream::new(vec![1, 2]));
        let sink = CollectingSink::new();

        {
            let mut view = registry.view_with_sink::<TestView>(id, &sink).unwrap();
            view.put("Filter", Object::name("FlateDecode"));
            view.advise(AdvisoryKind::SuspiciousValue, "payload is not encoded");
        }

        let stream = registry.resolve(id).and_then(Object::as_stream).unwrap();
        assert!(stream.dictionary().contains_key("Filter"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_view_rejects_non_dictionary() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register(5);

        assert!(matches!(
            registry.view::<TestView>(id),
            Err(PdfError::InvalidStructure(_))
        ));
        assert!(matches!(
            registry.view::<TestView>(ObjectId::new(2, 0)),
            Err(PdfError::DanglingReference(2, 0))
        ));
    }
}
