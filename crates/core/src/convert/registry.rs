//! The conversion registry
//!
//! A registry is a local converter table layered over an immutable shared
//! base table. Registration only ever touches the local table, so a registry
//! handed out by [`DefaultConverterFactory`](super::DefaultConverterFactory)
//! can be extended without affecting any other registry.
//!
//! # Thread Safety
//!
//! Lookups take `&self` and registration takes `&mut self`; share a registry
//! behind an `Arc` once it is fully configured.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::{downcast, Converter, ErasedConverter, ListConverter, MapConverter, TypedConverter};
use crate::error::{Error, Result};
use crate::object::{insert_unique, Object};
use crate::value::{WireKind, WireValue, DECIMAL_EXT_TYPE, UUID_EXT_TYPE};

/// How typed reads treat a nil wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NilPolicy {
    /// Nil reads as an absent value (`None`)
    Absent,
    /// Nil is an error unless the target type has its own nil converter
    Reject,
}

#[derive(Clone)]
struct Entry {
    converter: Arc<dyn ErasedConverter>,
    native: &'static str,
}

/// One layer of registered converters.
#[derive(Clone, Default)]
pub(crate) struct ConverterTable {
    decoders: HashMap<(WireKind, TypeId), Entry>,
    encoders: HashMap<TypeId, Entry>,
}

impl ConverterTable {
    fn absorb(&mut self, other: &ConverterTable) {
        self.decoders
            .extend(other.decoders.iter().map(|(k, v)| (*k, v.clone())));
        self.encoders
            .extend(other.encoders.iter().map(|(k, v)| (*k, v.clone())));
    }

    fn len(&self) -> usize {
        self.decoders.len()
    }
}

/// Type-directed bidirectional mapping between wire values and native values
#[derive(Clone)]
pub struct ConverterRegistry {
    base: Arc<ConverterTable>,
    local: ConverterTable,
    containers: bool,
    nil_policy: NilPolicy,
}

impl ConverterRegistry {
    /// Create an empty registry: no converters, no container support,
    /// nil rejected.
    pub fn new() -> Self {
        Self {
            base: Arc::new(ConverterTable::default()),
            local: ConverterTable::default(),
            containers: false,
            nil_policy: NilPolicy::Reject,
        }
    }

    pub(crate) fn layered(base: Arc<ConverterTable>, containers: bool) -> Self {
        Self {
            base,
            local: ConverterTable::default(),
            containers,
            nil_policy: NilPolicy::Absent,
        }
    }

    /// Flatten this registry into a new shared base and branch from it.
    ///
    /// The returned registry sees every converter registered here, and
    /// registrations on either side stay invisible to the other.
    pub fn derive(&self) -> Self {
        let mut table = (*self.base).clone();
        table.absorb(&self.local);
        Self {
            base: Arc::new(table),
            local: ConverterTable::default(),
            containers: self.containers,
            nil_policy: self.nil_policy,
        }
    }

    pub(crate) fn into_table(self) -> ConverterTable {
        let mut table = (*self.base).clone();
        table.absorb(&self.local);
        table
    }

    /// Whether ordered sequences and key-unique mappings are converted.
    pub fn supports_containers(&self) -> bool {
        self.containers
    }

    /// Enable or disable the container path.
    pub fn set_container_support(&mut self, enabled: bool) {
        self.containers = enabled;
    }

    /// Current nil policy.
    pub fn nil_policy(&self) -> NilPolicy {
        self.nil_policy
    }

    /// Change the nil policy.
    pub fn set_nil_policy(&mut self, policy: NilPolicy) {
        self.nil_policy = policy;
    }

    /// Register or overwrite the converter for `(kind, T)`.
    ///
    /// The converter also becomes the encoder for `T`; the last registration
    /// for a native type wins.
    pub fn register_converter<T, C>(&mut self, kind: WireKind, converter: C)
    where
        T: Any,
        C: Converter<T>,
    {
        let type_id = TypeId::of::<T>();
        let entry = Entry {
            converter: Arc::new(TypedConverter::<T, C>::new(converter)),
            native: type_name::<T>(),
        };
        let replaced = self.local.decoders.insert((kind, type_id), entry.clone()).is_some()
            || self.base.decoders.contains_key(&(kind, type_id));
        if replaced {
            debug!(
                target: "tupleproxy::registry",
                kind = %kind,
                native = entry.native,
                "Overriding converter"
            );
        }
        self.local.encoders.insert(type_id, entry);
    }

    /// Builder-style [`register_converter`](Self::register_converter).
    pub fn with_converter<T, C>(mut self, kind: WireKind, converter: C) -> Self
    where
        T: Any,
        C: Converter<T>,
    {
        self.register_converter::<T, C>(kind, converter);
        self
    }

    /// Register the element-wise converter for `Vec<T>` under the Array kind.
    ///
    /// `Vec<u8>` is binary; registering it as a list replaces that.
    pub fn register_list<T: Any>(&mut self) {
        self.register_converter::<Vec<T>, _>(WireKind::Array, ListConverter::<T>::new());
    }

    /// Register the entry-wise converter for `HashMap<K, V>` under the Map
    /// kind.
    pub fn register_map<K, V>(&mut self)
    where
        K: Any + Eq + Hash,
        V: Any,
    {
        self.register_converter::<HashMap<K, V>, _>(WireKind::Map, MapConverter::<K, V>::new());
    }

    /// Whether an exact decoder exists for `(kind, T)`.
    pub fn has_decoder<T: Any>(&self, kind: WireKind) -> bool {
        self.decoder(kind, TypeId::of::<T>()).is_some()
    }

    /// Whether an encoder exists for `T`.
    pub fn has_encoder<T: Any>(&self) -> bool {
        self.encoder(TypeId::of::<T>()).is_some()
    }

    fn decoder(&self, kind: WireKind, type_id: TypeId) -> Option<&Entry> {
        self.local
            .decoders
            .get(&(kind, type_id))
            .or_else(|| self.base.decoders.get(&(kind, type_id)))
    }

    fn encoder(&self, type_id: TypeId) -> Option<&Entry> {
        self.local
            .encoders
            .get(&type_id)
            .or_else(|| self.base.encoders.get(&type_id))
    }

    // ========================================================================
    // Wire -> native
    // ========================================================================

    /// Decode a wire value into `T` through the exact `(kind, T)` converter.
    ///
    /// `Object` and `Vec<Object>` targets without a registered converter take
    /// the dynamic path.
    pub fn to_native<T: Any>(&self, value: &WireValue) -> Result<T> {
        let kind = WireKind::of(value);
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.decoder(kind, type_id) {
            return downcast::<T>(entry.converter.to_native_any(value, self)?);
        }
        if type_id == TypeId::of::<Object>() {
            let boxed: Box<dyn Any> = Box::new(self.to_object(value)?);
            return downcast::<T>(boxed);
        }
        if type_id == TypeId::of::<Vec<Object>>() {
            let boxed: Box<dyn Any> = Box::new(self.to_native_list::<Object>(value)?);
            return downcast::<T>(boxed);
        }
        Err(Error::no_decoder(kind, type_name::<T>()))
    }

    /// Decode a wire value, applying the nil policy first.
    pub fn to_optional<T: Any>(&self, value: &WireValue) -> Result<Option<T>> {
        if value.is_nil() {
            return match self.nil_policy {
                NilPolicy::Absent => Ok(None),
                NilPolicy::Reject => Err(Error::no_decoder(WireKind::Nil, type_name::<T>())),
            };
        }
        self.to_native(value).map(Some)
    }

    /// Decode a wire value into its default native type.
    pub fn to_object(&self, value: &WireValue) -> Result<Object> {
        match value {
            WireValue::Nil => Ok(Object::Nil),
            WireValue::Boolean(_) => self.to_native::<bool>(value).map(Object::Boolean),
            WireValue::Integer(n) => match n.as_i64() {
                Some(v) if i32::try_from(v).is_ok() => {
                    self.to_native::<i32>(value).map(Object::Integer)
                }
                Some(_) => self.to_native::<i64>(value).map(Object::Long),
                None => Err(Error::conversion(format!("integer {n} does not fit in i64"))),
            },
            WireValue::F32(_) => self.to_native::<f32>(value).map(Object::Float),
            WireValue::F64(_) => self.to_native::<f64>(value).map(Object::Double),
            WireValue::String(_) => self.to_native::<String>(value).map(Object::String),
            WireValue::Binary(_) => self.to_native::<Vec<u8>>(value).map(Object::Binary),
            WireValue::Ext(ty, _) => match *ty {
                UUID_EXT_TYPE => self.to_native::<Uuid>(value).map(Object::Uuid),
                DECIMAL_EXT_TYPE => self.to_native::<Decimal>(value).map(Object::Decimal),
                other => Err(Error::NoConverterFound {
                    from: format!("Extension({other})"),
                    to: type_name::<Object>().to_string(),
                }),
            },
            WireValue::Array(items) => {
                self.require_containers(WireKind::Array, type_name::<Object>())?;
                items
                    .iter()
                    .map(|item| self.to_object(item))
                    .collect::<Result<Vec<_>>>()
                    .map(Object::List)
            }
            WireValue::Map(entries) => {
                self.require_containers(WireKind::Map, type_name::<Object>())?;
                let mut out = Vec::with_capacity(entries.len());
                for (key, val) in entries {
                    insert_unique(&mut out, self.to_object(key)?, self.to_object(val)?);
                }
                Ok(Object::Map(out))
            }
        }
    }

    /// Decode an array-kind wire value element-wise.
    pub fn to_native_list<T: Any>(&self, value: &WireValue) -> Result<Vec<T>> {
        let kind = WireKind::of(value);
        self.require_containers(kind, type_name::<Vec<T>>())?;
        match value {
            WireValue::Array(items) => items.iter().map(|item| self.to_native(item)).collect(),
            _ => Err(Error::no_decoder(kind, type_name::<Vec<T>>())),
        }
    }

    /// Decode a map-kind wire value entry-wise; a repeated key keeps the last
    /// value.
    pub fn to_native_map<K, V>(&self, value: &WireValue) -> Result<HashMap<K, V>>
    where
        K: Any + Eq + Hash,
        V: Any,
    {
        let kind = WireKind::of(value);
        self.require_containers(kind, type_name::<HashMap<K, V>>())?;
        match value {
            WireValue::Map(entries) => entries
                .iter()
                .map(|(key, val)| Ok((self.to_native(key)?, self.to_native(val)?)))
                .collect(),
            _ => Err(Error::no_decoder(kind, type_name::<HashMap<K, V>>())),
        }
    }

    fn require_containers(&self, kind: WireKind, target: &str) -> Result<()> {
        if self.containers {
            Ok(())
        } else {
            Err(Error::no_decoder(kind, target))
        }
    }

    // ========================================================================
    // Native -> wire
    // ========================================================================

    /// Encode a native value by its runtime type.
    pub fn to_wire<T: Any>(&self, object: &T) -> Result<WireValue> {
        let any = object as &dyn Any;
        if let Some(entry) = self.encoder(TypeId::of::<T>()) {
            return entry.converter.to_wire_any(any, self);
        }
        if let Some(object) = any.downcast_ref::<Object>() {
            return self.object_to_wire(object);
        }
        if let Some(items) = any.downcast_ref::<Vec<Object>>() {
            return self.to_wire_list(items);
        }
        Err(Error::no_encoder(type_name::<T>()))
    }

    /// Encode a sequence element-wise into an array-kind wire value.
    pub fn to_wire_list<T: Any>(&self, items: &[T]) -> Result<WireValue> {
        if !self.containers {
            return Err(Error::no_encoder(type_name::<Vec<T>>()));
        }
        items
            .iter()
            .map(|item| self.to_wire(item))
            .collect::<Result<Vec<_>>>()
            .map(WireValue::Array)
    }

    /// Encode a mapping entry-wise into a map-kind wire value.
    pub fn to_wire_map<K: Any, V: Any>(&self, entries: &HashMap<K, V>) -> Result<WireValue> {
        if !self.containers {
            return Err(Error::no_encoder(type_name::<HashMap<K, V>>()));
        }
        entries
            .iter()
            .map(|(key, val)| Ok((self.to_wire(key)?, self.to_wire(val)?)))
            .collect::<Result<Vec<_>>>()
            .map(WireValue::Map)
    }

    fn object_to_wire(&self, object: &Object) -> Result<WireValue> {
        match object {
            Object::Nil => self.to_wire(&()),
            Object::Boolean(b) => self.to_wire(b),
            Object::Integer(i) => self.to_wire(i),
            Object::Long(l) => self.to_wire(l),
            Object::Float(f) => self.to_wire(f),
            Object::Double(d) => self.to_wire(d),
            Object::String(s) => self.to_wire(s),
            Object::Binary(bytes) => self.to_wire(bytes),
            Object::Uuid(id) => self.to_wire(id),
            Object::Decimal(d) => self.to_wire(d),
            Object::List(items) => self.to_wire_list(items),
            Object::Map(entries) => {
                if !self.containers {
                    return Err(Error::no_encoder("Object::Map"));
                }
                entries
                    .iter()
                    .map(|(key, val)| Ok((self.object_to_wire(key)?, self.object_to_wire(val)?)))
                    .collect::<Result<Vec<_>>>()
                    .map(WireValue::Map)
            }
        }
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("base_converters", &self.base.len())
            .field("local_converters", &self.local.len())
            .field("containers", &self.containers)
            .field("nil_policy", &self.nil_policy)
            .finish()
    }
}
