//! `shared.*` built-ins over a host-owned [`SharedStore`].
//!
//! Missing keys read as `null`; `set` and `remove` return the previous value.

use super::{arg_str, Arity, BuiltinRegistry};
use crate::{SharedStore, Value};

pub(crate) fn register(registry: &mut BuiltinRegistry, store: &SharedStore) {
    let get = store.clone();
    registry.register("shared.get", Arity::Exact(1), move |args| {
        Ok(get.get(arg_str("shared.get", args, 1)?).unwrap_or_default())
    });
    let set = store.clone();
    registry.register("shared.set", Arity::Exact(2), move |args| {
        let key = arg_str("shared.set", args, 1)?;
        Ok(set.set(key, args[1].clone()).unwrap_or_default())
    });
    let has = store.clone();
    registry.register("shared.has", Arity::Exact(1), move |args| {
        Ok(Value::Bool(has.contains(arg_str("shared.has", args, 1)?)))
    });
    let remove = store.clone();
    registry.register("shared.remove", Arity::Exact(1), move |args| {
        Ok(remove
            .remove(arg_str("shared.remove", args, 1)?)
            .unwrap_or_default())
    });
}
