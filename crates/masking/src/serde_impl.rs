//! Serde passthrough for secrets.
//!
//! Wire payloads must carry the real value, so `Serialize`/`Deserialize`
//! operate on the inner data. Masking applies to `Debug` only; serializing a
//! secret into a log sink is on the caller.

use serde::{de, ser, Deserialize, Serialize};

use crate::{PeekInterface, Secret, Strategy};

impl<'de, S, I> Deserialize<'de> for Secret<S, I>
where
    S: Deserialize<'de>,
    I: Strategy<S>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        S::deserialize(deserializer).map(Self::new)
    }
}

impl<S, I> Serialize for Secret<S, I>
where
    S: Serialize,
    I: Strategy<S>,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: ser::Serializer,
    {
        self.peek().serialize(serializer)
    }
}

/// Render `value` for logging with secrets shown as their mask rather than
/// their contents.
pub fn masked_serialize<T: std::fmt::Debug>(value: &T) -> String {
    format!("{value:?}")
}
