//! Lists (de)serialise as plain sequences.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use super::List;
use crate::alloc::Allocator;

impl<T: Serialize, A: Allocator<Value = T>> Serialize for List<T, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T, A> Deserialize<'de> for List<T, A>
where
    T: Deserialize<'de>,
    A: Allocator<Value = T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ListVisitor(PhantomData))
    }
}

struct ListVisitor<T, A>(PhantomData<fn() -> (T, A)>);

impl<'de, T, A> Visitor<'de> for ListVisitor<T, A>
where
    T: Deserialize<'de>,
    A: Allocator<Value = T> + Default,
{
    type Value = List<T, A>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<List<T, A>, S::Error> {
        let mut list = List::try_new_in(A::default()).map_err(S::Error::custom)?;
        while let Some(value) = seq.next_element()? {
            list.try_push_back(value).map_err(S::Error::custom)?;
        }
        Ok(list)
    }
}
