use core::marker::PhantomData;

use serde_core::de::{SeqAccess, Visitor};
use serde_core::ser::SerializeSeq;
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::HybridVec;

impl<T: Serialize, const N: usize> Serialize for HybridVec<T, N> {
    /// Serializes the vector as a sequence.
    ///
    /// The format is identical whether the elements live inline or on
    /// the heap.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for HybridVec<T, N> {
    /// Deserializes from a sequence of any length.
    ///
    /// The storage state afterwards follows from the element count alone.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HybridVecVisitor<T, const N: usize> {
            _marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for HybridVecVisitor<T, N> {
            type Value = HybridVec<T, N>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vec = HybridVec::new();

                while let Some(element) = seq.next_element()? {
                    vec.push(element);
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(HybridVecVisitor {
            _marker: PhantomData,
        })
    }
}
