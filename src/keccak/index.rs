// Byte indexing over a type exposing `as_bytes`/`as_bytes_mut`.
macro_rules! impl_byte_index {
    ($idx: ty, $struct: ident, Output = $output: ty) => {
        impl core::ops::Index<$idx> for $struct {
            type Output = $output;

            fn index(&self, index: $idx) -> &Self::Output {
                &self.as_bytes()[index]
            }
        }

        impl core::ops::IndexMut<$idx> for $struct {
            fn index_mut(&mut self, index: $idx) -> &mut Self::Output {
                &mut self.as_bytes_mut()[index]
            }
        }
    };
}

macro_rules! impl_byte_indexing {
    ($struct: ident) => {
        crate::keccak::index::impl_byte_index!(usize, $struct, Output = u8);
        crate::keccak::index::impl_byte_index!(core::ops::Range<usize>, $struct, Output = [u8]);
        crate::keccak::index::impl_byte_index!(core::ops::RangeTo<usize>, $struct, Output = [u8]);
        crate::keccak::index::impl_byte_index!(core::ops::RangeFrom<usize>, $struct, Output = [u8]);
    };
}

pub(crate) use {impl_byte_index, impl_byte_indexing};
