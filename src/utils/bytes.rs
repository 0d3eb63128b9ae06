/// Extension trait to flatten a sequence of byte chunks into one contiguous
/// buffer.
///
/// Chunked inputs (split reads, header + body fragments) are concatenated
/// up front; the codec core only ever sees a single contiguous slice.
pub trait FlattenExt {
    fn flatten_chunks(&self) -> Vec<u8>;
}

impl<T: AsRef<[u8]>> FlattenExt for [T] {
    fn flatten_chunks(&self) -> Vec<u8> {
        let total: usize = self.iter().map(|chunk| chunk.as_ref().len()).sum();
        let mut out = Vec::with_capacity(total);
        for chunk in self {
            out.extend_from_slice(chunk.as_ref());
        }
        out
    }
}
