/// A trait for reacting to the runs found by the recursive differ.
///
/// Indexes are absolute positions in the buffers backing the compared
/// views.  Runs are reported in output order; for a region without any
/// common element the deletion is always reported before the insertion.
pub trait DiffHook: Sized {
    /// The error produced from the hook methods.
    type Error;

    /// Called when `len` elements starting at `old_index` (in the old
    /// version) and `new_index` (in the new version) are equal.
    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = len;
        Ok(())
    }

    /// Called when a section of length `old_len`, starting at `old_index`,
    /// only exists in the old version.
    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = old_len;
        let _ = new_index;
        Ok(())
    }

    /// Called when a section of the new version, of length `new_len`
    /// and starting at `new_index`, is inserted at position `old_index`.
    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = new_len;
        Ok(())
    }

    /// Always called at the end of the algorithm.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
