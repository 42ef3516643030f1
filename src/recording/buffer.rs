use crate::media::Fragment;

/// Fragments collected during one recording cycle, in delivery order
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    fragments: Vec<Fragment>,
    total_bytes: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.total_bytes += fragment.len();
        self.fragments.push(fragment);
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
        self.total_bytes = 0;
    }

    /// Move all fragments out, leaving the buffer empty
    pub fn take(&mut self) -> Vec<Fragment> {
        self.total_bytes = 0;
        std::mem::take(&mut self.fragments)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_and_resets() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(Fragment::new(vec![1, 2, 3]));
        buffer.push(Fragment::new(vec![4]));

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.total_bytes(), 4);

        let fragments = buffer.take();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].data, vec![1, 2, 3]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.total_bytes(), 0);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(Fragment::new(vec![9; 16]));
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.total_bytes(), 0);
    }
}
